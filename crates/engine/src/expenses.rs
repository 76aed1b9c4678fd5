//! Expense primitives.
//!
//! An [`Expense`] is one shared payment: a single payer is credited the full
//! amount and each [`SplitDetail`] debits one consumer. The splits of an
//! accepted expense always add up to its amount.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MemberId, MoneyCents, ResultEngine, split, validate};

/// Tag reserved for percentage splits. Recognised on input so it can be
/// rejected explicitly, never dispatched.
pub const RESERVED_PERCENT_TAG: &str = "PERCENT";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SplitKind {
    Equal,
    Exact,
}

impl SplitKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "EQUAL",
            Self::Exact => "EXACT",
        }
    }
}

impl TryFrom<&str> for SplitKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "EQUAL" => Ok(Self::Equal),
            "EXACT" => Ok(Self::Exact),
            other => Err(EngineError::UnsupportedSplitKind(other.to_string())),
        }
    }
}

/// One member's share of an expense.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitDetail {
    pub member_id: MemberId,
    pub amount: MoneyCents,
}

impl SplitDetail {
    pub fn new(member_id: impl Into<MemberId>, amount: MoneyCents) -> Self {
        Self {
            member_id: member_id.into(),
            amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub title: String,
    pub amount: MoneyCents,
    pub paid_by: MemberId,
    pub date: DateTime<Utc>,
    pub split_kind: SplitKind,
    pub splits: Vec<SplitDetail>,
}

impl Expense {
    /// Builds an expense, rejecting it unless the splits add up to `amount`.
    ///
    /// Member ids are not checked here; the [`Trip`](crate::Trip) owning the
    /// roster does that.
    pub fn new(
        title: &str,
        amount: MoneyCents,
        paid_by: MemberId,
        date: DateTime<Utc>,
        split_kind: SplitKind,
        splits: Vec<SplitDetail>,
    ) -> ResultEngine<Self> {
        let title = validate::normalize_title(title)?;
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }
        split::validate_exact(amount, &splits)?;
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            amount,
            paid_by,
            date,
            split_kind,
            splits,
        })
    }

    /// Returns `true` if the member paid for or consumed part of the expense.
    pub fn involves(&self, member_id: &MemberId) -> bool {
        self.paid_by == *member_id || self.splits.iter().any(|s| s.member_id == *member_id)
    }

    /// The share the given member consumed, zero if not part of the split.
    pub fn share_of(&self, member_id: &MemberId) -> MoneyCents {
        self.splits
            .iter()
            .filter(|s| s.member_id == *member_id)
            .map(|s| s.amount)
            .sum()
    }
}

/// How a draft wants its amount divided.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum SplitRequest {
    /// Divide equally across `members`, in the given order.
    Equal { members: Vec<MemberId> },
    /// Caller-entered shares that must add up to the total.
    Exact { splits: Vec<SplitDetail> },
}

impl SplitRequest {
    pub fn kind(&self) -> SplitKind {
        match self {
            Self::Equal { .. } => SplitKind::Equal,
            Self::Exact { .. } => SplitKind::Exact,
        }
    }
}

/// User-entered expense before validation and splitting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: MoneyCents,
    pub paid_by: MemberId,
    pub split: SplitRequest,
}

impl ExpenseDraft {
    pub fn equal(
        title: &str,
        amount: MoneyCents,
        paid_by: impl Into<MemberId>,
        members: Vec<MemberId>,
    ) -> Self {
        Self {
            title: title.to_string(),
            amount,
            paid_by: paid_by.into(),
            split: SplitRequest::Equal { members },
        }
    }

    pub fn exact(
        title: &str,
        amount: MoneyCents,
        paid_by: impl Into<MemberId>,
        splits: Vec<SplitDetail>,
    ) -> Self {
        Self {
            title: title.to_string(),
            amount,
            paid_by: paid_by.into(),
            split: SplitRequest::Exact { splits },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<MemberId> {
        raw.iter().map(|id| MemberId::from(*id)).collect()
    }

    fn share(id: &str, cents: i64) -> SplitDetail {
        SplitDetail::new(id, MoneyCents::new(cents))
    }

    #[test]
    fn percent_tag_is_reserved() {
        assert_eq!(SplitKind::try_from("equal").unwrap(), SplitKind::Equal);
        assert_eq!(
            SplitKind::try_from(RESERVED_PERCENT_TAG),
            Err(EngineError::UnsupportedSplitKind("PERCENT".to_string()))
        );
        assert!(serde_json::from_str::<SplitKind>("\"PERCENT\"").is_err());
    }

    #[test]
    fn new_rejects_unbalanced_splits() {
        let err = Expense::new(
            "Taxi",
            MoneyCents::new(100),
            "a".into(),
            Utc::now(),
            SplitKind::Exact,
            vec![share("a", 40), share("b", 59)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            EngineError::UnbalancedSplit {
                expected: MoneyCents::new(100),
                actual: MoneyCents::new(99),
            }
        );
    }

    #[test]
    fn new_rejects_non_positive_amount() {
        let err = Expense::new(
            "Nothing",
            MoneyCents::ZERO,
            "a".into(),
            Utc::now(),
            SplitKind::Exact,
            vec![share("a", 0)],
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    #[test]
    fn share_and_involvement() {
        let expense = Expense::new(
            "  Dinner ",
            MoneyCents::new(100),
            "a".into(),
            Utc::now(),
            SplitKind::Equal,
            split::distribute_equally(MoneyCents::new(100), &ids(&["a", "b", "c"])),
        )
        .unwrap();
        assert_eq!(expense.title, "Dinner");
        assert_eq!(expense.share_of(&"a".into()), MoneyCents::new(34));
        assert_eq!(expense.share_of(&"z".into()), MoneyCents::ZERO);
        assert!(expense.involves(&"c".into()));
        assert!(!expense.involves(&"z".into()));
    }

    #[test]
    fn split_request_serializes_with_kind_tag() {
        let draft = ExpenseDraft::equal("Fuel", MoneyCents::new(900), "a", ids(&["a", "b"]));
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["split"]["kind"], "EQUAL");
        assert_eq!(draft.split.kind(), SplitKind::Equal);
    }
}
