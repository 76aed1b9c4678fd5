//! Allocation of one charged amount across members.
//!
//! Two allocation modes exist:
//!
//! - **equal**: [`distribute_equally`] computes the shares;
//! - **exact**: the caller enters the shares and [`validate_exact`] only
//!   checks that they add up. [`balance_remainder`] applies the single
//!   allowed correction, visibly, to the first selected member.

use serde::{Deserialize, Serialize};

use crate::{EngineError, MemberId, MoneyCents, ResultEngine, SplitDetail, validate};

/// Splits `total` into equal shares, one per entry of `member_ids`.
///
/// Every member gets `total / n`; the first `total % n` members, in the order
/// given, get one extra minor unit. The result always adds up to `total` and
/// no two shares differ by more than one unit.
///
/// Returns an empty vector when `total <= 0` or `member_ids` is empty. Callers
/// must treat that as a rejected split, not as a free one.
///
/// ```rust
/// use engine::{MemberId, MoneyCents, split::distribute_equally};
///
/// let ids: Vec<MemberId> = ["a", "b", "c"].into_iter().map(MemberId::from).collect();
/// let shares: Vec<i64> = distribute_equally(MoneyCents::new(100), &ids)
///     .iter()
///     .map(|s| s.amount.cents())
///     .collect();
/// assert_eq!(shares, [34, 33, 33]);
/// ```
pub fn distribute_equally(total: MoneyCents, member_ids: &[MemberId]) -> Vec<SplitDetail> {
    if !total.is_positive() || member_ids.is_empty() {
        return Vec::new();
    }
    let Ok(count) = i64::try_from(member_ids.len()) else {
        return Vec::new();
    };
    let base = total.cents() / count;
    let remainder = total.cents() % count;

    member_ids
        .iter()
        .zip(0i64..)
        .map(|(id, position)| {
            let bonus = i64::from(position < remainder);
            SplitDetail::new(id.clone(), MoneyCents::new(base + bonus))
        })
        .collect()
}

/// Checks that manually entered shares add up to `total`, to the unit.
pub fn validate_exact(total: MoneyCents, splits: &[SplitDetail]) -> ResultEngine<()> {
    if splits.is_empty() {
        return Err(EngineError::EmptySelection);
    }
    if let Some(negative) = splits.iter().find(|s| s.amount.is_negative()) {
        return Err(EngineError::InvalidAmount(format!(
            "share for {} must not be negative",
            negative.member_id
        )));
    }
    let actual = validate::checked_sum(splits.iter().map(|s| s.amount))
        .ok_or_else(|| EngineError::InvalidAmount("shares overflow".to_string()))?;
    if actual != total {
        return Err(EngineError::UnbalancedSplit {
            expected: total,
            actual,
        });
    }
    Ok(())
}

/// A correction applied to one member's share so a manual split balances.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitAdjustment {
    pub member_id: MemberId,
    pub delta: MoneyCents,
}

/// Forces a manual split to add up by moving the difference onto the first
/// selected member.
///
/// Returns the adjustment that was applied so it can be shown to the user.
/// Returns `None`, leaving `splits` untouched, when there is nothing to adjust,
/// when `splits` is empty, or when the correction would make the first share
/// negative.
pub fn balance_remainder(
    total: MoneyCents,
    splits: &mut [SplitDetail],
) -> Option<SplitAdjustment> {
    let entered = validate::checked_sum(splits.iter().map(|s| s.amount))?;
    let delta = total.checked_sub(entered)?;
    let first = splits.first_mut()?;
    if delta.is_zero() {
        return None;
    }
    let adjusted = first.amount.checked_add(delta)?;
    if adjusted.is_negative() {
        return None;
    }
    first.amount = adjusted;
    Some(SplitAdjustment {
        member_id: first.member_id.clone(),
        delta,
    })
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

    fn amounts(splits: &[SplitDetail]) -> Vec<i64> {
        splits.iter().map(|s| s.amount.cents()).collect()
    }

    #[test]
    fn remainder_goes_to_first_members_in_caller_order() {
        let splits = distribute_equally(MoneyCents::new(100), &ids(&["a", "b", "c"]));
        assert_eq!(amounts(&splits), [34, 33, 33]);
        assert_eq!(splits[0].member_id.as_str(), "a");

        let reordered = distribute_equally(MoneyCents::new(100), &ids(&["c", "a", "b"]));
        assert_eq!(reordered[0].member_id.as_str(), "c");
        assert_eq!(amounts(&reordered), [34, 33, 33]);
    }

    #[test]
    fn even_division_has_no_bonus() {
        let splits = distribute_equally(MoneyCents::new(900), &ids(&["a", "b", "c"]));
        assert_eq!(amounts(&splits), [300, 300, 300]);
    }

    #[test]
    fn total_smaller_than_member_count() {
        let splits = distribute_equally(MoneyCents::new(2), &ids(&["a", "b", "c", "d"]));
        assert_eq!(amounts(&splits), [1, 1, 0, 0]);
    }

    #[test]
    fn degenerate_inputs_yield_empty() {
        assert!(distribute_equally(MoneyCents::ZERO, &ids(&["a", "b"])).is_empty());
        assert!(distribute_equally(MoneyCents::new(-10), &ids(&["a"])).is_empty());
        assert!(distribute_equally(MoneyCents::new(10), &[]).is_empty());
    }

    #[test]
    fn exact_split_must_match_total() {
        let unbalanced = vec![share("a", 40), share("b", 59)];
        assert_eq!(
            validate_exact(MoneyCents::new(100), &unbalanced),
            Err(EngineError::UnbalancedSplit {
                expected: MoneyCents::new(100),
                actual: MoneyCents::new(99),
            })
        );

        let balanced = vec![share("a", 40), share("b", 60)];
        assert_eq!(validate_exact(MoneyCents::new(100), &balanced), Ok(()));
    }

    #[test]
    fn exact_split_rejects_negative_and_empty() {
        let negative = vec![share("a", 120), share("b", -20)];
        assert!(matches!(
            validate_exact(MoneyCents::new(100), &negative),
            Err(EngineError::InvalidAmount(_))
        ));
        assert_eq!(
            validate_exact(MoneyCents::new(100), &[]),
            Err(EngineError::EmptySelection)
        );
    }

    #[test]
    fn remainder_correction_lands_on_first_member() {
        let mut splits = vec![share("a", 40), share("b", 59)];
        let adjustment = balance_remainder(MoneyCents::new(100), &mut splits).unwrap();
        assert_eq!(adjustment.member_id.as_str(), "a");
        assert_eq!(adjustment.delta, MoneyCents::new(1));
        assert_eq!(amounts(&splits), [41, 59]);
        assert_eq!(validate_exact(MoneyCents::new(100), &splits), Ok(()));
    }

    #[test]
    fn remainder_correction_refuses_negative_share() {
        let mut splits = vec![share("a", 5), share("b", 110)];
        assert_eq!(balance_remainder(MoneyCents::new(100), &mut splits), None);
        assert_eq!(amounts(&splits), [5, 110]);
    }

    #[test]
    fn balanced_split_needs_no_correction() {
        let mut splits = vec![share("a", 50), share("b", 50)];
        assert_eq!(balance_remainder(MoneyCents::new(100), &mut splits), None);
        assert_eq!(balance_remainder(MoneyCents::new(100), &mut []), None);
    }
}
