//! The `Trip` holds one group's roster and expense history.
//!
//! It is the collaborator that feeds the pure ledger functions: it keeps
//! members and expenses consistent (every id referenced by an expense is on
//! the roster) and recomputes balances and settlements on every read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    Balance, Currency, EngineError, Expense, ExpenseDraft, Member, MemberId, MemberSummary,
    MoneyCents, ResultEngine, Settlement, SplitDetail, SplitRequest, ledger, settlement, split,
    validate,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TripParts")]
pub struct Trip {
    pub id: Uuid,
    pub name: String,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    members: Vec<Member>,
    /// Newest first.
    expenses: Vec<Expense>,
}

/// Wire form of a `Trip`, checked by [`Trip::from_parts`] on the way in.
#[derive(Deserialize)]
struct TripParts {
    id: Uuid,
    name: String,
    currency: Currency,
    created_at: DateTime<Utc>,
    members: Vec<Member>,
    expenses: Vec<Expense>,
}

impl TryFrom<TripParts> for Trip {
    type Error = EngineError;

    fn try_from(parts: TripParts) -> ResultEngine<Self> {
        Trip::from_parts(
            parts.id,
            &parts.name,
            parts.currency,
            parts.created_at,
            parts.members,
            parts.expenses,
        )
    }
}

impl Trip {
    /// Return a builder for `Trip`. Help to build the struct.
    pub fn builder() -> TripBuilder {
        TripBuilder::default()
    }

    /// Rebuilds a trip from previously stored parts.
    ///
    /// The roster must not contain duplicate ids. Expenses are taken as they
    /// are: records that reference unknown members or do not add up are left
    /// for the ledger to skip.
    pub fn from_parts(
        id: Uuid,
        name: &str,
        currency: Currency,
        created_at: DateTime<Utc>,
        members: Vec<Member>,
        expenses: Vec<Expense>,
    ) -> ResultEngine<Self> {
        let name = validate::normalize_name(name, "trip")?;
        for (position, member) in members.iter().enumerate() {
            if members[..position].iter().any(|m| m.id == member.id) {
                return Err(EngineError::ExistingKey(member.id.to_string()));
            }
        }
        Ok(Self {
            id,
            name,
            currency,
            created_at,
            members,
            expenses,
        })
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn member(&self, member_id: &MemberId) -> ResultEngine<&Member> {
        self.members
            .iter()
            .find(|m| m.id == *member_id)
            .ok_or_else(|| EngineError::KeyNotFound(member_id.to_string()))
    }

    pub fn expense(&self, expense_id: Uuid) -> ResultEngine<&Expense> {
        self.expenses
            .iter()
            .find(|e| e.id == expense_id)
            .ok_or_else(|| EngineError::KeyNotFound(expense_id.to_string()))
    }

    /// Adds a member with the palette color and avatar for its position.
    pub fn add_member(&mut self, name: &str) -> ResultEngine<MemberId> {
        let name = validate::normalize_name(name, "member")?;
        let member = Member::with_defaults(&name, self.members.len());
        Ok(self.push_member(member))
    }

    /// Adds a member with caller-chosen color and avatar.
    pub fn add_member_with(
        &mut self,
        name: &str,
        color: &str,
        avatar: &str,
    ) -> ResultEngine<MemberId> {
        let name = validate::normalize_name(name, "member")?;
        Ok(self.push_member(Member::new(MemberId::generate(), &name, color, avatar)))
    }

    /// Adds a fully specified member, refusing an id already on the roster.
    pub fn insert_member(&mut self, member: Member) -> ResultEngine<MemberId> {
        validate::normalize_name(&member.name, "member")?;
        if self.members.iter().any(|m| m.id == member.id) {
            return Err(EngineError::ExistingKey(member.id.to_string()));
        }
        Ok(self.push_member(member))
    }

    fn push_member(&mut self, member: Member) -> MemberId {
        let id = member.id.clone();
        debug!(member_id = %id, "adding member");
        self.members.push(member);
        id
    }

    /// Renames and recolors a member. Avatar and id never change.
    pub fn update_member(
        &mut self,
        member_id: &MemberId,
        name: &str,
        color: &str,
    ) -> ResultEngine<()> {
        let name = validate::normalize_name(name, "member")?;
        let member = self
            .members
            .iter_mut()
            .find(|m| m.id == *member_id)
            .ok_or_else(|| EngineError::KeyNotFound(member_id.to_string()))?;
        member.name = name;
        member.color = color.to_string();
        Ok(())
    }

    /// Removes a member who neither paid for nor shares in any expense.
    pub fn remove_member(&mut self, member_id: &MemberId) -> ResultEngine<Member> {
        let position = self
            .members
            .iter()
            .position(|m| m.id == *member_id)
            .ok_or_else(|| EngineError::KeyNotFound(member_id.to_string()))?;
        if self.expenses.iter().any(|e| e.involves(member_id)) {
            return Err(EngineError::MemberHasExpenses(member_id.to_string()));
        }
        info!(member_id = %member_id, "removing member");
        Ok(self.members.remove(position))
    }

    /// Validates a draft and records it as the newest expense.
    pub fn add_expense(&mut self, draft: ExpenseDraft, date: DateTime<Utc>) -> ResultEngine<Uuid> {
        let expense = self.build_expense(draft, date)?;
        let id = expense.id;
        debug!(expense_id = %id, amount = %expense.amount, "adding expense");
        self.expenses.insert(0, expense);
        Ok(id)
    }

    /// Fully replaces an expense, keeping its id, date and position.
    pub fn replace_expense(&mut self, expense_id: Uuid, draft: ExpenseDraft) -> ResultEngine<()> {
        let position = self
            .expenses
            .iter()
            .position(|e| e.id == expense_id)
            .ok_or_else(|| EngineError::KeyNotFound(expense_id.to_string()))?;
        let mut expense = self.build_expense(draft, self.expenses[position].date)?;
        expense.id = expense_id;
        debug!(expense_id = %expense_id, "replacing expense");
        self.expenses[position] = expense;
        Ok(())
    }

    pub fn delete_expense(&mut self, expense_id: Uuid) -> ResultEngine<Expense> {
        let position = self
            .expenses
            .iter()
            .position(|e| e.id == expense_id)
            .ok_or_else(|| EngineError::KeyNotFound(expense_id.to_string()))?;
        debug!(expense_id = %expense_id, "deleting expense");
        Ok(self.expenses.remove(position))
    }

    pub fn balances(&self) -> Vec<Balance> {
        ledger::compute_balances(&self.members, &self.expenses)
    }

    pub fn settlements(&self) -> Vec<Settlement> {
        settlement::plan_settlements(&self.balances())
    }

    pub fn summaries(&self) -> Vec<MemberSummary> {
        ledger::member_summaries(&self.members, &self.expenses)
    }

    pub fn total_spent(&self) -> MoneyCents {
        ledger::total_spent(&self.expenses)
    }

    /// Clears the roster and the history. Name, currency and id are kept.
    pub fn reset(&mut self) {
        info!(
            trip_id = %self.id,
            members = self.members.len(),
            expenses = self.expenses.len(),
            "resetting trip"
        );
        self.members.clear();
        self.expenses.clear();
    }

    /// Runs the add-expense checks in order: title, amount, payer, selection,
    /// then the split itself.
    fn build_expense(&self, draft: ExpenseDraft, date: DateTime<Utc>) -> ResultEngine<Expense> {
        let kind = draft.split.kind();
        let title = validate::normalize_title(&draft.title)?;
        let amount = validate::positive_amount(draft.amount.cents()).ok_or_else(|| {
            EngineError::InvalidAmount("please enter a valid amount".to_string())
        })?;
        self.member(&draft.paid_by)?;

        let splits = match draft.split {
            SplitRequest::Equal { members } => {
                if members.is_empty() {
                    return Err(EngineError::EmptySelection);
                }
                self.ensure_known(members.iter())?;
                let selection = validate::sanitize_selection(&members, &self.members);
                let splits = split::distribute_equally(amount, &selection);
                if splits.is_empty() {
                    return Err(EngineError::EmptySelection);
                }
                splits
            }
            SplitRequest::Exact { splits } => {
                self.ensure_known(splits.iter().map(|s| &s.member_id))?;
                ensure_distinct(&splits)?;
                splits
            }
        };

        Expense::new(&title, amount, draft.paid_by, date, kind, splits)
    }

    fn ensure_known<'a>(&self, ids: impl Iterator<Item = &'a MemberId>) -> ResultEngine<()> {
        for id in ids {
            self.member(id)?;
        }
        Ok(())
    }
}

fn ensure_distinct(splits: &[SplitDetail]) -> ResultEngine<()> {
    for (position, split) in splits.iter().enumerate() {
        if splits[..position].iter().any(|s| s.member_id == split.member_id) {
            return Err(EngineError::ExistingKey(split.member_id.to_string()));
        }
    }
    Ok(())
}

/// The builder for `Trip`
#[derive(Default)]
pub struct TripBuilder {
    name: String,
    currency: Currency,
    created_at: Option<DateTime<Utc>>,
}

impl TripBuilder {
    pub fn name(mut self, name: &str) -> TripBuilder {
        self.name = name.to_string();
        self
    }

    pub fn currency(mut self, currency: Currency) -> TripBuilder {
        self.currency = currency;
        self
    }

    /// Defaults to now.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> TripBuilder {
        self.created_at = Some(created_at);
        self
    }

    /// Construct `Trip`
    pub fn build(self) -> ResultEngine<Trip> {
        Trip::from_parts(
            Uuid::new_v4(),
            &self.name,
            self.currency,
            self.created_at.unwrap_or_else(Utc::now),
            Vec::new(),
            Vec::new(),
        )
    }
}
