//! Net balances derived from the expense history.
//!
//! Balances are never stored: every read replays the full history. Each
//! expense credits its payer with the full amount and debits every split
//! member with their share, so a consistent history always nets to zero.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Expense, Member, MemberId, MoneyCents, validate};

/// Net position of one member. Positive: is owed. Negative: owes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub member_id: MemberId,
    pub amount: MoneyCents,
}

/// What a member paid, consumed and nets to across the whole trip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub member_id: MemberId,
    pub paid: MoneyCents,
    pub share: MoneyCents,
    pub net: MoneyCents,
}

/// Recomputes one balance per known member from the whole expense list.
///
/// - Starts every member in `members` at zero.
/// - Credits each expense's payer and debits each split member. A payer or
///   split member that is not in `members` is skipped and logged; nothing is
///   invented for it.
/// - Malformed expenses (non-positive amount, negative share, shares not
///   adding up, arithmetic overflow) are dropped whole and logged.
///
/// The result follows roster order. It never fails: in the worst case every
/// balance is zero.
pub fn compute_balances(members: &[Member], expenses: &[Expense]) -> Vec<Balance> {
    let mut order: Vec<&MemberId> = Vec::with_capacity(members.len());
    let mut balances: HashMap<&str, MoneyCents> = HashMap::with_capacity(members.len());
    for member in members {
        if balances.insert(member.id.as_str(), MoneyCents::ZERO).is_none() {
            order.push(&member.id);
        }
    }

    let mut applied = 0usize;
    for expense in expenses {
        if !is_well_formed(expense) {
            warn!(expense_id = %expense.id, "dropping malformed expense");
            continue;
        }

        let mut changes: Vec<(&str, MoneyCents)> = Vec::with_capacity(expense.splits.len() + 1);
        if balances.contains_key(expense.paid_by.as_str()) {
            changes.push((expense.paid_by.as_str(), expense.amount));
        } else {
            warn!(
                expense_id = %expense.id,
                member_id = %expense.paid_by,
                "dropping credit for unknown payer"
            );
        }
        for split in &expense.splits {
            if balances.contains_key(split.member_id.as_str()) {
                changes.push((split.member_id.as_str(), -split.amount));
            } else {
                warn!(
                    expense_id = %expense.id,
                    member_id = %split.member_id,
                    "dropping debit for unknown split member"
                );
            }
        }

        if apply_changes(&mut balances, &changes) {
            applied += 1;
        } else {
            warn!(expense_id = %expense.id, "dropping expense that overflows a balance");
        }
    }
    debug!(
        members = order.len(),
        expenses = expenses.len(),
        applied,
        "recomputed balances"
    );

    order
        .into_iter()
        .map(|member_id| Balance {
            member_id: member_id.clone(),
            amount: balances
                .get(member_id.as_str())
                .copied()
                .unwrap_or_default(),
        })
        .collect()
}

/// Total the member paid for, across every expense.
pub fn total_paid(member_id: &MemberId, expenses: &[Expense]) -> MoneyCents {
    let paid = expenses
        .iter()
        .filter(|e| e.paid_by == *member_id && is_well_formed(e))
        .map(|e| e.amount);
    validate::checked_sum(paid).unwrap_or_else(|| {
        warn!(member_id = %member_id, "paid total overflows");
        MoneyCents::ZERO
    })
}

/// Total the member consumed, across every expense.
pub fn total_share(member_id: &MemberId, expenses: &[Expense]) -> MoneyCents {
    let shares = expenses
        .iter()
        .filter(|e| is_well_formed(e))
        .map(|e| e.share_of(member_id));
    validate::checked_sum(shares).unwrap_or_else(|| {
        warn!(member_id = %member_id, "share total overflows");
        MoneyCents::ZERO
    })
}

/// Trip-wide spend: the sum of every well-formed expense amount.
pub fn total_spent(expenses: &[Expense]) -> MoneyCents {
    let amounts = expenses.iter().filter(|e| is_well_formed(e)).map(|e| e.amount);
    validate::checked_sum(amounts).unwrap_or_else(|| {
        warn!(expenses = expenses.len(), "trip total overflows");
        MoneyCents::ZERO
    })
}

/// Paid, consumed and net totals for every member, in roster order.
pub fn member_summaries(members: &[Member], expenses: &[Expense]) -> Vec<MemberSummary> {
    compute_balances(members, expenses)
        .into_iter()
        .map(|balance| MemberSummary {
            paid: total_paid(&balance.member_id, expenses),
            share: total_share(&balance.member_id, expenses),
            net: balance.amount,
            member_id: balance.member_id,
        })
        .collect()
}

fn is_well_formed(expense: &Expense) -> bool {
    expense.amount.is_positive()
        && expense.splits.iter().all(|s| !s.amount.is_negative())
        && validate::checked_sum(expense.splits.iter().map(|s| s.amount)) == Some(expense.amount)
}

/// Applies all changes or none of them.
fn apply_changes<'a>(
    balances: &mut HashMap<&'a str, MoneyCents>,
    changes: &[(&'a str, MoneyCents)],
) -> bool {
    let mut staged: HashMap<&'a str, MoneyCents> = HashMap::with_capacity(changes.len());
    for &(member_id, delta) in changes {
        let current = staged
            .get(member_id)
            .or_else(|| balances.get(member_id))
            .copied()
            .unwrap_or_default();
        let Some(next) = current.checked_add(delta) else {
            return false;
        };
        staged.insert(member_id, next);
    }
    balances.extend(staged);
    true
}
