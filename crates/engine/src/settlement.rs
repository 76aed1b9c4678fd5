//! Settle-up planning.
//!
//! [`plan_settlements`] turns net balances into directed transfers using a
//! greedy two-pointer pass: the largest debtor pays the largest creditor as
//! much as both can absorb, then whichever side reached zero moves on.
//!
//! The pass emits at most `debtors + creditors - 1` transfers and moves
//! exactly the total outstanding debt. It is a heuristic: it does not search
//! for the smallest possible number of transfers, which is a much harder
//! combinatorial problem.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Balance, MemberId, MoneyCents};

/// One directed payment that reduces a debtor's and a creditor's balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: MoneyCents,
}

/// Private running total for one side of the pass.
struct Outstanding<'a> {
    member_id: &'a MemberId,
    remaining: MoneyCents,
}

/// Plans the transfers that zero out `balances`.
///
/// Balances of zero are already settled and ignored. Ties between equal
/// balances keep their input order. The caller's records are only read; the
/// pass keeps its own running totals.
///
/// Empty or fully settled input yields an empty plan.
pub fn plan_settlements(balances: &[Balance]) -> Vec<Settlement> {
    let mut debtors: Vec<&Balance> = balances.iter().filter(|b| b.amount.is_negative()).collect();
    debtors.sort_by_key(|b| b.amount);
    let mut creditors: Vec<&Balance> = balances.iter().filter(|b| b.amount.is_positive()).collect();
    creditors.sort_by_key(|b| Reverse(b.amount));

    let mut debtors: Vec<Outstanding<'_>> = debtors
        .into_iter()
        .map(|b| Outstanding {
            member_id: &b.member_id,
            remaining: b.amount.abs(),
        })
        .collect();
    let mut creditors: Vec<Outstanding<'_>> = creditors
        .into_iter()
        .map(|b| Outstanding {
            member_id: &b.member_id,
            remaining: b.amount,
        })
        .collect();

    let mut settlements = Vec::with_capacity((debtors.len() + creditors.len()).saturating_sub(1));
    let (mut d, mut c) = (0, 0);
    while d < debtors.len() && c < creditors.len() {
        let debtor = &mut debtors[d];
        let creditor = &mut creditors[c];
        let transfer = debtor.remaining.min(creditor.remaining);

        if debtor.member_id == creditor.member_id {
            debug!(
                member_id = %debtor.member_id,
                amount = %transfer,
                "skipping transfer to self"
            );
        } else if transfer.is_positive() {
            settlements.push(Settlement {
                from: debtor.member_id.clone(),
                to: creditor.member_id.clone(),
                amount: transfer,
            });
        }
        debtor.remaining -= transfer;
        creditor.remaining -= transfer;

        if !debtor.remaining.is_positive() {
            d += 1;
        }
        if !creditor.remaining.is_positive() {
            c += 1;
        }
    }

    debug!(
        transfers = settlements.len(),
        debtors = debtors.len(),
        creditors = creditors.len(),
        "planned settlements"
    );
    settlements
}
