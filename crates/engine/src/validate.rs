//! Input guards run before any ledger arithmetic.
//!
//! The guards never panic: a value that cannot be used comes back as `None`
//! (or is filtered out) so callers can reject the operation.

use std::collections::HashSet;

use tracing::warn;

use crate::{Currency, EngineError, Member, MemberId, MoneyCents, ResultEngine};

/// Converts a decimal amount entered by a user into minor units,
/// `round(value * scale)`.
///
/// Returns `None` for NaN, infinities and values outside the `i64` range.
pub fn minor_units_from_major(value: f64, currency: Currency) -> Option<MoneyCents> {
    if !value.is_finite() {
        return None;
    }
    let scaled = (value * currency.scale() as f64).round();
    // `i64::MAX as f64` rounds up to 2^63, which itself does not fit.
    if !scaled.is_finite() || scaled >= i64::MAX as f64 || scaled < i64::MIN as f64 {
        return None;
    }
    Some(MoneyCents::new(scaled as i64))
}

/// Accepts only strictly positive amounts.
pub fn positive_amount(raw: i64) -> Option<MoneyCents> {
    (raw > 0).then_some(MoneyCents::new(raw))
}

/// Sums amounts, returning `None` on overflow.
pub fn checked_sum<I>(amounts: I) -> Option<MoneyCents>
where
    I: IntoIterator<Item = MoneyCents>,
{
    amounts
        .into_iter()
        .try_fold(MoneyCents::ZERO, MoneyCents::checked_add)
}

/// Keeps the caller's selection order while dropping unknown ids and repeats.
pub fn sanitize_selection(selection: &[MemberId], members: &[Member]) -> Vec<MemberId> {
    let known: HashSet<&str> = members.iter().map(|m| m.id.as_str()).collect();
    let mut seen = HashSet::new();
    let mut sanitized = Vec::with_capacity(selection.len());
    for id in selection {
        if !known.contains(id.as_str()) {
            warn!(member_id = %id, "dropping unknown member from selection");
            continue;
        }
        if seen.insert(id.as_str()) {
            sanitized.push(id.clone());
        }
    }
    sanitized
}

/// Trims a title and refuses blank ones.
pub(crate) fn normalize_title(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidTitle("please enter a description".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Trims a trip or member name and refuses blank ones.
pub(crate) fn normalize_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}
