use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

use crate::Currency;

/// Signed money amount represented as integer **minor units** (cents, paise).
///
/// Every amount that crosses into the engine is a `MoneyCents`: expense
/// totals, split shares, balances and settlement transfers. There is no
/// floating-point representation anywhere in the ledger.
///
/// The value is signed:
/// - positive = owed to the member / credited
/// - negative = owed by the member / debited
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Absolute value, saturating at `i64::MAX`.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_sub(rhs.0).map(MoneyCents)
    }

    /// Formats the amount with the currency symbol in front, e.g. `₹12.50`
    /// or `-€3.07`.
    #[must_use]
    pub fn display_in(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let (major, minor) = self.split_units(currency);
        match currency.minor_units() {
            0 => format!("{sign}{}{major}", currency.symbol()),
            digits => format!(
                "{sign}{}{major}.{minor:0width$}",
                currency.symbol(),
                width = usize::from(digits)
            ),
        }
    }

    fn split_units(self, currency: Currency) -> (u64, u64) {
        let abs = self.0.unsigned_abs();
        let scale = 10u64.pow(u32::from(currency.minor_units()));
        (abs / scale, abs % scale)
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for MoneyCents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

impl Add for MoneyCents {
    type Output = MoneyCents;

    fn add(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 + rhs.0)
    }
}

impl AddAssign for MoneyCents {
    fn add_assign(&mut self, rhs: MoneyCents) {
        self.0 += rhs.0;
    }
}

impl Sub for MoneyCents {
    type Output = MoneyCents;

    fn sub(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 - rhs.0)
    }
}

impl SubAssign for MoneyCents {
    fn sub_assign(&mut self, rhs: MoneyCents) {
        self.0 -= rhs.0;
    }
}

impl Neg for MoneyCents {
    type Output = MoneyCents;

    fn neg(self) -> Self::Output {
        MoneyCents(-self.0)
    }
}

impl Sum for MoneyCents {
    fn sum<I: Iterator<Item = MoneyCents>>(iter: I) -> Self {
        iter.fold(MoneyCents::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_two_decimals() {
        assert_eq!(MoneyCents::new(0).to_string(), "0.00");
        assert_eq!(MoneyCents::new(1).to_string(), "0.01");
        assert_eq!(MoneyCents::new(10).to_string(), "0.10");
        assert_eq!(MoneyCents::new(1050).to_string(), "10.50");
        assert_eq!(MoneyCents::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn display_in_uses_currency_symbol() {
        assert_eq!(MoneyCents::new(1250).display_in(Currency::Inr), "₹12.50");
        assert_eq!(MoneyCents::new(-307).display_in(Currency::Eur), "-€3.07");
        assert_eq!(MoneyCents::new(500).display_in(Currency::Jpy), "¥500");
    }

    #[test]
    fn checked_ops_detect_overflow() {
        assert_eq!(MoneyCents::new(i64::MAX).checked_add(MoneyCents::new(1)), None);
        assert_eq!(MoneyCents::new(i64::MIN).checked_sub(MoneyCents::new(1)), None);
        assert_eq!(
            MoneyCents::new(5).checked_sub(MoneyCents::new(7)),
            Some(MoneyCents::new(-2))
        );
    }

    #[test]
    fn abs_saturates_at_min() {
        assert_eq!(MoneyCents::new(-33).abs(), MoneyCents::new(33));
        assert_eq!(MoneyCents::new(i64::MIN).abs(), MoneyCents::new(i64::MAX));
    }

    #[test]
    fn sums_iterators() {
        let total: MoneyCents = [34, 33, 33].into_iter().map(MoneyCents::new).sum();
        assert_eq!(total, MoneyCents::new(100));
    }
}
