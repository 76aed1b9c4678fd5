use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO currency a trip is kept in.
///
/// A trip has exactly one currency and every amount in it shares that
/// currency; the engine never converts between currencies.
///
/// ## Minor units
///
/// Amounts are stored as an `i64` number of **minor units** (see
/// [`MoneyCents`](crate::MoneyCents)). `minor_units()` returns how many decimal
/// digits separate major from minor units:
/// - major units (human input/output, e.g. `10.50 INR`)
/// - minor units (stored integers, e.g. `1050`)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
    Eur,
    Usd,
    Gbp,
    Jpy,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
        }
    }

    /// Narrow symbol shown next to amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Eur => "€",
            Currency::Usd => "$",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
        }
    }

    /// Number of fraction digits used when converting major units.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Jpy => 0,
            _ => 2,
        }
    }

    /// Minor units per major unit (`100` for two fraction digits).
    #[must_use]
    pub const fn scale(self) -> i64 {
        10i64.pow(self.minor_units() as u32)
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "INR" | "₹" => Ok(Currency::Inr),
            "EUR" | "€" => Ok(Currency::Eur),
            "USD" | "$" => Ok(Currency::Usd),
            "GBP" | "£" => Ok(Currency::Gbp),
            "JPY" | "¥" => Ok(Currency::Jpy),
            other => Err(EngineError::UnsupportedCurrency(other.to_string())),
        }
    }
}
