//! The module contains the errors the engine can return.
//!
//! Only validation paths return errors: a draft that cannot become an
//! [`Expense`], a roster edit that would break referential integrity, or a
//! manual split that does not add up. The ledger and the settlement planner
//! never fail; they drop malformed records and log them instead.
//!
//! [`Expense`]: super::Expense
use thiserror::Error;

use crate::MoneyCents;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid title: {0}")]
    InvalidTitle(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Select at least one person to split with")]
    EmptySelection,
    #[error("Split does not add up: expected {expected}, got {actual}")]
    UnbalancedSplit {
        expected: MoneyCents,
        actual: MoneyCents,
    },
    #[error("Unsupported split kind: {0}")]
    UnsupportedSplitKind(String),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Cannot remove member \"{0}\" who has existing expenses")]
    MemberHasExpenses(String),
}
