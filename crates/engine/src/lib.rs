//! Ledger and settle-up engine for shared group expenses.
//!
//! All amounts are integer minor units ([`MoneyCents`]). The core functions
//! are pure and take the full member and expense lists as arguments:
//!
//! - [`split::distribute_equally`] turns one amount into exact equal shares;
//! - [`ledger::compute_balances`] nets every expense into one balance per
//!   member;
//! - [`settlement::plan_settlements`] turns balances into transfers.
//!
//! [`Trip`] keeps a roster and an expense history consistent and calls the
//! functions above on every read.
//!
//! ```rust
//! use chrono::Utc;
//! use engine::{Currency, ExpenseDraft, MoneyCents, Trip};
//!
//! let mut trip = Trip::builder().name("Goa").currency(Currency::Inr).build()?;
//! let asha = trip.add_member("Asha")?;
//! let ben = trip.add_member("Ben")?;
//! trip.add_expense(
//!     ExpenseDraft::equal("Dinner", MoneyCents::new(1000), asha.clone(), vec![asha, ben]),
//!     Utc::now(),
//! )?;
//! let plan = trip.settlements();
//! assert_eq!(plan.len(), 1);
//! assert_eq!(plan[0].amount, MoneyCents::new(500));
//! # Ok::<(), engine::EngineError>(())
//! ```

pub use currency::Currency;
pub use error::EngineError;
pub use expenses::{
    Expense, ExpenseDraft, RESERVED_PERCENT_TAG, SplitDetail, SplitKind, SplitRequest,
};
pub use ledger::{Balance, MemberSummary};
pub use members::{Member, MemberId};
pub use money::MoneyCents;
pub use settlement::Settlement;
pub use split::SplitAdjustment;
pub use trip::{Trip, TripBuilder};

mod currency;
mod error;
mod expenses;
pub mod ledger;
pub mod members;
mod money;
pub mod settlement;
pub mod split;
mod trip;
pub mod validate;

pub type ResultEngine<T> = Result<T, EngineError>;
