//! Loading a trip from a JSON snapshot written by the surrounding app.
use std::path::Path;

use chrono::{DateTime, Utc};
use engine::{Currency, Expense, Member, Trip};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::error::Result;

#[derive(Debug, Deserialize)]
pub struct TripSnapshot {
    pub id: Option<Uuid>,
    pub name: String,
    pub currency: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub members: Vec<Member>,
    /// Kept raw so one bad record does not sink the whole snapshot.
    #[serde(default)]
    pub expenses: Vec<Value>,
}

impl TripSnapshot {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn read(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Builds the trip, using `fallback` when the snapshot names no currency.
    pub fn into_trip(self, fallback: Currency) -> Result<Trip> {
        let currency = match self.currency.as_deref() {
            Some(code) => Currency::try_from(code)?,
            None => fallback,
        };
        Ok(Trip::from_parts(
            self.id.unwrap_or_else(Uuid::new_v4),
            &self.name,
            currency,
            self.created_at.unwrap_or_else(Utc::now),
            self.members,
            parse_expenses(self.expenses),
        )?)
    }
}

/// Decodes each expense record on its own, dropping the ones that fail.
fn parse_expenses(raw: Vec<Value>) -> Vec<Expense> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(position, record)| match serde_json::from_value(record) {
            Ok(expense) => Some(expense),
            Err(err) => {
                warn!(position, error = %err, "dropping unreadable expense record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use engine::MoneyCents;

    use super::*;
    use crate::error::AppError;

    const GOA: &str = r##"{
        "name": "Goa",
        "members": [
            {"id": "a", "name": "Asha", "color": "#FF5252", "avatar": "👽"},
            {"id": "b", "name": "Ben", "color": "#FF4081", "avatar": "👾"},
            {"id": "c", "name": "Chen", "color": "#E040FB", "avatar": "🤖"}
        ],
        "expenses": [
            {
                "id": "5b1f7f4e-8a55-4c41-9d7e-0f5b7f0c2a11",
                "title": "Dinner",
                "amount": 100,
                "paid_by": "a",
                "date": "2026-03-01T19:30:00Z",
                "split_kind": "EQUAL",
                "splits": [
                    {"member_id": "a", "amount": 34},
                    {"member_id": "b", "amount": 33},
                    {"member_id": "c", "amount": 33}
                ]
            }
        ]
    }"##;

    #[test]
    fn loads_snapshot_with_fallback_currency() {
        let trip = TripSnapshot::from_json(GOA)
            .unwrap()
            .into_trip(Currency::Eur)
            .unwrap();
        assert_eq!(trip.currency, Currency::Eur);
        let balances: Vec<i64> = trip.balances().iter().map(|b| b.amount.cents()).collect();
        assert_eq!(balances, [66, -33, -33]);
        assert_eq!(trip.settlements()[0].amount, MoneyCents::new(33));
    }

    #[test]
    fn percent_split_record_is_dropped() {
        let raw = GOA.replace("\"EQUAL\"", "\"PERCENT\"");
        let trip = TripSnapshot::from_json(&raw)
            .unwrap()
            .into_trip(Currency::Inr)
            .unwrap();
        assert!(trip.expenses().is_empty());
        assert!(trip.settlements().is_empty());
    }

    const MIXED: &str = r##"{
        "name": "Goa",
        "members": [
            {"id": "a", "name": "Asha", "color": "#FF5252", "avatar": "👽"},
            {"id": "b", "name": "Ben", "color": "#FF4081", "avatar": "👾"}
        ],
        "expenses": [
            {
                "id": "0c7e2a43-4d5b-4b8e-9a8f-2f6d1c3b9e55",
                "title": "Ferry",
                "amount": 10.5,
                "paid_by": "b",
                "date": "2026-03-02T09:00:00Z",
                "split_kind": "EQUAL",
                "splits": [{"member_id": "b", "amount": 10.5}]
            },
            {"title": "Missing fields"},
            {
                "id": "5b1f7f4e-8a55-4c41-9d7e-0f5b7f0c2a11",
                "title": "Taxi",
                "amount": 1000,
                "paid_by": "a",
                "date": "2026-03-01T19:30:00Z",
                "split_kind": "EQUAL",
                "splits": [
                    {"member_id": "a", "amount": 500},
                    {"member_id": "b", "amount": 500}
                ]
            }
        ]
    }"##;

    #[test]
    fn unreadable_expense_does_not_block_the_rest() {
        let snapshot = TripSnapshot::from_json(MIXED).unwrap();
        assert_eq!(snapshot.expenses.len(), 3);

        let trip = snapshot.into_trip(Currency::Inr).unwrap();
        assert_eq!(trip.expenses().len(), 1);
        assert_eq!(trip.expenses()[0].title, "Taxi");
        let balances: Vec<i64> = trip.balances().iter().map(|b| b.amount.cents()).collect();
        assert_eq!(balances, [500, -500]);
    }

    #[test]
    fn malformed_document_is_still_an_error() {
        assert!(matches!(
            TripSnapshot::from_json("{\"members\": []}"),
            Err(AppError::Json(_))
        ));
    }

    #[test]
    fn unknown_currency_is_rejected() {
        let raw = GOA.replace("\"name\": \"Goa\",", "\"name\": \"Goa\", \"currency\": \"XYZ\",");
        let err = TripSnapshot::from_json(&raw)
            .unwrap()
            .into_trip(Currency::Inr)
            .unwrap_err();
        assert!(matches!(err, AppError::Engine(_)));
    }
}
