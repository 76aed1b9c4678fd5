use std::fmt::Write;

use engine::{MemberId, Trip};

fn display_name<'a>(trip: &'a Trip, member_id: &'a MemberId) -> &'a str {
    trip.member(member_id)
        .map(|m| m.name.as_str())
        .unwrap_or_else(|_| member_id.as_str())
}

/// Renders the per-member table followed by the settle-up plan.
pub fn render(trip: &Trip) -> String {
    let currency = trip.currency;
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", trip.name, currency.code());
    let _ = writeln!(
        out,
        "Total spent: {}",
        trip.total_spent().display_in(currency)
    );
    let _ = writeln!(
        out,
        "{:<16} {:>12} {:>12} {:>12}",
        "member", "paid", "share", "net"
    );
    for summary in trip.summaries() {
        let _ = writeln!(
            out,
            "{:<16} {:>12} {:>12} {:>12}",
            display_name(trip, &summary.member_id),
            summary.paid.display_in(currency),
            summary.share.display_in(currency),
            summary.net.display_in(currency),
        );
    }

    let plan = trip.settlements();
    out.push('\n');
    if plan.is_empty() {
        out.push_str("All settled up!\n");
        return out;
    }
    for settlement in plan {
        let _ = writeln!(
            out,
            "{} pays {} {}",
            display_name(trip, &settlement.from),
            display_name(trip, &settlement.to),
            settlement.amount.display_in(currency),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use engine::{Currency, ExpenseDraft, MoneyCents};

    use super::*;

    #[test]
    fn lists_transfers_by_name() {
        let mut trip = Trip::builder()
            .name("Goa")
            .currency(Currency::Inr)
            .build()
            .unwrap();
        let asha = trip.add_member("Asha").unwrap();
        let ben = trip.add_member("Ben").unwrap();
        trip.add_expense(
            ExpenseDraft::equal("Taxi", MoneyCents::new(1250), asha.clone(), vec![asha, ben]),
            Utc::now(),
        )
        .unwrap();

        let report = render(&trip);
        assert!(report.starts_with("Goa (INR)\nTotal spent: ₹12.50\n"));
        assert!(report.contains("Ben pays Asha ₹6.25"));
    }

    #[test]
    fn empty_trip_is_settled() {
        let trip = Trip::builder().name("Quiet").build().unwrap();
        let report = render(&trip);
        assert!(report.contains("Total spent: ₹0.00\n"));
        assert!(report.ends_with("All settled up!\n"));
    }
}
