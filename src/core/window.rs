//! Offer active-window predicate
//!
//! An offer is *current* when its `is_active` flag is set and the evaluation
//! instant falls inside `[start_date, end_date]` (both bounds inclusive).
//! Every place that needs the answer calls [`is_current_offer`]: the model,
//! the in-memory store query, the MongoDB query builder tests and the client
//! views.

use crate::entities::offer::Offer;
use chrono::{DateTime, NaiveDate, Utc};

/// Whether `offer` is current at `now`.
pub fn is_current_offer(offer: &Offer, now: DateTime<Utc>) -> bool {
    window_contains(offer.is_active, offer.start_date, offer.end_date, now)
}

/// The predicate on raw fields, shared by stores that filter documents
/// before they are decoded into [`Offer`] values.
pub fn window_contains(
    is_active: bool,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> bool {
    is_active && start_date <= now && end_date >= now
}

/// Parse a client-supplied instant.
///
/// Accepts RFC 3339 timestamps (any offset) and bare `YYYY-MM-DD` dates,
/// which are read as midnight UTC.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
