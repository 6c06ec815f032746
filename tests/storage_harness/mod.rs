//! Shared test harness for storage backend testing
//!
//! Provides fixtures for shops and offers plus two macro-generated contract
//! suites, `shop_service_tests!` and `offer_service_tests!`, that every
//! backend runs.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! shop_service_tests!(InMemoryShopService::new());
//! offer_service_tests!(InMemoryOfferService::new());
//! ```

#![allow(dead_code)]

#[macro_use]
mod offer_service_tests;
#[macro_use]
mod shop_service_tests;

use chrono::{DateTime, Duration, Utc};
use marketplace::core::entity::current_timestamp;
use marketplace::entities::{Contact, Coordinates, Location, NewOffer, NewShop, Offer, Shop};
use uuid::Uuid;

/// Gap between creates so creation timestamps differ at storage precision
pub const CREATE_GAP: std::time::Duration = std::time::Duration::from_millis(5);

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A valid shop with the given name
pub fn sample_shop(name: &str) -> Shop {
    Shop::create(NewShop {
        name: name.to_string(),
        address: "12 Market Street, Springfield".to_string(),
        contact: Contact {
            phone: "+1 555 0100".to_string(),
            email: format!("{}@shops.test", name.to_lowercase().replace(' ', "-")),
        },
        location: Some(Location {
            coordinates: Some(Coordinates(-73.9857, 40.7484)),
            map_link: None,
        }),
    })
    .expect("sample shop is valid")
}

/// An active offer of `shop_id` running from `start` to `end`
pub fn sample_offer(shop_id: Uuid, title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Offer {
    Offer::create(NewOffer {
        shop_id,
        title: title.to_string(),
        description: format!("{} for everyone", title),
        start_date: start,
        end_date: end,
    })
    .expect("sample offer is valid")
}

/// Current instant at storage precision
pub fn now() -> DateTime<Utc> {
    current_timestamp()
}

pub fn days(n: i64) -> Duration {
    Duration::days(n)
}

// ---------------------------------------------------------------------------
// Assertions helpers
// ---------------------------------------------------------------------------

/// Assert that a list contains exactly `n` items.
pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}

/// Assert that offers come back with exactly these titles, in order.
pub fn assert_titles(offers: &[Offer], expected: &[&str]) {
    let titles: Vec<&str> = offers.iter().map(|o| o.title.as_str()).collect();
    assert_eq!(titles, expected);
}
