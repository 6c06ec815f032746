//! View models for the marketplace front end
//!
//! Each view owns a [`ViewState`] that moves from `Loading` to `Ready` or
//! `Failed` once its data has been fetched through
//! [`MarketplaceClient`](crate::client::MarketplaceClient). Created entities
//! are prepended to the local state; nothing is cached between views.

pub mod forms;
pub mod shop_detail;
pub mod shop_list;
pub mod state;

pub use forms::{FormError, OfferForm, ShopForm};
pub use shop_detail::{ShopDetailData, ShopDetailView};
pub use shop_list::ShopListView;
pub use state::ViewState;

/// Dates as shown to users, e.g. `Mar 5, 2025`
pub fn format_date(instant: &chrono::DateTime<chrono::Utc>) -> String {
    instant.format("%b %-d, %Y").to_string()
}
