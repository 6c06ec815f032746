//! Entity trait defining the core abstraction for stored documents

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

/// Base trait for every document the marketplace persists.
///
/// All entities have:
/// - id: system-generated unique identifier
/// - created_at: creation timestamp
/// - updated_at: last modification timestamp
///
/// The resource names double as collection names for document stores.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs and collections (e.g., "shops")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "shop")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Refresh `updated_at` to the current instant
    fn touch(&mut self);
}

/// Current instant at the precision every backend can store (milliseconds).
///
/// Document stores keep dates as millisecond timestamps, so truncating here
/// makes a create-then-fetch round trip exact regardless of the backend.
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Truncate a caller-supplied instant to storage precision.
pub fn storage_precision(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(3)
}
