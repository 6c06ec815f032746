//! MongoDB storage backend using the official MongoDB async driver.
//!
//! # Storage model
//!
//! One collection per entity type, named by `T::resource_name()`
//! (`shops`, `offers`). The entity `id` is stored as `_id` in its string
//! form. Offers reference their shop through a `shopId` string field.
//!
//! # Serialization strategy
//!
//! Entities are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents. Timestamp fields listed by
//! [`MongoDocument::date_fields`] are stored as native BSON dates so that
//! range queries (the active-offer window) and sorting run server-side.

use crate::core::entity::Entity;
use crate::core::error::{StorageError, StoreResult};
use crate::core::service::{DataService, OfferService};
use crate::entities::offer::Offer;
use crate::entities::shop::Shop;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database, IndexModel};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use uuid::Uuid;

/// How long a request waits for a reachable server before failing
pub const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Entity stored in its own MongoDB collection
pub trait MongoDocument: Entity + Serialize + DeserializeOwned {
    /// Top-level fields (camelCase) stored as BSON dates
    fn date_fields() -> &'static [&'static str];
}

impl MongoDocument for Shop {
    fn date_fields() -> &'static [&'static str] {
        &["createdAt", "updatedAt"]
    }
}

impl MongoDocument for Offer {
    fn date_fields() -> &'static [&'static str] {
        &["startDate", "endDate", "createdAt", "updatedAt"]
    }
}

/// Mongo-backed shop store
pub type MongoShopService = MongoDataService<Shop>;

/// Mongo-backed offer store
pub type MongoOfferService = MongoDataService<Offer>;

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

/// Build a client for `uri` and return a handle to `database`.
///
/// Fails only when the URI is unusable; reaching the server is checked
/// separately by [`ping`] because the driver reconnects on its own.
pub async fn connect(uri: &str, database: &str) -> StoreResult<Database> {
    let mut options = ClientOptions::parse(uri)
        .await
        .map_err(|e| StorageError::Unavailable {
            message: format!("invalid MongoDB URI: {}", e),
        })?;
    options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
    options.app_name = Some("marketplace-rs".to_string());

    let client = Client::with_options(options).map_err(map_mongo_error("connect"))?;
    Ok(client.database(database))
}

/// Round-trip a `ping` command
pub async fn ping(database: &Database) -> StoreResult<()> {
    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(map_mongo_error("ping"))?;
    Ok(())
}

/// Create the indexes both collections rely on.
///
/// - `offers.shopId`: per-shop listing and cascade deletes
/// - `offers.createdAt`: newest-first sorting
/// - `shops.location.coordinates`: `2dsphere`, for stored coordinates
///
/// Idempotent, safe to call on every startup.
pub async fn ensure_indexes(database: &Database) -> StoreResult<()> {
    database
        .collection::<Document>(Offer::resource_name())
        .create_indexes(vec![
            IndexModel::builder().keys(doc! { "shopId": 1 }).build(),
            IndexModel::builder().keys(doc! { "createdAt": -1 }).build(),
        ])
        .await
        .map_err(map_mongo_error("create offer indexes"))?;

    database
        .collection::<Document>(Shop::resource_name())
        .create_index(
            IndexModel::builder()
                .keys(doc! { "location.coordinates": "2dsphere" })
                .build(),
        )
        .await
        .map_err(map_mongo_error("create shop indexes"))?;

    Ok(())
}

fn map_mongo_error(operation: &'static str) -> impl Fn(mongodb::error::Error) -> StorageError {
    move |err| match *err.kind {
        mongodb::error::ErrorKind::ServerSelection { .. } => StorageError::Unavailable {
            message: format!("{}: {}", operation, err),
        },
        _ => StorageError::operation(operation, err),
    }
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document,
/// renaming `id` → `_id` and turning `date_fields` into BSON dates.
fn json_to_document(json: serde_json::Value, date_fields: &[&str]) -> StoreResult<Document> {
    let bson_val = mongodb::bson::to_bson(&json).map_err(|e| StorageError::Serialization {
        message: format!("failed to convert JSON to BSON: {}", e),
    })?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => {
            return Err(StorageError::Serialization {
                message: "expected BSON document, got non-object".to_string(),
            });
        }
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    for field in date_fields {
        if let Some(Bson::String(raw)) = doc.get(*field) {
            let instant = DateTime::parse_from_rfc3339(raw).map_err(|e| {
                StorageError::Serialization {
                    message: format!("field '{}' is not a timestamp: {}", field, e),
                }
            })?;
            doc.insert(*field, date_bson(instant.with_timezone(&Utc)));
        }
    }

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value,
/// renaming `_id` → `id` and BSON dates to RFC 3339 strings.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    let date_keys: Vec<String> = doc
        .iter()
        .filter(|(_, value)| matches!(value, Bson::DateTime(_)))
        .map(|(key, _)| key.clone())
        .collect();
    for key in date_keys {
        if let Some(Bson::DateTime(date)) = doc.get(&key) {
            let text = DateTime::<Utc>::from_timestamp_millis(date.timestamp_millis())
                .map(|d| d.to_rfc3339_opts(SecondsFormat::Millis, true))
                .unwrap_or_default();
            doc.insert(key, Bson::String(text));
        }
    }

    Bson::Document(doc).into_relaxed_extjson()
}

fn date_bson(instant: DateTime<Utc>) -> Bson {
    Bson::DateTime(mongodb::bson::DateTime::from_millis(instant.timestamp_millis()))
}

/// Convert a UUID to its BSON string representation for queries.
fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

/// Filter selecting the offers of `shop_id` that are current at `now`
pub fn active_offers_filter(shop_id: &Uuid, now: DateTime<Utc>) -> Document {
    doc! {
        "shopId": uuid_bson(shop_id),
        "isActive": true,
        "startDate": { "$lte": date_bson(now) },
        "endDate": { "$gte": date_bson(now) },
    }
}

// ---------------------------------------------------------------------------
// MongoDataService<T>
// ---------------------------------------------------------------------------

/// Generic data storage service backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// let db = marketplace::storage::mongo::connect("mongodb://localhost:27017", "shop_marketplace").await?;
/// let shops = MongoShopService::new(db.clone());
/// let offers = MongoOfferService::new(db);
/// ```
#[derive(Clone, Debug)]
pub struct MongoDataService<T> {
    database: Database,
    _marker: std::marker::PhantomData<T>,
}

impl<T> MongoDataService<T> {
    /// Create a new `MongoDataService` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T: MongoDocument> MongoDataService<T> {
    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(T::resource_name())
    }

    fn entity_to_document(entity: &T) -> StoreResult<Document> {
        let json = serde_json::to_value(entity)?;
        json_to_document(json, T::date_fields())
    }

    fn document_to_entity(doc: Document) -> StoreResult<T> {
        let json = document_to_json(doc);
        Ok(serde_json::from_value(json)?)
    }

    /// Run `filter`, newest first
    async fn find_sorted(&self, filter: Document) -> StoreResult<Vec<T>> {
        let cursor = self
            .collection()
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .await
            .map_err(map_mongo_error("find"))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(map_mongo_error("find"))?;

        docs.into_iter().map(Self::document_to_entity).collect()
    }
}

#[async_trait]
impl<T: MongoDocument> DataService<T> for MongoDataService<T> {
    async fn create(&self, entity: T) -> StoreResult<T> {
        let doc = Self::entity_to_document(&entity)?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(map_mongo_error("insert"))?;

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> StoreResult<Option<T>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(map_mongo_error("get"))?;

        doc.map(Self::document_to_entity).transpose()
    }

    async fn list(&self) -> StoreResult<Vec<T>> {
        self.find_sorted(doc! {}).await
    }

    async fn update(&self, id: &Uuid, entity: T) -> StoreResult<T> {
        let doc = Self::entity_to_document(&entity)?;

        let result = self
            .collection()
            .replace_one(doc! { "_id": uuid_bson(id) }, doc)
            .await
            .map_err(map_mongo_error("update"))?;

        if result.matched_count == 0 {
            return Err(StorageError::NotFound {
                entity_type: T::resource_name_singular().to_string(),
                id: *id,
            });
        }

        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> StoreResult<bool> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(map_mongo_error("delete"))?;

        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl OfferService for MongoDataService<Offer> {
    async fn find_by_shop(&self, shop_id: &Uuid) -> StoreResult<Vec<Offer>> {
        self.find_sorted(doc! { "shopId": uuid_bson(shop_id) }).await
    }

    async fn find_active_by_shop(
        &self,
        shop_id: &Uuid,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<Offer>> {
        self.find_sorted(active_offers_filter(shop_id, now)).await
    }

    async fn delete_by_shop(&self, shop_id: &Uuid) -> StoreResult<u64> {
        let result = self
            .collection()
            .delete_many(doc! { "shopId": uuid_bson(shop_id) })
            .await
            .map_err(map_mongo_error("delete by shop"))?;

        Ok(result.deleted_count)
    }

    async fn shop_ids(&self) -> StoreResult<Vec<Uuid>> {
        let values = self
            .collection()
            .distinct("shopId", doc! {})
            .await
            .map_err(map_mongo_error("distinct shop ids"))?;

        Ok(values
            .iter()
            .filter_map(|value| value.as_str())
            .filter_map(|raw| Uuid::parse_str(raw).ok())
            .collect())
    }
}
