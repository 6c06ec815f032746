//! Offer HTTP handlers

use super::model::{NewOffer, Offer, OfferPatch};
use crate::core::error::MarketResult;
use crate::core::extractors::EntityId;
use crate::core::gateway::Marketplace;
use crate::core::message::MessageResponse;
use crate::core::validation::Validated;
use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;

/// Offers of a shop. The path id is the shop id; an unknown shop has none.
pub async fn list_offers_by_shop(
    State(market): State<Marketplace>,
    shop_id: EntityId,
) -> MarketResult<Json<Vec<Offer>>> {
    Ok(Json(market.list_offers_by_shop(&shop_id).await?))
}

/// Offers of a shop that are current right now
pub async fn list_active_offers(
    State(market): State<Marketplace>,
    shop_id: EntityId,
) -> MarketResult<Json<Vec<Offer>>> {
    Ok(Json(
        market
            .list_active_offers_by_shop(&shop_id, Utc::now())
            .await?,
    ))
}

pub async fn create_offer(
    State(market): State<Marketplace>,
    payload: Validated<Offer>,
) -> MarketResult<(StatusCode, Json<Offer>)> {
    let data: NewOffer = payload.decode()?;
    let offer = market.create_offer(data).await?;
    Ok((StatusCode::CREATED, Json(offer)))
}

pub async fn update_offer(
    State(market): State<Marketplace>,
    id: EntityId,
    payload: Validated<Offer>,
) -> MarketResult<Json<Offer>> {
    let patch: OfferPatch = payload.decode()?;
    Ok(Json(market.update_offer(&id, patch).await?))
}

pub async fn delete_offer(
    State(market): State<Marketplace>,
    id: EntityId,
) -> MarketResult<Json<MessageResponse>> {
    market.delete_offer(&id).await?;
    Ok(Json(MessageResponse::new("Offer deleted successfully")))
}
