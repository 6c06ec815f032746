//! Shop HTTP handlers

use super::model::{NewShop, Shop, ShopDetail, ShopPatch};
use crate::core::error::MarketResult;
use crate::core::extractors::EntityId;
use crate::core::gateway::Marketplace;
use crate::core::message::MessageResponse;
use crate::core::validation::Validated;
use axum::{extract::State, http::StatusCode, response::Json};

pub async fn list_shops(State(market): State<Marketplace>) -> MarketResult<Json<Vec<Shop>>> {
    Ok(Json(market.list_shops().await?))
}

/// Shop fields plus the shop's offers, newest first
pub async fn get_shop(
    State(market): State<Marketplace>,
    id: EntityId,
) -> MarketResult<Json<ShopDetail>> {
    let shop = market.get_shop(&id).await?;
    let offers = market.list_offers_by_shop(&id).await?;
    Ok(Json(ShopDetail { shop, offers }))
}

pub async fn create_shop(
    State(market): State<Marketplace>,
    payload: Validated<Shop>,
) -> MarketResult<(StatusCode, Json<Shop>)> {
    let data: NewShop = payload.decode()?;
    let shop = market.create_shop(data).await?;
    Ok((StatusCode::CREATED, Json(shop)))
}

pub async fn update_shop(
    State(market): State<Marketplace>,
    id: EntityId,
    payload: Validated<Shop>,
) -> MarketResult<Json<Shop>> {
    let patch: ShopPatch = payload.decode()?;
    Ok(Json(market.update_shop(&id, patch).await?))
}

pub async fn delete_shop(
    State(market): State<Marketplace>,
    id: EntityId,
) -> MarketResult<Json<MessageResponse>> {
    market.delete_shop(&id).await?;
    Ok(Json(MessageResponse::new(
        "Shop and associated offers deleted successfully",
    )))
}
