//! HTTP integration tests for the `/api` routes
//!
//! Every test builds the full router on a fresh in-memory marketplace and
//! drives it through `axum_test::TestServer`.

#![cfg(feature = "in-memory")]

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use marketplace::prelude::*;
use serde_json::{Value, json};

// =============================================================================
// Helpers
// =============================================================================

fn server() -> TestServer {
    let app = ServerBuilder::new()
        .with_marketplace(Marketplace::in_memory())
        .build()
        .unwrap();
    TestServer::new(app)
}

fn shop_body(name: &str) -> Value {
    json!({
        "name": name,
        "address": "12 Market Street",
        "contact": { "phone": "555-0100", "email": "Owner@Example.COM" }
    })
}

fn day(offset: i64) -> String {
    (Utc::now() + Duration::days(offset))
        .format("%Y-%m-%d")
        .to_string()
}

async fn create_shop(server: &TestServer, name: &str) -> Value {
    let response = server.post("/api/shops").json(&shop_body(name)).await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

async fn create_offer(server: &TestServer, shop_id: &str, title: &str, start: &str, end: &str) -> Value {
    let response = server
        .post("/api/offers")
        .json(&json!({
            "shopId": shop_id,
            "title": title,
            "description": "Limited time",
            "startDate": start,
            "endDate": end
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

fn id_of(entity: &Value) -> String {
    entity["id"].as_str().unwrap().to_string()
}

fn titles(offers: &Value) -> Vec<&str> {
    offers
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["title"].as_str().unwrap())
        .collect()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let response = server().get("/api/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "message": "Shop Marketplace API is running!" }));
}

// =============================================================================
// Shops
// =============================================================================

mod shop_routes {
    use super::*;

    #[tokio::test]
    async fn test_create_shop_normalizes_fields() {
        let server = server();
        let response = server
            .post("/api/shops")
            .json(&json!({
                "name": "  Corner Bakery ",
                "address": " 1 Main St",
                "contact": { "phone": "555", "email": "A@B.com" },
                "location": { "coordinates": [-73.98, 40.75] }
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let shop: Value = response.json();
        assert_eq!(shop["name"], "Corner Bakery");
        assert_eq!(shop["address"], "1 Main St");
        assert_eq!(shop["contact"]["email"], "a@b.com");
        assert_eq!(shop["location"]["coordinates"], json!([-73.98, 40.75]));
        assert!(shop["createdAt"].is_string());
        assert!(shop["updatedAt"].is_string());
    }

    #[tokio::test]
    async fn test_create_shop_accepts_numeric_phone() {
        let response = server()
            .post("/api/shops")
            .json(&json!({
                "name": "Corner Bakery",
                "address": "1 Main St",
                "contact": { "phone": 5550100, "email": "a@b.com" }
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["contact"]["phone"], "5550100");
    }

    #[tokio::test]
    async fn test_create_shop_missing_fields_is_400() {
        let response = server()
            .post("/api/shops")
            .json(&json!({ "name": "No Contact" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        let fields = body["details"]["fields"].as_array().unwrap();
        assert!(fields.iter().any(|f| f.as_str().unwrap().contains("address")));
    }

    #[tokio::test]
    async fn test_create_shop_bad_coordinates_is_400() {
        let mut body = shop_body("Lost");
        body["location"] = json!({ "coordinates": [181.0, 0.0] });

        server()
            .post("/api/shops")
            .json(&body)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_shop_invalid_json_is_400() {
        server()
            .post("/api/shops")
            .text("{not json")
            .content_type("application/json")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_shops_newest_first() {
        let server = server();
        for name in ["first", "second", "third"] {
            create_shop(&server, name).await;
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let shops: Value = server.get("/api/shops").await.json();
        let names: Vec<&str> = shops
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_get_shop_includes_offers() {
        let server = server();
        let shop = create_shop(&server, "Detail").await;
        let id = id_of(&shop);
        create_offer(&server, &id, "Deal", &day(0), &day(7)).await;

        let response = server.get(&format!("/api/shops/{}", id)).await;
        response.assert_status_ok();
        let detail: Value = response.json();
        assert_eq!(detail["name"], shop["name"]);
        assert_eq!(detail["createdAt"], shop["createdAt"]);
        assert_eq!(titles(&detail["offers"]), vec!["Deal"]);
    }

    #[tokio::test]
    async fn test_get_unknown_shop_is_404() {
        let response = server()
            .get(&format!("/api/shops/{}", uuid::Uuid::new_v4()))
            .await;
        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["code"], "SHOP_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_malformed_id_is_400() {
        let response = server().get("/api/shops/not-a-uuid").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "MALFORMED_ID");
    }

    #[tokio::test]
    async fn test_update_shop_partial() {
        let server = server();
        let shop = create_shop(&server, "Before").await;
        let id = id_of(&shop);

        let response = server
            .put(&format!("/api/shops/{}", id))
            .json(&json!({ "name": " After ", "contact": { "email": "NEW@MAIL.COM" } }))
            .await;

        response.assert_status_ok();
        let updated: Value = response.json();
        assert_eq!(updated["name"], "After");
        assert_eq!(updated["address"], shop["address"]);
        assert_eq!(updated["contact"]["phone"], shop["contact"]["phone"]);
        assert_eq!(updated["contact"]["email"], "new@mail.com");
        assert_eq!(updated["createdAt"], shop["createdAt"]);
    }

    #[tokio::test]
    async fn test_update_shop_blank_name_is_400() {
        let server = server();
        let id = id_of(&create_shop(&server, "Keep").await);

        server
            .put(&format!("/api/shops/{}", id))
            .json(&json!({ "name": "  " }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let shop: Value = server.get(&format!("/api/shops/{}", id)).await.json();
        assert_eq!(shop["name"], "Keep");
    }

    #[tokio::test]
    async fn test_update_unknown_shop_is_404() {
        server()
            .put(&format!("/api/shops/{}", uuid::Uuid::new_v4()))
            .json(&json!({ "name": "x" }))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_delete_shop_cascades() {
        let server = server();
        let id = id_of(&create_shop(&server, "Closing").await);
        create_offer(&server, &id, "Last Deal", &day(0), &day(3)).await;
        create_offer(&server, &id, "Final Deal", &day(1), &day(3)).await;

        let response = server.delete(&format!("/api/shops/{}", id)).await;
        response.assert_status_ok();
        response.assert_json(&json!({ "message": "Shop and associated offers deleted successfully" }));

        let offers: Value = server.get(&format!("/api/offers/{}", id)).await.json();
        assert_eq!(offers, json!([]));

        server
            .delete(&format!("/api/shops/{}", id))
            .await
            .assert_status_not_found();
    }
}

// =============================================================================
// Offers
// =============================================================================

mod offer_routes {
    use super::*;

    #[tokio::test]
    async fn test_create_offer_defaults_active() {
        let server = server();
        let shop_id = id_of(&create_shop(&server, "Shop").await);

        let offer = create_offer(&server, &shop_id, "  Spring Sale ", &day(0), &day(7)).await;
        assert_eq!(offer["title"], "Spring Sale");
        assert_eq!(offer["shopId"], shop_id.as_str());
        assert_eq!(offer["isActive"], true);
    }

    #[tokio::test]
    async fn test_create_offer_ignores_active_flag() {
        let server = server();
        let shop_id = id_of(&create_shop(&server, "Shop").await);

        let response = server
            .post("/api/offers")
            .json(&json!({
                "shopId": shop_id,
                "title": "Paused",
                "description": "Limited time",
                "startDate": day(0),
                "endDate": day(7),
                "isActive": false
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["isActive"], true);
    }

    #[tokio::test]
    async fn test_offer_this_week_is_active_immediately() {
        let server = server();
        let shop_id = id_of(&create_shop(&server, "Shop").await);
        create_offer(&server, &shop_id, "This Week", &day(0), &day(7)).await;
        create_offer(&server, &shop_id, "Next Month", &day(30), &day(37)).await;

        let active: Value = server
            .get(&format!("/api/offers/active/{}", shop_id))
            .await
            .json();
        assert_eq!(titles(&active), vec!["This Week"]);

        let all: Value = server.get(&format!("/api/offers/{}", shop_id)).await.json();
        assert_eq!(titles(&all), vec!["Next Month", "This Week"]);
    }

    #[tokio::test]
    async fn test_end_before_start_is_400() {
        let server = server();
        let shop_id = id_of(&create_shop(&server, "Shop").await);

        let response = server
            .post("/api/offers")
            .json(&json!({
                "shopId": shop_id,
                "title": "Backwards",
                "description": "Ends before it starts",
                "startDate": day(1),
                "endDate": day(0)
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_DATE_RANGE");
        assert_eq!(body["message"], "End date must be after start date");

        let offers: Value = server.get(&format!("/api/offers/{}", shop_id)).await.json();
        assert_eq!(offers, json!([]));
    }

    #[tokio::test]
    async fn test_unknown_shop_is_404() {
        let server = server();
        let ghost = uuid::Uuid::new_v4();

        let response = server
            .post("/api/offers")
            .json(&json!({
                "shopId": ghost,
                "title": "Nobody Home",
                "description": "No shop",
                "startDate": day(0),
                "endDate": day(1)
            }))
            .await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["code"], "SHOP_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_missing_fields_is_400() {
        let server = server();
        let shop_id = id_of(&create_shop(&server, "Shop").await);

        server
            .post("/api/offers")
            .json(&json!({ "shopId": shop_id, "title": "No dates" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unparseable_date_is_400() {
        let server = server();
        let shop_id = id_of(&create_shop(&server, "Shop").await);

        server
            .post("/api/offers")
            .json(&json!({
                "shopId": shop_id,
                "title": "Soon",
                "description": "When?",
                "startDate": "next tuesday",
                "endDate": day(1)
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_unknown_shop_is_empty() {
        let offers: Value = server()
            .get(&format!("/api/offers/{}", uuid::Uuid::new_v4()))
            .await
            .json();
        assert_eq!(offers, json!([]));
    }

    #[tokio::test]
    async fn test_update_offer_deactivates() {
        let server = server();
        let shop_id = id_of(&create_shop(&server, "Shop").await);
        let offer = create_offer(&server, &shop_id, "Deal", &day(0), &day(7)).await;

        let response = server
            .put(&format!("/api/offers/{}", id_of(&offer)))
            .json(&json!({ "isActive": false }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["isActive"], false);

        let active: Value = server
            .get(&format!("/api/offers/active/{}", shop_id))
            .await
            .json();
        assert_eq!(active, json!([]));
    }

    #[tokio::test]
    async fn test_update_offer_reversed_window_is_400() {
        let server = server();
        let shop_id = id_of(&create_shop(&server, "Shop").await);
        let offer = create_offer(&server, &shop_id, "Deal", &day(0), &day(7)).await;

        server
            .put(&format!("/api/offers/{}", id_of(&offer)))
            .json(&json!({ "endDate": day(-1) }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_offer_moves_to_other_shop() {
        let server = server();
        let shop_id = id_of(&create_shop(&server, "Shop").await);
        let other_id = id_of(&create_shop(&server, "Other").await);
        let offer = create_offer(&server, &shop_id, "Deal", &day(0), &day(7)).await;

        let response = server
            .put(&format!("/api/offers/{}", id_of(&offer)))
            .json(&json!({ "shopId": other_id, "title": "Moved" }))
            .await;
        response.assert_status_ok();
        let moved: Value = response.json();
        assert_eq!(moved["shopId"], other_id.as_str());
        assert_eq!(moved["title"], "Moved");

        let old: Value = server.get(&format!("/api/offers/{}", shop_id)).await.json();
        assert_eq!(old, json!([]));
        let new: Value = server.get(&format!("/api/offers/{}", other_id)).await.json();
        assert_eq!(titles(&new), vec!["Moved"]);
    }

    #[tokio::test]
    async fn test_update_offer_malformed_shop_id_is_400() {
        let server = server();
        let shop_id = id_of(&create_shop(&server, "Shop").await);
        let offer = create_offer(&server, &shop_id, "Deal", &day(0), &day(7)).await;

        server
            .put(&format!("/api/offers/{}", id_of(&offer)))
            .json(&json!({ "shopId": "not-a-uuid" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_unknown_offer_is_404() {
        let response = server()
            .put(&format!("/api/offers/{}", uuid::Uuid::new_v4()))
            .json(&json!({ "title": "x" }))
            .await;
        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["code"], "OFFER_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_delete_offer() {
        let server = server();
        let shop_id = id_of(&create_shop(&server, "Shop").await);
        let offer = create_offer(&server, &shop_id, "Deal", &day(0), &day(7)).await;
        let path = format!("/api/offers/{}", id_of(&offer));

        let response = server.delete(&path).await;
        response.assert_status_ok();
        response.assert_json(&json!({ "message": "Offer deleted successfully" }));

        server.delete(&path).await.assert_status_not_found();
    }
}
