//! Macro-generated contract suite for `OfferService` implementations.

#[macro_export]
macro_rules! offer_service_tests {
    ($factory:expr) => {
        mod offer_service_contract_tests {
            use super::*;
            use marketplace::core::service::{DataService, OfferService};
            use marketplace::entities::Offer;
            use uuid::Uuid;

            #[tokio::test]
            async fn test_create_and_get_round_trip() {
                let service = $factory;
                let t = now();
                let offer = sample_offer(Uuid::new_v4(), "Spring Sale", t, t + days(7));

                service.create(offer.clone()).await.unwrap();
                let fetched: Option<Offer> = service.get(&offer.id).await.unwrap();
                assert_eq!(fetched, Some(offer));
            }

            #[tokio::test]
            async fn test_find_by_shop_filters_and_orders() {
                let service = $factory;
                let shop = Uuid::new_v4();
                let other = Uuid::new_v4();
                let t = now();

                for (shop_id, title) in [(shop, "first"), (other, "elsewhere"), (shop, "second")] {
                    service
                        .create(sample_offer(shop_id, title, t, t + days(1)))
                        .await
                        .unwrap();
                    tokio::time::sleep(CREATE_GAP).await;
                }

                let offers = service.find_by_shop(&shop).await.unwrap();
                assert_titles(&offers, &["second", "first"]);
                assert!(service.find_by_shop(&Uuid::new_v4()).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_find_active_by_shop_window() {
                let service = $factory;
                let shop = Uuid::new_v4();
                let t = now();

                service.create(sample_offer(shop, "past", t - days(10), t - days(3))).await.unwrap();
                service.create(sample_offer(shop, "future", t + days(1), t + days(3))).await.unwrap();

                let mut paused = sample_offer(shop, "paused", t - days(1), t + days(1));
                paused.is_active = false;
                service.create(paused).await.unwrap();

                service.create(sample_offer(shop, "current", t - days(1), t + days(1))).await.unwrap();
                service
                    .create(sample_offer(Uuid::new_v4(), "other shop", t - days(1), t + days(1)))
                    .await
                    .unwrap();

                let active = service.find_active_by_shop(&shop, t).await.unwrap();
                assert_titles(&active, &["current"]);
            }

            #[tokio::test]
            async fn test_find_active_bounds_are_inclusive() {
                let service = $factory;
                let shop = Uuid::new_v4();
                let t = now();

                service.create(sample_offer(shop, "starts now", t, t + days(1))).await.unwrap();
                tokio::time::sleep(CREATE_GAP).await;
                service.create(sample_offer(shop, "ends now", t - days(1), t)).await.unwrap();

                let active = service.find_active_by_shop(&shop, t).await.unwrap();
                assert_titles(&active, &["ends now", "starts now"]);
            }

            #[tokio::test]
            async fn test_delete_by_shop() {
                let service = $factory;
                let shop = Uuid::new_v4();
                let keep = Uuid::new_v4();
                let t = now();

                for shop_id in [shop, shop, keep] {
                    service
                        .create(sample_offer(shop_id, "deal", t, t + days(1)))
                        .await
                        .unwrap();
                }

                assert_eq!(service.delete_by_shop(&shop).await.unwrap(), 2);
                assert_eq!(service.delete_by_shop(&shop).await.unwrap(), 0);
                assert!(service.find_by_shop(&shop).await.unwrap().is_empty());
                assert_count(&service.find_by_shop(&keep).await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_shop_ids_are_distinct() {
                let service = $factory;
                let a = Uuid::new_v4();
                let b = Uuid::new_v4();
                let t = now();

                for shop_id in [a, b, a] {
                    service
                        .create(sample_offer(shop_id, "deal", t, t + days(1)))
                        .await
                        .unwrap();
                }

                let mut ids = service.shop_ids().await.unwrap();
                ids.sort();
                let mut expected = vec![a, b];
                expected.sort();
                assert_eq!(ids, expected);
            }

            #[tokio::test]
            async fn test_delete_single_offer() {
                let service = $factory;
                let t = now();
                let offer = sample_offer(Uuid::new_v4(), "deal", t, t + days(1));
                service.create(offer.clone()).await.unwrap();

                assert!(DataService::<Offer>::delete(&service, &offer.id).await.unwrap());
                assert!(!DataService::<Offer>::delete(&service, &offer.id).await.unwrap());
            }
        }
    };
}
