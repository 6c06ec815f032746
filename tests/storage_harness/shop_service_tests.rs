//! Macro-generated contract suite for `DataService<Shop>` implementations.
//!
//! `$factory` is re-evaluated for each test. For the concurrent access test
//! the returned service must also be `Clone + 'static`.

#[macro_export]
macro_rules! shop_service_tests {
    ($factory:expr) => {
        mod shop_service_contract_tests {
            use super::*;
            use marketplace::core::error::StorageError;
            use marketplace::core::service::DataService;
            use marketplace::entities::Shop;
            use uuid::Uuid;

            #[tokio::test]
            async fn test_create_and_get_round_trip() {
                let service = $factory;
                let shop = sample_shop("Corner Bakery");

                let created = service.create(shop.clone()).await.unwrap();
                assert_eq!(created, shop);

                let fetched: Option<Shop> = service.get(&shop.id).await.unwrap();
                assert_eq!(fetched, Some(shop));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;
                let fetched: Option<Shop> = service.get(&Uuid::new_v4()).await.unwrap();
                assert!(fetched.is_none());
            }

            #[tokio::test]
            async fn test_list_empty() {
                let service = $factory;
                let shops: Vec<Shop> = service.list().await.unwrap();
                assert_count(&shops, 0);
            }

            #[tokio::test]
            async fn test_list_newest_first() {
                let service = $factory;
                for name in ["first", "second", "third"] {
                    service.create(sample_shop(name)).await.unwrap();
                    tokio::time::sleep(CREATE_GAP).await;
                }

                let shops: Vec<Shop> = service.list().await.unwrap();
                let names: Vec<&str> = shops.iter().map(|s| s.name.as_str()).collect();
                assert_eq!(names, vec!["third", "second", "first"]);
            }

            #[tokio::test]
            async fn test_update_existing() {
                let service = $factory;
                let mut shop = service.create(sample_shop("Old Name")).await.unwrap();

                shop.name = "New Name".to_string();
                let updated = service.update(&shop.id, shop.clone()).await.unwrap();
                assert_eq!(updated.name, "New Name");

                let fetched: Shop = service.get(&shop.id).await.unwrap().unwrap();
                assert_eq!(fetched, shop);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                let shop = sample_shop("Ghost");

                let err = service.update(&shop.id, shop.clone()).await.unwrap_err();
                assert!(matches!(err, StorageError::NotFound { .. }), "got {err:?}");
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let service = $factory;
                let shop = service.create(sample_shop("Gone Soon")).await.unwrap();

                assert!(DataService::<Shop>::delete(&service, &shop.id).await.unwrap());
                let fetched: Option<Shop> = service.get(&shop.id).await.unwrap();
                assert!(fetched.is_none());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let service = $factory;
                let deleted = DataService::<Shop>::delete(&service, &Uuid::new_v4()).await.unwrap();
                assert!(!deleted);
            }

            #[tokio::test]
            async fn test_concurrent_creates() {
                let service = $factory;
                let mut handles = Vec::new();
                for i in 0..10 {
                    let service = service.clone();
                    handles.push(tokio::spawn(async move {
                        service.create(sample_shop(&format!("shop {}", i))).await
                    }));
                }
                for handle in handles {
                    handle.await.unwrap().unwrap();
                }

                let shops: Vec<Shop> = service.list().await.unwrap();
                assert_count(&shops, 10);
            }
        }
    };
}
