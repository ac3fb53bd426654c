//! Macro-generated test suite for `DataSource` contract validation.
//!
//! The `data_source_tests!` macro generates a test module that validates any
//! `DataSource` implementation against the full contract: order CRUD,
//! owner isolation, catalog and directory reads, and concurrent access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//!
//! data_source_tests!(seeded_source());
//! ```
//!
//! # Generated Tests
//!
//! ## Orders
//! - `test_create_and_get`: create then retrieve, verify persisted fields
//! - `test_get_nonexistent`: unknown id returns None
//! - `test_list_filters_by_owner`: only the owner's orders come back
//! - `test_list_empty`: an owner without orders gets an empty list
//! - `test_update_partial`: only supplied fields change
//! - `test_update_nonexistent`: unknown id returns None
//! - `test_delete_existing`: delete then get returns None, repeat returns false
//! - `test_delete_nonexistent`: unknown id returns false
//!
//! ## Catalog and directory
//! - `test_list_services`: owner-filtered catalog with prices and billing types
//! - `test_list_admins`: owner-filtered admins
//! - `test_get_owner`: known and unknown owner profiles
//!
//! ## Edge Cases
//! - `test_concurrent_creates`: parallel creates get distinct ids

/// Generate a full `DataSource` conformance test suite.
///
/// `$factory` must evaluate to a `DataSource` seeded like
/// [`seeded_source`](super::seeded_source). It is re-evaluated for each test
/// and may contain `.await`. The concurrent test also needs `Clone + 'static`.
#[macro_export]
macro_rules! data_source_tests {
    ($factory:expr) => {
        mod data_source_contract_tests {
            use super::*;
            use laundry::core::catalog::BillingType;
            use laundry::core::order::{OrderPatch, OrderStatus, PaymentMethod};
            use laundry::core::service::DataSource;

            // ==================================================================
            // Orders: Create & Get
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let source = $factory;
                let created = source
                    .create_order(&create_test_record(OWNER, "Budi"))
                    .await
                    .unwrap();

                assert!(created.id > 0);
                assert_eq!(created.id_owner, OWNER);
                assert_eq!(created.nama_pelanggan, "Budi");
                assert_eq!(created.nomor, "081234567890");
                assert_eq!(created.status, OrderStatus::Pending);
                assert!(!created.is_priced());

                let retrieved = source.get_order(created.id).await.unwrap();
                assert!(retrieved.is_some(), "Order should exist after create");
                let retrieved = retrieved.unwrap();
                assert_eq!(retrieved.id, created.id);
                assert_eq!(retrieved.alamat, "Jl. Mawar No. 1");
                assert_eq!(retrieved.layanan, "Cuci Kiloan");
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let source = $factory;
                let result = source.get_order(987_654).await.unwrap();
                assert!(result.is_none(), "Unknown id should return None");
            }

            // ==================================================================
            // Orders: List
            // ==================================================================

            #[tokio::test]
            async fn test_list_filters_by_owner() {
                let source = $factory;
                for name in ["Ani", "Budi", "Citra"] {
                    source
                        .create_order(&create_test_record(OWNER, name))
                        .await
                        .unwrap();
                }
                source
                    .create_order(&create_test_record(OTHER_OWNER, "Dedi"))
                    .await
                    .unwrap();

                let mine = source.list_orders(OWNER).await.unwrap();
                assert_count(&mine, 3);
                assert!(mine.iter().all(|o| o.id_owner == OWNER));

                let theirs = source.list_orders(OTHER_OWNER).await.unwrap();
                assert_count(&theirs, 1);
                assert_eq!(theirs[0].nama_pelanggan, "Dedi");
            }

            #[tokio::test]
            async fn test_list_empty() {
                let source = $factory;
                let orders = source.list_orders(999).await.unwrap();
                assert!(orders.is_empty(), "Owner without orders gets an empty list");
            }

            // ==================================================================
            // Orders: Update
            // ==================================================================

            #[tokio::test]
            async fn test_update_partial() {
                let source = $factory;
                let created = source
                    .create_order(&create_test_record(OWNER, "Budi"))
                    .await
                    .unwrap();

                let patch = OrderPatch {
                    nama_pelanggan: Some("Budi Santoso".to_string()),
                    jenis_pembayaran: Some(PaymentMethod::Transfer),
                    ..OrderPatch::default()
                };
                let updated = source
                    .update_order(created.id, &patch)
                    .await
                    .unwrap()
                    .expect("order exists");

                assert_eq!(updated.nama_pelanggan, "Budi Santoso");
                assert_eq!(updated.jenis_pembayaran, Some(PaymentMethod::Transfer));
                assert_eq!(updated.nomor, created.nomor);
                assert_eq!(updated.alamat, created.alamat);
                assert_eq!(updated.status, OrderStatus::Pending);
                assert_eq!(updated.id_owner, OWNER);

                let persisted = source.get_order(created.id).await.unwrap().unwrap();
                assert_eq!(persisted.nama_pelanggan, "Budi Santoso");
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let source = $factory;
                let result = source
                    .update_order(987_654, &OrderPatch::status(OrderStatus::Diproses))
                    .await
                    .unwrap();
                assert!(result.is_none());
            }

            // ==================================================================
            // Orders: Delete
            // ==================================================================

            #[tokio::test]
            async fn test_delete_existing() {
                let source = $factory;
                let created = source
                    .create_order(&create_test_record(OWNER, "Budi"))
                    .await
                    .unwrap();

                assert!(source.delete_order(created.id).await.unwrap());
                assert!(source.get_order(created.id).await.unwrap().is_none());
                assert!(
                    !source.delete_order(created.id).await.unwrap(),
                    "Repeated delete removes nothing"
                );
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let source = $factory;
                assert!(!source.delete_order(987_654).await.unwrap());
            }

            // ==================================================================
            // Catalog and directory
            // ==================================================================

            #[tokio::test]
            async fn test_list_services() {
                let source = $factory;
                let services = source.list_services(OWNER).await.unwrap();

                assert_count(&services, 2);
                assert_eq!(services[0].id, 1);
                assert_eq!(services[0].tipe, BillingType::Weight);
                assert_eq!(services[0].harga_layanan, 7000);
                assert_eq!(services[1].tipe, BillingType::Unit);
                assert_eq!(services[1].harga_layanan, 15000);

                assert!(source.list_services(999).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_admins() {
                let source = $factory;
                let admins = source.list_admins(OWNER).await.unwrap();
                assert_count(&admins, 2);
                assert!(admins.iter().all(|a| a.id_owner == OWNER));
            }

            #[tokio::test]
            async fn test_get_owner() {
                let source = $factory;
                let owner = source.get_owner(OWNER).await.unwrap().expect("seeded owner");
                assert_eq!(owner.nama, "Siti");
                assert_eq!(owner.nama_laundry.as_deref(), Some("Laundry Bersih"));

                assert!(source.get_owner(999).await.unwrap().is_none());
            }

            // ==================================================================
            // Edge cases
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_creates() {
                let source = $factory;
                let mut handles = Vec::new();
                for i in 0..10 {
                    let source = source.clone();
                    handles.push(tokio::spawn(async move {
                        source
                            .create_order(&create_test_record(OWNER, &format!("Pelanggan {}", i)))
                            .await
                            .unwrap()
                            .id
                    }));
                }

                let mut ids = Vec::new();
                for handle in handles {
                    ids.push(handle.await.unwrap());
                }
                ids.sort_unstable();
                ids.dedup();
                assert_eq!(ids.len(), 10, "Every create gets its own id");
                assert_count(&source.list_orders(OWNER).await.unwrap(), 10);
            }
        }
    };
}
