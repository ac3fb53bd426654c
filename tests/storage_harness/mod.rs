//! Shared test harness for DataSource and OrderManager testing
//!
//! Provides record builders for orders, catalog entries and directory data,
//! the `data_source_tests!` contract macro, and a fake REST backend.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod data_source_tests;
pub mod fake_backend;

use laundry::core::catalog::{Admin, BillingType, OwnerProfile, Service};
use laundry::core::order::{CreateOrderRecord, NewOrder, OrderStatus};
use laundry::storage::InMemoryDataSource;

/// Owner used by most fixtures
pub const OWNER: i64 = 7;

/// Another owner, for isolation checks
pub const OTHER_OWNER: i64 = 8;

pub const TOKEN: &str = "rahasia-123";

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// A valid persisted-shape record for `owner`
pub fn create_test_record(owner: i64, name: &str) -> CreateOrderRecord {
    CreateOrderRecord {
        id_owner: owner,
        id_admin: None,
        nama_pelanggan: name.to_string(),
        nomor: "081234567890".to_string(),
        alamat: "Jl. Mawar No. 1".to_string(),
        layanan: "Cuci Kiloan".to_string(),
        status: OrderStatus::Pending,
    }
}

/// A valid intake form for the session owner
pub fn valid_new_order(name: &str) -> NewOrder {
    NewOrder::new(name, "081234567890", "Jl. Mawar No. 1", "Cuci Kiloan")
}

// ---------------------------------------------------------------------------
// Catalog and directory
// ---------------------------------------------------------------------------

pub fn kiloan_service(id: i64, owner: i64, price: i64) -> Service {
    Service {
        id,
        nama_layanan: "Cuci Setrika".to_string(),
        harga_layanan: price,
        keterangan_layanan: "Cuci, kering, setrika".to_string(),
        tipe: BillingType::Weight,
        id_owner: owner,
        waktu_pengerjaan: Some(2),
    }
}

pub fn satuan_service(id: i64, owner: i64, price: i64) -> Service {
    Service {
        id,
        nama_layanan: "Bed Cover".to_string(),
        harga_layanan: price,
        keterangan_layanan: "Per lembar".to_string(),
        tipe: BillingType::Unit,
        id_owner: owner,
        waktu_pengerjaan: Some(3),
    }
}

pub fn test_admin(id: i64, owner: i64) -> Admin {
    Admin {
        id,
        nama: format!("Admin {}", id),
        email: Some(format!("admin{}@laundry.test", id)),
        nomor: Some("081298765432".to_string()),
        id_owner: owner,
    }
}

pub fn test_owner(id: i64) -> OwnerProfile {
    OwnerProfile {
        id,
        nama: "Siti".to_string(),
        nama_laundry: Some("Laundry Bersih".to_string()),
        email: Some("siti@laundry.test".to_string()),
        alamat: Some("Jl. Melati 5".to_string()),
        nomor: Some("081311112222".to_string()),
    }
}

/// In-memory source with a catalog, two admins and an owner profile for
/// [`OWNER`], and one foreign service for [`OTHER_OWNER`]
pub fn seeded_source() -> InMemoryDataSource {
    let source = InMemoryDataSource::new();
    source.put_service(kiloan_service(1, OWNER, 7000)).unwrap();
    source.put_service(satuan_service(2, OWNER, 15000)).unwrap();
    source
        .put_service(kiloan_service(3, OTHER_OWNER, 6000))
        .unwrap();
    source.put_admin(test_admin(1, OWNER)).unwrap();
    source.put_admin(test_admin(2, OWNER)).unwrap();
    source.put_admin(test_admin(3, OTHER_OWNER)).unwrap();
    source.put_owner(test_owner(OWNER)).unwrap();
    source
}

// ---------------------------------------------------------------------------
// Assertion helpers
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
