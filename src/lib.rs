//! # laundry-core
//!
//! Order core of a laundry point-of-sale: intake validation, pricing for
//! per-kilogram and per-item services, the order status lifecycle and the
//! REST persistence client behind them.
//!
//! ## Features
//!
//! - **Validated intake**: incomplete orders and bad phone numbers never reach the backend
//! - **Exact pricing**: decimal arithmetic, whole-Rupiah totals, bounded quantities
//! - **Forward-only status**: `pending → diproses → selesai → lunas`
//! - **Pluggable persistence**: REST client or in-memory source behind one trait
//! - **Session aware**: bearer token on every request, 401 clears the session
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use laundry::prelude::*;
//!
//! let session = Arc::new(MemorySession::new("token", 7));
//! let config = ClientConfig::from_yaml_file("laundry.yaml")?.with_env_overrides()?;
//! let manager = OrderManager::from_config(&config, session)?;
//!
//! let order = manager
//!     .create(NewOrder::new("Budi", "081234567890", "Jl. Mawar 1", "Cuci Kiloan"))
//!     .await?;
//! let service = manager.find_service(7, 1).await?;
//! let priced = manager.confirm_pricing(order.id, &service, "2,5").await?;
//! println!("{}", format_rupiah(priced.jumlah_harga.unwrap_or_default()));
//! ```

pub mod config;
pub mod core;
pub mod logging;
pub mod orders;
pub mod pricing;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        catalog::{Admin, BillingType, OwnerProfile, Service},
        error::{LaundryError, PricingError, QuantityLimit, Result, ValidationError},
        field::to_persisted_shape,
        order::{NewOrder, Order, OrderPatch, OrderStatus, PaymentMethod},
        service::DataSource,
        session::{MemorySession, SessionContext},
    };

    // === Pricing ===
    pub use crate::pricing::{
        MAX_UNITS, MAX_WEIGHT_KG, PricingAttempt, PricingResult, PricingState, QuantityInput,
        compute_price, format_rupiah,
    };

    // === Orders ===
    pub use crate::orders::OrderManager;

    // === Storage ===
    pub use crate::storage::{InMemoryDataSource, RestDataSource};

    // === Config ===
    pub use crate::config::ClientConfig;
    pub use crate::logging::init_tracing;

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
