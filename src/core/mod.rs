//! Core module containing the order model, errors and the persistence seam

pub mod catalog;
pub mod error;
pub mod field;
pub mod order;
pub mod service;
pub mod session;
pub mod validation;
pub(crate) mod wire;

pub use catalog::{Admin, BillingType, OwnerProfile, Service};
pub use error::{LaundryError, PricingError, QuantityLimit, Result, ValidationError};
pub use field::to_persisted_shape;
pub use order::{CreateOrderRecord, NewOrder, Order, OrderPatch, OrderStatus, PaymentMethod};
pub use service::DataSource;
pub use session::{MemorySession, SessionContext};
