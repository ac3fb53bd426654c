//! Typed error handling for the laundry order core
//!
//! Every failure the core can produce is a [`LaundryError`]. The variants
//! follow how the caller is expected to react:
//!
//! - [`ValidationError`]: caller input broke a business rule, fix and resubmit
//! - [`PricingError`]: quantity/price rejected by the pricing calculator
//! - `NotFound`: the order or service does not exist server-side
//! - `Transient`: network, timeout or 5xx, a manual retry may succeed
//! - `Auth`: the session token was rejected (401)
//! - `Decode`: the collaborator answered with a payload we cannot read
//! - `Config`: the client itself is misconfigured
//!
//! `Display` yields the user-facing message (Indonesian, as shown in the
//! dashboard). `error_code()` yields a stable code for programmatic handling.
//!
//! # Example
//!
//! ```rust,ignore
//! match manager.confirm_pricing(order_id, &service, "2,5").await {
//!     Ok(order) => println!("Pesanan {} selesai", order.id),
//!     Err(e) if e.is_validation() => show_inline(e.to_string()),
//!     Err(LaundryError::Auth) => redirect_to_login(),
//!     Err(e) => toast(e.to_string()),
//! }
//! ```

use crate::core::catalog::BillingType;
use crate::core::order::OrderStatus;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = LaundryError> = std::result::Result<T, E>;

/// The main error type of the crate
#[derive(Debug, Error)]
pub enum LaundryError {
    /// Input rejected by an order rule
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Input rejected by the pricing calculator
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Referenced record does not exist
    #[error("{resource} dengan id {id} tidak ditemukan")]
    NotFound { resource: &'static str, id: String },

    /// Network failure, timeout or server error
    #[error("Gagal menghubungi server: {message}")]
    Transient {
        message: String,
        status: Option<u16>,
    },

    /// Session token rejected by the collaborator
    #[error("Sesi telah berakhir, silakan login kembali")]
    Auth,

    /// Unreadable response payload
    #[error("Respons server tidak dikenali: {0}")]
    Decode(String),

    /// Invalid client configuration
    #[error("Konfigurasi tidak valid: {0}")]
    Config(String),
}

impl LaundryError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        LaundryError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn transient(message: impl Into<String>) -> Self {
        LaundryError::Transient {
            message: message.into(),
            status: None,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            LaundryError::Validation(e) => e.error_code(),
            LaundryError::Pricing(e) => e.error_code(),
            LaundryError::NotFound { .. } => "NOT_FOUND",
            LaundryError::Transient { .. } => "TRANSIENT",
            LaundryError::Auth => "UNAUTHORIZED",
            LaundryError::Decode(_) => "DECODE_ERROR",
            LaundryError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// True for every error caused by caller input (pricing errors included)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LaundryError::Validation(_) | LaundryError::Pricing(_)
        )
    }

    /// True when a manual retry of the same call may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, LaundryError::Transient { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LaundryError::NotFound { .. })
    }
}

impl From<reqwest::Error> for LaundryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LaundryError::Transient {
                message: "waktu permintaan habis".to_string(),
                status: None,
            }
        } else if err.is_decode() {
            LaundryError::Decode(err.to_string())
        } else {
            LaundryError::Transient {
                message: err.to_string(),
                status: err.status().map(|s| s.as_u16()),
            }
        }
    }
}

impl From<serde_json::Error> for LaundryError {
    fn from(err: serde_json::Error) -> Self {
        LaundryError::Decode(err.to_string())
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors raised when order input breaks a business rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No owner id supplied and none available from the session
    #[error("Owner tidak ditemukan")]
    OwnerMissing,

    /// One or more required fields are empty
    #[error("Data tidak lengkap: {}", .fields.join(", "))]
    Incomplete { fields: Vec<&'static str> },

    /// Phone does not match the local mobile format
    #[error("Format nomor telepon tidak valid (contoh: 081234567890)")]
    InvalidPhone { phone: String },

    /// Update would move the status backwards
    #[error("Status pesanan tidak dapat diubah dari {from} ke {to}")]
    StatusRegression { from: OrderStatus, to: OrderStatus },

    /// Orders never move between owners
    #[error("Pemilik pesanan tidak dapat diubah")]
    OwnerImmutable,

    /// Catalog service belongs to another owner than the order
    #[error("Layanan tidak tersedia untuk laundry ini")]
    ForeignService { service_id: i64, owner_id: i64 },

    /// A supplied field has the wrong shape
    #[error("Field '{field}' tidak valid: {message}")]
    InvalidField { field: String, message: String },

    /// The collaborator refused the payload (4xx)
    #[error("{0}")]
    Rejected(String),
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::OwnerMissing => "OWNER_MISSING",
            ValidationError::Incomplete { .. } => "INCOMPLETE_DATA",
            ValidationError::InvalidPhone { .. } => "INVALID_PHONE",
            ValidationError::StatusRegression { .. } => "STATUS_REGRESSION",
            ValidationError::OwnerImmutable => "OWNER_IMMUTABLE",
            ValidationError::ForeignService { .. } => "FOREIGN_SERVICE",
            ValidationError::InvalidField { .. } => "INVALID_FIELD",
            ValidationError::Rejected(_) => "REJECTED",
        }
    }
}

// =============================================================================
// Pricing Errors
// =============================================================================

/// Which quantity bound was violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityLimit {
    /// Weight above the kilogram ceiling
    MaxWeight,
    /// Unit count above the item ceiling
    MaxUnits,
    /// Unit count with a fractional part
    WholeUnits,
}

impl std::fmt::Display for QuantityLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use crate::pricing::{MAX_UNITS, MAX_WEIGHT_KG};
        match self {
            QuantityLimit::MaxWeight => {
                write!(f, "Berat tidak boleh melebihi {} kg", MAX_WEIGHT_KG)
            }
            QuantityLimit::MaxUnits => {
                write!(f, "Jumlah tidak boleh melebihi {} item", MAX_UNITS)
            }
            QuantityLimit::WholeUnits => write!(f, "Jumlah satuan harus bilangan bulat"),
        }
    }
}

/// Errors raised by the pricing calculator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Quantity is not a finite number above zero
    #[error("Jumlah harus berupa nilai yang valid dan lebih dari 0")]
    InvalidQuantity { input: String },

    /// Quantity is valid but outside the billing type's bounds
    #[error("{limit}")]
    QuantityOutOfRange {
        billing: BillingType,
        limit: QuantityLimit,
    },

    /// Unit price is not positive, or the total overflows
    #[error("Harga layanan harus lebih dari 0")]
    InvalidUnitPrice { unit_price: i64 },
}

impl PricingError {
    pub fn error_code(&self) -> &'static str {
        match self {
            PricingError::InvalidQuantity { .. } => "INVALID_QUANTITY",
            PricingError::QuantityOutOfRange { .. } => "QUANTITY_OUT_OF_RANGE",
            PricingError::InvalidUnitPrice { .. } => "INVALID_UNIT_PRICE",
        }
    }
}
