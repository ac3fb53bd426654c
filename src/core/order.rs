//! Order (`pesanan`) records and their lifecycle

use crate::core::error::{Result, ValidationError};
use crate::core::validation;
use crate::core::wire;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an order
///
/// Variants are declared in lifecycle order, so `Ord` follows
/// pending → diproses → selesai → lunas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Taken in, not priced yet
    Pending,
    /// Being washed
    Diproses,
    /// Priced and done, waiting for payment
    Selesai,
    /// Paid
    Lunas,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Diproses => "diproses",
            OrderStatus::Selesai => "selesai",
            OrderStatus::Lunas => "lunas",
        }
    }

    /// The following lifecycle stage, `None` once paid
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Diproses),
            OrderStatus::Diproses => Some(OrderStatus::Selesai),
            OrderStatus::Selesai => Some(OrderStatus::Lunas),
            OrderStatus::Lunas => None,
        }
    }

    /// Forward moves (including skips) and no-ops are allowed, regressions are not
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        target >= *self
    }

    pub fn check_transition(&self, target: OrderStatus) -> Result<(), ValidationError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(ValidationError::StatusRegression {
                from: *self,
                to: target,
            })
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the customer settled the bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Transfer,
}

/// An order as persisted by the collaborator
///
/// Customer data is denormalized onto the order. `layanan` holds the free-text
/// service description at intake, and the catalog service name once priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(deserialize_with = "wire::lenient_i64")]
    pub id: i64,

    #[serde(deserialize_with = "wire::lenient_i64")]
    pub id_owner: i64,

    #[serde(default, deserialize_with = "wire::lenient_opt_i64", skip_serializing_if = "Option::is_none")]
    pub id_admin: Option<i64>,

    #[serde(default, deserialize_with = "wire::nullable_string")]
    pub nama_pelanggan: String,

    #[serde(default, deserialize_with = "wire::nullable_string")]
    pub nomor: String,

    #[serde(default, deserialize_with = "wire::nullable_string")]
    pub alamat: String,

    #[serde(default, deserialize_with = "wire::nullable_string")]
    pub layanan: String,

    /// Weight in kilograms (per-weight billing)
    #[serde(default, deserialize_with = "wire::lenient_opt_f64", skip_serializing_if = "Option::is_none")]
    pub berat: Option<f64>,

    /// Item count (per-unit billing)
    #[serde(default, deserialize_with = "wire::lenient_opt_i64", skip_serializing_if = "Option::is_none")]
    pub jumlah_satuan: Option<i64>,

    /// Unit price copied from the catalog at pricing time
    #[serde(default, deserialize_with = "wire::lenient_opt_i64", skip_serializing_if = "Option::is_none")]
    pub harga_layanan: Option<i64>,

    /// Total price in Rupiah
    #[serde(default, deserialize_with = "wire::lenient_opt_i64", skip_serializing_if = "Option::is_none")]
    pub jumlah_harga: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jenis_pembayaran: Option<PaymentMethod>,

    pub status: OrderStatus,

    #[serde(default, deserialize_with = "wire::lenient_opt_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "wire::lenient_opt_datetime", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn is_priced(&self) -> bool {
        self.jumlah_harga.is_some()
    }
}

/// Intake input, named the way the order form names things
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    /// Falls back to the session's owner when `None`
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub admin_id: Option<i64>,
    pub customer_name: String,
    pub customer_phone: String,
    pub address: String,
    pub service_description: String,
}

impl NewOrder {
    pub fn new(
        customer_name: impl Into<String>,
        customer_phone: impl Into<String>,
        address: impl Into<String>,
        service_description: impl Into<String>,
    ) -> Self {
        Self {
            owner_id: None,
            admin_id: None,
            customer_name: customer_name.into(),
            customer_phone: customer_phone.into(),
            address: address.into(),
            service_description: service_description.into(),
        }
    }

    pub fn owner(mut self, owner_id: i64) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn admin(mut self, admin_id: i64) -> Self {
        self.admin_id = Some(admin_id);
        self
    }

    /// Validate and map to the persisted shape
    ///
    /// Checks run in order and the first failure wins: owner, completeness,
    /// phone format.
    pub fn into_record(self, session_owner: Option<i64>) -> Result<CreateOrderRecord> {
        let id_owner = self
            .owner_id
            .or(session_owner)
            .ok_or(ValidationError::OwnerMissing)?;

        let missing: Vec<&'static str> = [
            ("nama_pelanggan", &self.customer_name),
            ("nomor", &self.customer_phone),
            ("alamat", &self.address),
            ("layanan", &self.service_description),
        ]
        .into_iter()
        .filter(|(_, value)| validation::is_blank(value))
        .map(|(field, _)| field)
        .collect();
        if !missing.is_empty() {
            return Err(ValidationError::Incomplete { fields: missing }.into());
        }

        let nomor = self.customer_phone.trim().to_string();
        validation::phone(&nomor)?;

        Ok(CreateOrderRecord {
            id_owner,
            id_admin: self.admin_id,
            nama_pelanggan: self.customer_name.trim().to_string(),
            nomor,
            alamat: self.address.trim().to_string(),
            layanan: self.service_description.trim().to_string(),
            status: OrderStatus::Pending,
        })
    }
}

/// Body of `POST /pesanan`: a fresh pending order with no price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRecord {
    pub id_owner: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_admin: Option<i64>,
    pub nama_pelanggan: String,
    pub nomor: String,
    pub alamat: String,
    pub layanan: String,
    pub status: OrderStatus,
}

/// Body of `PUT /pesanan/{id}`: only `Some` fields are sent and changed
///
/// The quantity fields are clearable: `Some(None)` goes out as `null` and
/// empties the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderPatch {
    #[serde(default, deserialize_with = "wire::lenient_opt_i64", skip_serializing_if = "Option::is_none")]
    pub id_admin: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nama_pelanggan: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nomor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alamat: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layanan: Option<String>,

    #[serde(default, deserialize_with = "wire::clearable_f64", skip_serializing_if = "Option::is_none")]
    pub berat: Option<Option<f64>>,

    #[serde(default, deserialize_with = "wire::clearable_i64", skip_serializing_if = "Option::is_none")]
    pub jumlah_satuan: Option<Option<i64>>,

    #[serde(default, deserialize_with = "wire::lenient_opt_i64", skip_serializing_if = "Option::is_none")]
    pub harga_layanan: Option<i64>,

    #[serde(default, deserialize_with = "wire::lenient_opt_i64", skip_serializing_if = "Option::is_none")]
    pub jumlah_harga: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jenis_pembayaran: Option<PaymentMethod>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

impl OrderPatch {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Re-check the supplied text fields with the intake rules
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<&'static str> = [
            ("nama_pelanggan", &self.nama_pelanggan),
            ("nomor", &self.nomor),
            ("alamat", &self.alamat),
            ("layanan", &self.layanan),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_ref().map(|v| (field, v)))
        .filter(|(_, value)| validation::is_blank(value))
        .map(|(field, _)| field)
        .collect();
        if !missing.is_empty() {
            return Err(ValidationError::Incomplete { fields: missing });
        }

        if let Some(nomor) = &self.nomor {
            validation::phone(nomor.trim())?;
        }
        Ok(())
    }

    /// Overwrite the supplied fields of `order`
    pub fn apply_to(&self, order: &mut Order) {
        if let Some(v) = self.id_admin {
            order.id_admin = Some(v);
        }
        if let Some(v) = &self.nama_pelanggan {
            order.nama_pelanggan = v.clone();
        }
        if let Some(v) = &self.nomor {
            order.nomor = v.clone();
        }
        if let Some(v) = &self.alamat {
            order.alamat = v.clone();
        }
        if let Some(v) = &self.layanan {
            order.layanan = v.clone();
        }
        if let Some(v) = self.berat {
            order.berat = v;
        }
        if let Some(v) = self.jumlah_satuan {
            order.jumlah_satuan = v;
        }
        if let Some(v) = self.harga_layanan {
            order.harga_layanan = Some(v);
        }
        if let Some(v) = self.jumlah_harga {
            order.jumlah_harga = Some(v);
        }
        if let Some(v) = self.jenis_pembayaran {
            order.jenis_pembayaran = Some(v);
        }
        if let Some(v) = self.status {
            order.status = v;
        }
    }
}
