//! Service catalog (`layanan`) and owner directory records

use crate::core::wire;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// How a service is billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BillingType {
    /// Per kilogram ("Kiloan")
    Weight,
    /// Per item ("Satuan")
    Unit,
}

impl BillingType {
    /// Name used by the collaborator's `tipe` field
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingType::Weight => "Kiloan",
            BillingType::Unit => "Satuan",
        }
    }

    /// Unit label shown next to a quantity
    pub fn quantity_unit(&self) -> &'static str {
        match self {
            BillingType::Weight => "kg",
            BillingType::Unit => "pcs",
        }
    }
}

impl fmt::Display for BillingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kiloan" | "kilo" | "kg" | "weight" | "berat" => Ok(BillingType::Weight),
            "satuan" | "unit" | "pcs" | "item" => Ok(BillingType::Unit),
            other => Err(format!("unknown billing type '{}'", other)),
        }
    }
}

impl Serialize for BillingType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BillingType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A catalog entry offered by one laundry owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(deserialize_with = "wire::lenient_i64")]
    pub id: i64,

    #[serde(default, deserialize_with = "wire::nullable_string")]
    pub nama_layanan: String,

    /// Unit price in Rupiah (per kg or per item)
    #[serde(deserialize_with = "wire::lenient_i64")]
    pub harga_layanan: i64,

    #[serde(default, deserialize_with = "wire::nullable_string")]
    pub keterangan_layanan: String,

    pub tipe: BillingType,

    #[serde(deserialize_with = "wire::lenient_i64")]
    pub id_owner: i64,

    /// Estimated turnaround in days
    #[serde(default, deserialize_with = "wire::lenient_opt_i64", skip_serializing_if = "Option::is_none")]
    pub waktu_pengerjaan: Option<i64>,
}

/// A staff account scoped to one owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    #[serde(deserialize_with = "wire::lenient_i64")]
    pub id: i64,

    #[serde(default, alias = "name", alias = "nama_admin", deserialize_with = "wire::nullable_string")]
    pub nama: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nomor: Option<String>,

    #[serde(deserialize_with = "wire::lenient_i64")]
    pub id_owner: i64,
}

/// The laundry business account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerProfile {
    #[serde(deserialize_with = "wire::lenient_i64")]
    pub id: i64,

    #[serde(default, alias = "name", alias = "nama_owner", deserialize_with = "wire::nullable_string")]
    pub nama: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nama_laundry: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alamat: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nomor: Option<String>,
}
