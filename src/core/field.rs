//! Field aliasing between the order form and the persisted order schema
//!
//! The dashboard forms and older callers use their own names for order
//! fields (`name`, `phone`, `weight`, ...). The collaborator only knows the
//! persisted names (`nama_pelanggan`, `nomor`, `berat`, ...).
//! [`to_persisted_shape`] maps one onto the other and is the only place the
//! alias table is consulted.

use serde_json::{Map, Value};

/// Persisted order field names accepted in an update
pub const PERSISTED_FIELDS: &[&str] = &[
    "id_owner",
    "id_admin",
    "nama_pelanggan",
    "nomor",
    "alamat",
    "layanan",
    "berat",
    "jumlah_satuan",
    "harga_layanan",
    "jumlah_harga",
    "jenis_pembayaran",
    "status",
];

/// `(alias, persisted name)` pairs
pub const FIELD_ALIASES: &[(&str, &str)] = &[
    ("name", "nama_pelanggan"),
    ("nama", "nama_pelanggan"),
    ("customer_name", "nama_pelanggan"),
    ("phone", "nomor"),
    ("no_hp", "nomor"),
    ("customer_phone", "nomor"),
    ("address", "alamat"),
    ("service", "layanan"),
    ("weight", "berat"),
    ("quantity", "jumlah_satuan"),
    ("units", "jumlah_satuan"),
    ("unit_price", "harga_layanan"),
    ("total_price", "jumlah_harga"),
    ("payment_method", "jenis_pembayaran"),
    ("owner_id", "id_owner"),
    ("admin_id", "id_admin"),
];

/// Resolve a single key to its persisted name, `None` when unknown
pub fn persisted_name(key: &str) -> Option<&'static str> {
    if let Some(canonical) = PERSISTED_FIELDS.iter().copied().find(|f| *f == key) {
        return Some(canonical);
    }
    FIELD_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
}

/// Map user-facing field names onto the persisted schema
///
/// Canonical keys pass through and win over an alias for the same field.
/// Unknown keys are dropped.
pub fn to_persisted_shape(input: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();

    for (key, value) in input {
        match persisted_name(key) {
            Some(canonical) if canonical == key.as_str() => {
                out.insert(canonical.to_string(), value.clone());
            }
            Some(canonical) => {
                if !input.contains_key(canonical) {
                    out.insert(canonical.to_string(), value.clone());
                }
            }
            None => {
                tracing::warn!(field = %key, "dropping unknown order field");
            }
        }
    }

    out
}
