//! In-memory implementation of DataSource for testing and offline use

use crate::core::catalog::{Admin, OwnerProfile, Service};
use crate::core::error::{LaundryError, Result};
use crate::core::order::{CreateOrderRecord, Order, OrderPatch};
use crate::core::service::DataSource;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    orders: HashMap<i64, Order>,
    services: HashMap<i64, Service>,
    admins: HashMap<i64, Admin>,
    owners: HashMap<i64, OwnerProfile>,
}

/// In-memory data source
///
/// Uses RwLock for thread-safe access. Clones share the same tables.
/// Directory reads (admins, owner profiles) are counted so callers can
/// observe caching.
#[derive(Clone)]
pub struct InMemoryDataSource {
    tables: Arc<RwLock<Tables>>,
    next_id: Arc<AtomicI64>,
    admin_reads: Arc<AtomicUsize>,
    owner_reads: Arc<AtomicUsize>,
}

impl InMemoryDataSource {
    /// Create a new empty data source
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            next_id: Arc::new(AtomicI64::new(1)),
            admin_reads: Arc::new(AtomicUsize::new(0)),
            owner_reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| LaundryError::transient(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| LaundryError::transient(format!("Failed to acquire write lock: {}", e)))
    }

    /// Add or replace a catalog entry
    pub fn put_service(&self, service: Service) -> Result<()> {
        self.write()?.services.insert(service.id, service);
        Ok(())
    }

    /// Remove a catalog entry; orders keep their copied name and price
    pub fn remove_service(&self, id: i64) -> Result<bool> {
        Ok(self.write()?.services.remove(&id).is_some())
    }

    pub fn put_admin(&self, admin: Admin) -> Result<()> {
        self.write()?.admins.insert(admin.id, admin);
        Ok(())
    }

    pub fn put_owner(&self, owner: OwnerProfile) -> Result<()> {
        self.write()?.owners.insert(owner.id, owner);
        Ok(())
    }

    /// Number of `list_admins` calls served
    pub fn admin_reads(&self) -> usize {
        self.admin_reads.load(Ordering::SeqCst)
    }

    /// Number of `get_owner` calls served
    pub fn owner_reads(&self) -> usize {
        self.owner_reads.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryDataSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataSource for InMemoryDataSource {
    async fn create_order(&self, record: &CreateOrderRecord) -> Result<Order> {
        let now = Utc::now();
        let order = Order {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            id_owner: record.id_owner,
            id_admin: record.id_admin,
            nama_pelanggan: record.nama_pelanggan.clone(),
            nomor: record.nomor.clone(),
            alamat: record.alamat.clone(),
            layanan: record.layanan.clone(),
            berat: None,
            jumlah_satuan: None,
            harga_layanan: None,
            jumlah_harga: None,
            jenis_pembayaran: None,
            status: record.status,
            created_at: Some(now),
            updated_at: Some(now),
        };

        self.write()?.orders.insert(order.id, order.clone());

        Ok(order)
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>> {
        Ok(self.read()?.orders.get(&id).cloned())
    }

    async fn list_orders(&self, owner_id: i64) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .read()?
            .orders
            .values()
            .filter(|order| order.id_owner == owner_id)
            .cloned()
            .collect();
        orders.sort_by_key(|order| order.id);
        Ok(orders)
    }

    async fn update_order(&self, id: i64, patch: &OrderPatch) -> Result<Option<Order>> {
        let mut tables = self.write()?;

        let Some(order) = tables.orders.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply_to(order);
        order.updated_at = Some(Utc::now());

        Ok(Some(order.clone()))
    }

    async fn delete_order(&self, id: i64) -> Result<bool> {
        Ok(self.write()?.orders.remove(&id).is_some())
    }

    async fn list_services(&self, owner_id: i64) -> Result<Vec<Service>> {
        let mut services: Vec<Service> = self
            .read()?
            .services
            .values()
            .filter(|service| service.id_owner == owner_id)
            .cloned()
            .collect();
        services.sort_by_key(|service| service.id);
        Ok(services)
    }

    async fn list_admins(&self, owner_id: i64) -> Result<Vec<Admin>> {
        self.admin_reads.fetch_add(1, Ordering::SeqCst);
        let mut admins: Vec<Admin> = self
            .read()?
            .admins
            .values()
            .filter(|admin| admin.id_owner == owner_id)
            .cloned()
            .collect();
        admins.sort_by_key(|admin| admin.id);
        Ok(admins)
    }

    async fn get_owner(&self, owner_id: i64) -> Result<Option<OwnerProfile>> {
        self.owner_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.read()?.owners.get(&owner_id).cloned())
    }
}
