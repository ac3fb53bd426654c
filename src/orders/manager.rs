//! Order Record Manager: CRUD, status transitions and pricing confirmation
//!
//! The manager is the only caller of the [`DataSource`]. It validates every
//! input before anything is sent, so a rejected order or quantity never
//! produces a request. A 401 from the collaborator is reported to the
//! session once and clears the directory cache.

use super::cache::DirectoryCache;
use crate::config::ClientConfig;
use crate::core::catalog::{Admin, BillingType, OwnerProfile, Service};
use crate::core::error::{LaundryError, Result, ValidationError};
use crate::core::field::to_persisted_shape;
use crate::core::order::{NewOrder, Order, OrderPatch, OrderStatus, PaymentMethod};
use crate::core::service::DataSource;
use crate::core::session::SessionContext;
use crate::pricing::{PricingResult, QuantityInput, price_for_service};
use crate::storage::RestDataSource;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;

const ORDER: &str = "Pesanan";
const SERVICE: &str = "Layanan";
const OWNER: &str = "Owner";

/// Order lifecycle over an injected data source and session
pub struct OrderManager {
    source: Arc<dyn DataSource>,
    session: Arc<dyn SessionContext>,
    directory: DirectoryCache,
}

impl OrderManager {
    pub fn new(source: Arc<dyn DataSource>, session: Arc<dyn SessionContext>) -> Self {
        Self {
            source,
            session,
            directory: DirectoryCache::default(),
        }
    }

    /// Manager over the REST collaborator described by `config`
    pub fn from_config(config: &ClientConfig, session: Arc<dyn SessionContext>) -> Result<Self> {
        let source = RestDataSource::new(config, session.clone())?;
        Ok(Self::new(Arc::new(source), session).with_cache_ttl(config.cache_ttl()))
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.directory = DirectoryCache::new(ttl);
        self
    }

    pub fn session(&self) -> &Arc<dyn SessionContext> {
        &self.session
    }

    /// Forward a 401 to the session and drop cached directory data
    async fn settle<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(LaundryError::Auth) = &result {
            tracing::warn!("collaborator rejected the session token");
            self.directory.invalidate().await;
            self.session.on_unauthorized();
        }
        result
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Validate intake data and persist a pending, unpriced order
    pub async fn create(&self, draft: NewOrder) -> Result<Order> {
        let record = draft.into_record(self.session.owner_id())?;
        tracing::debug!(owner_id = record.id_owner, "creating order");

        let order = self.settle(self.source.create_order(&record).await).await?;
        tracing::info!(order_id = order.id, owner_id = order.id_owner, "order created");
        Ok(order)
    }

    pub async fn get(&self, order_id: i64) -> Result<Order> {
        self.settle(self.source.get_order(order_id).await)
            .await?
            .ok_or_else(|| LaundryError::not_found(ORDER, order_id))
    }

    /// All orders of `owner_id`; empty when there are none
    pub async fn list(&self, owner_id: i64) -> Result<Vec<Order>> {
        self.settle(self.source.list_orders(owner_id).await).await
    }

    /// Orders of the session's owner
    pub async fn list_own(&self) -> Result<Vec<Order>> {
        let owner_id = self
            .session
            .owner_id()
            .ok_or(ValidationError::OwnerMissing)?;
        self.list(owner_id).await
    }

    /// Change only the supplied fields
    ///
    /// `fields` may use form names (`name`, `phone`, `weight`, ...) or
    /// persisted names; see [`crate::core::field`].
    pub async fn update(&self, order_id: i64, fields: &Map<String, Value>) -> Result<Order> {
        let mut shaped = to_persisted_shape(fields);
        let owner = shaped.remove("id_owner");

        let patch: OrderPatch = serde_json::from_value(Value::Object(shaped)).map_err(|e| {
            ValidationError::InvalidField {
                field: "pesanan".to_string(),
                message: e.to_string(),
            }
        })?;
        patch.validate()?;

        let current = self.get(order_id).await?;
        if owner.is_some_and(|owner| owner.as_i64() != Some(current.id_owner)) {
            return Err(ValidationError::OwnerImmutable.into());
        }
        self.write_patch(&current, patch).await
    }

    /// Typed counterpart of [`OrderManager::update`]
    pub async fn apply_patch(&self, order_id: i64, patch: OrderPatch) -> Result<Order> {
        patch.validate()?;
        let current = self.get(order_id).await?;
        self.write_patch(&current, patch).await
    }

    /// Check a validated patch against the current record and send it
    async fn write_patch(&self, current: &Order, patch: OrderPatch) -> Result<Order> {
        if let Some(target) = patch.status {
            current.status.check_transition(target)?;
        }
        if patch.is_empty() {
            return Ok(current.clone());
        }

        let updated = self
            .settle(self.source.update_order(current.id, &patch).await)
            .await?
            .ok_or_else(|| LaundryError::not_found(ORDER, current.id))?;

        if updated.status != current.status {
            tracing::info!(
                order_id = updated.id,
                from = %current.status,
                to = %updated.status,
                "order status changed"
            );
        }
        Ok(updated)
    }

    /// `true` only when the collaborator confirms the order was removed
    pub async fn delete(&self, order_id: i64) -> Result<bool> {
        let deleted = self
            .settle(self.source.delete_order(order_id).await)
            .await?;
        if deleted {
            tracing::info!(order_id, "order deleted");
        } else {
            tracing::debug!(order_id, "delete found nothing to remove");
        }
        Ok(deleted)
    }

    // =========================================================================
    // Pricing and billing
    // =========================================================================

    /// Price an order with a catalog service and mark it `selesai`
    ///
    /// The quantity is validated before anything is fetched or written.
    pub async fn confirm_pricing(
        &self,
        order_id: i64,
        service: &Service,
        quantity: impl Into<QuantityInput>,
    ) -> Result<Order> {
        let priced = price_for_service(service, quantity)?;
        let patch = pricing_patch(service, &priced);
        patch.validate()?;

        let current = self.get(order_id).await?;
        if service.id_owner != current.id_owner {
            return Err(ValidationError::ForeignService {
                service_id: service.id,
                owner_id: current.id_owner,
            }
            .into());
        }

        tracing::debug!(
            order_id,
            service_id = service.id,
            total_price = priced.total_price,
            "confirming pricing"
        );
        self.write_patch(&current, patch).await
    }

    pub async fn mark_processing(&self, order_id: i64) -> Result<Order> {
        self.apply_patch(order_id, OrderPatch::status(OrderStatus::Diproses))
            .await
    }

    /// Billing flow: settle the order
    pub async fn mark_paid(&self, order_id: i64, method: PaymentMethod) -> Result<Order> {
        let patch = OrderPatch {
            jenis_pembayaran: Some(method),
            status: Some(OrderStatus::Lunas),
            ..OrderPatch::default()
        };
        self.apply_patch(order_id, patch).await
    }

    // =========================================================================
    // Catalog and directory
    // =========================================================================

    /// Service catalog of `owner_id`, always fetched fresh
    pub async fn list_services(&self, owner_id: i64) -> Result<Vec<Service>> {
        self.settle(self.source.list_services(owner_id).await).await
    }

    pub async fn find_service(&self, owner_id: i64, service_id: i64) -> Result<Service> {
        self.list_services(owner_id)
            .await?
            .into_iter()
            .find(|service| service.id == service_id)
            .ok_or_else(|| LaundryError::not_found(SERVICE, service_id))
    }

    /// Admins of `owner_id`, served from cache within the TTL
    pub async fn admins(&self, owner_id: i64) -> Result<Vec<Admin>> {
        let result = self
            .directory
            .admins(owner_id, || self.source.list_admins(owner_id))
            .await;
        self.settle(result).await
    }

    /// Profile of the session's owner, served from cache within the TTL
    pub async fn owner_profile(&self) -> Result<OwnerProfile> {
        let owner_id = self
            .session
            .owner_id()
            .ok_or(ValidationError::OwnerMissing)?;

        let result = self
            .directory
            .owner(owner_id, || async {
                self.source
                    .get_owner(owner_id)
                    .await?
                    .ok_or_else(|| LaundryError::not_found(OWNER, owner_id))
            })
            .await;
        self.settle(result).await
    }
}

/// Fields written when an order is priced
fn pricing_patch(service: &Service, priced: &PricingResult) -> OrderPatch {
    // The quantity of the other billing type is cleared
    let (berat, jumlah_satuan) = match priced.billing {
        BillingType::Weight => (Some(priced.weight_kg()), Some(None)),
        BillingType::Unit => (Some(None), Some(priced.unit_count())),
    };

    OrderPatch {
        layanan: Some(service.nama_layanan.clone()),
        berat,
        jumlah_satuan,
        harga_layanan: Some(priced.unit_price),
        jumlah_harga: Some(priced.total_price),
        status: Some(OrderStatus::Selesai),
        ..OrderPatch::default()
    }
}
