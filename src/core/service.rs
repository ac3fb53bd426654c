//! The persistence seam of the order core

use crate::core::catalog::{Admin, OwnerProfile, Service};
use crate::core::error::Result;
use crate::core::order::{CreateOrderRecord, Order, OrderPatch};
use async_trait::async_trait;

/// Everything the order core reads from and writes to the collaborator
///
/// There is exactly one implementation per backend and no fallback between
/// them. "Absent" is reported as `Ok(None)` / `Ok(false)`, never as an
/// error; the manager decides how absence surfaces to the caller.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Persist a new order and return it with its assigned id
    async fn create_order(&self, record: &CreateOrderRecord) -> Result<Order>;

    /// Get an order by id
    async fn get_order(&self, id: i64) -> Result<Option<Order>>;

    /// List all orders of one owner
    async fn list_orders(&self, owner_id: i64) -> Result<Vec<Order>>;

    /// Change the supplied fields of an order
    async fn update_order(&self, id: i64, patch: &OrderPatch) -> Result<Option<Order>>;

    /// Delete an order; `true` only when a record was removed
    async fn delete_order(&self, id: i64) -> Result<bool>;

    /// List the service catalog of one owner
    async fn list_services(&self, owner_id: i64) -> Result<Vec<Service>>;

    /// List the admins of one owner
    async fn list_admins(&self, owner_id: i64) -> Result<Vec<Admin>>;

    /// Get an owner profile
    async fn get_owner(&self, owner_id: i64) -> Result<Option<OwnerProfile>>;
}
