//! REST implementation of DataSource over the laundry backend API
//!
//! | Operation      | Request                        |
//! |----------------|--------------------------------|
//! | create order   | `POST /pesanan`                |
//! | list orders    | `GET /pesanan?id_owner={id}`   |
//! | get order      | `GET /pesanan/{id}`            |
//! | update order   | `PUT /pesanan/{id}`            |
//! | delete order   | `DELETE /pesanan/{id}`         |
//! | list services  | `GET /layanan?id_owner={id}`   |
//! | list admins    | `GET /admin?id_owner={id}`     |
//! | owner profile  | `GET /owner/{id}`              |
//!
//! Every request carries `Authorization: Bearer <token>` taken from the
//! session. Nothing is retried here.

use crate::config::ClientConfig;
use crate::core::catalog::{Admin, OwnerProfile, Service};
use crate::core::error::{LaundryError, Result, ValidationError};
use crate::core::order::{CreateOrderRecord, Order, OrderPatch};
use crate::core::service::DataSource;
use crate::core::session::SessionContext;
use crate::core::wire::unwrap_envelope;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Data source backed by the laundry REST API
#[derive(Clone)]
pub struct RestDataSource {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionContext>,
}

impl RestDataSource {
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionContext>) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| LaundryError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(ACCEPT, "application/json");

        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and classify; `Ok(None)` on 404
    async fn send(&self, builder: RequestBuilder) -> Result<Option<Response>> {
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(
            status = status.as_u16(),
            url = %response.url(),
            "collaborator responded"
        );

        if status.is_success() {
            return Ok(Some(response));
        }
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_failure(status, &body))
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Option<T>> {
        match self.send(builder).await? {
            Some(response) => Ok(Some(decode(response).await?)),
            None => Ok(None),
        }
    }

    /// Like `fetch`, but a 404 on a collection route is an empty list
    async fn fetch_list<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Vec<T>> {
        Ok(self.fetch::<Vec<T>>(builder).await?.unwrap_or_default())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let raw: Value = response.json().await?;
    Ok(serde_json::from_value(unwrap_envelope(raw))?)
}

/// Map a non-success, non-404 response onto the error taxonomy
fn classify_failure(status: StatusCode, body: &str) -> LaundryError {
    if status == StatusCode::UNAUTHORIZED {
        return LaundryError::Auth;
    }
    if status.is_client_error() {
        return ValidationError::Rejected(server_message(body).unwrap_or_else(|| {
            format!("Permintaan ditolak server ({})", status.as_u16())
        }))
        .into();
    }
    LaundryError::Transient {
        message: server_message(body)
            .unwrap_or_else(|| format!("server error {}", status.as_u16())),
        status: Some(status.as_u16()),
    }
}

/// The `message` field of a JSON error body, if any
fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl DataSource for RestDataSource {
    async fn create_order(&self, record: &CreateOrderRecord) -> Result<Order> {
        let builder = self.request(Method::POST, "/pesanan").json(record);
        self.fetch(builder)
            .await?
            .ok_or_else(|| LaundryError::Decode("create returned 404".to_string()))
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>> {
        self.fetch(self.request(Method::GET, &format!("/pesanan/{}", id)))
            .await
    }

    async fn list_orders(&self, owner_id: i64) -> Result<Vec<Order>> {
        let builder = self
            .request(Method::GET, "/pesanan")
            .query(&[("id_owner", owner_id)]);
        self.fetch_list(builder).await
    }

    async fn update_order(&self, id: i64, patch: &OrderPatch) -> Result<Option<Order>> {
        let builder = self
            .request(Method::PUT, &format!("/pesanan/{}", id))
            .json(patch);
        self.fetch(builder).await
    }

    async fn delete_order(&self, id: i64) -> Result<bool> {
        let response = self
            .send(self.request(Method::DELETE, &format!("/pesanan/{}", id)))
            .await?;
        Ok(response.is_some())
    }

    /// Rows that fail to decode are skipped so the rest of the catalog
    /// stays usable
    async fn list_services(&self, owner_id: i64) -> Result<Vec<Service>> {
        let builder = self
            .request(Method::GET, "/layanan")
            .query(&[("id_owner", owner_id)]);
        let rows: Vec<Value> = self.fetch_list(builder).await?;

        let services = rows
            .into_iter()
            .filter_map(|row| {
                let service_id = row.get("id").cloned().unwrap_or(Value::Null);
                serde_json::from_value::<Service>(row)
                    .inspect_err(|e| {
                        tracing::warn!(
                            owner_id,
                            %service_id,
                            error = %e,
                            "skipping unreadable catalog row"
                        );
                    })
                    .ok()
            })
            .collect();
        Ok(services)
    }

    async fn list_admins(&self, owner_id: i64) -> Result<Vec<Admin>> {
        let builder = self
            .request(Method::GET, "/admin")
            .query(&[("id_owner", owner_id)]);
        self.fetch_list(builder).await
    }

    async fn get_owner(&self, owner_id: i64) -> Result<Option<OwnerProfile>> {
        self.fetch(self.request(Method::GET, &format!("/owner/{}", owner_id)))
            .await
    }
}
