//! `/info` and `/quote`.
//!
//! Both endpoints take a JSON body on GET as well as POST. A request only
//! counts as JSON when its `Content-Type` says so; anything else gets the
//! endpoint's usage text back (`400` on `/info`, `200` on `/quote`).

mod info;
mod quote;

pub use info::{InfoRequest, InfoResponse};
pub use quote::QuoteRequest;

use axum::http::{HeaderMap, header};
use bps::domain::order::OrderId;
use bps::kernel::prelude::ApiState;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub(crate) fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(info::info_handler))
        .routes(routes!(quote::quote_handler))
}

/// Whether the request declares a JSON body (`application/json`, parameters allowed).
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

/// Decodes a JSON object body into `T`; `None` when the request is not JSON or does not fit.
fn parse_body<T: DeserializeOwned>(headers: &HeaderMap, body: &[u8]) -> Option<T> {
    if !is_json(headers) {
        tracing::debug!("Request body is not declared as JSON");
        return None;
    }

    serde_json::from_slice(body)
        .inspect_err(|e| tracing::debug!(error = %e, "Rejected request body"))
        .ok()
}

/// An `order_id` as the client sent it.
///
/// Only non-negative integers name an order; any other value is kept so it
/// can be echoed back, and simply matches nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestedId(Value);

impl RequestedId {
    #[must_use]
    pub fn order_id(&self) -> Option<OrderId> {
        self.0.as_u64().map(OrderId)
    }
}

impl From<u64> for RequestedId {
    fn from(id: u64) -> Self {
        Self(Value::from(id))
    }
}

impl fmt::Display for RequestedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(text) => f.write_str(text),
            other => write!(f, "{other}"),
        }
    }
}
