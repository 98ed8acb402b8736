#![cfg(feature = "server")]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bps_kernel::domain::config::ApiConfig;
use bps_kernel::domain::registry::{FeatureSlice, InitializedSlice};
use bps_kernel::server::router::system_router;
use bps_kernel::server::{ApiState, ApiStateError, HealthResponse};
use http_body_util::BodyExt;
use std::any::{Any, TypeId};
use tower::ServiceExt;

#[derive(Debug)]
struct Depot {
    name: &'static str,
}

impl FeatureSlice for Depot {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct Unregistered;

impl FeatureSlice for Unregistered {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn state_requires_config() {
    let err = ApiState::builder().build().expect_err("config is mandatory");
    assert!(matches!(err, ApiStateError::Validation { .. }));
}

#[test]
fn slices_are_found_by_type() {
    let state = ApiState::builder()
        .config(ApiConfig::default())
        .register_slices([InitializedSlice::new(Depot { name: "norfolk" })])
        .build()
        .expect("state builds");

    assert_eq!(state.get_slice::<Depot>().map(|d| d.name), Some("norfolk"));
    assert_eq!(state.slice_ids().copied().collect::<Vec<_>>(), vec![TypeId::of::<Depot>()]);

    let err = state.try_get_slice::<Unregistered>().expect_err("not registered");
    assert!(matches!(err, ApiStateError::MissingSlice { .. }));
}

#[tokio::test]
async fn health_reports_up_without_caching() -> Result<(), Box<dyn std::error::Error>> {
    let (router, api) = system_router::<()>().split_for_parts();
    assert!(api.paths.paths.contains_key("/health"));

    let response =
        router.oneshot(Request::builder().uri("/health").body(Body::empty())?).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).and_then(|v| v.to_str().ok()),
        Some("no-store, no-cache, must-revalidate")
    );

    let bytes = response.into_body().collect().await?.to_bytes();
    let health: HealthResponse = serde_json::from_slice(&bytes)?;
    assert_eq!(health.status, "up");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[test]
fn state_types_are_reexported_at_the_crate_root() {
    let state: bps_kernel::ApiState = ApiState::builder()
        .config(bps_kernel::ApiConfig::default())
        .register_slices([InitializedSlice::new(Depot { name: "suffolk" })])
        .build()
        .expect("state builds");

    let found: Result<&Depot, bps_kernel::ApiStateError> = state.try_get_slice::<Depot>();
    assert_eq!(found.map(|d| d.name).ok(), Some("suffolk"));
}
