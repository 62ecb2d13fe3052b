use crate::service::BrandService;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use brands_core::BrandEngine;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{instrument, warn};

pub const HEALTH_PATH: &str = "/__health";
pub const GTG_PATH: &str = "/__gtg";
pub const PING_PATH: &str = "/__ping";
pub const BUILD_INFO_PATH: &str = "/__build-info";

const SERVICE_NAME: &str = "public-brands-api";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthReport {
    schema_version: u8,
    name: &'static str,
    description: &'static str,
    checks: Vec<HealthCheck>,
    ok: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthCheck {
    name: &'static str,
    ok: bool,
    severity: u8,
    business_impact: &'static str,
    technical_summary: &'static str,
    panic_guide: &'static str,
    check_output: String,
    last_updated: DateTime<Utc>,
}

impl HealthCheck {
    fn store_connectivity(outcome: Result<(), String>) -> Self {
        let (ok, check_output) = match outcome {
            Ok(()) => (true, "connectivity to the concept store is ok".to_string()),
            Err(e) => (false, e),
        };
        Self {
            name: "Check connectivity to the concept store",
            ok,
            severity: 1,
            business_impact: "Unable to respond to public brand api requests",
            technical_summary: "Cannot connect to the concept store the brands are read from",
            panic_guide: "Check that the configured backend (BRANDS_BACKEND) is up and reachable",
            check_output,
            last_updated: Utc::now(),
        }
    }
}

/// Always a `200`; callers read `ok` from the body.
#[instrument(skip_all, name = "health#health")]
pub async fn health<T: BrandEngine>(State(service): State<BrandService<T>>) -> Response {
    let outcome = service
        .check_connectivity()
        .await
        .map_err(|e| format!("{e:?}"));
    let check = HealthCheck::store_connectivity(outcome);
    if !check.ok {
        warn!("health check failed: {}", check.check_output);
    }

    Json(HealthReport {
        schema_version: 1,
        name: "PublicBrandsRead Healthchecks",
        description: "Checks for accessing the concept store",
        ok: check.ok,
        checks: vec![check],
    })
    .into_response()
}

#[instrument(skip_all, name = "health#gtg")]
pub async fn good_to_go<T: BrandEngine>(State(service): State<BrandService<T>>) -> Response {
    match service.check_connectivity().await {
        Ok(()) => (StatusCode::OK, "OK").into_response(),
        Err(e) => {
            warn!("not good to go: {e:?}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "the concept store is not reachable",
            )
                .into_response()
        }
    }
}

pub async fn ping() -> &'static str {
    "pong"
}

#[derive(Debug, Serialize)]
pub struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

pub async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}
