//! `/healthz` response body.
//!
//! ```json
//! {"status": "ok", "components": {"db": "ok"}}
//! ```
//! `200 OK` when healthy, `503 Service Unavailable` otherwise.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::health::{ComponentStatus, HealthStatus, ReadinessSnapshot};

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub components: BTreeMap<String, ComponentStatus>,
    #[serde(skip)]
    health: HealthStatus,
}

impl HealthReport {
    pub fn health(&self) -> HealthStatus {
        self.health
    }

    pub fn status_code(&self) -> StatusCode {
        match self.health {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<ReadinessSnapshot> for HealthReport {
    fn from(snapshot: ReadinessSnapshot) -> Self {
        let status = match snapshot.status {
            HealthStatus::Healthy => "ok",
            HealthStatus::Unhealthy => "unavailable",
        };
        Self {
            status,
            components: snapshot.components,
            health: snapshot.status,
        }
    }
}

impl IntoResponse for HealthReport {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
