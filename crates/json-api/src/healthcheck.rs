//! Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{errors::ApiError, extensions::*, state::State};

/// Build details reported by the healthcheck.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SystemInfo {
    /// Deployment environment
    pub environment: String,

    /// Server version
    pub version: String,
}

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    /// Service status
    pub status: String,

    pub system_info: SystemInfo,
}

/// Healthcheck handler
///
/// Returns service health status
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    Ok(Json(HealthResponse {
        status: "available".to_string(),
        system_info: SystemInfo {
            environment: state.environment.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    }))
}
