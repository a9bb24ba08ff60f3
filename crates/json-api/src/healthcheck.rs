//! Promo Code JSON API Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use promocode_app::context::StoreKind;

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Partner store backing the service (`postgres` or `in-memory`)
    pub store: String,
}

/// Healthcheck handler
///
/// Returns service health status
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let store = match state.app.store {
        StoreKind::Postgres => "postgres",
        StoreKind::InMemory => "in-memory",
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        store: store.to_string(),
    }))
}
