//! Set Partner Limit Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use promocode_app::domain::partners::data::NewPartnerLimit;

use crate::{
    extensions::*,
    partners::{errors::into_status_error, models::PartnerLimitResponse},
    state::State,
};

/// Set Partner Limit Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetPartnerLimitRequest {
    /// Maximum promo codes issuable under the new limit; must be positive
    pub limit: i64,

    /// Expiry of the new limit as an RFC 3339 timestamp
    pub ends_at: String,
}

/// Set Partner Limit Handler
///
/// Cancels the partner's active limit, if any, resetting its issued promo
/// code counter, and installs a new active limit.
#[endpoint(
    tags("partners"),
    summary = "Set Partner Limit",
    responses(
        (status_code = StatusCode::CREATED, description = "Limit created"),
        (status_code = StatusCode::NOT_FOUND, description = "Partner not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Partner inactive or invalid limit"),
        (status_code = StatusCode::CONFLICT, description = "Concurrent limit update"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    partner: PathParam<Uuid>,
    json: JsonBody<SetPartnerLimitRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PartnerLimitResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let new_limit = NewPartnerLimit {
        limit: request.limit,
        ends_at: request.ends_at.parse_timestamp_or_400("ends_at")?,
    };

    let limit = state
        .app
        .partners
        .set_partner_limit(partner.into_inner().into(), new_limit)
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/partners/{}/limits/{}", limit.partner_uuid, limit.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(limit.into()))
}
