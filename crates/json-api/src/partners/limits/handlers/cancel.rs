//! Cancel Partner Limit Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    partners::{errors::into_status_error, models::PartnerLimitResponse},
    state::State,
};

/// Cancel Partner Limit Handler
///
/// Cancels the partner's active limit. The issued promo code counter is left
/// untouched.
#[endpoint(
    tags("partners"),
    summary = "Cancel Partner Limit",
    responses(
        (status_code = StatusCode::OK, description = "Limit cancelled"),
        (status_code = StatusCode::NOT_FOUND, description = "Partner not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Partner inactive or without an active limit"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    partner: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PartnerLimitResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let limit = state
        .app
        .partners
        .cancel_partner_limit(partner.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(limit.into()))
}
