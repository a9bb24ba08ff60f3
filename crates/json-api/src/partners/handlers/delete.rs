//! Delete Partner Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, partners::errors::into_status_error, state::State};

/// Delete Partner Handler
#[endpoint(
    tags("partners"),
    summary = "Delete Partner",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Partner deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Partner not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    partner: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .partners
        .delete_partner(partner.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
