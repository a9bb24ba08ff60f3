//! Create Partner Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use promocode_app::domain::partners::{data::NewPartner, records::PartnerUuid};

use crate::{
    extensions::*,
    partners::{errors::into_status_error, models::PartnerResponse},
    state::State,
};

const fn default_is_active() -> bool {
    true
}

/// Create Partner Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePartnerRequest {
    /// Partner UUID; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub name: String,

    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

impl From<CreatePartnerRequest> for NewPartner {
    fn from(request: CreatePartnerRequest) -> Self {
        NewPartner {
            uuid: request.uuid.map_or_else(PartnerUuid::new, PartnerUuid::from_uuid),
            name: request.name,
            is_active: request.is_active,
        }
    }
}

/// Create Partner Handler
#[endpoint(
    tags("partners"),
    summary = "Create Partner",
    responses(
        (status_code = StatusCode::CREATED, description = "Partner created"),
        (status_code = StatusCode::CONFLICT, description = "Partner already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePartnerRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PartnerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let partner = state
        .app
        .partners
        .create_partner(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/partners/{}", partner.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(partner.into()))
}
