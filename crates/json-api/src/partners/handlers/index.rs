//! Partner Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use promocode_app::domain::partners::data::PartnerFilter;

use crate::{
    extensions::*,
    partners::{errors::into_status_error, models::PartnerResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PartnersResponse {
    /// The list of partners
    pub partners: Vec<PartnerResponse>,
}

/// Partner Index Handler
///
/// Returns a list of partners, optionally filtered by activity.
#[endpoint(tags("partners"), summary = "List Partners")]
pub(crate) async fn handler(
    active: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<PartnersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let partners = state
        .app
        .partners
        .list_partners(PartnerFilter {
            is_active: active.into_inner(),
        })
        .await
        .map_err(into_status_error)?;

    Ok(Json(PartnersResponse {
        partners: partners.into_iter().map(Into::into).collect(),
    }))
}
