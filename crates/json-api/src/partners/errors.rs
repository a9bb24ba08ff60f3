//! Partner Errors

use salvo::http::StatusError;
use tracing::error;

use promocode_app::domain::partners::PartnersServiceError;

pub(crate) fn into_status_error(error: PartnersServiceError) -> StatusError {
    match error {
        PartnersServiceError::NotFound => StatusError::not_found().brief("Partner not found"),
        PartnersServiceError::LimitNotFound => {
            StatusError::not_found().brief("Partner limit not found")
        }
        PartnersServiceError::PartnerInactive
        | PartnersServiceError::InvalidLimit
        | PartnersServiceError::NoActiveLimit => {
            StatusError::bad_request().brief(error.to_string())
        }
        PartnersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Partner already exists")
        }
        PartnersServiceError::Conflict => {
            StatusError::conflict().brief("Partner was modified concurrently, retry the request")
        }
        PartnersServiceError::Storage(source) => {
            error!("partner store failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
