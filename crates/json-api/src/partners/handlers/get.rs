//! Get Partner Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    partners::{errors::into_status_error, models::PartnerResponse},
    state::State,
};

/// Get Partner Handler
///
/// Returns a partner with its limit history.
#[endpoint(
    tags("partners"),
    summary = "Get Partner",
    responses(
        (status_code = StatusCode::OK, description = "Partner found"),
        (status_code = StatusCode::NOT_FOUND, description = "Partner not found"),
    ),
)]
pub(crate) async fn handler(
    partner: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PartnerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let partner = state
        .app
        .partners
        .get_partner(partner.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(partner.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use promocode_app::domain::partners::{
        MockPartnersService, PartnersServiceError, records::PartnerUuid,
    };

    use crate::test_helpers::{make_partner, partners_service};

    use super::*;

    fn make_service(partners: MockPartnersService) -> Service {
        partners_service(partners, Router::with_path("partners/{partner}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_200() -> TestResult {
        let uuid = PartnerUuid::new();

        let mut partners = MockPartnersService::new();

        partners
            .expect_get_partner()
            .once()
            .withf(move |p| *p == uuid)
            .return_once(move |_| Ok(make_partner(uuid)));

        let mut res = TestClient::get(format!("http://example.com/partners/{uuid}"))
            .send(&make_service(partners))
            .await;

        let body: PartnerResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.name, "Super Toys");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_partner_returns_404() -> TestResult {
        let uuid = PartnerUuid::new();

        let mut partners = MockPartnersService::new();

        partners
            .expect_get_partner()
            .once()
            .withf(move |p| *p == uuid)
            .return_once(|_| Err(PartnersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/partners/{uuid}"))
            .send(&make_service(partners))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_invalid_uuid_returns_400() -> TestResult {
        let mut partners = MockPartnersService::new();

        partners.expect_get_partner().never();

        let res = TestClient::get("http://example.com/partners/not-a-uuid")
            .send(&make_service(partners))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
