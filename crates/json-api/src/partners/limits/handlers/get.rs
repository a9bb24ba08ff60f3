//! Get Partner Limit Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    partners::{errors::into_status_error, models::PartnerLimitResponse},
    state::State,
};

/// Get Partner Limit Handler
///
/// Returns one limit from the partner's history; this is the resource a
/// created limit's `Location` header points at.
#[endpoint(
    tags("partners"),
    summary = "Get Partner Limit",
    responses(
        (status_code = StatusCode::OK, description = "Limit found"),
        (status_code = StatusCode::NOT_FOUND, description = "Partner or limit not found"),
    ),
)]
pub(crate) async fn handler(
    partner: PathParam<Uuid>,
    limit: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PartnerLimitResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let limit = state
        .app
        .partners
        .get_partner_limit(partner.into_inner().into(), limit.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(limit.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use promocode_app::domain::partners::{
        MockPartnersService, PartnersServiceError,
        records::{PartnerLimitUuid, PartnerUuid},
    };

    use crate::test_helpers::{make_limit, partners_service};

    use super::*;

    fn make_service(partners: MockPartnersService) -> Service {
        partners_service(
            partners,
            Router::with_path("partners/{partner}/limits/{limit}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_limit_returns_200() -> TestResult {
        let partner = PartnerUuid::new();
        let limit = make_limit(partner, 25);
        let limit_uuid = limit.uuid;

        let mut partners = MockPartnersService::new();

        partners
            .expect_get_partner_limit()
            .once()
            .withf(move |p, l| *p == partner && *l == limit_uuid)
            .return_once(move |_, _| Ok(limit));

        let mut res = TestClient::get(format!(
            "http://example.com/partners/{partner}/limits/{limit_uuid}"
        ))
        .send(&make_service(partners))
        .await;

        let body: PartnerLimitResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, limit_uuid.into_uuid());
        assert_eq!(body.limit, 25);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_limit_returns_404() -> TestResult {
        let partner = PartnerUuid::new();
        let limit = PartnerLimitUuid::new();

        let mut partners = MockPartnersService::new();

        partners
            .expect_get_partner_limit()
            .once()
            .return_once(|_, _| Err(PartnersServiceError::LimitNotFound));

        let res = TestClient::get(format!(
            "http://example.com/partners/{partner}/limits/{limit}"
        ))
        .send(&make_service(partners))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
