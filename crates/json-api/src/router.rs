//! App Router

use salvo::Router;

use crate::{healthcheck, partners};

pub fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("partners")
                .get(partners::index::handler)
                .post(partners::create::handler)
                .push(
                    Router::with_path("{partner}")
                        .get(partners::get::handler)
                        .delete(partners::delete::handler)
                        .push(
                            Router::with_path("limits")
                                .post(partners::limits::set::handler)
                                .delete(partners::limits::cancel::handler)
                                .push(
                                    Router::with_path("{limit}")
                                        .get(partners::limits::get::handler),
                                ),
                        ),
                ),
        )
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use salvo::{
        affix_state::inject,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use promocode_app::{context::AppContext, domain::partners::seed};

    use crate::{
        partners::models::{PartnerLimitResponse, PartnerResponse},
        state::State,
    };

    use super::*;

    fn seeded_service() -> Service {
        let app = AppContext::in_memory(seed::partners(Timestamp::now()));

        Service::new(
            Router::new()
                .hoop(inject(State::from_app_context(app)))
                .push(app_router()),
        )
    }

    fn ends_at() -> String {
        (Timestamp::now() + SignedDuration::from_hours(24 * 30)).to_string()
    }

    #[tokio::test]
    async fn set_limit_replaces_active_limit_and_resets_counter() -> TestResult {
        let service = seeded_service();
        let partner = seed::SUPER_TOYS;

        let mut res = TestClient::post(format!("http://example.com/partners/{partner}/limits"))
            .json(&json!({ "limit": 500, "ends_at": ends_at() }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let location = res
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned)
            .ok_or("missing location header")?;

        let created: PartnerLimitResponse = res.take_json().await?;

        let fetched: PartnerLimitResponse = TestClient::get(format!("http://example.com{location}"))
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(fetched.uuid, created.uuid);

        let partner: PartnerResponse = TestClient::get(format!("http://example.com/partners/{partner}"))
            .send(&service)
            .await
            .take_json()
            .await?;

        let active = partner
            .limits
            .iter()
            .filter(|limit| limit.cancelled_at.is_none())
            .count();

        assert_eq!(partner.number_issued_promo_codes, 0);
        assert_eq!(partner.limits.len(), 2);
        assert_eq!(active, 1, "exactly one limit should remain active");

        Ok(())
    }

    #[tokio::test]
    async fn set_limit_keeps_counter_without_active_limit() -> TestResult {
        let service = seeded_service();
        let partner = seed::CATS_FOR_EVERYONE;

        let res = TestClient::post(format!("http://example.com/partners/{partner}/limits"))
            .json(&json!({ "limit": 10, "ends_at": ends_at() }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let partner: PartnerResponse = TestClient::get(format!("http://example.com/partners/{partner}"))
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(partner.number_issued_promo_codes, 25);

        Ok(())
    }

    #[tokio::test]
    async fn set_limit_on_inactive_partner_returns_400() -> TestResult {
        let partner = seed::DREAM_FISH;

        let res = TestClient::post(format!("http://example.com/partners/{partner}/limits"))
            .json(&json!({ "limit": 10, "ends_at": ends_at() }))
            .send(&seeded_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn list_and_healthcheck_routes_resolve() -> TestResult {
        let service = seeded_service();

        let list = TestClient::get("http://example.com/partners?active=true")
            .send(&service)
            .await;
        let health = TestClient::get("http://example.com/healthcheck")
            .send(&service)
            .await;

        assert_eq!(list.status_code, Some(StatusCode::OK));
        assert_eq!(health.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
