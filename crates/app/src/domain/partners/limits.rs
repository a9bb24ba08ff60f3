//! Partner Limit Rules
//!
//! Pure state transitions over a [`PartnerRecord`]. Every check runs before the
//! first write, so a rejected request leaves the aggregate untouched. Callers
//! must serialize calls per partner to keep at most one active limit.

use jiff::Timestamp;
use thiserror::Error;

use crate::domain::partners::{
    data::NewPartnerLimit,
    records::{PartnerLimitRecord, PartnerLimitUuid, PartnerRecord, PartnerUuid},
};

/// Limit rule rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LimitRuleError {
    #[error("partner is not active")]
    PartnerInactive,

    #[error("limit must be greater than 0")]
    InvalidLimit,

    #[error("partner has no active limit")]
    NoActiveLimit,
}

/// Outcome of installing a new limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitChange {
    /// Partner the limit was installed on.
    pub partner: PartnerUuid,

    /// Newly created, active limit.
    pub created: PartnerLimitUuid,

    /// Previously active limit that was cancelled, if there was one.
    pub cancelled: Option<PartnerLimitUuid>,
}

/// Install a new limit on `partner`, cancelling the active one.
///
/// The issuance counter is reset only when an active limit was cancelled.
///
/// # Errors
///
/// Returns [`LimitRuleError::PartnerInactive`] for inactive partners, then
/// [`LimitRuleError::InvalidLimit`] when the requested limit is not positive.
pub fn set_limit(
    partner: &mut PartnerRecord,
    request: &NewPartnerLimit,
    now: Timestamp,
) -> Result<LimitChange, LimitRuleError> {
    if !partner.is_active {
        return Err(LimitRuleError::PartnerInactive);
    }

    let limit = u64::try_from(request.limit)
        .ok()
        .filter(|limit| *limit > 0)
        .ok_or(LimitRuleError::InvalidLimit)?;

    let cancelled = partner.active_limit_mut().map(|active| {
        active.cancelled_at = Some(now);
        active.uuid
    });

    if cancelled.is_some() {
        partner.number_issued_promo_codes = 0;
    }

    let created = PartnerLimitUuid::new();

    partner.limits.push(PartnerLimitRecord {
        uuid: created,
        partner_uuid: partner.uuid,
        limit,
        created_at: now,
        ends_at: request.ends_at,
        cancelled_at: None,
    });

    Ok(LimitChange {
        partner: partner.uuid,
        created,
        cancelled,
    })
}

/// Cancel the active limit on `partner` without installing a replacement.
///
/// # Errors
///
/// Returns [`LimitRuleError::PartnerInactive`] for inactive partners, then
/// [`LimitRuleError::NoActiveLimit`] when nothing is active.
pub fn cancel_limit(
    partner: &mut PartnerRecord,
    now: Timestamp,
) -> Result<PartnerLimitUuid, LimitRuleError> {
    if !partner.is_active {
        return Err(LimitRuleError::PartnerInactive);
    }

    let active = partner
        .active_limit_mut()
        .ok_or(LimitRuleError::NoActiveLimit)?;

    active.cancelled_at = Some(now);

    Ok(active.uuid)
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, ToSpan};
    use testresult::TestResult;

    use super::*;

    fn now() -> Timestamp {
        Timestamp::now()
    }

    fn days(n: i64) -> SignedDuration {
        SignedDuration::from_hours(24 * n)
    }

    fn active_partner() -> PartnerRecord {
        PartnerRecord {
            uuid: PartnerUuid::new(),
            name: "Test Partner".to_string(),
            is_active: true,
            number_issued_promo_codes: 50,
            limits: Vec::new(),
        }
    }

    fn with_limit(mut partner: PartnerRecord, cancelled_at: Option<Timestamp>) -> PartnerRecord {
        partner.limits.push(PartnerLimitRecord {
            uuid: PartnerLimitUuid::new(),
            partner_uuid: partner.uuid,
            limit: 100,
            created_at: now() - days(10),
            ends_at: now() + days(30),
            cancelled_at,
        });

        partner
    }

    fn request(limit: i64) -> NewPartnerLimit {
        NewPartnerLimit {
            limit,
            ends_at: now() + days(60),
        }
    }

    fn active_count(partner: &PartnerRecord) -> usize {
        partner.limits.iter().filter(|l| l.is_active()).count()
    }

    #[test]
    fn inactive_partner_is_rejected_without_changes() {
        let mut partner = with_limit(active_partner(), None);
        partner.is_active = false;
        let before = partner.clone();

        let result = set_limit(&mut partner, &request(150), now());

        assert_eq!(result, Err(LimitRuleError::PartnerInactive));
        assert_eq!(partner, before, "rejected request must not mutate");
    }

    #[test]
    fn inactive_check_runs_before_limit_check() {
        let mut partner = active_partner();
        partner.is_active = false;

        let result = set_limit(&mut partner, &request(0), now());

        assert_eq!(result, Err(LimitRuleError::PartnerInactive));
    }

    #[test]
    fn non_positive_limits_are_rejected() {
        for limit in [0, -1, -10, -100] {
            let mut partner = with_limit(active_partner(), None);
            let before = partner.clone();

            let result = set_limit(&mut partner, &request(limit), now());

            assert_eq!(result, Err(LimitRuleError::InvalidLimit), "limit {limit}");
            assert_eq!(partner, before, "limit {limit} must not mutate");
            assert_eq!(partner.number_issued_promo_codes, 50);
        }
    }

    #[test]
    fn active_limit_is_cancelled_and_counter_reset() -> TestResult {
        let mut partner = with_limit(active_partner(), None);
        let previous = partner.active_limit().ok_or("missing active limit")?.uuid;
        let at = now();

        let change = set_limit(&mut partner, &request(150), at)?;

        let old = partner.find_limit(previous).ok_or("old limit vanished")?;
        let new = partner.find_limit(change.created).ok_or("new limit missing")?;

        assert_eq!(change.cancelled, Some(previous));
        assert_eq!(old.cancelled_at, Some(at));
        assert_eq!(partner.number_issued_promo_codes, 0);
        assert_eq!(partner.limits.len(), 2);
        assert_eq!(new.limit, 150);
        assert!(new.is_active());
        assert_eq!(active_count(&partner), 1);

        Ok(())
    }

    #[test]
    fn cancelled_only_history_keeps_counter() -> TestResult {
        let mut partner = with_limit(active_partner(), Some(now() - days(5)));

        let change = set_limit(&mut partner, &request(150), now())?;

        assert_eq!(change.cancelled, None);
        assert_eq!(partner.number_issued_promo_codes, 50);
        assert_eq!(partner.limits.len(), 2);
        assert_eq!(active_count(&partner), 1);

        Ok(())
    }

    #[test]
    fn first_limit_is_created_with_request_values() -> TestResult {
        let mut partner = active_partner();
        let req = request(150);
        let at = now();

        let change = set_limit(&mut partner, &req, at)?;

        assert_eq!(partner.number_issued_promo_codes, 50);
        assert_eq!(partner.limits.len(), 1);

        let created = partner.limits.last().ok_or("no limit created")?;

        assert_eq!(created.uuid, change.created);
        assert_eq!(created.partner_uuid, partner.uuid);
        assert_eq!(change.partner, partner.uuid);
        assert_eq!(created.limit, 150);
        assert_eq!(created.ends_at, req.ends_at);
        assert_eq!(created.created_at, at);
        assert!(created.cancelled_at.is_none());

        Ok(())
    }

    #[test]
    fn repeated_calls_are_not_idempotent() -> TestResult {
        let mut partner = active_partner();
        let req = request(150);

        let first = set_limit(&mut partner, &req, now())?;
        let second = set_limit(&mut partner, &req, now() + 1.second())?;

        assert_ne!(first.created, second.created);
        assert_eq!(second.cancelled, Some(first.created));
        assert_eq!(partner.limits.len(), 2);
        assert_eq!(active_count(&partner), 1);

        Ok(())
    }

    #[test]
    fn at_most_one_limit_stays_active() -> TestResult {
        let mut partner = active_partner();

        assert_eq!(active_count(&partner), 0);

        for limit in 1..=5 {
            set_limit(&mut partner, &request(limit), now())?;

            assert_eq!(active_count(&partner), 1);
        }

        assert_eq!(partner.limits.len(), 5);

        Ok(())
    }

    #[test]
    fn cancel_limit_cancels_active_limit_only() -> TestResult {
        let mut partner = with_limit(active_partner(), None);
        let at = now();

        let cancelled = cancel_limit(&mut partner, at)?;

        let record = partner.find_limit(cancelled).ok_or("limit missing")?;

        assert_eq!(record.cancelled_at, Some(at));
        assert_eq!(active_count(&partner), 0);
        assert_eq!(partner.number_issued_promo_codes, 50);

        Ok(())
    }

    #[test]
    fn cancel_limit_without_active_limit_fails() {
        let mut partner = with_limit(active_partner(), Some(now() - days(1)));
        let before = partner.clone();

        let result = cancel_limit(&mut partner, now());

        assert_eq!(result, Err(LimitRuleError::NoActiveLimit));
        assert_eq!(partner, before);
    }

    #[test]
    fn cancel_limit_on_inactive_partner_fails() {
        let mut partner = with_limit(active_partner(), None);
        partner.is_active = false;

        let result = cancel_limit(&mut partner, now());

        assert_eq!(result, Err(LimitRuleError::PartnerInactive));
        assert!(partner.active_limit().is_some());
    }
}
