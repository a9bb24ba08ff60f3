//! Test helpers.

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use salvo::{affix_state::inject, prelude::*};

use promocode_app::{
    context::{AppContext, StoreKind},
    domain::partners::{
        MockPartnersService,
        records::{PartnerLimitRecord, PartnerLimitUuid, PartnerRecord, PartnerUuid},
        repository::InMemoryPartnersRepository,
    },
};

use crate::state::State;

pub(crate) fn make_limit(partner: PartnerUuid, limit: u64) -> PartnerLimitRecord {
    PartnerLimitRecord {
        uuid: PartnerLimitUuid::new(),
        partner_uuid: partner,
        limit,
        created_at: Timestamp::UNIX_EPOCH,
        ends_at: Timestamp::UNIX_EPOCH + SignedDuration::from_hours(24),
        cancelled_at: None,
    }
}

pub(crate) fn make_partner(uuid: PartnerUuid) -> PartnerRecord {
    PartnerRecord {
        uuid,
        name: "Super Toys".to_string(),
        is_active: true,
        number_issued_promo_codes: 0,
        limits: Vec::new(),
    }
}

pub(crate) fn state_with_partners(partners: MockPartnersService) -> Arc<State> {
    State::from_app_context(AppContext {
        store: StoreKind::InMemory,
        partners: Arc::new(partners),
        partners_repository: Arc::new(InMemoryPartnersRepository::default()),
    })
}

pub(crate) fn partners_service(partners: MockPartnersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_partners(partners)))
            .push(route),
    )
}
