//! Partner seed data for the in-memory store.

use jiff::{SignedDuration, Timestamp};
use uuid::Uuid;

use crate::domain::partners::records::{
    PartnerLimitRecord, PartnerLimitUuid, PartnerRecord, PartnerUuid,
};

pub const SUPER_TOYS: PartnerUuid =
    PartnerUuid::from_uuid(Uuid::from_u128(0x7d99_4823_8226_4273_b50c_0c0d_f6b2_6a41));

pub const CATS_FOR_EVERYONE: PartnerUuid =
    PartnerUuid::from_uuid(Uuid::from_u128(0x894b_6e9b_eb5f_406c_aefa_8ccb_35d3_9319));

pub const DREAM_FISH: PartnerUuid =
    PartnerUuid::from_uuid(Uuid::from_u128(0x0da6_5561_cf56_4942_bff2_22f5_0ae7_0e8e));

const DAY: SignedDuration = SignedDuration::from_hours(24);

/// Build a fresh copy of the seed partners.
///
/// Dates are relative to `now`: one partner with an active limit, one with
/// only a cancelled limit and an inactive one with no limits.
#[must_use]
pub fn partners(now: Timestamp) -> Vec<PartnerRecord> {
    vec![
        PartnerRecord {
            uuid: SUPER_TOYS,
            name: "Super Toys".to_string(),
            is_active: true,
            number_issued_promo_codes: 100,
            limits: vec![PartnerLimitRecord {
                uuid: PartnerLimitUuid::from_uuid(Uuid::from_u128(
                    0x0e00_633a_5978_4f0a_8f2e_0b2d_3a0f_2f11,
                )),
                partner_uuid: SUPER_TOYS,
                limit: 1_000,
                created_at: now - DAY * 30,
                ends_at: now + DAY * 30,
                cancelled_at: None,
            }],
        },
        PartnerRecord {
            uuid: CATS_FOR_EVERYONE,
            name: "Cats for Everyone".to_string(),
            is_active: true,
            number_issued_promo_codes: 25,
            limits: vec![PartnerLimitRecord {
                uuid: PartnerLimitUuid::from_uuid(Uuid::from_u128(
                    0xc9be_f066_3c3f_4d1a_b2a3_9c40_e2c9_7b1f,
                )),
                partner_uuid: CATS_FOR_EVERYONE,
                limit: 100,
                created_at: now - DAY * 60,
                ends_at: now - DAY * 20,
                cancelled_at: Some(now - DAY * 25),
            }],
        },
        PartnerRecord {
            uuid: DREAM_FISH,
            name: "Fish of Your Dreams".to_string(),
            is_active: false,
            number_issued_promo_codes: 0,
            limits: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_partners_hold_at_most_one_active_limit() {
        for partner in partners(Timestamp::now()) {
            let active = partner.limits.iter().filter(|l| l.is_active()).count();

            assert!(active <= 1, "{} has {active} active limits", partner.name);

            for limit in &partner.limits {
                assert_eq!(limit.partner_uuid, partner.uuid);
            }
        }
    }

    #[test]
    fn each_call_returns_independent_records() {
        let now = Timestamp::now();
        let mut first = partners(now);
        let second = partners(now);

        if let Some(partner) = first.first_mut() {
            partner.number_issued_promo_codes = 0;
        }

        assert_ne!(first, second, "mutating one seed must not affect another");
    }
}
