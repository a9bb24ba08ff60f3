//! Partner Models

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use promocode_app::domain::partners::records::{PartnerLimitRecord, PartnerRecord};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PartnerLimitResponse {
    /// The unique identifier of the limit
    pub uuid: Uuid,

    /// The partner the limit belongs to
    pub partner_uuid: Uuid,

    /// Maximum number of promo codes issuable under the limit
    pub limit: u64,

    /// The date and time the limit was created
    pub created_at: String,

    /// The date and time the limit expires
    pub ends_at: String,

    /// The date and time the limit was cancelled
    pub cancelled_at: Option<String>,
}

impl From<PartnerLimitRecord> for PartnerLimitResponse {
    fn from(limit: PartnerLimitRecord) -> Self {
        PartnerLimitResponse {
            uuid: limit.uuid.into(),
            partner_uuid: limit.partner_uuid.into(),
            limit: limit.limit,
            created_at: limit.created_at.to_string(),
            ends_at: limit.ends_at.to_string(),
            cancelled_at: limit.cancelled_at.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PartnerResponse {
    /// The unique identifier of the partner
    pub uuid: Uuid,

    /// The partner's display name
    pub name: String,

    /// Whether the partner may receive limits
    pub is_active: bool,

    /// Promo codes issued under the current limit
    pub number_issued_promo_codes: u64,

    /// The partner's limit history, oldest first
    pub limits: Vec<PartnerLimitResponse>,
}

impl From<PartnerRecord> for PartnerResponse {
    fn from(partner: PartnerRecord) -> Self {
        PartnerResponse {
            uuid: partner.uuid.into(),
            name: partner.name,
            is_active: partner.is_active,
            number_issued_promo_codes: partner.number_issued_promo_codes,
            limits: partner.limits.into_iter().map(Into::into).collect(),
        }
    }
}
