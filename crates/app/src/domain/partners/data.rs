//! Partner Data

use jiff::Timestamp;

use crate::domain::partners::records::{PartnerRecord, PartnerUuid};

/// New Partner Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewPartner {
    /// UUID to assign to the partner.
    pub uuid: PartnerUuid,

    /// Partner name to persist.
    pub name: String,

    /// Whether the partner may receive limits.
    pub is_active: bool,
}

impl From<NewPartner> for PartnerRecord {
    fn from(partner: NewPartner) -> Self {
        Self {
            uuid: partner.uuid,
            name: partner.name,
            is_active: partner.is_active,
            number_issued_promo_codes: 0,
            limits: Vec::new(),
        }
    }
}

/// New Partner Limit Data
///
/// `limit` is signed so that zero and negative requests are rejected by the
/// limit rules rather than at deserialization.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPartnerLimit {
    /// Requested maximum number of promo codes.
    pub limit: i64,

    /// Requested expiry of the limit.
    pub ends_at: Timestamp,
}

/// Partner Filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartnerFilter {
    /// Only partners with this activity flag, when set.
    pub is_active: Option<bool>,
}

impl PartnerFilter {
    #[must_use]
    pub const fn all() -> Self {
        Self { is_active: None }
    }

    #[must_use]
    pub const fn active() -> Self {
        Self {
            is_active: Some(true),
        }
    }

    #[must_use]
    pub fn matches(&self, partner: &PartnerRecord) -> bool {
        self.is_active
            .is_none_or(|is_active| partner.is_active == is_active)
    }
}
