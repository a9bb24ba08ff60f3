//! Partner Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Partner UUID
pub type PartnerUuid = TypedUuid<PartnerRecord>;

/// Partner Limit UUID
pub type PartnerLimitUuid = TypedUuid<PartnerLimitRecord>;

/// Partner Record
///
/// The aggregate root: a partner owns its full limit history, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerRecord {
    /// Unique partner identifier.
    pub uuid: PartnerUuid,

    /// Human-readable partner name.
    pub name: String,

    /// Inactive partners cannot receive new limits.
    pub is_active: bool,

    /// Promo codes issued under the current limit.
    pub number_issued_promo_codes: u64,

    /// Limit history in creation order.
    pub limits: Vec<PartnerLimitRecord>,
}

impl PartnerRecord {
    /// The limit that has not been cancelled, if any.
    #[must_use]
    pub fn active_limit(&self) -> Option<&PartnerLimitRecord> {
        self.limits.iter().find(|limit| limit.is_active())
    }

    pub(crate) fn active_limit_mut(&mut self) -> Option<&mut PartnerLimitRecord> {
        self.limits.iter_mut().find(|limit| limit.is_active())
    }

    /// Look up a limit by UUID, cancelled or not.
    #[must_use]
    pub fn find_limit(&self, uuid: PartnerLimitUuid) -> Option<&PartnerLimitRecord> {
        self.limits.iter().find(|limit| limit.uuid == uuid)
    }
}

/// Partner Promo Code Limit Record
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerLimitRecord {
    /// Unique limit identifier.
    pub uuid: PartnerLimitUuid,

    /// Owning partner.
    pub partner_uuid: PartnerUuid,

    /// Maximum number of promo codes issuable under this limit.
    pub limit: u64,

    /// Limit creation timestamp.
    pub created_at: Timestamp,

    /// Requested expiry of the limit.
    pub ends_at: Timestamp,

    /// Set once the limit has been superseded or cancelled.
    pub cancelled_at: Option<Timestamp>,
}

impl PartnerLimitRecord {
    /// Whether this limit is still in force, i.e. has not been cancelled.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.cancelled_at.is_none()
    }
}
