//! Partners Repository
//!
//! Storage capability for the partner aggregate. A partner is always loaded
//! and persisted together with its complete limit history.

use async_trait::async_trait;
use mockall::automock;

use crate::domain::partners::{
    data::PartnerFilter,
    errors::PartnersRepositoryError,
    records::{PartnerRecord, PartnerUuid},
};

mod memory;
mod pg;

pub use memory::InMemoryPartnersRepository;
pub use pg::PgPartnersRepository;

#[automock]
#[async_trait]
pub trait PartnersRepository: Send + Sync {
    /// Load a partner with its limits, `None` when unknown.
    async fn get_partner(
        &self,
        partner: PartnerUuid,
    ) -> Result<Option<PartnerRecord>, PartnersRepositoryError>;

    /// Load every partner matching `filter`, in creation order.
    async fn find_partners(
        &self,
        filter: PartnerFilter,
    ) -> Result<Vec<PartnerRecord>, PartnersRepositoryError>;

    /// Store a new partner.
    async fn create_partner(
        &self,
        partner: PartnerRecord,
    ) -> Result<PartnerRecord, PartnersRepositoryError>;

    /// Persist a mutated partner aggregate, including new and cancelled limits.
    async fn update_partner(
        &self,
        partner: PartnerRecord,
    ) -> Result<PartnerRecord, PartnersRepositoryError>;

    /// Remove a partner, returning whether it existed.
    async fn delete_partner(&self, partner: PartnerUuid) -> Result<bool, PartnersRepositoryError>;
}
