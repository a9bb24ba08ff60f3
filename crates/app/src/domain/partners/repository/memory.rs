//! In-memory partners repository.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::partners::{
    data::PartnerFilter,
    errors::PartnersRepositoryError,
    records::{PartnerRecord, PartnerUuid},
};

use super::PartnersRepository;

/// List-backed repository, used when no database is configured.
#[derive(Debug, Default)]
pub struct InMemoryPartnersRepository {
    partners: RwLock<Vec<PartnerRecord>>,
}

impl InMemoryPartnersRepository {
    #[must_use]
    pub fn new(partners: Vec<PartnerRecord>) -> Self {
        Self {
            partners: RwLock::new(partners),
        }
    }
}

#[async_trait]
impl PartnersRepository for InMemoryPartnersRepository {
    async fn get_partner(
        &self,
        partner: PartnerUuid,
    ) -> Result<Option<PartnerRecord>, PartnersRepositoryError> {
        let partners = self.partners.read().await;

        Ok(partners.iter().find(|p| p.uuid == partner).cloned())
    }

    async fn find_partners(
        &self,
        filter: PartnerFilter,
    ) -> Result<Vec<PartnerRecord>, PartnersRepositoryError> {
        let partners = self.partners.read().await;

        Ok(partners
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn create_partner(
        &self,
        partner: PartnerRecord,
    ) -> Result<PartnerRecord, PartnersRepositoryError> {
        let mut partners = self.partners.write().await;

        if partners.iter().any(|p| p.uuid == partner.uuid) {
            return Err(PartnersRepositoryError::AlreadyExists);
        }

        partners.push(partner.clone());

        Ok(partner)
    }

    async fn update_partner(
        &self,
        partner: PartnerRecord,
    ) -> Result<PartnerRecord, PartnersRepositoryError> {
        let mut partners = self.partners.write().await;

        let stored = partners
            .iter_mut()
            .find(|p| p.uuid == partner.uuid)
            .ok_or(PartnersRepositoryError::NotFound)?;

        *stored = partner.clone();

        Ok(partner)
    }

    async fn delete_partner(&self, partner: PartnerUuid) -> Result<bool, PartnersRepositoryError> {
        let mut partners = self.partners.write().await;

        let before = partners.len();

        partners.retain(|p| p.uuid != partner);

        Ok(partners.len() != before)
    }
}
