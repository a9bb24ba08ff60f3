//! Partners service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, info};

use crate::domain::partners::{
    data::{NewPartner, NewPartnerLimit, PartnerFilter},
    errors::{PartnersRepositoryError, PartnersServiceError},
    limits,
    locks::PartnerLocks,
    records::{PartnerLimitRecord, PartnerLimitUuid, PartnerRecord, PartnerUuid},
    repository::PartnersRepository,
};

/// Partners service over any [`PartnersRepository`].
pub struct RepositoryPartnersService {
    repository: Arc<dyn PartnersRepository>,
    locks: PartnerLocks,
}

impl RepositoryPartnersService {
    #[must_use]
    pub fn new(repository: Arc<dyn PartnersRepository>) -> Self {
        Self {
            repository,
            locks: PartnerLocks::default(),
        }
    }

    async fn load(&self, partner: PartnerUuid) -> Result<PartnerRecord, PartnersServiceError> {
        self.repository
            .get_partner(partner)
            .await?
            .ok_or(PartnersServiceError::NotFound)
    }

    async fn persist(&self, partner: PartnerRecord) -> Result<PartnerRecord, PartnersServiceError> {
        self.repository
            .update_partner(partner)
            .await
            .map_err(|error| match error {
                // A concurrent writer installed another active limit first.
                PartnersRepositoryError::AlreadyExists => PartnersServiceError::Conflict,
                error => error.into(),
            })
    }
}

impl std::fmt::Debug for RepositoryPartnersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryPartnersService")
            .field("locks", &self.locks)
            .finish_non_exhaustive()
    }
}

fn limit_record(
    partner: &PartnerRecord,
    limit: PartnerLimitUuid,
) -> Result<PartnerLimitRecord, PartnersServiceError> {
    partner
        .find_limit(limit)
        .cloned()
        .ok_or(PartnersServiceError::LimitNotFound)
}

#[async_trait]
impl PartnersService for RepositoryPartnersService {
    #[tracing::instrument(name = "partners.service.list_partners", skip(self), err)]
    async fn list_partners(
        &self,
        filter: PartnerFilter,
    ) -> Result<Vec<PartnerRecord>, PartnersServiceError> {
        Ok(self.repository.find_partners(filter).await?)
    }

    #[tracing::instrument(
        name = "partners.service.get_partner",
        skip(self),
        fields(partner_uuid = %partner),
        err
    )]
    async fn get_partner(&self, partner: PartnerUuid) -> Result<PartnerRecord, PartnersServiceError> {
        self.load(partner).await
    }

    #[tracing::instrument(
        name = "partners.service.create_partner",
        skip(self, partner),
        fields(partner_uuid = %partner.uuid),
        err
    )]
    async fn create_partner(
        &self,
        partner: NewPartner,
    ) -> Result<PartnerRecord, PartnersServiceError> {
        let record = self
            .repository
            .create_partner(partner.into())
            .await
            .map_err(|error| match error {
                PartnersRepositoryError::AlreadyExists => PartnersServiceError::AlreadyExists,
                error => error.into(),
            })?;

        info!(partner_uuid = %record.uuid, "created partner");

        Ok(record)
    }

    #[tracing::instrument(
        name = "partners.service.delete_partner",
        skip(self),
        fields(partner_uuid = %partner),
        err
    )]
    async fn delete_partner(&self, partner: PartnerUuid) -> Result<(), PartnersServiceError> {
        let _guard = self.locks.acquire(partner).await;

        if !self.repository.delete_partner(partner).await? {
            return Err(PartnersServiceError::NotFound);
        }

        info!(partner_uuid = %partner, "deleted partner");

        Ok(())
    }

    #[tracing::instrument(
        name = "partners.service.get_partner_limit",
        skip(self),
        fields(partner_uuid = %partner, limit_uuid = %limit),
        err
    )]
    async fn get_partner_limit(
        &self,
        partner: PartnerUuid,
        limit: PartnerLimitUuid,
    ) -> Result<PartnerLimitRecord, PartnersServiceError> {
        let partner = self.load(partner).await?;

        limit_record(&partner, limit)
    }

    #[tracing::instrument(
        name = "partners.service.set_partner_limit",
        skip(self, request),
        fields(
            partner_uuid = %partner,
            limit = request.limit,
            limit_uuid = tracing::field::Empty,
            cancelled_limit_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn set_partner_limit(
        &self,
        partner: PartnerUuid,
        request: NewPartnerLimit,
    ) -> Result<PartnerLimitRecord, PartnersServiceError> {
        let _guard = self.locks.acquire(partner).await;

        let mut record = self.load(partner).await?;

        let change = limits::set_limit(&mut record, &request, Timestamp::now())?;

        let span = Span::current();

        span.record("limit_uuid", tracing::field::display(change.created));

        if let Some(cancelled) = change.cancelled {
            span.record("cancelled_limit_uuid", tracing::field::display(cancelled));
        }

        let record = self.persist(record).await?;

        info!(
            partner_uuid = %change.partner,
            limit_uuid = %change.created,
            counter_reset = change.cancelled.is_some(),
            "set partner limit"
        );

        limit_record(&record, change.created)
    }

    #[tracing::instrument(
        name = "partners.service.cancel_partner_limit",
        skip(self),
        fields(partner_uuid = %partner),
        err
    )]
    async fn cancel_partner_limit(
        &self,
        partner: PartnerUuid,
    ) -> Result<PartnerLimitRecord, PartnersServiceError> {
        let _guard = self.locks.acquire(partner).await;

        let mut record = self.load(partner).await?;

        let cancelled = limits::cancel_limit(&mut record, Timestamp::now())?;

        let record = self.persist(record).await?;

        info!(partner_uuid = %partner, limit_uuid = %cancelled, "cancelled partner limit");

        limit_record(&record, cancelled)
    }
}

#[automock]
#[async_trait]
pub trait PartnersService: Send + Sync {
    /// Lists partners matching the filter.
    async fn list_partners(
        &self,
        filter: PartnerFilter,
    ) -> Result<Vec<PartnerRecord>, PartnersServiceError>;

    /// Retrieves a single partner with its limit history.
    async fn get_partner(&self, partner: PartnerUuid) -> Result<PartnerRecord, PartnersServiceError>;

    /// Creates a new partner without limits.
    async fn create_partner(&self, partner: NewPartner)
    -> Result<PartnerRecord, PartnersServiceError>;

    /// Deletes a partner and its limit history.
    async fn delete_partner(&self, partner: PartnerUuid) -> Result<(), PartnersServiceError>;

    /// Retrieves one limit of a partner.
    async fn get_partner_limit(
        &self,
        partner: PartnerUuid,
        limit: PartnerLimitUuid,
    ) -> Result<PartnerLimitRecord, PartnersServiceError>;

    /// Replaces the partner's active limit and returns the new one.
    async fn set_partner_limit(
        &self,
        partner: PartnerUuid,
        request: NewPartnerLimit,
    ) -> Result<PartnerLimitRecord, PartnersServiceError>;

    /// Cancels the partner's active limit and returns it.
    async fn cancel_partner_limit(
        &self,
        partner: PartnerUuid,
    ) -> Result<PartnerLimitRecord, PartnersServiceError>;
}
