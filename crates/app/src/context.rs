//! App Context

use std::sync::Arc;

use jiff::Timestamp;
use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::info;

use crate::{
    database,
    domain::partners::{
        PartnersService, RepositoryPartnersService,
        records::PartnerRecord,
        repository::{InMemoryPartnersRepository, PartnersRepository, PgPartnersRepository},
        seed,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] MigrateError),
}

/// Storage backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    InMemory,
}

#[derive(Clone)]
pub struct AppContext {
    pub store: StoreKind,
    pub partners: Arc<dyn PartnersService>,
    pub partners_repository: Arc<dyn PartnersRepository>,
}

impl AppContext {
    /// Build application context, choosing the store by configuration presence.
    ///
    /// With a database URL the context connects to `PostgreSQL` and applies
    /// migrations; without one it falls back to an in-memory store holding a
    /// fresh copy of the seed partners.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to or migrating the database fails.
    pub async fn from_database_url(url: Option<&str>) -> Result<Self, AppInitError> {
        let Some(url) = url.filter(|url| !url.trim().is_empty()) else {
            info!("no database configured, using in-memory partner store");

            return Ok(Self::in_memory(seed::partners(Timestamp::now())));
        };

        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        info!("using postgres partner store");

        Ok(Self::with_repository(
            StoreKind::Postgres,
            Arc::new(PgPartnersRepository::new(pool)),
        ))
    }

    /// Build a context over an in-memory store holding `partners`.
    #[must_use]
    pub fn in_memory(partners: Vec<PartnerRecord>) -> Self {
        Self::with_repository(
            StoreKind::InMemory,
            Arc::new(InMemoryPartnersRepository::new(partners)),
        )
    }

    fn with_repository(store: StoreKind, repository: Arc<dyn PartnersRepository>) -> Self {
        Self {
            store,
            partners: Arc::new(RepositoryPartnersService::new(Arc::clone(&repository))),
            partners_repository: repository,
        }
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::partners::{
        data::{NewPartner, PartnerFilter},
        records::PartnerUuid,
    };

    use super::*;

    #[tokio::test]
    async fn missing_database_url_selects_seeded_in_memory_store() -> TestResult {
        let ctx = AppContext::from_database_url(None).await?;

        let partners = ctx.partners.list_partners(PartnerFilter::all()).await?;

        assert_eq!(ctx.store, StoreKind::InMemory);
        assert_eq!(partners.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn blank_database_url_selects_in_memory_store() -> TestResult {
        let ctx = AppContext::from_database_url(Some("  ")).await?;

        assert_eq!(ctx.store, StoreKind::InMemory);

        Ok(())
    }

    #[tokio::test]
    async fn service_and_repository_share_the_store() -> TestResult {
        let ctx = AppContext::in_memory(Vec::new());

        ctx.partners
            .create_partner(NewPartner {
                uuid: PartnerUuid::new(),
                name: "Shared".to_string(),
                is_active: true,
            })
            .await?;

        let stored = ctx.partners_repository.find_partners(PartnerFilter::all()).await?;

        assert_eq!(stored.len(), 1);

        Ok(())
    }
}
