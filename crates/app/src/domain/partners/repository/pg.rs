//! PostgreSQL partners repository.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::partners::{
    data::PartnerFilter,
    errors::PartnersRepositoryError,
    records::{PartnerLimitRecord, PartnerLimitUuid, PartnerRecord, PartnerUuid},
};

use super::PartnersRepository;

const GET_PARTNER_SQL: &str = include_str!("../sql/get_partner.sql");
const FIND_PARTNERS_SQL: &str = include_str!("../sql/find_partners.sql");
const LIST_PARTNER_LIMITS_SQL: &str = include_str!("../sql/list_partner_limits.sql");
const CREATE_PARTNER_SQL: &str = include_str!("../sql/create_partner.sql");
const UPDATE_PARTNER_SQL: &str = include_str!("../sql/update_partner.sql");
const UPSERT_PARTNER_LIMIT_SQL: &str = include_str!("../sql/upsert_partner_limit.sql");
const DELETE_PARTNER_SQL: &str = include_str!("../sql/delete_partner.sql");
const SNAPSHOT_SQL: &str = "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY";

/// Partner row without its limits.
struct PartnerRow {
    uuid: PartnerUuid,
    name: String,
    is_active: bool,
    number_issued_promo_codes: u64,
}

impl PartnerRow {
    fn with_limits(self, limits: Vec<PartnerLimitRecord>) -> PartnerRecord {
        PartnerRecord {
            uuid: self.uuid,
            name: self.name,
            is_active: self.is_active,
            number_issued_promo_codes: self.number_issued_promo_codes,
            limits,
        }
    }
}

/// PostgreSQL-backed partners repository.
#[derive(Debug, Clone)]
pub struct PgPartnersRepository {
    pool: PgPool,
}

impl PgPartnersRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a read-only transaction whose statements share one snapshot, so a
    /// partner row and its limits are never read across a concurrent commit.
    async fn begin_snapshot(&self) -> Result<Transaction<'_, Postgres>, PartnersRepositoryError> {
        let mut tx = self.pool.begin().await?;

        query(SNAPSHOT_SQL).execute(&mut *tx).await?;

        Ok(tx)
    }

    async fn load_limits(
        tx: &mut Transaction<'_, Postgres>,
        partners: &[Uuid],
    ) -> Result<FxHashMap<PartnerUuid, Vec<PartnerLimitRecord>>, PartnersRepositoryError> {
        let limits = query_as::<Postgres, PartnerLimitRecord>(LIST_PARTNER_LIMITS_SQL)
            .bind(partners)
            .fetch_all(&mut **tx)
            .await?;

        let mut grouped: FxHashMap<PartnerUuid, Vec<PartnerLimitRecord>> = FxHashMap::default();

        for limit in limits {
            grouped.entry(limit.partner_uuid).or_default().push(limit);
        }

        Ok(grouped)
    }

    async fn upsert_limits(
        tx: &mut Transaction<'_, Postgres>,
        limits: &[PartnerLimitRecord],
    ) -> Result<(), PartnersRepositoryError> {
        // Rows are written in history order so the previous limit is cancelled
        // before its replacement hits the one-active index.
        for limit in limits {
            query(UPSERT_PARTNER_LIMIT_SQL)
                .bind(limit.uuid.into_uuid())
                .bind(limit.partner_uuid.into_uuid())
                .bind(i64::try_from(limit.limit)?)
                .bind(SqlxTimestamp::from(limit.created_at))
                .bind(SqlxTimestamp::from(limit.ends_at))
                .bind(limit.cancelled_at.map(SqlxTimestamp::from))
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl PartnersRepository for PgPartnersRepository {
    async fn get_partner(
        &self,
        partner: PartnerUuid,
    ) -> Result<Option<PartnerRecord>, PartnersRepositoryError> {
        let mut tx = self.begin_snapshot().await?;

        let Some(row) = query_as::<Postgres, PartnerRow>(GET_PARTNER_SQL)
            .bind(partner.into_uuid())
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let mut limits = Self::load_limits(&mut tx, &[partner.into_uuid()]).await?;

        tx.commit().await?;

        let limits = limits.remove(&partner).unwrap_or_default();

        Ok(Some(row.with_limits(limits)))
    }

    async fn find_partners(
        &self,
        filter: PartnerFilter,
    ) -> Result<Vec<PartnerRecord>, PartnersRepositoryError> {
        let mut tx = self.begin_snapshot().await?;

        let rows = query_as::<Postgres, PartnerRow>(FIND_PARTNERS_SQL)
            .bind(filter.is_active)
            .fetch_all(&mut *tx)
            .await?;

        let uuids: Vec<Uuid> = rows.iter().map(|row| row.uuid.into_uuid()).collect();

        let mut limits = Self::load_limits(&mut tx, &uuids).await?;

        tx.commit().await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let partner_limits = limits.remove(&row.uuid).unwrap_or_default();

                row.with_limits(partner_limits)
            })
            .collect())
    }

    async fn create_partner(
        &self,
        partner: PartnerRecord,
    ) -> Result<PartnerRecord, PartnersRepositoryError> {
        let mut tx = self.pool.begin().await?;

        query(CREATE_PARTNER_SQL)
            .bind(partner.uuid.into_uuid())
            .bind(&partner.name)
            .bind(partner.is_active)
            .bind(i64::try_from(partner.number_issued_promo_codes)?)
            .execute(&mut *tx)
            .await?;

        Self::upsert_limits(&mut tx, &partner.limits).await?;

        tx.commit().await?;

        Ok(partner)
    }

    async fn update_partner(
        &self,
        partner: PartnerRecord,
    ) -> Result<PartnerRecord, PartnersRepositoryError> {
        let mut tx = self.pool.begin().await?;

        let rows_affected = query(UPDATE_PARTNER_SQL)
            .bind(partner.uuid.into_uuid())
            .bind(&partner.name)
            .bind(partner.is_active)
            .bind(i64::try_from(partner.number_issued_promo_codes)?)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(PartnersRepositoryError::NotFound);
        }

        Self::upsert_limits(&mut tx, &partner.limits).await?;

        tx.commit().await?;

        Ok(partner)
    }

    async fn delete_partner(&self, partner: PartnerUuid) -> Result<bool, PartnersRepositoryError> {
        let rows_affected = query(DELETE_PARTNER_SQL)
            .bind(partner.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

fn decode_count(row: &PgRow, column: &str) -> sqlx::Result<u64> {
    let value: i64 = row.try_get(column)?;

    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for PartnerRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PartnerUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            is_active: row.try_get("is_active")?,
            number_issued_promo_codes: decode_count(row, "number_issued_promo_codes")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PartnerLimitRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PartnerLimitUuid::from_uuid(row.try_get("uuid")?),
            partner_uuid: PartnerUuid::from_uuid(row.try_get("partner_uuid")?),
            limit: decode_count(row, "promo_code_limit")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            ends_at: row.try_get::<SqlxTimestamp, _>("ends_at")?.to_jiff(),
            cancelled_at: row
                .try_get::<Option<SqlxTimestamp>, _>("cancelled_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
