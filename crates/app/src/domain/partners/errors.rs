//! Partners errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::partners::limits::LimitRuleError;

#[derive(Debug, Error)]
pub enum PartnersRepositoryError {
    #[error("partner already exists")]
    AlreadyExists,

    #[error("partner not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("invalid counter value")]
    InvalidCount(#[from] TryFromIntError),
}

impl From<Error> for PartnersRepositoryError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[derive(Debug, Error)]
pub enum PartnersServiceError {
    #[error("partner not found")]
    NotFound,

    #[error("partner limit not found")]
    LimitNotFound,

    #[error("partner is not active")]
    PartnerInactive,

    #[error("limit must be greater than 0")]
    InvalidLimit,

    #[error("partner has no active limit")]
    NoActiveLimit,

    #[error("partner already exists")]
    AlreadyExists,

    #[error("conflicting partner update")]
    Conflict,

    #[error("storage error")]
    Storage(#[source] PartnersRepositoryError),
}

impl From<LimitRuleError> for PartnersServiceError {
    fn from(error: LimitRuleError) -> Self {
        match error {
            LimitRuleError::PartnerInactive => Self::PartnerInactive,
            LimitRuleError::InvalidLimit => Self::InvalidLimit,
            LimitRuleError::NoActiveLimit => Self::NoActiveLimit,
        }
    }
}

impl From<PartnersRepositoryError> for PartnersServiceError {
    fn from(error: PartnersRepositoryError) -> Self {
        match error {
            PartnersRepositoryError::NotFound => Self::NotFound,
            error => Self::Storage(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = PartnersRepositoryError::from(Error::RowNotFound);

        assert!(
            matches!(error, PartnersRepositoryError::NotFound),
            "expected NotFound, got {error:?}"
        );
    }

    #[test]
    fn rule_errors_keep_their_messages() {
        for rule in [
            LimitRuleError::PartnerInactive,
            LimitRuleError::InvalidLimit,
            LimitRuleError::NoActiveLimit,
        ] {
            assert_eq!(PartnersServiceError::from(rule).to_string(), rule.to_string());
        }
    }

    #[test]
    fn missing_partner_from_store_is_not_found() {
        let error = PartnersServiceError::from(PartnersRepositoryError::NotFound);

        assert!(matches!(error, PartnersServiceError::NotFound), "got {error:?}");
    }
}
