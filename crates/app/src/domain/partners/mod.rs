//! Partners

pub mod data;
pub mod errors;
pub mod limits;
mod locks;
pub mod records;
pub mod repository;
pub mod seed;
pub mod service;

pub use errors::{PartnersRepositoryError, PartnersServiceError};
pub use service::*;
