//! Partner promo-code limits: domain, storage and services.

pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

mod uuids;
