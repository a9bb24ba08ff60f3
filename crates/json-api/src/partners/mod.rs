//! Partners

pub(crate) mod errors;
mod handlers;
pub(crate) mod limits;
pub(crate) mod models;

pub(crate) use handlers::*;
