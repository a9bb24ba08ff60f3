//! Partner Limits

mod handlers;

pub(crate) use handlers::*;
