//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

/// Map any error to an HTTP error.
pub(crate) trait ResultExt<T> {
    /// Reject with a 400 carrying `brief` as the client-facing message.
    fn or_400(self, brief: &str) -> Result<T, StatusError>;

    /// Log the error and reject with a 500.
    fn or_500(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_400(self, brief: &str) -> Result<T, StatusError> {
        self.map_err(|_ignored| StatusError::bad_request().brief(brief))
    }

    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }
}
