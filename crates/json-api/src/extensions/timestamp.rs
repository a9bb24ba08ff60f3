//! RFC 3339 timestamp parsing helpers.

use jiff::Timestamp;
use salvo::prelude::StatusError;

use crate::extensions::*;

pub(crate) trait TimestampExt {
    /// Parse an RFC 3339 timestamp from a request field, rejecting with a 400.
    fn parse_timestamp_or_400(&self, field: &str) -> Result<Timestamp, StatusError>;
}

impl TimestampExt for str {
    fn parse_timestamp_or_400(&self, field: &str) -> Result<Timestamp, StatusError> {
        self.parse::<Timestamp>()
            .or_400(&format!("could not parse \"{field}\" as an RFC 3339 timestamp"))
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_rfc3339() -> TestResult {
        let at = "2026-10-01T12:00:00Z".parse_timestamp_or_400("ends_at")?;

        assert_eq!(at, "2026-10-01T12:00:00Z".parse::<Timestamp>()?);

        Ok(())
    }

    #[test]
    fn rejects_garbage_with_400() {
        let error = "next tuesday".parse_timestamp_or_400("ends_at").err();

        assert_eq!(error.map(|e| e.code), Some(StatusCode::BAD_REQUEST));
    }
}
