//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

pub(crate) trait ResultExt<T> {
    /// Log the failure under `context` and answer `500`.
    fn or_500(self, context: &'static str) -> Result<T, StatusError>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    fn or_500(self, context: &'static str) -> Result<T, StatusError> {
        self.map_err(|source| {
            error!(error = %source, context, "request failed");

            StatusError::internal_server_error().brief(context)
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn failures_become_internal_server_errors() {
        let result: Result<(), &str> = Err("header value contained a newline");

        let status = result.or_500("failed to set location header").err();

        assert_eq!(status.map(|s| s.code), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
