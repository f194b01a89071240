//! Errors

use salvo::http::StatusError;
use tracing::error;

use eshopper_app::domain::catalog::CatalogServiceError;

/// Catalog failures that are not a plain "go back home".
pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::Sql(source) => {
            error!("catalog storage error: {source}");

            StatusError::internal_server_error()
        }
        other => {
            error!("unexpected catalog error: {other}");

            StatusError::internal_server_error()
        }
    }
}
