//! Errors

use salvo::http::StatusError;
use tracing::error;

use eshopper_app::domain::customers::CustomersServiceError;

pub(crate) fn into_status_error(error: CustomersServiceError) -> StatusError {
    match error {
        CustomersServiceError::Sql(source) => error!("customer storage error: {source}"),
        CustomersServiceError::Password(source) => error!("password hashing failed: {source}"),
        other => error!("unexpected customer error: {other}"),
    }

    StatusError::internal_server_error()
}
