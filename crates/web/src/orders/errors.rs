//! Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use eshopper_app::domain::orders::OrdersServiceError;

/// Where a failed checkout sends the visitor, or `None` for a server error.
pub(super) fn checkout_redirect(error: &OrdersServiceError) -> Option<&'static str> {
    match error {
        OrdersServiceError::EmptyCart
        | OrdersServiceError::CustomerNotFound
        | OrdersServiceError::NotFound
        | OrdersServiceError::InvalidReference
        | OrdersServiceError::Customers(_) => Some("/"),
        OrdersServiceError::MissingProduct(key) => {
            warn!(cart_key = %key, "checkout refused: product no longer exists");

            Some("/cart")
        }
        OrdersServiceError::TotalTooHigh => {
            warn!("checkout refused: order total is above the storable maximum");

            Some("/cart")
        }
        OrdersServiceError::InvalidData
        | OrdersServiceError::Notification(_)
        | OrdersServiceError::Sql(_) => None,
    }
}

/// Where a failed order lookup sends the visitor, or `None` for a server error.
pub(super) fn lookup_redirect(error: &OrdersServiceError) -> Option<&'static str> {
    match error {
        OrdersServiceError::NotFound | OrdersServiceError::CustomerNotFound => Some("/"),
        _ => None,
    }
}

pub(super) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match &error {
        OrdersServiceError::Sql(source) => error!("order storage error: {source}"),
        OrdersServiceError::Notification(source) => {
            error!("order confirmation failed: {source}");
        }
        other => error!("unexpected order error: {other}"),
    }

    StatusError::internal_server_error()
}
