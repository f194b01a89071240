//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{
    domain::{carts::CartKey, customers::CustomersServiceError},
    notifications::NotificationError,
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("customer not found")]
    CustomerNotFound,

    #[error("order not found")]
    NotFound,

    #[error("product for cart line `{0}` no longer exists")]
    MissingProduct(CartKey),

    #[error("order total is above the storable maximum")]
    TotalTooHigh,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("customer lookup failed")]
    Customers(#[source] CustomersServiceError),

    #[error("order confirmation could not be delivered")]
    Notification(#[source] NotificationError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(
                ErrorKind::UniqueViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::Other
                | _,
            )
            | None => Self::Sql(error),
        }
    }
}

impl From<CustomersServiceError> for OrdersServiceError {
    fn from(error: CustomersServiceError) -> Self {
        match error {
            CustomersServiceError::NotFound => Self::CustomerNotFound,
            other => Self::Customers(other),
        }
    }
}
