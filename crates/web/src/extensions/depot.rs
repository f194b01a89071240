//! Depot helper extensions.

use std::{any::Any, sync::Arc};

use salvo::prelude::{Depot, StatusError};

use eshopper_app::sessions::OpenSession;

use crate::state::State;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// A handle on the shared state that does not keep the depot borrowed.
    fn state_or_500(&self) -> Result<Arc<State>, StatusError>;

    /// The session opened for this request by the session middleware.
    fn session_or_500(&mut self) -> Result<&mut OpenSession, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn state_or_500(&self) -> Result<Arc<State>, StatusError> {
        self.obtain_or_500::<Arc<State>>().map(Arc::clone)
    }

    fn session_or_500(&mut self) -> Result<&mut OpenSession, StatusError> {
        self.obtain_mut::<OpenSession>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }
}
