//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    database::{self, Db},
    domain::{
        catalog::{CatalogService, PgCatalogService},
        customers::{CustomersService, PgCustomersService},
        orders::{OrdersService, PgOrdersService, data::CheckoutPolicy},
    },
    notifications::{LogNotifier, Notifier, RelayConfig, RelayNotifier},
    sessions::{MemorySessionStore, PgSessionStore, SessionManager, SessionStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

/// Where session blobs are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionBackend {
    #[default]
    Postgres,

    /// In-process only; sessions are lost on restart.
    Memory,
}

/// Runtime switches the context is assembled from.
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub sessions: SessionBackend,
    pub checkout: CheckoutPolicy,

    /// Deliver confirmations to this relay instead of the log.
    pub mail_relay_url: Option<String>,

    /// Apply pending migrations before serving.
    pub migrate: bool,
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub customers: Arc<dyn CustomersService>,
    pub orders: Arc<dyn OrdersService>,
    pub sessions: SessionManager,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn from_database_url(url: &str, options: AppOptions) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if options.migrate {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;
        }

        Ok(Self::from_db(Db::new(pool), options))
    }

    /// Wire every service over one pool.
    #[must_use]
    pub fn from_db(db: Db, options: AppOptions) -> Self {
        let notifier: Arc<dyn Notifier> = match options.mail_relay_url {
            Some(url) => {
                info!(relay = %url, "order confirmations go to the mail relay");

                Arc::new(RelayNotifier::new(RelayConfig { url }))
            }
            None => Arc::new(LogNotifier),
        };

        let store: Arc<dyn SessionStore> = match options.sessions {
            SessionBackend::Postgres => Arc::new(PgSessionStore::new(db.clone())),
            SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
        };

        let customers = PgCustomersService::new(db.clone());

        Self {
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(
                db,
                Arc::new(customers.clone()),
                notifier,
                options.checkout,
            )),
            customers: Arc::new(customers),
            sessions: SessionManager::new(store),
        }
    }
}
