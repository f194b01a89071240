//! Test context for service-level integration tests.

use std::sync::Arc;

use crate::{
    database::Db,
    domain::{
        catalog::{
            CatalogService, CatalogServiceError, PgCatalogService, data::NewCategory,
            records::CategoryRecord,
        },
        customers::PgCustomersService,
        orders::{PgOrdersService, data::CheckoutPolicy},
    },
    notifications::MockNotifier,
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub catalog: PgCatalogService,
    pub customers: PgCustomersService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            catalog: PgCatalogService::new(db.clone()),
            customers: PgCustomersService::new(db),
            db: test_db,
        }
    }

    /// A handle on the test database for services built inside a test.
    pub fn db(&self) -> Db {
        Db::new(self.db.pool().clone())
    }

    pub async fn create_category(
        &self,
        name: &str,
    ) -> Result<CategoryRecord, CatalogServiceError> {
        self.catalog
            .create_category(NewCategory {
                name: name.to_string(),
            })
            .await
    }

    /// Orders service over the real customers service with a scripted notifier.
    pub fn orders(&self, notifier: MockNotifier, policy: CheckoutPolicy) -> PgOrdersService {
        PgOrdersService::new(
            self.db(),
            Arc::new(self.customers.clone()),
            Arc::new(notifier),
            policy,
        )
    }
}
