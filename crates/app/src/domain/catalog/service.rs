//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        data::{NewCategory, NewProduct},
        errors::CatalogServiceError,
        records::{CategoryId, CategoryRecord, HotProduct, ProductId, ProductRecord},
        repository::PgCatalogRepository,
    },
};

/// Number of best sellers shown on the home page.
pub const TOP_SOLD_LIMIT: u32 = 8;

/// Number of "hot" (cheapest) products shown on the home page.
pub const HOT_PRODUCTS_LIMIT: u32 = 3;

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CatalogServiceError> {
        if category.name.trim().is_empty() {
            return Err(CatalogServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_products(&self) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn search(&self, term: &str) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.db.begin().await?;

        let products = self.repository.search_products(&mut tx, term).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn filter_by_category(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let products = match category {
            Some(category) => {
                self.repository
                    .list_products_by_category(&mut tx, category)
                    .await?
            }
            None => self.repository.list_products(&mut tx).await?,
        };

        tx.commit().await?;

        Ok(products)
    }

    async fn products_in_category_named(
        &self,
        name: &str,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .list_products_by_category_name(&mut tx, name)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn top_sold_products(
        &self,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.top_sold_products(&mut tx, limit).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn cheapest_products(&self, limit: u32) -> Result<Vec<HotProduct>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.cheapest_products(&mut tx, limit).await?;

        tx.commit().await?;

        Ok(products.into_iter().map(HotProduct::from).collect())
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieves all categories.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CatalogServiceError>;

    /// Creates a category; the name must not be blank.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CatalogServiceError>;

    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, CatalogServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError>;

    /// Products whose title or category name contains `term`, ignoring case.
    ///
    /// The term is matched verbatim; an empty term matches nothing.
    async fn search(&self, term: &str) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Products in the given category, or every product when `None`.
    async fn filter_by_category(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Products whose category is named exactly `name`.
    async fn products_in_category_named(
        &self,
        name: &str,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Best sellers first, ties broken by id.
    async fn top_sold_products(
        &self,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Cheapest first, ties broken by id.
    async fn cheapest_products(&self, limit: u32) -> Result<Vec<HotProduct>, CatalogServiceError>;
}
