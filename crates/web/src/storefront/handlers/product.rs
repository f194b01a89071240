//! Product Page Handler

use salvo::prelude::*;
use serde::{Deserialize, Serialize};

use eshopper_app::domain::catalog::{
    CatalogServiceError,
    records::{ProductId, ProductRecord},
};

use crate::{extensions::*, pages::SessionView, storefront::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProductPage {
    #[serde(flatten)]
    pub session: SessionView,
    pub product: ProductRecord,
    pub image: String,
}

/// One product; unknown or malformed ids send the visitor home.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let Some(id) = req.param::<i64>("id") else {
        return res.redirect_to("/");
    };

    let state = depot.state_or_500()?;

    let product = match state.app.catalog.get_product(ProductId::from_i64(id)).await {
        Ok(product) => product,
        Err(CatalogServiceError::NotFound) => return res.redirect_to("/"),
        Err(error) => return Err(into_status_error(error)),
    };

    let session = depot.session_or_500()?;

    res.render(Json(ProductPage {
        session: SessionView::from(session.state()),
        image: product.image_file_name().to_string(),
        product,
    }));

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use eshopper_app::domain::catalog::MockCatalogService;

    use crate::{
        storefront::handlers::tests::make_product,
        test_helpers::{TestApp, location},
    };

    use super::*;

    fn service(catalog: MockCatalogService) -> Service {
        TestApp {
            catalog,
            ..TestApp::default()
        }
        .service(Router::with_path("product/{id}").get(handler))
    }

    #[tokio::test]
    async fn product_page_shows_the_product() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_product()
            .once()
            .withf(|id| *id == ProductId::from_i64(1))
            .return_once(|_| Ok(make_product(1, "Chair", 50)));

        let page: ProductPage = TestClient::get("http://example.com/product/1")
            .send(&service(catalog))
            .await
            .take_json()
            .await?;

        assert_eq!(page.product.title, "Chair");
        assert_eq!(page.image, "chair.jpg");

        Ok(())
    }

    #[tokio::test]
    async fn missing_product_redirects_home() {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_product()
            .once()
            .return_once(|_| Err(CatalogServiceError::NotFound));

        let res = TestClient::get("http://example.com/product/999")
            .send(&service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FOUND));
        assert_eq!(location(&res).as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn non_numeric_id_redirects_home() {
        let mut catalog = MockCatalogService::new();
        catalog.expect_get_product().never();

        let res = TestClient::get("http://example.com/product/chair")
            .send(&service(catalog))
            .await;

        assert_eq!(location(&res).as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn storage_failure_is_a_server_error() {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_product()
            .once()
            .return_once(|_| Err(CatalogServiceError::Sql(sqlx::Error::PoolClosed)));

        let res = TestClient::get("http://example.com/product/1")
            .send(&service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
