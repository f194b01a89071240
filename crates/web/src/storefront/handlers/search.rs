//! Search Handler

use salvo::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    pages::{ProductCard, SessionView, cards},
    storefront::errors::into_status_error,
};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SearchPage {
    #[serde(flatten)]
    pub session: SessionView,
    pub products: Vec<ProductCard>,
}

/// Search by title or category name; no term sends the visitor home.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let term = match req.query::<String>("search") {
        Some(term) => Some(term),
        None => req.form::<String>("search").await,
    };

    let Some(term) = term.filter(|term| !term.is_empty()) else {
        return res.redirect_to("/");
    };

    let state = depot.state_or_500()?;

    let products = state
        .app
        .catalog
        .search(&term)
        .await
        .map_err(into_status_error)?;

    let session = depot.session_or_500()?;

    res.render(Json(SearchPage {
        session: SessionView::from(session.state()),
        products: cards(products),
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
        .service(Router::with_path("q").get(handler).post(handler))
    }

    #[tokio::test]
    async fn search_returns_matching_products() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_search()
            .once()
            .withf(|term| term == "Chair")
            .return_once(|_| Ok(vec![make_product(1, "Chair", 50)]));

        let page: SearchPage = TestClient::get("http://example.com/q?search=Chair")
            .send(&service(catalog))
            .await
            .take_json()
            .await?;

        assert_eq!(page.products.len(), 1);
        assert_eq!(
            page.products.first().map(|c| c.product.title.as_str()),
            Some("Chair")
        );

        Ok(())
    }

    #[tokio::test]
    async fn empty_search_redirects_home_without_touching_the_catalog() {
        for url in [
            "http://example.com/q",
            "http://example.com/q?search=",
        ] {
            let mut catalog = MockCatalogService::new();
            catalog.expect_search().never();

            let res = TestClient::get(url).send(&service(catalog)).await;

            assert_eq!(res.status_code, Some(StatusCode::FOUND), "{url}");
            assert_eq!(location(&res).as_deref(), Some("/"), "{url}");
        }
    }

    #[tokio::test]
    async fn whitespace_term_is_searched_verbatim() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_search()
            .once()
            .withf(|term| term == " ")
            .return_once(|_| Ok(vec![make_product(1, "Corner Sofa", 900)]));

        let page: SearchPage = TestClient::get("http://example.com/q?search=%20")
            .send(&service(catalog))
            .await
            .take_json()
            .await?;

        assert_eq!(page.products.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn posted_search_term_is_accepted() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_search()
            .once()
            .withf(|term| term == "lamp")
            .return_once(|_| Ok(vec![]));

        let res = TestClient::post("http://example.com/q")
            .form(&[("search", "lamp")])
            .send(&service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
