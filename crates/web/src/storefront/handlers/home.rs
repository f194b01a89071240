//! Home Page Handler

use salvo::prelude::*;
use serde::{Deserialize, Serialize};

use eshopper_app::domain::catalog::{HOT_PRODUCTS_LIMIT, TOP_SOLD_LIMIT};

use crate::{
    extensions::*,
    pages::{HotProductCard, ProductCard, SessionView, cards},
    storefront::errors::into_status_error,
};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct HomePage {
    #[serde(flatten)]
    pub session: SessionView,
    pub most_sold: Vec<ProductCard>,
    pub hot: Vec<HotProductCard>,
}

/// Best sellers and cheapest products; starts the visitor's cart.
#[handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HomePage>, StatusError> {
    let state = depot.state_or_500()?;

    let most_sold = state
        .app
        .catalog
        .top_sold_products(TOP_SOLD_LIMIT)
        .await
        .map_err(into_status_error)?;

    let hot = state
        .app
        .catalog
        .cheapest_products(HOT_PRODUCTS_LIMIT)
        .await
        .map_err(into_status_error)?;

    let session = depot.session_or_500()?;
    session.state_mut().ensure_cart();

    Ok(Json(HomePage {
        session: SessionView::from(session.state()),
        most_sold: cards(most_sold),
        hot: hot.into_iter().map(HotProductCard::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use eshopper_app::domain::catalog::{MockCatalogService, records::HotProduct};

    use crate::{
        storefront::handlers::tests::make_product,
        test_helpers::{SESSION_COOKIE, TestApp},
    };

    use super::*;

    #[tokio::test]
    async fn home_lists_best_sellers_and_hot_products_and_starts_a_cart() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_top_sold_products()
            .once()
            .withf(|limit| *limit == 8)
            .return_once(|_| Ok(vec![make_product(2, "Table", 200)]));

        catalog
            .expect_cheapest_products()
            .once()
            .withf(|limit| *limit == 3)
            .return_once(|_| Ok(vec![HotProduct::from(make_product(1, "Chair", 50))]));

        let app = TestApp {
            catalog,
            ..TestApp::default()
        };

        let mut res = TestClient::get("http://example.com/")
            .send(&app.service(Router::new().get(handler)))
            .await;

        assert!(
            res.cookie(SESSION_COOKIE).is_some(),
            "a fresh cart should start a session"
        );

        let page: HomePage = res.take_json().await?;

        assert_eq!(page.session.customer.first_name, "Guest");
        assert!(page.session.cart.is_some_and(|cart| cart.is_empty()));
        assert_eq!(page.most_sold.len(), 1);
        assert_eq!(
            page.most_sold.first().map(|c| c.image_path.as_str()),
            Some("table.jpg")
        );
        assert_eq!(page.hot.first().map(|h| h.price_cut), Some(80));

        Ok(())
    }
}
