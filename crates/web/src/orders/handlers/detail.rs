//! Order Detail Handler

use salvo::prelude::*;
use serde::{Deserialize, Serialize};

use eshopper_app::domain::orders::{
    data::{CustomerIdentity, OrderDetail},
    records::OrderId,
};

use crate::{
    extensions::*,
    orders::errors::{into_status_error, lookup_redirect},
    pages::SessionView,
};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct OrderDetailPage {
    #[serde(flatten)]
    pub session: SessionView,

    #[serde(flatten)]
    pub detail: OrderDetail,
}

/// One order, only for the visitor who placed it.
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
    let session = depot.session_or_500()?;

    let identity = CustomerIdentity::from_session(&session.state().customer, session.key());

    let detail = match state
        .app
        .orders
        .order_detail(OrderId::from_i64(id), &identity)
        .await
    {
        Ok(detail) => detail,
        Err(error) => {
            return match lookup_redirect(&error) {
                Some(location) => res.redirect_to(location),
                None => Err(into_status_error(error)),
            };
        }
    };

    res.render(Json(OrderDetailPage {
        session: SessionView::from(session.state()),
        detail,
    }));

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use eshopper_app::domain::orders::{MockOrdersService, OrdersServiceError};

    use crate::{
        orders::handlers::tests::{make_item, make_order},
        test_helpers::{TestApp, location},
    };

    use super::*;

    fn service(orders: MockOrdersService) -> Service {
        TestApp {
            orders,
            ..TestApp::default()
        }
        .service(Router::with_path("orders/{id}").get(handler))
    }

    #[tokio::test]
    async fn owner_sees_lines_and_total() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_order_detail()
            .once()
            .withf(|order, _| order.into_i64() == 1)
            .return_once(|_, _| {
                Ok(OrderDetail::new(
                    make_order(1, 7),
                    vec![make_item(1, 1, "Chair", 2, 50), make_item(2, 1, "Table", 1, 200)],
                ))
            });

        let page: OrderDetailPage = TestClient::get("http://example.com/orders/1")
            .send(&service(orders))
            .await
            .take_json()
            .await?;

        assert_eq!(page.detail.items.len(), 2);
        assert_eq!(page.detail.total, 300);

        Ok(())
    }

    #[tokio::test]
    async fn someone_elses_order_redirects_home() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_order_detail()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get("http://example.com/orders/1")
            .send(&service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FOUND));
        assert_eq!(location(&res).as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn non_numeric_id_redirects_home() {
        let mut orders = MockOrdersService::new();
        orders.expect_order_detail().never();

        let res = TestClient::get("http://example.com/orders/latest")
            .send(&service(orders))
            .await;

        assert_eq!(location(&res).as_deref(), Some("/"));
    }
}
