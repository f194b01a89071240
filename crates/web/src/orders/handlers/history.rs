//! Order History Handler

use salvo::prelude::*;
use serde::{Deserialize, Serialize};

use eshopper_app::domain::orders::{data::CustomerIdentity, records::OrderRecord};

use crate::{
    extensions::*,
    orders::errors::{into_status_error, lookup_redirect},
    pages::SessionView,
};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct OrdersPage {
    #[serde(flatten)]
    pub session: SessionView,
    pub orders: Vec<OrderRecord>,
}

/// The visitor's orders, newest first.
#[handler]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_500()?;

    let identity = CustomerIdentity::from_session(&session.state().customer, session.key());

    let orders = match state.app.orders.list_orders(&identity).await {
        Ok(orders) => orders,
        Err(error) => {
            return match lookup_redirect(&error) {
                Some(location) => res.redirect_to(location),
                None => Err(into_status_error(error)),
            };
        }
    };

    res.render(Json(OrdersPage {
        session: SessionView::from(session.state()),
        orders,
    }));

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use eshopper_app::domain::orders::MockOrdersService;

    use crate::{orders::handlers::tests::make_order, test_helpers::TestApp};

    use super::*;

    #[tokio::test]
    async fn guest_sees_the_orders_of_their_session() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|identity| matches!(identity, CustomerIdentity::Guest(_)))
            .return_once(|_| Ok(vec![make_order(2, 9), make_order(1, 9)]));

        let app = TestApp {
            orders,
            ..TestApp::default()
        };

        let page: OrdersPage = TestClient::get("http://example.com/orders")
            .send(&app.service(Router::with_path("orders").get(handler)))
            .await
            .take_json()
            .await?;

        let ids: Vec<i64> = page.orders.iter().map(|o| o.id.into_i64()).collect();

        assert_eq!(ids, vec![2, 1]);

        Ok(())
    }
}
