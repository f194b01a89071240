//! Login Handlers

use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use eshopper_app::{domain::customers::CustomersServiceError, sessions::CustomerSession};

use crate::{accounts::errors::into_status_error, extensions::*, pages::SessionView};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct LoginPage {
    #[serde(flatten)]
    pub session: SessionView,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[handler]
pub(crate) async fn form(depot: &mut Depot) -> Result<Json<LoginPage>, StatusError> {
    let session = depot.session_or_500()?;

    Ok(Json(LoginPage {
        session: SessionView::from(session.state()),
        error: None,
    }))
}

/// Check the submitted credentials and remember the customer in the session.
#[handler]
pub(crate) async fn submit(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let email = req.form::<String>("email").await.unwrap_or_default();
    let password = req.form::<String>("password").await.unwrap_or_default();

    let state = depot.state_or_500()?;

    let outcome = state.app.customers.authenticate(&email, &password).await;
    let session = depot.session_or_500()?;

    match outcome {
        Ok(customer) => {
            info!(customer_id = %customer.id, "customer logged in");

            session.state_mut().customer = CustomerSession::from(&customer);

            res.redirect_to("/")
        }
        Err(CustomersServiceError::InvalidCredentials) => {
            res.render(Json(LoginPage {
                session: SessionView::from(session.state()),
                error: Some(CustomersServiceError::InvalidCredentials.to_string()),
            }));

            Ok(())
        }
        Err(error) => Err(into_status_error(error)),
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use eshopper_app::domain::customers::{MockCustomersService, records::CustomerId};

    use crate::{
        accounts::handlers::tests::make_customer,
        test_helpers::{TestApp, cart_with, cookie_header, location},
    };

    use super::*;

    fn routes() -> Router {
        Router::with_path("login").get(form).post(submit)
    }

    #[tokio::test]
    async fn valid_credentials_log_the_customer_in() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers
            .expect_authenticate()
            .once()
            .withf(|email, password| email == "ada@example.com" && password == "engine")
            .return_once(|email, _| Ok(make_customer(7, email)));

        let app = TestApp {
            customers,
            ..TestApp::default()
        };
        let sessions = app.sessions();
        let key = sessions.seed(cart_with(&[("Chair", 1, 50, 1)])).await?;

        let res = TestClient::post("http://example.com/login")
            .add_header("cookie", cookie_header(&key), true)
            .form(&[("email", "ada@example.com"), ("password", "engine")])
            .send(&app.service(routes()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FOUND));
        assert_eq!(location(&res).as_deref(), Some("/"));

        let stored = sessions.stored(&key).await?;

        assert_eq!(stored.customer.id, Some(CustomerId::from_i64(7)));
        assert_eq!(stored.customer.first_name, "Ada");
        assert_eq!(stored.customer.phone.as_deref(), Some("0123456789"));
        assert!(stored.has_items(), "logging in keeps the cart");

        Ok(())
    }

    #[tokio::test]
    async fn wrong_credentials_re_render_the_form_with_one_message() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers
            .expect_authenticate()
            .once()
            .return_once(|_, _| Err(CustomersServiceError::InvalidCredentials));

        let app = TestApp {
            customers,
            ..TestApp::default()
        };

        let mut res = TestClient::post("http://example.com/login")
            .form(&[("email", "nobody@example.com"), ("password", "nope")])
            .send(&app.service(routes()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let page: LoginPage = res.take_json().await?;

        assert_eq!(page.error.as_deref(), Some("Invalid credentials!"));
        assert!(!page.session.customer.is_authenticated());

        Ok(())
    }

    #[tokio::test]
    async fn storage_failure_is_a_server_error() {
        let mut customers = MockCustomersService::new();

        customers
            .expect_authenticate()
            .once()
            .return_once(|_, _| Err(CustomersServiceError::Sql(sqlx::Error::PoolClosed)));

        let app = TestApp {
            customers,
            ..TestApp::default()
        };

        let res = TestClient::post("http://example.com/login")
            .form(&[("email", "ada@example.com"), ("password", "engine")])
            .send(&app.service(routes()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
