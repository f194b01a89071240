//! Signup Handlers

use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use eshopper_app::domain::customers::{
    CustomersServiceError, data::SignupForm, validation::ValidationError,
};

use crate::{accounts::errors::into_status_error, extensions::*, pages::SessionView};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SignupPage {
    #[serde(flatten)]
    pub session: SessionView,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// What was submitted, minus the password, so the form can be refilled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<SignupForm>,
}

#[handler]
pub(crate) async fn form(depot: &mut Depot) -> Result<Json<SignupPage>, StatusError> {
    let session = depot.session_or_500()?;

    Ok(Json(SignupPage {
        session: SessionView::from(session.state()),
        error: None,
        values: None,
    }))
}

/// Register a customer. Signing up does not log in.
#[handler]
pub(crate) async fn submit(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let submitted = req.parse_form::<SignupForm>().await.unwrap_or_default();

    let state = depot.state_or_500()?;

    let error = match state.app.customers.register(submitted.clone()).await {
        Ok(customer) => {
            info!(customer_id = %customer.id, "customer registered");

            return res.redirect_to("/");
        }
        Err(CustomersServiceError::Validation(error)) => error,
        Err(CustomersServiceError::AlreadyExists) => ValidationError::EmailTaken,
        Err(other) => return Err(into_status_error(other)),
    };

    let session = depot.session_or_500()?;

    res.render(Json(SignupPage {
        session: SessionView::from(session.state()),
        error: Some(error.to_string()),
        values: Some(submitted),
    }));

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use eshopper_app::domain::customers::MockCustomersService;

    use crate::{
        accounts::handlers::tests::make_customer,
        test_helpers::{TestApp, issued_key, location},
    };

    use super::*;

    fn routes() -> Router {
        Router::with_path("signup").get(form).post(submit)
    }

    const FORM: [(&str, &str); 6] = [
        ("first_name", "Ada"),
        ("last_name", "Lovelace"),
        ("address", "12 St James's Square"),
        ("phone", "0123456789"),
        ("email", "ada@example.com"),
        ("password", "engine"),
    ];

    #[tokio::test]
    async fn valid_signup_redirects_home_without_logging_in() {
        let mut customers = MockCustomersService::new();

        customers
            .expect_register()
            .once()
            .withf(|new_customer| {
                new_customer.email.as_deref() == Some("ada@example.com")
                    && new_customer.password.as_deref() == Some("engine")
            })
            .return_once(|new_customer| {
                Ok(make_customer(1, new_customer.email.as_deref().unwrap_or_default()))
            });

        let app = TestApp {
            customers,
            ..TestApp::default()
        };

        let res = TestClient::post("http://example.com/signup")
            .form(&FORM)
            .send(&app.service(routes()))
            .await;

        assert_eq!(location(&res).as_deref(), Some("/"));
        assert!(issued_key(&res).is_none(), "signup should not start a session");
    }

    #[tokio::test]
    async fn first_validation_failure_is_reported_with_values() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers
            .expect_register()
            .once()
            .return_once(|_| Err(ValidationError::PhoneTooShort.into()));

        let app = TestApp {
            customers,
            ..TestApp::default()
        };

        let mut res = TestClient::post("http://example.com/signup")
            .form(&FORM)
            .send(&app.service(routes()))
            .await;

        let page: SignupPage = res.take_json().await?;
        let values = page.values.ok_or("expected submitted values")?;

        assert_eq!(page.error.as_deref(), Some("Phone Number must be 10 char Long"));
        assert_eq!(values.first_name.as_deref(), Some("Ada"));
        assert_eq!(values.password, None, "password must not be echoed back");

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_race_reads_as_taken() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers
            .expect_register()
            .once()
            .return_once(|_| Err(CustomersServiceError::AlreadyExists));

        let app = TestApp {
            customers,
            ..TestApp::default()
        };

        let page: SignupPage = TestClient::post("http://example.com/signup")
            .form(&FORM)
            .send(&app.service(routes()))
            .await
            .take_json()
            .await?;

        assert_eq!(page.error.as_deref(), Some("Email Address Already Registered.."));

        Ok(())
    }
}
