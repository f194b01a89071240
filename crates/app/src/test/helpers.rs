//! Test Helpers

use crate::{
    domain::{
        catalog::{
            CatalogService, CatalogServiceError,
            data::NewProduct,
            records::{CategoryId, ProductRecord},
        },
        customers::{
            CustomersService, CustomersServiceError, data::SignupForm, records::CustomerRecord,
        },
    },
    test::TestContext,
};

pub(crate) async fn create_product(
    ctx: &TestContext,
    title: &str,
    category_id: CategoryId,
    price: u64,
) -> Result<ProductRecord, CatalogServiceError> {
    ctx.catalog
        .create_product(NewProduct {
            title: title.to_string(),
            material: "Oak".to_string(),
            description: None,
            price,
            category_id,
            image: format!("uploads/products/{}.jpg", title.to_lowercase().replace(' ', "-")),
        })
        .await
}

/// A sign-up form that passes validation.
pub(crate) fn signup_form(email: &str) -> SignupForm {
    SignupForm {
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        address: Some("12 St James's Square".to_string()),
        phone: Some("0123456789".to_string()),
        email: Some(email.to_string()),
        password: Some("engine".to_string()),
    }
}

pub(crate) async fn registered_customer(
    ctx: &TestContext,
    email: &str,
) -> Result<CustomerRecord, CustomersServiceError> {
    ctx.customers.register(signup_form(email)).await
}
