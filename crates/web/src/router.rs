//! App Router

use salvo::Router;

use crate::{accounts, carts, healthcheck, observability, orders, sessions, storefront};

/// Cart links end with the page to return to, which may itself contain `/`.
const CART_LINK: &str = "{title}/{id}/{price}/{img}/{**return_url}";

/// Every route, without the outer middleware.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(storefront_router())
}

/// Pages that run with the visitor's session open.
fn storefront_router() -> Router {
    Router::new()
        .hoop(sessions::middleware)
        .get(storefront::home::handler)
        .push(
            Router::with_path("q")
                .get(storefront::search::handler)
                .post(storefront::search::handler),
        )
        .push(Router::with_path("product/{id}").get(storefront::product::handler))
        .push(Router::with_path("collections/{name}").get(storefront::collections::handler))
        .push(Router::with_path("cart").get(carts::view::handler))
        .push(Router::with_path("add").push(Router::with_path(CART_LINK).get(carts::add::handler)))
        .push(
            Router::with_path("remove")
                .push(Router::with_path(CART_LINK).get(carts::remove::handler)),
        )
        .push(
            Router::with_path("login")
                .get(accounts::login::form)
                .post(accounts::login::submit),
        )
        .push(Router::with_path("logout").get(accounts::logout::handler))
        .push(
            Router::with_path("signup")
                .get(accounts::signup::form)
                .post(accounts::signup::submit),
        )
        .push(
            Router::with_path("order")
                .get(orders::checkout::form)
                .post(orders::checkout::submit),
        )
        .push(
            Router::with_path("orders")
                .get(orders::history::handler)
                .push(Router::with_path("{id}").get(orders::detail::handler)),
        )
        .push(Router::with_path("ordered").get(orders::ordered::handler))
        .push(Router::with_path("showcase").get(orders::ordered::handler))
}
