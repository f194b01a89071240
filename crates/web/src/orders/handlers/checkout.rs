//! Checkout Handlers

use salvo::prelude::*;
use tracing::{debug, info, warn};

use eshopper_app::domain::{
    customers::data::GuestDetails,
    orders::data::{Checkout, ConfirmationStatus, CustomerIdentity},
};

use crate::{
    extensions::*,
    observability::record_order_placed,
    orders::errors::{checkout_redirect, into_status_error},
    pages::SessionView,
};

#[handler]
pub(crate) async fn form(depot: &mut Depot) -> Result<Json<SessionView>, StatusError> {
    let session = depot.session_or_500()?;

    Ok(Json(SessionView::from(session.state())))
}

/// Place an order for the session cart.
///
/// Guests submit their contact details with the form; logged-in customers
/// check out with the profile held in the session.
#[handler]
pub(crate) async fn submit(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let guest = match req.parse_form::<GuestDetails>().await {
        Ok(guest) => guest,
        Err(error) => {
            debug!(%error, "unreadable checkout form; continuing without guest details");

            GuestDetails::default()
        }
    };

    let state = depot.state_or_500()?;
    let session = depot.session_or_500()?;

    let Some(cart) = session.state().cart.clone().filter(|cart| !cart.is_empty()) else {
        return res.redirect_to("/");
    };

    let customer = session.state().customer.clone();
    let identity = CustomerIdentity::from_session(&customer, session.key());

    let checkout = Checkout {
        cart,
        customer,
        identity,
        guest,
    };

    let placed = match state.app.orders.place_order(checkout).await {
        Ok(placed) => placed,
        Err(error) => {
            return match checkout_redirect(&error) {
                Some(location) => {
                    info!("checkout abandoned: {error}");

                    res.redirect_to(location)
                }
                None => Err(into_status_error(error)),
            };
        }
    };

    if !placed.skipped.is_empty() {
        warn!(
            order_id = %placed.order.id,
            skipped = placed.skipped.len(),
            "order placed without some cart lines"
        );
    }

    if placed.confirmation == ConfirmationStatus::Pending {
        warn!(order_id = %placed.order.id, "order confirmation is pending");
    }

    record_order_placed();

    depot.session_or_500()?.state_mut().cart = None;

    res.redirect_to("/ordered")
}
