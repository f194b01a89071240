//! Remove From Cart Handler

use salvo::prelude::*;

use crate::{
    carts::links::{item_from_path, return_location},
    extensions::*,
};

/// Remove one unit of the linked item; the line goes away at zero.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let Some(item) = item_from_path(req) else {
        return res.redirect_to("/");
    };

    let location = return_location(req);

    if let Some(cart) = depot.session_or_500()?.state_mut().cart.as_mut() {
        cart.remove_item(&item.key());
    }

    res.redirect_to(&location)
}
