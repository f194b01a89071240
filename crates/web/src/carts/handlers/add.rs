//! Add To Cart Handler

use salvo::prelude::*;
use tracing::debug;

use crate::{
    carts::links::{item_from_path, return_location},
    extensions::*,
};

/// Add one unit of the linked item, then go back to where the link was.
///
/// Malformed links, and adds the cart refuses, change nothing and send the
/// visitor home.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let Some(item) = item_from_path(req) else {
        debug!(path = req.uri().path(), "ignoring malformed add-to-cart link");

        return res.redirect_to("/");
    };

    let location = return_location(req);

    let key = item.key();

    if let Err(error) = depot
        .session_or_500()?
        .state_mut()
        .ensure_cart()
        .add_item(item)
    {
        debug!(cart_key = %key, %error, "add-to-cart refused");

        return res.redirect_to("/");
    }

    res.redirect_to(&location)
}
