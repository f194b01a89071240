//! Logout Handler

use salvo::prelude::*;

use crate::extensions::*;

/// Forget the customer and the cart; the session key stays.
#[handler]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    depot.session_or_500()?.reset();

    res.redirect_to("/")
}
