//! Cart Page Handler

use salvo::prelude::*;

use crate::{extensions::*, pages::SessionView};

#[handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SessionView>, StatusError> {
    let session = depot.session_or_500()?;

    Ok(Json(SessionView::from(session.state())))
}
