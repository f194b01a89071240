//! Collection Page Handler

use salvo::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    pages::{ProductCard, SessionView, cards},
    storefront::errors::into_status_error,
};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CollectionPage {
    #[serde(flatten)]
    pub session: SessionView,
    pub name: String,
    pub products: Vec<ProductCard>,
}

/// Products of the category named in the path; an unknown name is just empty.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CollectionPage>, StatusError> {
    let name = req.param::<String>("name").unwrap_or_default();

    let state = depot.state_or_500()?;

    let products = state
        .app
        .catalog
        .products_in_category_named(&name)
        .await
        .map_err(into_status_error)?;

    let session = depot.session_or_500()?;

    Ok(Json(CollectionPage {
        session: SessionView::from(session.state()),
        name,
        products: cards(products),
    }))
}
