//! Redirect helpers.

use salvo::{
    http::{StatusCode, header::LOCATION},
    prelude::{Response, StatusError},
};

use crate::extensions::*;

pub(crate) trait RedirectExt {
    /// Answer with `302 Found` pointing at `location`.
    fn redirect_to(&mut self, location: &str) -> Result<(), StatusError>;
}

impl RedirectExt for Response {
    fn redirect_to(&mut self, location: &str) -> Result<(), StatusError> {
        self.add_header(LOCATION, location, true)
            .or_500("failed to set location header")?
            .status_code(StatusCode::FOUND);

        Ok(())
    }
}
