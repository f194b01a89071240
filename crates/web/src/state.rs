//! State

use std::sync::Arc;

use eshopper_app::context::AppContext;

/// How the session cookie is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SessionCookie {
    pub(crate) name: String,
    pub(crate) secure: bool,
}

impl Default for SessionCookie {
    fn default() -> Self {
        Self {
            name: "sessionid".to_string(),
            secure: false,
        }
    }
}

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) cookie: SessionCookie,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, cookie: SessionCookie) -> Self {
        Self { app, cookie }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, cookie: SessionCookie) -> Arc<Self> {
        Arc::new(Self::new(app, cookie))
    }
}
