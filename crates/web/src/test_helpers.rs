//! Helpers shared by handler tests.

use std::sync::Arc;

use salvo::{Response, Router, Service, affix_state};

use eshopper_app::{
    context::AppContext,
    domain::{
        carts::AddToCart, catalog::MockCatalogService, catalog::records::ProductId,
        customers::MockCustomersService, orders::MockOrdersService,
    },
    sessions::{MemorySessionStore, SessionKey, SessionManager, SessionState, SessionStore},
};

use crate::{
    router::app_router,
    sessions,
    state::{SessionCookie, State},
};

pub(crate) const SESSION_COOKIE: &str = "sessionid";

/// Mocked services over an in-memory session store.
#[derive(Default)]
pub(crate) struct TestApp {
    pub catalog: MockCatalogService,
    pub customers: MockCustomersService,
    pub orders: MockOrdersService,
    pub store: Arc<MemorySessionStore>,
}

impl TestApp {
    /// A handle on the session store that outlives the service.
    pub(crate) fn sessions(&self) -> TestSessions {
        TestSessions(Arc::clone(&self.store))
    }

    /// Serve `route` behind the state injection and session middleware.
    pub(crate) fn service(self, route: Router) -> Service {
        let router = Router::new()
            .hoop(affix_state::inject(self.into_state()))
            .hoop(sessions::middleware)
            .push(route);

        Service::new(router)
    }

    /// Serve the full application router.
    pub(crate) fn app_service(self) -> Service {
        let router = Router::new()
            .hoop(affix_state::inject(self.into_state()))
            .push(app_router());

        Service::new(router)
    }

    fn into_state(self) -> Arc<State> {
        let app = AppContext {
            catalog: Arc::new(self.catalog),
            customers: Arc::new(self.customers),
            orders: Arc::new(self.orders),
            sessions: SessionManager::new(self.store),
        };

        State::shared(app, SessionCookie::default())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct TestSessions(Arc<MemorySessionStore>);

impl TestSessions {
    /// Store `state` under a fresh key.
    pub(crate) async fn seed(&self, state: SessionState) -> Result<SessionKey, String> {
        let key = SessionKey::generate();
        let payload = state.encode().map_err(|e| e.to_string())?;

        self.0.save(&key, payload).await.map_err(|e| e.to_string())?;

        Ok(key)
    }

    /// The state currently stored under `key`.
    pub(crate) async fn stored(&self, key: &SessionKey) -> Result<SessionState, String> {
        let payload = self
            .0
            .load(key)
            .await
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("no session stored under {key}"))?;

        Ok(SessionState::decode(&payload))
    }

    pub(crate) async fn is_empty(&self) -> bool {
        self.0.is_empty().await
    }
}

/// A session state holding a cart of `(title, id, unit_price, quantity)` lines.
pub(crate) fn cart_with(lines: &[(&str, i64, u64, u32)]) -> SessionState {
    let mut state = SessionState::default();
    let cart = state.ensure_cart();

    for &(title, id, unit_price, quantity) in lines {
        for _ in 0..quantity {
            let added = cart.add_item(AddToCart {
                title: title.to_string(),
                product_id: ProductId::from_i64(id),
                unit_price,
                image: format!("{}.jpg", title.to_lowercase()),
            });

            assert_eq!(added, Ok(()), "test cart rejected {title}");
        }
    }

    state
}

pub(crate) fn cookie_header(key: &SessionKey) -> String {
    format!("{SESSION_COOKIE}={key}")
}

/// The session key a response issued, if any.
pub(crate) fn issued_key(res: &Response) -> Option<SessionKey> {
    res.cookie(SESSION_COOKIE)
        .and_then(|cookie| SessionKey::parse(cookie.value()))
}

pub(crate) fn location(res: &Response) -> Option<String> {
    res.headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
