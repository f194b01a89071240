//! Session cookie middleware.
//!
//! Every request under the storefront router runs with its session open and
//! locked. Handlers read and mutate it through the depot; the middleware
//! writes it back once the handler returns.

use std::sync::Arc;

use salvo::{
    http::cookie::{Cookie, SameSite},
    prelude::*,
};
use tracing::{debug, error};

use eshopper_app::sessions::{OpenSession, SessionKey, SessionWrite};

use crate::state::{SessionCookie, State};

#[handler]
pub(crate) async fn middleware(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let presented = req
        .cookie(&state.cookie.name)
        .and_then(|cookie| SessionKey::parse(cookie.value()));

    let session = match state.app.sessions.open(presented).await {
        Ok(session) => session,
        Err(source) => {
            error!("failed to load session: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let key = session.key().clone();
    let is_new = session.is_new();

    depot.inject(session);

    ctrl.call_next(req, depot, res).await;

    let Ok(session) = depot.scrape::<OpenSession>() else {
        error!("session went missing from the depot");

        return;
    };

    match state.app.sessions.close(session).await {
        Ok(SessionWrite::Saved) if is_new => {
            debug!(session = %key, "issuing session cookie");

            res.add_cookie(session_cookie(&state.cookie, &key));
        }
        Ok(SessionWrite::Saved | SessionWrite::Unchanged) => {}
        Err(source) => {
            error!("failed to save session: {source}");

            res.render(StatusError::internal_server_error());
        }
    }
}

fn session_cookie(config: &SessionCookie, key: &SessionKey) -> Cookie<'static> {
    Cookie::build((config.name.clone(), key.as_str().to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .build()
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        extensions::*,
        test_helpers::{SESSION_COOKIE, TestApp},
    };

    use super::*;

    #[handler]
    async fn touch_cart(depot: &mut Depot) -> Result<String, StatusError> {
        let session = depot.session_or_500()?;
        session.state_mut().ensure_cart();

        Ok(session.key().to_string())
    }

    #[handler]
    async fn read_only(depot: &mut Depot) -> Result<String, StatusError> {
        Ok(depot.session_or_500()?.state().customer.first_name.clone())
    }

    #[tokio::test]
    async fn new_session_with_state_gets_a_cookie() -> TestResult {
        let service = TestApp::default().service(Router::with_path("touch").get(touch_cart));

        let mut res = TestClient::get("http://example.com/touch")
            .send(&service)
            .await;

        let key = res.take_string().await?;
        let cookie = res.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

        assert_eq!(cookie, Some(key));

        Ok(())
    }

    #[tokio::test]
    async fn untouched_session_sets_no_cookie() -> TestResult {
        let service = TestApp::default().service(Router::with_path("read").get(read_only));

        let mut res = TestClient::get("http://example.com/read")
            .send(&service)
            .await;

        assert_eq!(res.take_string().await?, "Guest");
        assert!(res.cookie(SESSION_COOKIE).is_none(), "no cookie expected");

        Ok(())
    }

    #[tokio::test]
    async fn presented_cookie_resumes_the_session() -> TestResult {
        let service = TestApp::default().service(
            Router::new()
                .push(Router::with_path("touch").get(touch_cart))
                .push(Router::with_path("read").get(read_only)),
        );

        let mut first = TestClient::get("http://example.com/touch")
            .send(&service)
            .await;
        let key = first.take_string().await?;

        let mut second = TestClient::get("http://example.com/touch")
            .add_header("cookie", format!("{SESSION_COOKIE}={key}"), true)
            .send(&service)
            .await;

        assert_eq!(second.take_string().await?, key);
        assert!(
            second.cookie(SESSION_COOKIE).is_none(),
            "known session should not be re-issued"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_cookie_is_replaced() -> TestResult {
        let service = TestApp::default().service(Router::with_path("touch").get(touch_cart));

        let mut res = TestClient::get("http://example.com/touch")
            .add_header("cookie", format!("{SESSION_COOKIE}=forged123"), true)
            .send(&service)
            .await;

        let key = res.take_string().await?;

        assert_ne!(key, "forged123");
        assert_eq!(
            res.cookie(SESSION_COOKIE).map(|c| c.value().to_string()),
            Some(key)
        );

        Ok(())
    }
}
