//! Request-level logging and request ids.

mod request_ids;
mod routes;

use std::time::Instant;

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Level, Span, event, field, info_span, warn};

use super::{metrics, settings};

/// Depot key under which handlers find the current request id.
const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Give every request an id, a span, a completion log line and metrics.
///
/// The exposition endpoint itself is left out so scrapes do not count
/// themselves.
#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.uri().path() == "/metrics" {
        ctrl.call_next(req, depot, res).await;

        return;
    }

    let started = Instant::now();
    let _in_flight = metrics::InFlight::enter();

    let request_id = request_ids::request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));
    request_ids::echo_request_id(res, &request_id);
    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

    let method = req.method().as_str().to_owned();
    let route = routes::route_label(req.uri().path());

    let span = info_span!(
        parent: None,
        "http.request",
        request_id = %request_id,
        method = %method,
        route = %route,
        path = %req.uri().path(),
        remote_addr = %req.remote_addr(),
        status = field::Empty,
        duration_ms = field::Empty,
    );

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let elapsed = started.elapsed();
    let status = res.status_code.unwrap_or(StatusCode::OK);

    metrics::observe_request(&method, &route, status, elapsed.as_secs_f64());

    finish(&span, status, elapsed.as_millis());
}

fn finish(span: &Span, status: StatusCode, duration_ms: u128) {
    span.record("status", status.as_u16());
    span.record("duration_ms", duration_ms);

    let _entered = span.enter();

    // Redirects are the storefront's normal answer to bad input, so only 4xx/5xx stand out.
    if status.is_server_error() {
        event!(Level::ERROR, status = status.as_u16(), duration_ms, "request failed");
    } else if status.is_client_error() {
        event!(Level::WARN, status = status.as_u16(), duration_ms, "request rejected");
    } else {
        event!(Level::INFO, status = status.as_u16(), duration_ms, "request completed");
    }

    let threshold_ms = settings::slow_request_threshold().as_millis();

    if duration_ms > threshold_ms {
        warn!(duration_ms, threshold_ms, "slow request");
    }
}
