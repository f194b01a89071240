//! Request ids.
//!
//! A caller-supplied `x-request-id` is kept so a request can be followed
//! across a proxy; anything unprintable or oversized is replaced.

use salvo::{http::header::HeaderValue, prelude::Response};
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_CHARS: usize = 128;

pub(super) fn request_id(presented: Option<String>) -> String {
    presented
        .map(|id| id.trim().to_string())
        .filter(|id| {
            !id.is_empty()
                && id.len() <= MAX_REQUEST_ID_CHARS
                && id.bytes().all(|b| b.is_ascii_graphic())
        })
        .unwrap_or_else(|| Uuid::now_v7().simple().to_string())
}

pub(super) fn echo_request_id(res: &mut Response, request_id: &str) {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
}
