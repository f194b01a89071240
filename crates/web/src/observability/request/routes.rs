//! Low-cardinality route labels for logs and metrics.

/// Collapse ids and free-form segments so every storefront page maps to one label.
///
/// Paths no route serves share a single label.
pub(super) fn route_label(path: &str) -> String {
    let mut segments = path.trim_matches('/').split('/').filter(|s| !s.is_empty());

    let Some(first) = segments.next() else {
        return "/".to_owned();
    };

    match first {
        "add" | "remove" => format!("/{first}/{{item}}"),
        "collections" => "/collections/{name}".to_owned(),
        "q" | "product" | "cart" | "login" | "logout" | "signup" | "order" | "orders"
        | "ordered" | "showcase" | "healthcheck" => match segments.next() {
            Some(_) => format!("/{first}/{{id}}"),
            None => format!("/{first}"),
        },
        _ => "unmatched".to_owned(),
    }
}
