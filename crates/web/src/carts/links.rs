//! Add/remove link parsing.
//!
//! Cart links carry everything the cart line needs:
//! `/{action}/{title}/{id}/{price}/{img}/{return_url}`.

use salvo::Request;

use eshopper_app::domain::{
    carts::{AddToCart, MAX_PRICE},
    catalog::records::ProductId,
};

/// Parse the item a cart link points at, or `None` when any part is malformed.
pub(super) fn item_from_path(req: &Request) -> Option<AddToCart> {
    let title = req.param::<String>("title").filter(|t| !t.is_empty())?;
    let id = req.param::<i64>("id")?;
    let price = parse_price(&req.param::<String>("price")?)?;
    let image = req.param::<String>("img")?;

    Some(AddToCart {
        title,
        product_id: ProductId::from_i64(id),
        unit_price: price,
        image,
    })
}

/// Read a link price in minor units.
///
/// Templates may render whole prices with a zero fraction (`"50.0"`); any
/// other fraction is rejected rather than rounded, as is anything above
/// [`MAX_PRICE`].
pub(super) fn parse_price(raw: &str) -> Option<u64> {
    let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));

    if !fraction.bytes().all(|b| b == b'0') {
        return None;
    }

    whole.parse().ok().filter(|&price| price <= MAX_PRICE)
}

/// Where to send the visitor after a cart change.
///
/// Always a local path. `home` is accepted as the name of the front page.
pub(super) fn return_location(req: &Request) -> String {
    local_path(&req.param::<String>("return_url").unwrap_or_default())
}

pub(super) fn local_path(return_url: &str) -> String {
    let path = return_url.trim().trim_start_matches(['/', '\\']);

    if path.is_empty() || path == "home" {
        return "/".to_string();
    }

    let looks_external = path.contains("://")
        || path.contains('\\')
        || path.chars().any(char::is_control)
        || path
            .split('/')
            .next()
            .is_some_and(|first| first.contains(':'));

    if looks_external {
        return "/".to_string();
    }

    format!("/{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_are_whole_minor_units() {
        assert_eq!(parse_price("50"), Some(50));
        assert_eq!(parse_price("50.0"), Some(50));
        assert_eq!(parse_price("50.00"), Some(50));
        assert_eq!(parse_price("49.99"), None);
        assert_eq!(parse_price("-5"), None);
        assert_eq!(parse_price("fifty"), None);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn prices_beyond_storable_range_are_rejected() {
        assert_eq!(parse_price("9223372036854775807"), Some(MAX_PRICE));
        assert_eq!(parse_price("9223372036854775808"), None);
        assert_eq!(parse_price("18446744073709551615"), None);
        assert_eq!(parse_price("18446744073709551616"), None);
    }

    #[test]
    fn return_urls_stay_on_site() {
        assert_eq!(local_path("cart"), "/cart");
        assert_eq!(local_path("product/1"), "/product/1");
        assert_eq!(local_path("/collections/Sofas"), "/collections/Sofas");
        assert_eq!(local_path("home"), "/");
        assert_eq!(local_path(""), "/");
        assert_eq!(local_path("//evil.example"), "/evil.example");
        assert_eq!(local_path("https://evil.example/x"), "/");
        assert_eq!(local_path("javascript:alert(1)"), "/");
        assert_eq!(local_path("\\\\evil.example"), "/evil.example");
        assert_eq!(local_path("a\\b"), "/");
    }
}
