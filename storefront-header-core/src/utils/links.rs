//! Storefront link builders

/// Prefix a site path with the storefront root
#[must_use]
pub fn root_link(root_prefix: &str, path: &str) -> String {
    let prefix = root_prefix.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{prefix}{path}")
    } else {
        format!("{prefix}/{path}")
    }
}

/// Search results page for a query
#[must_use]
pub fn search_link(root_prefix: &str, query: &str) -> String {
    format!(
        "{}?q={}",
        root_link(root_prefix, "/search"),
        urlencoding::encode(query)
    )
}

/// Product detail page
#[must_use]
pub fn product_link(root_prefix: &str, url_key: &str, sku: &str) -> String {
    root_link(root_prefix, &format!("/products/{url_key}/{sku}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_link_joins_without_double_slash() {
        assert_eq!(root_link("", "/search"), "/search");
        assert_eq!(root_link("/en/", "/search"), "/en/search");
        assert_eq!(root_link("/en", "wishlist"), "/en/wishlist");
    }

    #[test]
    fn search_link_encodes_query() {
        assert_eq!(search_link("", "red shoes&more"), "/search?q=red%20shoes%26more");
    }

    #[test]
    fn product_link_uses_url_key_and_sku() {
        assert_eq!(product_link("/de", "wool-coat", "WC-01"), "/de/products/wool-coat/WC-01");
    }
}
