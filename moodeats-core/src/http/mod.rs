//! HTTP transport for the recipe catalog.
//!
//! All catalog traffic goes through the [`HttpClient`] trait so the catalog
//! client can be exercised against canned responses in tests.

mod client;
mod rate_limiter;

pub use client::{CatalogHttpClient, CatalogHttpClientBuilder, HttpClient, MockClient, MockResponse};
pub use rate_limiter::RateLimiter;

/// Extract the host of a URL, used as the rate limiting key.
pub fn host_of(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_of() {
        assert_eq!(
            host_of("https://www.themealdb.com/api/json/v1/1/categories.php"),
            Some("www.themealdb.com".to_string())
        );
        assert_eq!(host_of("not a url"), None);
    }
}
