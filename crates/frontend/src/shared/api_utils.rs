//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use super::config::api_base_url;

/// Get the base URL for API requests, without trailing slash
pub fn api_base() -> String {
    api_base_url().trim_end_matches('/').to_string()
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust
/// # use frontend::shared::api_utils::api_url;
/// let url = api_url("/setores/3");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

/// Joins base and path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://h:8080", "/setores"), "http://h:8080/setores");
        assert_eq!(join_url("http://h:8080/", "setores/1"), "http://h:8080/setores/1");
        assert_eq!(join_url("http://h:8080//", "//x"), "http://h:8080/x");
        assert_eq!(join_url("http://h", ""), "http://h");
    }
}
