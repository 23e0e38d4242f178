//! URL utilities for consistent endpoint construction
//!
//! Backend base URLs arrive from flags, environment variables, or config
//! files, with or without trailing slashes. Joining them naively produces
//! `host//api/chat`, which some servers reject.

/// Normalize a base URL by removing trailing slashes.
///
/// # Examples
///
/// ```
/// use causerie::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:5000"), "http://localhost:5000");
/// assert_eq!(normalize_base_url("http://localhost:5000/"), "http://localhost:5000");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Construct a complete endpoint URL from a base URL and endpoint path.
///
/// # Examples
///
/// ```
/// use causerie::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:5000", "api/chat"),
///     "http://localhost:5000/api/chat"
/// );
/// assert_eq!(
///     construct_api_url("http://localhost:5000/", "/api/models"),
///     "http://localhost:5000/api/models"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{normalized_base}/{endpoint}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_any_number_of_trailing_slashes() {
        assert_eq!(
            normalize_base_url("http://localhost:5000///"),
            "http://localhost:5000"
        );
        assert_eq!(normalize_base_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_base_url(""), "");
    }

    #[test]
    fn joining_never_doubles_slashes() {
        assert_eq!(
            construct_api_url("http://localhost:5000/", "api/health"),
            "http://localhost:5000/api/health"
        );
        assert_eq!(
            construct_api_url("http://localhost:5000", "///api/health"),
            "http://localhost:5000/api/health"
        );
        assert_eq!(
            construct_api_url("https://chat.example.com/studio/", "api/chat"),
            "https://chat.example.com/studio/api/chat"
        );
    }
}
