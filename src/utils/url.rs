//! URL utilities for consistent URL handling
//!
//! Normalizes base URLs so endpoint construction never produces double
//! slashes, regardless of how the base URL was configured.

/// Normalize a base URL by removing trailing slashes
///
/// # Examples
///
/// ```
/// use lucky::utils::url::normalize_base_url;
///
/// assert_eq!(
///     normalize_base_url("https://generativelanguage.googleapis.com/v1beta/"),
///     "https://generativelanguage.googleapis.com/v1beta"
/// );
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Construct a complete API endpoint URL from a base URL and endpoint path
///
/// # Examples
///
/// ```
/// use lucky::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url(
///         "https://generativelanguage.googleapis.com/v1beta/",
///         "models/gemini-3-flash-preview:generateContent"
///     ),
///     "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_any_number_of_trailing_slashes() {
        assert_eq!(
            normalize_base_url("https://example.com/v1beta"),
            "https://example.com/v1beta"
        );
        assert_eq!(
            normalize_base_url("https://example.com/v1beta/"),
            "https://example.com/v1beta"
        );
        assert_eq!(
            normalize_base_url("https://example.com/v1beta///"),
            "https://example.com/v1beta"
        );
        assert_eq!(normalize_base_url(""), "");
    }

    #[test]
    fn construct_handles_slashes_on_either_side() {
        assert_eq!(
            construct_api_url("https://example.com/v1beta", "models/m:generateContent"),
            "https://example.com/v1beta/models/m:generateContent"
        );
        assert_eq!(
            construct_api_url("https://example.com/v1beta/", "/models/m:generateContent"),
            "https://example.com/v1beta/models/m:generateContent"
        );
    }
}
