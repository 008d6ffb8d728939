//! Small shared helpers.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

const MAX_FILENAME_LEN: usize = 100;
const FALLBACK_FILENAME: &str = "default_url";

fn unsafe_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\-_.]").unwrap())
}

/// Derive a filesystem-safe stem from a URL, for naming output files after
/// the site they came from. Host and path are kept, every other character
/// becomes an underscore, and the result is capped at 100 characters.
/// Unparseable input falls back to `default_url`.
pub fn sanitize_filename(url: &str) -> String {
    let stem = match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default();
            format!("{}{}", host, parsed.path())
        }
        Err(_) => url.to_string(),
    };

    let safe = unsafe_chars().replace_all(&stem, "_");
    let trimmed = safe.trim_matches('_');

    if trimmed.is_empty() {
        return FALLBACK_FILENAME.to_string();
    }

    trimmed.chars().take(MAX_FILENAME_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_and_path_survive() {
        assert_eq!(
            sanitize_filename("https://example.org/resources/page"),
            "example.org_resources_page"
        );
    }

    #[test]
    fn test_query_string_is_flattened() {
        let name = sanitize_filename("https://example.org/list?page=2&sort=name");
        assert!(!name.contains('?'));
        assert!(!name.contains('&'));
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_empty_input_falls_back() {
        assert_eq!(sanitize_filename(""), FALLBACK_FILENAME);
    }

    #[test]
    fn test_long_url_is_truncated() {
        let url = format!("https://example.org/{}", "a".repeat(300));
        assert_eq!(sanitize_filename(&url).len(), MAX_FILENAME_LEN);
    }

    #[test]
    fn test_non_url_input_is_still_sanitized() {
        assert_eq!(sanitize_filename("my caregiver list!"), "my_caregiver_list");
    }
}
