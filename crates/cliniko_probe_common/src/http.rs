// --- File: crates/cliniko_probe_common/src/http.rs ---

// Include the client module
pub mod client;

/// Joins a base URL and a path, tolerating a trailing `/` on the base and a
/// missing leading `/` on the path.
pub fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.is_empty() {
        base.to_string()
    } else if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Renders `url?query` for transcripts and logs, keeping parameter order.
///
/// Falls back to the bare URL if the parameters cannot be encoded.
pub fn display_url<P>(url: &str, params: &P) -> String
where
    P: serde::Serialize + ?Sized,
{
    match serde_urlencoded::to_string(params) {
        Ok(query) if !query.is_empty() => format!("{}?{}", url, query),
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_strips_trailing_slash() {
        assert_eq!(
            join_url("https://api.uk2.cliniko.com/v1/", "/businesses"),
            "https://api.uk2.cliniko.com/v1/businesses"
        );
        assert_eq!(
            join_url("https://api.uk2.cliniko.com/v1", "businesses"),
            "https://api.uk2.cliniko.com/v1/businesses"
        );
        assert_eq!(join_url("http://x/", ""), "http://x");
    }

    #[test]
    fn test_display_url_keeps_parameter_order() {
        let params = vec![("to", "2025-08-07"), ("from", "2025-08-01")];
        assert_eq!(
            display_url("http://x/a", &params),
            "http://x/a?to=2025-08-07&from=2025-08-01"
        );
    }

    #[test]
    fn test_display_url_without_params() {
        let params: Vec<(String, String)> = Vec::new();
        assert_eq!(display_url("http://x/a", &params), "http://x/a");
    }
}
