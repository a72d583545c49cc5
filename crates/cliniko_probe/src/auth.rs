// --- File: crates/cliniko_probe/src/auth.rs ---
use base64::{engine::general_purpose::STANDARD as base64_engine, Engine as _};
use cliniko_probe_common::{json_headers, validation_error, ProbeError};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::fmt;

/// Builds the HTTP Basic header Cliniko expects: the API key as user name and
/// an empty password, i.e. `Basic base64(api_key + ":")`.
pub fn basic_auth_header(api_key: &str) -> String {
    let encoded = base64_engine.encode(format!("{}:", api_key));
    format!("Basic {}", encoded)
}

/// An API key. Read-only after construction and never printed.
#[derive(Clone)]
pub struct Credential {
    api_key: String,
}

impl Credential {
    /// Surrounding whitespace (e.g. from a pasted key) is dropped.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProbeError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(validation_error("API key is required"));
        }
        Ok(Self { api_key })
    }

    pub fn basic_auth_header(&self) -> String {
        basic_auth_header(&self.api_key)
    }

    /// Authorization plus the JSON `Accept`/`Content-Type` headers.
    pub fn headers(&self) -> Result<HeaderMap, ProbeError> {
        let mut value = HeaderValue::from_str(&self.basic_auth_header())
            .map_err(|e| validation_error(format!("API key is not a valid header value: {}", e)))?;
        value.set_sensitive(true);

        let mut headers = json_headers();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &"<redacted>")
            .finish()
    }
}
