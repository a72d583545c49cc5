use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Error as ReqwestError, Response};
use std::time::Duration;

/// Headers every request to a JSON API carries.
pub fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Creates a new HTTP client with custom configuration.
///
/// # Arguments
///
/// * `timeout_secs` - Request timeout; `None` keeps reqwest's default
/// * `user_agent` - Value of the `User-Agent` header
/// * `default_headers` - Headers attached to every request (auth, accept, ...)
pub fn create_client(
    timeout_secs: Option<u64>,
    user_agent: &str,
    default_headers: HeaderMap,
) -> Result<Client, ReqwestError> {
    let mut builder = Client::builder()
        .user_agent(user_agent.to_string())
        .default_headers(default_headers);
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}

/// Makes a GET request with the query parameters appended in the given order.
pub async fn get<P>(client: &Client, url: &str, params: &P) -> Result<Response, ReqwestError>
where
    P: serde::Serialize + ?Sized,
{
    client.get(url).query(params).send().await
}
