//! Fake Cliniko server and prober wiring shared by the integration tests.
#![allow(dead_code)]

use cliniko_probe::{ArtifactWriter, ConsoleReporter, Credential, Prober};
use cliniko_probe_config::ApiConfig;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const API_KEY: &str = "abc123";
pub const EXPECTED_AUTH: &str = "Basic YWJjMTIzOg==";

/// A wiremock server with no routes; anything unmatched answers 404.
pub struct MockCliniko {
    pub server: MockServer,
}

impl MockCliniko {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub async fn json(&self, route: &str, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn text(&self, route: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Answers too late for a one second client timeout.
    pub async fn stall(&self, route: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&self.server)
            .await;
    }

    /// Paths and raw query strings of everything received, in order.
    pub async fn requests(&self) -> Vec<(String, Option<String>)> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| (r.url.path().to_string(), r.url.query().map(str::to_string)))
            .collect()
    }
}

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: Some(1),
        ..ApiConfig::default()
    }
}

pub fn prober(base_url: &str, out_dir: &Path) -> Prober {
    let credential = Credential::new(API_KEY).unwrap();
    Prober::new(
        &api_config(base_url),
        &credential,
        ArtifactWriter::new(out_dir, false),
    )
    .unwrap()
}

pub fn reporter() -> ConsoleReporter<Vec<u8>> {
    ConsoleReporter::new(Vec::new())
}

pub fn transcript(reporter: ConsoleReporter<Vec<u8>>) -> String {
    String::from_utf8(reporter.into_inner()).unwrap()
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
