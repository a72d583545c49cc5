// --- File: crates/cliniko_probe/src/prober.rs ---
use crate::artifacts::ArtifactWriter;
use crate::auth::Credential;
use crate::logic::classify;
use crate::models::{
    resolve_all, EndpointCandidate, ProbeOutcome, ProbeResult, ProbeSummary, ResolvedProbe,
};
use crate::report::Reporter;
use cliniko_probe_common::{create_client, display_url, get, join_url, log_error, ProbeError};
use cliniko_probe_config::ApiConfig;
use reqwest::Client;
use tracing::{debug, info, warn};

/// Sends probes one at a time and records what came back.
///
/// The client carries the credential as default headers and is never mutated
/// after construction.
#[derive(Debug, Clone)]
pub struct Prober {
    client: Client,
    base_url: String,
    artifacts: ArtifactWriter,
}

impl Prober {
    pub fn new(
        api: &ApiConfig,
        credential: &Credential,
        artifacts: ArtifactWriter,
    ) -> Result<Self, ProbeError> {
        let client = create_client(api.timeout_secs, &api.user_agent, credential.headers()?)?;
        Ok(Self::with_client(client, &api.base_url, artifacts))
    }

    /// Uses a prepared client as-is; it must already carry any auth headers.
    pub fn with_client(client: Client, base_url: &str, artifacts: ArtifactWriter) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            artifacts,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn artifacts(&self) -> &ArtifactWriter {
        &self.artifacts
    }

    /// Full URL (query included) a probe is sent to.
    pub fn url_for(&self, probe: &ResolvedProbe) -> String {
        display_url(&join_url(&self.base_url, &probe.path), &probe.params)
    }

    /// Sends one probe and classifies the answer. No reporting, no files.
    pub async fn execute(&self, probe: &ResolvedProbe) -> (Option<u16>, ProbeOutcome) {
        let url = join_url(&self.base_url, &probe.path);
        let response = match get(&self.client, &url, &probe.params).await {
            Ok(response) => response,
            Err(e) => return (None, ProbeOutcome::TransportError(e.to_string())),
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => (Some(status), classify(status, &body)),
            Err(e) => (
                Some(status),
                ProbeOutcome::TransportError(format!("failed to read body: {}", e)),
            ),
        }
    }

    /// Sends one probe, reports it, and saves the body on success.
    pub async fn probe_one(
        &self,
        index: usize,
        total: usize,
        probe: &ResolvedProbe,
        reporter: &mut dyn Reporter,
    ) -> ProbeResult {
        let url = self.url_for(probe);
        reporter.attempt(index, total, probe, &url);

        let (status, outcome) = self.execute(probe).await;
        log_outcome(&probe.label, &url, status, &outcome);

        let artifact = match &outcome {
            ProbeOutcome::Success(body) => {
                match self.artifacts.persist(&probe.label, &url, &probe.params, body) {
                    Ok(path) => Some(path),
                    Err(e) => {
                        log_error(&e, &format!("saving artifact for {}", probe.label));
                        reporter.artifact_failed(&probe.label, &e);
                        None
                    }
                }
            }
            _ => None,
        };

        let result = ProbeResult {
            label: probe.label.clone(),
            url,
            params: probe.params.clone(),
            status,
            outcome,
            artifact,
        };
        reporter.outcome(&result);
        result
    }

    /// Runs already resolved probes in order. Every probe is attempted.
    pub async fn run_section(
        &self,
        title: &str,
        probes: &[ResolvedProbe],
        reporter: &mut dyn Reporter,
    ) -> ProbeSummary {
        reporter.section(title);
        let mut summary = ProbeSummary::default();
        for (i, probe) in probes.iter().enumerate() {
            let result = self.probe_one(i + 1, probes.len(), probe, reporter).await;
            summary.push(result);
        }
        summary
    }

    /// Resolves every candidate, runs them, and reports the aggregate.
    ///
    /// Fails only when a template cannot be resolved, and then before any
    /// request is sent.
    pub async fn run(
        &self,
        title: &str,
        candidates: &[EndpointCandidate],
        reporter: &mut dyn Reporter,
    ) -> Result<ProbeSummary, ProbeError> {
        let probes = resolve_all(candidates)?;
        let summary = self.run_section(title, &probes, reporter).await;
        info!(
            attempted = summary.attempted(),
            succeeded = summary.successes().count(),
            "probe run finished"
        );
        reporter.summary(&summary);
        Ok(summary)
    }
}

fn log_outcome(label: &str, url: &str, status: Option<u16>, outcome: &ProbeOutcome) {
    match outcome {
        ProbeOutcome::Success(_) => info!(label, url, status, "endpoint responded with data"),
        ProbeOutcome::NotFound => debug!(label, url, "endpoint not found"),
        ProbeOutcome::ValidationError { text, .. } => {
            warn!(label, url, body = %text, "endpoint rejected the arguments")
        }
        ProbeOutcome::TransportError(message) => {
            warn!(label, url, error = %message, "request failed")
        }
        ProbeOutcome::Unexpected { status, snippet } => {
            warn!(label, url, status, body = %snippet, "unexpected response")
        }
    }
}
