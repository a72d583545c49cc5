// --- File: crates/cliniko_probe/src/report.rs ---
//! Human readable transcript of a probe run.
//!
//! The prober talks to a [`Reporter`]; [`ConsoleReporter`] renders to any
//! writer (stdout in the binary, a buffer in tests).

use crate::logic::{render_body, success_highlights};
use crate::models::{OutcomeKind, ProbeOutcome, ProbeResult, ProbeSummary, ResolvedProbe};
use cliniko_probe_common::ProbeError;
use std::io::Write;

/// Receives progress of a run.
pub trait Reporter {
    /// A new group of probes starts.
    fn section(&mut self, title: &str);

    /// About to send `probe` as `url` (query included). `index` is 1-based.
    fn attempt(&mut self, index: usize, total: usize, probe: &ResolvedProbe, url: &str);

    /// The result of the attempt just announced.
    fn outcome(&mut self, result: &ProbeResult);

    /// A success could not be written to disk.
    fn artifact_failed(&mut self, label: &str, error: &ProbeError);

    /// Free-form lines (business details, troubleshooting tips, ...).
    fn note(&mut self, message: &str);

    /// End-of-run aggregate.
    fn summary(&mut self, summary: &ProbeSummary);
}

const RULE_WIDTH: usize = 60;

pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // The transcript is best effort; a closed stdout must not abort a run.
    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
    }

    fn indented(&mut self, text: &str) {
        for line in text.lines() {
            self.line(&format!("      {}", line));
        }
    }
}

impl ConsoleReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn section(&mut self, title: &str) {
        self.line("");
        self.line(title);
        self.line(&"-".repeat(RULE_WIDTH));
    }

    fn attempt(&mut self, index: usize, total: usize, probe: &ResolvedProbe, url: &str) {
        self.line(&format!("   [{}/{}] {}", index, total, probe.label));
        self.line(&format!("      GET {}", url));
        if !probe.params.is_empty() {
            self.line(&format!("      Params: {}", probe.params));
        }
    }

    fn outcome(&mut self, result: &ProbeResult) {
        if let Some(status) = result.status {
            self.line(&format!("      Status: {}", status));
        }
        match &result.outcome {
            ProbeOutcome::Success(body) => {
                self.line("      🎉 SUCCESS!");
                let highlights = success_highlights(body);
                if !highlights.keys.is_empty() {
                    self.line(&format!("      Response keys: {:?}", highlights.keys));
                }
                if let Some(count) = highlights.slot_count {
                    self.line(&format!("      📅 Found {} available time slots", count));
                    for (i, slot) in highlights.sample_slots.iter().enumerate() {
                        self.line(&format!("         {}. {}", i + 1, slot));
                    }
                }
                if let Some(next) = highlights.next_available {
                    let next = next
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| next.to_string());
                    self.line(&format!("      📅 Next available: {}", next));
                }
                if let Some(path) = &result.artifact {
                    self.line(&format!("      💾 Saved to: {}", path.display()));
                }
            }
            ProbeOutcome::NotFound => {
                self.line("      ❌ 404 - Endpoint not found");
            }
            ProbeOutcome::ValidationError { body, text } => {
                self.line("      ⚠️  422 - Validation Error (endpoint exists, arguments rejected)");
                if !text.is_empty() {
                    self.line("      Error details:");
                    let rendered = render_body(body.as_ref(), text);
                    self.indented(&rendered);
                }
            }
            ProbeOutcome::TransportError(message) => {
                self.line(&format!("      ❌ Transport error: {}", message));
            }
            ProbeOutcome::Unexpected { status, snippet } => {
                self.line(&format!("      ⚠️  Status {}: {}", status, snippet));
            }
        }
        self.line("");
    }

    fn artifact_failed(&mut self, label: &str, error: &ProbeError) {
        self.line(&format!("      ❌ Could not save {}: {}", label, error));
    }

    fn note(&mut self, message: &str) {
        self.line(message);
    }

    fn summary(&mut self, summary: &ProbeSummary) {
        self.line("");
        self.line(&"=".repeat(RULE_WIDTH));
        let counts: Vec<String> = OutcomeKind::ALL
            .iter()
            .map(|kind| format!("{} {}", summary.count(*kind), kind))
            .collect();
        self.line(&format!(
            "Attempted {} probe(s): {}",
            summary.attempted(),
            counts.join(", ")
        ));
        if summary.has_success() {
            self.line("Working endpoints:");
            let lines: Vec<String> = summary
                .successes()
                .map(|result| match &result.artifact {
                    Some(path) => {
                        format!("  🎉 {} -> {} ({})", result.label, result.url, path.display())
                    }
                    None => format!("  🎉 {} -> {}", result.label, result.url),
                })
                .collect();
            for line in lines {
                self.line(&line);
            }
        } else {
            self.line("No working endpoint discovered.");
        }
    }
}
