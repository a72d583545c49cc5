// --- File: crates/cliniko_probe/src/lib.rs ---
// Declare modules within this crate
pub mod artifacts;
#[cfg(test)]
mod artifacts_test;
pub mod auth;
pub mod discovery;
#[cfg(test)]
mod discovery_test;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod models;
pub mod prober;
pub mod report;
pub mod suites;
pub mod workflows;

pub use artifacts::ArtifactWriter;
pub use auth::{basic_auth_header, Credential};
pub use models::{
    EndpointCandidate, Identifiers, OutcomeKind, ParamSet, ProbeOutcome, ProbeResult,
    ProbeSummary, ResolvedProbe,
};
pub use prober::Prober;
pub use report::{ConsoleReporter, Reporter};
pub use suites::DateWindow;
