// --- File: crates/cliniko_probe/src/artifacts.rs ---
use crate::models::ParamSet;
use cliniko_probe_common::{Context, ProbeError};
use cliniko_probe_config::OutputConfig;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Turns a label into a file stem: anything outside `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_label(label: &str) -> String {
    let stem: String = label
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    // Leading dots would make hidden files or `..`.
    let stem = stem.trim_start_matches('.');
    if stem.is_empty() {
        "probe".to_string()
    } else {
        stem.to_string()
    }
}

pub fn artifact_file_name(label: &str) -> String {
    format!("{}.json", sanitize_label(label))
}

#[derive(Serialize)]
struct Envelope<'a> {
    endpoint: &'a str,
    params: &'a ParamSet,
    response: &'a Value,
}

/// Writes successful bodies as pretty JSON files named after the probe label.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    dir: PathBuf,
    envelope: bool,
}

impl ArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>, envelope: bool) -> Self {
        Self {
            dir: dir.into(),
            envelope,
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.dir, config.envelope)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, label: &str) -> PathBuf {
        self.dir.join(artifact_file_name(label))
    }

    /// Saves `body`, or the `{endpoint, params, response}` envelope when
    /// configured. Same label, same file: a later success overwrites.
    pub fn persist(
        &self,
        label: &str,
        url: &str,
        params: &ParamSet,
        body: &Value,
    ) -> Result<PathBuf, ProbeError> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating output directory {}", self.dir.display()))?;

        let contents = if self.envelope {
            serde_json::to_string_pretty(&Envelope {
                endpoint: url,
                params,
                response: body,
            })?
        } else {
            serde_json::to_string_pretty(body)?
        };

        let path = self.path_for(label);
        fs::write(&path, contents)?;
        debug!("wrote artifact {}", path.display());
        Ok(path)
    }
}
