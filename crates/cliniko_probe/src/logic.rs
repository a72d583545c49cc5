// --- File: crates/cliniko_probe/src/logic.rs ---
//! Response classification. Pure functions only; the prober does the I/O.

use crate::models::ProbeOutcome;
use serde_json::Value;

/// Longest body excerpt kept for unexpected responses.
pub const SNIPPET_CHARS: usize = 200;

/// How many slots a success report shows.
pub const SAMPLE_SLOTS: usize = 3;

/// Maps a status code and raw body to an outcome.
///
/// Only 200 counts as success, and only with a JSON body.
pub fn classify(status: u16, body: &str) -> ProbeOutcome {
    match status {
        200 => match serde_json::from_str::<Value>(body) {
            Ok(value) => ProbeOutcome::Success(value),
            Err(_) => ProbeOutcome::Unexpected {
                status,
                snippet: snippet(body),
            },
        },
        404 => ProbeOutcome::NotFound,
        422 => ProbeOutcome::ValidationError {
            body: serde_json::from_str(body).ok(),
            text: body.trim().to_string(),
        },
        _ => ProbeOutcome::Unexpected {
            status,
            snippet: snippet(body),
        },
    }
}

/// The first `SNIPPET_CHARS` characters of a trimmed body, never splitting a
/// UTF-8 sequence.
pub fn snippet(body: &str) -> String {
    body.trim().chars().take(SNIPPET_CHARS).collect()
}

/// The parts of a successful body worth printing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuccessHighlights {
    /// Top-level keys, when the body is an object.
    pub keys: Vec<String>,
    /// Length of `available_times`, when present and an array.
    pub slot_count: Option<usize>,
    pub sample_slots: Vec<Value>,
    pub next_available: Option<Value>,
}

pub fn success_highlights(body: &Value) -> SuccessHighlights {
    let Some(object) = body.as_object() else {
        return SuccessHighlights::default();
    };

    let mut highlights = SuccessHighlights {
        keys: object.keys().cloned().collect(),
        ..Default::default()
    };
    if let Some(slots) = object.get("available_times").and_then(Value::as_array) {
        highlights.slot_count = Some(slots.len());
        highlights.sample_slots = slots.iter().take(SAMPLE_SLOTS).cloned().collect();
    }
    highlights.next_available = object.get("next_available_time").cloned();
    highlights
}

/// Pretty JSON when the text parses, otherwise the text itself.
pub fn render_body(body: Option<&Value>, text: &str) -> String {
    body.and_then(|value| serde_json::to_string_pretty(value).ok())
        .unwrap_or_else(|| text.to_string())
}
