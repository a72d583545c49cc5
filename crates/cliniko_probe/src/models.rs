// --- File: crates/cliniko_probe/src/models.rs ---
use cliniko_probe_common::ProbeError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

// --- Identifiers ---

pub const BUSINESS_ID: &str = "business_id";
pub const PRACTITIONER_ID: &str = "practitioner_id";
pub const APPOINTMENT_TYPE_ID: &str = "appointment_type_id";

/// Account specific ids a path template can refer to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identifiers {
    pub business_id: Option<String>,
    pub practitioner_id: Option<String>,
    pub appointment_type_id: Option<String>,
}

impl Identifiers {
    pub fn new(business_id: Option<String>, practitioner_id: Option<String>) -> Self {
        Self {
            business_id: clean(business_id),
            practitioner_id: clean(practitioner_id),
            appointment_type_id: None,
        }
    }

    /// A copy bound to one appointment type.
    pub fn with_appointment_type(&self, appointment_type_id: impl Into<String>) -> Self {
        Self {
            appointment_type_id: clean(Some(appointment_type_id.into())),
            ..self.clone()
        }
    }

    /// Looks up a placeholder name. `None` for names that are not identifiers.
    fn lookup(&self, placeholder: &str) -> Option<Option<&str>> {
        match placeholder {
            BUSINESS_ID => Some(self.business_id.as_deref()),
            PRACTITIONER_ID => Some(self.practitioner_id.as_deref()),
            APPOINTMENT_TYPE_ID => Some(self.appointment_type_id.as_deref()),
            _ => None,
        }
    }

    /// Fails with `MissingIdentifier` for the first name that is unset.
    pub fn require(&self, label: &str, placeholders: &[&str]) -> Result<(), ProbeError> {
        for placeholder in placeholders {
            if let Some(None) = self.lookup(placeholder) {
                return Err(ProbeError::MissingIdentifier {
                    label: label.to_string(),
                    placeholder: placeholder.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn clean(id: Option<String>) -> Option<String> {
    id.map(|id| id.trim().to_string()).filter(|id| !id.is_empty())
}

// --- Parameter Set ---

/// Query parameters in insertion order. Serializes as a map, so it can be
/// handed to `reqwest` as a query and written into JSON artifacts as an object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet(Vec<(String, String)>);

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `insert`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Replaces an existing key in place, otherwise appends.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// A copy with every entry of `other` inserted on top.
    pub fn merged(&self, other: &ParamSet) -> ParamSet {
        let mut merged = self.clone();
        for (key, value) in other.iter() {
            merged.insert(key, value);
        }
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParamSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = ParamSet::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl Serialize for ParamSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl fmt::Display for ParamSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "{{}}");
        }
        write!(f, "{{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

// --- Path Template ---

/// A path such as `/practitioners/{practitioner_id}/appointment_types`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate(String);

impl PathTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Placeholder names in order of appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.0.as_str();
        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => {
                    names.push(&after[..close]);
                    rest = &after[close + 1..];
                }
                None => break,
            }
        }
        names
    }

    /// Substitutes every placeholder. An unterminated `{` is kept literally.
    pub fn resolve(&self, ids: &Identifiers, label: &str) -> Result<String, ProbeError> {
        let mut resolved = String::with_capacity(self.0.len() + 32);
        let mut rest = self.0.as_str();

        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                break;
            };
            let placeholder = &after[..close];
            let value = match ids.lookup(placeholder) {
                Some(Some(value)) => value,
                Some(None) => {
                    return Err(ProbeError::MissingIdentifier {
                        label: label.to_string(),
                        placeholder: placeholder.to_string(),
                    })
                }
                None => {
                    return Err(ProbeError::UnknownPlaceholder {
                        template: self.0.clone(),
                        placeholder: placeholder.to_string(),
                    })
                }
            };
            resolved.push_str(&rest[..open]);
            resolved.push_str(value);
            rest = &after[close + 1..];
        }
        resolved.push_str(rest);
        Ok(resolved)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Candidates ---

/// One speculative request: where to go, with what, and what to call it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointCandidate {
    /// Human readable name; also names the artifact file.
    pub label: String,
    pub template: PathTemplate,
    pub params: ParamSet,
    pub ids: Identifiers,
}

impl EndpointCandidate {
    pub fn new(label: impl Into<String>, template: &str, ids: &Identifiers) -> Self {
        Self {
            label: label.into(),
            template: PathTemplate::new(template),
            params: ParamSet::new(),
            ids: ids.clone(),
        }
    }

    pub fn with_params(mut self, params: ParamSet) -> Self {
        self.params = params;
        self
    }

    pub fn resolve(&self) -> Result<ResolvedProbe, ProbeError> {
        Ok(ResolvedProbe {
            label: self.label.clone(),
            path: self.template.resolve(&self.ids, &self.label)?,
            params: self.params.clone(),
        })
    }
}

/// Resolves a whole plan up front so a missing id surfaces before any request.
pub fn resolve_all(candidates: &[EndpointCandidate]) -> Result<Vec<ResolvedProbe>, ProbeError> {
    candidates.iter().map(EndpointCandidate::resolve).collect()
}

/// A candidate with a concrete path, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProbe {
    pub label: String,
    pub path: String,
    pub params: ParamSet,
}

// --- Outcomes ---

/// What a single probe told us.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// 200 with a JSON body.
    Success(Value),
    /// 404: no endpoint under this path shape.
    NotFound,
    /// 422: the endpoint exists but rejected the arguments.
    ValidationError { body: Option<Value>, text: String },
    /// DNS, TLS, connect, timeout or body read failure.
    TransportError(String),
    /// Anything else, including a 200 whose body is not JSON.
    Unexpected { status: u16, snippet: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Success,
    NotFound,
    ValidationError,
    TransportError,
    Unexpected,
}

impl OutcomeKind {
    pub const ALL: [OutcomeKind; 5] = [
        OutcomeKind::Success,
        OutcomeKind::NotFound,
        OutcomeKind::ValidationError,
        OutcomeKind::TransportError,
        OutcomeKind::Unexpected,
    ];
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutcomeKind::Success => "success",
            OutcomeKind::NotFound => "not found",
            OutcomeKind::ValidationError => "validation error",
            OutcomeKind::TransportError => "transport error",
            OutcomeKind::Unexpected => "unexpected",
        };
        f.write_str(name)
    }
}

impl ProbeOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            ProbeOutcome::Success(_) => OutcomeKind::Success,
            ProbeOutcome::NotFound => OutcomeKind::NotFound,
            ProbeOutcome::ValidationError { .. } => OutcomeKind::ValidationError,
            ProbeOutcome::TransportError(_) => OutcomeKind::TransportError,
            ProbeOutcome::Unexpected { .. } => OutcomeKind::Unexpected,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success(_))
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            ProbeOutcome::Success(body) => Some(body),
            _ => None,
        }
    }
}

/// The record of one attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    pub label: String,
    /// Full URL including the query string.
    pub url: String,
    pub params: ParamSet,
    /// `None` when no response arrived.
    pub status: Option<u16>,
    pub outcome: ProbeOutcome,
    /// Where the body was saved, for successes that could be written.
    pub artifact: Option<PathBuf>,
}

/// All attempts of a run, in the order they were made.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeSummary {
    pub results: Vec<ProbeResult>,
}

impl ProbeSummary {
    pub fn push(&mut self, result: ProbeResult) {
        self.results.push(result);
    }

    pub fn merge(&mut self, other: ProbeSummary) {
        self.results.extend(other.results);
    }

    pub fn attempted(&self) -> usize {
        self.results.len()
    }

    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome.kind() == kind)
            .count()
    }

    pub fn successes(&self) -> impl Iterator<Item = &ProbeResult> {
        self.results.iter().filter(|r| r.outcome.is_success())
    }

    pub fn has_success(&self) -> bool {
        self.successes().next().is_some()
    }
}
