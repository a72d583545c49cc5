// --- File: crates/cliniko_probe/src/suites.rs ---
//! Candidate lists for the endpoint shapes worth trying.
//!
//! Pure builders: nothing here sends a request. Labels double as artifact
//! names, so each one is unique within its suite.

use crate::models::{EndpointCandidate, Identifiers, ParamSet};
use chrono::{Duration, NaiveDate};
use cliniko_probe_common::{validation_error, ProbeError};
use cliniko_probe_config::WindowConfig;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Default length of the probed date window.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Working-hours bounds used for the time-constrained parameter set.
pub const TIME_FROM: &str = "09:00";
pub const TIME_TO: &str = "17:00";

/// Name given to an appointment type whose lookup failed.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Path segments tried as practitioner-level availability endpoints.
pub const ALTERNATIVE_ENDPOINTS: [&str; 8] = [
    "availability",
    "schedule",
    "available_slots",
    "bookable_times",
    "time_slots",
    "booking_times",
    "available",
    "times",
];

// --- Date window ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ProbeError> {
        if to < from {
            return Err(validation_error(format!(
                "date window ends ({}) before it starts ({})",
                to, from
            )));
        }
        Ok(Self { from, to })
    }

    /// `start` up to `start + days`.
    pub fn starting(start: NaiveDate, days: i64) -> Self {
        Self {
            from: start,
            to: start + Duration::days(days.max(0)),
        }
    }

    /// Missing bounds default to `today` and `from + DEFAULT_WINDOW_DAYS`.
    pub fn from_bounds(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, ProbeError> {
        let from = from.unwrap_or(today);
        let to = to.unwrap_or_else(|| from + Duration::days(DEFAULT_WINDOW_DAYS));
        Self::new(from, to)
    }

    /// Configured bounds, each parsed and defaulted as in `from_bounds`.
    pub fn from_config(config: &WindowConfig, today: NaiveDate) -> Result<Self, ProbeError> {
        let (from, to) = configured_bounds(config)?;
        Self::from_bounds(from, to, today)
    }

    pub fn params(&self) -> ParamSet {
        ParamSet::new()
            .with("from", format_date(self.from))
            .with("to", format_date(self.to))
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ProbeError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| validation_error(format!("'{}' is not a YYYY-MM-DD date", raw.trim())))
}

/// The `[window]` bounds as dates; blank strings count as unset.
pub fn configured_bounds(
    config: &WindowConfig,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), ProbeError> {
    let parse = |bound: &Option<String>| {
        bound
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(parse_date)
            .transpose()
    };
    Ok((parse(&config.from)?, parse(&config.to)?))
}

// --- Appointment types ---

/// An appointment type id with the name used in labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentTypeRef {
    pub id: String,
    pub name: String,
}

impl AppointmentTypeRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The name, or the id when the name could not be looked up.
    pub fn label_part(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() || name == UNKNOWN_NAME {
            &self.id
        } else {
            name
        }
    }
}

// --- Connection / basic suite ---

pub const BUSINESSES_LABEL: &str = "cliniko_businesses";
pub const AVAILABLE_TIMES_LABEL: &str = "available_times_response";
pub const PRACTITIONER_APPOINTMENT_TYPES_LABEL: &str = "practitioner_appointment_types";

/// Baseline reachability and credential check.
pub fn connection_probe() -> EndpointCandidate {
    EndpointCandidate::new(BUSINESSES_LABEL, "/businesses", &Identifiers::default())
}

/// The fully nested `available_times` endpoint with optional bounds.
pub fn available_times_probe(
    ids: &Identifiers,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> EndpointCandidate {
    let mut params = ParamSet::new();
    if let Some(from) = from {
        params.insert("from", format_date(from));
    }
    if let Some(to) = to {
        params.insert("to", format_date(to));
    }
    EndpointCandidate::new(
        AVAILABLE_TIMES_LABEL,
        "/businesses/{business_id}/practitioners/{practitioner_id}/appointment_types/{appointment_type_id}/available_times",
        ids,
    )
    .with_params(params)
}

/// Single appointment type, used to look up its name.
pub fn appointment_type_lookup(ids: &Identifiers) -> EndpointCandidate {
    EndpointCandidate::new(
        "appointment_type",
        "/appointment_types/{appointment_type_id}",
        ids,
    )
}

pub fn practitioner_appointment_types(ids: &Identifiers) -> EndpointCandidate {
    EndpointCandidate::new(
        PRACTITIONER_APPOINTMENT_TYPES_LABEL,
        "/practitioners/{practitioner_id}/appointment_types",
        ids,
    )
}

// --- next_available_time suite ---

const NESTED_NEXT_AVAILABLE: &str = "/businesses/{business_id}/practitioners/{practitioner_id}/appointment_types/{appointment_type_id}/next_available_time";

/// The nested endpoint once per appointment type, without parameters.
pub fn next_available_nested(
    ids: &Identifiers,
    appointment_types: &[AppointmentTypeRef],
) -> Vec<EndpointCandidate> {
    appointment_types
        .iter()
        .map(|apt| {
            EndpointCandidate::new(
                format!("success_next_available_time_{}", apt.label_part()),
                NESTED_NEXT_AVAILABLE,
                &ids.with_appointment_type(&apt.id),
            )
        })
        .collect()
}

/// Other places `next_available_time` might hang off.
pub fn next_available_variations(
    ids: &Identifiers,
    appointment_type: &AppointmentTypeRef,
) -> Vec<EndpointCandidate> {
    let ids = ids.with_appointment_type(&appointment_type.id);
    [
        "/appointment_types/{appointment_type_id}/next_available_time",
        "/practitioners/{practitioner_id}/appointment_types/{appointment_type_id}/next_available_time",
        "/businesses/{business_id}/appointment_types/{appointment_type_id}/next_available_time",
        "/next_available_time",
        "/practitioners/{practitioner_id}/next_available_time",
        "/businesses/{business_id}/next_available_time",
    ]
    .iter()
    .enumerate()
    .map(|(i, template)| {
        EndpointCandidate::new(
            format!("success_variation_{}_next_available_time", i + 1),
            template,
            &ids,
        )
    })
    .collect()
}

/// The nested endpoint with the parameter combinations worth trying.
pub fn next_available_param_sets(
    ids: &Identifiers,
    appointment_type: &AppointmentTypeRef,
    window: &DateWindow,
    today: NaiveDate,
) -> Vec<EndpointCandidate> {
    let ids = ids.with_appointment_type(&appointment_type.id);
    let from = format_date(window.from);

    let mut redundant_ids = ParamSet::new();
    if let Some(business_id) = &ids.business_id {
        redundant_ids.insert("business_id", business_id.as_str());
    }
    if let Some(practitioner_id) = &ids.practitioner_id {
        redundant_ids.insert("practitioner_id", practitioner_id.as_str());
    }
    redundant_ids.insert("from", from.as_str());

    let param_sets = vec![
        ParamSet::new(),
        window.params(),
        ParamSet::new().with("from", from.as_str()),
        ParamSet::new().with("from", format_date(today)),
        window
            .params()
            .with("time_from", TIME_FROM)
            .with("time_to", TIME_TO),
        redundant_ids,
    ];

    param_sets
        .into_iter()
        .enumerate()
        .map(|(i, params)| {
            EndpointCandidate::new(
                format!("success_with_params_{}_next_available_time", i + 1),
                NESTED_NEXT_AVAILABLE,
                &ids,
            )
            .with_params(params)
        })
        .collect()
}

// --- working patterns suite ---

/// Three `available_times` shapes per appointment type.
pub fn available_times_patterns(
    ids: &Identifiers,
    appointment_types: &[AppointmentTypeRef],
    window: &DateWindow,
) -> Vec<EndpointCandidate> {
    let date_params = window.params();
    let mut candidates = Vec::with_capacity(appointment_types.len() * 3);

    for apt in appointment_types {
        let apt_ids = ids.with_appointment_type(&apt.id);
        let name = apt.label_part();

        candidates.push(
            EndpointCandidate::new(
                format!("working_available_times_practitioner_path_{}", name),
                "/practitioners/{practitioner_id}/appointment_types/{appointment_type_id}/available_times",
                &apt_ids,
            )
            .with_params(date_params.clone()),
        );
        candidates.push(
            EndpointCandidate::new(
                format!("working_available_times_direct_apt_type_{}", name),
                "/appointment_types/{appointment_type_id}/available_times",
                &apt_ids,
            )
            .with_params(date_params.clone()),
        );

        let mut with_practitioner = date_params.clone();
        if let Some(practitioner_id) = &ids.practitioner_id {
            with_practitioner.insert("practitioner_id", practitioner_id.as_str());
        }
        candidates.push(
            EndpointCandidate::new(
                format!("working_available_times_apt_type_with_prac_param_{}", name),
                "/appointment_types/{appointment_type_id}/available_times",
                &apt_ids,
            )
            .with_params(with_practitioner),
        );
    }
    candidates
}

/// Every alternative practitioner endpoint, bare and with the date window.
pub fn alternative_practitioner_endpoints(
    ids: &Identifiers,
    window: &DateWindow,
) -> Vec<EndpointCandidate> {
    let mut candidates = Vec::with_capacity(ALTERNATIVE_ENDPOINTS.len() * 2);
    for segment in ALTERNATIVE_ENDPOINTS {
        let template = format!("/practitioners/{{practitioner_id}}/{}", segment);
        candidates.push(EndpointCandidate::new(
            format!("found_alternative_{}", segment),
            &template,
            ids,
        ));
        candidates.push(
            EndpointCandidate::new(
                format!("found_alternative_with_params_{}", segment),
                &template,
                ids,
            )
            .with_params(window.params()),
        );
    }
    candidates
}
