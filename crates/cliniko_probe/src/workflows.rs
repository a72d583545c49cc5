// --- File: crates/cliniko_probe/src/workflows.rs ---
//! The probe suites the CLI exposes, one function per subcommand.
//!
//! Each suite resolves all of its candidates before the first request, runs
//! them in order, and closes with a summary. Only configuration problems
//! (missing ids, bad templates) come back as `Err`; every HTTP outcome is
//! reported and the suite carries on.

use crate::discovery::{name_appointment_types, parse_appointment_types, parse_businesses, Business};
use crate::models::{
    resolve_all, Identifiers, ProbeOutcome, ProbeSummary, APPOINTMENT_TYPE_ID, BUSINESS_ID,
    PRACTITIONER_ID,
};
use crate::prober::Prober;
use crate::report::Reporter;
use crate::suites::{
    alternative_practitioner_endpoints, available_times_patterns, available_times_probe,
    connection_probe, next_available_nested, next_available_param_sets, next_available_variations,
    practitioner_appointment_types, DateWindow,
};
use chrono::NaiveDate;
use cliniko_probe_common::{log_error, ProbeError};
use tracing::info;

const CONNECTION_TIPS: [&str; 4] = [
    "💡 Troubleshooting tips:",
    "   1. Check that the API key is correct and has not been revoked",
    "   2. Make sure the base URL matches your Cliniko shard (e.g. api.uk2.cliniko.com)",
    "   3. Confirm the key belongs to a user with API access enabled",
];

const AVAILABLE_TIMES_TIPS: [&str; 5] = [
    "💡 Troubleshooting tips:",
    "   1. Verify all IDs are correct",
    "   2. Check that the practitioner has appointment types configured",
    "   3. Ensure the appointment type is active and available",
    "   4. Verify the date range is valid",
];

fn notes(reporter: &mut dyn Reporter, lines: &[&str]) {
    for line in lines {
        reporter.note(line);
    }
}

fn finish(suite: &str, summary: &ProbeSummary, reporter: &mut dyn Reporter) {
    info!(
        suite,
        attempted = summary.attempted(),
        succeeded = summary.successes().count(),
        "suite finished"
    );
    reporter.summary(summary);
}

// --- connection ---

/// Result of the baseline `GET /businesses` check.
#[derive(Debug, Clone, Default)]
pub struct ConnectionCheck {
    pub summary: ProbeSummary,
    pub businesses: Vec<Business>,
}

impl ConnectionCheck {
    pub fn is_connected(&self) -> bool {
        self.summary.has_success()
    }
}

pub async fn run_connection(
    prober: &Prober,
    reporter: &mut dyn Reporter,
) -> Result<ConnectionCheck, ProbeError> {
    let probes = resolve_all(&[connection_probe()])?;
    let summary = prober
        .run_section("🔍 Testing Cliniko API connection", &probes, reporter)
        .await;

    let businesses = match summary.results.first().map(|r| &r.outcome) {
        Some(ProbeOutcome::Success(body)) => {
            reporter.note("✅ Connection successful!");
            let businesses = parse_businesses(body);
            if businesses.is_empty() {
                reporter.note("No businesses found on this account.");
            }
            for (i, business) in businesses.iter().enumerate() {
                reporter.note("");
                reporter.note(&format!("Business {}:", i + 1));
                for line in business.describe() {
                    reporter.note(&format!("   {}", line));
                }
            }
            businesses
        }
        other => {
            let reason = match other {
                Some(outcome) => outcome.kind().to_string(),
                None => "no response".to_string(),
            };
            log_error(
                ProbeError::AuthError(format!("GET /businesses failed: {}", reason)),
                "connection check",
            );
            reporter.note("❌ Connection test failed: the API did not accept the credentials.");
            notes(reporter, &CONNECTION_TIPS);
            Vec::new()
        }
    };

    finish("connection", &summary, reporter);
    Ok(ConnectionCheck {
        summary,
        businesses,
    })
}

// --- available_times ---

/// The nested `available_times` endpoint. `ids` must carry an appointment type.
pub async fn run_available_times(
    prober: &Prober,
    reporter: &mut dyn Reporter,
    ids: &Identifiers,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<ProbeSummary, ProbeError> {
    let probes = resolve_all(&[available_times_probe(ids, from, to)])?;
    let summary = prober
        .run_section("📅 Testing available_times endpoint", &probes, reporter)
        .await;

    if summary.has_success() {
        reporter.note("✅ available_times responded with data.");
    } else {
        notes(reporter, &AVAILABLE_TIMES_TIPS);
    }

    finish("available_times", &summary, reporter);
    Ok(summary)
}

// --- next_available_time ---

pub async fn run_next_available(
    prober: &Prober,
    reporter: &mut dyn Reporter,
    ids: &Identifiers,
    appointment_type_ids: &[String],
    window: &DateWindow,
    today: NaiveDate,
) -> Result<ProbeSummary, ProbeError> {
    const SUITE: &str = "next_available_time";
    ids.require(SUITE, &[BUSINESS_ID, PRACTITIONER_ID])?;
    let missing_type = || ProbeError::MissingIdentifier {
        label: SUITE.to_string(),
        placeholder: APPOINTMENT_TYPE_ID.to_string(),
    };
    if appointment_type_ids.is_empty() {
        return Err(missing_type());
    }

    let named = name_appointment_types(prober, ids, appointment_type_ids).await;
    reporter.section("🔎 Appointment types under test");
    for apt in &named {
        reporter.note(&format!("   {} ({})", apt.name, apt.id));
    }

    let first = named.first().ok_or_else(missing_type)?;
    let nested = resolve_all(&next_available_nested(ids, &named))?;
    let variations = resolve_all(&next_available_variations(ids, first))?;
    let param_sets = resolve_all(&next_available_param_sets(ids, first, window, today))?;

    let mut summary = prober
        .run_section("🎯 Nested next_available_time", &nested, reporter)
        .await;
    summary.merge(
        prober
            .run_section("🔀 next_available_time URL variations", &variations, reporter)
            .await,
    );
    summary.merge(
        prober
            .run_section("🧪 next_available_time parameter sets", &param_sets, reporter)
            .await,
    );

    finish(SUITE, &summary, reporter);
    Ok(summary)
}

// --- working patterns ---

pub async fn run_patterns(
    prober: &Prober,
    reporter: &mut dyn Reporter,
    ids: &Identifiers,
    window: &DateWindow,
) -> Result<ProbeSummary, ProbeError> {
    let listing = resolve_all(&[practitioner_appointment_types(ids)])?;
    let alternatives = resolve_all(&alternative_practitioner_endpoints(ids, window))?;

    let mut summary = prober
        .run_section("📋 Practitioner appointment types", &listing, reporter)
        .await;

    let types = summary
        .results
        .first()
        .and_then(|r| r.outcome.body())
        .map(parse_appointment_types)
        .unwrap_or_default();
    reporter.note(&format!("   Found {} appointment type(s)", types.len()));
    for (i, apt) in types.iter().enumerate() {
        for line in apt.describe(i + 1) {
            reporter.note(&line);
        }
    }

    let refs: Vec<_> = types.iter().filter_map(|apt| apt.to_ref()).collect();
    if refs.is_empty() {
        reporter.note("   No appointment types to try available_times with.");
    } else {
        let patterns = resolve_all(&available_times_patterns(ids, &refs, window))?;
        summary.merge(
            prober
                .run_section("📅 available_times patterns", &patterns, reporter)
                .await,
        );
    }

    summary.merge(
        prober
            .run_section("🧭 Alternative practitioner endpoints", &alternatives, reporter)
            .await,
    );

    finish("patterns", &summary, reporter);
    Ok(summary)
}

// --- all ---

/// Connection check first; the other suites run only once it passes. A suite
/// that cannot start (missing ids) is reported and skipped.
pub async fn run_all(
    prober: &Prober,
    reporter: &mut dyn Reporter,
    ids: &Identifiers,
    appointment_type_ids: &[String],
    window: &DateWindow,
    today: NaiveDate,
) -> ProbeSummary {
    let mut overall = match run_connection(prober, reporter).await {
        Ok(check) if check.is_connected() => check.summary,
        Ok(check) => {
            reporter.note("Skipping remaining suites until the connection check passes.");
            return check.summary;
        }
        Err(e) => {
            log_error(&e, "connection suite");
            reporter.note(&format!("❌ {}", e));
            return ProbeSummary::default();
        }
    };

    let available_times_ids = match appointment_type_ids.first() {
        Some(id) => ids.with_appointment_type(id),
        None => ids.clone(),
    };
    let suites = [
        run_available_times(
            prober,
            reporter,
            &available_times_ids,
            Some(window.from),
            Some(window.to),
        )
        .await,
        run_next_available(prober, reporter, ids, appointment_type_ids, window, today).await,
        run_patterns(prober, reporter, ids, window).await,
    ];
    for outcome in suites {
        match outcome {
            Ok(summary) => overall.merge(summary),
            Err(e) => {
                log_error(&e, "probe suite");
                reporter.note(&format!("⏭️  Skipped: {}", e));
            }
        }
    }

    reporter.section("📊 Overall");
    finish("all", &overall, reporter);
    overall
}
