// --- File: crates/cliniko_probe/src/discovery.rs ---
//! Typed views of the few responses we read back, and lookups built on them.

use crate::models::{Identifiers, ProbeOutcome};
use crate::prober::Prober;
use crate::suites::{appointment_type_lookup, AppointmentTypeRef, UNKNOWN_NAME};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Flags that hint whether an appointment type can be booked online.
pub const ONLINE_BOOKING_FIELDS: [&str; 4] = [
    "online_bookings",
    "available_online",
    "show_online",
    "display_online",
];

// Accepts strings, numbers or anything else; null becomes None.
fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<Value>::deserialize(deserializer)?.and_then(|value| match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }),
    )
}

// --- Businesses ---

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Business {
    #[serde(default, deserialize_with = "opt_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub business_name: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub address_1: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub time_zone: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub contact_information: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub website_address: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub archived_at: Option<String>,
}

impl Business {
    pub fn is_archived(&self) -> bool {
        self.archived_at.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Transcript lines for one business.
    pub fn describe(&self) -> Vec<String> {
        let or_na = |field: &Option<String>| field.clone().unwrap_or_else(|| "N/A".to_string());
        let mut lines = vec![
            format!("🏢 Business Name: {}", or_na(&self.business_name)),
            format!("🆔 Business ID: {}", or_na(&self.id)),
            format!("📍 Address: {}", or_na(&self.address_1)),
            format!("🏙️  City: {}", or_na(&self.city)),
            format!("🌏 Country: {}", or_na(&self.country)),
            format!("⏰ Time Zone: {}", or_na(&self.time_zone)),
            format!("📧 Contact: {}", or_na(&self.contact_information)),
            format!("🌐 Website: {}", or_na(&self.website_address)),
            format!("📅 Created: {}", or_na(&self.created_at)),
        ];
        if self.is_archived() {
            lines.push(format!("🗃️  Archived: {}", or_na(&self.archived_at)));
        } else {
            lines.push("✅ Status: Active".to_string());
        }
        lines
    }
}

/// The `businesses` array of a `/businesses` body; empty when absent or malformed.
pub fn parse_businesses(body: &Value) -> Vec<Business> {
    parse_collection(body, "businesses")
}

// --- Appointment types ---

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppointmentType {
    #[serde(default, deserialize_with = "opt_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub archived_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AppointmentType {
    pub fn is_active(&self) -> bool {
        self.archived_at.as_deref().map_or(true, str::is_empty)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_NAME)
    }

    /// Online booking flags present on this type, in `ONLINE_BOOKING_FIELDS` order.
    pub fn online_flags(&self) -> Vec<(&'static str, &Value)> {
        ONLINE_BOOKING_FIELDS
            .iter()
            .filter_map(|field| self.extra.get(*field).map(|value| (*field, value)))
            .collect()
    }

    /// `None` for entries without an id; they cannot be probed.
    pub fn to_ref(&self) -> Option<AppointmentTypeRef> {
        self.id
            .as_ref()
            .map(|id| AppointmentTypeRef::new(id.clone(), self.display_name()))
    }

    pub fn describe(&self, index: usize) -> Vec<String> {
        let mut lines = vec![
            format!("      {}. {}", index, self.display_name()),
            format!("         ID: {}", self.id.as_deref().unwrap_or("N/A")),
            format!("         Active: {}", self.is_active()),
        ];
        for (field, value) in self.online_flags() {
            lines.push(format!("         {}: {}", field, value));
        }
        lines
    }
}

pub fn parse_appointment_types(body: &Value) -> Vec<AppointmentType> {
    parse_collection(body, "appointment_types")
}

fn parse_collection<T: for<'de> Deserialize<'de>>(body: &Value, key: &str) -> Vec<T> {
    let Some(items) = body.get(key) else {
        debug!("response has no '{}' collection", key);
        return Vec::new();
    };
    match serde_json::from_value::<Vec<T>>(items.clone()) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("could not read '{}' collection: {}", key, e);
            Vec::new()
        }
    }
}

// --- Lookups ---

/// Name of an appointment type via `GET /appointment_types/{id}`; `Unknown`
/// on any failure. Not reported and not saved.
pub async fn appointment_type_name(prober: &Prober, ids: &Identifiers) -> String {
    let probe = match appointment_type_lookup(ids).resolve() {
        Ok(probe) => probe,
        Err(e) => {
            debug!("cannot look up appointment type name: {}", e);
            return UNKNOWN_NAME.to_string();
        }
    };
    match prober.execute(&probe).await {
        (_, ProbeOutcome::Success(body)) => body
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        (status, outcome) => {
            debug!(?status, kind = %outcome.kind(), "appointment type lookup failed");
            UNKNOWN_NAME.to_string()
        }
    }
}

/// Looks up the name of every id, in order.
pub async fn name_appointment_types(
    prober: &Prober,
    ids: &Identifiers,
    appointment_type_ids: &[String],
) -> Vec<AppointmentTypeRef> {
    let mut named = Vec::with_capacity(appointment_type_ids.len());
    for id in appointment_type_ids {
        let name = appointment_type_name(prober, &ids.with_appointment_type(id)).await;
        named.push(AppointmentTypeRef::new(id.clone(), name));
    }
    named
}
