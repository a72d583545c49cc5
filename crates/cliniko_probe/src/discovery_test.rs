#[cfg(test)]
mod tests {
    use crate::discovery::{parse_appointment_types, parse_businesses};
    use serde_json::json;

    #[test]
    fn test_parse_businesses_with_numeric_ids() {
        let body = json!({
            "businesses": [
                {
                    "id": 1740586889502532285_u64,
                    "business_name": "Harbour Physio",
                    "city": "Auckland",
                    "country": "New Zealand",
                    "time_zone": "Auckland",
                    "archived_at": null
                },
                {"id": "99", "business_name": "Old Site", "archived_at": "2024-01-01T00:00:00Z"}
            ],
            "total_entries": 2
        });
        let businesses = parse_businesses(&body);
        assert_eq!(businesses.len(), 2);
        assert_eq!(businesses[0].id.as_deref(), Some("1740586889502532285"));
        assert!(!businesses[0].is_archived());
        assert!(businesses[1].is_archived());

        let lines = businesses[0].describe();
        assert!(lines.contains(&"🏢 Business Name: Harbour Physio".to_string()));
        assert!(lines.contains(&"📧 Contact: N/A".to_string()));
        assert!(lines.contains(&"✅ Status: Active".to_string()));
        assert!(businesses[1]
            .describe()
            .iter()
            .any(|l| l.contains("Archived: 2024-01-01")));
    }

    #[test]
    fn test_parse_businesses_missing_or_malformed() {
        assert!(parse_businesses(&json!({})).is_empty());
        assert!(parse_businesses(&json!({"businesses": "nope"})).is_empty());
    }

    #[test]
    fn test_parse_appointment_types_with_online_flags() {
        let body = json!({
            "appointment_types": [
                {"id": 333, "name": "Initial Consult", "archived_at": null, "show_online": true, "duration_in_minutes": 60},
                {"name": "No Id"}
            ]
        });
        let types = parse_appointment_types(&body);
        assert_eq!(types.len(), 2);
        assert!(types[0].is_active());
        assert_eq!(types[0].online_flags(), vec![("show_online", &json!(true))]);

        let described = types[0].describe(1);
        assert_eq!(described[0], "      1. Initial Consult");
        assert!(described.iter().any(|l| l.contains("show_online: true")));

        let apt = types[0].to_ref().unwrap();
        assert_eq!(apt.id, "333");
        assert_eq!(apt.name, "Initial Consult");
        assert!(types[1].to_ref().is_none());
    }
}
