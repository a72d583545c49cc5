#[cfg(test)]
mod tests {
    use crate::artifacts::{artifact_file_name, sanitize_label, ArtifactWriter};
    use crate::models::ParamSet;
    use serde_json::{json, Value};
    use std::fs;

    #[test]
    fn test_sanitize_replaces_spaces_and_separators() {
        assert_eq!(
            sanitize_label("success_next_available_time_Initial Consult"),
            "success_next_available_time_Initial_Consult"
        );
        assert_eq!(sanitize_label("a/b\\c:d"), "a_b_c_d");
        assert_eq!(sanitize_label("../../etc/passwd"), "_.._etc_passwd");
    }

    #[test]
    fn test_sanitize_empty_label() {
        assert_eq!(sanitize_label(""), "probe");
        assert_eq!(sanitize_label("   "), "probe");
        assert_eq!(sanitize_label(".."), "probe");
    }

    #[test]
    fn test_file_name_is_deterministic() {
        assert_eq!(
            artifact_file_name("available_times_response"),
            "available_times_response.json"
        );
        assert_eq!(artifact_file_name("x y"), artifact_file_name("x y"));
    }

    #[test]
    fn test_persist_raw_body() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path().join("nested/out"), false);

        let path = writer
            .persist("cliniko_businesses", "http://x/businesses", &ParamSet::new(), &json!({"ok": true}))
            .unwrap();

        assert_eq!(path, dir.path().join("nested/out/cliniko_businesses.json"));
        let saved: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(saved, json!({"ok": true}));
    }

    #[test]
    fn test_persist_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path(), true);
        let params = ParamSet::new().with("from", "2025-08-01").with("to", "2025-08-07");

        let path = writer
            .persist(
                "working",
                "http://x/appointment_types/1/available_times?from=2025-08-01&to=2025-08-07",
                &params,
                &json!({"available_times": []}),
            )
            .unwrap();

        let saved: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(
            saved,
            json!({
                "endpoint": "http://x/appointment_types/1/available_times?from=2025-08-01&to=2025-08-07",
                "params": {"from": "2025-08-01", "to": "2025-08-07"},
                "response": {"available_times": []}
            })
        );
    }

    #[test]
    fn test_persist_into_a_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let writer = ArtifactWriter::new(&blocker, false);

        assert!(writer
            .persist("x", "http://x", &ParamSet::new(), &json!({}))
            .is_err());
    }
}
