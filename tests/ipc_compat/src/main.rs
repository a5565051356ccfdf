fn main() {
    println!("Run `cargo test -p ipc-compat` to execute IPC compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use pixelmaker_protocol::{DirListing, InlineData, ModuleRecord, Reply, UpdateRecord};
    use pixelmaker_settings::Settings;

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and
    /// compares the JSON values so the renderer-facing shape can never
    /// drift silently.
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize fixture {name}: {e}"));
        let reserialized =
            serde_json::to_value(&parsed).unwrap_or_else(|e| panic!("failed to serialize: {e}"));
        assert_eq!(fixture, reserialized, "shape drift in {name}");
    }

    #[test]
    fn reply_ok_dir_listing() {
        roundtrip_test::<Reply<DirListing>>("reply_ok_dir_listing.json");
    }

    #[test]
    fn reply_cancelled() {
        roundtrip_test::<Reply<()>>("reply_cancelled.json");
    }

    #[test]
    fn reply_error() {
        roundtrip_test::<Reply<DirListing>>("reply_error.json");
    }

    #[test]
    fn module_record() {
        roundtrip_test::<ModuleRecord>("module_record.json");
    }

    #[test]
    fn update_record() {
        roundtrip_test::<UpdateRecord>("update_record.json");
    }

    #[test]
    fn inline_data() {
        roundtrip_test::<InlineData>("inline_data.json");
    }

    #[test]
    fn settings_document() {
        roundtrip_test::<Settings>("state.json");
    }

    #[test]
    fn error_kinds_cover_the_taxonomy() {
        use pixelmaker_protocol::ErrorKind;

        let kinds = load_fixture("error_kinds.json");
        let expected: Vec<ErrorKind> = serde_json::from_value(kinds.clone()).unwrap();
        assert_eq!(
            expected,
            vec![
                ErrorKind::PathEscape,
                ErrorKind::NotFound,
                ErrorKind::AlreadyExists,
                ErrorKind::InvalidEncoding,
                ErrorKind::Io,
            ]
        );
        assert_eq!(serde_json::to_value(&expected).unwrap(), kinds);
    }
}
