use std::path::PathBuf;

/// Returns the path to the multi-document file of test apps.
pub fn apps_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/apps.yaml")
}
