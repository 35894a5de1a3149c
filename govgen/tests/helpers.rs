use std::fs;

use govgen::{generate, Artifacts, GenerateError, GovernanceConfig};

/// Generates the contracts for the fixture at `tests/fixtures/<name>.json`.
pub fn generate_fixture(name: &str) -> Result<(GovernanceConfig, Artifacts), GenerateError> {
    let path = format!("tests/fixtures/{name}.json");
    let source = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to open fixture `{path}` - {err}"));
    generate(&source)
}

/// Reads the fixture at `tests/fixtures/<name>.json` as JSON, applying `overrides` on top.
pub fn fixture_with(name: &str, overrides: serde_json::Value) -> String {
    let path = format!("tests/fixtures/{name}.json");
    let source = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to open fixture `{path}` - {err}"));
    let mut document: serde_json::Value = serde_json::from_str(&source).unwrap();
    let target = document.as_object_mut().unwrap();
    for (key, value) in overrides.as_object().unwrap() {
        if value.is_null() {
            target.remove(key);
        } else {
            target.insert(key.clone(), value.clone());
        }
    }
    document.to_string()
}
