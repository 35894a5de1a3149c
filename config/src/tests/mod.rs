mod legacy;

use serde_json::{json, Value};

use crate::{parse_document, ConfigError, GovernanceConfig};

/// A complete, valid structured document for a new fungible token with no timelock.
pub fn base_document() -> Value {
    json!({
        "schemaVersion": 2,
        "name": "Acme DAO",
        "symbol": "ACME",
        "purpose": "Fund open source tooling",
        "description": "Token-weighted governance for the Acme collective",
        "hasExistingToken": "no",
        "votesType": "FungibleVotes",
        "tokenClockMode": "BlockNumber",
        "votingDelay": 7200,
        "votingPeriod": 50400,
        "proposalThreshold": 0,
        "quorumNumerator": 4,
        "timelockType": "None",
        "upgradeability": "None"
    })
}

/// Returns `base_document` with the given fields overwritten; `null` removes a field.
pub fn document_with(overrides: Value) -> Value {
    let mut document = base_document();
    if let (Some(target), Some(source)) = (document.as_object_mut(), overrides.as_object()) {
        for (key, value) in source {
            if value.is_null() {
                target.remove(key);
            } else {
                target.insert(key.clone(), value.clone());
            }
        }
    }
    document
}

pub fn parse(document: &Value) -> Result<GovernanceConfig, ConfigError> {
    parse_document(&document.to_string())
}

#[track_caller]
pub fn expect_field_error(document: &Value, field: &str) {
    match parse(document) {
        Ok(config) => panic!("expected validation to fail on {field}, got {config:#?}"),
        Err(err) => assert!(
            err.mentions(field),
            "expected an error on '{field}', got: {err}"
        ),
    }
}
