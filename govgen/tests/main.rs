use std::fs;

use expect_test::expect;
use govgen::{persist, ErrorResponse, FilePaths, GenerateError, GenerateResponse};
use pretty_assertions::assert_eq;
use serde_json::json;

mod helpers;
use helpers::{fixture_with, generate_fixture};

// GENERATION
// ================================================================================================

#[test]
fn new_fungible_token_without_timelock() {
    let (_, artifacts) = generate_fixture("new_fungible").unwrap();
    assert_eq!(artifacts.len(), 2);

    let token = artifacts.token().unwrap();
    assert_eq!(token.name, "ACMEToken");
    assert!(token.code.starts_with("// SPDX-License-Identifier: MIT\npragma solidity ^0.8.22;\n"));
    assert!(token.code.contains("contract ACMEToken is "));

    let governance = artifacts.governance().unwrap();
    assert_eq!(governance.name, "AcmeDAOGovernance");
    assert!(governance.code.contains("contract AcmeDAOGovernance is "));
    assert!(artifacts.timelock().is_none());
}

#[test]
fn existing_token_with_controller_timelock_behind_uups() {
    let (_, artifacts) = generate_fixture("existing_nft_controller_uups").unwrap();
    assert_eq!(artifacts.len(), 3);

    let token = artifacts.token().unwrap();
    assert_eq!(token.name, "IExistingERC721VotesToken");
    assert!(token.code.contains("interface IExistingERC721VotesToken {"));
    assert!(token.code.contains("function CLOCK_MODE() external view returns (string memory);"));

    let governance = &artifacts.governance().unwrap().code;
    assert!(governance.contains("GovernorTimelockControlUpgradeable"));
    assert!(governance.contains("UUPSUpgradeable"));
    assert!(governance.contains("constructor() {\n        _disableInitializers();\n    }"));

    let timelock = artifacts.timelock().unwrap();
    assert_eq!(timelock.name, "PixelGuildTimelock");
    assert!(timelock.code.contains("TimelockControllerUpgradeable"));
}

#[test]
fn queued_timelock_behind_transparent_proxy() {
    let (config, artifacts) = generate_fixture("queued_transparent").unwrap();
    assert_eq!(config.min_timelock_delay, 86_400);

    let token = &artifacts.token().unwrap().code;
    assert!(token.contains("return 6;"));

    let governance = &artifacts.governance().unwrap().code;
    assert!(governance.contains("GovernorTimelockCompoundUpgradeable"));

    let timelock = &artifacts.timelock().unwrap().code;
    assert!(timelock.contains("function queueTransaction("));
    assert!(timelock.contains("// 2. Deploy timelock with appropriate delay (86400 seconds = 1 days)"));
}

#[test]
fn legacy_documents_are_accepted() {
    let (config, artifacts) = generate_fixture("legacy").unwrap();
    assert!(config.timelock.is_enabled());
    assert_eq!(artifacts.timelock().unwrap().name, "OldGuardTimelock");
}

#[test]
fn generation_is_deterministic() {
    let (_, first) = generate_fixture("queued_transparent").unwrap();
    let (_, second) = generate_fixture("queued_transparent").unwrap();
    assert_eq!(first, second);
}

// ERRORS
// ================================================================================================

#[test]
fn validation_errors_are_aggregated() {
    let source = fixture_with(
        "new_fungible",
        json!({
            "symbol": null,
            "quorumNumerator": 0,
            "votesType": "Shares",
            "votingDelay": "7200"
        }),
    );
    let err = govgen::generate(&source).unwrap_err();
    assert!(matches!(err, GenerateError::Config(_)));
    let fields: Vec<_> = err.field_errors().into_iter().map(|err| err.field).collect();
    for field in ["symbol", "quorumNumerator", "votesType", "votingDelay"] {
        assert!(fields.iter().any(|f| f == field), "{field} missing from {fields:?}");
    }
}

#[test]
fn unsupported_combinations_name_the_field() {
    let source = fixture_with(
        "new_fungible",
        json!({ "votesType": "NonFungibleVotes", "tokenDecimals": 6 }),
    );
    let err = govgen::generate(&source).unwrap_err();
    assert!(matches!(err, GenerateError::Codegen(_)));

    let response = serde_json::to_string(&ErrorResponse {
        errors: err.field_errors(),
    })
    .unwrap();
    expect![[r#"{"errors":[{"field":"tokenDecimals","message":"unsupported value for `tokenDecimals`: decimals can only be set on a fungible voting token"}]}"#]]
    .assert_eq(&response);
}

#[test]
fn queued_delay_is_bounded() {
    let source = fixture_with("queued_transparent", json!({ "minTimelockDelay": 2_592_001 }));
    let err = govgen::generate(&source).unwrap_err();
    assert_eq!(err.field_errors()[0].field, "minTimelockDelay");

    let source = fixture_with("queued_transparent", json!({ "minTimelockDelay": 2_592_000 }));
    assert!(govgen::generate(&source).is_ok());
}

#[test]
fn malformed_documents_have_no_field_errors() {
    let err = govgen::generate("{ not json").unwrap_err();
    assert!(err.field_errors().is_empty());
}

// PERSISTENCE
// ================================================================================================

#[test]
fn persists_every_contract() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("contracts");
    let (config, artifacts) = generate_fixture("queued_transparent").unwrap();

    let paths = persist(&out, &config, &artifacts).unwrap();
    assert_eq!(
        paths,
        FilePaths {
            token_path: out.join("RIVToken.sol"),
            governance_path: out.join("RiverCollectiveGovernance.sol"),
            timelock_path: Some(out.join("RiverCollectiveTimelock.sol")),
        }
    );
    assert_eq!(
        fs::read_to_string(&paths.token_path).unwrap(),
        artifacts.token().unwrap().code
    );
    assert_eq!(
        fs::read_to_string(paths.timelock_path.unwrap()).unwrap(),
        artifacts.timelock().unwrap().code
    );
}

#[test]
fn existing_tokens_are_persisted_as_interfaces() {
    let dir = tempfile::tempdir().unwrap();
    let (config, artifacts) = generate_fixture("existing_nft_controller_uups").unwrap();

    let paths = persist(dir.path(), &config, &artifacts).unwrap();
    assert_eq!(paths.token_path, dir.path().join("PXGTokenInterface.sol"));
}

#[test]
fn persisting_twice_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let (config, artifacts) = generate_fixture("new_fungible").unwrap();
    fs::write(dir.path().join("ACMEToken.sol"), "stale").unwrap();

    let paths = persist(dir.path(), &config, &artifacts).unwrap();
    persist(dir.path(), &config, &artifacts).unwrap();
    assert_eq!(
        fs::read_to_string(paths.token_path).unwrap(),
        artifacts.token().unwrap().code
    );
    assert!(paths.timelock_path.is_none());
}

// RESPONSE
// ================================================================================================

#[test]
fn response_shape() {
    let (_, artifacts) = generate_fixture("new_fungible").unwrap();
    let response = GenerateResponse::new(&artifacts, None).unwrap();
    let value = serde_json::to_value(&response).unwrap();

    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["governance", "token"]);
    assert_eq!(value["token"]["name"], "ACMEToken");

    let paths = FilePaths {
        token_path: "out/ACMEToken.sol".into(),
        governance_path: "out/AcmeDAOGovernance.sol".into(),
        timelock_path: None,
    };
    let response = GenerateResponse::new(&artifacts, Some(paths)).unwrap();
    let value = serde_json::to_value(&response).unwrap();
    expect![[r#"{"governancePath":"out/AcmeDAOGovernance.sol","tokenPath":"out/ACMEToken.sol"}"#]]
        .assert_eq(&value["filePaths"].to_string());
}
