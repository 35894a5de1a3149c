use pretty_assertions::assert_eq;
use serde_json::json;

use super::{expect_field_error, parse};
use crate::{
    parse_document_with, Clock, LegacyVotingDefaults, TimelockType, VotesType, VotingPreference,
};

fn legacy_document(governance: &str, voting: &str) -> serde_json::Value {
    json!({
        "schemaVersion": 1,
        "name": "Old Guard",
        "symbol": "OLD",
        "purpose": "Legacy",
        "description": "Imported from the free-text wizard",
        "governance": governance,
        "voting": voting,
        "hasExistingToken": "no"
    })
}

#[test]
fn lowers_keywords_through_the_defaults_table() {
    let config = parse(&legacy_document("timelock", "short, high-quorum")).unwrap();

    assert_eq!(config.timelock, TimelockType::Controller);
    assert_eq!(config.governance.voting_period, 6_545);
    assert_eq!(config.governance.voting_delay, 1);
    assert_eq!(config.governance.quorum_numerator, 10);
    assert!(config.governance.updatable);
    assert_eq!(config.token.votes(), VotesType::Fungible);
    assert_eq!(config.clock, Clock::BlockNumber { block_time_seconds: 13 });
}

#[test]
fn standard_keywords_use_the_standard_row() {
    let config = parse(&legacy_document("standard", "standard")).unwrap();
    assert_eq!(config.timelock, TimelockType::None);
    assert_eq!(config.governance.voting_period, 19_636);
    assert_eq!(config.governance.quorum_numerator, 5);
}

#[test]
fn conflicting_keywords_resolve_in_a_fixed_order() {
    let lowered = LegacyVotingDefaults::default().lower(&[
        VotingPreference::Long,
        VotingPreference::Short,
        VotingPreference::LowQuorum,
        VotingPreference::HighQuorum,
        VotingPreference::Delayed,
    ]);
    assert_eq!(lowered.voting_period, 6_545);
    assert_eq!(lowered.quorum_numerator, 10);
    assert_eq!(lowered.voting_delay, 6_545);
}

#[test]
fn unknown_keywords_are_rejected_not_matched_loosely() {
    expect_field_error(&legacy_document("standard", "shortish"), "voting");
    expect_field_error(&legacy_document("standard", "high threshold"), "voting");
    expect_field_error(&legacy_document("council", "standard"), "governance");
}

#[test]
fn table_is_supplied_by_the_caller() {
    let defaults = LegacyVotingDefaults {
        long_period: 100,
        ..LegacyVotingDefaults::default()
    };
    let config =
        parse_document_with(&legacy_document("standard", "long").to_string(), &defaults).unwrap();
    assert_eq!(config.governance.voting_period, 100);
}

#[test]
fn legacy_and_structured_problems_are_reported_together() {
    let mut document = legacy_document("sometimes", "standard");
    document.as_object_mut().unwrap().remove("symbol");
    let err = parse(&document).unwrap_err();
    assert!(err.mentions("governance"));
    assert!(err.mentions("symbol"));
}

#[test]
fn mistyped_legacy_fields_are_field_errors() {
    let mut document = legacy_document("standard", "standard");
    document["voting"] = json!(["short"]);
    document["name"] = json!(7);
    let err = parse(&document).unwrap_err();
    assert!(err.mentions("voting"));
    assert!(err.mentions("name"));
}
