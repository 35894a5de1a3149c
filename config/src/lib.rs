//! Input schema, validation and the typed [GovernanceConfig] consumed by the code generators.
//!
//! A request document is parsed with [parse_document], which dispatches on its `schemaVersion`
//! and returns either a fully validated configuration or the complete list of field problems.

mod address;
mod error;
mod legacy;
mod schema;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use self::address::Address;
pub use self::error::{ConfigError, FieldError};
pub use self::legacy::{LegacyVotingDefaults, LoweredVoting, VotingPreference};
pub use self::schema::{Document, Field, LegacyDocument, SchemaVersion, StructuredDocument};
pub use self::types::*;

/// Parses and validates a JSON request document using the default legacy voting table.
pub fn parse_document(source: &str) -> Result<GovernanceConfig, ConfigError> {
    parse_document_with(source, &LegacyVotingDefaults::default())
}

/// Parses and validates a JSON request document.
///
/// `legacy` is only consulted for `schemaVersion: 1` documents.
pub fn parse_document_with(
    source: &str,
    legacy: &LegacyVotingDefaults,
) -> Result<GovernanceConfig, ConfigError> {
    let document = Document::from_json(source)?;
    document.validate(legacy)
}
