use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{ConfigError, FieldError, GovernanceConfig, LegacyVotingDefaults};

const VERSION_FIELD: &str = "schemaVersion";

/// The input schema a request document was written against.
///
/// Both schemas remain accepted; a document must state which one it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SchemaVersion {
    /// Free-text `governance` / `voting` preferences.
    Legacy = 1,
    /// One enumerated field per configuration axis.
    Structured = 2,
}

impl SchemaVersion {
    fn from_value(value: Option<&Value>) -> Result<Self, FieldError> {
        match value {
            None => Err(FieldError::new(
                VERSION_FIELD,
                "schemaVersion is required (1 = legacy, 2 = structured)",
            )),
            Some(value) => match value.as_u64() {
                Some(1) => Ok(Self::Legacy),
                Some(2) => Ok(Self::Structured),
                _ => Err(FieldError::new(
                    VERSION_FIELD,
                    format!("unsupported schema version {value}, expected 1 or 2"),
                )),
            },
        }
    }
}

/// A request document as written by the caller, before validation.
#[derive(Debug, Clone)]
pub enum Document {
    Legacy(LegacyDocument),
    Structured(StructuredDocument),
}

impl Document {
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(source)?;
        let version = SchemaVersion::from_value(value.get(VERSION_FIELD))
            .map_err(|err| ConfigError::Invalid(vec![err]))?;
        log::debug!("parsing configuration document with schema version {}", version as u8);

        Ok(match version {
            SchemaVersion::Legacy => Self::Legacy(serde_json::from_value(value)?),
            SchemaVersion::Structured => Self::Structured(serde_json::from_value(value)?),
        })
    }

    pub fn version(&self) -> SchemaVersion {
        match self {
            Self::Legacy(_) => SchemaVersion::Legacy,
            Self::Structured(_) => SchemaVersion::Structured,
        }
    }

    pub fn validate(&self, legacy: &LegacyVotingDefaults) -> Result<GovernanceConfig, ConfigError> {
        match self {
            Self::Legacy(document) => document.validate(legacy),
            Self::Structured(document) => document.validate(),
        }
    }
}

/// A document field whose JSON type is checked during validation rather than while parsing.
///
/// A value of the wrong type is kept as [Field::Mistyped], so validation can report it next to
/// every other problem instead of the whole document failing to parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Value(T),
    Mistyped(Value),
}

impl<T> Field<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Mistyped(_) => None,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(match T::deserialize(&raw) {
            Ok(value) => Self::Value(value),
            Err(_) => Self::Mistyped(raw),
        })
    }
}

/// Schema version 2: one enumerated field per configuration axis.
///
/// Every field is optional at this level so that validation can report all missing or malformed
/// fields at once instead of failing on the first one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredDocument {
    pub name: Option<Field<String>>,
    pub symbol: Option<Field<String>>,
    pub purpose: Option<Field<String>>,
    pub description: Option<Field<String>>,
    pub license: Option<Field<String>>,
    pub security_contact: Option<Field<String>>,

    pub has_existing_token: Option<Field<String>>,
    pub token_address: Option<Field<String>>,
    pub votes_type: Option<Field<String>>,
    pub token_decimals: Option<Field<i64>>,
    pub token_clock_mode: Option<Field<String>>,
    pub block_time_seconds: Option<Field<i64>>,

    pub voting_delay: Option<Field<i64>>,
    pub voting_period: Option<Field<i64>>,
    pub proposal_threshold: Option<Field<i64>>,
    pub quorum_numerator: Option<Field<i64>>,
    pub updatable_settings: Option<Field<bool>>,

    pub timelock_type: Option<Field<String>>,
    pub min_timelock_delay: Option<Field<i64>>,

    pub upgradeability: Option<Field<String>>,

    pub treasury_address: Option<Field<String>>,
    pub admin_address: Option<Field<String>>,
}

/// Schema version 1: free-form governance and voting preferences.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDocument {
    pub name: Option<Field<String>>,
    pub symbol: Option<Field<String>>,
    pub purpose: Option<Field<String>>,
    pub description: Option<Field<String>>,
    pub governance: Option<Field<String>>,
    pub voting: Option<Field<String>>,
    pub has_existing_token: Option<Field<String>>,
    pub token_address: Option<Field<String>>,
    pub treasury_address: Option<Field<String>>,
    pub admin_address: Option<Field<String>>,
}
