use core::fmt;
use core::str::FromStr;

use crate::validation::Validator;
use crate::{
    ClockMode, ConfigError, Field, GovernanceConfig, LegacyDocument, StructuredDocument, TimelockType,
    Upgradeability, VotesType,
};

// VOTING PREFERENCES
// ================================================================================================

/// A single keyword of the legacy `voting` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VotingPreference {
    Standard,
    Short,
    Long,
    Immediate,
    Delayed,
    HighQuorum,
    LowQuorum,
}

impl VotingPreference {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Short => "short",
            Self::Long => "long",
            Self::Immediate => "immediate",
            Self::Delayed => "delayed",
            Self::HighQuorum => "high-quorum",
            Self::LowQuorum => "low-quorum",
        }
    }
}

impl FromStr for VotingPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "short" => Ok(Self::Short),
            "long" => Ok(Self::Long),
            "immediate" => Ok(Self::Immediate),
            "delayed" => Ok(Self::Delayed),
            "high-quorum" => Ok(Self::HighQuorum),
            "low-quorum" => Ok(Self::LowQuorum),
            _ => Err(format!(
                "keyword \"{s}\" is not one of standard, short, long, immediate, delayed, \
                 high-quorum, low-quorum"
            )),
        }
    }
}

impl fmt::Display for VotingPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The legacy `governance` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LegacyGovernance {
    Standard,
    Timelock,
}

impl FromStr for LegacyGovernance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "timelock" => Ok(Self::Timelock),
            _ => Err("must be one of standard, timelock".to_string()),
        }
    }
}

// DEFAULTS TABLE
// ================================================================================================

/// Numeric values that legacy voting keywords are lowered to.
///
/// Durations are expressed in blocks of `block_time_seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyVotingDefaults {
    pub block_time_seconds: u64,
    pub standard_period: u64,
    pub short_period: u64,
    pub long_period: u64,
    pub standard_delay: u64,
    pub immediate_delay: u64,
    pub delayed_delay: u64,
    pub standard_quorum: u8,
    pub high_quorum: u8,
    pub low_quorum: u8,
}

impl Default for LegacyVotingDefaults {
    fn default() -> Self {
        Self {
            block_time_seconds: 13,
            // ~3 days, ~1 day and ~1 week
            standard_period: 19_636,
            short_period: 6_545,
            long_period: 45_818,
            standard_delay: 1,
            immediate_delay: 1,
            delayed_delay: 6_545,
            standard_quorum: 5,
            high_quorum: 10,
            low_quorum: 4,
        }
    }
}

/// Voting numbers derived from a list of legacy keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoweredVoting {
    pub voting_delay: u64,
    pub voting_period: u64,
    pub quorum_numerator: u8,
}

impl LegacyVotingDefaults {
    /// Lowers a keyword list. When conflicting keywords are given, `short` wins over `long`,
    /// `immediate` over `delayed`, and `high-quorum` over `low-quorum`.
    pub fn lower(&self, preferences: &[VotingPreference]) -> LoweredVoting {
        let has = |preference| preferences.contains(&preference);

        let voting_period = if has(VotingPreference::Short) {
            self.short_period
        } else if has(VotingPreference::Long) {
            self.long_period
        } else {
            self.standard_period
        };
        let voting_delay = if has(VotingPreference::Immediate) {
            self.immediate_delay
        } else if has(VotingPreference::Delayed) {
            self.delayed_delay
        } else {
            self.standard_delay
        };
        let quorum_numerator = if has(VotingPreference::HighQuorum) {
            self.high_quorum
        } else if has(VotingPreference::LowQuorum) {
            self.low_quorum
        } else {
            self.standard_quorum
        };

        LoweredVoting {
            voting_delay,
            voting_period,
            quorum_numerator,
        }
    }
}

// LEGACY SCHEMA
// ================================================================================================

impl LegacyDocument {
    /// Validates the legacy-only fields, lowers the document onto the structured schema and
    /// validates the result. Problems from both stages are reported together.
    pub fn validate(&self, defaults: &LegacyVotingDefaults) -> Result<GovernanceConfig, ConfigError> {
        let mut v = Validator::default();

        let governance: Option<LegacyGovernance> = v.choice("governance", &self.governance);
        let preferences = match &self.voting {
            Some(_) => v
                .typed("voting", &self.voting, "a string")
                .map(|voting| parse_preferences(&mut v, voting))
                .unwrap_or_default(),
            None => {
                v.error("voting", "voting is required");
                Vec::new()
            }
        };
        let voting = defaults.lower(&preferences);

        let timelock = match governance {
            Some(LegacyGovernance::Timelock) => TimelockType::Controller,
            _ => TimelockType::None,
        };

        let lowered = StructuredDocument {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            purpose: self.purpose.clone(),
            description: self.description.clone(),
            license: None,
            security_contact: None,
            has_existing_token: self.has_existing_token.clone(),
            token_address: self.token_address.clone(),
            votes_type: Some(Field::Value(VotesType::Fungible.name().to_string())),
            token_decimals: None,
            token_clock_mode: Some(Field::Value(ClockMode::BlockNumber.name().to_string())),
            block_time_seconds: i64::try_from(defaults.block_time_seconds).ok().map(Field::Value),
            voting_delay: i64::try_from(voting.voting_delay).ok().map(Field::Value),
            voting_period: i64::try_from(voting.voting_period).ok().map(Field::Value),
            proposal_threshold: Some(Field::Value(0)),
            quorum_numerator: Some(Field::Value(i64::from(voting.quorum_numerator))),
            updatable_settings: Some(Field::Value(true)),
            timelock_type: Some(Field::Value(timelock.name().to_string())),
            min_timelock_delay: None,
            upgradeability: Some(Field::Value(Upgradeability::None.name().to_string())),
            treasury_address: self.treasury_address.clone(),
            admin_address: self.admin_address.clone(),
        };

        let mut errors = v.into_errors();
        match lowered.validate() {
            Ok(config) if errors.is_empty() => Ok(config),
            Ok(_) => Err(ConfigError::Invalid(errors)),
            Err(ConfigError::Invalid(more)) => {
                errors.extend(more);
                Err(ConfigError::Invalid(errors))
            }
            Err(err) => Err(err),
        }
    }
}

fn parse_preferences(v: &mut Validator, voting: &str) -> Vec<VotingPreference> {
    let mut preferences = Vec::new();
    for keyword in voting
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|keyword| !keyword.is_empty())
    {
        match keyword.parse() {
            Ok(preference) => preferences.push(preference),
            Err(message) => v.error("voting", message),
        }
    }
    preferences
}
