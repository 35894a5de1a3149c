use core::ops::RangeInclusive;
use core::str::FromStr;

use serde_json::Value;

use crate::{
    Address, Clock, ClockMode, ConfigError, ExistingToken, Field, FieldError, GovernanceConfig,
    GovernanceSettings, Identity, NewToken, StructuredDocument, TimelockType, TokenSource,
    Upgradeability, VotesType, DEFAULT_BLOCK_TIME_SECONDS, DEFAULT_LICENSE, DEFAULT_MIN_TIMELOCK_DELAY,
};

const NON_NEGATIVE: RangeInclusive<i64> = 0..=i64::MAX;
const POSITIVE: RangeInclusive<i64> = 1..=i64::MAX;

// VALIDATOR
// ================================================================================================

/// Collects field problems while the typed values are extracted from a raw document.
///
/// Each accessor returns `None` when the value is missing or invalid and records why, so a
/// document is always checked in full before anything is reported.
#[derive(Default)]
pub(crate) struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Records a value whose JSON type does not match the field.
    fn mistyped(&mut self, field: &str, expected: &str, raw: &Value) {
        self.error(field, format!("{field} must be {expected}, got {raw}"));
    }

    /// A field of any type: `None` when absent, and when mistyped after recording why.
    pub fn typed<'a, T>(
        &mut self,
        field: &str,
        value: &'a Option<Field<T>>,
        expected: &str,
    ) -> Option<&'a T> {
        match value.as_ref()? {
            Field::Value(value) => Some(value),
            Field::Mistyped(raw) => {
                self.mistyped(field, expected, raw);
                None
            }
        }
    }

    /// A required, non-blank text field.
    pub fn text(&mut self, field: &str, value: &Option<Field<String>>) -> Option<String> {
        match value {
            Some(Field::Value(text)) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Some(Field::Mistyped(raw)) => {
                self.mistyped(field, "a string", raw);
                None
            }
            _ => {
                self.error(field, format!("{field} is required"));
                None
            }
        }
    }

    /// An optional text field; blank text counts as absent.
    pub fn optional_text(&mut self, field: &str, value: &Option<Field<String>>) -> Option<String> {
        self.typed(field, value, "a string")
            .map(|text| text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }

    /// An optional boolean flag.
    pub fn flag(&mut self, field: &str, value: &Option<Field<bool>>) -> Option<bool> {
        self.typed(field, value, "true or false").copied()
    }

    /// A required integer that must fall within `range`.
    pub fn integer<T: TryFrom<i64>>(
        &mut self,
        field: &str,
        value: &Option<Field<i64>>,
        range: RangeInclusive<i64>,
        message: &str,
    ) -> Option<T> {
        if value.is_none() {
            self.error(field, message);
            return None;
        }
        self.optional_integer(field, value, range, message)
    }

    /// An optional integer; when present it must fall within `range`.
    pub fn optional_integer<T: TryFrom<i64>>(
        &mut self,
        field: &str,
        value: &Option<Field<i64>>,
        range: RangeInclusive<i64>,
        message: &str,
    ) -> Option<T> {
        match value.as_ref()? {
            Field::Value(value) => self.in_range(field, *value, range, message),
            // whole numbers too large for an i64 are out of every accepted range
            Field::Mistyped(raw) if raw.is_u64() => {
                self.error(field, message);
                None
            }
            Field::Mistyped(raw) => {
                self.mistyped(field, "an integer", raw);
                None
            }
        }
    }

    fn in_range<T: TryFrom<i64>>(
        &mut self,
        field: &str,
        value: i64,
        range: RangeInclusive<i64>,
        message: &str,
    ) -> Option<T> {
        match T::try_from(value) {
            Ok(converted) if range.contains(&value) => Some(converted),
            _ => {
                self.error(field, message);
                None
            }
        }
    }

    /// A required enumerated value.
    pub fn choice<T: FromStr<Err = String>>(
        &mut self,
        field: &str,
        value: &Option<Field<String>>,
    ) -> Option<T> {
        if value.is_none() {
            self.error(field, format!("{field} is required"));
            return None;
        }
        self.optional_choice(field, value)
    }

    /// An optional enumerated value; when present it must be recognized.
    pub fn optional_choice<T: FromStr<Err = String>>(
        &mut self,
        field: &str,
        value: &Option<Field<String>>,
    ) -> Option<T> {
        let text = self.typed(field, value, "a string")?;
        match text.parse() {
            Ok(value) => Some(value),
            Err(expected) => {
                self.error(field, format!("{field} {expected}, got \"{text}\""));
                None
            }
        }
    }

    /// A required address.
    pub fn address(
        &mut self,
        field: &str,
        value: &Option<Field<String>>,
        missing: &str,
    ) -> Option<Address> {
        match value {
            Some(Field::Value(text)) if text.trim().is_empty() => {
                self.error(field, missing);
                None
            }
            Some(_) => self.optional_address(field, value),
            None => {
                self.error(field, missing);
                None
            }
        }
    }

    /// An optional address; when present it must be well formed.
    pub fn optional_address(&mut self, field: &str, value: &Option<Field<String>>) -> Option<Address> {
        let text = self.typed(field, value, "a string")?;
        match text.trim().parse() {
            Ok(address) => Some(address),
            Err(message) => {
                self.error(field, message);
                None
            }
        }
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Returns the assembled value if no problems were recorded.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, ConfigError> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(ConfigError::Invalid(self.errors)),
        }
    }
}

// STRUCTURED SCHEMA
// ================================================================================================

impl StructuredDocument {
    pub fn validate(&self) -> Result<GovernanceConfig, ConfigError> {
        let mut v = Validator::default();

        let identity = validate_identity(&mut v, self);
        let token = validate_token(&mut v, self);
        let clock = validate_clock(&mut v, self);

        let voting_delay: Option<u64> = v.integer(
            "votingDelay",
            &self.voting_delay,
            NON_NEGATIVE,
            "Voting delay must be a non-negative integer",
        );
        let voting_period: Option<u64> = v.integer(
            "votingPeriod",
            &self.voting_period,
            POSITIVE,
            "Voting period must be a positive integer",
        );
        let proposal_threshold: Option<u64> = v.integer(
            "proposalThreshold",
            &self.proposal_threshold,
            NON_NEGATIVE,
            "Proposal threshold must be a non-negative integer",
        );
        let quorum_numerator: Option<u8> = v.integer(
            "quorumNumerator",
            &self.quorum_numerator,
            1..=100,
            "Quorum percentage must be between 1 and 100",
        );

        let timelock: Option<TimelockType> = v.choice("timelockType", &self.timelock_type);
        let min_timelock_delay = match timelock {
            Some(timelock) if timelock.is_enabled() => v
                .optional_integer(
                    "minTimelockDelay",
                    &self.min_timelock_delay,
                    NON_NEGATIVE,
                    "Minimum timelock delay must be a non-negative integer",
                )
                .unwrap_or(DEFAULT_MIN_TIMELOCK_DELAY),
            _ => {
                if self.min_timelock_delay.is_some() {
                    log::warn!("ignoring minTimelockDelay, no timelock was requested");
                }
                DEFAULT_MIN_TIMELOCK_DELAY
            }
        };

        let updatable = v
            .flag("updatableSettings", &self.updatable_settings)
            .unwrap_or(false);
        let upgradeability: Option<Upgradeability> = v.choice("upgradeability", &self.upgradeability);
        let treasury = v.optional_address("treasuryAddress", &self.treasury_address);
        let admin = v.optional_address("adminAddress", &self.admin_address);

        let config = (|| {
            Some(GovernanceConfig {
                identity: identity?,
                token: token?,
                clock: clock?,
                governance: GovernanceSettings {
                    voting_delay: voting_delay?,
                    voting_period: voting_period?,
                    proposal_threshold: proposal_threshold?,
                    quorum_numerator: quorum_numerator?,
                    updatable,
                },
                timelock: timelock?,
                min_timelock_delay,
                upgradeability: upgradeability?,
                treasury,
                admin,
            })
        })();

        v.finish(config)
    }
}

fn validate_identity(v: &mut Validator, doc: &StructuredDocument) -> Option<Identity> {
    let name = v.text("name", &doc.name);
    let symbol = v.text("symbol", &doc.symbol);
    let purpose = v.text("purpose", &doc.purpose);
    let description = v.text("description", &doc.description);
    let license = v
        .optional_text("license", &doc.license)
        .unwrap_or_else(|| DEFAULT_LICENSE.to_string());
    let security_contact = v.optional_text("securityContact", &doc.security_contact);

    Some(Identity {
        name: name?,
        symbol: symbol?,
        purpose: purpose?,
        description: description?,
        license,
        security_contact,
    })
}

fn validate_token(v: &mut Validator, doc: &StructuredDocument) -> Option<TokenSource> {
    match v.choice("hasExistingToken", &doc.has_existing_token)? {
        ExistingToken::Yes => {
            let address = v.address(
                "tokenAddress",
                &doc.token_address,
                "Token address is required when using existing token",
            );
            let votes = v
                .optional_choice("votesType", &doc.votes_type)
                .unwrap_or(VotesType::Fungible);
            if doc.token_decimals.is_some() {
                log::warn!("ignoring tokenDecimals, the token already exists");
            }
            Some(TokenSource::Existing {
                address: address?,
                votes,
            })
        }
        ExistingToken::No => {
            let votes = v.choice("votesType", &doc.votes_type);
            let decimals = v.optional_integer(
                "tokenDecimals",
                &doc.token_decimals,
                0..=18,
                "Token decimals must be between 0 and 18",
            );
            if doc.token_address.is_some() {
                log::warn!("ignoring tokenAddress, a new token will be generated");
            }
            Some(TokenSource::New(NewToken {
                votes: votes?,
                decimals,
            }))
        }
    }
}

fn validate_clock(v: &mut Validator, doc: &StructuredDocument) -> Option<Clock> {
    match v.choice("tokenClockMode", &doc.token_clock_mode)? {
        ClockMode::BlockNumber => {
            let block_time_seconds = v
                .optional_integer(
                    "blockTimeSeconds",
                    &doc.block_time_seconds,
                    POSITIVE,
                    "Block time in seconds must be a positive integer",
                )
                .unwrap_or(DEFAULT_BLOCK_TIME_SECONDS);
            Some(Clock::BlockNumber { block_time_seconds })
        }
        ClockMode::Timestamp => {
            if doc.block_time_seconds.is_some() {
                log::warn!("ignoring blockTimeSeconds under the timestamp clock mode");
            }
            Some(Clock::Timestamp)
        }
    }
}
