use core::fmt;
use core::str::FromStr;

use crate::Address;

// CONSTANTS
// ================================================================================================

pub const DEFAULT_LICENSE: &str = "MIT";

/// Average block time assumed when none is configured for a block-number clock.
pub const DEFAULT_BLOCK_TIME_SECONDS: u64 = 12;

/// Two days, in seconds.
pub const DEFAULT_MIN_TIMELOCK_DELAY: u64 = 172_800;

// AXIS VALUES
// ================================================================================================

/// Implements name lookup, parsing and display for an enumerated input value.
///
/// The first literal of each variant is its canonical name; any further literals are accepted
/// aliases (historically, the OpenZeppelin contract names).
macro_rules! named_values {
    ($ty:ident { $($variant:ident => $canonical:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $canonical),+
                }
            }

            fn expected() -> String {
                let names: &[&str] = &[$($canonical),+];
                format!("must be one of {}", names.join(", "))
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($canonical $(| $alias)* => Ok(Self::$variant),)+
                    _ => Err(Self::expected()),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

/// Whether the governor is bound to a token deployed elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExistingToken {
    Yes,
    No,
}

named_values!(ExistingToken {
    Yes => "yes",
    No => "no",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VotesType {
    Fungible,
    NonFungible,
}

named_values!(VotesType {
    Fungible => "FungibleVotes" | "ERC20Votes",
    NonFungible => "NonFungibleVotes" | "ERC721Votes",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClockMode {
    BlockNumber,
    Timestamp,
}

named_values!(ClockMode {
    BlockNumber => "BlockNumber",
    Timestamp => "Timestamp",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimelockType {
    None,
    /// A thin wrapper around a role-based timelock controller.
    Controller,
    /// A bespoke admin-operated transaction queue.
    Queued,
}

named_values!(TimelockType {
    None => "None",
    Controller => "ControllerStyle" | "TimelockController",
    Queued => "QueuedStyle" | "Compound",
});

impl TimelockType {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Upgradeability {
    None,
    Transparent,
    Uups,
}

named_values!(Upgradeability {
    None => "None",
    Transparent => "TransparentProxy" | "Transparent",
    Uups => "UUPSProxy" | "UUPS",
});

impl Upgradeability {
    pub fn is_upgradeable(&self) -> bool {
        !matches!(self, Self::None)
    }
}

// CONFIGURATION
// ================================================================================================

/// Naming and documentation shared by every generated contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub symbol: String,
    pub purpose: String,
    pub description: String,
    pub license: String,
    pub security_contact: Option<String>,
}

impl Identity {
    /// Returns the organization name with all whitespace removed, used as a contract name prefix.
    pub fn contract_prefix(&self) -> String {
        self.name.split_whitespace().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToken {
    pub votes: VotesType,
    /// Requested decimals, if the document supplied any.
    pub decimals: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Existing { address: Address, votes: VotesType },
    New(NewToken),
}

impl TokenSource {
    pub fn votes(&self) -> VotesType {
        match self {
            Self::Existing { votes, .. } => *votes,
            Self::New(token) => token.votes,
        }
    }

    pub fn is_existing(&self) -> bool {
        matches!(self, Self::Existing { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    BlockNumber { block_time_seconds: u64 },
    Timestamp,
}

impl Clock {
    pub fn mode(&self) -> ClockMode {
        match self {
            Self::BlockNumber { .. } => ClockMode::BlockNumber,
            Self::Timestamp => ClockMode::Timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GovernanceSettings {
    pub voting_delay: u64,
    pub voting_period: u64,
    pub proposal_threshold: u64,
    /// Percentage of the total voting supply, in `1..=100`.
    pub quorum_numerator: u8,
    /// Whether the settings can be changed later through governance.
    pub updatable: bool,
}

/// A validated governance setup.
///
/// Fields belonging to inactive branches of an axis (for example the block time of a timestamp
/// clock) are dropped during validation, so two documents that differ only in ignored fields
/// produce equal configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernanceConfig {
    pub identity: Identity,
    pub token: TokenSource,
    pub clock: Clock,
    pub governance: GovernanceSettings,
    pub timelock: TimelockType,
    /// Minimum timelock delay in seconds; meaningful only when a timelock is enabled.
    pub min_timelock_delay: u64,
    pub upgradeability: Upgradeability,
    pub treasury: Option<Address>,
    pub admin: Option<Address>,
}
