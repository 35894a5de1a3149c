use core::fmt;
use core::str::FromStr;

use govgen_config::{
    ClockMode, FieldError, GovernanceConfig, TimelockType, TokenSource, Upgradeability, VotesType,
};

use crate::mixin::{Flavor, Hook, Mixin, VariantFragment};

// AXES
// ================================================================================================

/// One independently configurable dimension of a governance setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Token,
    Clock,
    Timelock,
    Upgrade,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Self::Token, Self::Clock, Self::Timelock, Self::Upgrade];

    /// The configuration field that selects the value of this axis.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Token => "votesType",
            Self::Clock => "tokenClockMode",
            Self::Timelock => "timelockType",
            Self::Upgrade => "upgradeability",
        }
    }
}

/// Where the voting power comes from and what kind of votes it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Existing(VotesType),
    New(VotesType),
}

impl TokenKind {
    pub const ALL: [TokenKind; 4] = [
        Self::Existing(VotesType::Fungible),
        Self::Existing(VotesType::NonFungible),
        Self::New(VotesType::Fungible),
        Self::New(VotesType::NonFungible),
    ];

    pub fn of(source: &TokenSource) -> Self {
        match source {
            TokenSource::Existing { votes, .. } => Self::Existing(*votes),
            TokenSource::New(token) => Self::New(token.votes),
        }
    }

    pub fn votes(&self) -> VotesType {
        match self {
            Self::Existing(votes) | Self::New(votes) => *votes,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Existing(votes) => write!(f, "Existing{votes}"),
            Self::New(votes) => write!(f, "{votes}"),
        }
    }
}

impl FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("Existing") {
            Some(votes) => votes.parse().map(Self::Existing),
            None => s.parse().map(Self::New),
        }
    }
}

/// A value on one of the configuration axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisValue {
    Token(TokenKind),
    Clock(ClockMode),
    Timelock(TimelockType),
    Upgrade(Upgradeability),
}

impl AxisValue {
    /// Parses `text` as a value of `axis`. Unrecognized text is a configuration error on the
    /// field that selects the axis.
    pub fn parse(axis: Axis, text: &str) -> Result<Self, FieldError> {
        let value = match axis {
            Axis::Token => text.parse().map(Self::Token),
            Axis::Clock => text.parse().map(Self::Clock),
            Axis::Timelock => text.parse().map(Self::Timelock),
            Axis::Upgrade => text.parse().map(Self::Upgrade),
        };
        value.map_err(|message| FieldError::new(axis.field(), message))
    }

    pub fn axis(&self) -> Axis {
        match self {
            Self::Token(_) => Axis::Token,
            Self::Clock(_) => Axis::Clock,
            Self::Timelock(_) => Axis::Timelock,
            Self::Upgrade(_) => Axis::Upgrade,
        }
    }
}

// RESOLVED AXES
// ================================================================================================

/// The fragments selected by one configuration, resolved once and shared by every emitter.
#[derive(Debug, Clone)]
pub struct ResolvedAxes {
    pub flavor: Flavor,
    pub token: VariantFragment,
    pub clock: VariantFragment,
    pub timelock: VariantFragment,
    pub upgrade: VariantFragment,
    pub governor: VariantFragment,
    /// The base of the timelock contract itself, empty unless a controller-style timelock is used.
    pub timelock_base: VariantFragment,
}

// VARIANT RESOLVER
// ================================================================================================

/// Maps axis values to the fragments they contribute.
///
/// Every base contract name used by the generated contracts originates here. Fragments are built
/// in the flavor derived from the configuration's upgrade axis, and the configuration supplies
/// the literal arguments of the setup calls.
pub struct VariantResolver<'a> {
    config: &'a GovernanceConfig,
    flavor: Flavor,
}

impl<'a> VariantResolver<'a> {
    pub fn new(config: &'a GovernanceConfig) -> Self {
        Self {
            config,
            flavor: Flavor::from(config.upgradeability),
        }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// The value the configuration selects on `axis`.
    pub fn selected(&self, axis: Axis) -> AxisValue {
        match axis {
            Axis::Token => AxisValue::Token(TokenKind::of(&self.config.token)),
            Axis::Clock => AxisValue::Clock(self.config.clock.mode()),
            Axis::Timelock => AxisValue::Timelock(self.config.timelock),
            Axis::Upgrade => AxisValue::Upgrade(self.config.upgradeability),
        }
    }

    /// Resolves every axis of the configuration.
    pub fn resolve_all(&self) -> ResolvedAxes {
        let resolve = |axis: Axis| {
            let value = self.selected(axis);
            let fragment = self.resolve(value);
            log::debug!(
                "resolved {} to {} base(s), {} required hook(s)",
                axis.field(),
                fragment.mixins.len(),
                fragment.required.len()
            );
            fragment
        };
        ResolvedAxes {
            flavor: self.flavor,
            token: resolve(Axis::Token),
            clock: resolve(Axis::Clock),
            timelock: resolve(Axis::Timelock),
            upgrade: resolve(Axis::Upgrade),
            governor: self.governor(),
            timelock_base: self.timelock_base(self.config.timelock),
        }
    }

    pub fn resolve(&self, value: AxisValue) -> VariantFragment {
        match value {
            AxisValue::Token(kind) => self.token(kind),
            AxisValue::Clock(mode) => self.clock(mode),
            AxisValue::Timelock(timelock) => self.timelock_integration(timelock),
            AxisValue::Upgrade(upgradeability) => self.upgrade(upgradeability),
        }
    }

    fn token_display_name(&self) -> String {
        format!("{} Governance Token", self.config.identity.name)
    }

    // TOKEN AXIS
    // --------------------------------------------------------------------------------------------

    fn token(&self, kind: TokenKind) -> VariantFragment {
        let votes = match kind {
            // an existing token is described by an interface, which inherits nothing
            TokenKind::Existing(_) => return VariantFragment::default(),
            TokenKind::New(votes) => votes,
        };

        let name = quoted(&self.token_display_name());
        let symbol = quoted(&self.config.identity.symbol);
        let access = Mixin::library(
            self.flavor,
            "access",
            "AccessControl",
            &[Hook::SupportsInterface],
        )
        .with_setup("AccessControl", vec![]);

        match votes {
            VotesType::Fungible => {
                let votes = Mixin::library(
                    self.flavor,
                    "token/ERC20/extensions",
                    "ERC20Votes",
                    &[
                        Hook::Decimals,
                        Hook::Clock,
                        Hook::ClockMode,
                        Hook::AfterTokenTransfer,
                        Hook::Mint,
                        Hook::Burn,
                    ],
                )
                .with_setup("ERC20", vec![name.clone(), symbol])
                .with_setup("ERC20Permit", vec![name])
                .with_setup("ERC20Votes", vec![]);

                VariantFragment::mixin(votes)
                    .with_mixin(access)
                    .requiring(&[Hook::AfterTokenTransfer, Hook::Mint, Hook::Burn])
            }
            VotesType::NonFungible => {
                let dir = "token/ERC721";
                let extensions = "token/ERC721/extensions";
                let base = Mixin::library(
                    self.flavor,
                    dir,
                    "ERC721",
                    &[
                        Hook::BeforeTokenTransfer,
                        Hook::AfterTokenTransfer,
                        Hook::Burn,
                        Hook::TokenUri,
                        Hook::SupportsInterface,
                    ],
                )
                .with_setup("ERC721", vec![name, symbol]);
                let enumerable = Mixin::library(
                    self.flavor,
                    extensions,
                    "ERC721Enumerable",
                    &[Hook::BeforeTokenTransfer, Hook::SupportsInterface],
                )
                .with_setup("ERC721Enumerable", vec![]);
                let uri_storage = Mixin::library(
                    self.flavor,
                    extensions,
                    "ERC721URIStorage",
                    &[Hook::Burn, Hook::TokenUri, Hook::SupportsInterface],
                )
                .with_setup("ERC721URIStorage", vec![]);
                let votes = Mixin::library(
                    self.flavor,
                    extensions,
                    "ERC721Votes",
                    &[Hook::AfterTokenTransfer, Hook::Clock, Hook::ClockMode],
                )
                .with_setup("EIP712", vec![quoted(&self.config.identity.name), quoted("1")])
                .with_setup("ERC721Votes", vec![]);

                VariantFragment::mixin(base)
                    .with_mixin(enumerable)
                    .with_mixin(uri_storage)
                    .with_mixin(votes)
                    .with_mixin(access)
            }
        }
    }

    // CLOCK AXIS
    // --------------------------------------------------------------------------------------------

    /// The clock axis adds no bases; a timestamp clock obliges the token to redefine the clock.
    fn clock(&self, mode: ClockMode) -> VariantFragment {
        match mode {
            ClockMode::BlockNumber => VariantFragment::default(),
            ClockMode::Timestamp => {
                VariantFragment::default().requiring(&[Hook::Clock, Hook::ClockMode])
            }
        }
    }

    // TIMELOCK AXIS
    // --------------------------------------------------------------------------------------------

    /// The extension binding the governor to its timelock.
    fn timelock_integration(&self, timelock: TimelockType) -> VariantFragment {
        let mut hooks = vec![
            Hook::State,
            Hook::ProposalNeedsQueuing,
            Hook::Cancel,
            Hook::Executor,
            Hook::SupportsInterface,
        ];
        let (unit, param) = match timelock {
            TimelockType::None => return VariantFragment::default(),
            TimelockType::Controller => (
                "GovernorTimelockControl",
                format!("{} _timelock", self.flavor.type_name("TimelockController")),
            ),
            TimelockType::Queued => {
                hooks.extend([Hook::QueueOperations, Hook::ExecuteOperations]);
                (
                    "GovernorTimelockCompound",
                    format!("{} _timelock", self.flavor.type_name("ICompoundTimelock")),
                )
            }
        };

        let integration = Mixin::library(self.flavor, "governance/extensions", unit, &hooks)
            .with_setup(unit, vec!["_timelock".to_string()]);
        VariantFragment::mixin(integration).with_param(param)
    }

    /// The base of the timelock contract itself, if its style inherits one.
    pub fn timelock_base(&self, timelock: TimelockType) -> VariantFragment {
        match timelock {
            TimelockType::Controller => {
                let controller =
                    Mixin::library(self.flavor, "governance", "TimelockController", &[])
                        .with_setup(
                            "TimelockController",
                            ["minDelay", "proposers", "executors", "admin"]
                                .map(str::to_string)
                                .to_vec(),
                        );
                VariantFragment::mixin(controller)
                    .with_param("uint256 minDelay")
                    .with_param("address[] memory proposers")
                    .with_param("address[] memory executors")
                    .with_param("address admin")
            }
            TimelockType::None | TimelockType::Queued => VariantFragment::default(),
        }
    }

    // UPGRADE AXIS
    // --------------------------------------------------------------------------------------------

    fn upgrade(&self, upgradeability: Upgradeability) -> VariantFragment {
        const PACKAGE: &str = "@openzeppelin/contracts-upgradeable/proxy/utils";

        let initializable = Mixin::fixed(
            "Initializable",
            format!("{PACKAGE}/Initializable.sol"),
            &[],
        )
        .as_foundation();
        match upgradeability {
            Upgradeability::None => VariantFragment::default(),
            Upgradeability::Transparent => VariantFragment::mixin(initializable),
            Upgradeability::Uups => {
                let uups = Mixin::fixed(
                    "UUPSUpgradeable",
                    format!("{PACKAGE}/UUPSUpgradeable.sol"),
                    &[Hook::AuthorizeUpgrade],
                )
                .with_setup("UUPSUpgradeable", vec![]);
                VariantFragment::mixin(initializable)
                    .with_mixin(uups)
                    .requiring(&[Hook::AuthorizeUpgrade])
            }
        }
    }

    // GOVERNOR
    // --------------------------------------------------------------------------------------------

    /// The governor core together with its settings, counting, votes and quorum extensions.
    pub fn governor(&self) -> VariantFragment {
        let settings = &self.config.governance;
        let extensions = "governance/extensions";

        let core = Mixin::library(
            self.flavor,
            "governance",
            "Governor",
            &[
                Hook::VotingDelay,
                Hook::VotingPeriod,
                Hook::Quorum,
                Hook::State,
                Hook::ProposalNeedsQueuing,
                Hook::Propose,
                Hook::ProposalThreshold,
                Hook::QueueOperations,
                Hook::ExecuteOperations,
                Hook::Cancel,
                Hook::Executor,
                Hook::SupportsInterface,
            ],
        )
        .with_setup(
            "Governor",
            vec![quoted(&format!("{} Governance", self.config.identity.name))],
        );
        let mut fragment = VariantFragment::mixin(core);

        if settings.updatable {
            let mutable = Mixin::library(
                self.flavor,
                extensions,
                "GovernorSettings",
                &[Hook::VotingDelay, Hook::VotingPeriod, Hook::ProposalThreshold],
            )
            .with_setup(
                "GovernorSettings",
                vec![
                    settings.voting_delay.to_string(),
                    settings.voting_period.to_string(),
                    settings.proposal_threshold.to_string(),
                ],
            );
            fragment = fragment.with_mixin(mutable);
        }

        let counting = Mixin::library(self.flavor, extensions, "GovernorCountingSimple", &[])
            .with_setup("GovernorCountingSimple", vec![]);
        let votes = Mixin::library(self.flavor, extensions, "GovernorVotes", &[])
            .with_setup("GovernorVotes", vec!["_token".to_string()]);
        let quorum = Mixin::library(
            self.flavor,
            extensions,
            "GovernorVotesQuorumFraction",
            &[Hook::Quorum],
        )
        .with_setup(
            "GovernorVotesQuorumFraction",
            vec![settings.quorum_numerator.to_string()],
        );

        fragment
            .with_mixin(counting)
            .with_mixin(votes)
            .with_mixin(quorum)
            .requiring(&[
                Hook::VotingDelay,
                Hook::VotingPeriod,
                Hook::Quorum,
                Hook::State,
                Hook::Propose,
                Hook::ProposalThreshold,
                Hook::Cancel,
                Hook::Executor,
                Hook::SupportsInterface,
            ])
            .with_param(format!("{} _token", self.flavor.type_name("IVotes")))
    }
}

fn quoted(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}
