mod mixin;
mod timelock;

use govgen_config::{
    Address, Clock, GovernanceConfig, GovernanceSettings, Identity, NewToken, TimelockType,
    TokenSource, Upgradeability, VotesType,
};

use crate::{Artifacts, Assembler, CodeGenerator};

pub const EXISTING_TOKEN: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

/// A new fungible token with block-number clock, immutable settings and no timelock or proxy.
pub fn config() -> GovernanceConfig {
    GovernanceConfig {
        identity: Identity {
            name: "Acme DAO".to_string(),
            symbol: "ACME".to_string(),
            purpose: "Fund public goods".to_string(),
            description: "Governance of the Acme DAO treasury".to_string(),
            license: "MIT".to_string(),
            security_contact: None,
        },
        token: new_token(VotesType::Fungible),
        clock: Clock::BlockNumber {
            block_time_seconds: 12,
        },
        governance: GovernanceSettings {
            voting_delay: 7200,
            voting_period: 50400,
            proposal_threshold: 0,
            quorum_numerator: 4,
            updatable: false,
        },
        timelock: TimelockType::None,
        min_timelock_delay: 172_800,
        upgradeability: Upgradeability::None,
        treasury: None,
        admin: None,
    }
}

pub fn new_token(votes: VotesType) -> TokenSource {
    TokenSource::New(NewToken {
        votes,
        decimals: None,
    })
}

pub fn existing_token(votes: VotesType) -> TokenSource {
    TokenSource::Existing {
        address: EXISTING_TOKEN.parse::<Address>().unwrap(),
        votes,
    }
}

pub fn with_token(config: GovernanceConfig, token: TokenSource) -> GovernanceConfig {
    GovernanceConfig { token, ..config }
}

/// Every combination of token kind, timelock, upgrade pattern and clock.
pub fn all_combinations() -> Vec<GovernanceConfig> {
    let tokens = [
        existing_token(VotesType::Fungible),
        new_token(VotesType::Fungible),
        new_token(VotesType::NonFungible),
    ];
    let clocks = [
        Clock::BlockNumber {
            block_time_seconds: 12,
        },
        Clock::Timestamp,
    ];

    let mut configs = Vec::new();
    for token in &tokens {
        for timelock in TimelockType::ALL {
            for upgradeability in Upgradeability::ALL {
                for clock in clocks {
                    configs.push(GovernanceConfig {
                        token: token.clone(),
                        timelock: *timelock,
                        upgradeability: *upgradeability,
                        clock,
                        ..config()
                    });
                }
            }
        }
    }
    configs
}

/// Every combination, each with immutable and updatable settings, plus a non-default decimals
/// override wherever a new fungible token is generated.
pub fn all_variants() -> Vec<GovernanceConfig> {
    let mut configs = Vec::new();
    for config in all_combinations() {
        for updatable in [false, true] {
            let mut variant = config.clone();
            variant.governance.updatable = updatable;
            configs.push(variant);
        }
        if let TokenSource::New(token) = &config.token {
            if token.votes == VotesType::Fungible {
                let token = TokenSource::New(NewToken {
                    votes: VotesType::Fungible,
                    decimals: Some(6),
                });
                configs.push(with_token(config.clone(), token));
            }
        }
    }
    configs
}

pub fn generate(config: &GovernanceConfig) -> Artifacts {
    Assembler.generate(config).unwrap()
}

/// Returns the bases listed in the contract declaration of `code`.
pub fn inheritance(code: &str) -> Vec<String> {
    let declaration = code
        .lines()
        .find(|line| line.starts_with("contract "))
        .expect("no contract declaration");
    match declaration.trim_end_matches(" {").split_once(" is ") {
        Some((_, bases)) => bases.split(", ").map(str::to_string).collect(),
        None => vec![],
    }
}

/// Returns every overriding function of `code` with its override-target list.
pub fn overrides(code: &str) -> Vec<(String, Vec<String>)> {
    code.lines()
        .map(str::trim)
        .filter_map(|line| {
            let head = line.strip_prefix("function ")?;
            let name = head.split('(').next()?;
            let start = head.find("override(")? + "override(".len();
            let end = start + head[start..].find(')')?;
            let targets = head[start..end].split(", ").map(str::to_string).collect();
            Some((name.to_string(), targets))
        })
        .collect()
}

/// Renders the overrides of `code` one per line, for snapshots.
pub fn override_table(code: &str) -> String {
    overrides(code)
        .into_iter()
        .map(|(name, targets)| format!("{name}: {}\n", targets.join(", ")))
        .collect()
}

/// Returns the lines of the function `name` in `code`, from its declaration to its closing brace.
pub fn function_body<'a>(code: &'a str, name: &str) -> &'a str {
    let start = code
        .find(&format!("function {name}("))
        .unwrap_or_else(|| panic!("no function {name}"));
    let end = start + code[start..].find("\n    }\n").unwrap_or(code.len() - start);
    &code[start..end]
}
