use govgen_config::{Clock, GovernanceConfig, NewToken, TokenSource, VotesType};

use crate::{
    docs,
    mixin::{Composition, Flavor, Hook, VariantFragment},
    writer::{FunctionDecl, Signature, Writer},
    CodeGenerator, CodegenError, Contract, ResolvedAxes, VariantResolver,
};

/// Decimals used by a fungible token unless the configuration asks otherwise.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Emits the voting token, or an interface describing an already deployed one.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenEmitter;

impl CodeGenerator for TokenEmitter {
    type Output = Contract;

    fn generate(&self, config: &GovernanceConfig) -> Result<Self::Output, CodegenError> {
        let axes = VariantResolver::new(config).resolve_all();
        self.emit(config, &axes)
    }
}

impl TokenEmitter {
    pub fn emit(
        &self,
        config: &GovernanceConfig,
        axes: &ResolvedAxes,
    ) -> Result<Contract, CodegenError> {
        match &config.token {
            TokenSource::Existing { address, votes } => {
                Ok(existing_token_interface(config, address.as_str(), *votes))
            }
            TokenSource::New(token) => new_token(config, token, axes),
        }
    }
}

/// Name of the token contract generated for `config`.
pub fn token_contract_name(config: &GovernanceConfig) -> String {
    let symbol: String = config.identity.symbol.split_whitespace().collect();
    format!("{symbol}Token")
}

/// Name of the interface emitted for an existing token with `votes`.
pub fn interface_name(votes: VotesType) -> &'static str {
    match votes {
        VotesType::Fungible => "IExistingERC20VotesToken",
        VotesType::NonFungible => "IExistingERC721VotesToken",
    }
}

// EXISTING TOKEN
// ================================================================================================

fn existing_token_interface(config: &GovernanceConfig, address: &str, votes: VotesType) -> Contract {
    let name = interface_name(votes);
    let timepoint = match config.clock {
        Clock::BlockNumber { .. } => "blockNumber",
        Clock::Timestamp => "timepoint",
    };

    let mut writer = Writer::new();
    writer.header(&config.identity.license);
    writer.natspec(&[
        format!("@title Interface for the existing {} token", config.identity.name),
        format!("@dev Read-only view of the voting token deployed at {address}"),
        docs::clock_mode(&config.clock),
    ]);
    writer.open_interface(name);

    writer.line(format!(
        "function getPastVotes(address account, uint256 {timepoint}) external view returns (uint256);"
    ));
    writer.line("function delegates(address account) external view returns (address);");
    writer.line("function delegate(address delegatee) external;");
    writer.line(
        "function delegateBySig(address delegatee, uint256 nonce, uint256 expiry, uint8 v, bytes32 r, bytes32 s) external;",
    );

    if config.clock == Clock::Timestamp {
        writer.blank();
        writer.line("function clock() external view returns (uint48);");
        writer.line("function CLOCK_MODE() external view returns (string memory);");
    }

    writer.blank();
    match votes {
        VotesType::Fungible => writer.lines(&[
            "function totalSupply() external view returns (uint256);",
            "function balanceOf(address account) external view returns (uint256);",
            "function transfer(address to, uint256 amount) external returns (bool);",
            "function allowance(address owner, address spender) external view returns (uint256);",
            "function approve(address spender, uint256 amount) external returns (bool);",
            "function transferFrom(address from, address to, uint256 amount) external returns (bool);",
        ]),
        VotesType::NonFungible => writer.lines(&[
            "function balanceOf(address owner) external view returns (uint256);",
            "function ownerOf(uint256 tokenId) external view returns (address);",
        ]),
    }
    writer.end();

    log::debug!("emitted interface {name} for the token at {address}");
    Contract::new(name, writer.into_code())
}

// NEW TOKEN
// ================================================================================================

fn new_token(
    config: &GovernanceConfig,
    token: &NewToken,
    axes: &ResolvedAxes,
) -> Result<Contract, CodegenError> {
    let decimals = match (token.votes, token.decimals) {
        (VotesType::NonFungible, Some(_)) => {
            return Err(CodegenError::unsupported(
                "tokenDecimals",
                "decimals can only be set on a fungible voting token",
            ))
        }
        (VotesType::Fungible, Some(decimals)) if decimals != DEFAULT_DECIMALS => Some(decimals),
        _ => None,
    };

    let mut composition = Composition::new(axes.flavor)
        .with(&axes.token)
        .with(&axes.clock)
        .with(&axes.upgrade);
    if decimals.is_some() {
        composition.push(&VariantFragment::default().requiring(&[Hook::Decimals]));
    }

    let admin = match (&config.admin, axes.flavor) {
        (Some(admin), _) => admin.to_string(),
        (None, Flavor::Standard) => "msg.sender".to_string(),
        (None, Flavor::Upgradeable) => {
            composition.push(&VariantFragment::default().with_param("address admin"));
            "admin".to_string()
        }
    };

    let name = token_contract_name(config);
    let mut writer = Writer::new();
    writer.header(&config.identity.license);
    composition.write_imports(&mut writer);
    writer.blank();
    writer.natspec(&docs::preamble(
        &config.identity,
        format!("{} Governance Token", config.identity.name),
        vec![docs::clock_mode(&config.clock)],
    ));
    writer.open_contract(&name, composition.declaration(&name));

    writer.line("bytes32 public constant MINTER_ROLE = keccak256(\"MINTER_ROLE\");");
    if token.votes == VotesType::NonFungible {
        writer.line("uint256 private _nextTokenId;");
    }
    writer.blank();

    composition.write_setup(
        &mut writer,
        &[
            format!("_grantRole(DEFAULT_ADMIN_ROLE, {admin});"),
            format!("_grantRole(MINTER_ROLE, {admin});"),
        ],
    );

    match token.votes {
        VotesType::Fungible => writer.function(
            &FunctionDecl::new("mint", "address to, uint256 amount", "public")
                .modifier("onlyRole(MINTER_ROLE)"),
            &["_mint(to, amount);".to_string()],
        ),
        VotesType::NonFungible => writer.function(
            &FunctionDecl::new("safeMint", "address to, string memory uri", "public")
                .modifier("onlyRole(MINTER_ROLE)")
                .returning("uint256"),
            &[
                "uint256 tokenId = _nextTokenId++;".to_string(),
                "_safeMint(to, tokenId);".to_string(),
                "_setTokenURI(tokenId, uri);".to_string(),
                "return tokenId;".to_string(),
            ],
        ),
    }

    let overrides = composition.overrides();
    if !overrides.is_empty() {
        writer.blank();
        writer.comment("The following functions are overrides required by Solidity.");
    }
    for o in overrides {
        let signature = signature(o.hook, token.votes);
        let mut decl = signature.declare(o.hook.name()).overriding(o.clause());
        let body = match o.hook {
            Hook::Decimals => vec![format!(
                "return {};",
                decimals.unwrap_or(DEFAULT_DECIMALS)
            )],
            Hook::Clock => vec!["return uint48(block.timestamp);".to_string()],
            Hook::ClockMode => vec!["return \"mode=timestamp\";".to_string()],
            Hook::AuthorizeUpgrade => {
                decl = decl.modifier("onlyRole(DEFAULT_ADMIN_ROLE)");
                vec![]
            }
            hook => vec![signature.super_call(hook.name())],
        };
        writer.function(&decl, &body);
    }
    writer.end();

    log::debug!("emitted token {name} inheriting {}", composition.bases().join(", "));
    Ok(Contract::new(name, writer.into_code()))
}

fn signature(hook: Hook, votes: VotesType) -> Signature {
    const TRANSFER_BATCH: &str = "address from, address to, uint256 firstTokenId, uint256 batchSize";
    const TRANSFER_BATCH_ARGS: &str = "from, to, firstTokenId, batchSize";

    match (hook, votes) {
        (Hook::Decimals, _) => Signature::new("", "", "public").pure().returns("uint8"),
        (Hook::Clock, _) => Signature::new("", "", "public").view().returns("uint48"),
        (Hook::ClockMode, _) => Signature::new("", "", "public").pure().returns("string memory"),
        (Hook::BeforeTokenTransfer, _) => {
            Signature::new(TRANSFER_BATCH, TRANSFER_BATCH_ARGS, "internal")
        }
        (Hook::AfterTokenTransfer, VotesType::Fungible) => Signature::new(
            "address from, address to, uint256 amount",
            "from, to, amount",
            "internal",
        ),
        (Hook::AfterTokenTransfer, VotesType::NonFungible) => {
            Signature::new(TRANSFER_BATCH, TRANSFER_BATCH_ARGS, "internal")
        }
        (Hook::Mint, _) => Signature::new("address to, uint256 amount", "to, amount", "internal"),
        (Hook::Burn, VotesType::Fungible) => {
            Signature::new("address account, uint256 amount", "account, amount", "internal")
        }
        (Hook::Burn, VotesType::NonFungible) => {
            Signature::new("uint256 tokenId", "tokenId", "internal")
        }
        (Hook::TokenUri, _) => Signature::new("uint256 tokenId", "tokenId", "public")
            .view()
            .returns("string memory"),
        (Hook::SupportsInterface, _) => Signature::new("bytes4 interfaceId", "interfaceId", "public")
            .view()
            .returns("bool"),
        (Hook::AuthorizeUpgrade, _) => {
            Signature::new("address newImplementation", "newImplementation", "internal")
        }
        (hook, _) => unreachable!("{} is not a token hook", hook.name()),
    }
}
