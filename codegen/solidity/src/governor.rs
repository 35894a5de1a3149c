use govgen_config::{GovernanceConfig, TokenSource};

use crate::{
    docs,
    mixin::{Composition, Hook},
    timelock::timelock_contract_name,
    token::{interface_name, token_contract_name},
    writer::{Signature, Writer},
    CodeGenerator, CodegenError, Contract, ResolvedAxes, VariantResolver,
};

/// Emits the governor, composed from the governance settings and the timelock and upgrade axes.
#[derive(Debug, Default, Clone, Copy)]
pub struct GovernorEmitter;

impl CodeGenerator for GovernorEmitter {
    type Output = Contract;

    fn generate(&self, config: &GovernanceConfig) -> Result<Self::Output, CodegenError> {
        let axes = VariantResolver::new(config).resolve_all();
        self.emit(config, &axes)
    }
}

impl GovernorEmitter {
    pub fn emit(
        &self,
        config: &GovernanceConfig,
        axes: &ResolvedAxes,
    ) -> Result<Contract, CodegenError> {
        let composition = Composition::new(axes.flavor)
            .with(&axes.governor)
            .with(&axes.timelock)
            .with(&axes.upgrade);
        let settings = &config.governance;
        let name = governance_contract_name(config);

        let mut writer = Writer::new();
        writer.header(&config.identity.license);
        composition.write_imports(&mut writer);
        writer.blank();
        writer.natspec(&docs::preamble(
            &config.identity,
            format!("{} Governance", config.identity.name),
            details(config),
        ));
        writer.open_contract(&name, composition.declaration(&name));
        composition.write_setup(&mut writer, &[]);

        writer.blank();
        writer.comment("The following functions are overrides required by Solidity.");
        for o in composition.overrides() {
            let signature = signature(o.hook);
            let mut decl = signature.declare(o.hook.name()).overriding(o.clause());
            let constant = match o.hook {
                Hook::VotingDelay => Some(settings.voting_delay),
                Hook::VotingPeriod => Some(settings.voting_period),
                Hook::ProposalThreshold => Some(settings.proposal_threshold),
                _ => None,
            };
            let body = match (o.hook, constant) {
                // immutable settings are answered without a settings base
                (_, Some(value)) if !settings.updatable => {
                    decl.mutability = Some("pure");
                    vec![format!("return {value};")]
                }
                (Hook::AuthorizeUpgrade, _) => {
                    decl = decl.modifier("onlyGovernance");
                    vec![]
                }
                (hook, _) => vec![signature.super_call(hook.name())],
            };
            writer.function(&decl, &body);
        }
        writer.end();

        log::debug!("emitted governor {name} inheriting {}", composition.bases().join(", "));
        Ok(Contract::new(name, writer.into_code()))
    }
}

pub fn governance_contract_name(config: &GovernanceConfig) -> String {
    format!("{}Governance", config.identity.contract_prefix())
}

fn details(config: &GovernanceConfig) -> Vec<String> {
    let settings = &config.governance;
    let source = match &config.token {
        TokenSource::Existing { address, votes } => {
            format!("{} at {address}", interface_name(*votes))
        }
        TokenSource::New(_) => token_contract_name(config),
    };

    let mut lines = vec![
        docs::clock_mode(&config.clock),
        format!("@notice Voting power is read from {source}"),
        format!("@dev Voting delay: {}", docs::clock_span(&config.clock, settings.voting_delay)),
        format!("@dev Voting period: {}", docs::clock_span(&config.clock, settings.voting_period)),
        format!("@dev Proposal threshold: {} votes", settings.proposal_threshold),
        format!("@dev Quorum: {}% of the total voting supply", settings.quorum_numerator),
    ];
    if settings.updatable {
        lines.push("@dev Voting settings can be updated through governance".to_string());
    } else {
        lines.push("@dev Voting settings are fixed at deployment".to_string());
    }
    if config.timelock.is_enabled() {
        lines.push(format!(
            "@dev Successful proposals are executed through {}",
            timelock_contract_name(config)
        ));
    }
    lines
}

fn signature(hook: Hook) -> Signature {
    const PROPOSAL: &str = "uint256 proposalId";
    const OPERATION: &str = "address[] memory targets, uint256[] memory values, bytes[] memory calldatas, bytes32 descriptionHash";
    const OPERATION_ARGS: &str = "targets, values, calldatas, descriptionHash";
    const QUEUED_OPERATION: &str = "uint256 proposalId, address[] memory targets, uint256[] memory values, bytes[] memory calldatas, bytes32 descriptionHash";
    const QUEUED_OPERATION_ARGS: &str = "proposalId, targets, values, calldatas, descriptionHash";

    match hook {
        Hook::VotingDelay | Hook::VotingPeriod | Hook::ProposalThreshold => {
            Signature::new("", "", "public").view().returns("uint256")
        }
        Hook::Quorum => Signature::new("uint256 blockNumber", "blockNumber", "public")
            .view()
            .returns("uint256"),
        Hook::State => Signature::new(PROPOSAL, "proposalId", "public")
            .view()
            .returns("ProposalState"),
        Hook::ProposalNeedsQueuing => Signature::new(PROPOSAL, "proposalId", "public")
            .view()
            .returns("bool"),
        Hook::Propose => Signature::new(
            "address[] memory targets, uint256[] memory values, bytes[] memory calldatas, string memory description",
            "targets, values, calldatas, description",
            "public",
        )
        .returns("uint256"),
        Hook::QueueOperations => {
            Signature::new(QUEUED_OPERATION, QUEUED_OPERATION_ARGS, "internal").returns("uint48")
        }
        Hook::ExecuteOperations => {
            Signature::new(QUEUED_OPERATION, QUEUED_OPERATION_ARGS, "internal")
        }
        Hook::Cancel => Signature::new(OPERATION, OPERATION_ARGS, "internal").returns("uint256"),
        Hook::Executor => Signature::new("", "", "internal").view().returns("address"),
        Hook::SupportsInterface => Signature::new("bytes4 interfaceId", "interfaceId", "public")
            .view()
            .returns("bool"),
        Hook::AuthorizeUpgrade => {
            Signature::new("address newImplementation", "newImplementation", "internal")
        }
        hook => unreachable!("{} is not a governor hook", hook.name()),
    }
}
