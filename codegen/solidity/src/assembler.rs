use std::collections::BTreeMap;

use govgen_config::GovernanceConfig;

use crate::{
    CodeGenerator, CodegenError, GovernorEmitter, TimelockEmitter, TokenEmitter, VariantResolver,
};

/// The role a generated contract plays in the governance setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Token,
    Governance,
    Timelock,
}

impl Role {
    pub const ALL: [Role; 3] = [Self::Token, Self::Governance, Self::Timelock];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Governance => "governance",
            Self::Timelock => "timelock",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A generated source file: the display name of its main contract and the Solidity source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    pub name: String,
    pub code: String,
}

impl Contract {
    pub fn new(name: impl Into<String>, code: String) -> Self {
        Self {
            name: name.into(),
            code,
        }
    }
}

/// The contracts generated for one configuration, keyed by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifacts {
    contracts: BTreeMap<Role, Contract>,
}

impl Artifacts {
    pub fn get(&self, role: Role) -> Option<&Contract> {
        self.contracts.get(&role)
    }

    pub fn token(&self) -> Option<&Contract> {
        self.get(Role::Token)
    }

    pub fn governance(&self) -> Option<&Contract> {
        self.get(Role::Governance)
    }

    pub fn timelock(&self) -> Option<&Contract> {
        self.get(Role::Timelock)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &Contract)> {
        self.contracts.iter().map(|(role, contract)| (*role, contract))
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

/// Runs every emitter against one configuration.
///
/// Either every requested contract is generated or the first error is returned; a partial set of
/// artifacts is never produced.
#[derive(Debug, Default, Clone, Copy)]
pub struct Assembler;

impl CodeGenerator for Assembler {
    type Output = Artifacts;

    fn generate(&self, config: &GovernanceConfig) -> Result<Self::Output, CodegenError> {
        let axes = VariantResolver::new(config).resolve_all();

        let mut contracts = BTreeMap::new();
        contracts.insert(Role::Token, TokenEmitter.emit(config, &axes)?);
        contracts.insert(Role::Governance, GovernorEmitter.emit(config, &axes)?);
        if let Some(timelock) = TimelockEmitter.emit(config, &axes)? {
            contracts.insert(Role::Timelock, timelock);
        }

        for (role, contract) in &contracts {
            log::info!("generated {role} contract {}", contract.name);
        }
        Ok(Artifacts { contracts })
    }
}
