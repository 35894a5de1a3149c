use std::{
    fs, io,
    path::{Path, PathBuf},
};

use govgen_codegen_solidity::{Artifacts, Contract, Role};
use govgen_config::GovernanceConfig;
use serde::Serialize;

/// Where each generated contract was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePaths {
    pub token_path: PathBuf,
    pub governance_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timelock_path: Option<PathBuf>,
}

fn file_name(config: &GovernanceConfig, role: Role) -> String {
    let symbol: String = config.identity.symbol.split_whitespace().collect();
    let prefix = config.identity.contract_prefix();
    match role {
        Role::Token if config.token.is_existing() => format!("{symbol}TokenInterface.sol"),
        Role::Token => format!("{symbol}Token.sol"),
        Role::Governance => format!("{prefix}Governance.sol"),
        Role::Timelock => format!("{prefix}Timelock.sol"),
    }
}

fn write(dir: &Path, name: String, contract: &Contract) -> io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, &contract.code)?;
    log::debug!("wrote {} to {}", contract.name, path.display());
    Ok(path)
}

/// Writes every generated contract into `dir`, creating it if needed.
///
/// Existing files with the same names are overwritten.
pub fn persist(dir: &Path, config: &GovernanceConfig, artifacts: &Artifacts) -> io::Result<FilePaths> {
    fs::create_dir_all(dir)?;

    let mut token_path = None;
    let mut governance_path = None;
    let mut timelock_path = None;
    for (role, contract) in artifacts.iter() {
        let path = write(dir, file_name(config, role), contract)?;
        match role {
            Role::Token => token_path = Some(path),
            Role::Governance => governance_path = Some(path),
            Role::Timelock => timelock_path = Some(path),
        }
    }

    match (token_path, governance_path) {
        (Some(token_path), Some(governance_path)) => Ok(FilePaths {
            token_path,
            governance_path,
            timelock_path,
        }),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "token and governance contracts are required",
        )),
    }
}
