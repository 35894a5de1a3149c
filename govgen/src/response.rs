use govgen_codegen_solidity::{Artifacts, Contract};
use govgen_config::FieldError;
use serde::Serialize;

use crate::FilePaths;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractSource {
    pub name: String,
    pub code: String,
}

impl From<&Contract> for ContractSource {
    fn from(contract: &Contract) -> Self {
        Self {
            name: contract.name.clone(),
            code: contract.code.clone(),
        }
    }
}

/// The document printed after a successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub token: ContractSource,
    pub governance: ContractSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timelock: Option<ContractSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_paths: Option<FilePaths>,
}

impl GenerateResponse {
    /// Returns `None` if `artifacts` lacks the token or governance contract.
    pub fn new(artifacts: &Artifacts, file_paths: Option<FilePaths>) -> Option<Self> {
        Some(Self {
            token: artifacts.token()?.into(),
            governance: artifacts.governance()?.into(),
            timelock: artifacts.timelock().map(ContractSource::from),
            file_paths,
        })
    }
}

/// The document printed when the request could not be turned into contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub errors: Vec<FieldError>,
}
