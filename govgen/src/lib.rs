use govgen_codegen_solidity::{Assembler, CodeGenerator, CodegenError};
use govgen_config::{ConfigError, FieldError};

mod persist;
mod response;

// EXPORTS
// ================================================================================================

/// Request parsing and validation
pub use govgen_config::{parse_document, GovernanceConfig};

/// Solidity code generation
pub use govgen_codegen_solidity::Artifacts;

/// Contract interface lookup and call-data encoding
pub use govgen_abi as abi;

pub use self::persist::{persist, FilePaths};
pub use self::response::{ContractSource, ErrorResponse, GenerateResponse};

// PIPELINE
// ================================================================================================

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl GenerateError {
    /// The field problems to report back to the caller, or an empty list if the document could
    /// not be read at all.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            Self::Config(err) => err.field_errors().to_vec(),
            Self::Codegen(err) => vec![FieldError::new(err.field(), err.to_string())],
        }
    }
}

/// Validates a JSON request document and generates its contracts.
pub fn generate(source: &str) -> Result<(GovernanceConfig, Artifacts), GenerateError> {
    let config = parse_document(source)?;
    let artifacts = Assembler.generate(&config)?;
    Ok((config, artifacts))
}
