use govgen_config::GovernanceConfig;

use crate::CodegenError;

/// This trait should be implemented on types which generate Solidity source from a validated
/// governance configuration
pub trait CodeGenerator {
    /// The type of the artifact produced by this generator
    type Output;

    /// Generates code for the given configuration
    fn generate(&self, config: &GovernanceConfig) -> Result<Self::Output, CodegenError>;
}
