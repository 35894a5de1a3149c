//! Solidity code generation for governance setups.
//!
//! Each configuration axis value is resolved into a [VariantFragment] of mixins. A contract is
//! the [Composition] of the fragments active for it, and every override it emits is computed by
//! folding over the active mixins that declare the overridden function.

mod assembler;
mod codegen;
mod docs;
mod error;
mod governor;
mod mixin;
mod resolver;
mod timelock;
mod token;
mod writer;

#[cfg(test)]
mod tests;

pub use self::assembler::{Artifacts, Assembler, Contract, Role};
pub use self::codegen::CodeGenerator;
pub use self::error::CodegenError;
pub use self::governor::{governance_contract_name, GovernorEmitter};
pub use self::mixin::{Composition, Flavor, Hook, Mixin, Override, SetupCall, VariantFragment};
pub use self::resolver::{Axis, AxisValue, ResolvedAxes, TokenKind, VariantResolver};
pub use self::timelock::{timelock_contract_name, TimelockEmitter};
pub use self::token::{interface_name, token_contract_name, TokenEmitter, DEFAULT_DECIMALS};
pub use self::writer::{FunctionDecl, Signature, Writer, SOLIDITY_VERSION};
