//! Helpers for building governance proposals against deployed contracts.
//!
//! [ExplorerClient] looks up the interface description of a verified contract through a
//! block-explorer API, and [encode_call] turns a function name, parameter types and textual
//! arguments into the call data a proposal executes.

mod encode;
mod error;
mod fetch;
mod network;


pub use self::encode::{encode_call, keccak256, selector, EncodedCall, Param, ParamType};
pub use self::error::{AbiError, EncodeError};
pub use self::fetch::{
    AbiEntry, AbiInput, AbiSource, ContractAbi, ExplorerClient, HttpTransport, Transport,
};
pub use self::network::{Network, NetworkTable};
