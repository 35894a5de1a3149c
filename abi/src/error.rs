#[derive(Debug, thiserror::Error)]
pub enum AbiError {
    #[error("unsupported network: {0}")]
    UnsupportedNetwork(String),
    #[error("invalid contract address: {0}")]
    InvalidAddress(String),
    /// The explorer answered but reported a failure, e.g. an unverified contract.
    #[error("explorer error: {0}")]
    Api(String),
    #[error("malformed interface description: {0}")]
    MalformedAbi(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("invalid contract address: {0}")]
    InvalidContract(String),
    #[error("invalid function name `{0}`")]
    InvalidFunction(String),
    #[error("parameter {param} has unsupported type `{ty}`")]
    UnsupportedType { param: String, ty: String },
    #[error("expected {expected} argument(s), got {actual}")]
    ArgumentCount { expected: usize, actual: usize },
    #[error("could not encode parameter {param}: {reason}")]
    InvalidArgument { param: String, reason: String },
}

impl EncodeError {
    /// The label of the parameter the error concerns, if any.
    pub fn param(&self) -> Option<&str> {
        match self {
            Self::UnsupportedType { param, .. } | Self::InvalidArgument { param, .. } => Some(param),
            _ => None,
        }
    }
}
