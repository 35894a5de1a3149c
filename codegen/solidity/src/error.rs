/// A configuration that passed validation but cannot be realized by a contract variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodegenError {
    #[error("unsupported value for `{field}`: {reason}")]
    Unsupported { field: &'static str, reason: String },
}

impl CodegenError {
    pub fn unsupported(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Unsupported {
            field,
            reason: reason.into(),
        }
    }

    /// The configuration field responsible for the error.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Unsupported { field, .. } => *field,
        }
    }
}
