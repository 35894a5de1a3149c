use core::fmt;

use serde::Serialize;

/// A single problem found while validating a request document.
///
/// The `field` is the camelCase name used in the input document, so callers can map the
/// problem back onto their own form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed configuration document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid configuration: {}", FieldList(.0))]
    Invalid(Vec<FieldError>),
}

impl ConfigError {
    /// Returns the field problems, or an empty slice if the document could not be parsed at all.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Invalid(errors) => errors,
            Self::Malformed(_) => &[],
        }
    }

    /// Returns true if one of the reported problems concerns `field`.
    pub fn mentions(&self, field: &str) -> bool {
        self.field_errors().iter().any(|err| err.field == field)
    }
}

struct FieldList<'a>(&'a [FieldError]);

impl fmt::Display for FieldList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}
