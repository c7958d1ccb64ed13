use formkit_attrs::AttributeError;
use thiserror::Error;

/// Result alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors raised while building or editing a form.
#[derive(Debug, Error)]
pub enum FormError {
    /// An attribute guard refused a write.
    #[error(transparent)]
    Attribute(#[from] AttributeError),

    /// A method string other than `get` or `post`.
    #[error("unsupported form method: {0}")]
    InvalidMethod(String),

    /// Form options could not be read from JSON.
    #[cfg(feature = "serde")]
    #[error("invalid form options: {0}")]
    Options(#[from] serde_json::Error),
}

impl FormError {
    /// The attribute error behind this failure, if any.
    #[must_use]
    pub fn as_attribute(&self) -> Option<&AttributeError> {
        match self {
            Self::Attribute(err) => Some(err),
            _ => None,
        }
    }
}
