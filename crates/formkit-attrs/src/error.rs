use core::fmt;

use thiserror::Error;

/// Result alias for attribute guard operations.
pub type Result<T> = std::result::Result<T, AttributeError>;

/// Stable, machine-checkable error codes.
///
/// Codes never change between releases; assert on these instead of
/// message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    /// A write targeted an attribute classified as read-only.
    ReadonlyAttribute = 1,
}

impl ErrorCode {
    /// Numeric form of the code.
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadonlyAttribute => write!(f, "readonly_attribute"),
        }
    }
}

/// Why an attribute write was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// The attribute is read-only and the write would change its value.
    #[error("attribute '{name}' is read-only")]
    Readonly { name: String },
}

impl AttributeError {
    /// Rejection of a write to the read-only attribute `name`.
    #[must_use]
    pub fn readonly(name: impl Into<String>) -> Self {
        Self::Readonly { name: name.into() }
    }

    /// Stable code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Readonly { .. } => ErrorCode::ReadonlyAttribute,
        }
    }

    /// Attribute the rejected write targeted, as the caller spelled it.
    #[must_use]
    pub fn attribute(&self) -> &str {
        match self {
            Self::Readonly { name } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readonly_code_is_stable() {
        let err = AttributeError::readonly("id");
        assert_eq!(err.code(), ErrorCode::ReadonlyAttribute);
        assert_eq!(err.code().as_u16(), 1);
        assert_eq!(err.code().to_string(), "readonly_attribute");
    }

    #[test]
    fn message_names_attribute() {
        let err = AttributeError::readonly("Method");
        assert_eq!(err.to_string(), "attribute 'Method' is read-only");
        assert_eq!(err.attribute(), "Method");
    }
}
