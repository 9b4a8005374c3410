use ark_std::{error, fmt};

/// Failures of field and group operations.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AlgebraError {
    /// Bytes that do not encode a valid element.
    DeserializationError,
    /// Inversion of zero.
    GroupInversionError,
}

impl fmt::Display for AlgebraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlgebraError::DeserializationError => "Could not deserialize object",
            AlgebraError::GroupInversionError => "Element not invertible",
        })
    }
}

impl error::Error for AlgebraError {}
