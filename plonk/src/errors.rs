use ark_std::{error, fmt};
use legend_algebra::prelude::*;

pub(crate) type Result<T> = core::result::Result<T, PlonkError>;

/// Errors of the proving system.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PlonkError {
    /// Algebra error
    Algebra(AlgebraError),
    /// Error with message
    Message(String),
    /// The evaluation domain cannot have this size.
    DomainSizeError(usize),
    /// The degree of the polynomial is higher than the maximum degree supported.
    DegreeError,
    /// The witness does not have one value per variable.
    WitnessLengthError {
        /// Number of variables of the constraint system.
        expected: usize,
        /// Length of the supplied witness.
        actual: usize,
    },
    /// Public inputs are malformed or do not match the verifying key.
    PublicInputsError,
    /// Error occurred when setup.
    SetupError,
    /// Division by zero.
    DivisionByZero,
    /// The quotient does not fit in its pieces.
    QuotientSplitError,
    /// The witness does not satisfy the constraint at this row.
    ConstraintUnsatisfied(usize),
    /// Error occurred when verify.
    VerificationError,
    /// The bytes do not encode a proof.
    DeserializationError,
    /// Challenge error
    ChallengeError,
}

impl PlonkError {
    /// Return true for errors caused by a malformed key, domain or witness shape.
    pub fn is_configuration_error(&self) -> bool {
        use PlonkError::*;
        matches!(
            self,
            DomainSizeError(_)
                | DegreeError
                | WitnessLengthError { .. }
                | PublicInputsError
                | SetupError
                | DivisionByZero
                | QuotientSplitError
        )
    }
}

impl fmt::Display for PlonkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PlonkError::*;
        match self {
            Algebra(e) => write!(f, "Algebra: {}", e),
            Message(e) => f.write_str(e),
            DomainSizeError(n) => write!(f, "Invalid evaluation domain size {}.", n),
            WitnessLengthError { expected, actual } => {
                write!(f, "Witness has {} values, expected {}.", actual, expected)
            }
            ConstraintUnsatisfied(row) => {
                write!(f, "Witness does not satisfy constraint {}.", row)
            }
            DegreeError => f.write_str(
                "The degree of the polynomial is higher than the maximum degree supported.",
            ),
            PublicInputsError => f.write_str("Public inputs are malformed or do not match the key."),
            SetupError => f.write_str("Setup error."),
            DivisionByZero => f.write_str("Division by zero."),
            QuotientSplitError => {
                f.write_str("Quotient polynomial exceeds its declared degree bound.")
            }
            VerificationError => f.write_str("Verification error."),
            DeserializationError => f.write_str("Could not deserialize object."),
            ChallengeError => f.write_str("Challenge error."),
        }
    }
}

impl error::Error for PlonkError {}

impl From<AlgebraError> for PlonkError {
    fn from(e: AlgebraError) -> PlonkError {
        PlonkError::Algebra(e)
    }
}
