//! Error type shared by the intent data model and the weighting engine.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentError {
    #[error("validator {0} not found in intent")]
    ValidatorNotFound(String),

    #[error("validator {0} appears more than once")]
    DuplicateValidator(String),

    #[error("weights sum to zero, cannot normalize")]
    DegenerateWeights,

    #[error("arithmetic overflow in weight computation")]
    Overflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid decimal: {0}")]
    InvalidDecimal(String),
}
