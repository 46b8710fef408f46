use crate::modifier::ModifierKind;
use crate::notation::NotationError;


/// Every way building, parsing or rolling a configuration can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The input is not valid dice notation.
    #[error("Notation error - {0}")]
    Notation(#[from] NotationError),

    /// The configuration is well-formed but cannot be rolled.
    #[error("Roll constraint violation - {0}")]
    Constraint(#[from] ConstraintError),

    /// Custom dice take no modifiers.
    #[error("Modifier conflict - {modifier} cannot be applied to custom dice")]
    Conflict {
        /// The first modifier found on the custom die.
        modifier: ModifierKind
    },
}


/// A configuration that cannot be rolled as described.
///
/// Always raised before any randomness is consumed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintError {
    /// A count that must be positive is zero. Names the offending field.
    #[error("Zero value not allowed for {0}")]
    ZeroValue(&'static str),

    /// Drop counts together remove every die.
    #[error("Cannot drop {amount} of {total} dice")]
    DropAmount {
        /// Highest plus lowest drop counts.
        amount: u32,
        /// Dice in the pool.
        total: u16
    },

    /// More unique dice than the die has faces.
    #[error("Cannot roll {quantity} unique dice with only {faces} faces")]
    UniqueQuantity {
        /// Dice requested.
        quantity: u16,
        /// Faces available.
        faces: usize
    },

    /// A custom die with fewer than two faces.
    #[error("Custom dice need at least 2 faces, got {0}")]
    TooFewFaces(usize),

    /// A custom face that is whitespace or a brace.
    #[error("Invalid face label {0:?}")]
    InvalidFace(char),

    /// A modifier with nothing to match, e.g. a reroll with no values.
    #[error("{0} modifier has no conditions")]
    EmptyModifier(ModifierKind),

    /// `plus` or `minus` beyond [`Modifiers::MAX_ADJUSTMENT`](crate::Modifiers::MAX_ADJUSTMENT).
    #[error("Arithmetic adjustment {0} exceeds the supported maximum")]
    AdjustmentRange(u64),
}
