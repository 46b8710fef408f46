use crate::Error as RollError;
use crate::modifier::ModifierKind;


/// Why a string is not valid dice notation.
///
/// Parsing is all or nothing: whenever one of these is returned no partial
/// configuration is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NotationError {
    /// Wraps another error with the position it was found at.
    #[error("At position {0} - {1}")]
    AtPosition(usize, Box<NotationError>),

    /// Nothing but whitespace.
    #[error("Input string is empty")]
    Empty,

    /// The input does not start with a dice term.
    #[error("Expected a dice term such as 4d6 at the start")]
    MissingCore,

    /// Text no term matches.
    #[error("Unrecognized notation: {0:?}")]
    Unrecognized(String),

    /// A number that does not fit its field.
    #[error("Invalid number: {0}")]
    Number(#[from] std::num::ParseIntError),

    /// A recognized modifier whose body makes no sense.
    #[error("Malformed {modifier} modifier: {term}")]
    Malformed {
        /// The modifier the term was recognized as.
        modifier: ModifierKind,
        /// The whole term as written.
        term: String
    },

    /// The notation parsed but describes an invalid roll.
    #[error("Roll error - {0}")]
    Roll(#[from] Box<RollError>),
}

impl NotationError {
    /// The underlying error, without positional information.
    pub fn err(&self) -> &Self {
        match self {
            NotationError::AtPosition(_, err) => err.as_ref(),
            other => other
        }
    }

    /// Position in the whitespace-free input at which the error was found.
    pub fn pos(&self) -> Option<&usize> {
        match self {
            NotationError::AtPosition(position, _) => Some(position),
            _ => None
        }
    }

    /// Attaches `position`, keeping an existing one.
    pub fn at_pos(self, position: usize) -> Self {
        match self {
            NotationError::AtPosition(_, _) => self,
            other => NotationError::AtPosition(position, Box::new(other))
        }
    }

    pub(crate) fn malformed(modifier: ModifierKind, term: &str) -> Self {
        NotationError::Malformed { modifier, term: term.into() }
    }
}

impl From<RollError> for NotationError {
    fn from(value: RollError) -> Self {
        NotationError::Roll(Box::new(value))
    }
}

pub(crate) type Result<T> = std::result::Result<T, NotationError>;
