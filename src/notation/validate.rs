use crate::roll::RollConfig;
use crate::notation::{describe, parse, to_notation, NotationError};


/// The answer to "is this valid notation, and what does it mean?".
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// The input parsed into a rollable configuration.
    Valid {
        /// Canonical notation re-derived from `config`.
        notation: String,
        /// The parsed configuration.
        config: RollConfig,
        /// Plain-language phrases for `config`.
        description: Vec<String>,
    },
    /// The input was rejected.
    Invalid {
        /// Why parsing failed.
        error: NotationError,
    },
}

impl ValidationResult {
    /// Whether the input was valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid { .. })
    }

    /// Canonical notation, for valid input only.
    pub fn notation(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid { notation, .. } => Some(notation),
            ValidationResult::Invalid { .. } => None,
        }
    }

    /// The parsed configuration, for valid input only.
    pub fn config(&self) -> Option<&RollConfig> {
        match self {
            ValidationResult::Valid { config, .. } => Some(config),
            ValidationResult::Invalid { .. } => None,
        }
    }

    /// Description phrases, for valid input only.
    pub fn description(&self) -> Option<&[String]> {
        match self {
            ValidationResult::Valid { description, .. } => Some(description),
            ValidationResult::Invalid { .. } => None,
        }
    }

    /// The parse error, for invalid input only.
    pub fn error(&self) -> Option<&NotationError> {
        match self {
            ValidationResult::Invalid { error } => Some(error),
            ValidationResult::Valid { .. } => None,
        }
    }
}

/// Validates notation without rolling anything.
///
/// The notation and description of a valid result are always derived from
/// the parsed configuration, never echoed from the input, so non-canonical
/// casing, spacing and modifier order are normalized.
///
/// # Examples
/// ```
/// use notation_rocks::validate;
///
/// let result = validate("4D6 !l");
/// assert!(result.is_valid());
/// assert_eq!(result.notation(), Some("4d6L!"));
///
/// let result = validate("invalid-notation");
/// assert!(!result.is_valid());
/// assert!(result.config().is_none());
/// assert!(result.description().is_none());
/// ```
pub fn validate(input: &str) -> ValidationResult {
    match parse(input) {
        Ok(config) => ValidationResult::Valid {
            notation: to_notation(&config),
            description: describe(&config),
            config,
        },
        Err(error) => {
            tracing::debug!("Rejected notation {:?}: {}", input, error);
            ValidationResult::Invalid { error }
        }
    }
}
