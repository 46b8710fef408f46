//! Dice notation parsing, formatting and rolling.
//!
//! Notation such as `4d6L+2` compiles into a [`RollConfig`], which can be
//! written back as canonical notation, described in plain language or
//! executed by a [`Roller`] into a [`RollResult`] with a full modifier log.
//!
//! ```
//! use notation_rocks::{parse, execute, validate};
//!
//! let config = parse("4d6 L").unwrap();
//! assert_eq!(config.to_string(), "4d6L");
//!
//! let result = execute(&config, |max: u32| max - 1).unwrap();
//! assert_eq!(result.total, 18);
//!
//! assert!(!validate("4d6L?").is_valid());
//! ```
#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]


#[cfg(test)]
mod roll_test_strategies;

mod error;
mod settings;
mod modifier;
mod roll;
mod dice;
mod notation;
mod roller;

pub use error::{Error, ConstraintError};
pub use settings::RollerSettings;
pub use modifier::{
    ModifierKind, Modifiers, Bound, Comparison,
    DropOptions, RerollOptions, UniqueOptions,
    ReplaceRule, CapOptions
};
pub use roll::{RollConfig, RollConfigBuilder, Sides};
pub use dice::{FaceCache, RandomSource, RngSource};
pub use notation::{
    NotationError, Parser,
    Formatted, ValidationResult,
    parse, is_valid_notation, residue,
    format, to_notation, describe, validate
};
pub use roller::{Roller, RollResult, RollOutcome, ModifierLog, execute, roll};
