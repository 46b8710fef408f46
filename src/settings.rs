//! Tunable limits for the roll engine.

/// Limits applied by a [`crate::Roller`] while running the modifier pipeline.
///
/// Reroll, unique and explode all draw fresh dice in a loop. Each of those
/// loops is bounded by `max_attempts` so a roll always terminates, even for
/// configurations such as `1d6R{<7}` where every value matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RollerSettings {
    /// Upper bound on rerolls per die, redraws per unique collision
    /// and cascading explosion waves.
    pub max_attempts: u16,
}

impl RollerSettings {
    /// Attempts allowed when nothing else is configured.
    pub const DEFAULT_MAX_ATTEMPTS: u16 = 99;

    /// Settings with [`Self::DEFAULT_MAX_ATTEMPTS`].
    pub const fn new() -> Self {
        Self { max_attempts: Self::DEFAULT_MAX_ATTEMPTS }
    }

    /// Settings bounding every pipeline loop at `max_attempts`.
    pub const fn with_max_attempts(max_attempts: u16) -> Self {
        Self { max_attempts }
    }
}

impl Default for RollerSettings {
    fn default() -> Self {
        Self::new()
    }
}
