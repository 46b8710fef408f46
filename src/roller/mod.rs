mod pipeline;
mod result;

pub use result::{ModifierLog, RollOutcome, RollResult};

use std::sync::Arc;
use rand::rngs::ThreadRng;
use crate::dice::{Die, FaceCache, RandomSource, RngSource};
use crate::error::Error;
use crate::roll::RollConfig;
use crate::settings::RollerSettings;
use pipeline::Pipeline;


/// Executes [`RollConfig`]s against a source of randomness.
///
/// A roller owns its [`RandomSource`], so two rollers never share a random
/// stream. The face cache is shared: by default every roller uses
/// [`FaceCache::shared()`].
///
/// # Examples
/// ```
/// use notation_rocks::{parse, Roller, RngSource};
///
/// let mut roller = Roller::new(RngSource::seeded(7));
/// let result = roller.execute(&parse("4d6L").unwrap()).unwrap();
///
/// assert_eq!(result.raw_results.len(), 4);
/// assert_eq!(result.modified_results.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Roller<R = RngSource<ThreadRng>> {
    source: R,
    cache: Arc<FaceCache>,
    settings: RollerSettings,
}

impl Roller<RngSource<ThreadRng>> {
    /// A roller backed by the thread-local generator.
    pub fn thread() -> Self {
        Self::new(RngSource::thread())
    }
}

impl Default for Roller<RngSource<ThreadRng>> {
    fn default() -> Self {
        Self::thread()
    }
}

impl<R: RandomSource> Roller<R> {
    /// A roller drawing from `source`, with default settings and the
    /// shared face cache.
    pub fn new(source: R) -> Self {
        Self {
            source,
            cache: FaceCache::shared(),
            settings: RollerSettings::default(),
        }
    }

    /// Replaces the settings.
    pub fn with_settings(mut self, settings: RollerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Uses `cache` instead of [`FaceCache::shared()`].
    pub fn with_cache(mut self, cache: Arc<FaceCache>) -> Self {
        self.cache = cache;
        self
    }

    /// The settings this roller applies.
    pub fn settings(&self) -> RollerSettings {
        self.settings
    }

    /// Rolls every die of `config` and runs the modifier pipeline.
    ///
    /// The configuration is validated again before anything is drawn, as it
    /// may not have come from a builder.
    ///
    /// # Errors
    /// Any error reported by [`RollConfig::validate()`]. No randomness is
    /// consumed when an error is returned.
    pub fn execute(&mut self, config: &RollConfig) -> Result<RollResult, Error> {
        config.validate()?;
        Ok(self.execute_valid(config))
    }

    /// Rolls several configurations as one outcome.
    ///
    /// # Errors
    /// The first validation error among `configs`. Every configuration is
    /// validated before any of them is rolled.
    ///
    /// # Examples
    /// ```
    /// use notation_rocks::{parse, Roller};
    ///
    /// let configs = [parse("2d6").unwrap(), parse("1d8+3").unwrap()];
    /// let outcome = Roller::thread().roll_all(&configs).unwrap();
    ///
    /// assert_eq!(outcome.rolls.len(), 2);
    /// assert!((6..=23).contains(&outcome.total));
    /// ```
    pub fn roll_all(&mut self, configs: &[RollConfig]) -> Result<RollOutcome, Error> {
        configs.iter().try_for_each(RollConfig::validate)?;
        Ok(configs.iter().map(|config| self.execute_valid(config)).collect())
    }

    /// Parses `notation` and executes it.
    ///
    /// # Errors
    /// [`Error::Notation`] when `notation` does not parse.
    pub fn roll(&mut self, notation: &str) -> Result<RollResult, Error> {
        let config = crate::notation::parse(notation)?;
        Ok(self.execute_valid(&config))
    }

    fn execute_valid(&mut self, config: &RollConfig) -> RollResult {
        let die = Die::new(config.sides(), &self.cache);
        let raw_results: Vec<u32> = (0..config.quantity())
            .map(|_| die.roll(&mut self.source))
            .collect();

        let modifiers = config.modifiers();
        let (modified_results, modifier_log) = Pipeline::new(die, &mut self.source, self.settings.max_attempts)
            .run(modifiers, &raw_results);

        let arithmetic_adjustment = modifiers.adjustment();
        let total = modified_results.iter().map(|value| i64::from(*value)).sum::<i64>() + arithmetic_adjustment;

        tracing::debug!("Rolled {}: {:?} -> {:?} = {}", config, raw_results, modified_results, total);

        RollResult {
            config: config.clone(),
            raw_results,
            modified_results,
            modifier_log,
            arithmetic_adjustment,
            total,
        }
    }
}


/// Executes `config` once with the given source.
///
/// # Errors
/// Any error reported by [`RollConfig::validate()`].
///
/// # Examples
/// ```
/// use notation_rocks::{execute, parse};
///
/// let config = parse("2d20H+5").unwrap();
/// let result = execute(&config, |_: u32| 9u32).unwrap();
///
/// assert_eq!(result.raw_results, vec![10, 10]);
/// assert_eq!(result.modified_results, vec![10]);
/// assert_eq!(result.total, 15);
/// ```
pub fn execute<R: RandomSource>(config: &RollConfig, source: R) -> Result<RollResult, Error> {
    Roller::new(source).execute(config)
}

/// Parses and rolls `notation` with the thread-local generator.
///
/// # Errors
/// [`Error::Notation`] when `notation` does not parse.
///
/// # Examples
/// ```
/// let result = notation_rocks::roll("3d6+2").unwrap();
/// assert!((5..=20).contains(&result.total));
/// ```
pub fn roll(notation: &str) -> Result<RollResult, Error> {
    Roller::thread().roll(notation)
}
