use std::fmt::Display;
use crate::modifier::ModifierKind;
use crate::roll::{RollConfig, Sides};


/// One applied pipeline step: the results it saw and the results it left.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierLog {
    /// The step that ran.
    pub kind: ModifierKind,
    /// Results entering the step.
    pub before: Vec<u32>,
    /// Results leaving the step.
    pub after: Vec<u32>,
}


/// Everything produced by executing a [`RollConfig`].
///
/// `raw_results` holds one value per die as first drawn. `modified_results`
/// holds the values left after every modifier ran, so it may be shorter
/// (drop) or longer (explode). Replaying `modifier_log` from `raw_results`
/// reproduces `modified_results`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollResult {
    /// The configuration that was executed.
    pub config: RollConfig,
    /// One value per die, before any modifier.
    pub raw_results: Vec<u32>,
    /// Values after the last modifier.
    pub modified_results: Vec<u32>,
    /// One entry per applied modifier, in canonical order.
    pub modifier_log: Vec<ModifierLog>,
    /// `plus - minus`.
    pub arithmetic_adjustment: i64,
    /// Sum of `modified_results` plus `arithmetic_adjustment`.
    pub total: i64,
}

impl RollResult {
    /// Face labels of the modified results, for custom dice only.
    ///
    /// # Examples
    /// ```
    /// use notation_rocks::{execute, parse};
    ///
    /// let config = parse("3d{HT}").unwrap();
    /// let result = execute(&config, |_: u32| 1u32).unwrap();
    ///
    /// assert_eq!(result.labels(), Some(vec!['T', 'T', 'T']));
    /// ```
    pub fn labels(&self) -> Option<Vec<char>> {
        match self.config.sides() {
            Sides::Numeric(_) => None,
            Sides::Custom(faces) => Some(
                self.modified_results
                    .iter()
                    .filter_map(|value| {
                        (*value as usize).checked_sub(1).and_then(|i| faces.get(i)).copied()
                    })
                    .collect()
            ),
        }
    }

    /// The kinds of modifier that were applied, in the order they ran.
    pub fn applied(&self) -> impl Iterator<Item = ModifierKind> + '_ {
        self.modifier_log.iter().map(|entry| entry.kind)
    }
}

impl Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:?} = {}", self.config, self.modified_results, self.total)
    }
}


/// Several configurations rolled together, such as `2d6` and `1d8` for one
/// attack.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollOutcome {
    /// Sum of every group's total.
    pub total: i64,
    /// Each group's result, in input order.
    pub rolls: Vec<RollResult>,
}

impl FromIterator<RollResult> for RollOutcome {
    fn from_iter<T: IntoIterator<Item = RollResult>>(iter: T) -> Self {
        let rolls: Vec<RollResult> = iter.into_iter().collect();
        let total = rolls.iter().map(|roll| roll.total).sum();

        Self { total, rolls }
    }
}


#[cfg(test)]
mod test {
    use super::*;


    fn result(config: RollConfig, modified: Vec<u32>) -> RollResult {
        let total = modified.iter().map(|v| i64::from(*v)).sum();
        RollResult {
            config,
            raw_results: modified.clone(),
            modified_results: modified,
            modifier_log: Vec::new(),
            arithmetic_adjustment: 0,
            total,
        }
    }

    #[test]
    fn test_labels() {
        let coin = RollConfig::custom("HT").quantity(3).build().unwrap();
        assert_eq!(result(coin, vec![1, 2, 1]).labels(), Some(vec!['H', 'T', 'H']));

        let d6 = RollConfig::builder(6).build().unwrap();
        assert_eq!(result(d6, vec![4]).labels(), None);
    }

    #[test]
    fn test_outcome_total() {
        let d6 = RollConfig::builder(6).quantity(2).build().unwrap();
        let d8 = RollConfig::builder(8).build().unwrap();

        let outcome: RollOutcome = [result(d6, vec![3, 5]), result(d8, vec![7])].into_iter().collect();
        assert_eq!(outcome.total, 15);
        assert_eq!(outcome.rolls.len(), 2);
    }

    #[test]
    fn test_display() {
        let d6 = RollConfig::builder(6).quantity(2).build().unwrap();
        assert_eq!(result(d6, vec![3, 5]).to_string(), "2d6: [3, 5] = 8");
    }
}
