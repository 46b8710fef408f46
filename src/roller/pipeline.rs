use std::cmp::Reverse;
use crate::dice::{Die, RandomSource};
use crate::modifier::{
    CapOptions, DropOptions, ModifierKind, Modifiers,
    ReplaceRule, RerollOptions, UniqueOptions
};
use crate::roller::ModifierLog;


/// Applies modifiers to a pool of results in canonical order, recording every
/// step.
///
/// Every loop that draws fresh dice is bounded by `max_attempts`.
pub(crate) struct Pipeline<'a, R> {
    die: Die,
    source: &'a mut R,
    max_attempts: u16,
    log: Vec<ModifierLog>,
}

impl<'a, R: RandomSource> Pipeline<'a, R> {
    pub fn new(die: Die, source: &'a mut R, max_attempts: u16) -> Self {
        Self { die, source, max_attempts, log: Vec::new() }
    }

    pub fn run(mut self, modifiers: &Modifiers, raw: &[u32]) -> (Vec<u32>, Vec<ModifierLog>) {
        let mut values = raw.to_vec();

        for kind in modifiers.kinds() {
            let before = values.clone();

            values = match kind {
                ModifierKind::Reroll => match &modifiers.reroll {
                    Some(reroll) => self.reroll(values, reroll),
                    None => values,
                },
                ModifierKind::Unique => match &modifiers.unique {
                    Some(unique) => self.unique(values, unique),
                    None => values,
                },
                ModifierKind::Replace => replace(values, &modifiers.replace),
                ModifierKind::Cap => match &modifiers.cap {
                    Some(cap) => cap_values(values, cap),
                    None => values,
                },
                ModifierKind::Drop => match &modifiers.drop {
                    Some(drop) => drop_values(values, drop),
                    None => values,
                },
                ModifierKind::Explode => self.explode(values),
                ModifierKind::Plus | ModifierKind::Minus => values,
            };

            tracing::debug!("Applied {} modifier: {:?} -> {:?}", kind, before, values);
            self.log.push(ModifierLog { kind, before, after: values.clone() });
        }

        (values, self.log)
    }

    fn draw(&mut self) -> u32 {
        self.die.roll(&mut *self.source)
    }

    fn reroll(&mut self, values: Vec<u32>, reroll: &RerollOptions) -> Vec<u32> {
        let limit = reroll.max_rerolls.map_or(self.max_attempts, |n| n.min(self.max_attempts));
        let mut rerolled = Vec::with_capacity(values.len());

        for mut value in values {
            let mut attempts = 0;
            while reroll.matches(value) && attempts < limit {
                value = self.draw();
                attempts += 1;
            }

            if reroll.matches(value) && attempts == self.max_attempts {
                tracing::warn!("Reroll stopped after {} attempts, keeping {}", attempts, value);
            }

            rerolled.push(value);
        }

        rerolled
    }

    fn unique(&mut self, values: Vec<u32>, unique: &UniqueOptions) -> Vec<u32> {
        let mut accepted: Vec<u32> = Vec::with_capacity(values.len());
        let collides = |accepted: &[u32], value: u32| !unique.is_exempt(value) && accepted.contains(&value);

        for mut value in values {
            let mut attempts = 0;
            while collides(&accepted, value) && attempts < self.max_attempts {
                value = self.draw();
                attempts += 1;
            }

            if collides(&accepted, value) {
                let unused = self.die.faces().iter().copied().find(|face| !accepted.contains(face));
                tracing::warn!(
                    "Unique redraw stopped after {} attempts, taking {:?} instead of {}",
                    attempts, unused, value
                );
                value = unused.unwrap_or(value);
            }

            accepted.push(value);
        }

        accepted
    }

    fn explode(&mut self, mut values: Vec<u32>) -> Vec<u32> {
        let max = self.die.max_face();
        let mut pending = values.iter().filter(|value| **value == max).count();
        let mut waves = 0;

        while pending > 0 && waves < self.max_attempts {
            let drawn: Vec<u32> = (0..pending).map(|_| self.draw()).collect();
            pending = drawn.iter().filter(|value| **value == max).count();
            values.extend(drawn);
            waves += 1;
        }

        if pending > 0 {
            tracing::warn!("Explosion stopped after {} waves with {} dice pending", waves, pending);
        }

        values
    }
}

fn replace(values: Vec<u32>, rules: &[ReplaceRule]) -> Vec<u32> {
    rules.iter().fold(values, |values, rule| {
        values
            .into_iter()
            .map(|value| if rule.from.matches(value) { rule.to } else { value })
            .collect()
    })
}

fn cap_values(values: Vec<u32>, cap: &CapOptions) -> Vec<u32> {
    values.into_iter().map(|value| cap.apply(value)).collect()
}

/// Value constraints first, then the highest count, then the lowest count.
/// Among equal values the earliest roll is dropped first.
fn drop_values(values: Vec<u32>, drop: &DropOptions) -> Vec<u32> {
    let mut kept: Vec<(usize, u32)> = values
        .into_iter()
        .enumerate()
        .filter(|(_, value)| !drop.drops_value(*value))
        .collect();

    if let Some(n) = drop.highest {
        let mut order = kept.clone();
        order.sort_by_key(|(index, value)| (Reverse(*value), *index));
        remove(&mut kept, &order[..order.len().min(n as usize)]);
    }

    if let Some(n) = drop.lowest {
        let mut order = kept.clone();
        order.sort_by_key(|(index, value)| (*value, *index));
        remove(&mut kept, &order[..order.len().min(n as usize)]);
    }

    kept.into_iter().map(|(_, value)| value).collect()
}

fn remove(kept: &mut Vec<(usize, u32)>, dropped: &[(usize, u32)]) {
    kept.retain(|entry| !dropped.contains(entry));
}


#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use super::*;
    use crate::dice::FaceCache;
    use crate::modifier::Comparison;
    use crate::roll::Sides;


    fn d(sides: u16) -> Die {
        Die::new(&Sides::Numeric(sides), &FaceCache::new())
    }

    /// A source replaying `indices` in order, then always the last one.
    fn scripted(indices: Vec<u32>) -> impl FnMut(u32) -> u32 {
        let mut position = 0usize;
        move |_| {
            let index = indices[position.min(indices.len() - 1)];
            position += 1;
            index
        }
    }

    proptest! {
        #[test]
        fn test_drop_counts(values in prop::collection::vec(1..=20u32, 5..20), highest in 0..3u16, lowest in 0..3u16) {
            let drop = DropOptions {
                highest: (highest > 0).then_some(highest),
                lowest: (lowest > 0).then_some(lowest),
                ..Default::default()
            };
            let kept = drop_values(values.clone(), &drop);

            prop_assert_eq!(kept.len(), values.len() - highest as usize - lowest as usize);

            let mut sorted = values.clone();
            sorted.sort();
            let mut expected = sorted[lowest as usize..sorted.len() - highest as usize].to_vec();
            let mut actual = kept.clone();
            actual.sort();
            expected.sort();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn test_drop_constraints(values in prop::collection::vec(1..=20u32, 1..20), threshold in 1..=20u32) {
            let drop = DropOptions { greater_than: Some(threshold), ..Default::default() };
            let kept = drop_values(values.clone(), &drop);

            prop_assert!(kept.iter().all(|value| *value <= threshold));
            prop_assert_eq!(kept.len(), values.iter().filter(|value| **value <= threshold).count());
        }

        #[test]
        fn test_unique_results_are_distinct(quantity in 1..=10usize, sides in 10..=20u16, seed: u64) {
            let mut source = crate::dice::RngSource::seeded(seed);
            let die = d(sides);
            let raw: Vec<u32> = (0..quantity).map(|_| die.roll(&mut source)).collect();

            let unique = UniqueOptions::default();
            let result = Pipeline::new(die, &mut source, 99).unique(raw, &unique);

            let mut deduplicated = result.clone();
            deduplicated.sort();
            deduplicated.dedup();
            prop_assert_eq!(deduplicated.len(), result.len());
        }
    }

    #[test]
    fn test_drop_ties_remove_first_occurrence() {
        let drop = DropOptions { highest: Some(1), ..Default::default() };
        assert_eq!(drop_values(vec![6, 2, 6, 3], &drop), vec![2, 6, 3]);

        let drop = DropOptions { lowest: Some(1), ..Default::default() };
        assert_eq!(drop_values(vec![4, 1, 5, 1], &drop), vec![4, 5, 1]);
    }

    #[test]
    fn test_drop_order() {
        let drop = DropOptions {
            exact: vec![6],
            highest: Some(1),
            lowest: Some(1),
            ..Default::default()
        };

        // 6s go first, then the highest remaining (5), then the lowest (1).
        assert_eq!(drop_values(vec![6, 5, 3, 1, 6, 4], &drop), vec![3, 4]);
    }

    #[test]
    fn test_replace_rules_chain() {
        let rules = [
            ReplaceRule::new(Comparison::Exact(1), 2),
            ReplaceRule::new(Comparison::LessThan(3), 10),
        ];

        assert_eq!(replace(vec![1, 2, 3, 4], &rules), vec![10, 10, 3, 4]);
    }

    #[test]
    fn test_cap() {
        let cap = CapOptions { greater_than: Some(5), less_than: Some(2) };
        assert_eq!(cap_values(vec![1, 2, 5, 6], &cap), vec![2, 2, 5, 5]);
    }

    #[test]
    fn test_reroll_respects_max_rerolls() {
        let reroll = RerollOptions { exact: vec![1], max_rerolls: Some(2), ..Default::default() };
        let mut rolls = 0;
        let mut source = |_: u32| { rolls += 1; 0u32 };

        let result = Pipeline::new(d(6), &mut source, 99).reroll(vec![1, 4], &reroll);

        assert_eq!(result, vec![1, 4]);
        assert_eq!(rolls, 2);
    }

    #[test]
    fn test_reroll_bounded_by_max_attempts() {
        let reroll = RerollOptions { less_than: Some(7), ..Default::default() };
        let mut rolls = 0;
        let mut source = |_: u32| { rolls += 1; 0u32 };

        let result = Pipeline::new(d(6), &mut source, 5).reroll(vec![3], &reroll);

        assert_eq!(result, vec![1]);
        assert_eq!(rolls, 5);
    }

    #[test]
    fn test_reroll_stops_on_non_matching() {
        let reroll = RerollOptions { exact: vec![1], ..Default::default() };
        let mut source = scripted(vec![0, 0, 4]);

        let result = Pipeline::new(d(6), &mut source, 99).reroll(vec![1, 3], &reroll);
        assert_eq!(result, vec![5, 3]);
    }

    #[test]
    fn test_unique_redraws_collisions() {
        let mut source = scripted(vec![2, 3]);
        let result = Pipeline::new(d(6), &mut source, 99).unique(vec![3, 3, 5], &UniqueOptions::default());

        // The second 3 redraws a 3 again, then a 4.
        assert_eq!(result, vec![3, 4, 5]);
    }

    #[test]
    fn test_unique_exemptions() {
        let mut source = |_: u32| 0u32;
        let unique = UniqueOptions { not_unique: vec![6] };
        let result = Pipeline::new(d(6), &mut source, 99).unique(vec![6, 6, 2, 2], &unique);

        assert_eq!(result, vec![6, 6, 2, 1]);
    }

    #[test]
    fn test_unique_falls_back_to_unused_face() {
        let mut source = |_: u32| 0u32;
        let result = Pipeline::new(d(4), &mut source, 3).unique(vec![1, 1, 1, 1], &UniqueOptions::default());

        assert_eq!(result, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_explode_cascades() {
        let mut source = scripted(vec![5, 5, 0]);
        let result = Pipeline::new(d(6), &mut source, 99).explode(vec![6, 2]);

        assert_eq!(result, vec![6, 2, 6, 6, 1]);
    }

    #[test]
    fn test_explode_wave_limit() {
        let mut source = |max: u32| max - 1;
        let result = Pipeline::new(d(6), &mut source, 10).explode(vec![6, 6]);

        assert_eq!(result.len(), 2 * (1 + 10));
    }

    #[test]
    fn test_run_logs_every_kind() {
        let modifiers = Modifiers {
            replace: vec![ReplaceRule::new(Comparison::Exact(1), 6)],
            explode: true,
            plus: Some(2),
            minus: Some(1),
            ..Default::default()
        };
        let mut source = |_: u32| 1u32;

        let (values, log) = Pipeline::new(d(6), &mut source, 99).run(&modifiers, &[1, 3]);

        assert_eq!(values, vec![6, 3, 2]);
        let kinds: Vec<ModifierKind> = log.iter().map(|entry| entry.kind).collect();
        assert_eq!(kinds, vec![
            ModifierKind::Replace,
            ModifierKind::Explode,
            ModifierKind::Plus,
            ModifierKind::Minus,
        ]);
        assert_eq!(log[0].before, vec![1, 3]);
        assert_eq!(log[0].after, vec![6, 3]);
        assert_eq!(log[2].before, log[2].after);
        assert_eq!(log[3].before, log[3].after);
    }
}
