use crate::modifier::{Bound, Comparison, ModifierKind, Modifiers};
use crate::roll::{RollConfig, Sides};


/// Words that change with a count.
#[derive(Debug, Clone, Copy)]
enum Noun {
    Die,
    Time,
}

impl Noun {
    const fn forms(self) -> (&'static str, &'static str) {
        match self {
            Noun::Die => ("die", "dice"),
            Noun::Time => ("time", "times"),
        }
    }

    fn count(self, n: u32) -> &'static str {
        let (singular, plural) = self.forms();
        if n == 1 { singular } else { plural }
    }
}


/// Human readable phrases for a configuration, one per effect.
///
/// The dice themselves come first, then every modifier in the same canonical
/// order used by [`crate::to_notation()`] and by the roll pipeline.
///
/// # Examples
/// ```
/// use notation_rocks::{describe, parse};
///
/// assert_eq!(describe(&parse("1d20").unwrap()), vec!["Roll 1 20-sided die"]);
/// assert_eq!(
///     describe(&parse("4d6L+2").unwrap()),
///     vec!["Roll 4 6-sided dice", "Drop lowest", "Add 2"]
/// );
/// ```
pub fn describe(config: &RollConfig) -> Vec<String> {
    let modifiers = config.modifiers();

    let mut description = vec![core_phrase(config)];
    for kind in modifiers.kinds() {
        description.extend(phrases(modifiers, kind));
    }

    description
}

fn core_phrase(config: &RollConfig) -> String {
    let quantity = config.quantity();
    let noun = Noun::Die.count(u32::from(quantity));

    match config.sides() {
        Sides::Numeric(sides) => format!("Roll {quantity} {sides}-sided {noun}"),
        Sides::Custom(faces) => {
            let faces: Vec<String> = faces.iter().map(char::to_string).collect();
            format!("Roll {quantity} {noun} with faces {}", faces.join(", "))
        }
    }
}

fn phrases(modifiers: &Modifiers, kind: ModifierKind) -> Vec<String> {
    match kind {
        ModifierKind::Reroll => modifiers.reroll.iter().map(|reroll| {
            let items = conditions(reroll.greater_than, reroll.less_than, &reroll.exact);
            let phrase = format!("Reroll {}", list(&items));

            match reroll.max_rerolls {
                Some(n) => format!("{phrase} (up to {n} {})", Noun::Time.count(u32::from(n))),
                None => phrase,
            }
        }).collect(),

        ModifierKind::Unique => modifiers.unique.iter().map(|unique| {
            if unique.not_unique.is_empty() {
                "No Duplicate Rolls".to_string()
            } else {
                let exempt: Vec<String> = unique.not_unique.iter().map(|n| value(*n)).collect();
                format!("No Duplicate Rolls (except {})", list(&exempt))
            }
        }).collect(),

        ModifierKind::Replace => modifiers.replace
            .iter()
            .map(|rule| format!("Replace {} with {}", comparison(&rule.from), value(rule.to)))
            .collect(),

        ModifierKind::Cap => modifiers.cap.iter().flat_map(|cap| {
            bounded(cap.greater_than, cap.less_than)
                .into_iter()
                .map(|phrase| format!("No Rolls {phrase}"))
        }).collect(),

        ModifierKind::Drop => modifiers.drop.iter().flat_map(|drop| {
            let mut phrases = Vec::new();

            if let Some(n) = drop.highest {
                phrases.push(counted("Drop highest", n));
            }

            if let Some(n) = drop.lowest {
                phrases.push(counted("Drop lowest", n));
            }

            // Bounds before exact values, as in `D{>5,<2,1,3}`.
            phrases.extend(
                bounded(drop.greater_than, drop.less_than)
                    .into_iter()
                    .map(|phrase| format!("Drop {phrase}"))
            );

            if !drop.exact.is_empty() {
                let exact: Vec<String> = drop.exact.iter().map(|n| value(*n)).collect();
                phrases.push(format!("Drop {}", list(&exact)));
            }

            phrases
        }).collect(),

        ModifierKind::Explode => vec!["Exploding Dice".to_string()],

        ModifierKind::Plus => modifiers.plus.iter().map(|n| format!("Add {n}")).collect(),

        ModifierKind::Minus => modifiers.minus.iter().map(|n| format!("Subtract {n}")).collect(),
    }
}

fn counted(phrase: &str, n: u16) -> String {
    if n == 1 { phrase.to_string() } else { format!("{phrase} {n}") }
}

fn value(n: u32) -> String {
    format!("[{n}]")
}

fn bound(bound: Bound, n: u32) -> String {
    format!("{} {}", bound.phrase(), value(n))
}

fn bounded(greater_than: Option<u32>, less_than: Option<u32>) -> Vec<String> {
    [(Bound::GreaterThan, greater_than), (Bound::LessThan, less_than)]
        .into_iter()
        .filter_map(|(b, n)| n.map(|n| bound(b, n)))
        .collect()
}

fn conditions(greater_than: Option<u32>, less_than: Option<u32>, exact: &[u32]) -> Vec<String> {
    let mut items = bounded(greater_than, less_than);
    items.extend(exact.iter().map(|n| value(*n)));
    items
}

fn comparison(comparison: &Comparison) -> String {
    match *comparison {
        Comparison::Exact(n) => value(n),
        Comparison::GreaterThan(n) => bound(Bound::GreaterThan, n),
        Comparison::LessThan(n) => bound(Bound::LessThan, n),
    }
}

/// `a`, `a and b`, `a, b and c`.
fn list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}
