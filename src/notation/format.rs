use crate::modifier::{Bound, Comparison, ModifierKind, Modifiers};
use crate::roll::RollConfig;
use crate::notation::describe;


/// Both renderings of a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Formatted {
    /// See [`to_notation()`].
    pub notation: String,
    /// See [`describe()`].
    pub description: Vec<String>,
}

/// Renders a configuration as canonical notation and as description phrases.
///
/// # Examples
/// ```
/// use notation_rocks::{format, parse};
///
/// let formatted = format(&parse("4d6").unwrap());
/// assert_eq!(formatted.notation, "4d6");
/// assert_eq!(formatted.description, vec!["Roll 4 6-sided dice"]);
/// ```
pub fn format(config: &RollConfig) -> Formatted {
    Formatted {
        notation: to_notation(config),
        description: describe(config),
    }
}

/// Canonical notation for a configuration.
///
/// The quantity is always written, the die marker is a lower case `d` and
/// modifiers follow in canonical order, so parsing the output yields an equal
/// configuration.
///
/// # Examples
/// ```
/// use notation_rocks::{parse, to_notation};
///
/// assert_eq!(to_notation(&parse("d20 + 3 r{1}").unwrap()), "1d20R{1}+3");
/// assert_eq!(to_notation(&parse("4D6!l").unwrap()), "4d6L!");
/// ```
pub fn to_notation(config: &RollConfig) -> String {
    let modifiers = config.modifiers();

    let mut notation = format!("{}d{}", config.quantity(), config.sides());
    for kind in modifiers.kinds() {
        notation.push_str(&term(modifiers, kind));
    }

    notation
}

fn term(modifiers: &Modifiers, kind: ModifierKind) -> String {
    match kind {
        ModifierKind::Reroll => modifiers.reroll.as_ref().map_or_else(String::new, |reroll| {
            let max = reroll.max_rerolls.map(|n| n.to_string()).unwrap_or_default();
            let items = conditions(reroll.greater_than, reroll.less_than, &reroll.exact);
            format!("R{{{items}}}{max}")
        }),

        ModifierKind::Unique => match modifiers.unique.as_ref() {
            Some(unique) if !unique.not_unique.is_empty() => format!("U{{{}}}", join(&unique.not_unique)),
            Some(_) => "U".into(),
            None => String::new(),
        },

        ModifierKind::Replace => {
            let rules: Vec<String> = modifiers.replace
                .iter()
                .map(|rule| format!("{}={}", comparison(&rule.from), rule.to))
                .collect();

            format!("V{{{}}}", rules.join(","))
        },

        ModifierKind::Cap => modifiers.cap.as_ref().map_or_else(String::new, |cap| {
            format!("C{{{}}}", conditions(cap.greater_than, cap.less_than, &[]))
        }),

        ModifierKind::Drop => modifiers.drop.as_ref().map_or_else(String::new, |drop| {
            let mut term = String::new();
            if let Some(n) = drop.highest {
                term.push_str(&count_term('H', n));
            }

            if let Some(n) = drop.lowest {
                term.push_str(&count_term('L', n));
            }

            if drop.has_constraints() {
                term.push_str(&format!("D{{{}}}", conditions(drop.greater_than, drop.less_than, &drop.exact)));
            }

            term
        }),

        ModifierKind::Explode => "!".into(),

        ModifierKind::Plus => modifiers.plus.map(|n| format!("+{n}")).unwrap_or_default(),

        ModifierKind::Minus => modifiers.minus.map(|n| format!("-{n}")).unwrap_or_default(),
    }
}

fn count_term(letter: char, n: u16) -> String {
    if n == 1 { letter.to_string() } else { format!("{letter}{n}") }
}

/// `>g,<l,e1,e2...` for the conditions present.
fn conditions(greater_than: Option<u32>, less_than: Option<u32>, exact: &[u32]) -> String {
    let bounds = [(Bound::GreaterThan, greater_than), (Bound::LessThan, less_than)];

    bounds
        .into_iter()
        .filter_map(|(bound, value)| value.map(|n| format!("{}{n}", bound.symbol())))
        .chain(exact.iter().map(u32::to_string))
        .collect::<Vec<_>>()
        .join(",")
}

fn comparison(comparison: &Comparison) -> String {
    match *comparison {
        Comparison::Exact(n) => n.to_string(),
        Comparison::GreaterThan(n) => format!("{}{n}", Bound::GreaterThan.symbol()),
        Comparison::LessThan(n) => format!("{}{n}", Bound::LessThan.symbol()),
    }
}

fn join(values: &[u32]) -> String {
    values.iter().map(u32::to_string).collect::<Vec<_>>().join(",")
}


#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use super::*;
    use crate::notation::parse;
    use crate::roll_test_strategies::roll_config_strategy;
    use crate::modifier::ReplaceRule;


    proptest! {
        #[test]
        fn test_round_trip(config in roll_config_strategy()) {
            let notation = to_notation(&config);
            let parsed = parse(&notation);

            prop_assert_eq!(parsed, Ok(config), "notation = {}", notation);
        }

        #[test]
        fn test_notation_is_stable(config in roll_config_strategy()) {
            let notation = to_notation(&config);
            let again = to_notation(&parse(&notation).unwrap());

            prop_assert_eq!(notation, again);
        }

        #[test]
        fn test_display_matches_notation(config in roll_config_strategy()) {
            prop_assert_eq!(config.to_string(), to_notation(&config));
        }
    }

    #[test]
    fn test_canonical_order() {
        let config = RollConfig::builder(20)
            .quantity(4)
            .minus(1)
            .plus(2)
            .explode()
            .drop_lowest(1)
            .cap_greater_than(19)
            .replace(ReplaceRule::new(Comparison::Exact(1), 2))
            .unique_except(20)
            .reroll_less_than(2)
            .build()
            .unwrap();

        assert_eq!(to_notation(&config), "4d20R{<2}U{20}V{1=2}C{>19}L!+2-1");
    }

    #[test]
    fn test_drop_terms() {
        let config = RollConfig::builder(6)
            .quantity(6)
            .drop_exact(3)
            .drop_highest(2)
            .drop_less_than(2)
            .drop_lowest(1)
            .build()
            .unwrap();

        assert_eq!(to_notation(&config), "6d6H2LD{<2,3}");
    }

    #[test]
    fn test_custom_faces() {
        let config = RollConfig::custom("++--").quantity(4).build().unwrap();
        assert_eq!(to_notation(&config), "4d{++--}");
    }

    #[test]
    fn test_reroll_with_max() {
        let config = RollConfig::builder(10)
            .reroll_exact(1)
            .reroll_exact(2)
            .reroll_greater_than(9)
            .max_rerolls(3)
            .build()
            .unwrap();

        assert_eq!(to_notation(&config), "1d10R{>9,1,2}3");
    }
}
