use proptest::prelude::*;


fn letter(upper: char, lower: bool) -> String {
    if lower { upper.to_ascii_lowercase().to_string() } else { upper.to_string() }
}

fn condition_strategy() -> impl Strategy<Value = String> {
    (0u8..3, 1u32..=20).prop_map(|(kind, n)| match kind {
        0 => format!(">{n}"),
        1 => format!("<{n}"),
        _ => n.to_string(),
    })
}

fn bound_strategy() -> impl Strategy<Value = String> {
    (any::<bool>(), 1u32..=20).prop_map(|(greater, n)| {
        if greater { format!(">{n}") } else { format!("<{n}") }
    })
}

fn items(items: Vec<String>) -> String {
    items.join(",")
}

/// A single well formed modifier term for a pool of `quantity` dice.
///
/// Drop counts stay below half the pool so any combination of them remains
/// rollable.
pub(crate) fn modifier_term_strategy(quantity: u16) -> impl Strategy<Value = String> {
    let max_drop = std::cmp::max(1, (quantity - 1) / 2);

    prop_oneof![
        (1..=max_drop, any::<bool>(), any::<bool>()).prop_map(|(n, highest, lower)| {
            let marker = letter(if highest { 'H' } else { 'L' }, lower);
            if n == 1 { marker } else { format!("{marker}{n}") }
        }),
        (prop::collection::vec(condition_strategy(), 1..4), any::<bool>())
            .prop_map(|(conditions, lower)| format!("{}{{{}}}", letter('D', lower), items(conditions))),
        (prop::collection::vec(condition_strategy(), 1..4), prop::option::of(1u16..10), any::<bool>())
            .prop_map(|(conditions, max, lower)| {
                let max = max.map(|n| n.to_string()).unwrap_or_default();
                format!("{}{{{}}}{max}", letter('R', lower), items(conditions))
            }),
        Just("!".to_string()),
        (prop::collection::vec(1u32..=20, 0..3), any::<bool>()).prop_map(|(exempt, lower)| {
            let marker = letter('U', lower);
            if exempt.is_empty() {
                marker
            } else {
                format!("{marker}{{{}}}", items(exempt.iter().map(u32::to_string).collect()))
            }
        }),
        (prop::collection::vec((condition_strategy(), 1u32..=20), 1..3), any::<bool>())
            .prop_map(|(rules, lower)| {
                let rules: Vec<String> = rules.into_iter().map(|(from, to)| format!("{from}={to}")).collect();
                format!("{}{{{}}}", letter('V', lower), items(rules))
            }),
        (prop::collection::vec(bound_strategy(), 1..3), any::<bool>())
            .prop_map(|(bounds, lower)| format!("{}{{{}}}", letter('C', lower), items(bounds))),
        (0u32..100).prop_map(|n| format!("+{n}")),
        (0u32..100).prop_map(|n| format!("-{n}")),
    ]
}

/// Valid numeric notation with modifiers in arbitrary order and case.
pub(crate) fn notation_strategy() -> impl Strategy<Value = String> {
    (3u16..=10, 10u16..=20, any::<bool>())
        .prop_flat_map(|(quantity, sides, upper)| {
            let core = format!("{quantity}{}{sides}", if upper { 'D' } else { 'd' });
            prop::collection::vec(modifier_term_strategy(quantity), 0..5)
                .prop_map(move |terms| format!("{core}{}", terms.concat()))
        })
}
