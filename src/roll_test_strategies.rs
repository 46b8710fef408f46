use proptest::prelude::*;
use crate::modifier::{
    CapOptions, Comparison, DropOptions, Modifiers,
    ReplaceRule, RerollOptions, UniqueOptions
};
use crate::roll::RollConfig;


fn comparison_strategy() -> impl Strategy<Value = Comparison> {
    (0u8..3, 0u32..=30).prop_map(|(kind, n)| match kind {
        0 => Comparison::Exact(n),
        1 => Comparison::GreaterThan(n),
        _ => Comparison::LessThan(n),
    })
}

pub(crate) fn drop_strategy(quantity: u16) -> impl Strategy<Value = Option<DropOptions>> {
    let max_drop = std::cmp::max(1, (quantity - 1) / 2);

    let drop = (
        prop::option::of(1..=max_drop),
        prop::option::of(1..=max_drop),
        prop::option::of(0u32..=30),
        prop::option::of(0u32..=30),
        prop::collection::vec(0u32..=30, 0..3),
    ).prop_map(|(highest, lowest, greater_than, less_than, exact)| {
        DropOptions { highest, lowest, greater_than, less_than, exact }
    }).prop_filter("drop needs a condition", |drop| !drop.is_empty());

    prop::option::of(drop)
}

pub(crate) fn reroll_strategy() -> impl Strategy<Value = Option<RerollOptions>> {
    let reroll = (
        prop::collection::vec(0u32..=30, 0..3),
        prop::option::of(0u32..=30),
        prop::option::of(0u32..=30),
        prop::option::of(1u16..=10),
    ).prop_map(|(exact, greater_than, less_than, max_rerolls)| {
        RerollOptions { exact, greater_than, less_than, max_rerolls }
    }).prop_filter("reroll needs a condition", |reroll| !reroll.is_empty());

    prop::option::of(reroll)
}

pub(crate) fn cap_strategy() -> impl Strategy<Value = Option<CapOptions>> {
    let cap = (prop::option::of(0u32..=30), prop::option::of(0u32..=30))
        .prop_map(|(greater_than, less_than)| CapOptions { greater_than, less_than })
        .prop_filter("cap needs a bound", |cap| !cap.is_empty());

    prop::option::of(cap)
}

pub(crate) fn modifiers_strategy(quantity: u16) -> impl Strategy<Value = Modifiers> {
    (
        reroll_strategy(),
        prop::option::of(prop::collection::vec(0u32..=30, 0..3).prop_map(|not_unique| UniqueOptions { not_unique })),
        prop::collection::vec((comparison_strategy(), 0u32..=30).prop_map(|(from, to)| ReplaceRule::new(from, to)), 0..3),
        cap_strategy(),
        drop_strategy(quantity),
        any::<bool>(),
        prop::option::of(0u64..1000),
        prop::option::of(0u64..1000),
    ).prop_map(|(reroll, unique, replace, cap, drop, explode, plus, minus)| {
        Modifiers { reroll, unique, replace, cap, drop, explode, plus, minus }
    })
}

/// Valid numeric configurations with any combination of modifiers.
pub(crate) fn numeric_config_strategy() -> impl Strategy<Value = RollConfig> {
    (1u16..=10, 10u16..=100)
        .prop_flat_map(|(quantity, sides)| {
            modifiers_strategy(quantity).prop_map(move |modifiers| {
                RollConfig::builder(sides)
                    .quantity(quantity)
                    .modifiers(modifiers)
                    .build()
            })
        })
        .prop_filter_map("configuration rejected by builder", Result::ok)
}

pub(crate) fn custom_config_strategy() -> impl Strategy<Value = RollConfig> {
    (1u16..=10, "[a-zA-Z0-9+*#!-]{2,6}")
        .prop_map(|(quantity, faces)| {
            RollConfig::custom(&faces)
                .quantity(quantity)
                .build()
                .unwrap()
        })
}

pub(crate) fn roll_config_strategy() -> impl Strategy<Value = RollConfig> {
    prop_oneof![
        4 => numeric_config_strategy(),
        1 => custom_config_strategy(),
    ]
}
