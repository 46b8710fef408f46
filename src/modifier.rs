use strum::{Display, EnumIter, IntoEnumIterator};


/// The families of roll-transforming rules.
///
/// Declaration order is the canonical order: modifiers are always applied,
/// written back to notation and described in this order, whatever order they
/// were given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum ModifierKind {
    /// Redraw dice matching a condition.
    Reroll,
    /// Redraw duplicate values.
    Unique,
    /// Substitute values matching a condition.
    Replace,
    /// Clamp values into a bound.
    Cap,
    /// Remove dice from the pool.
    Drop,
    /// Add a die for every maximum face rolled.
    Explode,
    /// Add a constant to the total.
    Plus,
    /// Subtract a constant from the total.
    Minus,
}

impl ModifierKind {
    /// Iterates every kind in canonical order.
    pub fn canonical() -> impl Iterator<Item = ModifierKind> {
        ModifierKind::iter()
    }
}


/// Direction of a threshold condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// `>`: strictly above the value.
    GreaterThan,
    /// `<`: strictly below the value.
    LessThan,
}

impl Bound {
    /// Notation prefix of the bound.
    pub const fn symbol(self) -> char {
        match self {
            Bound::GreaterThan => '>',
            Bound::LessThan => '<',
        }
    }

    /// Human readable phrasing of the bound, used in descriptions.
    pub const fn phrase(self) -> &'static str {
        match self {
            Bound::GreaterThan => "greater than",
            Bound::LessThan => "less than",
        }
    }

    /// The bound written as `symbol`, if it is `>` or `<`.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '>' => Some(Bound::GreaterThan),
            '<' => Some(Bound::LessThan),
            _ => None,
        }
    }
}


/// A single value condition: exact equality or a strict threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparison {
    /// Equal to the value.
    Exact(u32),
    /// Strictly greater than the value.
    GreaterThan(u32),
    /// Strictly less than the value.
    LessThan(u32),
}

impl Comparison {
    /// Whether `value` satisfies the condition.
    pub const fn matches(&self, value: u32) -> bool {
        match *self {
            Comparison::Exact(n) => value == n,
            Comparison::GreaterThan(n) => value > n,
            Comparison::LessThan(n) => value < n,
        }
    }

    pub(crate) const fn bounded(bound: Bound, value: u32) -> Self {
        match bound {
            Bound::GreaterThan => Comparison::GreaterThan(value),
            Bound::LessThan => Comparison::LessThan(value),
        }
    }
}


/// Removes dice from the pool by count or by value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropOptions {
    /// Number of highest dice to drop.
    pub highest: Option<u16>,
    /// Number of lowest dice to drop.
    pub lowest: Option<u16>,
    /// Drop every die above this value.
    pub greater_than: Option<u32>,
    /// Drop every die below this value.
    pub less_than: Option<u32>,
    /// Every die showing one of these values is dropped.
    pub exact: Vec<u32>,
}

impl DropOptions {
    /// No count and no constraint set.
    pub fn is_empty(&self) -> bool {
        self.highest.is_none()
            && self.lowest.is_none()
            && self.greater_than.is_none()
            && self.less_than.is_none()
            && self.exact.is_empty()
    }

    /// Whether `value` is removed by the exact or threshold constraints.
    pub fn drops_value(&self, value: u32) -> bool {
        self.exact.contains(&value)
            || self.greater_than.is_some_and(|n| value > n)
            || self.less_than.is_some_and(|n| value < n)
    }

    pub(crate) fn has_constraints(&self) -> bool {
        self.greater_than.is_some() || self.less_than.is_some() || !self.exact.is_empty()
    }
}


/// Redraws dice that match any of the conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RerollOptions {
    /// Values that are redrawn.
    pub exact: Vec<u32>,
    /// Redraw values above this.
    pub greater_than: Option<u32>,
    /// Redraw values below this.
    pub less_than: Option<u32>,
    /// Maximum number of redraws per die.
    pub max_rerolls: Option<u16>,
}

impl RerollOptions {
    /// No condition set. `max_rerolls` alone matches nothing.
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.greater_than.is_none() && self.less_than.is_none()
    }

    /// Whether `value` meets any condition and should be redrawn.
    pub fn matches(&self, value: u32) -> bool {
        self.exact.contains(&value)
            || self.greater_than.is_some_and(|n| value > n)
            || self.less_than.is_some_and(|n| value < n)
    }
}


/// Requires every final value to be distinct, except the listed ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniqueOptions {
    /// Values that may repeat.
    pub not_unique: Vec<u32>,
}

impl UniqueOptions {
    /// Whether `value` may appear more than once.
    pub fn is_exempt(&self, value: u32) -> bool {
        self.not_unique.contains(&value)
    }
}


/// Substitutes `to` for every value matching `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplaceRule {
    /// Condition a value must meet to be replaced.
    pub from: Comparison,
    /// Replacement value.
    pub to: u32,
}

impl ReplaceRule {
    /// A rule replacing values matching `from` with `to`.
    pub const fn new(from: Comparison, to: u32) -> Self {
        Self { from, to }
    }
}


/// Clamps values: anything above `greater_than` becomes `greater_than`,
/// anything below `less_than` becomes `less_than`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapOptions {
    /// Upper clamp.
    pub greater_than: Option<u32>,
    /// Lower clamp.
    pub less_than: Option<u32>,
}

impl CapOptions {
    /// Neither bound set.
    pub fn is_empty(&self) -> bool {
        self.greater_than.is_none() && self.less_than.is_none()
    }

    /// Clamps `value`. The upper bound is checked first.
    pub fn apply(&self, value: u32) -> u32 {
        match (self.greater_than, self.less_than) {
            (Some(max), _) if value > max => max,
            (_, Some(min)) if value < min => min,
            _ => value,
        }
    }
}


/// Every modifier a roll may carry. `None`, `false` or an empty list means the
/// modifier is not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifiers {
    /// `R{...}`
    pub reroll: Option<RerollOptions>,
    /// `U` or `U{...}`
    pub unique: Option<UniqueOptions>,
    /// `V{...}` rules, applied in order.
    pub replace: Vec<ReplaceRule>,
    /// `C{...}`
    pub cap: Option<CapOptions>,
    /// `H`, `L` and `D{...}`
    pub drop: Option<DropOptions>,
    /// `!`
    pub explode: bool,
    /// Sum of every `+N` term.
    pub plus: Option<u64>,
    /// Sum of every `-N` term.
    pub minus: Option<u64>,
}

impl Modifiers {
    /// Largest accepted `plus` or `minus`. Any total of a valid roll stays
    /// exactly representable as `i64` below this bound.
    pub const MAX_ADJUSTMENT: u64 = 1 << 48;

    /// Whether a modifier of `kind` is present.
    pub fn has(&self, kind: ModifierKind) -> bool {
        match kind {
            ModifierKind::Reroll => self.reroll.is_some(),
            ModifierKind::Unique => self.unique.is_some(),
            ModifierKind::Replace => !self.replace.is_empty(),
            ModifierKind::Cap => self.cap.is_some(),
            ModifierKind::Drop => self.drop.is_some(),
            ModifierKind::Explode => self.explode,
            ModifierKind::Plus => self.plus.is_some(),
            ModifierKind::Minus => self.minus.is_some(),
        }
    }

    /// The kinds present, in canonical order.
    pub fn kinds(&self) -> impl Iterator<Item = ModifierKind> + '_ {
        ModifierKind::canonical().filter(|kind| self.has(*kind))
    }

    /// No modifier present.
    pub fn is_empty(&self) -> bool {
        self.kinds().next().is_none()
    }

    /// Net arithmetic adjustment, `plus - minus`.
    ///
    /// Exact for validated configurations; values beyond
    /// [`Modifiers::MAX_ADJUSTMENT`] only occur in unvalidated ones and clamp.
    pub fn adjustment(&self) -> i64 {
        let signed = |n: Option<u64>| i64::try_from(n.unwrap_or(0)).unwrap_or(i64::MAX);
        signed(self.plus).saturating_sub(signed(self.minus))
    }
}
