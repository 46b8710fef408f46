use std::fmt::Display;
use crate::error::{ConstraintError, Error};
use crate::modifier::{
    CapOptions, DropOptions, ModifierKind, Modifiers,
    ReplaceRule, RerollOptions, UniqueOptions
};


/// The faces of a die: either `1..=N` or an ordered list of labels.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sides {
    /// A die numbered `1..=N`.
    Numeric(u16),
    /// A die with one character per face. Faces need not be unique.
    Custom(Vec<char>),
}

impl Sides {
    /// Creates a custom die with one face per character of `faces`.
    ///
    /// # Examples
    /// ```
    /// use notation_rocks::Sides;
    ///
    /// let coin = Sides::custom("HT");
    /// assert_eq!(coin.face_count(), 2);
    /// ```
    pub fn custom(faces: &str) -> Self {
        Sides::Custom(faces.chars().collect())
    }

    /// Number of faces, counting repeated labels.
    pub fn face_count(&self) -> usize {
        match self {
            Sides::Numeric(n) => *n as usize,
            Sides::Custom(faces) => faces.len(),
        }
    }
}

impl Display for Sides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sides::Numeric(n) => write!(f, "{n}"),
            Sides::Custom(faces) => {
                let faces: String = faces.iter().collect();
                write!(f, "{{{faces}}}")
            }
        }
    }
}


/// A validated description of a roll: which die, how many, and which
/// modifiers transform the results.
///
/// Build one with [`RollConfig::builder()`], the [`crate::dice!`] macro or by
/// parsing notation with [`crate::parse()`]. A `RollConfig` is never mutated
/// after construction.
///
/// # Examples
/// ```
/// use notation_rocks::RollConfig;
///
/// let config = RollConfig::builder(6)
///     .quantity(4)
///     .drop_lowest(1)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.to_string(), "4d6L");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollConfig {
    sides: Sides,
    quantity: u16,
    modifiers: Modifiers,
}

impl RollConfig {
    /// Creates a new [`RollConfigBuilder`] for a numeric die with `sides` faces.
    pub fn builder(sides: u16) -> RollConfigBuilder {
        RollConfigBuilder::new(Sides::Numeric(sides))
    }

    /// Creates a new [`RollConfigBuilder`] for a die labelled with the
    /// characters of `faces`.
    ///
    /// # Examples
    /// ```
    /// use notation_rocks::RollConfig;
    ///
    /// let coin = RollConfig::custom("HT").quantity(3).build().unwrap();
    /// assert_eq!(coin.to_string(), "3d{HT}");
    /// ```
    pub fn custom(faces: &str) -> RollConfigBuilder {
        RollConfigBuilder::new(Sides::custom(faces))
    }

    /// Creates a new [`RollConfigBuilder`] for any kind of die.
    pub fn builder_for(sides: Sides) -> RollConfigBuilder {
        RollConfigBuilder::new(sides)
    }

    /// The die being rolled.
    pub fn sides(&self) -> &Sides {
        &self.sides
    }

    /// How many dice are rolled, always at least one.
    pub fn quantity(&self) -> u16 {
        self.quantity
    }

    /// The modifiers applied after rolling.
    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    /// Skips validation, the way a deserialized value would.
    #[cfg(test)]
    pub(crate) fn unchecked(sides: Sides, quantity: u16, modifiers: Modifiers) -> Self {
        Self { sides, quantity, modifiers }
    }

    /// Checks every invariant of the configuration.
    ///
    /// Configurations built through [`RollConfigBuilder::build()`] always pass;
    /// this exists for values obtained another way, such as deserialization.
    ///
    /// # Errors
    /// - [`ConstraintError::ZeroValue`] for zero sides, quantity, drop counts or max rerolls.
    /// - [`ConstraintError::TooFewFaces`] / [`ConstraintError::InvalidFace`] for bad custom dice.
    /// - [`Error::Conflict`] when a custom die carries any modifier.
    /// - [`ConstraintError::DropAmount`] when drops would leave no dice.
    /// - [`ConstraintError::UniqueQuantity`] when there are more dice than faces for a unique roll.
    /// - [`ConstraintError::EmptyModifier`] for a reroll, drop or cap with no conditions.
    /// - [`ConstraintError::AdjustmentRange`] when `plus` or `minus` exceeds [`Modifiers::MAX_ADJUSTMENT`].
    pub fn validate(&self) -> Result<(), Error> {
        if self.quantity == 0 {
            return Err(ConstraintError::ZeroValue("quantity").into());
        }

        match &self.sides {
            Sides::Numeric(0) => return Err(ConstraintError::ZeroValue("sides").into()),
            Sides::Numeric(_) => {},
            Sides::Custom(faces) => {
                if faces.len() < 2 {
                    return Err(ConstraintError::TooFewFaces(faces.len()).into());
                }

                if let Some(face) = faces.iter().find(|c| !is_face_label(**c)) {
                    return Err(ConstraintError::InvalidFace(*face).into());
                }

                if let Some(modifier) = self.modifiers.kinds().next() {
                    return Err(Error::Conflict { modifier });
                }
            }
        }

        let modifiers = &self.modifiers;

        if let Some(reroll) = &modifiers.reroll {
            if reroll.is_empty() {
                return Err(ConstraintError::EmptyModifier(ModifierKind::Reroll).into());
            }

            if reroll.max_rerolls == Some(0) {
                return Err(ConstraintError::ZeroValue("max rerolls").into());
            }
        }

        if modifiers.unique.is_some() && self.quantity as usize > self.sides.face_count() {
            return Err(ConstraintError::UniqueQuantity {
                quantity: self.quantity,
                faces: self.sides.face_count(),
            }.into());
        }

        if modifiers.cap.as_ref().is_some_and(CapOptions::is_empty) {
            return Err(ConstraintError::EmptyModifier(ModifierKind::Cap).into());
        }

        if let Some(drop) = &modifiers.drop {
            validate_drop(drop, self.quantity)?;
        }

        if let Some(n) = [modifiers.plus, modifiers.minus]
            .into_iter()
            .flatten()
            .find(|n| *n > Modifiers::MAX_ADJUSTMENT)
        {
            return Err(ConstraintError::AdjustmentRange(n).into());
        }

        Ok(())
    }
}

impl Display for RollConfig {
    /// Formats the configuration as canonical dice notation.
    ///
    /// # Examples
    /// ```
    /// use notation_rocks::RollConfig;
    ///
    /// let config = RollConfig::builder(20).quantity(2).plus(5).drop_lowest(1).build().unwrap();
    /// assert_eq!(format!("{config}"), "2d20L+5");
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::notation::to_notation(self))
    }
}

fn validate_drop(drop: &DropOptions, quantity: u16) -> Result<(), Error> {
    if drop.is_empty() {
        return Err(ConstraintError::EmptyModifier(ModifierKind::Drop).into());
    }

    if drop.highest == Some(0) {
        return Err(ConstraintError::ZeroValue("drop highest").into());
    }

    if drop.lowest == Some(0) {
        return Err(ConstraintError::ZeroValue("drop lowest").into());
    }

    let amount = u32::from(drop.highest.unwrap_or(0)) + u32::from(drop.lowest.unwrap_or(0));
    if amount >= u32::from(quantity) {
        return Err(ConstraintError::DropAmount { amount, total: quantity }.into());
    }

    Ok(())
}

/// Characters a custom face may be labelled with so that notation can spell it.
pub(crate) fn is_face_label(c: char) -> bool {
    !c.is_whitespace() && c != '{' && c != '}'
}


/// A builder for [`RollConfig`] with a fluent API.
///
/// Scalar settings (drop counts, thresholds, max rerolls) are overwritten by
/// later calls. List settings (exact values, exemptions, replace rules) are
/// appended to, and `plus` / `minus` are summed.
#[derive(Debug, Clone)]
pub struct RollConfigBuilder {
    sides: Sides,
    quantity: u16,
    modifiers: Modifiers,
}

impl RollConfigBuilder {
    fn new(sides: Sides) -> Self {
        Self {
            sides,
            quantity: 1,
            modifiers: Modifiers::default(),
        }
    }

    /// Sets the number of dice to roll.
    pub fn quantity(mut self, quantity: u16) -> Self {
        self.quantity = quantity;
        self
    }

    /// Replaces every modifier at once.
    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Drops the `n` highest dice.
    pub fn drop_highest(mut self, n: u16) -> Self {
        self.drop_mut().highest = Some(n);
        self
    }

    /// Drops the `n` lowest dice.
    pub fn drop_lowest(mut self, n: u16) -> Self {
        self.drop_mut().lowest = Some(n);
        self
    }

    /// Drops every die above `value`.
    pub fn drop_greater_than(mut self, value: u32) -> Self {
        self.drop_mut().greater_than = Some(value);
        self
    }

    /// Drops every die below `value`.
    pub fn drop_less_than(mut self, value: u32) -> Self {
        self.drop_mut().less_than = Some(value);
        self
    }

    /// Drops every die showing `value`.
    pub fn drop_exact(mut self, value: u32) -> Self {
        self.drop_mut().exact.push(value);
        self
    }

    /// Rerolls dice showing `value`.
    pub fn reroll_exact(mut self, value: u32) -> Self {
        self.reroll_mut().exact.push(value);
        self
    }

    /// Rerolls dice above `value`.
    pub fn reroll_greater_than(mut self, value: u32) -> Self {
        self.reroll_mut().greater_than = Some(value);
        self
    }

    /// Rerolls dice below `value`.
    pub fn reroll_less_than(mut self, value: u32) -> Self {
        self.reroll_mut().less_than = Some(value);
        self
    }

    /// Limits how many times a single die may be rerolled.
    pub fn max_rerolls(mut self, n: u16) -> Self {
        self.reroll_mut().max_rerolls = Some(n);
        self
    }

    /// Rolls an extra die for every maximum face.
    pub fn explode(mut self) -> Self {
        self.modifiers.explode = true;
        self
    }

    /// Requires every value to be distinct.
    pub fn unique(mut self) -> Self {
        self.modifiers.unique.get_or_insert_with(UniqueOptions::default);
        self
    }

    /// Requires unique values but lets `value` repeat.
    pub fn unique_except(mut self, value: u32) -> Self {
        self.modifiers.unique
            .get_or_insert_with(UniqueOptions::default)
            .not_unique
            .push(value);
        self
    }

    /// Appends a replace rule. Rules apply in the order added.
    pub fn replace(mut self, rule: ReplaceRule) -> Self {
        self.modifiers.replace.push(rule);
        self
    }

    /// Lowers any value above `value` to `value`.
    pub fn cap_greater_than(mut self, value: u32) -> Self {
        self.modifiers.cap.get_or_insert_with(CapOptions::default).greater_than = Some(value);
        self
    }

    /// Raises any value below `value` to `value`.
    pub fn cap_less_than(mut self, value: u32) -> Self {
        self.modifiers.cap.get_or_insert_with(CapOptions::default).less_than = Some(value);
        self
    }

    /// Adds `n` to the total. Repeated calls are summed.
    pub fn plus(mut self, n: u64) -> Self {
        self.modifiers.plus = Some(self.modifiers.plus.unwrap_or(0).saturating_add(n));
        self
    }

    /// Subtracts `n` from the total. Repeated calls are summed.
    pub fn minus(mut self, n: u64) -> Self {
        self.modifiers.minus = Some(self.modifiers.minus.unwrap_or(0).saturating_add(n));
        self
    }

    /// Finalizes the configuration.
    ///
    /// # Errors
    /// Any violation reported by [`RollConfig::validate()`].
    ///
    /// # Examples
    /// ```
    /// use notation_rocks::{RollConfig, Error, ConstraintError};
    ///
    /// assert!(RollConfig::builder(6).quantity(3).build().is_ok());
    ///
    /// let too_many = RollConfig::builder(4).quantity(6).unique().build();
    /// assert!(matches!(too_many, Err(Error::Constraint(ConstraintError::UniqueQuantity { .. }))));
    /// ```
    pub fn build(self) -> Result<RollConfig, Error> {
        let config = RollConfig {
            sides: self.sides,
            quantity: self.quantity,
            modifiers: self.modifiers,
        };

        config.validate()?;
        Ok(config)
    }

    fn drop_mut(&mut self) -> &mut DropOptions {
        self.modifiers.drop.get_or_insert_with(DropOptions::default)
    }

    fn reroll_mut(&mut self) -> &mut RerollOptions {
        self.modifiers.reroll.get_or_insert_with(RerollOptions::default)
    }
}


/// A macro for conveniently creating [`RollConfig`] instances.
///
/// # Syntax
/// - `dice!(SIDES)`: a single die (e.g. `dice!(6)` for 1d6).
/// - `dice!(SIDES, QUANTITY)`: several dice (e.g. `dice!(10, 3)` for 3d10).
/// - `dice!(SIDES, QUANTITY, DROP)`: drop one die, `DROP` is `drop_highest` or `drop_lowest`.
/// - `dice!(SIDES, QUANTITY, DROP, N)`: drop `N` dice.
///
/// # Returns
/// `Result<RollConfig, Error>` - the result of [`RollConfigBuilder::build()`].
///
/// # Examples
/// ```
/// use notation_rocks::dice;
///
/// assert_eq!(dice!(6).unwrap().to_string(), "1d6");
/// assert_eq!(dice!(10, 3).unwrap().to_string(), "3d10");
/// assert_eq!(dice!(6, 4, drop_lowest).unwrap().to_string(), "4d6L");
/// assert_eq!(dice!(20, 4, drop_highest, 2).unwrap().to_string(), "4d20H2");
/// ```
#[macro_export]
macro_rules! dice {
    ($sides:literal) => {
        $crate::RollConfig::builder($sides as u16)
            .build()
    };

    ($sides:literal, $quantity:literal) => {
        $crate::RollConfig::builder($sides as u16)
            .quantity($quantity)
            .build()
    };

    ($sides:literal, $quantity:literal, $drop:ident) => {
        $crate::RollConfig::builder($sides as u16)
            .quantity($quantity)
            .$drop(1)
            .build()
    };

    ($sides:literal, $quantity:literal, $drop:ident, $n:literal) => {
        $crate::RollConfig::builder($sides as u16)
            .quantity($quantity)
            .$drop($n)
            .build()
    }
}
