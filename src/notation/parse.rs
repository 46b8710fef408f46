use crate::modifier::{Bound, Comparison, ModifierKind, ReplaceRule};
use crate::roll::{RollConfig, RollConfigBuilder, Sides};
use crate::notation::error::*;
use crate::notation::lexer::{scan, Token, TokenKind};


/// Parser turning dice notation into a [`RollConfig`].
///
/// The input is scanned into terms up front; every character must belong to a
/// recognized term or the input is rejected before any term is interpreted.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
}

impl Parser {
    /// Scans `input` into terms.
    ///
    /// # Errors
    /// - [`NotationError::Empty`] if the input is empty or only whitespace.
    /// - [`NotationError::MissingCore`] if the input does not start with a dice term.
    /// - [`NotationError::Unrecognized`] with every left over character otherwise.
    ///
    /// Errors other than `Empty` are wrapped in [`NotationError::AtPosition`].
    ///
    /// # Examples
    /// ```
    /// use notation_rocks::{Parser, NotationError};
    ///
    /// assert!(Parser::new("4d6L").is_ok());
    ///
    /// let err = Parser::new("4d6 lol").unwrap_err();
    /// assert_eq!(err.pos(), Some(&4));
    /// assert!(matches!(err.err(), NotationError::Unrecognized(residue) if residue == "o"));
    /// ```
    pub fn new(input: &str) -> Result<Self> {
        let scan = scan(input);

        if scan.empty {
            return Err(NotationError::Empty);
        }

        if !scan.has_core() {
            return Err(NotationError::MissingCore.at_pos(0));
        }

        if let Some(position) = scan.residue_at {
            return Err(NotationError::Unrecognized(scan.residue).at_pos(position));
        }

        Ok(Self { tokens: scan.tokens })
    }

    /// Folds the scanned terms into a configuration.
    ///
    /// Terms may appear in any order. Repeated scalar terms overwrite earlier
    /// ones, repeated list terms append and `+` / `-` terms are summed.
    ///
    /// # Errors
    /// - [`NotationError::Malformed`] for a term whose body does not make sense, e.g. `C{3}`.
    /// - [`NotationError::Number`] for numbers that do not fit.
    /// - [`NotationError::Roll`] when the resulting configuration breaks a roll constraint.
    pub fn parse(&self) -> Result<RollConfig> {
        let mut tokens = self.tokens.iter();
        let core = tokens.next().ok_or(NotationError::MissingCore)?;

        let mut builder = parse_core(core).map_err(|err| err.at_pos(core.position))?;
        for token in tokens {
            builder = parse_modifier(builder, token).map_err(|err| err.at_pos(token.position))?;
        }

        Ok(builder.build()?)
    }
}

fn parse_core(token: &Token) -> Result<RollConfigBuilder> {
    let text = token.text.as_str();
    let marker = text.find(|c: char| c == 'd' || c == 'D').ok_or(NotationError::MissingCore)?;
    let (quantity, sides) = (&text[..marker], &text[marker + 1..]);

    let quantity = if quantity.is_empty() { 1 } else { quantity.parse::<u16>()? };

    let sides = match sides.strip_prefix('{').and_then(|faces| faces.strip_suffix('}')) {
        Some(faces) => Sides::custom(faces),
        None => Sides::Numeric(sides.parse()?),
    };

    Ok(RollConfig::builder_for(sides).quantity(quantity))
}

fn parse_modifier(builder: RollConfigBuilder, token: &Token) -> Result<RollConfigBuilder> {
    let text = token.text.as_str();

    let builder = match token.kind {
        TokenKind::Core => return Err(NotationError::Unrecognized(text.into())),

        TokenKind::DropHighest => builder.drop_highest(parse_count(&text[1..])?),

        TokenKind::DropLowest => builder.drop_lowest(parse_count(&text[1..])?),

        TokenKind::DropConstraint => {
            braced_items(ModifierKind::Drop, text)?
                .into_iter()
                .try_fold(builder, |builder, item| -> Result<RollConfigBuilder> {
                    Ok(match parse_comparison(ModifierKind::Drop, item)? {
                        Comparison::Exact(n) => builder.drop_exact(n),
                        Comparison::GreaterThan(n) => builder.drop_greater_than(n),
                        Comparison::LessThan(n) => builder.drop_less_than(n),
                    })
                })?
        },

        TokenKind::Reroll => {
            let close = text.find('}').ok_or_else(|| NotationError::malformed(ModifierKind::Reroll, text))?;
            let builder = braced_items(ModifierKind::Reroll, &text[..=close])?
                .into_iter()
                .try_fold(builder, |builder, item| -> Result<RollConfigBuilder> {
                    Ok(match parse_comparison(ModifierKind::Reroll, item)? {
                        Comparison::Exact(n) => builder.reroll_exact(n),
                        Comparison::GreaterThan(n) => builder.reroll_greater_than(n),
                        Comparison::LessThan(n) => builder.reroll_less_than(n),
                    })
                })?;

            match &text[close + 1..] {
                "" => builder,
                max => builder.max_rerolls(max.parse()?),
            }
        },

        TokenKind::Explode => builder.explode(),

        TokenKind::Unique if text.len() == 1 => builder.unique(),

        TokenKind::Unique => {
            braced_items(ModifierKind::Unique, text)?
                .into_iter()
                .try_fold(builder, |builder, item| -> Result<RollConfigBuilder> {
                    Ok(builder.unique_except(parse_value(ModifierKind::Unique, item)?))
                })?
        },

        TokenKind::Replace => {
            braced_items(ModifierKind::Replace, text)?
                .into_iter()
                .try_fold(builder, |builder, item| -> Result<RollConfigBuilder> {
                    let (from, to) = item
                        .split_once('=')
                        .ok_or_else(|| NotationError::malformed(ModifierKind::Replace, text))?;

                    let from = parse_comparison(ModifierKind::Replace, from)?;
                    let to = parse_value(ModifierKind::Replace, to)?;
                    Ok(builder.replace(ReplaceRule::new(from, to)))
                })?
        },

        TokenKind::Cap => {
            braced_items(ModifierKind::Cap, text)?
                .into_iter()
                .try_fold(builder, |builder, item| -> Result<RollConfigBuilder> {
                    Ok(match parse_comparison(ModifierKind::Cap, item)? {
                        Comparison::GreaterThan(n) => builder.cap_greater_than(n),
                        Comparison::LessThan(n) => builder.cap_less_than(n),
                        Comparison::Exact(_) => return Err(NotationError::malformed(ModifierKind::Cap, text)),
                    })
                })?
        },

        TokenKind::Plus => builder.plus(text[1..].parse()?),

        TokenKind::Minus => builder.minus(text[1..].parse()?),
    };

    Ok(builder)
}

/// Drop counts default to one die when no number follows the letter.
fn parse_count(digits: &str) -> Result<u16> {
    if digits.is_empty() {
        Ok(1)
    } else {
        Ok(digits.parse()?)
    }
}

/// Splits the body of `X{a,b,c}` into its items.
fn braced_items(modifier: ModifierKind, text: &str) -> Result<Vec<&str>> {
    let body = text
        .find('{')
        .and_then(|open| text[open + 1..].strip_suffix('}'))
        .ok_or_else(|| NotationError::malformed(modifier, text))?;

    let items: Vec<&str> = body.split(',').collect();
    if items.iter().any(|item| item.is_empty()) {
        return Err(NotationError::malformed(modifier, text));
    }

    Ok(items)
}

fn parse_comparison(modifier: ModifierKind, item: &str) -> Result<Comparison> {
    let mut chars = item.chars();
    match chars.next().and_then(Bound::from_symbol) {
        Some(bound) => Ok(Comparison::bounded(bound, parse_value(modifier, chars.as_str())?)),
        None => Ok(Comparison::Exact(parse_value(modifier, item)?)),
    }
}

fn parse_value(modifier: ModifierKind, item: &str) -> Result<u32> {
    if item.is_empty() || !item.chars().all(|c| c.is_ascii_digit()) {
        return Err(NotationError::malformed(modifier, item));
    }

    Ok(item.parse()?)
}


/// Parses dice notation into a [`RollConfig`].
///
/// Whitespace is ignored and modifier letters may be either case. The result
/// is all or nothing: invalid notation never yields a partial configuration.
///
/// # Errors
/// Any [`NotationError`] from [`Parser::new()`] or [`Parser::parse()`].
///
/// # Examples
/// ```
/// use notation_rocks::parse;
///
/// let config = parse("4d6L").unwrap();
/// assert_eq!(config.quantity(), 4);
/// assert_eq!(config.modifiers().drop.as_ref().and_then(|d| d.lowest), Some(1));
///
/// assert!(parse("2d5D").is_err());
/// ```
pub fn parse(input: &str) -> Result<RollConfig> {
    let config = Parser::new(input)?.parse()?;
    tracing::debug!("Parsed {:?} as {}", input, config);
    Ok(config)
}

/// Whether `input` decomposes completely into recognized notation terms.
///
/// This is a purely grammatical check: `"2d6H3"` is well formed even though
/// dropping three of two dice fails in [`parse()`].
///
/// # Examples
/// ```
/// use notation_rocks::is_valid_notation;
///
/// assert!(is_valid_notation("2d20R{<3}+5"));
/// assert!(!is_valid_notation("2d20 and then some"));
/// ```
pub fn is_valid_notation(input: &str) -> bool {
    scan(input).is_complete()
}

/// Characters left after stripping whitespace and every recognized term.
///
/// # Examples
/// ```
/// use notation_rocks::residue;
///
/// assert_eq!(residue("4d6L?"), "?");
/// assert_eq!(residue("4d6L"), "");
/// ```
pub fn residue(input: &str) -> String {
    scan(input).residue
}
