//! Dice formulas handed to the roll evaluator
//!
//! Supports "1d8", "d6", "2d6+1", "1d10-2". The engine never rolls; it only
//! decides which formula applies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::IntErrorKind;
use std::ops::RangeInclusive;
use thiserror::Error;

use super::DieSize;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    #[error("Empty dice formula")]
    Empty,
    #[error("Invalid dice format: {0}")]
    InvalidFormat(String),
    #[error("Dice count must be at least 1")]
    InvalidDiceCount,
    #[error("Die size must be at least 2")]
    InvalidDieSize,
    /// The modifier, or a total the formula can reach, does not fit in an i32
    #[error("Modifier value overflow")]
    ModifierOverflow,
}

/// A parsed formula like "2d6+3"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceFormula {
    pub dice_count: u8,
    pub die_size: u8,
    pub modifier: i32,
}

impl DiceFormula {
    /// A single die of the given size, the formula of every skill roll
    pub fn single(die: DieSize) -> Self {
        Self {
            dice_count: 1,
            die_size: die.faces(),
            modifier: 0,
        }
    }

    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return Err(DiceParseError::Empty);
        }

        let (count_str, rest) = input.split_once('d').ok_or_else(|| {
            DiceParseError::InvalidFormat(format!("Missing 'd' separator in '{}'", input))
        })?;

        let dice_count = match count_str {
            "" => 1,
            digits => digits.parse::<u8>().map_err(|_| {
                DiceParseError::InvalidFormat(format!("Invalid dice count: '{}'", digits))
            })?,
        };
        if dice_count == 0 {
            return Err(DiceParseError::InvalidDiceCount);
        }

        let (die_str, modifier) = match rest.find(['+', '-']) {
            Some(pos) => (&rest[..pos], parse_modifier(&rest[pos..])?),
            None => (rest, 0),
        };

        let die_size: u8 = die_str.parse().map_err(|_| {
            DiceParseError::InvalidFormat(format!("Invalid die size: '{}'", die_str))
        })?;
        if die_size < 2 {
            return Err(DiceParseError::InvalidDieSize);
        }

        let formula = Self {
            dice_count,
            die_size,
            modifier,
        };
        // Every reachable total must fit, so summing a roll can never overflow.
        formula.range().ok_or(DiceParseError::ModifierOverflow)?;
        Ok(formula)
    }

    /// Lowest and highest total, or `None` if either falls outside i32
    pub fn range(&self) -> Option<RangeInclusive<i32>> {
        let modifier = i64::from(self.modifier);
        let low = i64::from(self.dice_count) + modifier;
        let high = i64::from(self.dice_count) * i64::from(self.die_size) + modifier;
        Some(i32::try_from(low).ok()?..=i32::try_from(high).ok()?)
    }
}

/// Parse a signed modifier such as "+3" or "-2". Only one sign is accepted.
fn parse_modifier(signed: &str) -> Result<i32, DiceParseError> {
    let (negative, digits) = match signed.split_at(1) {
        ("-", digits) => (true, digits),
        (_, digits) => (false, digits),
    };
    if !digits.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(DiceParseError::InvalidFormat(format!(
            "Invalid modifier: '{}'",
            signed
        )));
    }

    let magnitude = digits.parse::<u32>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => DiceParseError::ModifierOverflow,
        _ => DiceParseError::InvalidFormat(format!("Invalid modifier: '{}'", signed)),
    })?;

    let value = if negative {
        -i64::from(magnitude)
    } else {
        i64::from(magnitude)
    };
    i32::try_from(value).map_err(|_| DiceParseError::ModifierOverflow)
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.dice_count, self.die_size)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{}", m),
            m => write!(f, "{}", m),
        }
    }
}
