//! Dice rolls and the die values still available in a turn.

use crate::Color;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors produced by dice operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DiceError {
    #[error("invalid die value: {0} (expected 1-6)")]
    InvalidValue(u8),

    #[error("die {0} is not available")]
    NotAvailable(u8),

    #[error("remaining dice {remaining:?} do not fit a {a}-{b} roll")]
    InvalidRemaining { a: u8, b: u8, remaining: [u8; 6] },
}

/// A roll of two dice and the values not yet used this turn.
///
/// A double grants four uses of its value. Dice are immutable: consuming a
/// die returns a new value with one fewer entry remaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DiceRepr")]
pub struct Dice {
    values: (u8, u8),
    /// Remaining uses per face, indexed by `value - 1`.
    remaining: [u8; 6],
}

impl Dice {
    /// Creates dice from two rolled values.
    pub fn new(a: u8, b: u8) -> Result<Self, DiceError> {
        for v in [a, b] {
            if !(1..=6).contains(&v) {
                return Err(DiceError::InvalidValue(v));
            }
        }
        let mut remaining = [0u8; 6];
        if a == b {
            remaining[a as usize - 1] = 4;
        } else {
            remaining[a as usize - 1] = 1;
            remaining[b as usize - 1] = 1;
        }
        Ok(Dice {
            values: (a, b),
            remaining,
        })
    }

    /// Rolls two dice using the supplied random source.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let a = rng.gen_range(1..=6);
        let b = rng.gen_range(1..=6);
        Dice::new(a, b).expect("gen_range(1..=6) yields valid die values")
    }

    /// Performs the opening roll: each color rolls one die, ties are re-rolled,
    /// and the higher die moves first using both values.
    pub fn opening_roll<R: Rng + ?Sized>(rng: &mut R) -> OpeningRoll {
        loop {
            let white: u8 = rng.gen_range(1..=6);
            let black: u8 = rng.gen_range(1..=6);
            if let Some(roll) = OpeningRoll::from_values(white, black) {
                return roll;
            }
        }
    }

    /// Returns the two rolled values.
    #[inline]
    pub const fn values(&self) -> (u8, u8) {
        self.values
    }

    /// Returns true if both dice show the same value.
    #[inline]
    pub const fn is_double(&self) -> bool {
        self.values.0 == self.values.1
    }

    /// Returns how many uses of `die` remain.
    #[inline]
    pub fn count(&self, die: u8) -> u8 {
        match die {
            1..=6 => self.remaining[die as usize - 1],
            _ => 0,
        }
    }

    /// Returns true if `die` can still be used.
    #[inline]
    pub fn contains(&self, die: u8) -> bool {
        self.count(die) > 0
    }

    /// Returns the total number of remaining uses.
    #[inline]
    pub fn len(&self) -> usize {
        self.remaining.iter().map(|&c| c as usize).sum()
    }

    /// Returns true if every die has been used or forfeited.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over every remaining use, one entry per copy, highest first.
    pub fn remaining(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=6u8)
            .rev()
            .flat_map(move |v| std::iter::repeat(v).take(self.count(v) as usize))
    }

    /// Iterates over the distinct remaining values, highest first.
    pub fn distinct(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=6u8).rev().filter(move |&v| self.contains(v))
    }

    /// Removes one occurrence of `die`.
    pub fn consume(&self, die: u8) -> Result<Self, DiceError> {
        if !self.contains(die) {
            return Err(DiceError::NotAvailable(die));
        }
        let mut next = *self;
        next.remaining[die as usize - 1] -= 1;
        Ok(next)
    }

    /// Removes every occurrence of `die`.
    pub fn without_value(&self, die: u8) -> Self {
        let mut next = *self;
        if (1..=6).contains(&die) {
            next.remaining[die as usize - 1] = 0;
        }
        next
    }
}

/// Serialized form of [`Dice`], checked on the way in.
#[derive(Deserialize)]
struct DiceRepr {
    values: (u8, u8),
    remaining: [u8; 6],
}

impl TryFrom<DiceRepr> for Dice {
    type Error = DiceError;

    fn try_from(repr: DiceRepr) -> Result<Self, Self::Error> {
        let (a, b) = repr.values;
        let full = Dice::new(a, b)?;
        if repr.remaining.iter().zip(full.remaining).any(|(&left, max)| left > max) {
            return Err(DiceError::InvalidRemaining {
                a,
                b,
                remaining: repr.remaining,
            });
        }
        Ok(Dice {
            values: repr.values,
            remaining: repr.remaining,
        })
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.values.0, self.values.1)?;
        if self.len() != 2 || self.is_double() {
            let rest: Vec<String> = self.remaining().map(|v| v.to_string()).collect();
            write!(f, " [{}]", rest.join(","))?;
        }
        Ok(())
    }
}

/// Outcome of the opening roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningRoll {
    /// The color that moves first.
    pub first: Color,
    /// The dice the first player plays with.
    pub dice: Dice,
}

impl OpeningRoll {
    /// Resolves an opening roll from each color's single die.
    ///
    /// Returns `None` on a tie or an invalid value.
    pub fn from_values(white: u8, black: u8) -> Option<Self> {
        if white == black {
            return None;
        }
        let dice = Dice::new(white, black).ok()?;
        let first = if white > black {
            Color::White
        } else {
            Color::Black
        };
        Some(OpeningRoll { first, dice })
    }
}
