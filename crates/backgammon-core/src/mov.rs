//! Move representation.

use crate::{Color, Destination, Point, Source};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when parsing move notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("invalid move: expected '<from>/<to>', got '{0}'")]
    InvalidFormat(String),

    #[error("invalid source: {0}")]
    InvalidSource(String),

    #[error("invalid destination: {0}")]
    InvalidDestination(String),

    #[error("invalid die: {0}")]
    InvalidDie(String),
}

/// A single checker move using one die.
///
/// A move is only an argument to validation and execution; it is never
/// stored as board state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub from: Source,
    pub to: Destination,
    pub player: Color,
    pub die: u8,
}

impl Move {
    /// A null move (used as placeholder, never legal).
    pub const NULL: Move = Move {
        from: Source::Bar,
        to: Destination::Off,
        player: Color::White,
        die: 0,
    };

    /// Creates a new move.
    #[inline]
    pub const fn new(from: Source, to: Destination, player: Color, die: u8) -> Self {
        Move {
            from,
            to,
            player,
            die,
        }
    }

    /// Creates a move from one point to another.
    ///
    /// # Panics
    ///
    /// Panics if either index is not a valid point.
    pub fn between(from: u8, to: u8, player: Color, die: u8) -> Self {
        let from = Point::new(from).expect("source index in 0..24");
        let to = Point::new(to).expect("destination index in 0..24");
        Move::new(Source::Point(from), Destination::Point(to), player, die)
    }

    /// Returns true if this move enters a checker from the bar.
    #[inline]
    pub const fn is_entry(self) -> bool {
        matches!(self.from, Source::Bar)
    }

    /// Returns true if this move bears a checker off.
    #[inline]
    pub const fn is_bear_off(self) -> bool {
        self.to.is_off()
    }

    /// Returns the notation for this move (e.g., "8/5(3)", "bar/22(3)", "3/off(5)").
    pub fn to_notation(self) -> String {
        format!("{}/{}({})", self.from, self.to, self.die)
    }

    /// Parses a move for `player` from notation.
    ///
    /// The die in parentheses may be omitted; it is then taken to be the exact
    /// number of pips between source and destination.
    pub fn parse(s: &str, player: Color) -> Result<Self, MoveParseError> {
        let s = s.trim();
        let (body, die) = match s.split_once('(') {
            Some((body, rest)) => {
                let digits = rest
                    .strip_suffix(')')
                    .ok_or_else(|| MoveParseError::InvalidFormat(s.to_string()))?;
                let die: u8 = digits
                    .parse()
                    .map_err(|_| MoveParseError::InvalidDie(digits.to_string()))?;
                (body, Some(die))
            }
            None => (s, None),
        };

        let (from_str, to_str) = body
            .split_once('/')
            .ok_or_else(|| MoveParseError::InvalidFormat(s.to_string()))?;

        let from = parse_source(from_str)?;
        let to = parse_destination(to_str)?;

        let die = match die {
            Some(d) => d,
            None => implied_die(from, to, player)
                .ok_or_else(|| MoveParseError::InvalidDie(s.to_string()))?,
        };
        if !(1..=6).contains(&die) {
            return Err(MoveParseError::InvalidDie(die.to_string()));
        }

        Ok(Move::new(from, to, player, die))
    }
}

fn parse_source(s: &str) -> Result<Source, MoveParseError> {
    if s.eq_ignore_ascii_case("bar") {
        return Ok(Source::Bar);
    }
    s.parse::<u8>()
        .ok()
        .and_then(Point::from_number)
        .map(Source::Point)
        .ok_or_else(|| MoveParseError::InvalidSource(s.to_string()))
}

fn parse_destination(s: &str) -> Result<Destination, MoveParseError> {
    if s.eq_ignore_ascii_case("off") {
        return Ok(Destination::Off);
    }
    s.parse::<u8>()
        .ok()
        .and_then(Point::from_number)
        .map(Destination::Point)
        .ok_or_else(|| MoveParseError::InvalidDestination(s.to_string()))
}

/// Exact pip distance from `from` to `to` for `player`, if travelling forward.
fn implied_die(from: Source, to: Destination, player: Color) -> Option<u8> {
    let start: i16 = match (from, player) {
        (Source::Point(p), _) => p.index() as i16,
        (Source::Bar, Color::White) => 24,
        (Source::Bar, Color::Black) => -1,
    };
    let end: i16 = match (to, player) {
        (Destination::Point(p), _) => p.index() as i16,
        (Destination::Off, Color::White) => -1,
        (Destination::Off, Color::Black) => 24,
    };
    let pips = (end - start) * player.direction() as i16;
    u8::try_from(pips).ok().filter(|d| (1..=6).contains(d))
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {})", self.player.to_char(), self.to_notation())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_notation() {
        let m = Move::between(7, 4, Color::White, 3);
        assert_eq!(m.to_notation(), "8/5(3)");

        let entry = Move::new(
            Source::Bar,
            Destination::Point(Point::new(21).unwrap()),
            Color::White,
            3,
        );
        assert_eq!(entry.to_notation(), "bar/22(3)");
        assert!(entry.is_entry());

        let off = Move::new(
            Source::Point(Point::new(2).unwrap()),
            Destination::Off,
            Color::White,
            5,
        );
        assert_eq!(off.to_notation(), "3/off(5)");
        assert!(off.is_bear_off());
    }

    #[test]
    fn parse_with_die() {
        let m = Move::parse("8/5(3)", Color::White).unwrap();
        assert_eq!(m, Move::between(7, 4, Color::White, 3));

        let off = Move::parse("3/off(5)", Color::White).unwrap();
        assert_eq!(off.to, Destination::Off);
        assert_eq!(off.die, 5);
    }

    #[test]
    fn parse_infers_die() {
        assert_eq!(Move::parse("8/5", Color::White).unwrap().die, 3);
        assert_eq!(Move::parse("17/20", Color::Black).unwrap().die, 3);
        assert_eq!(Move::parse("bar/22", Color::White).unwrap().die, 3);
        assert_eq!(Move::parse("bar/4", Color::Black).unwrap().die, 4);
        assert_eq!(Move::parse("2/off", Color::White).unwrap().die, 2);
        assert_eq!(Move::parse("22/off", Color::Black).unwrap().die, 3);
    }

    #[test]
    fn parse_rejects_backwards_without_die() {
        assert!(matches!(
            Move::parse("5/8", Color::White),
            Err(MoveParseError::InvalidDie(_))
        ));
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            Move::parse("85", Color::White),
            Err(MoveParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            Move::parse("off/5", Color::White),
            Err(MoveParseError::InvalidSource(_))
        ));
        assert!(matches!(
            Move::parse("8/bar", Color::White),
            Err(MoveParseError::InvalidDestination(_))
        ));
        assert!(matches!(
            Move::parse("8/5(9)", Color::White),
            Err(MoveParseError::InvalidDie(_))
        ));
        assert!(matches!(
            Move::parse("8/5(3", Color::White),
            Err(MoveParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn move_debug_display() {
        let m = Move::between(7, 4, Color::White, 3);
        assert_eq!(format!("{:?}", m), "Move(w 8/5(3))");
        assert_eq!(format!("{}", m), "8/5(3)");
    }
}
