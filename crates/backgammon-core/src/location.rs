//! Board location representation.
//!
//! A checker is always on one of the 24 points, on its owner's bar, or borne
//! off. Moves start at a [`Source`] (a point or the bar) and end at a
//! [`Destination`] (a point or off), so a move can never start off the board
//! or end on the bar.

use crate::{Color, NUM_POINTS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the 24 points, indexed 0 to 23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Point(u8);

impl Point {
    /// Creates a point from an index (0-23).
    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < NUM_POINTS {
            Some(Point(index))
        } else {
            None
        }
    }

    /// Returns the index (0-23).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Iterates over all points in index order.
    pub fn all() -> impl DoubleEndedIterator<Item = Point> {
        (0..NUM_POINTS as u8).map(Point)
    }

    /// Returns the number of pips a checker of `color` on this point needs to bear off.
    #[inline]
    pub const fn distance_to_off(self, color: Color) -> u8 {
        match color {
            Color::White => self.0 + 1,
            Color::Black => NUM_POINTS as u8 - self.0,
        }
    }

    /// Returns true if this point lies in `color`'s home board.
    #[inline]
    pub const fn is_home(self, color: Color) -> bool {
        self.distance_to_off(color) <= 6
    }

    /// Returns the point reached by moving `pips` forward for `color`,
    /// or `None` if the move runs past the last point.
    #[inline]
    pub const fn advance(self, color: Color, pips: u8) -> Option<Point> {
        match color {
            Color::White => {
                if pips <= self.0 {
                    Some(Point(self.0 - pips))
                } else {
                    None
                }
            }
            Color::Black => Point::new(self.0 + pips),
        }
    }

    /// Returns the point a checker of `color` enters on from the bar with `die`.
    ///
    /// Returns `None` for a die outside 1-6.
    #[inline]
    pub const fn entry(color: Color, die: u8) -> Option<Point> {
        if die == 0 || die > 6 {
            return None;
        }
        match color {
            Color::White => Some(Point(NUM_POINTS as u8 - die)),
            Color::Black => Some(Point(die - 1)),
        }
    }

    /// Returns the 1-based point number used in move notation.
    #[inline]
    pub const fn number(self) -> u8 {
        self.0 + 1
    }

    /// Creates a point from its 1-based notation number.
    #[inline]
    pub const fn from_number(number: u8) -> Option<Self> {
        if number == 0 {
            None
        } else {
            Point::new(number - 1)
        }
    }
}

impl TryFrom<u8> for Point {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Point::new(index).ok_or_else(|| format!("point index out of range: {}", index))
    }
}

impl From<Point> for u8 {
    fn from(point: Point) -> u8 {
        point.0
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Where a move starts: a point or the mover's bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Bar,
    Point(Point),
}

impl Source {
    /// Returns the point, if this source is on the board.
    #[inline]
    pub const fn point(self) -> Option<Point> {
        match self {
            Source::Bar => None,
            Source::Point(p) => Some(p),
        }
    }

    /// Returns the destination reached by moving `die` pips from here.
    ///
    /// Running past the last point yields [`Destination::Off`]. Returns `None`
    /// only for a die outside 1-6 entered from the bar.
    pub fn target(self, color: Color, die: u8) -> Option<Destination> {
        match self {
            Source::Bar => Point::entry(color, die).map(Destination::Point),
            Source::Point(p) => Some(match p.advance(color, die) {
                Some(to) => Destination::Point(to),
                None => Destination::Off,
            }),
        }
    }
}

impl From<Point> for Source {
    fn from(point: Point) -> Self {
        Source::Point(point)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Bar => write!(f, "bar"),
            Source::Point(p) => write!(f, "{}", p),
        }
    }
}

/// Where a move ends: a point or off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Point(Point),
    Off,
}

impl Destination {
    /// Returns the point, if this destination is on the board.
    #[inline]
    pub const fn point(self) -> Option<Point> {
        match self {
            Destination::Point(p) => Some(p),
            Destination::Off => None,
        }
    }

    /// Returns true if this destination bears the checker off.
    #[inline]
    pub const fn is_off(self) -> bool {
        matches!(self, Destination::Off)
    }
}

impl From<Point> for Destination {
    fn from(point: Point) -> Self {
        Destination::Point(point)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Point(p) => write!(f, "{}", p),
            Destination::Off => write!(f, "off"),
        }
    }
}
