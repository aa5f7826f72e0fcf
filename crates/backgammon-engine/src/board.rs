//! Backgammon board representation.

use backgammon_core::{Color, Point, PositionError, PositionParser, CHECKERS_PER_SIDE, NUM_POINTS};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Pip distance charged for a checker on the bar.
pub const BAR_PIPS: u32 = 25;

/// Errors produced when building a board from external data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error(transparent)]
    Notation(#[from] PositionError),

    #[error("{color} has {count} checkers, expected 15")]
    CheckerCount { color: Color, count: u32 },
}

/// A complete board: 24 points plus bar and borne-off counters per color.
///
/// Each point holds a signed count: positive for White, negative for Black,
/// zero when empty. A point can therefore never hold both colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub points: [i8; NUM_POINTS],
    pub white_bar: u8,
    pub black_bar: u8,
    pub white_off: u8,
    pub black_off: u8,
}

impl Board {
    /// Creates a board with every checker borne off.
    ///
    /// Useful as a base for endgame fixtures together with [`Board::with_layout`].
    pub fn empty() -> Self {
        Board {
            points: [0; NUM_POINTS],
            white_bar: 0,
            black_bar: 0,
            white_off: CHECKERS_PER_SIDE,
            black_off: CHECKERS_PER_SIDE,
        }
    }

    /// Creates the standard starting layout.
    pub fn initial() -> Self {
        Self::from_notation(PositionParser::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a board from `(point index, count)` lists for each color.
    ///
    /// Checkers not placed on a point are counted as borne off.
    ///
    /// # Panics
    ///
    /// Panics if a point index is out of range, a point is listed for both
    /// colors, or a color is given more than 15 checkers.
    pub fn with_layout(white: &[(u8, u8)], black: &[(u8, u8)]) -> Self {
        let mut board = Board::empty();
        for (color, layout) in [(Color::White, white), (Color::Black, black)] {
            for &(index, count) in layout {
                let point = Point::new(index).expect("point index in 0..24");
                assert!(
                    board.owner(point).map_or(true, |c| c == color),
                    "point {} listed for both colors",
                    index
                );
                assert!(*board.off_mut(color) >= count, "{} has more than 15 checkers", color);
                *board.off_mut(color) -= count;
                board.points[index as usize] += color.sign() * count as i8;
            }
        }
        board
    }

    /// Creates a board from position notation, verifying checker conservation.
    pub fn from_notation(s: &str) -> Result<Self, BoardError> {
        let parsed = PositionParser::parse(s)?;
        let board = Board {
            points: parsed.points,
            white_bar: parsed.white_bar,
            black_bar: parsed.black_bar,
            white_off: parsed.white_off,
            black_off: parsed.black_off,
        };
        board.verify()?;
        Ok(board)
    }

    /// Converts the board to position notation.
    pub fn to_notation(&self) -> String {
        PositionParser {
            points: self.points,
            white_bar: self.white_bar,
            black_bar: self.black_bar,
            white_off: self.white_off,
            black_off: self.black_off,
        }
        .format()
    }

    /// Checks that both colors account for exactly 15 checkers.
    pub fn verify(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let count = self.checker_count(color);
            if count != CHECKERS_PER_SIDE as u32 {
                return Err(BoardError::CheckerCount { color, count });
            }
        }
        Ok(())
    }

    /// Returns the number of `color` checkers on the bar.
    #[inline]
    pub const fn bar(&self, color: Color) -> u8 {
        match color {
            Color::White => self.white_bar,
            Color::Black => self.black_bar,
        }
    }

    /// Returns the number of `color` checkers borne off.
    #[inline]
    pub const fn off(&self, color: Color) -> u8 {
        match color {
            Color::White => self.white_off,
            Color::Black => self.black_off,
        }
    }

    #[inline]
    pub(crate) fn bar_mut(&mut self, color: Color) -> &mut u8 {
        match color {
            Color::White => &mut self.white_bar,
            Color::Black => &mut self.black_bar,
        }
    }

    #[inline]
    pub(crate) fn off_mut(&mut self, color: Color) -> &mut u8 {
        match color {
            Color::White => &mut self.white_off,
            Color::Black => &mut self.black_off,
        }
    }

    /// Returns the color occupying `point`, if any.
    #[inline]
    pub fn owner(&self, point: Point) -> Option<Color> {
        match self.points[point.index() as usize] {
            0 => None,
            n if n > 0 => Some(Color::White),
            _ => Some(Color::Black),
        }
    }

    /// Returns the number of `color` checkers on `point`.
    #[inline]
    pub fn checkers_at(&self, point: Point, color: Color) -> u8 {
        // Widened so that i8::MIN from an untrusted snapshot cannot overflow.
        let count = i16::from(self.points[point.index() as usize]) * i16::from(color.sign());
        u8::try_from(count).unwrap_or(0)
    }

    /// Returns true if `point` holds two or more checkers opposing `color`.
    #[inline]
    pub fn is_blocked_for(&self, point: Point, color: Color) -> bool {
        self.checkers_at(point, color.opposite()) >= 2
    }

    /// Iterates over the points holding at least one `color` checker, in index order.
    pub fn occupied_points(&self, color: Color) -> impl Iterator<Item = Point> + '_ {
        Point::all().filter(move |&p| self.checkers_at(p, color) > 0)
    }

    /// Returns the `color` checker farthest from bearing off, ignoring the bar.
    pub fn farthest_checker(&self, color: Color) -> Option<Point> {
        self.occupied_points(color)
            .max_by_key(|p| p.distance_to_off(color))
    }

    /// Returns the total number of `color` checkers on the bar, on the board, and off.
    pub fn checker_count(&self, color: Color) -> u32 {
        let on_board: u32 = Point::all()
            .map(|p| self.checkers_at(p, color) as u32)
            .sum();
        on_board + self.bar(color) as u32 + self.off(color) as u32
    }

    /// Returns the pip count for `color`: the total distance its checkers must
    /// travel to bear off, counting 25 for each checker on the bar.
    pub fn pip_count(&self, color: Color) -> u32 {
        let on_board: u32 = Point::all()
            .map(|p| self.checkers_at(p, color) as u32 * p.distance_to_off(color) as u32)
            .sum();
        on_board + self.bar(color) as u32 * BAR_PIPS
    }

    /// Returns true if `color` has no checker on the bar and none outside its home board.
    pub fn all_home(&self, color: Color) -> bool {
        self.bar(color) == 0 && self.occupied_points(color).all(|p| p.is_home(color))
    }

    /// Returns true if `color` has borne off all 15 checkers.
    #[inline]
    pub const fn has_won(&self, color: Color) -> bool {
        self.off(color) == CHECKERS_PER_SIDE
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = |i: usize| -> String {
            match self.points[i] {
                0 => "  .".to_string(),
                n if n > 0 => format!("{:>2}w", n),
                n => format!("{:>2}b", -n),
            }
        };

        let top: Vec<String> = (12..NUM_POINTS).map(|i| format!("{:>3}", i + 1)).collect();
        let top_cells: Vec<String> = (12..NUM_POINTS).map(cell).collect();
        let bottom_cells: Vec<String> = (0..12).rev().map(cell).collect();
        let bottom: Vec<String> = (0..12).rev().map(|i| format!("{:>3}", i + 1)).collect();

        writeln!(f, "{}", top.join(""))?;
        writeln!(f, "{}", top_cells.join(""))?;
        writeln!(f, "{}", bottom_cells.join(""))?;
        writeln!(f, "{}", bottom.join(""))?;
        write!(
            f,
            "bar w:{} b:{}  off w:{} b:{}",
            self.white_bar, self.black_bar, self.white_off, self.black_off
        )
    }
}
