//! Position notation parsing and serialization.
//!
//! A position is written as three space-separated fields:
//!
//! ```text
//! <24 comma-separated signed counts> <white bar>/<black bar> <white off>/<black off>
//! ```
//!
//! Counts are listed from point 0 to point 23. Positive counts are White
//! checkers, negative counts are Black checkers.

use crate::{CHECKERS_PER_SIDE, NUM_POINTS};
use thiserror::Error;

/// Errors that can occur when parsing position notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("invalid position: expected 3 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid point list: expected 24 counts, got {0}")]
    InvalidPointCount(usize),

    #[error("invalid point count: {0}")]
    InvalidPoint(String),

    #[error("invalid bar counts: {0}")]
    InvalidBar(String),

    #[error("invalid borne-off counts: {0}")]
    InvalidOff(String),
}

/// Parsed position data.
///
/// This struct holds the raw parsed fields. The engine is responsible for
/// converting it into a board and checking checker conservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionParser {
    /// Signed checker counts for points 0 to 23.
    pub points: [i8; NUM_POINTS],
    pub white_bar: u8,
    pub black_bar: u8,
    pub white_off: u8,
    pub black_off: u8,
}

impl PositionParser {
    /// The standard starting position.
    pub const STARTPOS: &'static str =
        "-2,0,0,0,0,5,0,3,0,0,0,-5,5,0,0,0,-3,0,-5,0,0,0,0,2 0/0 0/0";

    /// Parses a position string.
    pub fn parse(s: &str) -> Result<Self, PositionError> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(PositionError::InvalidPartCount(parts.len()));
        }

        let points = Self::parse_points(parts[0])?;
        let (white_bar, black_bar) =
            Self::parse_pair(parts[1]).ok_or_else(|| PositionError::InvalidBar(parts[1].to_string()))?;
        let (white_off, black_off) =
            Self::parse_pair(parts[2]).ok_or_else(|| PositionError::InvalidOff(parts[2].to_string()))?;

        Ok(PositionParser {
            points,
            white_bar,
            black_bar,
            white_off,
            black_off,
        })
    }

    fn parse_points(s: &str) -> Result<[i8; NUM_POINTS], PositionError> {
        let fields: Vec<&str> = s.split(',').collect();
        if fields.len() != NUM_POINTS {
            return Err(PositionError::InvalidPointCount(fields.len()));
        }

        let mut points = [0i8; NUM_POINTS];
        for (slot, field) in points.iter_mut().zip(fields) {
            let count: i8 = field
                .trim()
                .parse()
                .map_err(|_| PositionError::InvalidPoint(field.to_string()))?;
            if count.unsigned_abs() > CHECKERS_PER_SIDE {
                return Err(PositionError::InvalidPoint(field.to_string()));
            }
            *slot = count;
        }
        Ok(points)
    }

    fn parse_pair(s: &str) -> Option<(u8, u8)> {
        let (white, black) = s.split_once('/')?;
        let white: u8 = white.parse().ok()?;
        let black: u8 = black.parse().ok()?;
        (white <= CHECKERS_PER_SIDE && black <= CHECKERS_PER_SIDE).then_some((white, black))
    }

    /// Formats the parsed fields back into notation.
    pub fn format(&self) -> String {
        let points: Vec<String> = self.points.iter().map(|c| c.to_string()).collect();
        format!(
            "{} {}/{} {}/{}",
            points.join(","),
            self.white_bar,
            self.black_bar,
            self.white_off,
            self.black_off
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let parsed = PositionParser::parse(PositionParser::STARTPOS).unwrap();
        assert_eq!(parsed.points[0], -2);
        assert_eq!(parsed.points[5], 5);
        assert_eq!(parsed.points[7], 3);
        assert_eq!(parsed.points[11], -5);
        assert_eq!(parsed.points[12], 5);
        assert_eq!(parsed.points[16], -3);
        assert_eq!(parsed.points[18], -5);
        assert_eq!(parsed.points[23], 2);
        assert_eq!(parsed.white_bar, 0);
        assert_eq!(parsed.black_off, 0);
    }

    #[test]
    fn format_round_trip() {
        let parsed = PositionParser::parse(PositionParser::STARTPOS).unwrap();
        assert_eq!(parsed.format(), PositionParser::STARTPOS);
    }

    #[test]
    fn invalid_part_count() {
        assert_eq!(
            PositionParser::parse("0,0 0/0"),
            Err(PositionError::InvalidPartCount(2))
        );
    }

    #[test]
    fn invalid_point_list() {
        assert_eq!(
            PositionParser::parse("1,2,3 0/0 0/0"),
            Err(PositionError::InvalidPointCount(3))
        );
        let bad = PositionParser::STARTPOS.replacen("-2", "x", 1);
        assert!(matches!(
            PositionParser::parse(&bad),
            Err(PositionError::InvalidPoint(_))
        ));
        let too_many = PositionParser::STARTPOS.replacen("-2", "-16", 1);
        assert!(matches!(
            PositionParser::parse(&too_many),
            Err(PositionError::InvalidPoint(_))
        ));
    }

    #[test]
    fn invalid_bar_and_off() {
        let points = PositionParser::STARTPOS.split_whitespace().next().unwrap();
        assert!(matches!(
            PositionParser::parse(&format!("{} 0-0 0/0", points)),
            Err(PositionError::InvalidBar(_))
        ));
        assert!(matches!(
            PositionParser::parse(&format!("{} 0/0 16/0", points)),
            Err(PositionError::InvalidOff(_))
        ));
    }
}
