use std::fmt;

use serde::{Deserialize, Serialize};

/// A (row, col) square. Signed so that off-board neighbours can be
/// represented and rejected by `GameState::is_in_bounds`.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub row: i32,
    pub col: i32,
}

impl Location {
    pub const fn new(row: i32, col: i32) -> Self {
        Location { row, col }
    }

    pub fn offset(self, (dr, dc): (i32, i32)) -> Location {
        Location::new(self.row + dr, self.col + dc)
    }

    /// The square halfway between two squares on the same diagonal.
    pub fn midpoint(self, other: Location) -> Location {
        Location::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }
}

impl From<(i32, i32)> for Location {
    fn from((row, col): (i32, i32)) -> Self {
        Location::new(row, col)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug)]
pub struct Move {
    pub start: Location,
    pub end: Location,
    pub is_capture: bool,
    pub captured_location: Option<Location>,
}

/// The jumped square only takes part in the comparison when both moves are
/// captures.
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.is_capture == other.is_capture
            && (!self.is_capture || self.captured_location == other.captured_location)
    }
}

impl Eq for Move {}

impl Move {
    /// A one-square diagonal step onto an empty square.
    pub fn step(start: Location, end: Location) -> Self {
        Move {
            start,
            end,
            is_capture: false,
            captured_location: None,
        }
    }

    /// A jump from `start` over `captured` to `end`.
    pub fn capture(start: Location, end: Location, captured: Location) -> Self {
        Move {
            start,
            end,
            is_capture: true,
            captured_location: Some(captured),
        }
    }

    /// Convert to coordinate notation, e.g. "b3-a4" or "b3xd5".
    /// Column 0 is file `a`, row 0 is rank `1`.
    pub fn to_notation(&self) -> String {
        let sep = if self.is_capture { 'x' } else { '-' };
        let (from, to) = (square_name(self.start), square_name(self.end));
        format!("{from}{sep}{to}")
    }

    /// Parse coordinate notation. For captures the jumped square is the
    /// midpoint of start and end.
    pub fn from_notation(s: &str) -> Option<Move> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 5 {
            return None;
        }
        let start = parse_square(bytes[0], bytes[1])?;
        let end = parse_square(bytes[3], bytes[4])?;
        let (dr, dc) = (end.row - start.row, end.col - start.col);
        match bytes[2] {
            b'-' if dr.abs() == 1 && dc.abs() == 1 => Some(Move::step(start, end)),
            b'x' if dr.abs() == 2 && dc.abs() == 2 => {
                Some(Move::capture(start, end, start.midpoint(end)))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}

fn square_name(loc: Location) -> String {
    let file = (b'a' + loc.col as u8) as char;
    let rank = (b'1' + loc.row as u8) as char;
    format!("{file}{rank}")
}

fn parse_square(file: u8, rank: u8) -> Option<Location> {
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    Some(Location::new((rank - b'1') as i32, (file - b'a') as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(row: i32, col: i32) -> Location {
        Location::new(row, col)
    }

    #[test]
    fn equality_covers_capture_fields() {
        let a = loc(0, 1);
        let b = loc(2, 3);
        let jump = Move::capture(a, b, loc(1, 2));
        assert_eq!(jump, Move::capture(a, b, loc(1, 2)));
        assert_ne!(jump, Move::capture(a, b, loc(1, 1)));
        assert_ne!(jump, Move::step(a, b));
        assert_ne!(Move::step(a, loc(1, 0)), Move::step(a, loc(1, 2)));
    }

    #[test]
    fn steps_ignore_stray_captured_location() {
        let a = loc(2, 1);
        let b = loc(3, 0);
        let stray = Move {
            captured_location: Some(loc(5, 5)),
            ..Move::step(a, b)
        };
        assert_eq!(stray, Move::step(a, b));
    }

    #[test]
    fn notation_for_step_and_capture() {
        let step = Move::step(loc(2, 1), loc(3, 0));
        assert_eq!(step.to_notation(), "b3-a4");
        let jump = Move::capture(loc(0, 1), loc(2, 3), loc(1, 2));
        assert_eq!(jump.to_notation(), "b1xd3");
    }

    #[test]
    fn parsing_derives_captured_square() {
        let mv = Move::from_notation("b1xd3").expect("valid capture");
        assert!(mv.is_capture);
        assert_eq!(mv.captured_location, Some(loc(1, 2)));
        assert_eq!(mv.end, loc(2, 3));
    }

    #[test]
    fn parsing_rejects_malformed_moves() {
        assert!(Move::from_notation("b3-b4").is_none(), "not diagonal");
        assert!(Move::from_notation("b3xc4").is_none(), "short capture");
        assert!(Move::from_notation("b3-d5").is_none(), "long step");
        assert!(Move::from_notation("z3-a4").is_none());
        assert!(Move::from_notation("b3a4").is_none());
    }

    #[test]
    fn midpoint_and_offset() {
        let start = loc(5, 4);
        assert_eq!(start.offset((-1, 1)), loc(4, 5));
        assert_eq!(start.midpoint(loc(3, 2)), loc(4, 3));
    }
}
