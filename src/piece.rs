use std::fmt;

use serde::{Deserialize, Serialize};

use crate::moves::Location;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Red,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Black, Color::Red];

    pub fn opposite(self) -> Color {
        match self {
            Color::Black => Color::Red,
            Color::Red => Color::Black,
        }
    }

    /// Index into per-color arrays: Black=0, Red=1.
    pub fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::Red => 1,
        }
    }

    /// The row a man of this color must reach to be crowned.
    pub fn promotion_row(self, board_size: i32) -> i32 {
        match self {
            Color::Black => board_size - 1,
            Color::Red => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.pad("black"),
            Color::Red => f.pad("red"),
        }
    }
}

/// Black men advance towards higher rows.
const BLACK_STEPS: [(i32, i32); 2] = [(1, -1), (1, 1)];
/// Red men advance towards row 0.
const RED_STEPS: [(i32, i32); 2] = [(-1, -1), (-1, 1)];
const KING_STEPS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Unit diagonal steps available to a piece of the given color and rank.
pub fn directions_for(color: Color, is_king: bool) -> &'static [(i32, i32)] {
    if is_king {
        return &KING_STEPS;
    }
    match color {
        Color::Black => &BLACK_STEPS,
        Color::Red => &RED_STEPS,
    }
}

/// A piece stored by value on the board. Its step directions are never
/// cached; they are derived from `color` and `is_king` on every query.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub is_king: bool,
    pub location: Location,
}

impl Piece {
    pub fn new(color: Color, is_king: bool, location: Location) -> Self {
        Piece {
            color,
            is_king,
            location,
        }
    }

    pub fn man(color: Color, location: Location) -> Self {
        Self::new(color, false, location)
    }

    pub fn directions(&self) -> &'static [(i32, i32)] {
        directions_for(self.color, self.is_king)
    }

    /// Move the piece to `location`, crowning it if that square lies on its
    /// promotion row. Returns true when this call made the piece a king.
    pub fn relocate(&mut self, location: Location, board_size: i32) -> bool {
        self.location = location;
        if !self.is_king && location.row == self.color.promotion_row(board_size) {
            self.is_king = true;
            return true;
        }
        false
    }

    /// Single-character code used by the text layout format.
    pub fn symbol(&self) -> char {
        match (self.color, self.is_king) {
            (Color::Black, false) => 'b',
            (Color::Black, true) => 'B',
            (Color::Red, false) => 'r',
            (Color::Red, true) => 'R',
        }
    }
}
