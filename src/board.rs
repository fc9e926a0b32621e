use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, MoveError};
use crate::moves::{Location, Move};
use crate::piece::{Color, Piece};

pub const BOARD_SIZE: usize = 8;
const SIZE: i32 = BOARD_SIZE as i32;

/// Where the active player is within a turn.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No move executed yet this turn; a piece may be selected.
    Initial,
    /// A move has been executed; only capture continuations remain.
    Moving,
}

/// Everything the presentation layer needs to redraw after a move.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    /// The piece was crowned by this move.
    pub promoted: bool,
    pub is_king: bool,
    pub captured: Option<Location>,
}

// =============================================================================
// Layout
// =============================================================================

/// An initial arrangement of pieces, row 0 first. Each cell is empty or holds
/// a (color, is_king) pair.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Layout {
    cells: [[Option<(Color, bool)>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Layout {
    fn default() -> Self {
        Self::standard()
    }
}

impl Layout {
    pub fn empty() -> Self {
        Layout {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Twelve men per side on the dark squares: Black on rows 0-2, Red on
    /// rows 5-7.
    pub fn standard() -> Self {
        let mut layout = Self::empty();
        for row in 0..BOARD_SIZE {
            let color = match row {
                0..=2 => Color::Black,
                5..=7 => Color::Red,
                _ => continue,
            };
            for col in 0..BOARD_SIZE {
                if (row + col) % 2 == 1 {
                    layout.cells[row][col] = Some((color, false));
                }
            }
        }
        layout
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Option<(Color, bool)>) {
        self.cells[row][col] = cell;
    }

    pub fn get(&self, row: usize, col: usize) -> Option<(Color, bool)> {
        self.cells[row][col]
    }

    /// Build a layout from a grid of labels: `"black"`, `"red"`,
    /// `"black_king"`, `"red_king"`, or `""` for an empty square.
    pub fn from_labels<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Self, LayoutError> {
        if rows.len() != BOARD_SIZE {
            return Err(LayoutError::RowCount {
                expected: BOARD_SIZE,
                found: rows.len(),
            });
        }
        let mut layout = Self::empty();
        for (r, row) in rows.iter().enumerate() {
            if row.len() != BOARD_SIZE {
                return Err(LayoutError::ColumnCount {
                    row: r,
                    expected: BOARD_SIZE,
                    found: row.len(),
                });
            }
            for (c, label) in row.iter().enumerate() {
                let label = label.as_ref().trim();
                let Some(cell) = cell_for_label(label) else {
                    return Err(LayoutError::UnknownCell {
                        row: r,
                        col: c,
                        label: label.to_string(),
                    });
                };
                layout.cells[r][c] = cell;
            }
        }
        Ok(layout)
    }

    /// Parse a JSON array of label rows (see `from_labels`).
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let rows: Vec<Vec<String>> = serde_json::from_str(json)?;
        Self::from_labels(&rows)
    }

    /// Parse the compact text form written by `GameState`'s `Display`:
    /// one line per row, `.` empty, `b`/`r` men, `B`/`R` kings. Blank lines
    /// and spaces are ignored.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<Vec<String>> = text
            .lines()
            .map(|line| {
                line.chars()
                    .filter(|ch| !ch.is_whitespace())
                    .map(symbol_label)
                    .collect::<Vec<String>>()
            })
            .filter(|row| !row.is_empty())
            .collect();
        Self::from_labels(&rows)
    }
}

/// `None` for an unknown label, `Some(None)` for an empty square.
fn cell_for_label(label: &str) -> Option<Option<(Color, bool)>> {
    let cell = match label {
        "" | "empty" => None,
        "black" => Some((Color::Black, false)),
        "red" => Some((Color::Red, false)),
        "black_king" => Some((Color::Black, true)),
        "red_king" => Some((Color::Red, true)),
        _ => return None,
    };
    Some(cell)
}

/// Text layout symbol to label; unknown symbols pass through unchanged so
/// `from_labels` can report them.
fn symbol_label(ch: char) -> String {
    let label = match ch {
        '.' => "",
        'b' => "black",
        'r' => "red",
        'B' => "black_king",
        'R' => "red_king",
        other => return other.to_string(),
    };
    label.to_string()
}

// =============================================================================
// GameState
// =============================================================================

/// The rules engine: board, side to move, per-color location index and the
/// moves currently offered to the active player.
///
/// Both `squares` and `piece_locations` are private and only change through
/// `place`, `apply_move` and the constructors, which keep them in sync: a
/// location is in `piece_locations[c]` exactly when `squares` holds a piece
/// of color `c` there, and that piece's `location` field equals its square.
#[derive(Clone, Serialize, Debug)]
pub struct GameState {
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
    current_player: Color,
    phase: Phase,
    piece_locations: [BTreeSet<Location>; 2],
    possible_moves: Vec<Move>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard opening position, Black to move.
    pub fn new() -> Self {
        Self::from_layout(&Layout::standard(), Color::Black)
    }

    /// An empty board with Black to move. Useful for setting up test positions.
    pub fn empty() -> Self {
        Self::from_layout(&Layout::empty(), Color::Black)
    }

    /// Populate the board from `layout` and derive the location index with a
    /// single full scan. After this the index is only updated incrementally.
    pub fn from_layout(layout: &Layout, first_player: Color) -> Self {
        let mut squares = [[None; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in squares.iter_mut().enumerate() {
            for (c, square) in row.iter_mut().enumerate() {
                let location = Location::new(r as i32, c as i32);
                *square = layout
                    .get(r, c)
                    .map(|(color, is_king)| Piece::new(color, is_king, location));
            }
        }

        let mut state = GameState {
            squares,
            current_player: first_player,
            phase: Phase::Initial,
            piece_locations: [BTreeSet::new(), BTreeSet::new()],
            possible_moves: Vec::new(),
        };
        state.load_piece_locations();
        state
    }

    fn load_piece_locations(&mut self) {
        let mut locations = [BTreeSet::new(), BTreeSet::new()];
        for piece in self.squares.iter().flatten().flatten() {
            locations[piece.color.index()].insert(piece.location);
        }
        self.piece_locations = locations;
    }

    /// Put a piece on `location`, replacing whatever was there.
    ///
    /// Panics if `location` is off the board.
    pub fn place(&mut self, location: Location, color: Color, is_king: bool) {
        if let Some(old) = self.square_at(location) {
            self.piece_locations[old.color.index()].remove(&location);
        }
        *self.square_mut(location) = Some(Piece::new(color, is_king, location));
        self.piece_locations[color.index()].insert(location);
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn possible_moves(&self) -> &[Move] {
        &self.possible_moves
    }

    pub fn piece_locations(&self, color: Color) -> &BTreeSet<Location> {
        &self.piece_locations[color.index()]
    }

    pub fn is_in_bounds(&self, location: Location) -> bool {
        (0..SIZE).contains(&location.row) && (0..SIZE).contains(&location.col)
    }

    /// The piece on `location`, if any.
    ///
    /// Panics if `location` is off the board; check `is_in_bounds` first.
    pub fn square_at(&self, location: Location) -> Option<Piece> {
        assert!(
            self.is_in_bounds(location),
            "square_at: {location} is off the board"
        );
        self.squares[location.row as usize][location.col as usize]
    }

    fn square_mut(&mut self, location: Location) -> &mut Option<Piece> {
        assert!(
            self.is_in_bounds(location),
            "square_mut: {location} is off the board"
        );
        &mut self.squares[location.row as usize][location.col as usize]
    }

    pub fn enemy_color(&self, color: Color) -> Color {
        color.opposite()
    }

    // -------------------------------------------------------------------------
    // Move generation
    // -------------------------------------------------------------------------

    /// All moves available to the piece on `start`, captures first.
    ///
    /// An empty or off-board `start` yields no moves.
    pub fn find_possible_moves(&self, start: Location) -> Vec<Move> {
        if !self.is_in_bounds(start) {
            return Vec::new();
        }
        let Some(piece) = self.square_at(start) else {
            return Vec::new();
        };

        let mut captures = Vec::new();
        let mut steps = Vec::new();
        for &dir in piece.directions() {
            let next = start.offset(dir);
            if !self.is_in_bounds(next) {
                continue;
            }
            match self.square_at(next) {
                None => steps.push(Move::step(start, next)),
                Some(other) if other.color != piece.color => {
                    let landing = next.offset(dir);
                    if self.is_in_bounds(landing) && self.square_at(landing).is_none() {
                        captures.push(Move::capture(start, landing, next));
                    }
                }
                Some(_) => {}
            }
        }

        captures.extend(steps);
        captures
    }

    fn has_any_move(&self, color: Color) -> bool {
        self.piece_locations(color)
            .iter()
            .any(|&loc| !self.find_possible_moves(loc).is_empty())
    }

    fn is_exhausted(&self, color: Color) -> bool {
        self.piece_locations(color).is_empty() || !self.has_any_move(color)
    }

    /// The first offered move that lands on `location`.
    pub fn get_move_by_end_location(&self, location: Location) -> Option<Move> {
        self.possible_moves
            .iter()
            .find(|m| m.end == location)
            .copied()
    }

    /// Captures are always valid; a step is valid only when no capture is
    /// among the offered moves.
    pub fn is_valid_move(&self, mv: &Move) -> bool {
        mv.is_capture || !self.has_capturing_move()
    }

    /// Relies on captures being listed first by `find_possible_moves`.
    pub fn has_capturing_move(&self) -> bool {
        self.possible_moves.first().is_some_and(|m| m.is_capture)
    }

    // -------------------------------------------------------------------------
    // Turn flow
    // -------------------------------------------------------------------------

    /// Select one of the active player's pieces and offer its moves.
    pub fn select(&mut self, location: Location) -> Result<&[Move], MoveError> {
        if !self.is_in_bounds(location) {
            return Err(MoveError::OutOfBounds(location));
        }
        if self.phase == Phase::Moving {
            return Err(MoveError::ChainInProgress);
        }
        self.check_owner(location)?;
        self.possible_moves = self.find_possible_moves(location);
        Ok(&self.possible_moves)
    }

    /// After a capture, offer the moves from the landing square. Returns true
    /// when a further capture is available, i.e. the turn must continue.
    pub fn continue_capture(&mut self, end: Location) -> bool {
        self.possible_moves = self.find_possible_moves(end);
        self.has_capturing_move()
    }

    /// The piece on `location` must belong to the active player.
    fn check_owner(&self, location: Location) -> Result<(), MoveError> {
        let Some(piece) = self.square_at(location) else {
            return Err(MoveError::EmptySquare(location));
        };
        if piece.color != self.current_player {
            return Err(MoveError::NotYourPiece(location));
        }
        Ok(())
    }

    /// Execute an offered, valid move.
    ///
    /// The move must be in `possible_moves` and pass `is_valid_move`, and
    /// once a move has been made this turn only a capture may follow.
    /// Otherwise nothing changes and the reason is returned.
    pub fn apply_move(&mut self, mv: &Move) -> Result<MoveOutcome, MoveError> {
        for loc in [mv.start, mv.end] {
            if !self.is_in_bounds(loc) {
                return Err(MoveError::OutOfBounds(loc));
            }
        }
        self.check_owner(mv.start)?;
        if !self.possible_moves.contains(mv) {
            return Err(MoveError::NotOffered(*mv));
        }
        if !self.is_valid_move(mv) {
            return Err(MoveError::CaptureRequired);
        }
        if self.phase == Phase::Moving && !mv.is_capture {
            return Err(MoveError::AlreadyMoved);
        }
        Ok(self.make_move(mv))
    }

    /// Apply a validated move, keeping board and location index in sync.
    fn make_move(&mut self, mv: &Move) -> MoveOutcome {
        let Some(mut piece) = self.square_mut(mv.start).take() else {
            unreachable!("make_move: validated move starts on an empty square");
        };
        let promoted = piece.relocate(mv.end, SIZE);
        *self.square_mut(mv.end) = Some(piece);

        let own = &mut self.piece_locations[piece.color.index()];
        own.remove(&mv.start);
        own.insert(mv.end);

        let captured = mv.captured_location.filter(|_| mv.is_capture);
        if let Some(loc) = captured {
            *self.square_mut(loc) = None;
            self.piece_locations[piece.color.opposite().index()].remove(&loc);
        }

        self.phase = Phase::Moving;
        MoveOutcome {
            mv: *mv,
            promoted,
            is_king: piece.is_king,
            captured,
        }
    }

    /// The winner, if any: a color with no pieces or no moves loses.
    ///
    /// If both colors are exhausted at once the player who just moved
    /// (`current_player`) wins, since the other side cannot reply.
    pub fn who_wins(&self) -> Option<Color> {
        match (self.is_exhausted(Color::Black), self.is_exhausted(Color::Red)) {
            (true, true) => Some(self.current_player),
            (true, false) => Some(Color::Red),
            (false, true) => Some(Color::Black),
            (false, false) => None,
        }
    }

    /// End the active player's turn and hand over to the other color.
    pub fn next_round(&mut self) {
        self.phase = Phase::Initial;
        self.possible_moves.clear();
        self.current_player = self.enemy_color(self.current_player);
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.squares {
            let line: String = row
                .iter()
                .map(|sq| sq.map_or('.', |p| p.symbol()))
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
