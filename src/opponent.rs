// =============================================================================
// Computer opponent
//
// No search: the opponent picks a piece that can move, plays one of its
// offered moves, and keeps jumping with the same piece while further captures
// are available. Within the selected piece's moves a capture is always taken
// when one exists. The turn then ends with the win check and, if the game goes
// on, `next_round`.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::board::{GameState, MoveOutcome};
use crate::moves::{Location, Move};
use crate::piece::Color;

/// Platform-appropriate random number in [0, 1).
/// Uses js_sys::Math::random() in WASM builds, rand crate natively.
fn random_f64() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Math::random()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use rand::Rng;
        rand::thread_rng().gen::<f64>()
    }
}

fn random_index(len: usize) -> usize {
    ((random_f64() * len as f64) as usize).min(len.saturating_sub(1))
}

// =============================================================================
// Configuration
// =============================================================================

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// First movable piece in row-major order, first offered move.
    First,
    /// Uniformly random movable piece, random valid move.
    Random,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct OpponentConfig {
    pub policy: Policy,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl OpponentConfig {
    pub fn new() -> Self {
        Self::with_policy(Policy::First)
    }

    pub fn with_policy(policy: Policy) -> Self {
        OpponentConfig { policy }
    }
}

// =============================================================================
// Turn
// =============================================================================

/// What happened during one opponent turn.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct TurnReport {
    /// Every move played, in order; more than one only for a capture chain.
    pub moves: Vec<MoveOutcome>,
    pub winner: Option<Color>,
}

/// Locations of the current player's pieces that have at least one move.
fn movable_pieces(state: &GameState) -> Vec<Location> {
    let color = state.current_player();
    state
        .piece_locations(color)
        .iter()
        .copied()
        .filter(|&loc| !state.find_possible_moves(loc).is_empty())
        .collect()
}

/// Choose among the currently offered moves.
fn choose(state: &GameState, policy: Policy) -> Option<Move> {
    let valid: Vec<Move> = state
        .possible_moves()
        .iter()
        .copied()
        .filter(|m| state.is_valid_move(m))
        .collect();
    match policy {
        Policy::First => valid.first().copied(),
        Policy::Random if valid.is_empty() => None,
        Policy::Random => Some(valid[random_index(valid.len())]),
    }
}

/// Play a full turn for `state.current_player()`.
///
/// A player with nothing to move loses on the spot and the round is not
/// advanced. Otherwise the turn ends either with a winner or with
/// `next_round` handing play to the other color.
pub fn play_turn(state: &mut GameState, config: &OpponentConfig) -> TurnReport {
    let mut report = TurnReport::default();
    let player = state.current_player();

    let pieces = movable_pieces(state);
    let start = match config.policy {
        Policy::First => pieces.first().copied(),
        Policy::Random if pieces.is_empty() => None,
        Policy::Random => Some(pieces[random_index(pieces.len())]),
    };
    let Some(start) = start else {
        report.winner = Some(state.enemy_color(player));
        return report;
    };
    if state.select(start).is_err() {
        report.winner = Some(state.enemy_color(player));
        return report;
    }

    let mut next = choose(state, config.policy);
    while let Some(mv) = next.take() {
        let Ok(outcome) = state.apply_move(&mv) else {
            break;
        };
        report.moves.push(outcome);
        if outcome.captured.is_some() && state.continue_capture(mv.end) {
            next = choose(state, config.policy);
        }
    }

    report.winner = state.who_wins();
    if report.winner.is_none() {
        state.next_round();
    }
    report
}
