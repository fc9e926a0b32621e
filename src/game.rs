use crate::board::{GameState, MoveOutcome};
use crate::error::MoveError;
use crate::moves::{Location, Move};
use crate::opponent::{play_turn, OpponentConfig, TurnReport};
use crate::piece::Color;

/// Result of the human player choosing a square.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Off-board, empty or enemy square, or not the human's turn.
    Ignored,
    /// A piece was selected; these are its offered moves.
    Selected(Vec<Move>),
    /// The square matched an offered move that cannot be played.
    Rejected(MoveError),
    Moved {
        outcome: MoveOutcome,
        /// Another capture is pending for the same piece; the turn goes on.
        chain_continues: bool,
        /// The computer's reply, if the turn passed to it.
        reply: Option<TurnReport>,
    },
    GameOver(Color),
}

/// One session: a human playing `human` against the computer opponent.
///
/// This is the only owner of the `GameState`; presentation code reads it
/// through `state()` and feeds squares in through `click`.
#[derive(Clone, Debug)]
pub struct Game {
    state: GameState,
    human: Color,
    opponent: OpponentConfig,
    winner: Option<Color>,
}

impl Game {
    /// Standard opening with the human playing Black, who moves first.
    pub fn new(opponent: OpponentConfig) -> Self {
        Self::from_state(GameState::new(), Color::Black, opponent)
    }

    /// Resume from an arbitrary position. If the computer is to move, call
    /// `play_opponent` before taking clicks.
    pub fn from_state(state: GameState, human: Color, opponent: OpponentConfig) -> Self {
        let winner = state.who_wins();
        Game {
            state,
            human,
            opponent,
            winner,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn human(&self) -> Color {
        self.human
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Select a piece, or play the offered move ending on `location`.
    pub fn click(&mut self, location: Location) -> ClickOutcome {
        if let Some(winner) = self.winner {
            return ClickOutcome::GameOver(winner);
        }
        if !self.state.is_in_bounds(location) || self.state.current_player() != self.human {
            return ClickOutcome::Ignored;
        }

        let Some(mv) = self.state.get_move_by_end_location(location) else {
            return match self.state.select(location) {
                Ok(moves) => ClickOutcome::Selected(moves.to_vec()),
                Err(err @ MoveError::ChainInProgress) => ClickOutcome::Rejected(err),
                Err(_) => ClickOutcome::Ignored,
            };
        };

        let outcome = match self.state.apply_move(&mv) {
            Ok(outcome) => outcome,
            Err(err) => return ClickOutcome::Rejected(err),
        };
        if outcome.captured.is_some() && self.state.continue_capture(mv.end) {
            return ClickOutcome::Moved {
                outcome,
                chain_continues: true,
                reply: None,
            };
        }

        self.winner = self.state.who_wins();
        let reply = if self.winner.is_none() {
            self.state.next_round();
            self.play_opponent()
        } else {
            None
        };
        ClickOutcome::Moved {
            outcome,
            chain_continues: false,
            reply,
        }
    }

    /// Let the computer play its turn if it is to move and the game is live.
    pub fn play_opponent(&mut self) -> Option<TurnReport> {
        if self.winner.is_some() || self.state.current_player() == self.human {
            return None;
        }
        let report = play_turn(&mut self.state, &self.opponent);
        self.winner = report.winner;
        Some(report)
    }
}
