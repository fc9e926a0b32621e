use crate::board::{GameState, MoveOutcome, BOARD_SIZE};
use crate::game::{ClickOutcome, Game};
use crate::moves::{Location, Move};
use crate::opponent::{OpponentConfig, Policy, TurnReport};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct SquarePiece {
    color: String,
    is_king: bool,
}

#[derive(Serialize)]
struct MoveJson {
    from: [i32; 2],
    to: [i32; 2],
    captured: Option<[i32; 2]>,
}

#[derive(Serialize)]
struct OutcomeJson {
    #[serde(rename = "move")]
    mv: MoveJson,
    promoted: bool,
    is_king: bool,
}

#[derive(Serialize)]
struct BoardState {
    squares: Vec<Vec<Option<SquarePiece>>>,
    current_player: String,
    winner: Option<String>,
    possible_moves: Vec<MoveJson>,
}

#[derive(Serialize)]
struct ClickResult {
    /// One of "ignored", "selected", "rejected", "moved", "game_over".
    kind: &'static str,
    error: Option<String>,
    chain_continues: bool,
    /// The human's move followed by any computer moves, for animation.
    played: Vec<OutcomeJson>,
    #[serde(flatten)]
    board_state: BoardState,
}

fn pair(loc: Location) -> [i32; 2] {
    [loc.row, loc.col]
}

fn move_json(m: &Move) -> MoveJson {
    MoveJson {
        from: pair(m.start),
        to: pair(m.end),
        captured: m.captured_location.map(pair),
    }
}

fn outcome_json(o: &MoveOutcome) -> OutcomeJson {
    OutcomeJson {
        mv: move_json(&o.mv),
        promoted: o.promoted,
        is_king: o.is_king,
    }
}

fn build_board_state(game: &Game) -> BoardState {
    let state: &GameState = game.state();
    let squares = (0..BOARD_SIZE as i32)
        .map(|r| {
            (0..BOARD_SIZE as i32)
                .map(|c| {
                    state.square_at(Location::new(r, c)).map(|p| SquarePiece {
                        color: p.color.to_string(),
                        is_king: p.is_king,
                    })
                })
                .collect()
        })
        .collect();

    BoardState {
        squares,
        current_player: state.current_player().to_string(),
        winner: game.winner().map(|c| c.to_string()),
        possible_moves: state
            .possible_moves()
            .iter()
            .map(move_json)
            .collect(),
    }
}

fn reply_moves(reply: &Option<TurnReport>) -> impl Iterator<Item = OutcomeJson> + '_ {
    reply.iter().flat_map(|r| r.moves.iter().map(outcome_json))
}

#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
    config: OpponentConfig,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        let config = OpponentConfig::new();
        WasmGame {
            game: Game::new(config.clone()),
            config,
        }
    }

    /// "first" or "random"; unknown names are ignored. Takes effect on reset.
    pub fn set_policy(&mut self, name: &str) {
        match name {
            "first" => self.config.policy = Policy::First,
            "random" => self.config.policy = Policy::Random,
            _ => {}
        }
    }

    pub fn reset(&mut self) {
        self.game = Game::new(self.config.clone());
    }

    pub fn get_board_state(&self) -> JsValue {
        let state = build_board_state(&self.game);
        serde_wasm_bindgen::to_value(&state).unwrap_or(JsValue::NULL)
    }

    pub fn click(&mut self, row: i32, col: i32) -> JsValue {
        let outcome = self.game.click(Location::new(row, col));
        let (kind, error, chain_continues, played) = match &outcome {
            ClickOutcome::Ignored => ("ignored", None, false, Vec::new()),
            ClickOutcome::Selected(_) => ("selected", None, false, Vec::new()),
            ClickOutcome::Rejected(err) => {
                ("rejected", Some(err.to_string()), false, Vec::new())
            }
            ClickOutcome::Moved {
                outcome,
                chain_continues,
                reply,
            } => {
                let played = std::iter::once(outcome_json(outcome))
                    .chain(reply_moves(reply))
                    .collect();
                ("moved", None, *chain_continues, played)
            }
            ClickOutcome::GameOver(_) => ("game_over", None, false, Vec::new()),
        };
        let result = ClickResult {
            kind,
            error,
            chain_continues,
            played,
            board_state: build_board_state(&self.game),
        };
        serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
    }

    pub fn build_timestamp() -> String {
        env!("BUILD_TIMESTAMP").to_string()
    }
}
