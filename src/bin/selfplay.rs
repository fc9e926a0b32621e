use std::error::Error;

use checkers::board::{GameState, Layout};
use checkers::opponent::{play_turn, OpponentConfig};
use checkers::piece::Color;

const MAX_TURNS: u32 = 200;

/// Usage: selfplay [layout.json] [opponent.json]
///
/// The layout is a JSON array of 8 rows of labels ("black", "red",
/// "black_king", "red_king" or ""). The opponent file configures both sides.
fn load_args() -> Result<(GameState, OpponentConfig), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let layout = match args.next() {
        Some(path) => Layout::from_json(&std::fs::read_to_string(path)?)?,
        None => Layout::standard(),
    };
    let config = match args.next() {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => OpponentConfig::new(),
    };
    Ok((GameState::from_layout(&layout, Color::Black), config))
}

fn main() {
    let (mut state, config) = match load_args() {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("selfplay: {err}");
            std::process::exit(1);
        }
    };

    let mut turns = 0;
    let mut winner = state.who_wins();
    while winner.is_none() && turns < MAX_TURNS {
        let player = state.current_player();
        let report = play_turn(&mut state, &config);
        let line: Vec<String> = report
            .moves
            .iter()
            .map(|o| o.mv.to_notation())
            .collect();
        println!("{:>3}. {player:<5} {}", turns + 1, line.join(" "));
        winner = report.winner;
        turns += 1;
    }

    print!("\n{state}");
    let result = winner.map_or("ongoing".to_string(), |c| format!("{c} wins"));
    eprintln!("Game over after {turns} turns: {result}");
}
