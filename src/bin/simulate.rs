use std::io::Write;

use checkers::board::GameState;
use checkers::opponent::{play_turn, OpponentConfig, Policy};
use checkers::piece::Color;

const MAX_TURNS: u32 = 200;
const GAMES_PER_MATCHUP: usize = 200;

#[derive(Debug, Default)]
struct MatchResult {
    a_wins: u32,
    b_wins: u32,
    unfinished: u32,
}

fn play_game(black: &OpponentConfig, red: &OpponentConfig) -> Option<Color> {
    let mut state = GameState::new();
    for _ in 0..MAX_TURNS {
        let config = match state.current_player() {
            Color::Black => black,
            Color::Red => red,
        };
        let report = play_turn(&mut state, config);
        if report.winner.is_some() {
            return report.winner;
        }
    }
    None // hit turn limit
}

/// Play `num_games` games, swapping colors halfway so neither side always
/// moves first.
fn run_matchup(
    label_a: &str,
    config_a: &OpponentConfig,
    label_b: &str,
    config_b: &OpponentConfig,
    num_games: usize,
) -> MatchResult {
    let mut result = MatchResult::default();
    let half = num_games / 2;

    for game in 0..num_games {
        let (a_color, winner) = if game < half {
            (Color::Black, play_game(config_a, config_b))
        } else {
            (Color::Red, play_game(config_b, config_a))
        };
        match winner {
            Some(c) if c == a_color => result.a_wins += 1,
            Some(_) => result.b_wins += 1,
            None => result.unfinished += 1,
        }
    }

    println!("  {label_a} vs {label_b} ({num_games} games):");
    println!("    {label_a} wins: {}", result.a_wins);
    println!("    {label_b} wins: {}", result.b_wins);
    println!("    unfinished: {}", result.unfinished);
    std::io::stdout().flush().ok();
    result
}

fn main() {
    let first = OpponentConfig::with_policy(Policy::First);
    let random = OpponentConfig::with_policy(Policy::Random);

    println!("=== Checkers opponent policies ===");
    println!("Games per matchup: {GAMES_PER_MATCHUP}");
    println!("Max turns per game: {MAX_TURNS}\n");

    run_matchup("first", &first, "random", &random, GAMES_PER_MATCHUP);
    run_matchup("random", &random, "random", &random, GAMES_PER_MATCHUP);
    let mirror = run_matchup("first", &first, "first", &first, 2);
    if mirror.unfinished > 0 {
        println!("\n  first vs first is deterministic and hit the turn limit");
    }
}
