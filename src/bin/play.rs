//! Interactive tic-tac-toe against the minimax player.
//!
//! Usage:
//!   cargo run --release --bin play -- [OPTIONS]
//!
//! Options:
//!   --first              Human moves first
//!   --second             Human moves second
//!   --start <BOARD>      Start from a position, e.g. o---x--xo
//!   --hint               Show the value of every legal move before each turn
//!   --seed <N>           Seed for the coin flip deciding who starts
//!   --auto               Computer plays both sides, printing every position
//!
//! Positions follow a numeric keypad: 1 is bottom left, 9 is top right.

use std::env;

use dialoguer::Input;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tictactoe_minimax::games::tictactoe::{Board, Status, TicTacToe};
use tictactoe_minimax::{MinimaxSolver, Player, SolverConfig};

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
struct Options {
    human: Option<Player>,
    start: Option<String>,
    hint: bool,
    seed: Option<u64>,
    auto: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--first" | "-1" => options.human = Some(Player::First),
            "--second" | "-2" => options.human = Some(Player::Second),
            "--start" => {
                i += 1;
                if i < args.len() {
                    options.start = Some(args[i].clone());
                }
            }
            "--hint" => options.hint = true,
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    let seed = args[i]
                        .parse()
                        .map_err(|_| format!("Invalid seed: {}", args[i]))?;
                    options.seed = Some(seed);
                }
            }
            "--auto" | "-a" => options.auto = true,
            "--help" | "-h" => {
                options.help = true;
                return Ok(options);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(options)
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            print_help();
            return;
        }
    };
    if options.help {
        print_help();
        return;
    }

    let root: Board = match &options.start {
        Some(s) => match s.parse() {
            Ok(board) => board,
            Err(e) => {
                eprintln!("Error parsing start position: {}", e);
                return;
            }
        },
        None => Board::new(),
    };

    let solver = match MinimaxSolver::from_root(TicTacToe::new(), root, SolverConfig::default()) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Error solving: {}", e);
            return;
        }
    };

    if options.auto {
        auto_play(&solver, &root);
        return;
    }

    let human = options.human.unwrap_or_else(|| {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        if rng.gen_bool(0.5) {
            Player::First
        } else {
            Player::Second
        }
    });

    println!("=== Tic-Tac-Toe ===");
    println!(
        "You play '{}' as the {}.",
        if human == Player::First { 'o' } else { 'x' },
        human
    );
    println!("Positions:");
    println!("{}", Board::render_positions());
    println!();
    println!("{}", root.render());
    println!();

    let mut state = root;
    while !solver.is_terminal(&state) {
        let mover = state.mover();

        state = if mover == human {
            if options.hint {
                print_hints(&solver, &state);
            }
            match prompt_move(&solver, &state) {
                Some(next) => next,
                None => return,
            }
        } else {
            match solver.best_move(&state, mover) {
                Ok(next) => {
                    if let Some(cell) = state.changed_cell(&next) {
                        println!("Computer plays {}", cell + 1);
                    }
                    next
                }
                Err(e) => {
                    eprintln!("Error choosing move: {}", e);
                    return;
                }
            }
        };

        println!("{}", state.render());
        println!();
    }

    match state.status() {
        Status::Won(winner) if winner == human => println!("You win!"),
        Status::Won(_) => println!("Computer wins."),
        _ => println!("Draw."),
    }
}

/// Computer against computer from `root`, printing each position.
fn auto_play(solver: &MinimaxSolver<TicTacToe>, root: &Board) {
    let line = match solver.play_out(root) {
        Ok(line) => line,
        Err(e) => {
            eprintln!("Error choosing move: {}", e);
            return;
        }
    };

    println!("=== Tic-Tac-Toe: computer vs computer ===");
    println!("{}", root.render());
    println!();
    for pair in line.windows(2) {
        if let Some(cell) = pair[0].changed_cell(&pair[1]) {
            println!("The {} plays {}", pair[0].mover(), cell + 1);
        }
        println!("{}", pair[1].render());
        println!();
    }

    match line.last().map(Board::status) {
        Some(Status::Won(winner)) => println!("The {} wins.", winner),
        _ => println!("Draw."),
    }
}

/// Ask for a 1-indexed position until it names a legal move.
fn prompt_move(solver: &MinimaxSolver<TicTacToe>, state: &Board) -> Option<Board> {
    let input = Input::<String>::new()
        .with_prompt("Your move (1-9)")
        .validate_with(|input: &String| -> Result<(), String> {
            parse_move(solver, state, input).map(|_| ())
        })
        .interact_text();

    match input {
        Ok(input) => parse_move(solver, state, &input).ok(),
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            None
        }
    }
}

/// Resolve a position to the successor it produces.
fn parse_move(
    solver: &MinimaxSolver<TicTacToe>,
    state: &Board,
    input: &str,
) -> Result<Board, String> {
    let position: usize = input
        .trim()
        .parse()
        .map_err(|_| "Enter a number from 1 to 9".to_string())?;
    if !(1..=9).contains(&position) {
        return Err("Position must be between 1 and 9".to_string());
    }

    let next = state
        .place(position - 1, state.mover())
        .ok_or_else(|| "That cell is taken".to_string())?;

    let legal = solver.legal_successors(state).map_err(|e| e.to_string())?;
    if legal.contains(&next) {
        Ok(next)
    } else {
        Err("Illegal move".to_string())
    }
}

fn print_hints(solver: &MinimaxSolver<TicTacToe>, state: &Board) {
    let ranked = match solver.player().rank_moves(state) {
        Ok(ranked) => ranked,
        Err(e) => {
            eprintln!("Error ranking moves: {}", e);
            return;
        }
    };

    println!("Move values (positive favours 'o'):");
    for (next, value) in ranked {
        if let Some(cell) = state.changed_cell(&next) {
            println!("  {}: {:>3}", cell + 1, value);
        }
    }
}

fn print_help() {
    println!("Tic-Tac-Toe vs Minimax");
    println!();
    println!("Usage: play [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -1, --first              You move first (plays 'o')");
    println!("  -2, --second             You move second (plays 'x')");
    println!("      --start <BOARD>      Start from a position as 9 cells of '-', 'o', 'x'");
    println!("      --hint               Show move values before each of your turns");
    println!("  -s, --seed <N>           Seed for the coin flip when no side is given");
    println!("  -a, --auto               Computer plays both sides from the start position");
    println!("  -h, --help               Show this help");
    println!();
    println!("Positions follow a numeric keypad:");
    println!("{}", Board::render_positions());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("play")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args_defaults() {
        assert_eq!(parse_args(&args(&[])), Ok(Options::default()));
    }

    #[test]
    fn test_parse_args_auto_from_start() {
        let options = parse_args(&args(&["--auto", "--start", "o---x--xo"])).unwrap();
        assert!(options.auto);
        assert_eq!(options.start.as_deref(), Some("o---x--xo"));
        assert!(options.human.is_none());
    }

    #[test]
    fn test_parse_args_seed() {
        let options = parse_args(&args(&["-2", "--seed", "7", "--hint"])).unwrap();
        assert_eq!(options.seed, Some(7));
        assert_eq!(options.human, Some(Player::Second));
        assert!(options.hint);

        assert_eq!(
            parse_args(&args(&["--seed", "seven"])),
            Err("Invalid seed: seven".to_string())
        );
        assert!(parse_args(&args(&["--seed", "-1"])).is_err());
    }

    #[test]
    fn test_parse_args_unknown() {
        assert_eq!(
            parse_args(&args(&["--fast"])),
            Err("Unknown argument: --fast".to_string())
        );
        assert!(parse_args(&args(&["--help", "--fast"])).unwrap().help);
    }

    #[test]
    fn test_parse_move() {
        let root: Board = "o---x--xo".parse().unwrap();
        let solver =
            MinimaxSolver::from_root(TicTacToe::new(), root, SolverConfig::default()).unwrap();

        let next = parse_move(&solver, &root, " 2 ").unwrap();
        assert_eq!(next.to_string(), "oo--x--xo");
        assert!(parse_move(&solver, &root, "1").is_err());
        assert!(parse_move(&solver, &root, "0").is_err());
        assert!(parse_move(&solver, &root, "10").is_err());
        assert!(parse_move(&solver, &root, "x").is_err());
    }
}
