//! State graph export binary.
//!
//! Usage:
//!   cargo run --release --bin export_graph -- [OPTIONS]
//!
//! Options:
//!   --root <BOARD>       Root position, e.g. o---x--xo (default: empty board)
//!   --config <FILE>      Solver configuration JSON file (optional)
//!   --output <FILE>      Graph output file (default: state_graph.json)
//!   --values <FILE>      Also write the value mapping to this file
//!   --parallel           Evaluate values with rayon

use std::env;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use tictactoe_minimax::games::tictactoe::{Board, TicTacToe};
use tictactoe_minimax::{MinimaxSolver, SolverConfig};

/// Parsed command line.
#[derive(Debug, PartialEq)]
struct Options {
    root: Option<String>,
    config_file: Option<String>,
    output_file: String,
    values_file: Option<String>,
    parallel: bool,
    help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            root: None,
            config_file: None,
            output_file: "state_graph.json".to_string(),
            values_file: None,
            parallel: false,
            help: false,
        }
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--root" | "-r" => {
                i += 1;
                if i < args.len() {
                    options.root = Some(args[i].clone());
                }
            }
            "--config" | "-c" => {
                i += 1;
                if i < args.len() {
                    options.config_file = Some(args[i].clone());
                }
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    options.output_file = args[i].clone();
                }
            }
            "--values" | "-v" => {
                i += 1;
                match args.get(i) {
                    Some(path) if !path.starts_with('-') => {
                        options.values_file = Some(path.clone())
                    }
                    _ => return Err("--values needs an output file".to_string()),
                }
            }
            "--parallel" | "-p" => {
                options.parallel = true;
            }
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
    let Options {
        root,
        config_file,
        output_file,
        values_file,
        parallel,
        help,
    } = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            print_help();
            return;
        }
    };
    if help {
        print_help();
        return;
    }

    let root: Board = match root {
        Some(s) => match s.parse() {
            Ok(board) => board,
            Err(e) => {
                eprintln!("Error parsing root: {}", e);
                return;
            }
        },
        None => Board::new(),
    };

    let mut config = match &config_file {
        Some(path) => match SolverConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                return;
            }
        },
        None => SolverConfig::default(),
    };
    if parallel {
        config = config.with_parallel(true);
    }

    println!("Root: {}", root);
    println!("Win score: {} (depth adjusted: {})", config.win_score, config.depth_adjusted);
    println!("Evaluation: {}", if config.parallel { "parallel" } else { "sequential" });
    println!();

    let steps = if values_file.is_some() { 3 } else { 2 };
    let progress = ProgressBar::new(steps);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:30} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let start = Instant::now();
    progress.set_message("solving");
    let solver = match MinimaxSolver::from_root(TicTacToe::new(), root, config) {
        Ok(solver) => solver,
        Err(e) => {
            progress.abandon();
            eprintln!("Error solving: {}", e);
            return;
        }
    };
    progress.inc(1);

    progress.set_message(format!("writing {}", output_file));
    if let Err(e) = solver.export_graph().save_json(&output_file) {
        progress.abandon();
        eprintln!("Error saving graph: {}", e);
        return;
    }
    progress.inc(1);

    if let Some(path) = &values_file {
        progress.set_message(format!("writing {}", path));
        if let Err(e) = solver.export_values().save_json(path) {
            progress.abandon();
            eprintln!("Error saving values: {}", e);
            return;
        }
        progress.inc(1);
    }
    progress.finish_with_message("done");

    let stats = solver.stats();
    println!();
    println!("States:          {}", stats.states);
    println!("Terminal states: {}", stats.terminal_states);
    println!("  first wins:    {}", stats.wins_first);
    println!("  second wins:   {}", stats.wins_second);
    println!("  draws:         {}", stats.draws);
    println!("Root value:      {}", stats.root_value);
    println!(
        "Time:            {:.3}s (graph {:.3}s, values {:.3}s)",
        start.elapsed().as_secs_f64(),
        stats.graph_seconds,
        stats.values_seconds
    );
    println!("Saved graph: {}", output_file);
    if let Some(path) = &values_file {
        println!("Saved values: {}", path);
    }
}

fn print_help() {
    println!("Tic-Tac-Toe State Graph Export");
    println!();
    println!("Usage: export_graph [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -r, --root <BOARD>       Root position as 9 cells of '-', 'o', 'x'");
    println!("                           (default: empty board)");
    println!("  -c, --config <FILE>      Solver configuration JSON file");
    println!("  -o, --output <FILE>      Graph output file (default: state_graph.json)");
    println!("  -v, --values <FILE>      Also write state values to this file");
    println!("  -p, --parallel           Evaluate values in parallel");
    println!("  -h, --help               Show this help");
    println!();
    println!("Examples:");
    println!("  # Full graph from the empty board");
    println!("  export_graph");
    println!();
    println!("  # Graph and values from a midgame position");
    println!("  export_graph --root o---x--xo --values values.json");
}
