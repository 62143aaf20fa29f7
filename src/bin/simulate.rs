//! Headless balance simulator CLI.
//!
//! Runs seeded sessions through the engine and prints a report.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # Default: 100 runs of one hour
//!   cargo run --bin simulate -- -n 10 -t 7200     # 10 runs of two hours
//!   cargo run --bin simulate -- --seed 42 --json  # Reproducible, JSON output

use ascent::simulator::{run_simulation, SimConfig};
use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    let (config, json) = parse_args(&args);

    if !json && config.verbosity >= 1 {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║                  ASCENT BALANCE SIMULATOR                     ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Seconds/Run:    {}", config.sim_seconds);
        println!("  Auto-Equip:     {}", config.auto_equip);
        println!("  Spend Points:   {}", config.spend_points);
        if config.auto_prestige {
            println!(
                "  Prestige:       at floor {}",
                config.effective_prestige_floor()
            );
        }
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = run_simulation(&config);

    if json {
        match report.to_json() {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("{}", report.to_text());
    }
}

fn parse_args(args: &[String]) -> (SimConfig, bool) {
    let mut config = SimConfig::default();
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-t" | "--seconds" => {
                if i + 1 < args.len() {
                    config.sim_seconds = args[i + 1].parse().unwrap_or(3_600);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--prestige" => {
                config.auto_prestige = true;
                if i + 1 < args.len() {
                    if let Ok(floor) = args[i + 1].parse::<u32>() {
                        config.prestige_floor = floor;
                        i += 1;
                    }
                }
            }
            "--idle" => {
                config.auto_equip = false;
                config.spend_points = false;
            }
            "--json" => {
                json = true;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            "--quick" => {
                config = SimConfig::quick_test();
            }
            "--full" => {
                config = SimConfig::prestige_test();
            }
            _ => {}
        }
        i += 1;
    }

    (config, json)
}

fn print_help() {
    println!("Ascent Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of simulated sessions (default: 100)");
    println!("    -t, --seconds <T>   Simulated seconds per session (default: 3600)");
    println!("    -s, --seed <S>      Base seed; run i uses S + i");
    println!("    --prestige [F]      Auto-prestige at floor F (default: 50)");
    println!("    --idle              Never equip drops or spend points");
    println!("    --json              Print the report as JSON");
    println!("    -v, --verbose       Print a line per run");
    println!("    -q, --quiet         Skip the configuration banner");
    println!("    --quick             Quick test (20 runs of 10 minutes)");
    println!("    --full              Prestige test (20 runs of 8 hours)");
    println!("    -h, --help          Show this help");
}
