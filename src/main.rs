//! Parallel Life CLI - Run a simulation from a JSON configuration.

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use parallel_life::{
    Event,
    io::PgmDirectory,
    schema::{SimulationConfig, event_channel},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [turns]", args[0]);
        eprintln!();
        eprintln!("Run a parallel Game of Life simulation from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to run configuration file");
        eprintln!("  turns        Override the number of turns in the file");
        eprintln!();
        eprintln!("Print an example configuration with --example.");
        std::process::exit(1);
    }

    let config_path = PathBuf::from(&args[1]);

    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let mut config: SimulationConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    if let Some(turns) = args.get(2) {
        config.params.turns = turns.parse().unwrap_or_else(|e| {
            eprintln!("Invalid turn count {:?}: {}", turns, e);
            std::process::exit(1);
        });
    }

    if let Err(e) = config.params.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let params = config.params;
    println!("Parallel Life");
    println!("=============");
    println!("Grid: {}x{}", params.image_width, params.image_height);
    println!("Turns: {}", params.turns);
    println!("Threads: {}", params.threads);
    println!("Input: {}", config.io.images_dir.display());
    println!("Output: {}", config.io.out_dir.display());
    println!();

    let store = PgmDirectory::new(&config.io.images_dir, &config.io.out_dir);
    let (events, rx) = event_channel();

    let start = Instant::now();
    let simulation = thread::spawn(move || parallel_life::run(params, store, events));

    // Print progress every 10%
    let report_every = (params.turns / 10).max(1);
    let mut flips = 0usize;
    for event in rx {
        match &event {
            Event::CellFlipped { .. } => flips += 1,
            Event::AliveCellsCount {
                completed_turns,
                cells_count,
            } if completed_turns % report_every == 0 => {
                let elapsed = start.elapsed().as_secs_f32();
                println!(
                    "  Turn {}/{}: alive={}, flips={}, {:.1} turns/s",
                    completed_turns,
                    params.turns,
                    cells_count,
                    flips,
                    *completed_turns as f32 / elapsed
                );
            }
            Event::FinalTurnComplete { alive, .. } => {
                println!();
                println!("Final state:");
                println!("  Alive cells: {}", alive.len());
            }
            Event::StateChange { .. } => println!("  {}", event),
            _ => {}
        }
    }

    let result = simulation.join().unwrap_or_else(|_| {
        eprintln!("Simulation thread panicked");
        std::process::exit(1);
    });

    match result {
        Ok(_) => {
            let elapsed = start.elapsed();
            println!(
                "  Written: {}",
                config.io.out_dir.join(format!("{}.pgm", params.output_filename())).display()
            );
            println!(
                "Time: {:.2}s ({:.1} turns/s)",
                elapsed.as_secs_f32(),
                params.turns as f32 / elapsed.as_secs_f32()
            );
        }
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_example_config() {
    let config = SimulationConfig::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing example config: {}", e),
    }
}
