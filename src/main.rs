// Elevator Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/elevator-simulator
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/elevator-simulator --num-floors 10 --num-elevators 2 --moving-algorithm short-sighted --verbose
// ```

use anyhow::{Context, Result};
use clap::Parser;
use elevator_simulator::simulation::{run_batch, EventRecorder, LoggingConfig, Simulation};
use elevator_simulator::types::{ArrivalGeneratorKind, CliArgs, OutputFormat, SimulationConfig};
use std::fs::File;
use std::io::BufWriter;
use std::process;
use tracing::{error, info, warn};

fn main() {
    let args = CliArgs::parse();

    // Load configuration from CLI arguments and optional config file
    let config = match SimulationConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match config.print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Held until exit so file logs are flushed
    let logging = LoggingConfig::for_cli(args.verbose, args.debug).with_visualization(config.visualize);
    let _logging_guard = match logging.init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Elevator Simulator");

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        eprintln!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    info!("Configuration loaded and validated successfully");

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_startup_banner(&config);

    if let Err(e) = run_simulation(&config) {
        error!("Simulation failed: {:#}", e);
        eprintln!("Simulation failed: {:#}", e);
        process::exit(1);
    }

    info!("Elevator Simulator completed successfully");
}

/// Run a single simulation or a batch of replicas and print the report
fn run_simulation(config: &SimulationConfig) -> Result<()> {
    if config.replicas > 1 {
        if config.events_output.is_some() {
            warn!("events_output is ignored when running more than one replica");
        }
        if config.visualize {
            warn!("visualize is ignored when running more than one replica");
        }
        let summary = run_batch(config, config.replicas).context("Replica batch failed")?;
        match config.output_format {
            OutputFormat::Text => println!("{}", summary.generate_summary_report()),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        }
        return Ok(());
    }

    let mut simulation =
        Simulation::from_config(config).context("Failed to initialize simulation")?;
    let recorder = config.events_output.as_ref().map(|_| EventRecorder::new());
    if let Some(recorder) = &recorder {
        simulation.add_observer(recorder.clone());
    }

    let statistics = simulation.run(config.num_rounds).context("Simulation run failed")?;

    if let (Some(recorder), Some(path)) = (&recorder, &config.events_output) {
        write_events_output(recorder, path)?;
    }

    match config.output_format {
        OutputFormat::Text => println!("{}", statistics),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&statistics)?),
    }
    Ok(())
}

/// Write recorded events to a JSONL file
fn write_events_output(recorder: &EventRecorder, output_path: &str) -> Result<()> {
    info!("Writing {} events to {}", recorder.len(), output_path);

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create events output file '{}'", output_path))?;
    recorder
        .write_jsonl(BufWriter::new(file))
        .with_context(|| format!("Failed to write events to '{}'", output_path))?;

    eprintln!("Events written to: {}", output_path);
    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Elevator Simulator");
    eprintln!("==================");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Floors: {}", config.num_floors);
    eprintln!("  Elevators: {} (capacity {})", config.num_elevators, config.elevator_capacity);
    eprintln!("  Rounds: {}", config.num_rounds);
    match config.arrival_generator {
        ArrivalGeneratorKind::Random => eprintln!(
            "  Arrivals: random, {} per round",
            config.num_people_per_round.unwrap_or(0)
        ),
        ArrivalGeneratorKind::File => eprintln!(
            "  Arrivals: file {}",
            config.arrivals_file.as_deref().unwrap_or("<missing>")
        ),
    }
    eprintln!("  Moving Algorithm: {}", config.moving_algorithm);
    eprintln!("  Output Format: {}", config.output_format);
    if config.replicas > 1 {
        eprintln!("  Replicas: {}", config.replicas);
    }
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!();
}
