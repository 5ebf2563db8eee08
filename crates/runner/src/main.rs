use bourse_runner::{Simulation, SimulationConfig};
use std::time::Duration;

fn print_help() {
    eprintln!(
        r#"Bourse - concurrent agent market simulation

USAGE:
    bourse [OPTIONS] [CONFIG]

ARGS:
    <CONFIG>            JSON configuration file (every field optional)

OPTIONS:
    --duration <SECS>   Override the configured run time
    --seed <SEED>       Seed every agent RNG for a reproducible run
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    # Reference market: C1 and C2 at 100 for one minute
    bourse

    # Custom listing, ten seconds, reproducible
    bourse market.json --duration 10 --seed 42
"#
    );
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut duration: Option<Duration> = None;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--duration" | "-d" => {
                i += 1;
                let secs = args
                    .get(i)
                    .and_then(|s| s.parse::<f64>().ok())
                    .filter(|s| *s > 0.0)
                    .unwrap_or_else(|| fail("--duration requires a positive number of seconds"));
                duration = Some(Duration::from_secs_f64(secs));
            }
            "--seed" | "-s" => {
                i += 1;
                seed = Some(
                    args.get(i)
                        .and_then(|s| s.parse().ok())
                        .unwrap_or_else(|| fail("--seed requires an unsigned integer")),
                );
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
            path => {
                if config_path.replace(path.to_string()).is_some() {
                    fail("only one config file may be given");
                }
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => {
            log::info!("Loading configuration from: {}", path);
            SimulationConfig::from_file(&path)?
        }
        None => SimulationConfig::default(),
    };
    if let Some(duration) = duration {
        config = config.with_duration(duration);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let simulation = Simulation::start(config)?;

    // Ctrl-C ends the run early but still prints the report
    let run_for = simulation.config().duration();
    tokio::select! {
        _ = tokio::time::sleep(run_for) => {}
        _ = tokio::signal::ctrl_c() => {
            log::info!("Interrupted, stopping early");
        }
    }

    let report = simulation.stop().await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
