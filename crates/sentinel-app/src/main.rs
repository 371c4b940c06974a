use std::path::PathBuf;
use std::sync::mpsc::RecvTimeoutError;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use sentinel_app::game_loop::spawn_game_loop;
use sentinel_core::config::CombatConfig;
use sentinel_sim::scenario::{self, Scenario};
use sentinel_sim::SimConfig;

const USAGE: &str = "usage: sentinel [SCENARIO] [--config PATH] [--seconds N] [--seed N]";

#[derive(Debug)]
struct Args {
    scenario: Scenario,
    config: Option<PathBuf>,
    seconds: u64,
    seed: u64,
}

fn main() {
    init_tracing();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            error!("{msg}");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(args) {
        error!(error = %err, "run failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => CombatConfig::from_path(path)?,
        None => CombatConfig::default(),
    };
    let world = scenario::build(
        args.scenario,
        SimConfig {
            seed: args.seed,
            ..Default::default()
        },
    );
    info!(scenario = %args.scenario, seconds = args.seconds, seed = args.seed, "starting");

    let handle = spawn_game_loop(world, config)?;
    let deadline = Instant::now() + Duration::from_secs(args.seconds);
    let mut shutdown_sent = false;

    loop {
        let wait = deadline
            .saturating_duration_since(Instant::now())
            .max(Duration::from_millis(10));
        match handle.notifications.recv_timeout(wait) {
            Ok(stamped) => info!(at = stamped.at, "{:?}", stamped.notification),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        if !shutdown_sent && Instant::now() >= deadline {
            shutdown_sent = true;
            if !handle.shutdown() {
                warn!("game loop already stopped");
            }
        }
    }

    if let Some(report) = handle.latest_report() {
        info!(report = %serde_json::to_string(&report)?, "final state");
    }
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args {
        scenario: Scenario::LoneZombie,
        config: None,
        seconds: 10,
        seed: SimConfig::default().seed,
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--seconds" => parsed.seconds = number(args.next(), "--seconds")?,
            "--seed" => parsed.seed = number(args.next(), "--seed")?,
            name => {
                parsed.scenario = name.parse().map_err(|_| {
                    let known: Vec<String> = Scenario::ALL.iter().map(|s| s.to_string()).collect();
                    format!("unknown scenario {name:?}, expected one of {}", known.join(", "))
                })?;
            }
        }
    }
    Ok(parsed)
}

fn number(value: Option<String>, flag: &str) -> Result<u64, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|_| format!("{flag} expects a whole number, got {value:?}"))
}
