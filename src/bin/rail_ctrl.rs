//! Bootstrap for the rail supervisory controller.
//!
//! Talks to the hardware through a character device when `--device` is
//! given and to the built-in train simulator otherwise.
//!
//! Usage:
//!   cargo run --bin rail_ctrl -- [OPTIONS]
//!
//! Options:
//!   --profile <NAME>     basic, braking, approach or full (default: full)
//!   --device <PATH>      Serial/I2C character device (default: simulator)
//!   --settle-ms <MS>     Wait between request and response (default: 400)
//!   --seed <N>           Simulator RNG seed
//!   --fault-after <N>    Simulator sends the fault sentinel after N exchanges
//!   --log-level <LEVEL>  error, warn, info, debug or trace (default: info)
//!   -v, --verbose        Log every exchange
//!   -q, --quiet          Log warnings and errors only

use std::env;
use std::path::PathBuf;
use std::process;

use rail_ctrl::error::{RailError, Result};
use rail_ctrl::sim::{SimConfig, TrainSimulator};
use rail_ctrl::transport::{SettledTransport, DEFAULT_SETTLE};
use rail_ctrl::{display::ConsoleDisplay, run_with, ControllerConfig, FeatureSet};
use rail_ctrl_core::logging::{self, Level};
use rail_ctrl_core::log_info;
use rail_ctrl_core::time::Timespec;

struct Args {
    features: FeatureSet,
    device: Option<PathBuf>,
    settle: Timespec,
    seed: Option<u64>,
    fault_after: Option<u64>,
    level: Level,
}

fn parse_args(raw: &[String]) -> Result<Option<Args>> {
    let mut args = Args {
        features: FeatureSet::FULL,
        device: None,
        settle: DEFAULT_SETTLE,
        seed: None,
        fault_after: None,
        level: Level::Info,
    };

    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "--profile" => {
                i += 1;
                let name = value(raw, i, "profile")?;
                args.features = FeatureSet::from_name(name).ok_or_else(|| {
                    RailError::InvalidValue {
                        name: "profile",
                        value: name.to_string(),
                    }
                })?;
            }
            "--device" => {
                i += 1;
                args.device = Some(PathBuf::from(value(raw, i, "device")?));
            }
            "--settle-ms" => {
                i += 1;
                args.settle = Timespec::from_millis(number(raw, i, "settle-ms")?);
            }
            "--seed" => {
                i += 1;
                args.seed = Some(number(raw, i, "seed")?);
            }
            "--fault-after" => {
                i += 1;
                args.fault_after = Some(number(raw, i, "fault-after")?);
            }
            "--log-level" => {
                i += 1;
                let name = value(raw, i, "log-level")?;
                args.level = Level::from_name(name).ok_or_else(|| RailError::InvalidValue {
                    name: "log-level",
                    value: name.to_string(),
                })?;
            }
            "-v" | "--verbose" => args.level = Level::Trace,
            "-q" | "--quiet" => args.level = Level::Warn,
            "-h" | "--help" => return Ok(None),
            other => return Err(RailError::UnknownOption(other.to_string())),
        }
        i += 1;
    }

    Ok(Some(args))
}

fn value<'a>(raw: &'a [String], i: usize, name: &'static str) -> Result<&'a str> {
    raw.get(i)
        .map(String::as_str)
        .ok_or(RailError::MissingValue(name))
}

fn number(raw: &[String], i: usize, name: &'static str) -> Result<u64> {
    let text = value(raw, i, name)?;
    text.parse().map_err(|_| RailError::InvalidValue {
        name,
        value: text.to_string(),
    })
}

fn print_usage() {
    eprintln!(
        "Usage: rail_ctrl [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --profile <NAME>     basic, braking, approach or full (default: full)\n\
         \x20 --device <PATH>      Serial/I2C character device (default: simulator)\n\
         \x20 --settle-ms <MS>     Wait between request and response (default: 400)\n\
         \x20 --seed <N>           Simulator RNG seed\n\
         \x20 --fault-after <N>    Simulator sends the fault sentinel after N exchanges\n\
         \x20 --log-level <LEVEL>  error, warn, info, debug or trace (default: info)\n\
         \x20 -v, --verbose        Log every exchange\n\
         \x20 -q, --quiet          Log warnings and errors only\n\
         \x20 -h, --help           Show this help"
    );
}

fn main() {
    let raw: Vec<String> = env::args().collect();
    let args = match parse_args(&raw) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            print_usage();
            process::exit(1);
        }
    };

    logging::set_max_level(args.level);
    let config = ControllerConfig::for_features(args.features);

    match args.device {
        Some(path) => {
            let transport = SettledTransport::open(&path, args.settle).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                process::exit(1);
            });
            log_info!(
                "profile {}, device {}, settle {} ms",
                args.features.name(),
                path.display(),
                transport.settle().as_nanos() / 1_000_000
            );
            run_with(config, transport, ConsoleDisplay)
        }
        None => {
            let sim = TrainSimulator::new(SimConfig {
                seed: args.seed,
                fault_after: args.fault_after,
                ..SimConfig::default()
            })
            .unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                process::exit(1);
            });
            log_info!("profile {}, simulated peer", args.features.name());
            run_with(config, sim, ConsoleDisplay)
        }
    }
}
