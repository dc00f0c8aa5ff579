//! Command-line options for the desktop binary: `--seed <n>` and repeatable `-v`.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use log::LevelFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Requested(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Requested(seed) | Self::Generated(seed) => seed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaunchArgs {
    pub seed: SeedChoice,
    pub log_level: LevelFilter,
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);
    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ u64::from(process::id()).rotate_left(17)
        ^ counter.rotate_left(7);
    splitmix(entropy)
}

/// Parses everything after the program name. `generated_seed` is used when no seed is given.
pub fn parse_launch_args(args: &[String], generated_seed: u64) -> Result<LaunchArgs, String> {
    let mut seed = None;
    let mut verbosity = 0_u8;
    let mut rest = args.iter().skip(1);

    while let Some(argument) = rest.next() {
        let raw_seed = match argument.as_str() {
            "--seed" => Some(rest.next().ok_or("missing value for --seed")?.as_str()),
            "-v" | "--verbose" => {
                verbosity = verbosity.saturating_add(1);
                None
            }
            "-vv" => {
                verbosity = verbosity.saturating_add(2);
                None
            }
            other => match other.strip_prefix("--seed=") {
                Some(value) => Some(value),
                None => return Err(format!("unknown argument '{other}'")),
            },
        };
        if let Some(raw) = raw_seed {
            if seed.is_some() {
                return Err("seed provided more than once".to_string());
            }
            seed = Some(
                raw.parse::<u64>().map_err(|_| format!("seed value '{raw}' must be a number"))?,
            );
        }
    }

    Ok(LaunchArgs {
        seed: seed.map_or(SeedChoice::Generated(generated_seed), SeedChoice::Requested),
        log_level: match verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        },
    })
}

fn splitmix(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
