use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::optimizer::DEFAULT_BACKEND;
use crate::domain::solver_factory::{SolverSettings, DEFAULT_TIME_LIMIT_SECS};

/// Service settings, read from the environment (and `.env` via dotenv).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub json_limit: usize,
    pub heroes_path: PathBuf,
    pub acts_path: PathBuf,
    pub solver: String,
    pub time_limit_secs: f64,
    pub shuffle_seed: Option<u64>,
    pub sentry_dsn: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 9000,
            json_limit: 2 * 1024 * 1024, // default 2 MB
            heroes_path: PathBuf::from("data/heroes.csv"),
            acts_path: PathBuf::from("data/acts.json"),
            solver: DEFAULT_BACKEND.to_string(),
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            shuffle_seed: None,
            sentry_dsn: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Malformed numbers fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        let shuffle_seed = lookup("SHUFFLE_SEED").and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                log::warn!("Ignoring invalid SHUFFLE_SEED {:?}", raw);
                None
            }
        });

        Config {
            port: parse_or(&lookup, "PORT", defaults.port),
            json_limit: parse_or(&lookup, "JSON_PAYLOAD_LIMIT", defaults.json_limit),
            heroes_path: lookup("HEROES_CSV").map(PathBuf::from).unwrap_or(defaults.heroes_path),
            acts_path: lookup("ACTS_JSON").map(PathBuf::from).unwrap_or(defaults.acts_path),
            solver: lookup("SOLVER")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.solver),
            time_limit_secs: parse_or(&lookup, "SOLVE_TIME_LIMIT_SECS", defaults.time_limit_secs),
            shuffle_seed,
            sentry_dsn: lookup("SENTRY_DSN").filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn solver_settings(&self) -> SolverSettings {
        SolverSettings {
            time_limit_secs: self.time_limit_secs,
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {} value {:?}", key, raw);
            default
        }),
    }
}
