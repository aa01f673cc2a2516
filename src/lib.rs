//! # token-optimizer
//!
//! Picks how many matches to play with which hero so that a set of token
//! requirements is met at minimum total difficulty, by solving a small
//! integer covering program.
//!
//! ```no_run
//! use token_optimizer::{solve, HeroRecord, Requirements, RewardTable};
//!
//! let table = RewardTable::new(vec![
//!     HeroRecord::new("Axe", 100.0).with_yield("Strength", 3.0),
//!     HeroRecord::new("Pudge", 150.0).with_yield("Strength", 3.0),
//! ])?;
//! let requirements = Requirements::from([("Strength".to_string(), 6)]);
//!
//! let solution = solve(&table, &requirements);
//! assert_eq!(solution.plays_of("Axe"), 2);
//! # Ok::<(), token_optimizer::DataError>(())
//! ```

pub mod config;
pub mod convert;
pub mod domain;
pub mod error;
pub mod loader;
pub mod models;
pub mod routes;

pub use domain::catalog::{Act, TokenCatalog};
pub use domain::optimizer::{solve, Optimizer, Outcome, Requirements, Solution};
pub use domain::table::{Hero, HeroRecord, RewardTable};
pub use error::{DataError, Error, Result};
