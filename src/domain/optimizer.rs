use std::collections::BTreeMap;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::domain::program::CoveringProgram;
use crate::domain::solver::Status;
use crate::domain::solver_factory::{create_solver_by_name, SolverSettings};
use crate::domain::table::RewardTable;
use crate::domain::validate::SolveFailure;

/// Minimum amount per token type. Zero entries are inert.
pub type Requirements = BTreeMap<String, u32>;

pub const DEFAULT_BACKEND: &str = "glpk";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// An optimal assignment for at least one constraint.
    Optimal,
    /// No active requirement; the all-zero assignment with cost 0.
    NothingRequired,
    /// Infeasible, or the backend did not reach optimality.
    NoSolution,
}

/// Plays per hero, restricted to heroes with a positive count.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    plays: BTreeMap<String, u32>,
    total_cost: f64,
    outcome: Outcome,
}

impl Solution {
    /// The "relax your constraints" answer.
    pub fn none() -> Self {
        Solution {
            plays: BTreeMap::new(),
            total_cost: 0.0,
            outcome: Outcome::NoSolution,
        }
    }

    pub fn nothing_required() -> Self {
        Solution {
            plays: BTreeMap::new(),
            total_cost: 0.0,
            outcome: Outcome::NothingRequired,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// False only for the empty "no solution" answer. The all-zero answer to
    /// an empty requirement set is found.
    pub fn is_found(&self) -> bool {
        self.outcome != Outcome::NoSolution
    }

    pub fn plays(&self) -> &BTreeMap<String, u32> {
        &self.plays
    }

    pub fn plays_of(&self, hero: &str) -> u32 {
        self.plays.get(hero).copied().unwrap_or(0)
    }

    pub fn total_plays(&self) -> u64 {
        self.plays.values().map(|&c| u64::from(c)).sum()
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Tokens collected per type by playing this solution. Zero totals are
    /// left out.
    pub fn token_totals(&self, table: &RewardTable) -> BTreeMap<String, u64> {
        let mut totals = BTreeMap::new();
        for (id, &count) in &self.plays {
            let Some(hero) = table.hero(id) else {
                continue;
            };
            for (token, amount) in hero.yields() {
                *totals.entry(token.to_string()).or_insert(0) += u64::from(amount) * u64::from(count);
            }
        }
        totals.retain(|_, total| *total > 0);
        totals
    }
}

/// Covering optimizer.
///
/// Owns the random generator used to shuffle the column order of every
/// program it builds; a seeded optimizer replays the same sequence of
/// programs.
pub struct Optimizer {
    backend: String,
    settings: SolverSettings,
    rng: StdRng,
}

impl Optimizer {
    pub fn new(backend: impl Into<String>) -> Self {
        Optimizer {
            backend: backend.into(),
            settings: SolverSettings::default(),
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_settings(mut self, settings: SolverSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// Cheapest plays per hero meeting every non-zero requirement.
    ///
    /// Never fails: every solve-time failure is logged and returned as
    /// `Solution::none()`.
    pub fn solve(&mut self, table: &RewardTable, requirements: &Requirements) -> Solution {
        match self.try_solve(table, requirements) {
            Ok(solution) => solution,
            Err(failure @ SolveFailure::BackendUnavailable(_)) => {
                log::error!("{}", failure);
                Solution::none()
            }
            Err(failure) => {
                log::warn!("The problem does not have an optimal solution: {}", failure);
                Solution::none()
            }
        }
    }

    fn try_solve(
        &mut self,
        table: &RewardTable,
        requirements: &Requirements,
    ) -> Result<Solution, SolveFailure> {
        let program = CoveringProgram::build(table, requirements, &mut self.rng)?;
        if program.is_trivial() {
            log::debug!("No active requirements, nothing to solve");
            return Ok(Solution::nothing_required());
        }

        let solver = create_solver_by_name(&self.backend, self.settings)?;
        log::info!("Solving with {}", solver.name());
        log::debug!("Number of variables = {}", program.num_variables());
        log::debug!("Number of constraints = {}", program.num_constraints());

        let started = Instant::now();
        let answer = solver.solve(&program)?;
        if answer.status != Status::Optimal {
            return Err(SolveFailure::InfeasibleOrUnsolved {
                status: answer.status,
            });
        }

        let counts = answer
            .counts
            .iter()
            .map(|&v| u32::try_from(v))
            .collect::<Result<Vec<u32>, _>>()
            .map_err(|_| SolveFailure::InfeasibleOrUnsolved {
                status: Status::Undefined,
            })?;
        if counts.len() != program.num_variables() || !program.is_satisfied_by(&counts) {
            log::warn!("{} returned an assignment that violates the requirements", solver.name());
            return Err(SolveFailure::InfeasibleOrUnsolved {
                status: Status::Undefined,
            });
        }

        let total_cost = program.objective(&counts);
        log::info!(
            "Problem solved in {:?}, optimal objective value = {}",
            started.elapsed(),
            total_cost
        );

        let plays = program
            .heroes
            .iter()
            .zip(&counts)
            .filter(|&(_, &count)| count > 0)
            .map(|(id, &count)| {
                log::debug!("{} = {}", id, count);
                (id.clone(), count)
            })
            .collect();

        Ok(Solution {
            plays,
            total_cost,
            outcome: Outcome::Optimal,
        })
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND)
    }
}

/// Solve with the default backend and an entropy-seeded tie-break shuffle.
pub fn solve(table: &RewardTable, requirements: &Requirements) -> Solution {
    Optimizer::default().solve(table, requirements)
}
