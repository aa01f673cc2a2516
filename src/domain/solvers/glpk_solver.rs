use crate::convert::{to_counts, to_glpk_objective, to_glpk_polyhedron};
use crate::domain::program::CoveringProgram;
use crate::domain::solver::{BackendSolution, Solver, Status};
use crate::domain::validate::SolveFailure;

use glpk_rust::{solve_ilps as glpk_solve_ilps, Solution};

const NO_TERMINAL_OUTPUT: bool = false;
const MINIMIZE: bool = false;

/// GLPK solver implementation (exact branch-and-bound)
pub struct GlpkSolver;

impl GlpkSolver {
    pub fn new() -> Self {
        GlpkSolver
    }
}

impl Default for GlpkSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for GlpkSolver {
    fn solve(&self, program: &CoveringProgram) -> Result<BackendSolution, SolveFailure> {
        let mut polyhedron = to_glpk_polyhedron(program);
        let objective = to_glpk_objective(program);

        let lib_solutions: Vec<Solution> =
            glpk_solve_ilps(&mut polyhedron, vec![objective], MINIMIZE, NO_TERMINAL_OUTPUT);

        let solution = lib_solutions.into_iter().next().ok_or_else(|| {
            SolveFailure::InfeasibleOrUnsolved {
                status: Status::Undefined,
            }
        })?;

        if let Some(error) = &solution.error {
            log::warn!("GLPK reported: {}", error);
        }

        Ok(BackendSolution {
            counts: to_counts(program, &solution),
            status: solution.status.into(),
        })
    }

    fn name(&self) -> &str {
        "GLPK"
    }
}
