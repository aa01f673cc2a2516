use crate::domain::solver::Solver;
use crate::domain::solvers::GlpkSolver;
use crate::domain::validate::SolveFailure;

#[cfg(feature = "highs-solver")]
use crate::domain::solvers::HighsSolver;

pub const DEFAULT_TIME_LIMIT_SECS: f64 = 10.0;

/// Available solver backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverType {
    Glpk,
    #[cfg(feature = "highs-solver")]
    Highs,
}

impl SolverType {
    /// Parse solver type from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "glpk" => Some(SolverType::Glpk),
            #[cfg(feature = "highs-solver")]
            "highs" => Some(SolverType::Highs),
            _ => None,
        }
    }
}

/// Backend tuning shared by every solver type. Backends without a matching
/// knob ignore it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    pub time_limit_secs: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
        }
    }
}

/// Create a solver instance based on the specified type
#[cfg_attr(not(feature = "highs-solver"), allow(unused_variables))]
pub fn create_solver(solver_type: SolverType, settings: SolverSettings) -> Box<dyn Solver> {
    match solver_type {
        SolverType::Glpk => Box::new(GlpkSolver::new()),
        #[cfg(feature = "highs-solver")]
        SolverType::Highs => Box::new(HighsSolver::new(settings.time_limit_secs)),
    }
}

/// Create a solver from its configured name. Names of backends that are
/// unknown or not compiled in are `BackendUnavailable`.
pub fn create_solver_by_name(
    name: &str,
    settings: SolverSettings,
) -> Result<Box<dyn Solver>, SolveFailure> {
    SolverType::from_str(name)
        .map(|solver_type| create_solver(solver_type, settings))
        .ok_or_else(|| SolveFailure::BackendUnavailable(name.to_string()))
}
