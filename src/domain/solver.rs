use crate::domain::program::CoveringProgram;
use crate::domain::validate::SolveFailure;

/// Backend termination status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Undefined,
    Feasible,
    Infeasible,
    NoFeasible,
    Optimal,
    Unbounded,
    SimplexFailed,
    MIPFailed,
    EmptySpace,
}

/// Raw backend answer. `counts[i]` is the value of column `i` of the program.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendSolution {
    pub status: Status,
    pub counts: Vec<i64>,
}

/// Common interface for ILP backends
pub trait Solver: Send + Sync {
    /// Minimise the program's objective over non-negative integer plays.
    ///
    /// Backends report whatever status they reached; deciding what counts as
    /// a usable answer is up to the caller.
    fn solve(&self, program: &CoveringProgram) -> Result<BackendSolution, SolveFailure>;

    /// Get the solver name for logging/debugging
    fn name(&self) -> &str;
}
