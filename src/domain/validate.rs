use thiserror::Error;

use crate::domain::optimizer::Requirements;
use crate::domain::solver::Status;
use crate::domain::table::RewardTable;

/// Solve-time failures. Never crosses the public `solve` boundary: every
/// variant collapses to an empty solution there.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveFailure {
    #[error("No optimal solution (status {status:?})")]
    InfeasibleOrUnsolved { status: Status },

    #[error("Solver backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Coefficient for token {token} exceeds the solver range")]
    CoefficientOverflow { token: String },
}

/// Requirement entries that become constraints: non-zero and naming a token
/// column of the table. Sorted by token.
pub fn active_requirements<'a>(
    table: &RewardTable,
    requirements: &'a Requirements,
) -> Vec<(&'a str, u32)> {
    let mut active = Vec::with_capacity(requirements.len());
    for (token, &required) in requirements {
        if required == 0 {
            continue;
        }
        if !table.has_token(token) {
            log::debug!("Ignoring requirement for token {} not present in the table", token);
            continue;
        }
        active.push((token.as_str(), required));
    }
    active.sort_unstable_by(|a, b| a.0.cmp(b.0));
    active
}

/// Coefficients are handed to the backends as `i32`.
pub fn to_coefficient(token: &str, value: u32) -> Result<i32, SolveFailure> {
    i32::try_from(value).map_err(|_| SolveFailure::CoefficientOverflow {
        token: token.to_string(),
    })
}
