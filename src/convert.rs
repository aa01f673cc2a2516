use std::collections::{BTreeMap, HashMap};

use crate::domain::catalog::Act;
use crate::domain::optimizer::Solution;
use crate::domain::program::{CoveringProgram, PLAY_UPPER_BOUND};
use crate::domain::solver::Status;
use crate::domain::table::{Hero, RewardTable};
use crate::models::{ApiHero, ApiPlay, ApiSolution};

use glpk_rust::{
    Bound, IntegerSparseMatrix as GlpkMatrix, Solution as GlpkSolution,
    SparseLEIntegerPolyhedron as GlpkPoly, Status as GlpkStatus, Variable as GlpkVar,
};

/// Convert a covering program (A x >= b) to a GLPK LE polyhedron (A' x <= b')
/// by negating A and b. Variables borrow their ids from the program.
pub fn to_glpk_polyhedron(program: &CoveringProgram) -> GlpkPoly<'_> {
    let nnz: usize = program.covers.iter().map(|c| c.terms.len()).sum();
    let mut rows = Vec::with_capacity(nnz);
    let mut cols = Vec::with_capacity(nnz);
    let mut vals = Vec::with_capacity(nnz);

    for (row, cover) in program.covers.iter().enumerate() {
        for &(col, coeff) in &cover.terms {
            rows.push(row as i32);
            cols.push(col as i32);
            vals.push(-coeff);
        }
    }

    let b: Vec<Bound> = program.covers.iter().map(|c| (0, -c.required)).collect();

    let variables: Vec<GlpkVar<'_>> = program
        .heroes
        .iter()
        .map(|id| GlpkVar {
            id: id.as_str(),
            bound: (0, PLAY_UPPER_BOUND),
        })
        .collect();

    GlpkPoly {
        a: GlpkMatrix { rows, cols, vals },
        b,
        variables,
        double_bound: false,
    }
}

pub fn to_glpk_objective(program: &CoveringProgram) -> HashMap<&str, f64> {
    program
        .heroes
        .iter()
        .zip(&program.costs)
        .map(|(id, &cost)| (id.as_str(), cost))
        .collect()
}

/// Column values in program order; columns GLPK left out read as 0.
pub fn to_counts(program: &CoveringProgram, solution: &GlpkSolution) -> Vec<i64> {
    program
        .heroes
        .iter()
        .map(|id| {
            solution
                .solution
                .get(id.as_str())
                .map(|&v| v as i64)
                .unwrap_or(0)
        })
        .collect()
}

impl From<GlpkStatus> for Status {
    fn from(s: GlpkStatus) -> Self {
        match s {
            GlpkStatus::Undefined => Status::Undefined,
            GlpkStatus::Feasible => Status::Feasible,
            GlpkStatus::Infeasible => Status::Infeasible,
            GlpkStatus::NoFeasible => Status::NoFeasible,
            GlpkStatus::Optimal => Status::Optimal,
            GlpkStatus::Unbounded => Status::Unbounded,
            GlpkStatus::SimplexFailed => Status::SimplexFailed,
            GlpkStatus::MIPFailed => Status::MIPFailed,
            GlpkStatus::EmptySpace => Status::EmptySpace,
        }
    }
}

pub const NO_SOLUTION_MESSAGE: &str = "No solution found. Try to relax or add the constraints.";

fn in_act(act: Option<&Act>, token: &str) -> bool {
    act.map_or(true, |a| a.contains(token))
}

/// Hero row with its yields, limited to the act's tokens when one is given.
pub fn to_api_hero(hero: &Hero, act: Option<&Act>) -> ApiHero {
    ApiHero {
        id: hero.id().to_string(),
        cost: hero.cost(),
        tokens: hero
            .yields()
            .filter(|(token, _)| in_act(act, token))
            .map(|(token, amount)| (token.to_string(), amount))
            .collect(),
    }
}

/// Solution rows sorted by hero, plus the totals row with zero columns
/// dropped.
pub fn to_api_solution(solution: &Solution, table: &RewardTable, act: Option<&Act>) -> ApiSolution {
    let plays: Vec<ApiPlay> = solution
        .plays()
        .iter()
        .map(|(id, &matches)| {
            let hero = table.hero(id);
            let tokens: BTreeMap<String, u64> = hero
                .into_iter()
                .flat_map(|h| h.yields())
                .filter(|(token, _)| in_act(act, token))
                .map(|(token, amount)| (token.to_string(), u64::from(amount) * u64::from(matches)))
                .collect();
            ApiPlay {
                hero: id.clone(),
                matches,
                cost: hero.map_or(0.0, |h| h.cost() * f64::from(matches)),
                tokens,
            }
        })
        .collect();

    let mut token_totals = solution.token_totals(table);
    token_totals.retain(|token, _| in_act(act, token));

    ApiSolution {
        status: solution.outcome(),
        act: act.map(|a| a.name.clone()),
        plays,
        total_matches: solution.total_plays(),
        total_cost: solution.total_cost(),
        token_totals,
        message: (!solution.is_found()).then(|| NO_SOLUTION_MESSAGE.to_string()),
    }
}
