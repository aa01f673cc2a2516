use crate::domain::program::{CoveringProgram, PLAY_UPPER_BOUND};
use crate::domain::solver::{BackendSolution, Solver, Status};
use crate::domain::validate::SolveFailure;

use ::highs::{ColProblem, HighsModelStatus, Sense};

/// HiGHS solver implementation
pub struct HighsSolver {
    time_limit_secs: f64,
}

impl HighsSolver {
    pub fn new(time_limit_secs: f64) -> Self {
        HighsSolver { time_limit_secs }
    }

    /// Convert HiGHS status to our status
    fn convert_status(model_status: HighsModelStatus) -> Status {
        match model_status {
            HighsModelStatus::Optimal => Status::Optimal,
            HighsModelStatus::Infeasible => Status::Infeasible,
            HighsModelStatus::UnboundedOrInfeasible => Status::Unbounded,
            HighsModelStatus::Unbounded => Status::Unbounded,
            _ => Status::Undefined,
        }
    }
}

impl Solver for HighsSolver {
    fn solve(&self, program: &CoveringProgram) -> Result<BackendSolution, SolveFailure> {
        let mut problem = ColProblem::new();

        // One `>= required` row per cover
        let rows: Vec<_> = program
            .covers
            .iter()
            .map(|cover| problem.add_row(cover.required as f64..))
            .collect();

        // Column-major coefficients
        let mut col_data: Vec<Vec<(usize, f64)>> = vec![Vec::new(); program.num_variables()];
        for (row_idx, cover) in program.covers.iter().enumerate() {
            for &(col, coeff) in &cover.terms {
                col_data[col].push((row_idx, coeff as f64));
            }
        }

        for (col_idx, &cost) in program.costs.iter().enumerate() {
            let row_factors: Vec<_> = col_data[col_idx]
                .iter()
                .map(|(row_idx, val)| (rows[*row_idx], *val))
                .collect();

            problem.add_integer_column(cost, 0.0..=PLAY_UPPER_BOUND as f64, &row_factors);
        }

        let mut model = problem.optimise(Sense::Minimise);
        model.set_option("output_flag", false);
        model.set_option("time_limit", self.time_limit_secs);
        let solved = model.solve();

        let status = Self::convert_status(solved.status());
        let solution_values = solved.get_solution();

        let counts = (0..program.num_variables())
            .map(|col_idx| {
                solution_values
                    .columns()
                    .get(col_idx)
                    .copied()
                    .unwrap_or(0.0)
                    .round() as i64
            })
            .collect();

        Ok(BackendSolution { status, counts })
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
