use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::optimizer::Requirements;
use crate::domain::solver::Status;
use crate::domain::table::{Hero, RewardTable};
use crate::domain::validate::{active_requirements, to_coefficient, SolveFailure};

/// Upper bound on plays per hero. The largest bound the backends accept.
pub const PLAY_UPPER_BOUND: i32 = i32::MAX;

/// One `>=` row: `Σ coeff · x[col] >= required`
#[derive(Debug, Clone, PartialEq)]
pub struct Cover {
    pub token: String,
    pub required: i32,
    pub terms: Vec<(usize, i32)>,
}

/// Integer covering program over the heroes that can contribute to at least
/// one requirement. Column `i` is `heroes[i]` with objective `costs[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoveringProgram {
    pub heroes: Vec<String>,
    pub costs: Vec<f64>,
    pub covers: Vec<Cover>,
}

impl CoveringProgram {
    /// Build the program with the column order shuffled by `rng`.
    ///
    /// Row order never changes the optimum, only which optimal vertex a
    /// backend lands on, so reshuffling is what lets a re-solve surface a
    /// different tie. Heroes start in id order so a seeded `rng` reproduces
    /// the same program.
    ///
    /// Fails with `InfeasibleOrUnsolved` when a required token is yielded by
    /// no hero.
    pub fn build<R: Rng + ?Sized>(
        table: &RewardTable,
        requirements: &Requirements,
        rng: &mut R,
    ) -> Result<Self, SolveFailure> {
        let active = active_requirements(table, requirements);

        let mut columns: Vec<&Hero> = table
            .heroes()
            .filter(|hero| active.iter().any(|(token, _)| hero.yield_of(token) > 0))
            .collect();
        columns.shuffle(rng);

        let mut covers = Vec::with_capacity(active.len());
        for (token, required) in active {
            let mut terms = Vec::new();
            for (col, hero) in columns.iter().enumerate() {
                let amount = hero.yield_of(token);
                if amount > 0 {
                    terms.push((col, to_coefficient(token, amount)?));
                }
            }
            if terms.is_empty() {
                log::debug!("No hero yields token {}", token);
                return Err(SolveFailure::InfeasibleOrUnsolved {
                    status: Status::Infeasible,
                });
            }
            covers.push(Cover {
                token: token.to_string(),
                required: to_coefficient(token, required)?,
                terms,
            });
        }

        Ok(CoveringProgram {
            heroes: columns.iter().map(|h| h.id().to_string()).collect(),
            costs: columns.iter().map(|h| h.cost()).collect(),
            covers,
        })
    }

    /// Nothing to satisfy: the all-zero assignment is optimal.
    pub fn is_trivial(&self) -> bool {
        self.covers.is_empty()
    }

    pub fn num_variables(&self) -> usize {
        self.heroes.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.covers.len()
    }

    pub fn is_satisfied_by(&self, counts: &[u32]) -> bool {
        self.covers.iter().all(|cover| {
            let total: u64 = cover
                .terms
                .iter()
                .map(|&(col, coeff)| u64::from(counts.get(col).copied().unwrap_or(0)) * coeff as u64)
                .sum();
            total >= cover.required as u64
        })
    }

    pub fn objective(&self, counts: &[u32]) -> f64 {
        self.costs
            .iter()
            .zip(counts)
            .map(|(&cost, &count)| cost * f64::from(count))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::HeroRecord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn table() -> RewardTable {
        RewardTable::new(vec![
            HeroRecord::new("A", 2.0).with_yield("X", 1.0).with_yield("Y", 1.0),
            HeroRecord::new("B", 1.0).with_yield("X", 1.0),
            HeroRecord::new("C", 1.0).with_yield("Y", 1.0),
            HeroRecord::new("D", 1.0).with_yield("W", 4.0),
            HeroRecord::new("E", 1.0).with_yield("Z", 0.0),
        ])
        .unwrap()
    }

    fn requirements(entries: &[(&str, u32)]) -> Requirements {
        entries.iter().map(|(t, v)| (t.to_string(), *v)).collect()
    }

    #[test]
    fn test_build_should_only_use_contributing_heroes() {
        let mut rng = StdRng::seed_from_u64(7);
        let program = CoveringProgram::build(&table(), &requirements(&[("X", 2)]), &mut rng).unwrap();

        let mut heroes = program.heroes.clone();
        heroes.sort();
        assert_eq!(heroes, vec!["A", "B"]);
        assert_eq!(program.num_constraints(), 1);
        assert_eq!(program.covers[0].required, 2);
        assert_eq!(program.covers[0].terms.len(), 2);
    }

    #[test]
    fn test_build_given_only_zero_or_unknown_entries_should_be_trivial() {
        let mut rng = StdRng::seed_from_u64(7);
        let program = CoveringProgram::build(
            &table(),
            &requirements(&[("X", 0), ("Carry", 5)]),
            &mut rng,
        )
        .unwrap();
        assert!(program.is_trivial());
        assert_eq!(program.num_variables(), 0);
    }

    #[test]
    fn test_build_given_unyielded_token_should_fail() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = CoveringProgram::build(&table(), &requirements(&[("Z", 5)]), &mut rng);
        assert_eq!(
            result,
            Err(SolveFailure::InfeasibleOrUnsolved {
                status: Status::Infeasible
            })
        );
    }

    #[test]
    fn test_build_given_same_seed_should_reproduce_order() {
        let reqs = requirements(&[("X", 1), ("Y", 1), ("W", 1)]);
        let first = CoveringProgram::build(&table(), &reqs, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = CoveringProgram::build(&table(), &reqs, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_given_different_seeds_should_vary_order() {
        let reqs = requirements(&[("X", 1), ("Y", 1), ("W", 1)]);
        let orders: std::collections::HashSet<Vec<String>> = (0..32)
            .map(|seed| {
                CoveringProgram::build(&table(), &reqs, &mut StdRng::seed_from_u64(seed))
                    .unwrap()
                    .heroes
            })
            .collect();
        assert!(orders.len() > 1);
    }

    #[test]
    fn test_is_satisfied_by_and_objective() {
        let mut rng = StdRng::seed_from_u64(1);
        let program = CoveringProgram::build(&table(), &requirements(&[("X", 1), ("Y", 1)]), &mut rng)
            .unwrap();
        let col = |id: &str| program.heroes.iter().position(|h| h == id).unwrap();

        let mut counts = vec![0; program.num_variables()];
        assert!(!program.is_satisfied_by(&counts));

        counts[col("B")] = 1;
        counts[col("C")] = 1;
        assert!(program.is_satisfied_by(&counts));
        assert_eq!(program.objective(&counts), 2.0);
    }
}
