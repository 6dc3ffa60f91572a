use super::tableau::{Step, Tableau};
use crate::error::SimplexError;
use crate::problem::Problem;
use crate::solver::{SimplexResult, Solution, SolutionStatus, SolverResult};
use crate::util::{EPS, ITER_WIDTH};

use log::{debug, info, trace, warn};

/// Tableau simplex solver for `max cᵀx` s.t. `Ax ≤ b`, `x ≥ 0` with `b ≥ 0`.
///
/// Entering and leaving variables are chosen by Bland's rule, so the solver
/// terminates on degenerate problems without an iteration cap.
pub struct PrimalSimplexSolver {
    max_iter: u64,
    tolerance: f64,
}

impl std::default::Default for PrimalSimplexSolver {
    fn default() -> Self {
        Self {
            max_iter: u64::MAX,
            tolerance: EPS,
        }
    }
}

impl PrimalSimplexSolver {
    pub fn new(max_iter: Option<u64>) -> Self {
        Self {
            max_iter: max_iter.unwrap_or(u64::MAX),
            ..Default::default()
        }
    }

    /// Sets the tolerance for ratio ties and the starting feasibility check.
    ///
    /// It must be finite and nonnegative, anything else is ignored with a
    /// warning and the previous tolerance stays in effect.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        if tolerance.is_finite() && tolerance >= 0. {
            self.tolerance = tolerance;
        } else {
            warn!(
                "ignoring invalid tolerance {}, keeping {}",
                tolerance, self.tolerance
            );
        }

        self
    }

    pub fn solve(&self, prob: &Problem) -> SimplexResult {
        let mut tableau = Tableau::from(prob);

        Ok(match self.solve_with_initial(&mut tableau)? {
            (SolutionStatus::Optimal, iterations) => {
                info!("found optimal point with objective value {}", tableau.obj());
                SolverResult::Optimal(Solution::new(tableau, iterations))
            }

            (SolutionStatus::Unbounded, _) => {
                info!("problem is unbounded");
                SolverResult::Unbounded
            }

            (SolutionStatus::MaxIter, _) => {
                info!("reached maximum iterations");
                SolverResult::MaxIter { obj: tableau.obj() }
            }
        })
    }

    /// Runs the optimality loop on `tableau` until it is optimal, unbounded or
    /// out of iterations. Returns the status and the number of pivots.
    pub fn solve_with_initial(
        &self,
        tableau: &mut Tableau,
    ) -> Result<(SolutionStatus, u64), SimplexError> {
        info!(
            "solving problem with {} variables and {} constraints",
            tableau.cols(),
            tableau.rows()
        );

        if !tableau.is_partition() {
            return Err(SimplexError::new(format!(
                "invalid basis, N = {:?} and B = {:?} do not partition 0..{}",
                tableau.nonbasic_vars(),
                tableau.basic_vars(),
                tableau.cols() + tableau.rows()
            )));
        }

        if !tableau.is_feasible(self.tolerance) {
            return Err(SimplexError::new(format!(
                "initial basis is infeasible, b = {}",
                tableau.rhs()
            )));
        }

        trace!("c: {}", tableau.reduced_costs());
        trace!("A: {}", tableau.A);
        trace!("b: {}", tableau.rhs());

        info!("Iteration  |  Objective");

        let mut iter = 0u64;

        loop {
            info!("{:it$}  |  {:.8E}", iter, tableau.obj(), it = ITER_WIDTH);

            if iter >= self.max_iter {
                if tableau.entering_index().is_none() {
                    return Ok((SolutionStatus::Optimal, iter));
                }

                debug!("reached max iterations");
                return Ok((SolutionStatus::MaxIter, iter));
            }

            match tableau.step(self.tolerance) {
                Step::Pivoted { entering, leaving } => {
                    debug!("x[{}] enters, x[{}] leaves", entering, leaving);
                    iter += 1;
                }

                Step::Optimal => return Ok((SolutionStatus::Optimal, iter)),

                Step::Unbounded { entering } => {
                    debug!("x[{}] can increase without bound", entering);
                    return Ok((SolutionStatus::Unbounded, iter));
                }
            }
        }
    }
}
