use crate::error::SimplexError;
use crate::primal::tableau::Tableau;

pub type SimplexResult = Result<SolverResult, SimplexError>;

#[derive(Debug, Clone)]
pub enum SolverResult {
    Optimal(Solution),
    Unbounded,
    MaxIter { obj: f64 },
}

impl SolverResult {
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolverResult::Optimal(..))
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, SolverResult::Unbounded)
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolverResult::Optimal(sol) => Some(sol),
            _ => None,
        }
    }
}

/// Renders an optimum as `[x0, x1, ...]` and an unbounded problem as `unbounded`.
impl std::fmt::Display for SolverResult {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SolverResult::Optimal(sol) => {
                write!(f, "[")?;

                for (i, x_i) in sol.x().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{:?}", x_i)?;
                }

                write!(f, "]")
            }

            SolverResult::Unbounded => write!(f, "unbounded"),

            SolverResult::MaxIter { obj } => {
                write!(f, "max iterations reached (objective {})", obj)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    Optimal,
    Unbounded,
    MaxIter,
}

#[derive(Debug, Clone)]
pub struct Solution {
    x: nalgebra::DVector<f64>,
    slack: nalgebra::DVector<f64>,
    obj: f64,
    basic_vars: Vec<usize>,
    nonbasic_vars: Vec<usize>,
    reduced_costs: nalgebra::DVector<f64>,
    iterations: u64,
}

impl Solution {
    pub(crate) fn new(tableau: Tableau, iterations: u64) -> Self {
        Self {
            x: tableau.x(),
            slack: tableau.slack(),
            obj: tableau.v,
            basic_vars: tableau.B,
            nonbasic_vars: tableau.N,
            reduced_costs: tableau.c,
            iterations,
        }
    }

    /// Values of the structural variables.
    #[inline]
    pub fn x(&self) -> &[f64] {
        self.x.as_slice()
    }

    /// Values of the slack variables, one per constraint.
    #[inline]
    pub fn slack(&self) -> &[f64] {
        self.slack.as_slice()
    }

    #[inline]
    pub fn obj(&self) -> f64 {
        self.obj
    }

    /// Global indices of the final basis, in row order.
    #[inline]
    pub fn basic_vars(&self) -> &[usize] {
        &self.basic_vars
    }

    #[inline]
    pub fn nonbasic_vars(&self) -> &[usize] {
        &self.nonbasic_vars
    }

    /// Final objective row, aligned with `nonbasic_vars`. All entries are `≤ tol`.
    #[inline]
    pub fn reduced_costs(&self) -> &[f64] {
        self.reduced_costs.as_slice()
    }

    /// Number of pivots performed.
    #[inline]
    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}
