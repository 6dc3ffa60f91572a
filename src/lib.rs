mod error;
mod primal;
pub mod problem;
pub mod solver;
mod util;

#[cfg(feature = "mps")]
mod parse_mps;

#[cfg(feature = "mps")]
pub use parse_mps::parse_mps;

pub use crate::error::SimplexError;
pub use crate::primal::primal_simplex_solver::PrimalSimplexSolver;
pub use crate::primal::tableau::{Step, Tableau};
pub use crate::problem::{Constraint, Problem, Variable, VariableId};
pub use crate::solver::{SimplexResult, Solution, SolutionStatus, SolverResult};
pub use crate::util::EPS;
