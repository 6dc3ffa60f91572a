pub mod primal_simplex_solver;
pub mod tableau;
