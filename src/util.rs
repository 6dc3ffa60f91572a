/// Default tolerance for ratio ties and feasibility checks.
pub const EPS: f64 = 1e-9;

/// Relative size below which a pivot update `a - d` is taken to cancel exactly.
pub const CANCEL_TOL: f64 = 1e-12;

/// Column width of the iteration counter in the per-pivot log line.
pub const ITER_WIDTH: usize = 9;
