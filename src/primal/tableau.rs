#![allow(non_snake_case)]

use crate::problem::Problem;
use crate::util::CANCEL_TOL;

use log::trace;

/// Outcome of a single iteration of the optimality loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `entering` became basic and `leaving` became nonbasic (global indices).
    Pivoted { entering: usize, leaving: usize },
    Optimal,
    /// No row bounds the increase of `entering` (global index).
    Unbounded { entering: usize },
}

/// Dictionary form of a standard-form LP.
///
/// Global variable indices `0..n` are the structural variables and `n..n + m`
/// are the slacks. Column `j` of the tableau holds nonbasic variable `N[j]`,
/// row `i` holds basic variable `B[i]`, and each row reads
/// `x_B[i] = b[i] - Σ_j A[i][j]·x_N[j]`. The objective is `v + Σ_j c[j]·x_N[j]`.
#[derive(Debug, Clone)]
pub struct Tableau {
    pub(crate) N: Vec<usize>,
    pub(crate) B: Vec<usize>,
    pub(crate) A: nalgebra::DMatrix<f64>,
    pub(crate) b: nalgebra::DVector<f64>,
    pub(crate) c: nalgebra::DVector<f64>,
    pub(crate) v: f64,
}

impl std::convert::From<&Problem> for Tableau {
    fn from(prob: &Problem) -> Self {
        let (A, b, c) = prob.to_dense();
        let n = A.ncols();
        let m = A.nrows();

        Tableau {
            N: (0..n).collect(),
            B: (n..n + m).collect(),
            A,
            b,
            c,
            v: 0.,
        }
    }
}

impl Tableau {
    /// Number of basic variables, one per constraint.
    #[inline]
    pub fn rows(&self) -> usize {
        self.A.nrows()
    }

    /// Number of nonbasic variables.
    #[inline]
    pub fn cols(&self) -> usize {
        self.A.ncols()
    }

    /// Objective value at the current basic solution.
    #[inline]
    pub fn obj(&self) -> f64 {
        self.v
    }

    #[inline]
    pub fn basic_vars(&self) -> &[usize] {
        &self.B
    }

    #[inline]
    pub fn nonbasic_vars(&self) -> &[usize] {
        &self.N
    }

    #[inline]
    pub fn rhs(&self) -> &nalgebra::DVector<f64> {
        &self.b
    }

    #[inline]
    pub fn reduced_costs(&self) -> &nalgebra::DVector<f64> {
        &self.c
    }

    /// Values of the structural variables at the current basic solution.
    pub fn x(&self) -> nalgebra::DVector<f64> {
        let n = self.cols();
        let mut x = nalgebra::DVector::zeros(n);

        for (&B_i, &b_i) in self.B.iter().zip(self.b.iter()) {
            if B_i < n {
                x[B_i] = b_i;
            }
        }

        x
    }

    /// Values of the slack variables at the current basic solution.
    pub fn slack(&self) -> nalgebra::DVector<f64> {
        let n = self.cols();
        let mut s = nalgebra::DVector::zeros(self.rows());

        for (&B_i, &b_i) in self.B.iter().zip(self.b.iter()) {
            if B_i >= n {
                s[B_i - n] = b_i;
            }
        }

        s
    }

    /// True iff every global index in `0..n + m` is in exactly one of `N` and `B`.
    pub fn is_partition(&self) -> bool {
        let total = self.cols() + self.rows();

        if self.N.len() != self.cols() || self.B.len() != self.rows() {
            return false;
        }

        let mut seen = vec![false; total];

        for &i in self.N.iter().chain(self.B.iter()) {
            match seen.get_mut(i) {
                Some(s) if !*s => *s = true,
                _ => return false,
            }
        }

        true
    }

    /// True iff the current basic solution is primal feasible, `b ≥ -tol`.
    pub fn is_feasible(&self, tol: f64) -> bool {
        self.b.iter().all(|&b_i| b_i >= -tol)
    }

    /// Column of the entering variable, or `None` at optimality.
    ///
    /// Among columns with a positive reduced cost, picks the one holding the
    /// smallest global variable index (Bland's rule), not the smallest column.
    pub fn entering_index(&self) -> Option<usize> {
        self.c
            .iter()
            .enumerate()
            .filter(|(_j, &c_j)| c_j > 0.)
            .min_by_key(|(j, _c_j)| self.N[*j])
            .map(|(j, _c_j)| j)
    }

    /// Row of the leaving variable for entering column `e`, or `None` if no
    /// row bounds the increase of the entering variable.
    ///
    /// Only rows with a positive entry in column `e` bound the increase. Rows
    /// whose ratio is within `tol · max(1, min_ratio)` of the minimum are
    /// treated as tied, and the tie goes to the smallest basic global index.
    pub fn leaving_index(&self, e: usize, tol: f64) -> Option<usize> {
        let ratios: Vec<(usize, f64)> = self
            .A
            .column(e)
            .iter()
            .zip(self.b.iter())
            .enumerate()
            .filter(|(_i, (&A_ie, _b_i))| A_ie > 0.)
            .map(|(i, (&A_ie, &b_i))| (i, b_i / A_ie))
            .collect();

        let min_ratio = ratios
            .iter()
            .map(|&(_i, ratio)| ratio)
            .fold(f64::INFINITY, f64::min);

        if min_ratio.is_infinite() {
            return None;
        }

        let tie_tol = tol * min_ratio.abs().max(1.);

        ratios
            .into_iter()
            .filter(|&(_i, ratio)| ratio - min_ratio <= tie_tol)
            .min_by_key(|&(i, _ratio)| self.B[i])
            .map(|(i, _ratio)| i)
    }

    /// Exchanges the basic variable of row `l` with the nonbasic variable of
    /// column `e`, rewriting the tableau in place.
    ///
    /// An update `a - d` that cancels to within `CANCEL_TOL` of its operands is
    /// stored as an exact zero, so rounding residue never looks like a positive
    /// reduced cost or pivot element later on.
    pub fn pivot(&mut self, l: usize, e: usize) {
        let n = self.cols();
        let m = self.rows();
        let A_le = self.A[(l, e)];

        //row l is finalized first, every other row is updated from it
        self.b[l] /= A_le;

        for j in 0..n {
            if j != e {
                self.A[(l, j)] /= A_le;
            }
        }

        self.A[(l, e)] = 1. / A_le;

        let b_l = self.b[l];

        for i in 0..m {
            if i == l {
                continue;
            }

            let A_ie = self.A[(i, e)];
            self.b[i] = cancel(self.b[i], A_ie * b_l);

            for j in 0..n {
                if j != e {
                    let A_lj = self.A[(l, j)];
                    self.A[(i, j)] = cancel(self.A[(i, j)], A_ie * A_lj);
                }
            }

            self.A[(i, e)] = -A_ie * self.A[(l, e)];
        }

        let c_e = self.c[e];
        self.v += b_l * c_e;

        for j in 0..n {
            if j != e {
                self.c[j] = cancel(self.c[j], c_e * self.A[(l, j)]);
            }
        }

        self.c[e] = -c_e * self.A[(l, e)];

        std::mem::swap(&mut self.N[e], &mut self.B[l]);
    }

    /// Runs one iteration of the optimality loop.
    pub fn step(&mut self, tol: f64) -> Step {
        let e = match self.entering_index() {
            Some(e) => e,
            None => return Step::Optimal,
        };

        let entering = self.N[e];

        let l = match self.leaving_index(e, tol) {
            Some(l) => l,
            None => return Step::Unbounded { entering },
        };

        let leaving = self.B[l];
        self.pivot(l, e);

        trace!("A: {}", self.A);
        trace!("b: {}", self.b);
        trace!("c: {}", self.c);

        Step::Pivoted { entering, leaving }
    }
}

/// `a - d`, or zero when the difference is rounding noise relative to `a` and `d`.
#[inline]
fn cancel(a: f64, d: f64) -> f64 {
    let diff = a - d;

    if diff.abs() <= CANCEL_TOL * a.abs().max(d.abs()) {
        0.
    } else {
        diff
    }
}
