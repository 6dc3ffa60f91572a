use crate::error::SimplexError;
use crate::util::EPS;

use std::collections::{HashMap, HashSet};

const LTE_STR: &str = "\u{2264}";
const GTE_STR: &str = "\u{2265}";

/// A linear program in standard form: maximize `cᵀx` subject to `Ax ≤ b`, `x ≥ 0`.
///
/// Every right-hand side is nonnegative, so the all-slack basis is a basic
/// feasible solution and no feasibility phase is needed.
#[derive(Debug, Clone, Default)]
pub struct Problem {
    pub variables: Vec<Variable>,
    pub constraints: Vec<Constraint>,
    var_names: HashSet<String>, //these strings are duplicated in the variables
}

impl Problem {
    pub fn new() -> Self {
        Default::default()
    }

    /// Builds a problem from a dense `m × n` matrix `A`, right-hand sides `b`
    /// (length `m`) and objective coefficients `c` (length `n`).
    #[allow(non_snake_case)]
    pub fn from_dense(A: &[Vec<f64>], b: &[f64], c: &[f64]) -> Result<Self, SimplexError> {
        if A.len() != b.len() {
            return Err(SimplexError::new(format!(
                "A has {} rows but b has {} entries",
                A.len(),
                b.len()
            )));
        }

        let mut prob = Problem::new();

        let ids = c
            .iter()
            .map(|&c_j| prob.add_var(c_j, None))
            .collect::<Result<Vec<_>, _>>()?;

        for (i, (row, &b_i)) in A.iter().zip(b).enumerate() {
            if row.len() != c.len() {
                return Err(SimplexError::new(format!(
                    "row {} of A has {} entries, expected {}",
                    i,
                    row.len(),
                    c.len()
                )));
            }

            let coeffs = ids.iter().copied().zip(row.iter().copied()).collect();
            prob.add_constraint(coeffs, b_i)?;
        }

        Ok(prob)
    }

    pub fn add_var(
        &mut self,
        obj_coeff: f64,
        name: Option<String>,
    ) -> Result<VariableId, SimplexError> {
        if !obj_coeff.is_finite() {
            return Err(SimplexError::new(format!(
                "invalid objective coefficient: {}",
                obj_coeff
            )));
        }

        if let Some(name) = &name {
            if !self.var_names.insert(name.clone()) {
                return Err(SimplexError::new(format!(
                    "variable names must be unique, {} was added twice",
                    name
                )));
            }
        }

        let id = VariableId(self.variables.len());
        self.variables.push(Variable::new(id, obj_coeff, name));
        Ok(id)
    }

    /// Adds the constraint `Σ coeff·x ≤ rhs`.
    ///
    /// `rhs` must be nonnegative: the solver starts from the all-slack basis
    /// and has no way to recover from an infeasible start.
    pub fn add_constraint(
        &mut self,
        coeffs: Vec<(VariableId, f64)>,
        rhs: f64,
    ) -> Result<(), SimplexError> {
        if let Some((invalid_var, _coeff)) = coeffs
            .iter()
            .find(|(id, _coeff)| id.0 >= self.variables.len())
        {
            return Err(SimplexError::new(format!("{:?} is invalid", invalid_var)));
        }

        if let Some((var, coeff)) = coeffs.iter().find(|(_id, coeff)| !coeff.is_finite()) {
            return Err(SimplexError::new(format!(
                "invalid coefficient for {:?}: {}",
                var, coeff
            )));
        }

        if !rhs.is_finite() || rhs < 0. {
            return Err(SimplexError::new(format!(
                "invalid rhs {}, the all-slack basis requires a finite rhs {} 0",
                rhs, GTE_STR
            )));
        }

        self.constraints.push(Constraint { coeffs, rhs });
        Ok(())
    }

    pub fn vars(&self) -> &[Variable] {
        self.variables.as_slice()
    }

    pub fn constraints(&self) -> &[Constraint] {
        self.constraints.as_slice()
    }

    /// Dense copies of `A`, `b` and `c`.
    #[allow(non_snake_case)]
    pub fn to_dense(
        &self,
    ) -> (
        nalgebra::DMatrix<f64>,
        nalgebra::DVector<f64>,
        nalgebra::DVector<f64>,
    ) {
        let n = self.variables.len();
        let m = self.constraints.len();

        let mut A = nalgebra::DMatrix::zeros(m, n);
        let mut b = nalgebra::DVector::zeros(m);
        let c = nalgebra::DVector::from_iterator(n, self.variables.iter().map(|v| v.obj_coeff));

        for (i, constraint) in self.constraints.iter().enumerate() {
            b[i] = constraint.rhs;

            for (id, coeff) in &constraint.coeffs {
                let j: usize = id.into();
                A[(i, j)] += *coeff;
            }
        }

        (A, b, c)
    }

    pub fn obj(&self, x: &[f64]) -> f64 {
        self.variables
            .iter()
            .zip(x)
            .map(|(var, x_i)| var.obj_coeff * x_i)
            .sum()
    }

    pub fn is_feasible(&self, x: &[f64]) -> bool {
        if x.len() != self.variables.len() {
            return false;
        }

        if x.iter().any(|&x_i| x_i < -EPS) {
            return false;
        }

        self.constraints
            .iter()
            .all(|constraint| constraint.is_feasible(x))
    }
}

#[derive(Debug, Clone)]
pub struct Variable {
    pub id: VariableId,
    pub obj_coeff: f64,
    pub name: Option<String>,
}

impl Variable {
    fn new(id: VariableId, obj_coeff: f64, name: Option<String>) -> Self {
        Self {
            id,
            obj_coeff,
            name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Constraint {
    pub coeffs: Vec<(VariableId, f64)>,
    pub rhs: f64,
}

impl Constraint {
    fn lhs(&self, x: &[f64]) -> f64 {
        self.coeffs
            .iter()
            .map(|(var, coeff)| {
                let i: usize = var.into();
                coeff * x[i]
            })
            .sum()
    }

    fn is_feasible(&self, x: &[f64]) -> bool {
        self.lhs(x) <= self.rhs + EPS
    }

    fn display(
        &self,
        f: &mut std::fmt::Formatter,
        var_names: &HashMap<VariableId, &Variable>,
    ) -> std::fmt::Result {
        for (var_id, coeff) in &self.coeffs {
            if *coeff == 0. {
                continue;
            }

            match var_names.get(var_id) {
                Some(var) => write!(
                    f,
                    "{} {} {} ",
                    if *coeff >= 0. { "+" } else { "-" },
                    coeff.abs(),
                    var
                )?,
                None => return Err(std::fmt::Error),
            }
        }

        write!(f, "{} {}", LTE_STR, self.rhs)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(usize);

impl std::convert::From<usize> for VariableId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl std::convert::From<VariableId> for usize {
    fn from(id: VariableId) -> Self {
        id.0
    }
}

impl std::convert::From<&VariableId> for usize {
    fn from(id: &VariableId) -> Self {
        id.0
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "maximize")?;
        let mut var_id_to_var: HashMap<VariableId, &Variable> = HashMap::new();

        for var in &self.variables {
            var_id_to_var.insert(var.id, var);

            if var.obj_coeff == 0. {
                continue;
            }

            write!(
                f,
                "{} {} {} ",
                if var.obj_coeff > 0. { "+" } else { "-" },
                var.obj_coeff.abs(),
                var
            )?;
        }

        writeln!(f, "\n\nsubject to")?;

        for constraint in &self.constraints {
            constraint.display(f, &var_id_to_var)?;
            writeln!(f)?;
        }

        writeln!(f, "\nwith all variables {} 0", GTE_STR)
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "x[{}]", self.id.0),
        }
    }
}
