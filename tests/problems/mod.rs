use tableau_simplex::*;

const EPS: f64 = 0.00000001;

pub fn assert_optimal(result: &SolverResult, expected_obj: f64, expected_x: &[f64]) {
    match result {
        SolverResult::Optimal(sol) => {
            assert!(
                (sol.obj() - expected_obj).abs() < EPS,
                "obj: {}, expected: {}",
                sol.obj(),
                expected_obj
            );

            let x = sol.x();

            assert_eq!(x.len(), expected_x.len());

            for (x1, x2) in x.iter().zip(expected_x) {
                assert!((x1 - x2).abs() < EPS, "x_i: {}, expected: {}", x1, x2);
            }
        }

        _ => panic!("not optimal: {:?}", result),
    }
}

pub fn assert_optimal_obj(result: &SolverResult, expected_obj: f64) {
    match result {
        SolverResult::Optimal(sol) => {
            assert!(
                (sol.obj() - expected_obj).abs() < EPS,
                "obj: {}, expected: {}",
                sol.obj(),
                expected_obj
            );
        }

        _ => panic!("not optimal: {:?}", result),
    }
}

pub fn assert_unbounded(result: &SolverResult) {
    match result {
        SolverResult::Unbounded => (),
        _ => panic!("not unbounded: {:?}", result),
    }
}

pub struct TestProblem {
    pub prob: Problem,
    pub check_result: Box<dyn FnOnce(&SolverResult)>,
}

impl TestProblem {
    fn new<F: FnOnce(&SolverResult) + 'static>(prob: Problem, check_result: F) -> Self {
        Self {
            prob,
            check_result: Box::new(check_result),
        }
    }
}

pub fn empty_problem() -> TestProblem {
    let prob = Problem::new();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(&result, 0., &[])
    })
}

pub fn one_variable_no_constraints() -> TestProblem {
    let mut prob = Problem::new();

    prob.add_var(-2., Some("x1".to_string())).unwrap();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(&result, 0., &[0.])
    })
}

pub fn one_variable_unbounded() -> TestProblem {
    let mut prob = Problem::new();

    prob.add_var(2., Some("x1".to_string())).unwrap();

    TestProblem::new(prob, |result: &SolverResult| assert_unbounded(&result))
}

pub fn two_variables_unbounded() -> TestProblem {
    let mut prob = Problem::new();

    let x1 = prob.add_var(2., Some("x1".to_string())).unwrap();
    let x2 = prob.add_var(1., Some("x2".to_string())).unwrap();

    prob.add_constraint(vec![(x1, 1.)], 4.).unwrap();
    prob.add_constraint(vec![(x1, 1.), (x2, -1.)], 3.).unwrap();

    TestProblem::new(prob, |result: &SolverResult| assert_unbounded(&result))
}

pub fn zero_rhs() -> TestProblem {
    let mut prob = Problem::new();

    let x = prob.add_var(1., Some("x".to_string())).unwrap();
    let y = prob.add_var(1., Some("y".to_string())).unwrap();

    prob.add_constraint(vec![(x, 1.), (y, 1.)], 0.).unwrap();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(&result, 0., &[0., 0.])
    })
}

pub fn constraint_without_coeffs() -> TestProblem {
    let mut prob = Problem::new();

    let x = prob.add_var(3., Some("x".to_string())).unwrap();

    prob.add_constraint(vec![], 1.).unwrap();
    prob.add_constraint(vec![(x, 2.)], 5.).unwrap();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(&result, 7.5, &[2.5])
    })
}

pub fn tiny_coeff_degenerate_row() -> TestProblem {
    let prob = Problem::from_dense(&[vec![1e-10]], &[0.], &[1.]).unwrap();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(&result, 0., &[0.])
    })
}

pub fn tiny_coeff_bounding_row() -> TestProblem {
    //1e-10·x ≤ 0 is the binding row, skipping it would give x = 1e9
    let prob = Problem::from_dense(&[vec![1e-10], vec![1.]], &[0., 1e9], &[1.]).unwrap();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(&result, 0., &[0.])
    })
}

pub fn tiny_profit() -> TestProblem {
    let prob = Problem::from_dense(&[vec![1.]], &[1.], &[1e-10]).unwrap();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(&result, 1e-10, &[1.])
    })
}

pub fn mixed_scale() -> TestProblem {
    let prob = Problem::from_dense(
        &[vec![1e-6, 1e3], vec![1e3, 1e-6]],
        &[1e3, 1e6],
        &[1., 1e-3],
    )
    .unwrap();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(&result, 1000.000999998, &[999.999999999, 0.999999])
    })
}

pub fn clrs_29_3() -> TestProblem {
    let prob = Problem::from_dense(
        &[vec![1., 1., 3.], vec![2., 2., 5.], vec![4., 1., 2.]],
        &[30., 24., 36.],
        &[3., 1., 2.],
    )
    .unwrap();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(&result, 28., &[8., 4., 0.])
    })
}

pub fn exercise_29_3_5() -> TestProblem {
    let prob = Problem::from_dense(
        &[vec![1., 1.], vec![1., 0.], vec![0., 1.]],
        &[20., 12., 16.],
        &[18., 12.5],
    )
    .unwrap();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(&result, 316., &[12., 8.])
    })
}

pub fn exercise_29_3_6() -> TestProblem {
    //x1 ≤ 1 follows from the second row, so this one has a finite optimum
    let prob = Problem::from_dense(&[vec![1., -1.], vec![2., 1.]], &[1., 2.], &[5., -3.]).unwrap();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(&result, 5., &[1., 0.])
    })
}

pub fn small_prob_2() -> TestProblem {
    let mut prob = Problem::new();

    let x = prob.add_var(5., Some("x".to_string())).unwrap();
    let y = prob.add_var(4., Some("y".to_string())).unwrap();

    prob.add_constraint(vec![(x, 1.)], 6.).unwrap();
    prob.add_constraint(vec![(x, 0.25), (y, 1.)], 6.).unwrap();
    prob.add_constraint(vec![(x, 3.), (y, 2.)], 22.).unwrap();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(&result, 40., &[4., 5.])
    })
}

pub fn small_prob_3() -> TestProblem {
    let mut prob = Problem::new();

    let x = prob.add_var(-3., Some("x".to_string())).unwrap();
    let y = prob.add_var(6., Some("y".to_string())).unwrap();

    prob.add_constraint(vec![(x, -1.), (y, -2.)], 1.).unwrap();
    prob.add_constraint(vec![(x, -2.), (y, -1.)], 0.).unwrap();
    prob.add_constraint(vec![(x, -1.), (y, 1.)], 1.).unwrap();
    prob.add_constraint(vec![(x, -1.), (y, 4.)], 13.).unwrap();
    prob.add_constraint(vec![(x, 4.), (y, -1.)], 23.).unwrap();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(&result, 15., &[3., 4.])
    })
}

pub fn small_prob_4() -> TestProblem {
    //NOTE: this problem has multiple optimal points, so we only test the objective value
    let mut prob = Problem::new();

    let x = prob.add_var(1., Some("x".to_string())).unwrap();
    let y = prob.add_var(1., Some("y".to_string())).unwrap();
    let z = prob.add_var(1., Some("z".to_string())).unwrap();

    prob.add_constraint(vec![(x, -1.), (y, 1.), (z, -1.)], 2.).unwrap();
    prob.add_constraint(vec![(x, 1.), (y, -1.), (z, -1.)], 3.).unwrap();
    prob.add_constraint(vec![(x, -1.), (y, -1.), (z, 1.)], 1.).unwrap();
    prob.add_constraint(vec![(x, 1.), (y, 1.), (z, 1.)], 4.).unwrap();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal_obj(&result, 4.);
    })
}

pub fn small_prob_unbounded_1() -> TestProblem {
    let mut prob = Problem::new();

    let x = prob.add_var(2., Some("x".to_string())).unwrap();
    let y = prob.add_var(3., Some("y".to_string())).unwrap();
    let z = prob.add_var(-1., Some("z".to_string())).unwrap();

    prob.add_constraint(vec![(x, -1.), (y, -1.), (z, -1.)], 3.).unwrap();
    prob.add_constraint(vec![(x, 1.), (y, -1.), (z, 1.)], 4.).unwrap();
    prob.add_constraint(vec![(x, -1.), (y, 1.), (z, 2.)], 1.).unwrap();

    TestProblem::new(prob, |result: &SolverResult| assert_unbounded(&result))
}

pub fn small_prob_unbounded_2() -> TestProblem {
    let mut prob = Problem::new();

    let x = prob.add_var(2., Some("x".to_string())).unwrap();
    let y = prob.add_var(3., Some("y".to_string())).unwrap();
    let z = prob.add_var(-1., Some("z".to_string())).unwrap();
    let w = prob.add_var(-1., Some("w".to_string())).unwrap();

    prob.add_constraint(vec![(y, -1.), (z, 2.), (w, 1.)], 4.).unwrap();
    prob.add_constraint(vec![(x, -2.), (y, 1.), (z, 1.), (w, -4.)], 5.)
        .unwrap();
    prob.add_constraint(vec![(x, 1.), (y, -1.), (w, 2.)], 3.).unwrap();

    TestProblem::new(prob, |result: &SolverResult| assert_unbounded(&result))
}

pub fn beale_cycle() -> TestProblem {
    //cycles forever under the largest-coefficient rule
    let mut prob = Problem::new();

    let x = prob.add_var(10., Some("x".to_string())).unwrap();
    let y = prob.add_var(-57., Some("y".to_string())).unwrap();
    let z = prob.add_var(-9., Some("z".to_string())).unwrap();
    let w = prob.add_var(-24., Some("w".to_string())).unwrap();

    prob.add_constraint(vec![(x, 0.5), (y, -5.5), (z, -2.5), (w, 9.)], 0.)
        .unwrap();

    prob.add_constraint(vec![(x, 0.5), (y, -1.5), (z, -0.5), (w, 1.)], 0.)
        .unwrap();

    prob.add_constraint(vec![(x, 1.)], 1.).unwrap();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(&result, 1., &[1., 0., 1., 0.])
    })
}

pub fn klee_minty_3() -> TestProblem {
    TestProblem::new(klee_minty(3), |result: &SolverResult| {
        assert_optimal(&result, 125., &[0., 0., 125.])
    })
}

/// `max Σ 2^(n-j) x_j` s.t. `2 Σ_{j<i} 2^(i-j) x_j + x_i ≤ 5^i`, the cube on
/// which the largest-coefficient rule visits every vertex.
pub fn klee_minty(n: usize) -> Problem {
    let mut prob = Problem::new();

    let vars: Vec<_> = (1..=n)
        .map(|j| prob.add_var(2f64.powi((n - j) as i32), None).unwrap())
        .collect();

    for i in 1..=n {
        let mut coeffs: Vec<_> = (1..i)
            .map(|j| (vars[j - 1], 2f64.powi((i - j + 1) as i32)))
            .collect();

        coeffs.push((vars[i - 1], 1.));
        prob.add_constraint(coeffs, 5f64.powi(i as i32)).unwrap();
    }

    prob
}
