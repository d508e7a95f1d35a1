//! Property tests for binding, evaluation and differentiation.

use proptest::prelude::*;
use sym_ast::{Environment, Expression};

mod strategies;

use strategies::{approx_eq, arb_expr, arb_point};

fn env_at((x, y, z): (f64, f64, f64)) -> Environment {
    Environment::new().with("x", x).with("y", y).with("z", z)
}

fn value_at(e: &Expression, env: &Environment) -> f64 {
    e.bind_env(env)
        .evaluate_real()
        .expect("every variable is bound")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn derivative_wrt_absent_variable_is_zero(e in arb_expr(), p in arb_point()) {
        let d = e.derive("w").unwrap();
        prop_assert_eq!(value_at(&d, &env_at(p)), 0.0);
    }

    #[test]
    fn sum_rule(a in arb_expr(), b in arb_expr(), p in arb_point()) {
        let env = env_at(p);
        let lhs = (&a + &b).derive("x").unwrap();
        let rhs = value_at(&a.derive("x").unwrap(), &env) + value_at(&b.derive("x").unwrap(), &env);
        prop_assert!(approx_eq(value_at(&lhs, &env), rhs));
    }

    #[test]
    fn partial_binding_commutes(e in arb_expr(), p in arb_point()) {
        let (x, y, z) = p;
        let stepwise = e.bind("x", x).bind("y", y).bind("z", z).evaluate();
        let reversed = e.bind("z", z).bind("x", x).bind("y", y).evaluate();
        let at_once = e.bind_env(&env_at(p)).evaluate();
        prop_assert_eq!(stepwise, at_once);
        prop_assert_eq!(reversed, at_once);
    }

    #[test]
    fn bind_removes_exactly_the_bound_names(e in arb_expr(), x in -3.0f64..3.0) {
        let env = Environment::new().with("x", x);
        let mut expected = e.variables();
        expected.remove("x");
        prop_assert_eq!(e.bind_env(&env).variables(), expected);
    }

    #[test]
    fn constants_evaluate_to_themselves(re in -1e6f64..1e6, im in -1e6f64..1e6) {
        let c = Expression::complex(re, im);
        let value = c.evaluate().unwrap();
        prop_assert_eq!(value.re, re);
        prop_assert_eq!(value.im, im);
        prop_assert_eq!(c.derive("x").unwrap().evaluate_real(), Some(0.0));
    }

    #[test]
    fn binding_does_not_change_the_original(e in arb_expr(), p in arb_point()) {
        let before = e.to_string();
        let _ = e.bind_env(&env_at(p));
        let _ = e.derive("x").unwrap();
        prop_assert_eq!(e.to_string(), before);
    }
}
