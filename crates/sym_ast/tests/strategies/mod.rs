use proptest::prelude::*;
use sym_ast::Expression;

/// Variables the generated expressions draw from.
pub const VARS: [&str; 3] = ["x", "y", "z"];

/// Smooth expressions over `x`, `y`, `z`: no `>=` outside a conditional and
/// no division by anything that can vanish.
pub fn arb_expr() -> impl Strategy<Value = Expression> {
    let leaf = prop_oneof![
        (-4i32..5).prop_map(|n| Expression::constant(n as f64)),
        prop::sample::select(VARS.to_vec()).prop_map(|name| Expression::var(name)),
    ];

    leaf.prop_recursive(
        3,  // levels deep
        32, // max size
        4,  // items per collection
        |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(l, r)| l + r),
                (inner.clone(), inner.clone()).prop_map(|(l, r)| l - r),
                (inner.clone(), inner.clone()).prop_map(|(l, r)| l * r),
                // Denominator is at least 1 for real inputs.
                (inner.clone(), inner.clone()).prop_map(|(l, r)| l / (&r * &r + 1.0)),
                (inner.clone(), prop::collection::vec(inner.clone(), 0..3))
                    .prop_map(|(head, rest)| Expression::sum(head, rest)),
                (inner.clone(), inner.clone(), inner.clone()).prop_map(|(c, a, b)| {
                    Expression::if_else(Expression::gte(c, Expression::zero()), a, b)
                }),
            ]
        },
    )
}

/// A point with every variable bound to a small real value.
pub fn arb_point() -> impl Strategy<Value = (f64, f64, f64)> {
    (-3.0f64..3.0, -3.0f64..3.0, -3.0f64..3.0)
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}
