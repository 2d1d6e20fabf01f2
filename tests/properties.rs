//! Property-based tests for membership, combinators, aggregation and
//! defuzzification.

use fuzzy_mamdani::{
    ControlSystem, DefuzzificationOp, Inputs, MamdaniInference, MembershipFunction, Rule, Rules, Simulation, Terms,
    Universe, Variable, Variables,
};
use proptest::prelude::*;

/// Ordered triangle breakpoints, including degenerate edges.
fn triangle_strategy() -> impl Strategy<Value = (f64, f64, f64)> {
    (-100.0..100.0f64, 0.0..50.0f64, 0.0..50.0f64, 0..4u8).prop_map(|(a, left, right, degenerate)| {
        let left = if degenerate & 1 == 1 { 0. } else { left };
        let right = if degenerate & 2 == 2 { 0. } else { right };

        (a, a + left, a + left + right)
    })
}

type Var = Variable<&'static str>;

fn two_term_system() -> (ControlSystem<&'static str>, Var, Var, Var) {
    let mut terms = Terms::new();
    terms.trimf("low", 0., 0., 6.);
    terms.trimf("high", 4., 10., 10.);

    let mut vars = Variables::<&str>::new();
    let a = vars.add_antecedent("a", 0. ..=10., terms.clone(), Some(0.25)).unwrap();
    let b = vars.add_antecedent("b", 0. ..=10., terms.clone(), Some(0.25)).unwrap();
    let out = vars.add_consequent("out", 0. ..=10., terms, Some(0.25)).unwrap();

    let mut rules = Rules::new();
    rules.add(a.is("low").and(b.is("high")), out.is("low"));
    rules.push(Rule::new(a.is("high").or(!b.is("low"))).then(out.is("high"), 0.75));

    (ControlSystem::new(vars, rules).unwrap(), a, b, out)
}

proptest! {
    #[test]
    fn triangular_degree_is_bounded((a, b, c) in triangle_strategy(), x in -200.0..200.0f64) {
        let mf = MembershipFunction::triangular(a, b, c);
        let degree = mf.degree(x);

        prop_assert!((0. ..=1.).contains(&degree));
        prop_assert_eq!(mf.degree(b), 1.);
        if a != b {
            prop_assert_eq!(mf.degree(a), 0.);
        }
        if b != c {
            prop_assert_eq!(mf.degree(c), 0.);
        }
        if x < a || x > c {
            prop_assert_eq!(degree, 0.);
        }
    }

    #[test]
    fn combinators_are_min_max_complement(x in 0.0..=10.0f64, y in 0.0..=10.0f64) {
        let (system, a, b, _) = two_term_system();
        let vars = system.variables();
        let model = MamdaniInference::default();
        let mut inputs = Inputs::new();
        inputs.add(a, x);
        inputs.add(b, y);

        let fa = model.fire(vars, &a.is("low"), &inputs).unwrap();
        let fb = model.fire(vars, &b.is("high"), &inputs).unwrap();

        prop_assert_eq!(model.fire(vars, &a.is("low").and(b.is("high")), &inputs).unwrap(), fa.min(fb));
        prop_assert_eq!(model.fire(vars, &a.is("low").or(b.is("high")), &inputs).unwrap(), fa.max(fb));
        prop_assert_eq!(model.fire(vars, &!a.is("low"), &inputs).unwrap(), 1. - fa);
    }

    #[test]
    fn aggregation_dominates_each_rule(x in 0.0..=10.0f64, y in 0.0..=10.0f64) {
        let (system, a, b, out) = two_term_system();
        let mut inputs = Inputs::new();
        inputs.add(a, x);
        inputs.add(b, y);

        let sets = MamdaniInference::default().infer(&system, &inputs).unwrap();
        let aggregated = &sets.aggregated[&out.key()];
        let out_def = system.variable(out.key()).unwrap();

        for (rule, strength) in system.rules().iter().zip(&sets.firing_strengths) {
            for (_, label, weight) in rule.targets() {
                let membership = out_def.term(label).unwrap().membership();

                for (agg, m) in aggregated.iter().zip(membership) {
                    prop_assert!(*agg >= m.min(strength * weight));
                }
            }
        }
    }

    #[test]
    fn compute_is_deterministic(x in 0.0..=10.0f64, y in 0.0..=10.0f64) {
        let (system, a, b, out) = two_term_system();
        let mut sim = Simulation::new(&system);

        sim.set_input(a, x).unwrap();
        sim.set_input(b, y).unwrap();

        let first = sim.compute().map(|outputs| outputs.get(out));
        let second = sim.compute().map(|outputs| outputs.get(out));

        prop_assert_eq!(first, second);
    }

    #[test]
    fn symmetric_triangle_centroid_is_peak(b in -100.0..100.0f64, half in 0.5..50.0f64, intervals in 1..200usize) {
        let n = intervals * 2;
        let universe = Universe::new("u", (b - half)..=(b + half), 2. * half / n as f64).unwrap();
        let mf = MembershipFunction::triangular(b - half, b, b + half);
        let membership: Vec<f64> = universe.points().iter().map(|&u| mf.degree(u)).collect();
        let centroid = DefuzzificationOp::Centroid.call(universe.points(), &membership).unwrap();

        prop_assert_eq!(universe.len(), n + 1);
        prop_assert!((centroid - b).abs() <= 1e-9 * b.abs().max(half));
    }
}
