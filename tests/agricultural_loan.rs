//! Agricultural loan risk scoring: fourteen applicant attributes rated
//! against a small rule base producing a risk score on [0, 10].

use std::collections::HashMap;

use approx::assert_relative_eq;
use fuzzy_mamdani::{
    ControlSystem, Expr, FuzzyError, OutOfRangePolicy, Rules, Simulation, SimulationConfig, Terms, Variable, Variables,
};

type Var = Variable<&'static str>;

fn terms(shapes: &[(&'static str, [f64; 3])]) -> Terms<&'static str> {
    let mut terms = Terms::new();

    for &(label, [a, b, c]) in shapes {
        terms.trimf(label, a, b, c);
    }

    terms
}

fn credit_risk() -> (ControlSystem<&'static str>, Var) {
    const POOR_AVERAGE_GOOD: [(&str, [f64; 3]); 3] = [
        ("poor", [0., 0., 50.]),
        ("average", [30., 50., 70.]),
        ("good", [60., 100., 100.]),
    ];

    let mut vars = Variables::<&str>::new();
    let mut input = |name: &'static str, range: std::ops::RangeInclusive<f64>, step: f64, shapes: &[(&'static str, [f64; 3])]| {
        vars.add_antecedent(name, range, terms(shapes), Some(step)).unwrap()
    };

    let age = input("age", 18. ..=80., 1., &[
        ("young", [18., 18., 40.]),
        ("middle_aged", [32., 50., 65.]),
        ("old", [50., 80., 80.]),
    ]);
    // 0 = rabi (most profitable), 1 = kharif, 2 = zaid
    let crop_season = input("crop_season", 0. ..=2., 1., &[
        ("low", [1., 2., 2.]),
        ("medium", [0., 1., 1.]),
        ("high", [0., 0., 0.]),
    ]);
    let guarantor = input("guarantor", 0. ..=1., 1., &[("no", [0., 0., 1.]), ("yes", [1., 1., 1.])]);
    let financial_records = input("financial_records", 0. ..=100., 1., &[
        ("poor", [0., 0., 50.]),
        ("average", [35., 50., 70.]),
        ("good", [60., 100., 100.]),
    ]);
    let farming_history = input("farming_history", 0. ..=100., 1., &POOR_AVERAGE_GOOD);
    let bank_statements = input("bank_statements", 0. ..=100., 1., &POOR_AVERAGE_GOOD);
    let cost_per_acre = input("cost_per_acre", 0. ..=100., 1., &[
        ("low", [0., 0., 50.]),
        ("medium", [30., 50., 70.]),
        ("high", [60., 100., 100.]),
    ]);
    // 0 = direct, 1 = middleman, 2 = processor
    let market = input("market", 0. ..=2., 1., &[
        ("direct", [0., 0., 1.]),
        ("middleman", [1., 1., 2.]),
        ("processor", [2., 2., 2.]),
    ]);
    let land_acreage = input("land_acreage", 0. ..=6., 1., &[
        ("small", [0., 1., 2.]),
        ("medium", [1., 3., 4.]),
        ("large", [4., 6., 6.]),
    ]);
    let rainfall = input("rainfall", 0. ..=500., 1., &[
        ("low", [0., 0., 200.]),
        ("medium", [150., 300., 450.]),
        ("high", [400., 500., 500.]),
    ]);
    let temperature = input("temperature", 0. ..=50., 1., &[
        ("low", [0., 0., 20.]),
        ("medium", [15., 25., 35.]),
        ("high", [30., 50., 50.]),
    ]);
    let income_source = input("income_source", 0. ..=100., 1., &[
        ("unstable", [0., 0., 50.]),
        ("stable", [30., 50., 100.]),
    ]);
    let annual_expenditure = input("annual_expenditure", 0. ..=1_000_000., 1_000., &[
        ("low", [0., 0., 300_000.]),
        ("medium", [250_000., 500_000., 700_000.]),
        ("high", [600_000., 1_000_000., 1_000_000.]),
    ]);
    let insurance = input("insurance", 0. ..=1., 1., &[("no", [0., 0., 1.]), ("yes", [1., 1., 1.])]);

    let risk = vars
        .add_consequent(
            "risk",
            0. ..=10.,
            terms(&[("low", [0., 0., 4.]), ("medium", [3., 5., 7.]), ("high", [6., 10., 10.])]),
            Some(0.1),
        )
        .unwrap();

    let mut rules = Rules::with_capacity(14);

    rules.add(
        Expr::all([
            age.is("young"),
            crop_season.is("high"),
            guarantor.is("yes"),
            financial_records.is("good"),
            farming_history.is("good"),
            bank_statements.is("good"),
            market.is("processor"),
        ]),
        risk.is("low"),
    );
    rules.add(
        Expr::all([
            age.is("old"),
            crop_season.is("low"),
            guarantor.is("no"),
            financial_records.is("poor"),
        ]),
        risk.is("high"),
    );
    rules.add(
        Expr::all([
            age.is("middle_aged"),
            crop_season.is("medium"),
            financial_records.is("average"),
            market.is("middleman"),
            rainfall.is("medium"),
        ]),
        risk.is("medium"),
    );
    rules.add(
        age.is("young").and2(cost_per_acre.is("high"), financial_records.is("good")),
        risk.is("medium"),
    );
    rules.add(
        age.is("old").and2(rainfall.is("low"), annual_expenditure.is("high")),
        risk.is("high"),
    );
    rules.add(
        age.is("middle_aged").and2(income_source.is("stable"), insurance.is("yes")),
        risk.is("low"),
    );
    rules.add(land_acreage.is("large").and(financial_records.is("poor")), risk.is("high"));
    rules.add(
        financial_records
            .is("average")
            .and2(farming_history.is("average"), rainfall.is("medium")),
        risk.is("medium"),
    );
    rules.add(
        guarantor.is("yes").and2(bank_statements.is("poor"), cost_per_acre.is("high")),
        risk.is("high"),
    );
    rules.add(
        age.is("young").and2(temperature.is("medium"), land_acreage.is("large")),
        risk.is("medium"),
    );
    rules.add(
        market.is("direct").and2(rainfall.is("medium"), annual_expenditure.is("high")),
        risk.is("medium"),
    );
    rules.add(
        financial_records
            .is("poor")
            .and2(farming_history.is("good"), cost_per_acre.is("low")),
        risk.is("medium"),
    );
    rules.add(
        age.is("old").and2(insurance.is("no"), cost_per_acre.is("low")),
        risk.is("high"),
    );
    rules.add(
        age.is("middle_aged").and2(bank_statements.is("good"), market.is("direct")),
        risk.is("low"),
    );

    (ControlSystem::new(vars, rules).unwrap(), risk)
}

fn farmer() -> HashMap<&'static str, f64> {
    HashMap::from([
        ("age", 30.),
        ("crop_season", 0.),
        ("guarantor", 1.),
        ("financial_records", 80.),
        ("farming_history", 90.),
        ("bank_statements", 85.),
        ("cost_per_acre", 40.),
        ("market", 2.),
        ("land_acreage", 5.),
        ("rainfall", 300.),
        ("temperature", 25.),
        ("income_source", 70.),
        ("annual_expenditure", 400_000.),
        ("insurance", 1.),
    ])
}

fn assess(sim: &mut Simulation<'_, &'static str>, data: &HashMap<&'static str, f64>) -> Result<f64, FuzzyError> {
    for (name, value) in data {
        sim.set_input_named(name, *value)?;
    }

    sim.compute()?;

    Ok(sim.output_named("risk").expect("risk is written by the rules"))
}

#[test]
fn young_well_documented_farmer() {
    let (system, risk) = credit_risk();
    let mut sim = Simulation::new(&system);

    let score = assess(&mut sim, &farmer()).unwrap();

    // Only the "young with good records selling to a processor" and the
    // "young with large land in medium temperature" rules fire, both at 10/22
    let strengths = sim.outputs().unwrap().firing_strengths();
    let fired: Vec<usize> = (0..strengths.len()).filter(|&i| strengths[i] > 0.).collect();

    assert_eq!(fired, vec![0, 9]);
    assert_relative_eq!(strengths[0], 10. / 22.);
    assert_relative_eq!(strengths[9], 10. / 22.);
    assert_relative_eq!(score, 3.2628037692180563, epsilon = 1e-9);
    assert_eq!(sim.output(risk), Some(score));
}

#[test]
fn acreage_outside_universe_is_rejected() {
    let (system, _) = credit_risk();
    let mut sim = Simulation::new(&system);
    let mut data = farmer();

    data.insert("land_acreage", 25.);

    assert_eq!(
        assess(&mut sim, &data).unwrap_err(),
        FuzzyError::InputOutOfRange {
            variable: "land_acreage".into(),
            value: 25.,
            min: 0.,
            max: 6.,
        }
    );
}

#[test]
fn acreage_outside_universe_can_be_clamped() {
    let (system, _) = credit_risk();
    let config = SimulationConfig::default().with_out_of_range(OutOfRangePolicy::Clamp);
    let mut clamped = Simulation::with_config(&system, config);
    let mut data = farmer();

    data.insert("land_acreage", 25.);

    let clamped_score = assess(&mut clamped, &data).unwrap();
    let reference = assess(&mut Simulation::new(&system), &farmer()).unwrap();

    // Large acreage saturates at 6, which leaves the firing strengths unchanged
    assert_eq!(clamped_score, reference);
}

#[test]
fn renamed_attribute_is_unknown() {
    let (system, _) = credit_risk();
    let mut sim = Simulation::new(&system);
    let mut data = farmer();

    data.remove("cost_per_acre");
    data.insert("inputs_required", 40.);

    let errors: Vec<FuzzyError> = data
        .iter()
        .filter_map(|(name, value)| sim.set_input_named(name, *value).err())
        .collect();

    assert_eq!(
        errors,
        vec![FuzzyError::UnknownVariable {
            name: "inputs_required".into(),
        }]
    );

    // The remaining inputs were accepted; the cost is still missing
    assert_eq!(
        sim.compute().unwrap_err(),
        FuzzyError::MissingInput {
            variable: "cost_per_acre".into(),
        }
    );
}
