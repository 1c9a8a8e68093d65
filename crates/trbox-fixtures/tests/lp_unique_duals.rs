#![allow(clippy::float_cmp)]

use std::collections::BTreeSet;

use trbox_core::suffix::{DUAL, LOWER_REDUCED_COST, SLACK, SuffixDirection, UPPER_REDUCED_COST};
use trbox_core::{ComponentRef, Sense};
use trbox_fixtures::{
    ExpectedResults, FixtureConfig, FixtureError, LpUniqueDuals, TestModel, model_by_name,
    registered_models, solution_from_results,
};

fn bundled_results() -> ExpectedResults {
    LpUniqueDuals::new()
        .expected_results(&FixtureConfig::new())
        .unwrap()
}

#[test]
fn metadata() {
    let fixture = LpUniqueDuals::new();
    assert_eq!(fixture.description(), "LP_unique_duals");
    assert_eq!(fixture.capabilities(), BTreeSet::from(["linear"]));
    assert_eq!(fixture.results_file(), "LP_unique_duals.json");
    assert!(fixture.model().is_none());
}

#[test]
fn generated_structure() {
    let mut fixture = LpUniqueDuals::new();
    let model = fixture.generate_model().unwrap();

    assert_eq!(model.name(), Some("LP_unique_duals"));
    assert_eq!(model.num_variables(), 14);
    assert_eq!(model.num_constraints(), 7);
    assert_eq!(model.objective().sense, Some(Sense::Minimize));
    assert_eq!(model.get_objective_name(), Some("cost"));
    for (_, variable) in model.variables() {
        assert_eq!(variable.bounds.lower, 0.0);
        assert!(variable.value.is_none());
    }

    let row4 = model.get_constraint_by_name("primalcon[4]").unwrap();
    let constraint = model.get_constraint(row4).unwrap();
    assert_eq!(constraint.bounds.lower, 3.5);
    assert!(constraint.bounds.upper.is_infinite());

    // y never appears in the objective or a constraint.
    let y: BTreeSet<_> = fixture.y().iter().copied().collect();
    let model = fixture.model().unwrap();
    for (_, constraint) in model.constraints() {
        assert!(constraint.body.variables().iter().all(|id| !y.contains(id)));
    }
    assert!(model.objective().expr.variables().iter().all(|id| !y.contains(id)));
}

#[test]
fn suffix_directions() {
    let mut fixture = LpUniqueDuals::new();
    let model = fixture.generate_model().unwrap();
    for name in [SLACK, UPPER_REDUCED_COST, LOWER_REDUCED_COST] {
        assert_eq!(model.suffix(name).unwrap().direction(), SuffixDirection::Import);
    }
    assert_eq!(model.suffix(DUAL).unwrap().direction(), SuffixDirection::Local);
    assert_eq!(model.suffix_names().count(), 5);
}

#[test]
fn bundled_solution_validates() {
    let mut fixture = LpUniqueDuals::new();
    fixture.generate_model().unwrap();
    let expected = bundled_results();

    let model = fixture.model_mut().unwrap();
    let solution = solution_from_results(model, &expected).unwrap();
    assert_eq!(solution.objective_value, Some(20.0));
    model.load_solution(&solution).unwrap();

    fixture.validate_current_solution(&expected, 1e-6).unwrap();

    let model = fixture.model().unwrap();
    let row4 = model.get_constraint_by_name("primalcon[4]").unwrap();
    assert_eq!(model.constraint_body_value(row4).unwrap(), 4.0);
    assert_eq!(
        model.suffix(SLACK).unwrap().get(ComponentRef::Constraint(row4)),
        Some(0.5)
    );
}

#[test]
fn bundled_solution_is_optimal() {
    let expected = bundled_results();
    let value = |name: &str, field: fn(&trbox_fixtures::ExpectedEntry) -> Option<f64>| {
        expected.get(name).and_then(field).unwrap()
    };

    let x: Vec<f64> = (1..=7).map(|j| value(&format!("x[{j}]"), |e| e.value)).collect();
    let duals: Vec<f64> = (1..=7)
        .map(|i| value(&format!("primalcon[{i}]"), |e| e.dual))
        .collect();

    let mut objective = 0.0;
    for j in 1..=7 {
        objective += LpUniqueDuals::cost(j) * x[j - 1];
        let reduced = LpUniqueDuals::cost(j)
            - (1..=7)
                .map(|i| LpUniqueDuals::coefficient(i, j) * duals[i - 1])
                .sum::<f64>();
        assert!((reduced - value(&format!("x[{j}]"), |e| e.rc)).abs() < 1e-12);
        assert!(reduced >= 0.0);
    }
    assert_eq!(objective, 20.0);

    for i in 1..=7 {
        let activity: f64 = (1..=7)
            .map(|j| LpUniqueDuals::coefficient(i, j) * x[j - 1])
            .sum();
        let slack = activity - LpUniqueDuals::rhs(i);
        assert!(slack >= 0.0);
        assert!((slack - value(&format!("primalcon[{i}]"), |e| e.slack)).abs() < 1e-12);
        assert_eq!(slack * duals[i - 1], 0.0);
    }
}

#[test]
fn perturbed_solution_reports_mismatches() {
    let mut fixture = LpUniqueDuals::new();
    fixture.generate_model().unwrap();
    let expected = bundled_results();

    let model = fixture.model_mut().unwrap();
    let mut solution = solution_from_results(model, &expected).unwrap();
    let x5 = model.get_variable_by_name("x[5]").unwrap();
    solution.primal_values.insert(x5, 0.25);
    model.load_solution(&solution).unwrap();

    let err = fixture.validate_current_solution(&expected, 1e-6).unwrap_err();
    assert_eq!(err.code(), "FIXTURE_MISMATCH");
    match err {
        FixtureError::Mismatch(mismatches) => {
            let components: Vec<_> = mismatches.iter().map(|m| m.component.as_str()).collect();
            assert!(components.contains(&"x[5]"));
            assert!(components.contains(&"cost"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn warmstart_unsets_all_variables() {
    let mut fixture = LpUniqueDuals::new();
    fixture.generate_model().unwrap();
    let model = fixture.model_mut().unwrap();
    let solution = solution_from_results(model, &bundled_results()).unwrap();
    model.load_solution(&solution).unwrap();
    let y1 = model.get_variable_by_name("y[1]").unwrap();
    model.set_value(y1, Some(3.0)).unwrap();

    fixture.warmstart_model().unwrap();
    let model = fixture.model().unwrap();
    for id in fixture.x().iter().chain(fixture.y()) {
        assert_eq!(model.value(*id).unwrap(), None);
    }
}

#[test]
fn saved_solution_round_trips() {
    let mut fixture = LpUniqueDuals::new();
    fixture.generate_model().unwrap();
    let expected = bundled_results();
    let model = fixture.model_mut().unwrap();
    let solution = solution_from_results(model, &expected).unwrap();
    model.load_solution(&solution).unwrap();

    let dir = std::env::temp_dir().join(format!("trbox-fixtures-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("saved.json");
    fixture.save_current_solution(&path).unwrap();

    let saved = ExpectedResults::load(&path).unwrap();
    assert_eq!(saved.get("x[1]").unwrap().value, Some(1.0));
    assert_eq!(saved.get("x[6]").unwrap().lrc, Some(0.5));
    assert_eq!(saved.get("primalcon[6]").unwrap().slack, Some(0.5));
    assert_eq!(saved.get("primalcon[1]").unwrap().dual, None);
    fixture.validate_current_solution(&saved, 1e-9).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_results_file() {
    let config = FixtureConfig::new().with_results_dir("/nonexistent/trbox");
    let err = LpUniqueDuals::new().expected_results(&config).unwrap_err();
    assert_eq!(err.code(), "FIXTURE_IO");
}

#[test]
fn registry_lookup() {
    let names: Vec<_> = registered_models()
        .iter()
        .map(|fixture| fixture.description())
        .collect();
    assert_eq!(names, vec!["LP_unique_duals"]);

    let mut fixture = model_by_name("LP_unique_duals").unwrap();
    assert!(fixture.generate_model().is_ok());
    assert_eq!(
        model_by_name("QP_simple").err(),
        Some(FixtureError::UnknownModel("QP_simple".to_string()))
    );
}
