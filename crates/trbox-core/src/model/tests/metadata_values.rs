use super::support::two_variable_model;
use super::*;
use crate::external::ExternalFunction;
use trbox_expr::ExprError;

#[test]
fn test_variable_name_lifecycle() {
    let mut model = Model::new();
    let var = model.add_variable(Variable::reals()).unwrap();
    assert!(model.get_variable_name(var).is_none());
    model.set_variable_name(var, "x".to_string()).unwrap();
    assert_eq!(model.get_variable_name(var), Some("x"));
}

#[test]
fn test_name_lookup_helpers() {
    let (model, a, _, con) = two_variable_model();
    assert_eq!(model.get_variable_by_name("a"), Some(a));
    assert_eq!(model.get_constraint_by_name("cover"), Some(con));
    assert!(model.get_variable_by_name("missing").is_none());
    assert!(model.get_constraint_by_name("missing").is_none());
}

#[test]
fn test_duplicate_constraint_name_rejected() {
    let (mut model, a, _, _) = two_variable_model();
    let result = model.add_named_constraint("cover", Expr::var(a).le_scalar(5.0));
    assert!(matches!(result, Err(ModelError::DuplicateName { kind: "constraint", .. })));
    assert_eq!(model.num_constraints(), 1);
}

#[test]
fn test_values_start_unset_and_clear() {
    let (mut model, a, b, _) = two_variable_model();
    assert_eq!(model.value(a).unwrap(), None);

    model.set_value(a, Some(0.25)).unwrap();
    model.set_value(b, Some(0.75)).unwrap();
    assert_eq!(model.value(a).unwrap(), Some(0.25));

    model.clear_values([a, b]).unwrap();
    assert_eq!(model.value(a).unwrap(), None);
    assert_eq!(model.value(b).unwrap(), None);
}

#[test]
fn test_set_value_on_unknown_variable_fails() {
    let mut model = Model::new();
    let missing = VariableId::new(3);
    assert_eq!(
        model.set_value(missing, Some(1.0)),
        Err(ModelError::InvalidVariableId(missing))
    );
}

#[test]
fn test_constraint_body_value() {
    let (mut model, a, b, con) = two_variable_model();
    model.set_value(a, Some(0.5)).unwrap();
    assert!(matches!(
        model.constraint_body_value(con),
        Err(ModelError::Evaluation(_))
    ));

    model.set_value(b, Some(2.0)).unwrap();
    assert_eq!(model.constraint_body_value(con).unwrap(), 2.5);
}

#[test]
fn test_evaluate_external_call() {
    let mut model = Model::new();
    let x0 = model.add_variable(Variable::reals().with_value(2.0)).unwrap();
    let x1 = model.add_variable(Variable::reals().with_value(2.0)).unwrap();
    let bb = model.add_external_function(
        ExternalFunction::new("blackbox", |a| (a[0] - a[1]).sin()).with_arity(2),
    );
    let expr = Expr::call(bb, [Expr::var(x0), Expr::var(x1)]) + 1.0;
    assert_eq!(model.evaluate(&expr).unwrap(), 1.0);
    assert_eq!(model.call_external(bb, &[1.0, 1.0]).unwrap(), 0.0);
    assert!(matches!(
        model.call_external(bb, &[1.0]),
        Err(ModelError::Evaluation(ExprError::ArityMismatch { .. }))
    ));
}
