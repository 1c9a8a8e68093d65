//! Model module for building nonlinear optimization models.
//!
//! This module provides the core [`Model`] type: variables with current
//! values, constraints over expression trees, a single objective, the
//! registry of external functions those expressions may call, and suffixes.
//!
//! # Module Organization
//!
//! - [`error`]: Model error types
//! - [`builder`]: Methods for adding variables, constraints, objectives and functions
//! - [`storage`]: Component access and counts
//! - [`metadata`]: Variable and constraint naming
//! - [`values`]: Variable values and expression evaluation
//! - [`suffixes`]: Suffix declaration and solution import
//! - [`pretty`]: Human-readable formatting

mod builder;
mod error;
mod metadata;
mod pretty;
mod storage;
mod suffixes;
mod values;

use std::collections::BTreeMap;

use trbox_expr::{ConstraintId, Expr, ExternalFunctionId, VariableId};

use crate::external::ExternalFunction;
use crate::suffix::Suffix;
use crate::types::{Constraint, Objective, Variable};

pub use error::ModelError;
pub use pretty::PrettyPrintOptions;

/// A model over expression trees that may embed external-function calls.
///
/// Components are addressed by stable ids; ids are never reused.
#[derive(Debug, Clone)]
pub struct Model {
    name: Option<String>,
    pub(crate) variables: BTreeMap<VariableId, Variable>,
    pub(crate) constraints: BTreeMap<ConstraintId, Constraint>,
    pub(crate) objective: Objective,
    pub(crate) objective_name: Option<String>,
    pub(crate) external_functions: BTreeMap<ExternalFunctionId, ExternalFunction>,
    pub(crate) suffixes: BTreeMap<String, Suffix>,
    pub(crate) next_variable_id: u32,
    pub(crate) next_constraint_id: u32,
    pub(crate) next_function_id: u32,
    // Lazy-allocated metadata storage
    pub(crate) variable_names: Option<BTreeMap<VariableId, String>>,
    pub(crate) constraint_names: Option<BTreeMap<ConstraintId, String>>,
}

impl Model {
    /// Create a new empty model.
    pub fn new() -> Self {
        Self {
            name: None,
            variables: BTreeMap::new(),
            constraints: BTreeMap::new(),
            objective: Objective::new(),
            objective_name: None,
            external_functions: BTreeMap::new(),
            suffixes: BTreeMap::new(),
            next_variable_id: 0,
            next_constraint_id: 0,
            next_function_id: 0,
            variable_names: None,
            constraint_names: None,
        }
    }

    /// Create a new empty model with a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the objective
    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub(crate) fn ensure_variable_exists(&self, id: VariableId) -> Result<(), ModelError> {
        if self.variables.contains_key(&id) {
            Ok(())
        } else {
            Err(ModelError::InvalidVariableId(id))
        }
    }

    pub(crate) fn ensure_constraint_exists(&self, id: ConstraintId) -> Result<(), ModelError> {
        if self.constraints.contains_key(&id) {
            Ok(())
        } else {
            Err(ModelError::InvalidConstraintId(id))
        }
    }

    /// Check that every variable and call in `expr` belongs to this model.
    pub(crate) fn validate_expr(&self, expr: &Expr) -> Result<(), ModelError> {
        let mut result = Ok(());
        expr.walk(&mut |node| {
            if result.is_err() {
                return;
            }
            result = match node {
                Expr::Var(id) => self.ensure_variable_exists(*id),
                Expr::Call(call) => self.validate_call(call.function(), call.arity()),
                _ => Ok(()),
            };
        });
        result
    }

    fn validate_call(&self, function: ExternalFunctionId, actual: usize) -> Result<(), ModelError> {
        let handle = self
            .external_functions
            .get(&function)
            .ok_or(ModelError::UnknownExternalFunction(function))?;
        match handle.arity() {
            Some(expected) if expected != actual => Err(ModelError::ExternalArityMismatch {
                function,
                expected,
                actual,
            }),
            _ => Ok(()),
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::{Bounds, Sense};

    mod metadata_values;
    mod suffix_import;
    mod support;

    #[test]
    fn test_new_model_is_empty() {
        let model = Model::new();
        assert_eq!(model.num_variables(), 0);
        assert_eq!(model.num_constraints(), 0);
        assert!(model.name().is_none());
    }

    #[test]
    fn test_add_variable() {
        let mut model = Model::new();
        let var = Variable::continuous(Bounds::new(0.0, 10.0));

        let id = model.add_variable(var).unwrap();
        assert_eq!(model.num_variables(), 1);
        assert_eq!(model.get_variable(id).unwrap(), &var);
    }

    #[test]
    fn test_variable_bounds_validation() {
        let mut model = Model::new();
        let result = model.add_variable(Variable::continuous(Bounds::new(5.0, 1.0)));
        assert!(matches!(
            result,
            Err(ModelError::InvalidVariableBounds { .. })
        ));
    }

    #[test]
    fn test_add_constraint() {
        let mut model = Model::new();
        let x = model.add_variable(Variable::reals()).unwrap();
        let id = model
            .add_constraint(Expr::var(x).pow(2.0).le_scalar(4.0))
            .unwrap();

        let stored = model.get_constraint(id).unwrap();
        assert_eq!(stored.bounds.upper, 4.0);
        assert!(stored.bounds.lower.is_infinite());
        assert!(stored.is_active);
    }

    #[test]
    fn test_constraint_rejects_unknown_variable() {
        let mut model = Model::new();
        let missing = VariableId::new(999);
        let result = model.add_constraint(Expr::var(missing).eq_scalar(1.0));
        assert_eq!(result, Err(ModelError::InvalidVariableId(missing)));
        assert_eq!(model.num_constraints(), 0);
    }

    #[test]
    fn test_constraint_rejects_unknown_function() {
        let mut model = Model::new();
        let x = model.add_variable(Variable::reals()).unwrap();
        let missing = ExternalFunctionId::new(7);
        let result = model.add_constraint(Expr::call(missing, [Expr::var(x)]).eq_scalar(0.0));
        assert_eq!(result, Err(ModelError::UnknownExternalFunction(missing)));
    }

    #[test]
    fn test_constraint_checks_call_arity() {
        let mut model = Model::new();
        let x = model.add_variable(Variable::reals()).unwrap();
        let f = model.add_external_function(
            crate::ExternalFunction::new("bb", |a| (a[0] - a[1]).sin()).with_arity(2),
        );
        let result = model.add_constraint(Expr::call(f, [Expr::var(x)]).eq_scalar(0.0));
        assert_eq!(
            result,
            Err(ModelError::ExternalArityMismatch {
                function: f,
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_constraint_activation_toggle() {
        let mut model = Model::new();
        let x = model.add_variable(Variable::reals()).unwrap();
        let con = model.add_constraint(Expr::var(x).ge_scalar(0.0)).unwrap();

        model.deactivate_constraint(con).unwrap();
        assert_eq!(model.active_constraints().count(), 0);
        model.activate_constraint(con).unwrap();
        assert_eq!(model.active_constraints().count(), 1);
    }

    #[test]
    fn test_set_objective() {
        let mut model = Model::new();
        let x = model.add_variable(Variable::reals()).unwrap();
        model.minimize((Expr::var(x) - 1.0).pow(2.0)).unwrap();
        assert_eq!(model.objective().sense, Some(Sense::Minimize));
    }

    #[test]
    fn test_set_objective_rejects_missing_sense() {
        let mut model = Model::new();
        let result = model.set_objective(Objective::new());
        assert_eq!(result, Err(ModelError::NoObjective));
    }

    #[test]
    fn test_multiple_objectives_rejected() {
        let mut model = Model::new();
        let x = model.add_variable(Variable::reals()).unwrap();
        model.minimize(Expr::var(x)).unwrap();
        let result = model.maximize(Expr::var(x));
        assert_eq!(result, Err(ModelError::MultipleObjectives));
    }

    #[test]
    fn test_objective_name_cleared_on_replace() {
        let mut model = Model::new();
        let x = model.add_variable(Variable::reals()).unwrap();
        model.minimize(Expr::var(x)).unwrap();
        model.set_objective_name(Some("cost".to_string())).unwrap();
        assert_eq!(model.get_objective_name(), Some("cost"));

        model.set_objective(Objective::maximize(Expr::var(x))).unwrap();
        assert!(model.get_objective_name().is_none());
    }

    #[test]
    fn test_set_constraint_body_revalidates() {
        let mut model = Model::new();
        let x = model.add_variable(Variable::reals()).unwrap();
        let con = model.add_constraint(Expr::var(x).eq_scalar(1.0)).unwrap();
        let missing = VariableId::new(42);

        let result = model.set_constraint_body(con, Expr::var(missing));
        assert_eq!(result, Err(ModelError::InvalidVariableId(missing)));
        assert_eq!(model.get_constraint(con).unwrap().body, Expr::var(x));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut model = Model::new();
        let a = model.add_variable(Variable::reals()).unwrap();
        let b = model.add_variable(Variable::reals()).unwrap();
        assert_ne!(a, b);
        assert_eq!(b.inner(), a.inner() + 1);
    }
}
