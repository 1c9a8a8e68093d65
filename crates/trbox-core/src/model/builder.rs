//! Model builder methods for adding variables, constraints, objectives and
//! external functions.

use trbox_expr::{ConstraintExpr, ConstraintId, Expr, ExternalFunctionId, VariableId};

use crate::external::ExternalFunction;
use crate::model::Model;
use crate::model::error::ModelError;
use crate::types::{Bounds, Constraint, Objective, Sense, Variable};

impl Model {
    /// Add a variable to the model.
    pub fn add_variable(&mut self, variable: Variable) -> Result<VariableId, ModelError> {
        if !variable.bounds.is_valid() {
            return Err(ModelError::InvalidVariableBounds {
                lower: variable.bounds.lower,
                upper: variable.bounds.upper,
            });
        }

        let id = VariableId::new(self.next_variable_id);
        self.next_variable_id += 1;
        self.variables.insert(id, variable);

        Ok(id)
    }

    /// Add a variable and name it in one step.
    pub fn add_named_variable(
        &mut self,
        name: impl Into<String>,
        variable: Variable,
    ) -> Result<VariableId, ModelError> {
        let name = name.into();
        if self.get_variable_by_name(&name).is_some() {
            return Err(ModelError::DuplicateName {
                kind: "variable",
                name,
            });
        }
        let id = self.add_variable(variable)?;
        self.set_variable_name(id, name)?;
        Ok(id)
    }

    /// Add a constraint from a comparison expression (e.g., `x**2 <= 4`).
    pub fn add_constraint(&mut self, constraint: ConstraintExpr) -> Result<ConstraintId, ModelError> {
        let (body, sense, rhs) = constraint.into_parts();
        let (lower, upper) = sense.bounds(rhs);
        self.add_constraint_with_bounds(body, Bounds::new(lower, upper))
    }

    /// Add a named constraint from a comparison expression.
    pub fn add_named_constraint(
        &mut self,
        name: impl Into<String>,
        constraint: ConstraintExpr,
    ) -> Result<ConstraintId, ModelError> {
        let name = name.into();
        if self.get_constraint_by_name(&name).is_some() {
            return Err(ModelError::DuplicateName {
                kind: "constraint",
                name,
            });
        }
        let id = self.add_constraint(constraint)?;
        self.set_constraint_name(id, name)?;
        Ok(id)
    }

    /// Add a constraint `lower <= body <= upper`.
    pub fn add_constraint_with_bounds(
        &mut self,
        body: Expr,
        bounds: Bounds,
    ) -> Result<ConstraintId, ModelError> {
        if !bounds.is_valid() {
            return Err(ModelError::InvalidConstraintBounds {
                lower: bounds.lower,
                upper: bounds.upper,
            });
        }
        self.validate_expr(&body)?;

        let id = ConstraintId::new(self.next_constraint_id);
        self.next_constraint_id += 1;
        self.constraints.insert(id, Constraint::new(body, bounds));

        tracing::debug!(
            component = "model",
            operation = "add_constraint",
            status = "success",
            constraint_id = id.inner(),
            "Added constraint"
        );
        Ok(id)
    }

    /// Replace the body of an existing constraint, keeping its bounds.
    pub fn set_constraint_body(&mut self, id: ConstraintId, body: Expr) -> Result<(), ModelError> {
        self.ensure_constraint_exists(id)?;
        self.validate_expr(&body)?;
        if let Some(constraint) = self.constraints.get_mut(&id) {
            constraint.body = body;
        }
        Ok(())
    }

    /// Register an external function and return its handle id.
    pub fn add_external_function(&mut self, function: ExternalFunction) -> ExternalFunctionId {
        let id = ExternalFunctionId::new(self.next_function_id);
        self.next_function_id += 1;
        tracing::debug!(
            component = "model",
            operation = "add_external_function",
            status = "success",
            function_id = id.inner(),
            name = function.name(),
            "Registered external function"
        );
        self.external_functions.insert(id, function);
        id
    }

    /// Set the objective function.
    pub fn set_objective(&mut self, objective: Objective) -> Result<(), ModelError> {
        let sense = objective.sense.ok_or(ModelError::NoObjective)?;
        self.validate_expr(&objective.expr)?;

        self.objective = objective;
        self.objective_name = None;
        tracing::debug!(
            component = "model",
            operation = "set_objective",
            status = "success",
            sense = sense.as_str(),
            "Set objective function"
        );
        Ok(())
    }

    /// Replace the objective expression, keeping its sense and name.
    pub fn set_objective_expr(&mut self, expr: Expr) -> Result<(), ModelError> {
        if self.objective.sense.is_none() {
            return Err(ModelError::NoObjective);
        }
        self.validate_expr(&expr)?;
        self.objective.expr = expr;
        Ok(())
    }

    /// Flip a maximized objective into the equivalent minimization.
    ///
    /// Returns `true` when the objective was negated.
    pub fn normalize_to_minimize(&mut self) -> Result<bool, ModelError> {
        match self.objective.sense {
            None => Err(ModelError::NoObjective),
            Some(Sense::Minimize) => Ok(false),
            Some(Sense::Maximize) => {
                let expr = std::mem::take(&mut self.objective.expr);
                self.objective.expr = -expr;
                self.objective.sense = Some(Sense::Minimize);
                Ok(true)
            }
        }
    }

    /// Minimize an expression.
    ///
    /// Returns an error if the model already has an objective.
    pub fn minimize(&mut self, expr: Expr) -> Result<(), ModelError> {
        if self.objective.sense.is_some() {
            return Err(ModelError::MultipleObjectives);
        }
        self.set_objective(Objective::minimize(expr))
    }

    /// Maximize an expression.
    ///
    /// Returns an error if the model already has an objective.
    pub fn maximize(&mut self, expr: Expr) -> Result<(), ModelError> {
        if self.objective.sense.is_some() {
            return Err(ModelError::MultipleObjectives);
        }
        self.set_objective(Objective::maximize(expr))
    }

    /// Deactivate a constraint without removing it.
    pub fn deactivate_constraint(&mut self, id: ConstraintId) -> Result<(), ModelError> {
        self.set_constraint_active(id, false)
    }

    /// Activate a previously deactivated constraint.
    pub fn activate_constraint(&mut self, id: ConstraintId) -> Result<(), ModelError> {
        self.set_constraint_active(id, true)
    }

    fn set_constraint_active(&mut self, id: ConstraintId, active: bool) -> Result<(), ModelError> {
        let constraint = self
            .constraints
            .get_mut(&id)
            .ok_or(ModelError::InvalidConstraintId(id))?;
        constraint.is_active = active;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use trbox_expr::Expr;

    use crate::model::{Model, ModelError};
    use crate::types::{Sense, Variable};

    #[test]
    fn named_variables_must_be_unique() {
        let mut model = Model::new();
        model.add_named_variable("x", Variable::reals()).unwrap();
        let result = model.add_named_variable("x", Variable::reals());
        assert_eq!(
            result,
            Err(ModelError::DuplicateName {
                kind: "variable",
                name: "x".to_string()
            })
        );
        assert_eq!(model.num_variables(), 1);
    }

    #[test]
    fn normalize_flips_maximize() {
        let mut model = Model::new();
        let x = model.add_variable(Variable::reals().with_value(3.0)).unwrap();
        model.maximize(Expr::var(x) * 2.0).unwrap();

        assert!(model.normalize_to_minimize().unwrap());
        assert_eq!(model.objective().sense, Some(Sense::Minimize));
        assert_eq!(model.evaluate(&model.objective().expr).unwrap(), -6.0);
        assert!(!model.normalize_to_minimize().unwrap());
    }

    #[test]
    fn normalize_without_objective_fails() {
        let mut model = Model::new();
        assert_eq!(model.normalize_to_minimize(), Err(ModelError::NoObjective));
    }

    #[test]
    fn set_objective_expr_requires_objective() {
        let mut model = Model::new();
        let x = model.add_variable(Variable::reals()).unwrap();
        assert_eq!(
            model.set_objective_expr(Expr::var(x)),
            Err(ModelError::NoObjective)
        );
    }
}
