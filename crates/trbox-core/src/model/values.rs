//! Variable values and numeric evaluation.

use trbox_expr::{
    ConstraintId, EvalContext, Expr, ExprError, ExternalFunctionId, VariableId,
};

use crate::model::Model;
use crate::model::error::ModelError;

impl Model {
    /// Current value of a variable, `None` when unset.
    pub fn value(&self, id: VariableId) -> Result<Option<f64>, ModelError> {
        Ok(self.get_variable(id)?.value)
    }

    /// Set or clear (`None`) the current value of a variable.
    pub fn set_value(&mut self, id: VariableId, value: Option<f64>) -> Result<(), ModelError> {
        let variable = self
            .variables
            .get_mut(&id)
            .ok_or(ModelError::InvalidVariableId(id))?;
        variable.value = value;
        Ok(())
    }

    /// Reset every listed variable to unset.
    pub fn clear_values(&mut self, ids: impl IntoIterator<Item = VariableId>) -> Result<(), ModelError> {
        for id in ids {
            self.set_value(id, None)?;
        }
        Ok(())
    }

    /// Evaluate an expression at the current variable values.
    pub fn evaluate(&self, expr: &Expr) -> Result<f64, ModelError> {
        Ok(expr.evaluate(self)?)
    }

    /// Evaluate a constraint body at the current variable values.
    pub fn constraint_body_value(&self, id: ConstraintId) -> Result<f64, ModelError> {
        let constraint = self.get_constraint(id)?;
        self.evaluate(&constraint.body)
    }

    /// Evaluate an external function directly.
    pub fn call_external(&self, id: ExternalFunctionId, args: &[f64]) -> Result<f64, ModelError> {
        Ok(EvalContext::call(self, id, args)?)
    }
}

impl EvalContext for Model {
    fn value(&self, id: VariableId) -> Option<f64> {
        self.variables.get(&id).and_then(|var| var.value)
    }

    fn call(&self, function: ExternalFunctionId, args: &[f64]) -> Result<f64, ExprError> {
        let handle = self
            .external_functions
            .get(&function)
            .ok_or(ExprError::UnknownFunction(function))?;
        match handle.arity() {
            Some(expected) if expected != args.len() => Err(ExprError::ArityMismatch {
                function,
                expected,
                actual: args.len(),
            }),
            _ => Ok(handle.evaluate(args)),
        }
    }
}
