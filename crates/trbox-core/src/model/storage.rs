//! Component access methods for the model.

use trbox_expr::{ConstraintId, ExternalFunctionId, VariableId};

use super::Model;
use super::error::ModelError;
use crate::external::ExternalFunction;
use crate::types::{Constraint, Variable};

impl Model {
    /// Get the number of variables
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Get the number of constraints
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Get the number of registered external functions
    pub fn num_external_functions(&self) -> usize {
        self.external_functions.len()
    }

    /// Get a variable by ID.
    pub fn get_variable(&self, id: VariableId) -> Result<&Variable, ModelError> {
        self.variables
            .get(&id)
            .ok_or(ModelError::InvalidVariableId(id))
    }

    /// Get a constraint by ID.
    pub fn get_constraint(&self, id: ConstraintId) -> Result<&Constraint, ModelError> {
        self.constraints
            .get(&id)
            .ok_or(ModelError::InvalidConstraintId(id))
    }

    /// Get an external function by ID.
    pub fn get_external_function(
        &self,
        id: ExternalFunctionId,
    ) -> Result<&ExternalFunction, ModelError> {
        self.external_functions
            .get(&id)
            .ok_or(ModelError::UnknownExternalFunction(id))
    }

    /// Variables in id order.
    pub fn variables(&self) -> impl Iterator<Item = (VariableId, &Variable)> {
        self.variables.iter().map(|(&id, var)| (id, var))
    }

    /// Constraints in id order, active or not.
    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> {
        self.constraints.iter().map(|(&id, con)| (id, con))
    }

    /// Active constraints in id order.
    pub fn active_constraints(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> {
        self.constraints().filter(|(_, con)| con.is_active)
    }

    pub fn external_functions(&self) -> impl Iterator<Item = (ExternalFunctionId, &ExternalFunction)> {
        self.external_functions.iter().map(|(&id, f)| (id, f))
    }
}
