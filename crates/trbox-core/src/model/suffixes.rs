//! Suffix declaration and solution import.

use std::collections::BTreeMap;

use trbox_expr::{ConstraintId, VariableId};

use crate::model::Model;
use crate::model::error::ModelError;
use crate::solution::Solution;
use crate::suffix::{
    ComponentRef, DUAL, LOWER_REDUCED_COST, REDUCED_COST, SLACK, Suffix, SuffixDirection,
    UPPER_REDUCED_COST,
};

impl Model {
    /// Declare a named suffix.
    pub fn declare_suffix(
        &mut self,
        name: impl Into<String>,
        direction: SuffixDirection,
    ) -> Result<(), ModelError> {
        let name = name.into();
        if self.suffixes.contains_key(&name) {
            return Err(ModelError::DuplicateSuffix(name));
        }
        tracing::debug!(
            component = "suffix",
            operation = "declare",
            status = "success",
            name = %name,
            direction = direction.as_str(),
            "Declared suffix"
        );
        self.suffixes.insert(name, Suffix::new(direction));
        Ok(())
    }

    pub fn suffix(&self, name: &str) -> Option<&Suffix> {
        self.suffixes.get(name)
    }

    /// Suffix names in sorted order.
    pub fn suffix_names(&self) -> impl Iterator<Item = &str> {
        self.suffixes.keys().map(String::as_str)
    }

    pub fn set_suffix_value(
        &mut self,
        name: &str,
        component: ComponentRef,
        value: f64,
    ) -> Result<(), ModelError> {
        match component {
            ComponentRef::Variable(id) => self.ensure_variable_exists(id)?,
            ComponentRef::Constraint(id) => self.ensure_constraint_exists(id)?,
        }
        let suffix = self
            .suffixes
            .get_mut(name)
            .ok_or_else(|| ModelError::UnknownSuffix(name.to_string()))?;
        suffix.set(component, value);
        Ok(())
    }

    /// Import a solution: write primal values and refill import suffixes.
    ///
    /// Only suffixes declared with an importing direction are touched. Values
    /// for components the model does not own are rejected before anything is
    /// written.
    pub fn load_solution(&mut self, solution: &Solution) -> Result<(), ModelError> {
        if !solution.status.is_feasible() {
            return Err(ModelError::SolutionNotLoadable {
                status: solution.status,
            });
        }
        for id in solution
            .primal_values
            .keys()
            .chain(solution.reduced_costs.keys())
            .chain(solution.lower_reduced_costs.keys())
            .chain(solution.upper_reduced_costs.keys())
        {
            self.ensure_variable_exists(*id)?;
        }
        for id in solution
            .constraint_duals
            .keys()
            .chain(solution.constraint_slacks.keys())
        {
            self.ensure_constraint_exists(*id)?;
        }

        for (id, value) in &solution.primal_values {
            self.set_value(*id, Some(*value))?;
        }

        let mut imported = 0usize;
        for (name, suffix) in self.suffixes.iter_mut() {
            if !suffix.direction().imports() {
                continue;
            }
            suffix.clear();
            let entries: Vec<(ComponentRef, f64)> = match name.as_str() {
                DUAL => constraint_entries(&solution.constraint_duals),
                SLACK => constraint_entries(&solution.constraint_slacks),
                REDUCED_COST => variable_entries(&solution.reduced_costs),
                LOWER_REDUCED_COST => variable_entries(&solution.lower_reduced_costs),
                UPPER_REDUCED_COST => variable_entries(&solution.upper_reduced_costs),
                _ => {
                    tracing::debug!(
                        component = "suffix",
                        operation = "import",
                        status = "skipped",
                        name = %name,
                        "Solution carries no values for suffix"
                    );
                    Vec::new()
                }
            };
            imported += entries.len();
            for (component, value) in entries {
                suffix.set(component, value);
            }
        }

        tracing::debug!(
            component = "model",
            operation = "load_solution",
            status = "success",
            solver_status = solution.status.as_str(),
            primal_values = solution.primal_values.len(),
            suffix_values = imported,
            "Loaded solution"
        );
        Ok(())
    }
}

fn variable_entries(values: &BTreeMap<VariableId, f64>) -> Vec<(ComponentRef, f64)> {
    values
        .iter()
        .map(|(id, v)| (ComponentRef::Variable(*id), *v))
        .collect()
}

fn constraint_entries(values: &BTreeMap<ConstraintId, f64>) -> Vec<(ComponentRef, f64)> {
    values
        .iter()
        .map(|(id, v)| (ComponentRef::Constraint(*id), *v))
        .collect()
}
