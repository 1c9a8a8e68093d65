//! Solver-agnostic solution values imported into a model.
//!
//! The model never runs a solver itself. A backend (or a test harness)
//! produces a [`Solution`] and hands it to [`crate::Model::load_solution`],
//! which writes primal values and fills the model's import suffixes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use trbox_expr::{ConstraintId, VariableId};

/// Status of a solver solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverStatus {
    /// Optimal solution found.
    Optimal,
    /// Problem is infeasible.
    Infeasible,
    /// Problem is unbounded.
    Unbounded,
    /// Solver reached time limit (may have feasible solution).
    TimeLimit,
    /// Solver reached iteration limit (may have feasible solution).
    IterationLimit,
    /// Status is unknown or solver did not complete.
    Unknown,
}

impl SolverStatus {
    /// Check if the status indicates an optimal solution.
    pub fn is_optimal(self) -> bool {
        matches!(self, SolverStatus::Optimal)
    }

    /// Check if the status indicates a feasible solution.
    pub fn is_feasible(self) -> bool {
        matches!(
            self,
            SolverStatus::Optimal | SolverStatus::TimeLimit | SolverStatus::IterationLimit
        )
    }

    /// Get a human-readable string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::Optimal => "optimal",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::TimeLimit => "time_limit",
            SolverStatus::IterationLimit => "iteration_limit",
            SolverStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Solver-agnostic solution from an optimization solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub status: SolverStatus,
    #[serde(default)]
    pub objective_value: Option<f64>,
    /// Primal values by variable.
    #[serde(default)]
    pub primal_values: BTreeMap<VariableId, f64>,
    /// Reduced costs by variable.
    #[serde(default)]
    pub reduced_costs: BTreeMap<VariableId, f64>,
    /// Reduced costs attributed to the lower bound.
    #[serde(default)]
    pub lower_reduced_costs: BTreeMap<VariableId, f64>,
    /// Reduced costs attributed to the upper bound.
    #[serde(default)]
    pub upper_reduced_costs: BTreeMap<VariableId, f64>,
    /// Dual values (shadow prices) by constraint.
    #[serde(default)]
    pub constraint_duals: BTreeMap<ConstraintId, f64>,
    /// Constraint slack: distance of the body from its nearest bound.
    #[serde(default)]
    pub constraint_slacks: BTreeMap<ConstraintId, f64>,
    /// Solver-specific metadata (e.g., iteration counts).
    #[serde(default)]
    pub metadata: BTreeMap<String, f64>,
}

impl Solution {
    pub fn new(status: SolverStatus) -> Self {
        Self {
            status,
            objective_value: None,
            primal_values: BTreeMap::new(),
            reduced_costs: BTreeMap::new(),
            lower_reduced_costs: BTreeMap::new(),
            upper_reduced_costs: BTreeMap::new(),
            constraint_duals: BTreeMap::new(),
            constraint_slacks: BTreeMap::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn get_primal(&self, id: VariableId) -> Option<f64> {
        self.primal_values.get(&id).copied()
    }

    pub fn get_constraint_dual(&self, id: ConstraintId) -> Option<f64> {
        self.constraint_duals.get(&id).copied()
    }

    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }

    pub fn is_feasible(&self) -> bool {
        self.status.is_feasible()
    }
}
