//! A linear program whose optimal duals are unique.
//!
//! Seven non-negative variables `x[j]` and seven covering rows
//! `primalcon[i]: sum_j A[i,j] x[j] >= b[i]`, minimizing `sum_j c[j] x[j]`.
//! Rows 4 and 5 are swapped when building `A` and `b`, so the diagonal entry
//! of row 4 sits in column 5 and vice versa. `y[i]` is declared but unused.

use std::collections::BTreeSet;

use trbox_core::suffix::{
    DUAL, LOWER_REDUCED_COST, REDUCED_COST, SLACK, SuffixDirection, UPPER_REDUCED_COST,
};
use trbox_core::{Model, Variable};
use trbox_expr::{Expr, VariableId};

use crate::error::FixtureError;
use crate::registry::TestModel;

const SIZE: usize = 7;

/// Builder for the `LP_unique_duals` fixture.
#[derive(Debug, Clone, Default)]
pub struct LpUniqueDuals {
    model: Option<Model>,
    x: Vec<VariableId>,
    y: Vec<VariableId>,
}

impl LpUniqueDuals {
    pub const DESCRIPTION: &'static str = "LP_unique_duals";

    pub fn new() -> Self {
        Self::default()
    }

    /// `c[j]` for `j` in `1..=7`.
    pub fn cost(j: usize) -> f64 {
        if j < 5 { 5.0 } else { 4.5 }
    }

    /// `b[i]` for `i` in `1..=7`.
    pub fn rhs(i: usize) -> f64 {
        if swap_rows(i) < 5 { 5.0 } else { 3.5 }
    }

    /// `A[i, j]` for `i, j` in `1..=7`.
    pub fn coefficient(i: usize, j: usize) -> f64 {
        if swap_rows(i) == j { 2.0 } else { 1.0 }
    }

    pub fn x(&self) -> &[VariableId] {
        &self.x
    }

    pub fn y(&self) -> &[VariableId] {
        &self.y
    }
}

fn swap_rows(i: usize) -> usize {
    match i {
        4 => 5,
        5 => 4,
        other => other,
    }
}

impl TestModel for LpUniqueDuals {
    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn capabilities(&self) -> BTreeSet<&'static str> {
        BTreeSet::from(["linear"])
    }

    fn generate_model(&mut self) -> Result<&Model, FixtureError> {
        let mut model = Model::named(Self::DESCRIPTION);
        let x = (1..=SIZE)
            .map(|j| model.add_named_variable(format!("x[{j}]"), Variable::non_negative()))
            .collect::<Result<Vec<_>, _>>()?;
        let y = (1..=SIZE)
            .map(|i| model.add_named_variable(format!("y[{i}]"), Variable::non_negative()))
            .collect::<Result<Vec<_>, _>>()?;

        model.minimize(Expr::linear(
            x.iter().enumerate().map(|(k, id)| (*id, Self::cost(k + 1))),
        ))?;
        model.set_objective_name(Some("cost".to_string()))?;

        for i in 1..=SIZE {
            let row = Expr::linear(
                x.iter()
                    .enumerate()
                    .map(|(k, id)| (*id, Self::coefficient(i, k + 1))),
            );
            model.add_named_constraint(format!("primalcon[{i}]"), row.ge_scalar(Self::rhs(i)))?;
        }

        for name in [SLACK, UPPER_REDUCED_COST, LOWER_REDUCED_COST] {
            model.declare_suffix(name, SuffixDirection::Import)?;
        }
        for name in [DUAL, REDUCED_COST] {
            model.declare_suffix(name, SuffixDirection::Local)?;
        }

        tracing::debug!(
            component = "fixtures",
            operation = "generate_model",
            status = "success",
            model = Self::DESCRIPTION,
            variables = model.num_variables(),
            constraints = model.num_constraints(),
            "Generated test model"
        );
        self.x = x;
        self.y = y;
        Ok(self.model.insert(model))
    }

    fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    fn model_mut(&mut self) -> Option<&mut Model> {
        self.model.as_mut()
    }

    fn warmstart_model(&mut self) -> Result<(), FixtureError> {
        let Some(model) = self.model.as_mut() else {
            return Err(FixtureError::NotGenerated(Self::DESCRIPTION));
        };
        model.clear_values(self.x.iter().chain(&self.y).copied())?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn swapped_rows_move_the_diagonal() {
        assert_eq!(LpUniqueDuals::coefficient(4, 5), 2.0);
        assert_eq!(LpUniqueDuals::coefficient(5, 4), 2.0);
        assert_eq!(LpUniqueDuals::coefficient(4, 4), 1.0);
        assert_eq!(LpUniqueDuals::coefficient(5, 5), 1.0);
        assert_eq!(LpUniqueDuals::coefficient(1, 1), 2.0);
        assert_eq!(LpUniqueDuals::coefficient(7, 6), 1.0);
    }

    #[test]
    fn rhs_and_costs() {
        assert_eq!(LpUniqueDuals::rhs(4), 3.5);
        assert_eq!(LpUniqueDuals::rhs(5), 5.0);
        assert_eq!(LpUniqueDuals::rhs(6), 3.5);
        assert_eq!(LpUniqueDuals::cost(4), 5.0);
        assert_eq!(LpUniqueDuals::cost(5), 4.5);
    }

    #[test]
    fn warmstart_requires_model() {
        let mut fixture = LpUniqueDuals::new();
        assert_eq!(
            fixture.warmstart_model(),
            Err(FixtureError::NotGenerated("LP_unique_duals"))
        );
    }
}
