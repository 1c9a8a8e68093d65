//! Expected results: load, save, snapshot and compare.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use trbox_core::suffix::{DUAL, LOWER_REDUCED_COST, REDUCED_COST, SLACK, UPPER_REDUCED_COST};
use trbox_core::{ComponentRef, Model, Solution, SolverStatus};
use trbox_expr::{ConstraintId, VariableId};

use crate::error::{FixtureError, Mismatch};

/// Expected values for one named component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpectedEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dual: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lrc: Option<f64>,
}

impl ExpectedEntry {
    /// Suffix fields that are present, with their suffix names.
    pub fn suffix_values(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            (DUAL, self.dual),
            (REDUCED_COST, self.rc),
            (SLACK, self.slack),
            (UPPER_REDUCED_COST, self.urc),
            (LOWER_REDUCED_COST, self.lrc),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }

    fn set_suffix(&mut self, name: &str, value: f64) {
        let slot = match name {
            DUAL => &mut self.dual,
            REDUCED_COST => &mut self.rc,
            SLACK => &mut self.slack,
            UPPER_REDUCED_COST => &mut self.urc,
            LOWER_REDUCED_COST => &mut self.lrc,
            _ => return,
        };
        *slot = Some(value);
    }
}

/// Expected results keyed by component name (`"x[1]"`, `"primalcon[1]"`,
/// or the objective name).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpectedResults {
    entries: BTreeMap<String, ExpectedEntry>,
}

#[derive(Debug, Clone, Copy)]
enum Component {
    Variable(VariableId),
    Constraint(ConstraintId),
    Objective,
}

impl Component {
    fn resolve(model: &Model, name: &str) -> Result<Self, FixtureError> {
        if let Some(id) = model.get_variable_by_name(name) {
            Ok(Component::Variable(id))
        } else if let Some(id) = model.get_constraint_by_name(name) {
            Ok(Component::Constraint(id))
        } else if model.get_objective_name() == Some(name) {
            Ok(Component::Objective)
        } else {
            Err(FixtureError::UnknownComponent(name.to_string()))
        }
    }

    fn suffix_target(self) -> Option<ComponentRef> {
        match self {
            Component::Variable(id) => Some(ComponentRef::Variable(id)),
            Component::Constraint(id) => Some(ComponentRef::Constraint(id)),
            Component::Objective => None,
        }
    }
}

impl ExpectedResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: ExpectedEntry) {
        self.entries.insert(name.into(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&ExpectedEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExpectedEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read expected results from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| FixtureError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let results = Self::from_json_str(&text).map_err(|err| FixtureError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        tracing::debug!(
            component = "fixtures",
            operation = "load_results",
            status = "success",
            path = %path.display(),
            entries = results.len(),
            "Loaded expected results"
        );
        Ok(results)
    }

    /// Write results as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FixtureError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|err| FixtureError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        std::fs::write(path, json).map_err(|err| FixtureError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Snapshot of a model's named values and import-suffix values.
    ///
    /// Unset variables and unnamed components are skipped.
    pub fn from_model(model: &Model) -> Self {
        let mut results = Self::new();
        for (id, variable) in model.variables() {
            let (Some(name), Some(value)) = (model.get_variable_name(id), variable.value) else {
                continue;
            };
            let mut entry = ExpectedEntry {
                value: Some(value),
                ..ExpectedEntry::default()
            };
            fill_suffixes(model, ComponentRef::Variable(id), &mut entry);
            results.insert(name, entry);
        }
        for (id, _) in model.constraints() {
            let Some(name) = model.get_constraint_name(id) else {
                continue;
            };
            let mut entry = ExpectedEntry::default();
            fill_suffixes(model, ComponentRef::Constraint(id), &mut entry);
            if entry != ExpectedEntry::default() {
                results.insert(name, entry);
            }
        }
        if let Some(name) = model.get_objective_name()
            && let Ok(value) = model.evaluate(&model.objective().expr)
        {
            results.insert(
                name,
                ExpectedEntry {
                    value: Some(value),
                    ..ExpectedEntry::default()
                },
            );
        }
        results
    }

    /// Compare a model's current values and import suffixes against these
    /// results.
    ///
    /// Suffixes the model does not import are not compared. A missing
    /// suffix value counts as zero, since solvers omit zero entries.
    pub fn validate(&self, model: &Model, tolerance: f64) -> Result<(), FixtureError> {
        let mut mismatches = Vec::new();
        for (name, entry) in &self.entries {
            let component = Component::resolve(model, name)?;
            if let Some(expected) = entry.value {
                let actual = match component {
                    Component::Variable(id) => model.value(id)?,
                    Component::Constraint(id) => model.constraint_body_value(id).ok(),
                    Component::Objective => model.evaluate(&model.objective().expr).ok(),
                };
                if !within(expected, actual, tolerance) {
                    mismatches.push(Mismatch {
                        component: name.clone(),
                        field: "value".to_string(),
                        expected,
                        actual,
                    });
                }
            }

            let Some(target) = component.suffix_target() else {
                continue;
            };
            for (suffix_name, expected) in entry.suffix_values() {
                let Some(suffix) = model.suffix(suffix_name) else {
                    continue;
                };
                if !suffix.direction().imports() {
                    continue;
                }
                let actual = suffix.get(target);
                if !within(expected, Some(actual.unwrap_or(0.0)), tolerance) {
                    mismatches.push(Mismatch {
                        component: name.clone(),
                        field: suffix_name.to_string(),
                        expected,
                        actual,
                    });
                }
            }
        }

        let status = if mismatches.is_empty() { "success" } else { "mismatch" };
        tracing::debug!(
            component = "fixtures",
            operation = "validate",
            status,
            entries = self.entries.len(),
            mismatches = mismatches.len(),
            "Validated current solution"
        );
        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(FixtureError::Mismatch(mismatches))
        }
    }
}

fn within(expected: f64, actual: Option<f64>, tolerance: f64) -> bool {
    actual.is_some_and(|actual| (expected - actual).abs() <= tolerance)
}

fn fill_suffixes(model: &Model, target: ComponentRef, entry: &mut ExpectedEntry) {
    for name in model.suffix_names() {
        if let Some(suffix) = model.suffix(name)
            && suffix.direction().imports()
            && let Some(value) = suffix.get(target)
        {
            entry.set_suffix(name, value);
        }
    }
}

/// Translate named results into an optimal [`Solution`] over `model`'s ids.
///
/// Variable values become primal values, constraint `dual` and `slack`
/// become duals and slacks, and the objective entry becomes the objective
/// value.
pub fn solution_from_results(
    model: &Model,
    results: &ExpectedResults,
) -> Result<Solution, FixtureError> {
    let mut solution = Solution::new(SolverStatus::Optimal);
    for (name, entry) in results.iter() {
        match Component::resolve(model, name)? {
            Component::Variable(id) => {
                if let Some(value) = entry.value {
                    solution.primal_values.insert(id, value);
                }
                if let Some(value) = entry.rc {
                    solution.reduced_costs.insert(id, value);
                }
                if let Some(value) = entry.lrc {
                    solution.lower_reduced_costs.insert(id, value);
                }
                if let Some(value) = entry.urc {
                    solution.upper_reduced_costs.insert(id, value);
                }
            }
            Component::Constraint(id) => {
                if let Some(value) = entry.dual {
                    solution.constraint_duals.insert(id, value);
                }
                if let Some(value) = entry.slack {
                    solution.constraint_slacks.insert(id, value);
                }
            }
            Component::Objective => solution.objective_value = entry.value,
        }
    }
    Ok(solution)
}
