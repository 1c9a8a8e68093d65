//! Suffixes: named per-component values exchanged with a solver.

use std::collections::BTreeMap;

use trbox_expr::{ConstraintId, VariableId};

// Suffix names filled from a solution on import.
pub const DUAL: &str = "dual";
pub const REDUCED_COST: &str = "rc";
pub const SLACK: &str = "slack";
pub const LOWER_REDUCED_COST: &str = "lrc";
pub const UPPER_REDUCED_COST: &str = "urc";

/// Which way suffix values flow relative to the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixDirection {
    /// Kept on the model only.
    Local,
    /// Filled from solver results.
    Import,
    /// Sent to the solver.
    Export,
    ImportExport,
}

impl SuffixDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SuffixDirection::Local => "local",
            SuffixDirection::Import => "import",
            SuffixDirection::Export => "export",
            SuffixDirection::ImportExport => "import_export",
        }
    }

    pub fn imports(self) -> bool {
        matches!(self, SuffixDirection::Import | SuffixDirection::ImportExport)
    }
}

/// A model component a suffix value is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentRef {
    Variable(VariableId),
    Constraint(ConstraintId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Suffix {
    direction: SuffixDirection,
    values: BTreeMap<ComponentRef, f64>,
}

impl Suffix {
    pub fn new(direction: SuffixDirection) -> Self {
        Self {
            direction,
            values: BTreeMap::new(),
        }
    }

    pub fn direction(&self) -> SuffixDirection {
        self.direction
    }

    pub fn get(&self, component: ComponentRef) -> Option<f64> {
        self.values.get(&component).copied()
    }

    pub fn set(&mut self, component: ComponentRef, value: f64) {
        self.values.insert(component, value);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentRef, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn import_directions() {
        assert!(SuffixDirection::Import.imports());
        assert!(SuffixDirection::ImportExport.imports());
        assert!(!SuffixDirection::Local.imports());
        assert!(!SuffixDirection::Export.imports());
    }

    #[test]
    fn values_are_keyed_by_component() {
        let mut suffix = Suffix::new(SuffixDirection::Import);
        let var = ComponentRef::Variable(VariableId::new(0));
        let con = ComponentRef::Constraint(ConstraintId::new(0));
        suffix.set(var, 0.5);
        suffix.set(con, 1.0);

        assert_eq!(suffix.get(var), Some(0.5));
        assert_eq!(suffix.get(con), Some(1.0));
        assert_eq!(suffix.len(), 2);

        suffix.clear();
        assert!(suffix.is_empty());
    }
}
