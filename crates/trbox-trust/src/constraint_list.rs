//! Auxiliary constraint container indexed from 1.

use trbox_core::Constraint;

/// An ordered list of constraints addressed as `list[1]`, `list[2]`, ...
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintList {
    entries: Vec<Constraint>,
}

impl ConstraintList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a constraint and return its 1-based index.
    pub fn push(&mut self, constraint: Constraint) -> usize {
        self.entries.push(constraint);
        self.entries.len()
    }

    /// Constraint at a 1-based index.
    pub fn get(&self, index: usize) -> Option<&Constraint> {
        index.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(index, constraint)` pairs with 1-based indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Constraint)> {
        self.entries.iter().enumerate().map(|(i, c)| (i + 1, c))
    }
}

impl std::ops::Index<usize> for ConstraintList {
    type Output = Constraint;

    /// Panics when `index` is 0 or past the end, like slice indexing.
    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Some(constraint) => constraint,
            None => panic!(
                "constraint list index {index} out of range 1..={}",
                self.entries.len()
            ),
        }
    }
}
