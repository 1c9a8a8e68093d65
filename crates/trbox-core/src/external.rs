//! Opaque external ("black box") function handles.

use std::sync::Arc;

type BlackBox = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// A named numeric callable embedded in expressions by id.
///
/// The callable is evaluated numerically only; it is never differentiated
/// symbolically.
#[derive(Clone)]
pub struct ExternalFunction {
    name: String,
    arity: Option<usize>,
    callable: BlackBox,
}

impl ExternalFunction {
    pub fn new(name: impl Into<String>, callable: impl Fn(&[f64]) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            arity: None,
            callable: Arc::new(callable),
        }
    }

    /// Require exactly `arity` arguments at every call site.
    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    pub fn evaluate(&self, args: &[f64]) -> f64 {
        (self.callable)(args)
    }
}

impl std::fmt::Debug for ExternalFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}
