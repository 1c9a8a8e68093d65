//! Fixture error types.

use std::path::PathBuf;

use trbox_core::ModelError;

/// One value that differs from the expected results.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    /// Component name, e.g. `x[1]` or `primalcon[4]`.
    pub component: String,
    /// `value` or a suffix name.
    pub field: String,
    pub expected: f64,
    /// `None` when the model holds no value.
    pub actual: Option<f64>,
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.actual {
            Some(actual) => write!(
                f,
                "{}.{}: expected {}, got {}",
                self.component, self.field, self.expected, actual
            ),
            None => write!(
                f,
                "{}.{}: expected {}, got no value",
                self.component, self.field, self.expected
            ),
        }
    }
}

/// Errors raised by fixtures and result validation.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureError {
    /// The model has not been generated yet
    NotGenerated(&'static str),
    /// No registered fixture has this description
    UnknownModel(String),
    /// Expected results name a component the model does not have
    UnknownComponent(String),
    /// Results file could not be read or written
    Io { path: PathBuf, message: String },
    /// Results file is not valid JSON for expected results
    Parse { path: PathBuf, message: String },
    /// Current solution differs from the expected results
    Mismatch(Vec<Mismatch>),
    /// Underlying model operation failed
    Model(ModelError),
}

impl FixtureError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            FixtureError::NotGenerated(_) => "FIXTURE_NOT_GENERATED",
            FixtureError::UnknownModel(_) => "FIXTURE_UNKNOWN_MODEL",
            FixtureError::UnknownComponent(_) => "FIXTURE_UNKNOWN_COMPONENT",
            FixtureError::Io { .. } => "FIXTURE_IO",
            FixtureError::Parse { .. } => "FIXTURE_PARSE",
            FixtureError::Mismatch(_) => "FIXTURE_MISMATCH",
            FixtureError::Model(_) => "FIXTURE_MODEL",
        }
    }
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixtureError::NotGenerated(name) => write!(
                f,
                "[{}] Model '{}' has not been generated",
                self.code(),
                name
            ),
            FixtureError::UnknownModel(name) => {
                write!(f, "[{}] No test model named '{}'", self.code(), name)
            }
            FixtureError::UnknownComponent(name) => write!(
                f,
                "[{}] Model has no component named '{}'",
                self.code(),
                name
            ),
            FixtureError::Io { path, message } => {
                write!(f, "[{}] {}: {}", self.code(), path.display(), message)
            }
            FixtureError::Parse { path, message } => write!(
                f,
                "[{}] Invalid results in {}: {}",
                self.code(),
                path.display(),
                message
            ),
            FixtureError::Mismatch(mismatches) => {
                write!(
                    f,
                    "[{}] {} value(s) differ from expected results",
                    self.code(),
                    mismatches.len()
                )?;
                for mismatch in mismatches {
                    write!(f, "\n  {mismatch}")?;
                }
                Ok(())
            }
            FixtureError::Model(err) => write!(f, "[{}] {}", self.code(), err),
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FixtureError::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for FixtureError {
    fn from(err: ModelError) -> Self {
        FixtureError::Model(err)
    }
}
