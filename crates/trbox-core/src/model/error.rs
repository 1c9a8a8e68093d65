//! Model error types.

use trbox_expr::{ConstraintId, ExprError, ExternalFunctionId, VariableId};

use crate::solution::SolverStatus;

/// Errors that can occur during model operations
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Invalid variable ID
    InvalidVariableId(VariableId),
    /// Invalid variable bounds
    InvalidVariableBounds { lower: f64, upper: f64 },
    /// Invalid constraint ID
    InvalidConstraintId(ConstraintId),
    /// Invalid constraint bounds
    InvalidConstraintBounds { lower: f64, upper: f64 },
    /// External function not registered on this model
    UnknownExternalFunction(ExternalFunctionId),
    /// Call site passes the wrong number of arguments
    ExternalArityMismatch {
        function: ExternalFunctionId,
        expected: usize,
        actual: usize,
    },
    /// Component name already in use
    DuplicateName { kind: &'static str, name: String },
    /// No objective set
    NoObjective,
    /// Objective already set
    MultipleObjectives,
    /// Suffix already declared
    DuplicateSuffix(String),
    /// Suffix not declared
    UnknownSuffix(String),
    /// Solution status does not carry values
    SolutionNotLoadable { status: SolverStatus },
    /// Expression could not be evaluated at the current point
    Evaluation(ExprError),
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::InvalidVariableId(_) => "VARIABLE_INVALID_ID",
            ModelError::InvalidVariableBounds { .. } => "VARIABLE_INVALID_BOUNDS",
            ModelError::InvalidConstraintId(_) => "CONSTRAINT_INVALID_ID",
            ModelError::InvalidConstraintBounds { .. } => "CONSTRAINT_INVALID_BOUNDS",
            ModelError::UnknownExternalFunction(_) => "EXTERNAL_UNKNOWN_FUNCTION",
            ModelError::ExternalArityMismatch { .. } => "EXTERNAL_ARITY_MISMATCH",
            ModelError::DuplicateName { .. } => "NAME_DUPLICATE",
            ModelError::NoObjective => "OBJECTIVE_MISSING",
            ModelError::MultipleObjectives => "OBJECTIVE_ALREADY_SET",
            ModelError::DuplicateSuffix(_) => "SUFFIX_DUPLICATE",
            ModelError::UnknownSuffix(_) => "SUFFIX_UNKNOWN",
            ModelError::SolutionNotLoadable { .. } => "SOLUTION_NOT_LOADABLE",
            ModelError::Evaluation(_) => "MODEL_EVALUATION",
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidVariableId(id) => write!(
                f,
                "[{}] Variable ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::InvalidVariableBounds { lower, upper } => write!(
                f,
                "[{}] Variable bounds invalid: lower ({}) > upper ({})",
                self.code(),
                lower,
                upper
            ),
            ModelError::InvalidConstraintId(id) => write!(
                f,
                "[{}] Constraint ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::InvalidConstraintBounds { lower, upper } => write!(
                f,
                "[{}] Constraint bounds invalid: lower ({}) > upper ({})",
                self.code(),
                lower,
                upper
            ),
            ModelError::UnknownExternalFunction(id) => write!(
                f,
                "[{}] External function ID {} is not registered",
                self.code(),
                id.inner()
            ),
            ModelError::ExternalArityMismatch {
                function,
                expected,
                actual,
            } => write!(
                f,
                "[{}] External function ID {} expects {} arguments, got {}",
                self.code(),
                function.inner(),
                expected,
                actual
            ),
            ModelError::DuplicateName { kind, name } => {
                write!(f, "[{}] {} name '{}' already in use", self.code(), kind, name)
            }
            ModelError::NoObjective => {
                write!(f, "[{}] Model has no objective defined", self.code())
            }
            ModelError::MultipleObjectives => write!(
                f,
                "[{}] Model already has an objective; use set_objective to replace",
                self.code()
            ),
            ModelError::DuplicateSuffix(name) => {
                write!(f, "[{}] Suffix '{}' already declared", self.code(), name)
            }
            ModelError::UnknownSuffix(name) => {
                write!(f, "[{}] Suffix '{}' is not declared", self.code(), name)
            }
            ModelError::SolutionNotLoadable { status } => write!(
                f,
                "[{}] Cannot load values from a solution with status {}",
                self.code(),
                status
            ),
            ModelError::Evaluation(err) => {
                write!(f, "[{}] Evaluation failed: {}", self.code(), err)
            }
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Evaluation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ExprError> for ModelError {
    fn from(err: ExprError) -> Self {
        ModelError::Evaluation(err)
    }
}
