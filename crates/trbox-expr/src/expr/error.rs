//! Expression evaluation errors.

use crate::ids::{ExternalFunctionId, VariableId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// A referenced variable has no value.
    UnsetVariable(VariableId),
    /// A call references a function the context does not know.
    UnknownFunction(ExternalFunctionId),
    /// A call passes the wrong number of arguments.
    ArityMismatch {
        function: ExternalFunctionId,
        expected: usize,
        actual: usize,
    },
}

impl ExprError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ExprError::UnsetVariable(_) => "EXPR_UNSET_VARIABLE",
            ExprError::UnknownFunction(_) => "EXPR_UNKNOWN_FUNCTION",
            ExprError::ArityMismatch { .. } => "EXPR_ARITY_MISMATCH",
        }
    }
}

impl std::fmt::Display for ExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprError::UnsetVariable(id) => write!(
                f,
                "[{}] Variable ID {} has no value",
                self.code(),
                id.inner()
            ),
            ExprError::UnknownFunction(id) => write!(
                f,
                "[{}] External function ID {} is not registered",
                self.code(),
                id.inner()
            ),
            ExprError::ArityMismatch {
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
        }
    }
}

impl std::error::Error for ExprError {}
