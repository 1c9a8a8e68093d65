//! Trust-region interface error types.

use trbox_core::ModelError;
use trbox_expr::ExternalFunctionId;

/// Errors raised while partitioning a model or evaluating its black boxes.
#[derive(Debug, Clone, PartialEq)]
pub enum TrustRegionError {
    /// No external functions were listed
    NoExternalFunctions,
    /// A listed function is not registered on the model
    UnknownExternalFunction(ExternalFunctionId),
    /// None of the listed functions is called by the model
    NoCallSites,
    /// A call argument references no variables
    ConstantArgument {
        function: ExternalFunctionId,
        position: usize,
    },
    /// A value vector does not match the partition set it targets
    ValueLengthMismatch { expected: usize, actual: usize },
    /// Underlying model operation failed
    Model(ModelError),
}

impl TrustRegionError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            TrustRegionError::NoExternalFunctions => "TR_NO_EXTERNAL_FUNCTIONS",
            TrustRegionError::UnknownExternalFunction(_) => "TR_UNKNOWN_EXTERNAL_FUNCTION",
            TrustRegionError::NoCallSites => "TR_NO_CALL_SITES",
            TrustRegionError::ConstantArgument { .. } => "TR_CONSTANT_ARGUMENT",
            TrustRegionError::ValueLengthMismatch { .. } => "TR_VALUE_LENGTH_MISMATCH",
            TrustRegionError::Model(_) => "TR_MODEL",
        }
    }
}

impl std::fmt::Display for TrustRegionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrustRegionError::NoExternalFunctions => {
                write!(f, "[{}] At least one external function is required", self.code())
            }
            TrustRegionError::UnknownExternalFunction(id) => write!(
                f,
                "[{}] External function ID {} is not registered on the model",
                self.code(),
                id.inner()
            ),
            TrustRegionError::NoCallSites => write!(
                f,
                "[{}] Model contains no calls to the listed external functions",
                self.code()
            ),
            TrustRegionError::ConstantArgument { function, position } => write!(
                f,
                "[{}] Argument {} of external function ID {} references no variables",
                self.code(),
                position,
                function.inner()
            ),
            TrustRegionError::ValueLengthMismatch { expected, actual } => write!(
                f,
                "[{}] Expected {} values, got {}",
                self.code(),
                expected,
                actual
            ),
            TrustRegionError::Model(err) => write!(f, "[{}] {}", self.code(), err),
        }
    }
}

impl std::error::Error for TrustRegionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrustRegionError::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for TrustRegionError {
    fn from(err: ModelError) -> Self {
        TrustRegionError::Model(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use trbox_core::ModelError;
    use trbox_expr::{ExternalFunctionId, VariableId};

    use super::TrustRegionError;

    #[test]
    fn codes_prefix_display() {
        let err = TrustRegionError::ConstantArgument {
            function: ExternalFunctionId::new(3),
            position: 1,
        };
        assert_eq!(err.code(), "TR_CONSTANT_ARGUMENT");
        assert_eq!(
            err.to_string(),
            "[TR_CONSTANT_ARGUMENT] Argument 1 of external function ID 3 references no variables"
        );
    }

    #[test]
    fn model_errors_are_wrapped() {
        let err: TrustRegionError = ModelError::InvalidVariableId(VariableId::new(9)).into();
        assert_eq!(err.code(), "TR_MODEL");
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("[TR_MODEL] [VARIABLE_INVALID_ID]"));
    }
}
