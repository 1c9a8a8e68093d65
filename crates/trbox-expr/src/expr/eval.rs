//! Numeric evaluation of expression trees.

use crate::expr::core::Expr;
use crate::expr::error::ExprError;
use crate::ids::{ExternalFunctionId, VariableId};

/// Supplies variable values and external-function evaluations.
pub trait EvalContext {
    /// Current value of a variable, `None` when unset.
    fn value(&self, id: VariableId) -> Option<f64>;

    /// Evaluate an external function at the given argument values.
    fn call(&self, function: ExternalFunctionId, args: &[f64]) -> Result<f64, ExprError>;
}

impl Expr {
    pub fn evaluate(&self, ctx: &impl EvalContext) -> Result<f64, ExprError> {
        match self {
            Expr::Constant(value) => Ok(*value),
            Expr::Var(id) => ctx.value(*id).ok_or(ExprError::UnsetVariable(*id)),
            Expr::Sum(parts) => parts
                .iter()
                .try_fold(0.0, |acc, part| Ok(acc + part.evaluate(ctx)?)),
            Expr::Product(factors) => factors
                .iter()
                .try_fold(1.0, |acc, factor| Ok(acc * factor.evaluate(ctx)?)),
            Expr::Power(base, exponent) => {
                let base = base.evaluate(ctx)?;
                let exponent = exponent.evaluate(ctx)?;
                Ok(base.powf(exponent))
            }
            Expr::Unary(function, arg) => Ok(function.apply(arg.evaluate(ctx)?)),
            Expr::Call(call) => {
                let args = call
                    .args()
                    .iter()
                    .map(|arg| arg.evaluate(ctx))
                    .collect::<Result<Vec<_>, _>>()?;
                ctx.call(call.function(), &args)
            }
        }
    }
}
