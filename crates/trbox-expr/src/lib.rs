pub mod expr;
pub mod ids;

pub use expr::{
    ComparisonSense, ConstraintExpr, DefaultNames, EvalContext, Expr, ExprError, ExternalCall,
    NameResolver, UnaryFunction,
};
pub use ids::{ConstraintId, ExternalFunctionId, VariableId};
