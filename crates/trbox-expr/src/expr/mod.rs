//! Expression types for nonlinear models with black-box calls.
//!
//! - `core`       — Expr: closed tree of sums, products, powers, intrinsics and calls
//! - `traverse`   — pre-order walk, post-order rewrite, variable identification
//! - `eval`       — numeric evaluation against a value/function context
//! - `format`     — infix rendering
//! - `constraint` — ConstraintExpr: body with comparison sense and RHS
//! - `error`      — Evaluation errors

pub mod constraint;
pub mod core;
pub mod error;
pub mod eval;
pub mod format;
pub mod traverse;

pub use constraint::{ComparisonSense, ConstraintExpr};
pub use core::{Expr, ExternalCall, UnaryFunction};
pub use error::ExprError;
pub use eval::EvalContext;
pub use format::{DefaultNames, NameResolver};
