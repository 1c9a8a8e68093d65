//! Core expression type: a closed tree of algebraic nodes.
//!
//! Leaves are constants and variable references. Interior nodes are
//! n-ary sums and products, binary powers, unary intrinsics, and calls
//! to registered external (black-box) functions. The external function
//! itself is referenced by id only; its callable lives in the model.

use crate::expr::constraint::{ComparisonSense, ConstraintExpr};
use crate::ids::{ExternalFunctionId, VariableId};

/// Differentiable intrinsic functions of one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryFunction {
    Sin,
    Cos,
    Exp,
    Log,
    Sqrt,
    Abs,
}

impl UnaryFunction {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryFunction::Sin => "sin",
            UnaryFunction::Cos => "cos",
            UnaryFunction::Exp => "exp",
            UnaryFunction::Log => "log",
            UnaryFunction::Sqrt => "sqrt",
            UnaryFunction::Abs => "abs",
        }
    }

    pub fn apply(self, value: f64) -> f64 {
        match self {
            UnaryFunction::Sin => value.sin(),
            UnaryFunction::Cos => value.cos(),
            UnaryFunction::Exp => value.exp(),
            UnaryFunction::Log => value.ln(),
            UnaryFunction::Sqrt => value.sqrt(),
            UnaryFunction::Abs => value.abs(),
        }
    }
}

/// A call site of an external function inside an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalCall {
    function: ExternalFunctionId,
    args: Vec<Expr>,
}

impl ExternalCall {
    pub fn new(function: ExternalFunctionId, args: Vec<Expr>) -> Self {
        Self { function, args }
    }

    pub fn function(&self) -> ExternalFunctionId {
        self.function
    }

    pub fn args(&self) -> &[Expr] {
        &self.args
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn into_parts(self) -> (ExternalFunctionId, Vec<Expr>) {
        (self.function, self.args)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(f64),
    Var(VariableId),
    Sum(Vec<Expr>),
    Product(Vec<Expr>),
    Power(Box<Expr>, Box<Expr>),
    Unary(UnaryFunction, Box<Expr>),
    Call(ExternalCall),
}

impl Default for Expr {
    fn default() -> Self {
        Expr::Constant(0.0)
    }
}

impl Expr {
    // ── Constructors ────────────────────────────────────────

    pub fn constant(value: f64) -> Self {
        Expr::Constant(value)
    }

    /// Single variable reference.
    pub fn var(var_id: VariableId) -> Self {
        Expr::Var(var_id)
    }

    /// coeff * var, collapsing the unit coefficient.
    pub fn term(var_id: VariableId, coeff: f64) -> Self {
        if coeff == 1.0 {
            Expr::Var(var_id)
        } else {
            Expr::Product(vec![Expr::Constant(coeff), Expr::Var(var_id)])
        }
    }

    /// Sum of linear terms: Σ coeff * var.
    pub fn linear(terms: impl IntoIterator<Item = (VariableId, f64)>) -> Self {
        Expr::sum(
            terms
                .into_iter()
                .filter(|(_, c)| *c != 0.0)
                .map(|(v, c)| Expr::term(v, c)),
        )
    }

    /// N-ary sum. Nested sums are flattened; an empty sum is zero.
    pub fn sum(parts: impl IntoIterator<Item = Expr>) -> Self {
        let mut flat = Vec::new();
        for part in parts {
            match part {
                Expr::Sum(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Expr::Constant(0.0),
            1 => flat.pop().unwrap_or_default(),
            _ => Expr::Sum(flat),
        }
    }

    /// N-ary product. Nested products are flattened; an empty product is one.
    pub fn product(factors: impl IntoIterator<Item = Expr>) -> Self {
        let mut flat = Vec::new();
        for factor in factors {
            match factor {
                Expr::Product(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Expr::Constant(1.0),
            1 => flat.pop().unwrap_or_default(),
            _ => Expr::Product(flat),
        }
    }

    pub fn pow(self, exponent: impl Into<Expr>) -> Self {
        Expr::Power(Box::new(self), Box::new(exponent.into()))
    }

    pub fn apply(self, function: UnaryFunction) -> Self {
        Expr::Unary(function, Box::new(self))
    }

    pub fn sin(self) -> Self {
        self.apply(UnaryFunction::Sin)
    }

    pub fn cos(self) -> Self {
        self.apply(UnaryFunction::Cos)
    }

    pub fn exp(self) -> Self {
        self.apply(UnaryFunction::Exp)
    }

    pub fn log(self) -> Self {
        self.apply(UnaryFunction::Log)
    }

    pub fn sqrt(self) -> Self {
        self.apply(UnaryFunction::Sqrt)
    }

    /// Call an external function with the given argument expressions.
    pub fn call(function: ExternalFunctionId, args: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Call(ExternalCall::new(function, args.into_iter().collect()))
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn as_variable(&self) -> Option<VariableId> {
        match self {
            Expr::Var(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Expr::Constant(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_call(&self) -> Option<&ExternalCall> {
        match self {
            Expr::Call(call) => Some(call),
            _ => None,
        }
    }

    // ── Comparison methods (produce ConstraintExpr) ─────────

    pub fn compare_scalar(self, rhs: f64, sense: ComparisonSense) -> ConstraintExpr {
        ConstraintExpr::new(self, sense, rhs)
    }

    /// `self - other` compared against zero.
    pub fn compare_expr(self, other: Expr, sense: ComparisonSense) -> ConstraintExpr {
        ConstraintExpr::new(self - other, sense, 0.0)
    }

    pub fn le_scalar(self, rhs: f64) -> ConstraintExpr {
        self.compare_scalar(rhs, ComparisonSense::LessEqual)
    }

    pub fn ge_scalar(self, rhs: f64) -> ConstraintExpr {
        self.compare_scalar(rhs, ComparisonSense::GreaterEqual)
    }

    pub fn eq_scalar(self, rhs: f64) -> ConstraintExpr {
        self.compare_scalar(rhs, ComparisonSense::Equal)
    }

    pub fn le_expr(self, rhs: Expr) -> ConstraintExpr {
        self.compare_expr(rhs, ComparisonSense::LessEqual)
    }

    pub fn ge_expr(self, rhs: Expr) -> ConstraintExpr {
        self.compare_expr(rhs, ComparisonSense::GreaterEqual)
    }

    pub fn eq_expr(self, rhs: Expr) -> ConstraintExpr {
        self.compare_expr(rhs, ComparisonSense::Equal)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Constant(value)
    }
}

impl From<VariableId> for Expr {
    fn from(id: VariableId) -> Self {
        Expr::Var(id)
    }
}

// ── Operator overloads ──────────────────────────────────────

impl std::ops::Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Self::Output {
        Expr::sum([self, rhs])
    }
}

impl std::ops::Add<f64> for Expr {
    type Output = Expr;

    fn add(self, rhs: f64) -> Self::Output {
        Expr::sum([self, Expr::Constant(rhs)])
    }
}

impl std::ops::Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Self::Output {
        Expr::sum([self, -rhs])
    }
}

impl std::ops::Sub<f64> for Expr {
    type Output = Expr;

    fn sub(self, rhs: f64) -> Self::Output {
        Expr::sum([self, Expr::Constant(-rhs)])
    }
}

impl std::ops::Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Self::Output {
        Expr::product([self, rhs])
    }
}

impl std::ops::Mul<f64> for Expr {
    type Output = Expr;

    fn mul(self, rhs: f64) -> Self::Output {
        Expr::product([Expr::Constant(rhs), self])
    }
}

impl std::ops::Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Self::Output {
        Expr::product([self, rhs.pow(-1.0)])
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        match self {
            Expr::Constant(value) => Expr::Constant(-value),
            other => Expr::product([Expr::Constant(-1.0), other]),
        }
    }
}
