//! Infix rendering of expressions.

use std::fmt::Write as _;

use crate::expr::core::Expr;
use crate::ids::{ExternalFunctionId, VariableId};

/// Resolves display names for leaves and call targets.
pub trait NameResolver {
    fn variable_name(&self, id: VariableId) -> String;
    fn function_name(&self, id: ExternalFunctionId) -> String;
}

/// Names variables `v{id}` and functions `ef{id}`.
pub struct DefaultNames;

impl NameResolver for DefaultNames {
    fn variable_name(&self, id: VariableId) -> String {
        format!("v{}", id.inner())
    }

    fn function_name(&self, id: ExternalFunctionId) -> String {
        format!("ef{}", id.inner())
    }
}

// Binding strength; a child is parenthesized when it binds looser than its slot.
const PREC_SUM: u8 = 1;
const PREC_PRODUCT: u8 = 2;
const PREC_POWER: u8 = 3;
const PREC_ATOM: u8 = 4;

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Sum(_) => PREC_SUM,
        Expr::Product(_) => PREC_PRODUCT,
        Expr::Power(..) => PREC_POWER,
        Expr::Constant(value) if *value < 0.0 => PREC_SUM,
        _ => PREC_ATOM,
    }
}

impl Expr {
    /// Render with names from `names`.
    pub fn render(&self, names: &impl NameResolver) -> String {
        let mut out = String::new();
        write_expr(&mut out, self, names);
        out
    }
}

fn write_child(out: &mut String, child: &Expr, min_prec: u8, names: &impl NameResolver) {
    if precedence(child) < min_prec {
        out.push('(');
        write_expr(out, child, names);
        out.push(')');
    } else {
        write_expr(out, child, names);
    }
}

fn write_expr(out: &mut String, expr: &Expr, names: &impl NameResolver) {
    match expr {
        Expr::Constant(value) => {
            let _ = write!(out, "{value}");
        }
        Expr::Var(id) => out.push_str(&names.variable_name(*id)),
        Expr::Sum(parts) => {
            for (idx, part) in parts.iter().enumerate() {
                match part {
                    Expr::Constant(value) if idx > 0 && *value < 0.0 => {
                        let _ = write!(out, " - {}", -value);
                        continue;
                    }
                    Expr::Product(factors) if idx > 0 => {
                        if let Some((Expr::Constant(coeff), rest)) = factors.split_first()
                            && *coeff < 0.0
                            && !rest.is_empty()
                        {
                            out.push_str(" - ");
                            write_negated_term(out, -coeff, rest, names);
                            continue;
                        }
                        out.push_str(" + ");
                    }
                    _ if idx > 0 => out.push_str(" + "),
                    _ => {}
                }
                write_child(out, part, PREC_SUM, names);
            }
        }
        Expr::Product(factors) => {
            for (idx, factor) in factors.iter().enumerate() {
                if idx > 0 {
                    out.push('*');
                }
                write_child(out, factor, PREC_POWER, names);
            }
        }
        Expr::Power(base, exponent) => {
            write_child(out, base, PREC_ATOM, names);
            out.push_str("**");
            write_child(out, exponent, PREC_ATOM, names);
        }
        Expr::Unary(function, arg) => {
            out.push_str(function.as_str());
            out.push('(');
            write_expr(out, arg, names);
            out.push(')');
        }
        Expr::Call(call) => {
            out.push_str(&names.function_name(call.function()));
            out.push('(');
            for (idx, arg) in call.args().iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                write_expr(out, arg, names);
            }
            out.push(')');
        }
    }
}

// `coeff*rest` after a leading minus; a unit coefficient is dropped.
fn write_negated_term(out: &mut String, coeff: f64, rest: &[Expr], names: &impl NameResolver) {
    let mut first = true;
    if coeff != 1.0 {
        let _ = write!(out, "{coeff}");
        first = false;
    }
    for factor in rest {
        if !first {
            out.push('*');
        }
        write_child(out, factor, PREC_POWER, names);
        first = false;
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(&DefaultNames))
    }
}
