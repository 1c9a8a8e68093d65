//! Tree traversal: pre-order walk and post-order rewrite.

use std::collections::HashSet;
use std::convert::Infallible;

use crate::expr::core::{Expr, ExternalCall};
use crate::ids::{ExternalFunctionId, VariableId};

impl Expr {
    /// Visit every node in pre-order (parent before children, left to right).
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Expr)) {
        visit(self);
        match self {
            Expr::Constant(_) | Expr::Var(_) => {}
            Expr::Sum(parts) | Expr::Product(parts) => {
                for part in parts {
                    part.walk(visit);
                }
            }
            Expr::Power(base, exponent) => {
                base.walk(visit);
                exponent.walk(visit);
            }
            Expr::Unary(_, arg) => arg.walk(visit),
            Expr::Call(call) => {
                for arg in call.args() {
                    arg.walk(visit);
                }
            }
        }
    }

    /// Rebuild the tree bottom-up. `exit` sees each node after its
    /// children have already been rewritten and returns its replacement.
    pub fn try_rewrite<E>(
        self,
        exit: &mut impl FnMut(Expr) -> Result<Expr, E>,
    ) -> Result<Expr, E> {
        let rebuilt = match self {
            leaf @ (Expr::Constant(_) | Expr::Var(_)) => leaf,
            Expr::Sum(parts) => Expr::Sum(
                parts
                    .into_iter()
                    .map(|part| part.try_rewrite(exit))
                    .collect::<Result<_, _>>()?,
            ),
            Expr::Product(factors) => Expr::Product(
                factors
                    .into_iter()
                    .map(|factor| factor.try_rewrite(exit))
                    .collect::<Result<_, _>>()?,
            ),
            Expr::Power(base, exponent) => Expr::Power(
                Box::new(base.try_rewrite(exit)?),
                Box::new(exponent.try_rewrite(exit)?),
            ),
            Expr::Unary(function, arg) => Expr::Unary(function, Box::new(arg.try_rewrite(exit)?)),
            Expr::Call(call) => {
                let (function, args) = call.into_parts();
                let args = args
                    .into_iter()
                    .map(|arg| arg.try_rewrite(exit))
                    .collect::<Result<_, _>>()?;
                Expr::Call(ExternalCall::new(function, args))
            }
        };
        exit(rebuilt)
    }

    /// Infallible form of [`Expr::try_rewrite`].
    pub fn rewrite(self, exit: &mut impl FnMut(Expr) -> Expr) -> Expr {
        match self.try_rewrite(&mut |node| Ok::<_, Infallible>(exit(node))) {
            Ok(expr) => expr,
            Err(never) => match never {},
        }
    }

    /// Distinct variables referenced anywhere in the tree, in order of
    /// first appearance. Variables inside call arguments are included.
    pub fn variables(&self) -> Vec<VariableId> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        self.walk(&mut |node| {
            if let Expr::Var(id) = node
                && seen.insert(*id)
            {
                ordered.push(*id);
            }
        });
        ordered
    }

    /// Whether the tree references no variables at all.
    pub fn is_fixed(&self) -> bool {
        let mut fixed = true;
        self.walk(&mut |node| {
            if matches!(node, Expr::Var(_)) {
                fixed = false;
            }
        });
        fixed
    }

    /// Every call node, outermost first.
    pub fn calls(&self) -> Vec<&ExternalCall> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if let Expr::Call(call) = node {
                found.push(call);
            }
        });
        found
    }

    /// Number of call sites that invoke one of `functions`.
    pub fn count_calls_to(&self, functions: &HashSet<ExternalFunctionId>) -> usize {
        self.calls()
            .into_iter()
            .filter(|call| functions.contains(&call.function()))
            .count()
    }
}
