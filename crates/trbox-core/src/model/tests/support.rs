use trbox_expr::{ConstraintId, Expr, VariableId};

use crate::model::Model;
use crate::types::Variable;

/// Two non-negative variables `a`, `b` and one constraint `a + b >= 1`.
pub(super) fn two_variable_model() -> (Model, VariableId, VariableId, ConstraintId) {
    let mut model = Model::new();
    let a = model.add_named_variable("a", Variable::non_negative()).unwrap();
    let b = model.add_named_variable("b", Variable::non_negative()).unwrap();
    let con = model
        .add_named_constraint("cover", (Expr::var(a) + Expr::var(b)).ge_scalar(1.0))
        .unwrap();
    model.minimize(Expr::var(a) * 2.0 + Expr::var(b) * 3.0).unwrap();
    (model, a, b, con)
}
