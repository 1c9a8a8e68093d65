//! Reference black-box model used by `trbox partition-demo`.

use serde::Serialize;
use trbox_core::{ExternalFunction, Model, ModelError, Variable};
use trbox_expr::{Expr, ExternalFunctionId, NameResolver};
use trbox_trust::TrustRegionInterface;

/// Five-variable model with a smooth objective, one black-box-free
/// constraint `c2`, and `c1` calling the black box.
///
/// With `compound` set the black box takes the single argument `x0 - x1`;
/// otherwise it takes `x0` and `x1` separately.
pub fn build_model(compound: bool) -> Result<(Model, ExternalFunctionId), ModelError> {
    let mut model = Model::named(if compound { "demo_compound" } else { "demo" });
    let mut add = |name: String| model.add_named_variable(name, Variable::reals().with_value(2.0));
    let z = [add("z[0]".into())?, add("z[1]".into())?, add("z[2]".into())?];
    let x = [add("x[0]".into())?, add("x[1]".into())?];
    let [z0, z1, z2] = z.map(Expr::var);
    let [x0, x1] = x.map(Expr::var);

    model.minimize(Expr::sum([
        (z0.clone() - 1.0).pow(2.0),
        (z0.clone() - z1.clone()).pow(2.0),
        (z2.clone() - 1.0).pow(2.0),
        (x0.clone() - 1.0).pow(4.0),
        (x1.clone() - 1.0).pow(6.0),
    ]))?;
    model.add_named_constraint(
        "c2",
        (z2.pow(4.0) * z1.clone().pow(2.0) + z1).eq_scalar(8.0 + 2.0_f64.sqrt()),
    )?;

    let (bb, call) = if compound {
        let bb = model
            .add_external_function(ExternalFunction::new("bb", |v| v[0].sin()).with_arity(1));
        (bb, Expr::call(bb, [x0.clone() - x1]))
    } else {
        let bb = model.add_external_function(
            ExternalFunction::new("bb", |v| (v[0] - v[1]).sin()).with_arity(2),
        );
        (bb, Expr::call(bb, [x0.clone(), x1]))
    };
    model.add_named_constraint(
        "c1",
        (x0 * z0.pow(2.0) + call).eq_scalar(2.0 * 2.0_f64.sqrt()),
    )?;
    Ok((model, bb))
}

/// Serializable summary of a partitioned model.
#[derive(Debug, Serialize)]
pub struct PartitionReport {
    pub lx: usize,
    pub ly: usize,
    pub lz: usize,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub states: Vec<String>,
    pub conset: Vec<String>,
    pub input_links: Vec<String>,
}

impl PartitionReport {
    pub fn new(interface: &TrustRegionInterface) -> Self {
        let model = interface.model();
        let names = |ids: &[trbox_expr::VariableId]| {
            ids.iter()
                .map(|id| model.variable_name(*id))
                .collect::<Vec<_>>()
        };
        let render = |list: &trbox_trust::ConstraintList| {
            list.iter()
                .map(|(index, constraint)| {
                    format!("[{index}] {} == {}", constraint.body.render(model), constraint.bounds.lower)
                })
                .collect::<Vec<_>>()
        };
        Self {
            lx: interface.lx(),
            ly: interface.ly(),
            lz: interface.lz(),
            inputs: names(interface.inputs()),
            outputs: names(interface.outputs()),
            states: names(interface.states()),
            conset: render(interface.conset()),
            input_links: render(interface.input_links()),
        }
    }
}
