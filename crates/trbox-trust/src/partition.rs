//! Partition state and the call-site substitution pass.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use trbox_core::{Bounds, Constraint, Model, Variable};
use trbox_expr::{ConstraintId, Expr, ExternalFunctionId, VariableId};

use crate::config::PartitionConfig;
use crate::constraint_list::ConstraintList;
use crate::error::TrustRegionError;

const INPUT_PREFIX: &str = "tR.x";
const OUTPUT_PREFIX: &str = "tR.y";

/// Where a call site was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOwner {
    Objective,
    Constraint(ConstraintId),
}

/// One argument of a partitioned call, in argument order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CallArgument {
    /// Bare input variable or synthetic input linked to a compound argument.
    Input(VariableId),
    /// Argument with no variables, kept only when constants are allowed.
    Constant(f64),
}

/// A replaced external call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSite {
    pub function: ExternalFunctionId,
    /// Placeholder standing in for the call's value.
    pub output: VariableId,
    pub arguments: Vec<CallArgument>,
    /// Position of each input argument within `x`.
    pub input_indices: Vec<usize>,
    pub owner: CallOwner,
    /// 1-based index of the call's equality in `conset`.
    pub conset_index: usize,
}

impl CallSite {
    /// Input variables in argument order, skipping constants.
    pub fn inputs(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.arguments.iter().filter_map(|argument| match argument {
            CallArgument::Input(id) => Some(*id),
            CallArgument::Constant(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct LinkedInput {
    input: VariableId,
    definition: Expr,
}

/// Black-box inputs (`x`), outputs (`y`) and remaining variables (`z`),
/// plus the auxiliary constraints produced while replacing calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    inputs: Vec<VariableId>,
    input_positions: HashMap<VariableId, usize>,
    outputs: Vec<VariableId>,
    states: Vec<VariableId>,
    call_sites: Vec<CallSite>,
    conset: ConstraintList,
    input_links: ConstraintList,
    linked_inputs: Vec<LinkedInput>,
}

impl Partition {
    pub fn inputs(&self) -> &[VariableId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[VariableId] {
        &self.outputs
    }

    pub fn states(&self) -> &[VariableId] {
        &self.states
    }

    pub fn call_sites(&self) -> &[CallSite] {
        &self.call_sites
    }

    /// `placeholder == call(args)` for every call site.
    pub fn conset(&self) -> &ConstraintList {
        &self.conset
    }

    /// `input == argument` for every compound call argument.
    pub fn input_links(&self) -> &ConstraintList {
        &self.input_links
    }

    /// Position of `id` within `x`.
    pub fn input_index(&self, id: VariableId) -> Option<usize> {
        self.input_positions.get(&id).copied()
    }

    /// Synthetic inputs paired with the argument expressions they stand for.
    pub fn linked_inputs(&self) -> impl Iterator<Item = (VariableId, &Expr)> {
        self.linked_inputs
            .iter()
            .map(|link| (link.input, &link.definition))
    }

    fn register_input(&mut self, id: VariableId) -> usize {
        if let Some(position) = self.input_positions.get(&id) {
            return *position;
        }
        let position = self.inputs.len();
        self.inputs.push(id);
        self.input_positions.insert(id, position);
        position
    }
}

/// Replaces listed external calls in a model, recording them in a partition.
pub(crate) struct Partitioner<'a> {
    model: &'a mut Model,
    partition: &'a mut Partition,
    functions: &'a HashSet<ExternalFunctionId>,
    config: &'a PartitionConfig,
    placeholders: HashSet<VariableId>,
}

impl<'a> Partitioner<'a> {
    pub(crate) fn new(
        model: &'a mut Model,
        partition: &'a mut Partition,
        functions: &'a HashSet<ExternalFunctionId>,
        config: &'a PartitionConfig,
    ) -> Self {
        let placeholders = partition.outputs.iter().copied().collect();
        Self {
            model,
            partition,
            functions,
            config,
            placeholders,
        }
    }

    /// Scan the model and return the number of call sites replaced.
    pub(crate) fn run(mut self) -> Result<usize, TrustRegionError> {
        let started = Instant::now();
        let before = self.partition.call_sites.len();

        let targets: Vec<ConstraintId> = self
            .model
            .active_constraints()
            .filter(|(_, constraint)| constraint.body.count_calls_to(self.functions) > 0)
            .map(|(id, _)| id)
            .collect();
        for id in targets {
            let body = self.model.get_constraint(id)?.body.clone();
            let body = self.substitute(body, CallOwner::Constraint(id))?;
            self.model.set_constraint_body(id, body)?;
        }

        let objective = self.model.objective();
        if self.config.scans_objective()
            && objective.sense.is_some()
            && objective.expr.count_calls_to(self.functions) > 0
        {
            let expr = objective.expr.clone();
            let expr = self.substitute(expr, CallOwner::Objective)?;
            self.model.set_objective_expr(expr)?;
        }

        self.partition.states = classify_states(self.model, self.partition);

        let replaced = self.partition.call_sites.len() - before;
        tracing::debug!(
            component = "trust_region",
            operation = "partition",
            status = "success",
            new_call_sites = replaced,
            inputs = self.partition.inputs.len(),
            outputs = self.partition.outputs.len(),
            states = self.partition.states.len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Partitioned external calls"
        );
        Ok(replaced)
    }

    fn substitute(&mut self, expr: Expr, owner: CallOwner) -> Result<Expr, TrustRegionError> {
        expr.try_rewrite(&mut |node| match node {
            Expr::Call(call) if self.functions.contains(&call.function()) => {
                let (function, args) = call.into_parts();
                self.replace_call(function, args, owner)
            }
            other => Ok(other),
        })
    }

    fn replace_call(
        &mut self,
        function: ExternalFunctionId,
        args: Vec<Expr>,
        owner: CallOwner,
    ) -> Result<Expr, TrustRegionError> {
        let mut arguments = Vec::with_capacity(args.len());
        let mut input_indices = Vec::new();
        for (position, arg) in args.iter().enumerate() {
            let input = match arg.as_variable() {
                Some(id) if !self.placeholders.contains(&id) => id,
                _ if arg.is_fixed() => {
                    if !self.config.allows_constant_arguments() {
                        return Err(TrustRegionError::ConstantArgument { function, position });
                    }
                    arguments.push(CallArgument::Constant(self.model.evaluate(arg)?));
                    continue;
                }
                _ => self.link_input(arg)?,
            };
            input_indices.push(self.partition.register_input(input));
            arguments.push(CallArgument::Input(input));
        }

        let call = Expr::call(function, args);
        let mut placeholder = Variable::reals();
        if self.config.initializes_outputs() {
            placeholder.value = self.model.evaluate(&call).ok();
        }
        let name = self.fresh_name(OUTPUT_PREFIX, self.partition.outputs.len());
        let output = self.model.add_named_variable(name, placeholder)?;
        self.partition.outputs.push(output);
        self.placeholders.insert(output);

        let conset_index = self
            .partition
            .conset
            .push(Constraint::new(Expr::var(output) - call, Bounds::fixed(0.0)));
        self.partition.call_sites.push(CallSite {
            function,
            output,
            arguments,
            input_indices,
            owner,
            conset_index,
        });
        Ok(Expr::var(output))
    }

    fn link_input(&mut self, arg: &Expr) -> Result<VariableId, TrustRegionError> {
        let mut variable = Variable::reals();
        variable.value = self.model.evaluate(arg).ok();
        let name = self.fresh_name(INPUT_PREFIX, self.partition.linked_inputs.len());
        let input = self.model.add_named_variable(name, variable)?;
        self.partition.input_links.push(Constraint::new(
            Expr::var(input) - arg.clone(),
            Bounds::fixed(0.0),
        ));
        self.partition.linked_inputs.push(LinkedInput {
            input,
            definition: arg.clone(),
        });
        Ok(input)
    }

    /// First `prefix[k]` not yet taken, with `k` starting after `existing`.
    fn fresh_name(&self, prefix: &str, existing: usize) -> String {
        let mut k = existing + 1;
        loop {
            let name = format!("{prefix}[{k}]");
            if self.model.get_variable_by_name(&name).is_none() {
                return name;
            }
            k += 1;
        }
    }
}

/// Variables referenced by the objective, an active constraint or a
/// compound call argument that are neither inputs nor outputs, in
/// first-reference order.
fn classify_states(model: &Model, partition: &Partition) -> Vec<VariableId> {
    let outputs: HashSet<VariableId> = partition.outputs.iter().copied().collect();
    let objective = model
        .objective()
        .sense
        .is_some()
        .then(|| &model.objective().expr);

    let mut seen = HashSet::new();
    let mut states = Vec::new();
    for expr in objective
        .into_iter()
        .chain(model.active_constraints().map(|(_, constraint)| &constraint.body))
        .chain(partition.linked_inputs().map(|(_, definition)| definition))
    {
        for id in expr.variables() {
            if partition.input_positions.contains_key(&id) || outputs.contains(&id) {
                continue;
            }
            if seen.insert(id) {
                states.push(id);
            }
        }
    }
    states
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use std::collections::HashSet;

    use trbox_core::{ExternalFunction, Model, Variable};
    use trbox_expr::Expr;

    use super::{CallArgument, CallOwner, Partition, Partitioner};
    use crate::config::PartitionConfig;
    use crate::error::TrustRegionError;

    fn run(model: &mut Model, partition: &mut Partition, config: &PartitionConfig) -> usize {
        let functions: HashSet<_> = model.external_functions().map(|(id, _)| id).collect();
        Partitioner::new(model, partition, &functions, config)
            .run()
            .unwrap()
    }

    #[test]
    fn bare_inputs_are_shared_across_call_sites() {
        let mut model = Model::new();
        let a = model.add_variable(Variable::reals().with_value(1.0)).unwrap();
        let f = model.add_external_function(ExternalFunction::new("double", |v| 2.0 * v[0]));
        model
            .add_constraint(Expr::call(f, [Expr::var(a)]).eq_scalar(2.0))
            .unwrap();
        model
            .add_constraint(Expr::call(f, [Expr::var(a)]).le_scalar(5.0))
            .unwrap();

        let mut partition = Partition::default();
        assert_eq!(run(&mut model, &mut partition, &PartitionConfig::new()), 2);
        assert_eq!(partition.inputs(), &[a]);
        assert_eq!(partition.outputs().len(), 2);
        assert!(partition.states().is_empty());
        assert_eq!(partition.call_sites()[1].input_indices, vec![0]);
        assert_eq!(model.get_variable_by_name("tR.y[2]"), Some(partition.outputs()[1]));
    }

    #[test]
    fn placeholders_start_at_black_box_value() {
        let mut model = Model::new();
        let a = model.add_variable(Variable::reals().with_value(3.0)).unwrap();
        let f = model.add_external_function(ExternalFunction::new("square", |v| v[0] * v[0]));
        model
            .add_constraint(Expr::call(f, [Expr::var(a)]).le_scalar(10.0))
            .unwrap();

        let mut partition = Partition::default();
        run(&mut model, &mut partition, &PartitionConfig::new());
        assert_eq!(model.value(partition.outputs()[0]).unwrap(), Some(9.0));

        let mut model_off = model.clone();
        let b = model_off.add_variable(Variable::reals().with_value(2.0)).unwrap();
        model_off
            .add_constraint(Expr::call(f, [Expr::var(b)]).le_scalar(10.0))
            .unwrap();
        let config = PartitionConfig::new().with_initialize_outputs(false);
        assert_eq!(run(&mut model_off, &mut partition, &config), 1);
        assert_eq!(model_off.value(partition.outputs()[1]).unwrap(), None);
    }

    #[test]
    fn nested_calls_link_the_inner_placeholder() {
        let mut model = Model::new();
        let a = model.add_variable(Variable::reals().with_value(0.5)).unwrap();
        let f = model.add_external_function(ExternalFunction::new("neg", |v| -v[0]));
        let inner = Expr::call(f, [Expr::var(a)]);
        model
            .add_constraint(Expr::call(f, [inner]).eq_scalar(0.5))
            .unwrap();

        let mut partition = Partition::default();
        assert_eq!(run(&mut model, &mut partition, &PartitionConfig::new()), 2);

        let inner_output = partition.call_sites()[0].output;
        let linked: Vec<_> = partition.linked_inputs().collect();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].1, &Expr::var(inner_output));
        assert_eq!(partition.inputs(), &[a, linked[0].0]);
        assert_eq!(partition.input_links().len(), 1);
        assert_eq!(model.get_variable_by_name("tR.x[1]"), Some(linked[0].0));
        assert_eq!(model.value(linked[0].0).unwrap(), Some(-0.5));
    }

    #[test]
    fn constant_arguments_need_opt_in() {
        let mut model = Model::new();
        let a = model.add_variable(Variable::reals().with_value(1.0)).unwrap();
        let f = model.add_external_function(ExternalFunction::new("add", |v| v[0] + v[1]));
        model
            .add_constraint(
                Expr::call(f, [Expr::var(a), Expr::constant(2.0).sqrt()]).eq_scalar(0.0),
            )
            .unwrap();
        let functions: HashSet<_> = [f].into_iter().collect();

        let mut strict_model = model.clone();
        let mut partition = Partition::default();
        let config = PartitionConfig::new();
        let err = Partitioner::new(&mut strict_model, &mut partition, &functions, &config)
            .run()
            .unwrap_err();
        assert_eq!(err, TrustRegionError::ConstantArgument { function: f, position: 1 });

        let mut partition = Partition::default();
        let config = PartitionConfig::new().with_allow_constant_arguments(true);
        run(&mut model, &mut partition, &config);
        let site = &partition.call_sites()[0];
        assert_eq!(site.arguments[0], CallArgument::Input(a));
        assert_eq!(site.arguments[1], CallArgument::Constant(2.0_f64.sqrt()));
        assert_eq!(site.inputs().collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn objective_scan_can_be_disabled() {
        let mut model = Model::new();
        let a = model.add_variable(Variable::reals().with_value(1.0)).unwrap();
        let f = model.add_external_function(ExternalFunction::new("id", |v| v[0]));
        model.minimize(Expr::call(f, [Expr::var(a)])).unwrap();

        let mut partition = Partition::default();
        let config = PartitionConfig::new().with_scan_objective(false);
        assert_eq!(run(&mut model.clone(), &mut partition, &config), 0);
        assert_eq!(partition.states(), &[a]);

        let mut partition = Partition::default();
        assert_eq!(run(&mut model, &mut partition, &PartitionConfig::new()), 1);
        assert_eq!(partition.call_sites()[0].owner, CallOwner::Objective);
        assert_eq!(model.objective().expr, Expr::var(partition.outputs()[0]));
    }
}
