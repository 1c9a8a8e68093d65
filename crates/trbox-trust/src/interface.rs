//! The trust-region interface over a partitioned model.

use std::collections::HashSet;

use trbox_core::Model;
use trbox_expr::{Expr, ExternalFunctionId, VariableId};

use crate::config::PartitionConfig;
use crate::constraint_list::ConstraintList;
use crate::error::TrustRegionError;
use crate::partition::{CallArgument, CallSite, Partition, Partitioner};

/// A model whose listed external calls have been replaced by output
/// placeholders, together with the resulting partition.
///
/// The interface owns the model; use [`TrustRegionInterface::into_parts`]
/// to take it back.
#[derive(Debug, Clone)]
pub struct TrustRegionInterface {
    model: Model,
    functions: Vec<ExternalFunctionId>,
    function_set: HashSet<ExternalFunctionId>,
    config: PartitionConfig,
    partition: Partition,
    objective_negated: bool,
}

impl TrustRegionInterface {
    /// Partition `model` around calls to `functions`.
    ///
    /// A maximized objective is rewritten as the equivalent minimization.
    /// Fails when the list is empty, names an unregistered function, or
    /// none of the functions is called.
    pub fn new(
        mut model: Model,
        functions: &[ExternalFunctionId],
        config: PartitionConfig,
    ) -> Result<Self, TrustRegionError> {
        if functions.is_empty() {
            return Err(TrustRegionError::NoExternalFunctions);
        }
        let mut function_set = HashSet::new();
        let mut listed = Vec::with_capacity(functions.len());
        for &id in functions {
            model
                .get_external_function(id)
                .map_err(|_| TrustRegionError::UnknownExternalFunction(id))?;
            if function_set.insert(id) {
                listed.push(id);
            }
        }

        let objective_negated = if model.objective().sense.is_some() {
            model.normalize_to_minimize()?
        } else {
            false
        };

        let mut partition = Partition::default();
        Partitioner::new(&mut model, &mut partition, &function_set, &config).run()?;
        if partition.call_sites().is_empty() {
            tracing::debug!(
                component = "trust_region",
                operation = "build",
                status = "error",
                functions = listed.len(),
                "No call sites found"
            );
            return Err(TrustRegionError::NoCallSites);
        }

        tracing::debug!(
            component = "trust_region",
            operation = "build",
            status = "success",
            lx = partition.inputs().len(),
            ly = partition.outputs().len(),
            lz = partition.states().len(),
            objective_negated,
            "Built trust-region interface"
        );
        Ok(Self {
            model,
            functions: listed,
            function_set,
            config,
            partition,
            objective_negated,
        })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Mutable access to the rewritten model.
    ///
    /// Calls added through this handle are picked up by
    /// [`TrustRegionInterface::repartition`].
    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    /// External functions treated as black boxes, deduplicated.
    pub fn functions(&self) -> &[ExternalFunctionId] {
        &self.functions
    }

    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Whether a maximized objective was negated into a minimization.
    pub fn objective_negated(&self) -> bool {
        self.objective_negated
    }

    pub fn lx(&self) -> usize {
        self.partition.inputs().len()
    }

    pub fn ly(&self) -> usize {
        self.partition.outputs().len()
    }

    pub fn lz(&self) -> usize {
        self.partition.states().len()
    }

    pub fn inputs(&self) -> &[VariableId] {
        self.partition.inputs()
    }

    pub fn outputs(&self) -> &[VariableId] {
        self.partition.outputs()
    }

    pub fn states(&self) -> &[VariableId] {
        self.partition.states()
    }

    pub fn call_sites(&self) -> &[CallSite] {
        self.partition.call_sites()
    }

    pub fn conset(&self) -> &ConstraintList {
        self.partition.conset()
    }

    pub fn input_links(&self) -> &ConstraintList {
        self.partition.input_links()
    }

    pub fn input_values(&self) -> Result<Vec<Option<f64>>, TrustRegionError> {
        self.values_of(self.partition.inputs())
    }

    pub fn output_values(&self) -> Result<Vec<Option<f64>>, TrustRegionError> {
        self.values_of(self.partition.outputs())
    }

    pub fn state_values(&self) -> Result<Vec<Option<f64>>, TrustRegionError> {
        self.values_of(self.partition.states())
    }

    /// Assign `x` in order.
    pub fn set_input_values(&mut self, values: &[f64]) -> Result<(), TrustRegionError> {
        let ids = self.partition.inputs().to_vec();
        self.assign(&ids, values)
    }

    /// Assign `z` in order.
    pub fn set_state_values(&mut self, values: &[f64]) -> Result<(), TrustRegionError> {
        let ids = self.partition.states().to_vec();
        self.assign(&ids, values)
    }

    /// Set every synthetic input to the current value of the argument it
    /// stands for. Returns the number of inputs updated.
    pub fn sync_input_links(&mut self) -> Result<usize, TrustRegionError> {
        let updates = self
            .partition
            .linked_inputs()
            .map(|(input, definition)| Ok((input, self.model.evaluate(definition)?)))
            .collect::<Result<Vec<_>, TrustRegionError>>()?;
        for (input, value) in &updates {
            self.model.set_value(*input, Some(*value))?;
        }
        Ok(updates.len())
    }

    /// Black-box value of every call site at the current inputs, in call
    /// site order.
    pub fn evaluate_outputs(&self) -> Result<Vec<f64>, TrustRegionError> {
        self.partition
            .call_sites()
            .iter()
            .map(|site| {
                let args = site
                    .arguments
                    .iter()
                    .map(|argument| match argument {
                        CallArgument::Input(id) => self.model.evaluate(&Expr::var(*id)),
                        CallArgument::Constant(value) => Ok(*value),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(self.model.call_external(site.function, &args)?)
            })
            .collect()
    }

    /// Evaluate the black boxes and store the results in the placeholders.
    pub fn sync_outputs(&mut self) -> Result<Vec<f64>, TrustRegionError> {
        let values = self.evaluate_outputs()?;
        for (site, value) in self.partition.call_sites().iter().zip(&values) {
            self.model.set_value(site.output, Some(*value))?;
        }
        tracing::debug!(
            component = "trust_region",
            operation = "sync_outputs",
            status = "success",
            outputs = values.len(),
            "Synchronized black-box outputs"
        );
        Ok(values)
    }

    /// `body - lower` for each `conset` entry at the current values.
    pub fn conset_residuals(&self) -> Result<Vec<f64>, TrustRegionError> {
        self.partition
            .conset()
            .iter()
            .map(|(_, constraint)| {
                Ok(self.model.evaluate(&constraint.body)? - constraint.bounds.lower)
            })
            .collect()
    }

    /// Rescan the model for calls added since the last scan.
    ///
    /// Returns the number of new call sites. On failure the interface is
    /// left unchanged.
    pub fn repartition(&mut self) -> Result<usize, TrustRegionError> {
        let mut model = self.model.clone();
        let mut partition = self.partition.clone();
        let negated = model.objective().sense.is_some() && model.normalize_to_minimize()?;
        let added = Partitioner::new(&mut model, &mut partition, &self.function_set, &self.config)
            .run()?;
        self.model = model;
        self.partition = partition;
        self.objective_negated |= negated;
        Ok(added)
    }

    /// Hand back the rewritten model and the partition.
    pub fn into_parts(self) -> (Model, Partition) {
        (self.model, self.partition)
    }

    fn values_of(&self, ids: &[VariableId]) -> Result<Vec<Option<f64>>, TrustRegionError> {
        ids.iter()
            .map(|id| Ok(self.model.value(*id)?))
            .collect()
    }

    fn assign(&mut self, ids: &[VariableId], values: &[f64]) -> Result<(), TrustRegionError> {
        if ids.len() != values.len() {
            return Err(TrustRegionError::ValueLengthMismatch {
                expected: ids.len(),
                actual: values.len(),
            });
        }
        for (id, value) in ids.iter().zip(values) {
            self.model.set_value(*id, Some(*value))?;
        }
        Ok(())
    }
}
