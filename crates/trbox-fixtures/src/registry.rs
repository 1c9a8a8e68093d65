//! The test-model contract and the fixture registry.

use std::collections::BTreeSet;
use std::path::Path;

use trbox_core::Model;

use crate::config::FixtureConfig;
use crate::error::FixtureError;
use crate::lp_unique_duals::LpUniqueDuals;
use crate::results::ExpectedResults;

/// A reference model with a known solution.
pub trait TestModel {
    /// Unique fixture name; also the results file stem.
    fn description(&self) -> &'static str;

    /// Problem features a solver must support, e.g. `linear`.
    fn capabilities(&self) -> BTreeSet<&'static str>;

    fn results_file(&self) -> String {
        format!("{}.json", self.description())
    }

    /// Build a fresh model, replacing any previous one.
    fn generate_model(&mut self) -> Result<&Model, FixtureError>;

    fn model(&self) -> Option<&Model>;

    fn model_mut(&mut self) -> Option<&mut Model>;

    /// Reset the variables a solver would warm start from.
    fn warmstart_model(&mut self) -> Result<(), FixtureError>;

    fn expected_results(&self, config: &FixtureConfig) -> Result<ExpectedResults, FixtureError> {
        ExpectedResults::load(config.results_dir().join(self.results_file()))
    }

    /// Compare the model's current values and import suffixes with
    /// `expected`, reporting every difference larger than `tolerance`.
    fn validate_current_solution(
        &self,
        expected: &ExpectedResults,
        tolerance: f64,
    ) -> Result<(), FixtureError> {
        let model = self
            .model()
            .ok_or(FixtureError::NotGenerated(self.description()))?;
        expected.validate(model, tolerance)
    }

    /// Write the model's current values and import suffixes as expected
    /// results.
    fn save_current_solution(&self, path: &Path) -> Result<(), FixtureError> {
        let model = self
            .model()
            .ok_or(FixtureError::NotGenerated(self.description()))?;
        ExpectedResults::from_model(model).save(path)
    }
}

/// Every fixture, in registration order.
pub fn registered_models() -> Vec<Box<dyn TestModel>> {
    vec![Box::new(LpUniqueDuals::new())]
}

/// Look up a fixture by description.
pub fn model_by_name(name: &str) -> Result<Box<dyn TestModel>, FixtureError> {
    registered_models()
        .into_iter()
        .find(|fixture| fixture.description() == name)
        .ok_or_else(|| FixtureError::UnknownModel(name.to_string()))
}
