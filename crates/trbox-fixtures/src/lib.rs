//! Reference test models with bundled expected solutions.
//!
//! Each fixture implements [`TestModel`]: it builds a fresh [`Model`],
//! resets it for warm starts, and validates the model's current values and
//! imported suffixes against the expected results shipped in `results/`.
//!
//! [`Model`]: trbox_core::Model

mod config;
mod error;
mod lp_unique_duals;
mod registry;
mod results;

pub use config::{FixtureConfig, RESULTS_DIR_ENV};
pub use error::{FixtureError, Mismatch};
pub use lp_unique_duals::LpUniqueDuals;
pub use registry::{TestModel, model_by_name, registered_models};
pub use results::{ExpectedEntry, ExpectedResults, solution_from_results};
