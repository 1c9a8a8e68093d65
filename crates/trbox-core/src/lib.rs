//! trbox core model with black-box function handles and suffix import.

pub mod external;
pub mod model;
pub mod solution;
pub mod suffix;
pub mod types;

pub use external::ExternalFunction;
pub use model::{Model, ModelError, PrettyPrintOptions};
pub use solution::{Solution, SolverStatus};
pub use suffix::{ComponentRef, Suffix, SuffixDirection};
pub use types::{Bounds, Constraint, Domain, Objective, Sense, Variable};
