//! Trust-region interface for models with black-box function calls.
//!
//! Building a [`TrustRegionInterface`] partitions a model's variables into
//! black-box inputs (`x`), black-box outputs (`y`) and everything else
//! (`z`), and rewrites the model so each external call is replaced by an
//! output placeholder tied to the call through an auxiliary equality.
//!
//! # Overview
//!
//! - [`PartitionConfig`]: Partitioning options
//! - [`TrustRegionError`]: Error types for partitioning and evaluation
//! - [`Partition`]: The x/y/z sets, call sites and auxiliary constraints
//! - [`ConstraintList`]: 1-indexed auxiliary constraint container

mod config;
mod constraint_list;
mod error;
mod interface;
mod partition;

pub use config::PartitionConfig;
pub use constraint_list::ConstraintList;
pub use error::TrustRegionError;
pub use interface::TrustRegionInterface;
pub use partition::{CallArgument, CallOwner, CallSite, Partition};
