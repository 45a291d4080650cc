//! Projected model enumeration on top of an incremental [`sattrait::Oracle`].
//!
//! Enumeration works frame by frame: a frame solves and blocks models until
//! its budget runs out, then splits the problem on a few variables and
//! recurses into each satisfiable assignment of them. Models found in a
//! frame stay uncommitted until the frame completes, so a frame that has to
//! split again never contributes a model twice.
//!
//! ```ignore
//! let f = ModelEnumerationFunction::builder().variables(vec!["a", "b"]).build();
//! let models = f.enumerate(&mut solver, &mut NopHandler)?.into_result();
//! ```

mod blocking;
pub mod collector;
mod config;
mod error;
mod function;
mod indices;
mod model;
pub mod provider;
pub mod strategy;

pub use crate::blocking::blocking_clause;
pub use crate::collector::{EnumerationCollector, ModelCollector, ModelCountCollector};
pub use crate::config::{EnumerationParams, StrategyKind};
pub use crate::error::EnumerationError;
pub use crate::function::{Computation, ModelEnumerationFunction, ModelEnumerationFunctionBuilder};
pub use crate::indices::{IndexSets, RelevantIndices, VariableUniverse};
pub use crate::model::{Literal, Model};
pub use crate::strategy::{ConfiguredStrategy, DefaultStrategy, EnumerationStrategy, NoSplitStrategy};
