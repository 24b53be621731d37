// Rigging - build plan resolver for web asset pipelines
//
// Resolves an environment flag plus explicit package metadata into a
// fully-specified, serializable build plan for an external bundler.

pub mod cli;
pub mod core;
pub mod infrastructure;
pub mod utils;

pub use crate::core::models::{BuildEnvironment, EntryOutput, OutputLayout, PackageMetadata};
pub use crate::core::pipeline::{Pipeline, PipelineStage, StageKind};
pub use crate::core::resolver::{BuildPlan, PlanChecker};
pub use crate::core::routes::{FileCategory, Route, RouteAction, RouteTable};
pub use crate::utils::{Result, RiggingError};
