//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "build a project" or "add a view".

pub mod artifact_service;
pub mod materializer;
pub mod scaffold_service;
pub mod template_service;

pub use artifact_service::{ArtifactReport, ArtifactService, VIEWS_AGGREGATOR};
pub use materializer::Materializer;
pub use scaffold_service::{BuildReport, ScaffoldService};
pub use template_service::{TemplateInfo, TemplateService};
