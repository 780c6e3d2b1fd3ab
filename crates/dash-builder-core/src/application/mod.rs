//! Application layer for Dash Builder.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, ArtifactService,
//!   TemplateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ArtifactReport, ArtifactService, BuildReport, Materializer, ScaffoldService, TemplateInfo,
    TemplateService, VIEWS_AGGREGATOR,
};

pub use ports::{
    FormatOutcome, Formatter, Filesystem, TemplateRenderer, TemplateStore, WriteOutcome,
};

pub use error::ApplicationError;
