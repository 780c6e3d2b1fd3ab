//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `dash-builder-adapters`
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateStore`: Template storage/retrieval
//!   - `TemplateRenderer`: Template rendering
//!   - `Formatter`: Source formatting after generation
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    FormatOutcome, Formatter, Filesystem, TemplateRenderer, TemplateStore, WriteOutcome,
};

#[cfg(test)]
pub use output::{MockFilesystem, MockFormatter, MockTemplateRenderer, MockTemplateStore};
