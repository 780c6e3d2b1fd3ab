//! Infrastructure adapters for Dash Builder.
//!
//! This crate implements the ports defined in
//! `dash_builder_core::application::ports`. Everything that touches the disk,
//! spawns a process or embeds template files lives here.

pub mod builtin_templates;
pub mod filesystem;
pub mod formatter;
pub mod renderer;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use formatter::{NoopFormatter, RuffFormatter};
pub use renderer::SimpleRenderer;
pub use template_loader::FilesystemTemplateLoader;
pub use template_store::InMemoryStore;
