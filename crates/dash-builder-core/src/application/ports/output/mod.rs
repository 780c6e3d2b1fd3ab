//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `dash-builder-adapters` crate provides implementations.

use crate::domain::{ProjectStructure, RenderContext, Template, TemplateId};
use crate::error::DashBuilderResult;
use std::path::Path;

/// Outcome of a no-clobber file creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    /// The path already existed; nothing was written.
    Conflict,
}

/// Outcome of running the external formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatOutcome {
    Formatted,
    /// Formatting is disabled.
    Skipped,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `dash_builder_adapters::filesystem::LocalFilesystem` (production)
/// - `dash_builder_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> DashBuilderResult<()>;

    /// Create `path` with `content` unless it already exists.
    ///
    /// Must be atomic: the file either appears with its full content or not
    /// at all, and an existing file is never replaced.
    fn create_new(&self, path: &Path, content: &str) -> DashBuilderResult<WriteOutcome>;

    /// Replace the content of `path` atomically, creating it if missing.
    fn write_file(&self, path: &Path, content: &str) -> DashBuilderResult<()>;

    fn read_to_string(&self, path: &Path) -> DashBuilderResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    fn remove_file(&self, path: &Path) -> DashBuilderResult<()>;
}

/// Port for template storage and retrieval.
///
/// Implemented by `dash_builder_adapters::template_store::InMemoryStore`,
/// filled with built-in and directory templates.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Get a template by name. Fails with `TemplateNotFound`, listing the
    /// available names, when there is none.
    fn get(&self, id: &TemplateId) -> DashBuilderResult<Template>;

    /// List all available templates, sorted by name.
    fn list(&self) -> DashBuilderResult<Vec<Template>>;

    /// Insert or replace a template.
    fn insert(&self, template: Template) -> DashBuilderResult<()>;
}

/// Port for template rendering.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render a template into a project structure rooted at `output_root`.
    fn render(
        &self,
        template: &Template,
        context: &RenderContext,
        output_root: &Path,
    ) -> DashBuilderResult<ProjectStructure>;
}

/// Port for post-generation source formatting.
#[cfg_attr(test, mockall::automock)]
pub trait Formatter: Send + Sync {
    /// Format the file or directory at `path` in place.
    fn format(&self, path: &Path) -> DashBuilderResult<FormatOutcome>;
}
