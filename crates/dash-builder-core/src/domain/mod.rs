// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Dash Builder.
//!
//! Pure logic with no I/O. Filesystem access, template storage and external
//! formatting are reached through ports defined in the application layer.
//!
//! Two groups live here:
//!
//! - **Generator model**: [`artifact`] (generated source text), [`aggregator`]
//!   (re-export file editing), [`entities`] (project templates and rendered
//!   structures), [`naming`].
//! - **Runtime helpers**: [`component`] (pattern-matching ids), [`layout`]
//!   (error-contained rendering), [`objects`] (the `Page` / `View` contracts).

pub mod aggregator;
pub mod artifact;
pub mod component;
pub mod entities;
pub mod error;
pub mod layout;
pub mod naming;
pub mod objects;

mod validation;

pub use aggregator::{AggregatorFile, EditOutcome};
pub use artifact::{
    AppArtifact, Artifact, ArtifactKind, BLOCK_SEPARATOR, CLASS_NAME_PLACEHOLDER, ImportBlock,
    PageArtifact, ViewArtifact,
};
pub use component::{ComponentId, ComponentIndex, Wildcard, identifier_for, type_name_for};
pub use entities::{
    common::RelativePath,
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure},
    template::{
        APP_ENTRY, DirectorySpec, FileSpec, RenderContext, Template, TemplateBuilder,
        TemplateContent, TemplateId, TemplateMetadata, TemplateNode, TemplateOrigin,
        TemplateSource, TemplateTree,
    },
};
pub use error::{DomainError, ErrorCategory};
pub use layout::{ErrorContainer, Node, Props, RenderFailure, render};
pub use naming::{class_name, to_kebab_case, to_snake_case};
pub use objects::{Page, View};
pub use validation::DomainValidator;
