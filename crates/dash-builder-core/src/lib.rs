//! Dash Builder Core - Hexagonal Architecture Implementation
//!
//! Domain and application layers for the Dash Builder scaffolding tool,
//! following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        dash-builder-cli (CLI)           │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ScaffoldService, ArtifactService, ...) │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, Store, Renderer, Formatter)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   dash-builder-adapters (Infrastructure)│
//! └─────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Artifacts, Aggregator, Templates,      │
//! │  Component ids, Layout boundary)        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dash_builder_core::application::ArtifactService;
//!
//! let service = ArtifactService::new(Box::new(filesystem));
//! service.add_page("Analytics", Some("/analytics"), "./demo".as_ref(), None)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ArtifactService, BuildReport, ScaffoldService, TemplateService,
        ports::{Filesystem, Formatter, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        ComponentId, Node, Page, ProjectStructure, Props, RenderContext, Template, TemplateId,
        TemplateMetadata, View,
    };
    pub use crate::error::{DashBuilderError, DashBuilderResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
