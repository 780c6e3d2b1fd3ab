//! Project templates and rendering context.
//!
//! A project template is a named, declarative description of the files a new
//! Dash project starts with:
//!
//! ```text
//! Template (aggregate root)
//! ├── TemplateId        "basic", "basic-mantine", or a directory name
//! ├── TemplateMetadata  description, version, origin (builtin / directory)
//! └── TemplateTree
//!      ├── FileSpec       path + content (literal or parameterized)
//!      └── DirectorySpec  path
//! ```
//!
//! Rendering (see the `TemplateRenderer` port) applies a [`RenderContext`] to
//! every parameterized file, replacing `{{VARIABLE}}` placeholders.
//!
//! ## Literal vs Parameterized
//!
//! Generated Python sources routinely contain `{` and `}` (dict literals,
//! f-strings), so substitution only runs on files that ask for it. Directory
//! templates opt in per file through their manifest, or by containing a known
//! placeholder.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::PathBuf;

use chrono::Datelike;

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// The entry file every project template must provide.
pub const APP_ENTRY: &str = "app.py";

/// Variables a [`RenderContext`] always defines.
pub const BUILTIN_VARIABLES: [&str; 5] = [
    "PROJECT_NAME",
    "PROJECT_NAME_SNAKE",
    "PROJECT_NAME_KEBAB",
    "PROJECT_NAME_PASCAL",
    "YEAR",
];

/// Context for template rendering.
///
/// ## Built-in Variables
///
/// | Variable | Example | Source |
/// |----------|---------|--------|
/// | `PROJECT_NAME` | "sales dashboard" | User input |
/// | `PROJECT_NAME_SNAKE` | "sales_dashboard" | Computed |
/// | `PROJECT_NAME_KEBAB` | "sales-dashboard" | Computed |
/// | `PROJECT_NAME_PASCAL` | "SalesDashboard" | Computed |
/// | `YEAR` | "2026" | Local clock |
#[derive(Debug, Clone)]
pub struct RenderContext {
    project_name: String,
    /// Ordered so rendering is deterministic when values contain placeholders.
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    /// Create a render context, deriving the casing variants of the name.
    pub fn new(project_name: impl Into<String>) -> Self {
        let name = project_name.into();
        let mut vars = BTreeMap::new();

        vars.insert("PROJECT_NAME".to_string(), name.clone());
        vars.insert("PROJECT_NAME_SNAKE".to_string(), snake_words(&name));
        vars.insert("PROJECT_NAME_KEBAB".to_string(), kebab_words(&name));
        vars.insert("PROJECT_NAME_PASCAL".to_string(), pascal_words(&name));
        vars.insert(
            "YEAR".to_string(),
            chrono::Local::now().year().to_string(),
        );

        Self {
            project_name: name,
            variables: vars,
        }
    }

    /// Add or override a variable.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|s| s.as_str())
    }

    /// Replace `{{VARIABLE}}` placeholders. Unknown placeholders are left as-is.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();
        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }
        result
    }
}

// ============================================================================
// Project Name Casing
// ============================================================================

// Project names are free text ("sales dashboard", "my-app"), unlike the
// identifiers handled by `domain::naming`, so these split on separators and
// keep acronyms together.

fn snake_words(s: &str) -> String {
    split_words(s).join("_")
}

fn kebab_words(s: &str) -> String {
    split_words(s).join("-")
}

fn pascal_words(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::new();
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Split on `_`, `-`, whitespace, lower→upper transitions and acronym ends
/// (`HTTPServer` → `http`, `server`).
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

// ============================================================================
// Template Identity
// ============================================================================

/// Name a template is selected by (`--template basic-mantine`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Where a template was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    /// Compiled into the binary.
    Builtin,
    /// Loaded from a templates directory.
    Directory(PathBuf),
}

impl fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("builtin"),
            Self::Directory(path) => write!(f, "{}", path.display()),
        }
    }
}

// ============================================================================
// Core Template Aggregate
// ============================================================================

/// A reusable project blueprint.
///
/// ## Invariants (enforced by `validate()`)
///
/// 1. `id` is non-empty
/// 2. `tree` is non-empty
/// 3. All paths in `tree` are unique
/// 4. `tree` contains an `app.py` file at the project root
#[derive(Debug, Clone)]
pub struct Template {
    pub id: TemplateId,
    pub metadata: TemplateMetadata,
    pub tree: TemplateTree,
}

impl Template {
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::default()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.name().trim().is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Template name cannot be empty".into(),
            ));
        }

        if self.tree.is_empty() {
            return Err(DomainError::EmptyTemplate {
                template_id: self.id.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for node in &self.tree.nodes {
            let path = node.path().as_str();
            if !seen.insert(path) {
                return Err(DomainError::DuplicatePath {
                    path: path.to_string(),
                });
            }
        }

        if !self.has_app_entry() {
            return Err(DomainError::MissingAppEntry {
                template_id: self.id.to_string(),
            });
        }

        Ok(())
    }

    fn has_app_entry(&self) -> bool {
        self.tree.nodes.iter().any(|node| {
            matches!(node, TemplateNode::File(f) if f.path.as_path() == std::path::Path::new(APP_ENTRY))
        })
    }

    pub fn files(&self) -> impl Iterator<Item = &FileSpec> {
        self.tree.nodes.iter().filter_map(|n| match n {
            TemplateNode::File(f) => Some(f),
            TemplateNode::Directory(_) => None,
        })
    }
}

/// Builder for constructing templates.
///
/// `build()` requires an id and a non-empty tree. Metadata defaults to the
/// id as display name with a builtin origin.
#[derive(Default)]
pub struct TemplateBuilder {
    id: Option<TemplateId>,
    metadata: Option<TemplateMetadata>,
    tree: TemplateTree,
}

impl TemplateBuilder {
    pub fn id(mut self, id: impl Into<TemplateId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn metadata(mut self, metadata: TemplateMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Set the entire tree at once (replaces any previous nodes).
    pub fn tree(mut self, tree: TemplateTree) -> Self {
        self.tree = tree;
        self
    }

    /// Add a single node to the tree (accumulates).
    pub fn add_node(mut self, node: TemplateNode) -> Self {
        self.tree.push(node);
        self
    }

    pub fn build(self) -> Result<Template, DomainError> {
        let id = self
            .id
            .ok_or(DomainError::MissingRequiredField { field: "id" })?;

        if self.tree.is_empty() {
            return Err(DomainError::EmptyTemplate {
                template_id: id.to_string(),
            });
        }

        let metadata = self
            .metadata
            .unwrap_or_else(|| TemplateMetadata::new(id.name()));

        Ok(Template {
            id,
            metadata,
            tree: self.tree,
        })
    }
}

/// Human-readable template information for `dash-builder list`.
#[derive(Debug, Clone)]
pub struct TemplateMetadata {
    /// Display name.
    pub name: String,
    pub description: String,
    pub version: String,
    pub author: String,
    pub tags: Vec<String>,
    pub origin: TemplateOrigin,
}

impl TemplateMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            version: "0.1.0".to_string(),
            author: "Dash Builder".to_string(),
            tags: Vec::new(),
            origin: TemplateOrigin::Builtin,
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn version(mut self, ver: impl Into<String>) -> Self {
        self.version = ver.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn origin(mut self, origin: TemplateOrigin) -> Self {
        self.origin = origin;
        self
    }
}

// ============================================================================
// Template Tree
// ============================================================================

/// Ordered filesystem nodes to create. Directories should precede the files
/// they contain.
#[derive(Debug, Clone, Default)]
pub struct TemplateTree {
    pub nodes: Vec<TemplateNode>,
}

impl TemplateTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: TemplateNode) {
        self.nodes.push(node);
    }

    pub fn with_node(mut self, node: TemplateNode) -> Self {
        self.push(node);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

#[derive(Debug, Clone)]
pub enum TemplateNode {
    File(FileSpec),
    Directory(DirectorySpec),
}

impl TemplateNode {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileSpec {
    /// Relative path from project root (e.g., "pages/home.py").
    pub path: RelativePath,
    pub content: TemplateContent,
}

impl FileSpec {
    pub fn new(path: impl Into<RelativePath>, content: TemplateContent) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DirectorySpec {
    pub path: RelativePath,
}

impl DirectorySpec {
    pub fn new(path: impl Into<RelativePath>) -> Self {
        Self { path: path.into() }
    }
}

// ============================================================================
// Content Types
// ============================================================================

#[derive(Debug, Clone)]
pub enum TemplateContent {
    /// Content used exactly as provided.
    Literal(TemplateSource),
    /// Content with `{{VARIABLE}}` placeholders to be substituted.
    Parameterized(TemplateSource),
}

impl TemplateContent {
    pub fn source(&self) -> &TemplateSource {
        match self {
            Self::Literal(s) | Self::Parameterized(s) => s,
        }
    }
}

/// Compile-time (`include_str!`) or loaded content.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }

    /// Whether the content mentions one of the built-in variables.
    ///
    /// Used by loaders to pick `Parameterized` when a manifest doesn't say.
    pub fn contains_placeholder(&self) -> bool {
        let text = self.as_str();
        BUILTIN_VARIABLES
            .iter()
            .any(|var| text.contains(&format!("{{{{{var}}}}}")))
    }
}
