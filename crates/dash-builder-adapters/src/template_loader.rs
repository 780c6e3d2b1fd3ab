//! Filesystem-based template loader.
//!
//! Every immediate subdirectory of a templates directory is one project
//! template. Its files are copied into new projects as-is, except for common
//! cache artifacts which are never part of a template.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── basic-mantine/
//! │   ├── template.toml        ← manifest (optional)
//! │   ├── app.py               ← required entry point
//! │   ├── pages/
//! │   │   └── home.py
//! │   └── views/
//! │       └── __init__.py
//! └── minimal/
//!     └── app.py
//! ```
//!
//! # `template.toml` format
//!
//! ```toml
//! [template]
//! name        = "basic-mantine"      # defaults to the directory name
//! description = "Mantine dashboard"  # optional
//! version     = "1.0.0"              # optional
//!
//! # Optional: override per-file content type.
//! # If omitted, files mentioning a built-in variable are parameterized.
//! [[files]]
//! path = "app.py"
//! type = "literal"                   # literal | parameterized
//! ```

use std::{
    collections::{HashMap, HashSet},
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use walkdir::{DirEntry, WalkDir};

use dash_builder_core::{
    application::ApplicationError,
    domain::{
        DirectorySpec, DomainError, FileSpec, RelativePath, Template, TemplateContent,
        TemplateMetadata, TemplateNode, TemplateOrigin, TemplateSource, TemplateTree,
    },
    error::{DashBuilderError, DashBuilderResult},
};

/// Manifest file name; never copied into projects.
pub const MANIFEST_FILE: &str = "template.toml";

/// Directory names skipped anywhere in a template.
const SKIPPED_DIRECTORIES: &[&str] = &[
    "__pycache__",
    ".ruff_cache",
    ".pytest_cache",
    ".mypy_cache",
    ".git",
];

/// File names skipped anywhere in a template.
const SKIPPED_FILES: &[&str] = &[".DS_Store"];

/// File extensions skipped anywhere in a template.
const SKIPPED_EXTENSIONS: &[&str] = &["pyc", "pyo"];

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `template.toml` file.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct TemplateManifest {
    #[serde(default)]
    pub template: TemplateSection,
    /// Explicit per-file type overrides.
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// `[template]` section.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TemplateSection {
    /// Name used with `--template`. Defaults to the directory name.
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
}

/// One entry under `[[files]]`.
#[derive(Debug, Deserialize, Clone)]
pub struct FileEntry {
    /// Relative path from the template root (e.g. `"pages/home.py"`).
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
}

/// Controls how a file's content is treated during scaffolding.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Copied verbatim.
    Literal,
    /// `{{VARIABLE}}` placeholders are substituted.
    Parameterized,
}

/// Why a single template directory could not be loaded.
#[derive(Debug, Error)]
enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to parse template.toml: {0}")]
    Manifest(#[from] toml::de::Error),

    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("[[files]] entry '{0}' does not match any file in the template")]
    UnknownFileEntry(String),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

impl LoadError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`Template`] objects from a directory of template directories.
///
/// Subdirectories that fail to load (invalid manifest, no `app.py`, unreadable
/// files) emit a `WARN` log and are skipped; they do not prevent other
/// templates from loading.
///
/// # Example
///
/// ```no_run
/// use dash_builder_adapters::template_loader::FilesystemTemplateLoader;
///
/// let loader = FilesystemTemplateLoader::new("./templates");
/// let templates = loader.load_all()?;
/// println!("Loaded {} templates", templates.len());
/// # Ok::<(), dash_builder_core::error::DashBuilderError>(())
/// ```
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
}

impl FilesystemTemplateLoader {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Load every valid template under the templates directory, sorted by
    /// directory name.
    ///
    /// # Errors
    ///
    /// `TemplateLoadFailed` if the templates directory itself cannot be read.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> DashBuilderResult<Vec<Template>> {
        let read_dir = fs::read_dir(&self.templates_dir).map_err(|e| self.failed(e))?;

        let mut dirs = Vec::new();
        for entry in read_dir {
            let path = entry.map_err(|e| self.failed(e))?.path();
            if path.is_dir() && !is_skipped_name(&path) {
                dirs.push(path);
            }
        }
        dirs.sort();

        let mut templates = Vec::with_capacity(dirs.len());
        for dir in dirs {
            match load_template_from_dir(&dir) {
                Ok(template) => {
                    debug!(name = %template.id, files = template.files().count(), "loaded template");
                    templates.push(template);
                }
                Err(e) => {
                    // One bad template must not block all others.
                    warn!(
                        dir   = %dir.display(),
                        error = %e,
                        "skipping template directory due to load error"
                    );
                }
            }
        }

        debug!(count = templates.len(), "finished loading templates");
        Ok(templates)
    }

    /// Load a single template directory.
    pub fn load_one(&self, dir: &Path) -> DashBuilderResult<Template> {
        load_template_from_dir(dir).map_err(|e| {
            ApplicationError::TemplateLoadFailed {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn failed(&self, e: io::Error) -> DashBuilderError {
        ApplicationError::TemplateLoadFailed {
            path: self.templates_dir.clone(),
            reason: e.to_string(),
        }
        .into()
    }
}

fn load_template_from_dir(dir: &Path) -> Result<Template, LoadError> {
    let manifest = read_manifest(dir)?;

    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = manifest.template.name.clone().unwrap_or(dir_name);

    let mut metadata = TemplateMetadata::new(name.clone())
        .description(manifest.template.description.clone().unwrap_or_default())
        .origin(TemplateOrigin::Directory(dir.to_path_buf()));
    if let Some(version) = &manifest.template.version {
        metadata = metadata.version(version.clone());
    }

    let tree = build_tree_from_dir(dir, &manifest)?;

    let template = Template::builder()
        .id(name.as_str())
        .metadata(metadata)
        .tree(tree)
        .build()?;
    template.validate()?;
    Ok(template)
}

fn read_manifest(dir: &Path) -> Result<TemplateManifest, LoadError> {
    let manifest_path = dir.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        return Ok(TemplateManifest::default());
    }
    let raw = fs::read_to_string(&manifest_path).map_err(|e| LoadError::io(&manifest_path, e))?;
    Ok(toml::from_str(&raw)?)
}

/// Walk `dir` and build a [`TemplateTree`], parents before children and
/// siblings in file-name order.
fn build_tree_from_dir(dir: &Path, manifest: &TemplateManifest) -> Result<TemplateTree, LoadError> {
    let mut tree = TemplateTree::new();
    let mut added_paths: HashSet<String> = HashSet::new();

    // Normalize to forward slashes so Windows and Unix paths compare.
    let manifest_files: HashMap<String, FileType> = manifest
        .files
        .iter()
        .map(|f| (normalize_path(&f.path), f.file_type))
        .collect();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_cache_artifact(e));

    for walk_entry in walker {
        let walk_entry = walk_entry?;
        let abs_path = walk_entry.path();
        let Ok(rel_raw) = abs_path.strip_prefix(dir) else {
            continue;
        };

        if walk_entry.depth() == 1 && rel_raw == Path::new(MANIFEST_FILE) {
            continue;
        }

        let path_str = normalize_path(&rel_raw.to_string_lossy());
        if !added_paths.insert(path_str.clone()) {
            continue;
        }
        let path = RelativePath::try_new(path_str.as_str())?;

        if walk_entry.file_type().is_dir() {
            tree.push(TemplateNode::Directory(DirectorySpec::new(path)));
            continue;
        }

        if !walk_entry.file_type().is_file() {
            continue; // Skip symlinks and other special types.
        }

        let content = fs::read_to_string(abs_path).map_err(|e| LoadError::io(abs_path, e))?;
        let content = resolve_file_content(content, manifest_files.get(&path_str).copied());
        tree.push(TemplateNode::File(FileSpec::new(path, content)));
    }

    if let Some(unknown) = manifest_files.keys().find(|p| !added_paths.contains(*p)) {
        return Err(LoadError::UnknownFileEntry(unknown.clone()));
    }

    Ok(tree)
}

/// An explicit manifest type wins; otherwise files mentioning a built-in
/// variable are parameterized.
fn resolve_file_content(content: String, declared: Option<FileType>) -> TemplateContent {
    let source = TemplateSource::from(content);
    match declared {
        Some(FileType::Literal) => TemplateContent::Literal(source),
        Some(FileType::Parameterized) => TemplateContent::Parameterized(source),
        None if source.contains_placeholder() => TemplateContent::Parameterized(source),
        None => TemplateContent::Literal(source),
    }
}

fn is_skipped_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| SKIPPED_DIRECTORIES.contains(&n))
}

/// Compiled bytecode, tool caches and VCS metadata.
fn is_cache_artifact(entry: &DirEntry) -> bool {
    let Some(name) = entry.file_name().to_str() else {
        return false;
    };
    if entry.file_type().is_dir() {
        return SKIPPED_DIRECTORIES.contains(&name);
    }
    SKIPPED_FILES.contains(&name)
        || Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| SKIPPED_EXTENSIONS.contains(&ext))
}

/// Normalise a filesystem path to forward slashes so Windows and Unix paths
/// compare identically throughout the loader.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
