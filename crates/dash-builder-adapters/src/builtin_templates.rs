//! Templates that ship with Dash Builder.
//!
//! - **`basic`** is synthesized from the artifact generators, so it always
//!   matches what `add-page` and `add-view` produce.
//! - **`basic-mantine`** is a multi-page dashboard with header, sidebar and
//!   footer views, embedded at compile time from `templates/basic-mantine`.
//!
//! Directory templates are found through [`candidate_dirs`] and loaded on top
//! of these by the template store; a directory template with the same name
//! replaces the built-in one.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use dash_builder_core::{
    application::VIEWS_AGGREGATOR,
    domain::{
        AggregatorFile, AppArtifact, Artifact, DirectorySpec, FileSpec, PageArtifact, Template,
        TemplateContent, TemplateMetadata, TemplateNode, TemplateSource,
    },
    error::DashBuilderResult,
};

pub const BASIC: &str = "basic";
pub const BASIC_MANTINE: &str = "basic-mantine";

/// The template `build` uses when none is given.
pub const DEFAULT_TEMPLATE: &str = BASIC;

/// `(path, content)` of every embedded `basic-mantine` file, parents first.
const BASIC_MANTINE_FILES: &[(&str, &str)] = &[
    (
        "app.py",
        include_str!("../templates/basic-mantine/app.py"),
    ),
    (
        "pages/analytics.py",
        include_str!("../templates/basic-mantine/pages/analytics.py"),
    ),
    (
        "pages/home.py",
        include_str!("../templates/basic-mantine/pages/home.py"),
    ),
    (
        "pages/not_found_404.py",
        include_str!("../templates/basic-mantine/pages/not_found_404.py"),
    ),
    (
        "views/__init__.py",
        include_str!("../templates/basic-mantine/views/__init__.py"),
    ),
    (
        "views/footer.py",
        include_str!("../templates/basic-mantine/views/footer.py"),
    ),
    (
        "views/header.py",
        include_str!("../templates/basic-mantine/views/header.py"),
    ),
    (
        "views/sidebar.py",
        include_str!("../templates/basic-mantine/views/sidebar.py"),
    ),
];

/// Every built-in template, sorted by name.
#[instrument]
pub fn all_templates() -> DashBuilderResult<Vec<Template>> {
    let templates = vec![basic()?, basic_mantine()?];
    debug!(count = templates.len(), "built-in templates ready");
    Ok(templates)
}

/// `app.py`, a home page, a 404 page and an empty views package.
pub fn basic() -> DashBuilderResult<Template> {
    let app = AppArtifact::new();
    let home = PageArtifact::homepage();
    let not_found = PageArtifact::not_found();

    let template = Template::builder()
        .id(BASIC)
        .metadata(
            TemplateMetadata::new(BASIC)
                .description("Minimal multi-page Dash app with a home and a 404 page")
                .tags(vec!["dash".into(), "pages".into()]),
        )
        .add_node(generated(&app))
        .add_node(TemplateNode::Directory(DirectorySpec::new("pages")))
        .add_node(generated(&home))
        .add_node(generated(&not_found))
        .add_node(TemplateNode::Directory(DirectorySpec::new("views")))
        .add_node(TemplateNode::File(FileSpec::new(
            VIEWS_AGGREGATOR,
            TemplateContent::Literal(AggregatorFile::empty().render().into()),
        )))
        .build()?;
    Ok(template)
}

/// Mantine `AppShell` dashboard. Header, footer and home page mention the
/// project name and are parameterized.
pub fn basic_mantine() -> DashBuilderResult<Template> {
    let mut builder = Template::builder().id(BASIC_MANTINE).metadata(
        TemplateMetadata::new(BASIC_MANTINE)
            .description("Mantine dashboard shell with header, sidebar and footer views")
            .tags(vec!["dash".into(), "mantine".into()]),
    );

    let mut seen_dirs: Vec<&str> = Vec::new();
    for (path, content) in BASIC_MANTINE_FILES {
        if let Some((dir, _)) = path.rsplit_once('/') {
            if !seen_dirs.contains(&dir) {
                seen_dirs.push(dir);
                builder = builder.add_node(TemplateNode::Directory(DirectorySpec::new(dir)));
            }
        }
        builder = builder.add_node(TemplateNode::File(FileSpec::new(*path, embedded(*content))));
    }

    Ok(builder.build()?)
}

/// Directories probed for user templates, in priority order.
///
/// 1. `configured`, from `templates.local_path` or `DASH_BUILDER_TEMPLATES_DIR`.
/// 2. `<executable-dir>/templates`, for installs that ship a templates folder
///    next to the binary.
///
/// Only existing directories are returned.
pub fn candidate_dirs(configured: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);

    if let Some(dir) = configured {
        debug!(path = %dir.display(), "candidate from configuration");
        paths.push(dir.to_path_buf());
    }

    if let Some(exe_sibling) = exe_sibling_templates() {
        debug!(path = %exe_sibling.display(), "candidate from exe sibling");
        paths.push(exe_sibling);
    }

    paths.retain(|p| p.is_dir());
    paths
}

/// Return `<directory of current executable>/templates`, or `None` if the
/// executable path cannot be determined (some platforms / test runners).
fn exe_sibling_templates() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("templates")))
}

fn generated(artifact: &dyn Artifact) -> TemplateNode {
    TemplateNode::File(FileSpec::new(
        artifact.path(),
        TemplateContent::Literal(artifact.content().into()),
    ))
}

fn embedded(content: &'static str) -> TemplateContent {
    let source = TemplateSource::Static(content);
    if source.contains_placeholder() {
        TemplateContent::Parameterized(source)
    } else {
        TemplateContent::Literal(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(template: &Template) -> Vec<&str> {
        template.tree.nodes.iter().map(|n| n.path().as_str()).collect()
    }

    #[test]
    fn builtins_are_valid_and_sorted() {
        let templates = all_templates().unwrap();
        let names: Vec<_> = templates.iter().map(|t| t.id.name()).collect();
        assert_eq!(names, [BASIC, BASIC_MANTINE]);
        for t in &templates {
            t.validate().unwrap();
        }
    }

    #[test]
    fn basic_is_synthesized_from_artifacts() {
        let t = basic().unwrap();
        assert_eq!(
            paths(&t),
            [
                "app.py",
                "pages",
                "pages/home.py",
                "pages/not_found_404.py",
                "views",
                "views/__init__.py",
            ]
        );

        let home = t.files().find(|f| f.path.as_str() == "pages/home.py").unwrap();
        assert_eq!(home.content.source().as_str(), PageArtifact::homepage().content());
    }

    #[test]
    fn basic_mantine_parameterizes_project_name_files() {
        let t = basic_mantine().unwrap();
        let parameterized: Vec<_> = t
            .files()
            .filter(|f| matches!(f.content, TemplateContent::Parameterized(_)))
            .map(|f| f.path.as_str())
            .collect();
        assert_eq!(parameterized, ["pages/home.py", "views/footer.py", "views/header.py"]);
        assert_eq!(paths(&t).iter().filter(|p| !p.ends_with(".py")).count(), 2);
    }

    #[test]
    fn candidate_dirs_prefers_configured_and_drops_missing() {
        let temp = TempDir::new().unwrap();
        let dirs = candidate_dirs(Some(temp.path()));
        assert_eq!(dirs.first(), Some(&temp.path().to_path_buf()));

        let missing = temp.path().join("nope");
        assert!(!candidate_dirs(Some(&missing)).contains(&missing));
    }
}
