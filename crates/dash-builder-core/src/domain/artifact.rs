//! Generated source files.
//!
//! Every artifact assembles its text from an ordered list of blocks. Blocks
//! are joined with [`BLOCK_SEPARATOR`] and the file ends with one newline, so
//! output is byte-identical for identical inputs and already matches the
//! formatter's layout for top-level definitions.
//!
//! Page file layout:
//!
//! ```text
//! """Module containing the AnalyticsPage."""   docstring + imports
//!
//! import dash
//! ...
//!
//! dash.register_page(__name__, path="/x")     registration
//!
//! class AnalyticsPage(DashPage): ...           class definition
//!
//! def layout(**kwargs): ...                    page-discovery entry point
//! ```
//!
//! Views drop the registration block and the entry point.

use std::path::Path;

use super::entities::common::RelativePath;
use super::naming::{class_name, to_snake_case};

/// Two blank lines between top-level blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n\n";

/// Placeholder replaced by the generated class name inside layout expressions.
pub const CLASS_NAME_PLACEHOLDER: &str = "{{CLASS_NAME}}";

/// Package whose imports are grouped after third-party imports.
const FIRST_PARTY_PACKAGE: &str = "dash_builder";

const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    App,
    Page,
    View,
}

impl ArtifactKind {
    /// Class-name suffix for generated classes.
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::App => "",
            Self::Page => "Page",
            Self::View => "View",
        }
    }

    /// Project-relative directory holding artifacts of this kind.
    pub const fn directory(&self) -> &'static str {
        match self {
            Self::App => "",
            Self::Page => "pages",
            Self::View => "views",
        }
    }
}

/// A generatable source file with a deterministic content recipe.
pub trait Artifact {
    fn kind(&self) -> ArtifactKind;

    /// Path of the file relative to the project root.
    fn path(&self) -> RelativePath;

    /// Generated class, if the artifact defines one.
    fn class_name(&self) -> Option<&str>;

    /// Module name without the `.py` extension.
    fn module_name(&self) -> &str;

    /// Ordered top-level blocks.
    fn content_list(&self) -> Vec<String>;

    fn content(&self) -> String {
        let mut out = self.content_list().join(BLOCK_SEPARATOR);
        out.push('\n');
        out
    }
}

// ============================================================================
// Imports
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum ImportLine {
    Module {
        module: String,
        alias: Option<String>,
    },
    From {
        package: String,
        symbols: Vec<String>,
    },
}

impl ImportLine {
    fn render(&self) -> String {
        match self {
            Self::Module {
                module,
                alias: None,
            } => format!("import {module}"),
            Self::Module {
                module,
                alias: Some(alias),
            } => format!("import {module} as {alias}"),
            Self::From { package, symbols } => {
                format!("from {package} import {}", symbols.join(", "))
            }
        }
    }
}

/// Import statements grouped into a third-party and a first-party section.
///
/// Lines keep their declaration order. Repeated `from` imports of one package
/// merge into a single line and symbols are deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBlock {
    third_party: Vec<ImportLine>,
    first_party: Vec<ImportLine>,
}

impl ImportBlock {
    pub fn new() -> Self {
        Self::default()
    }

    fn section_mut(&mut self, package: &str) -> &mut Vec<ImportLine> {
        let root = package.split('.').next().unwrap_or(package);
        if root == FIRST_PARTY_PACKAGE {
            &mut self.first_party
        } else {
            &mut self.third_party
        }
    }

    /// `import <module>` or `import <module> as <alias>`.
    pub fn add_module(&mut self, module: &str, alias: Option<&str>) {
        let line = ImportLine::Module {
            module: module.to_owned(),
            alias: alias.map(str::to_owned),
        };
        let section = self.section_mut(module);
        if !section.contains(&line) {
            section.push(line);
        }
    }

    /// `from <package> import <symbol>`.
    pub fn add_from(&mut self, package: &str, symbol: &str) {
        let section = self.section_mut(package);
        let existing = section.iter_mut().find_map(|line| match line {
            ImportLine::From {
                package: p,
                symbols,
            } if p == package => Some(symbols),
            _ => None,
        });
        if let Some(symbols) = existing {
            if !symbols.iter().any(|s| s == symbol) {
                symbols.push(symbol.to_owned());
            }
            return;
        }
        section.push(ImportLine::From {
            package: package.to_owned(),
            symbols: vec![symbol.to_owned()],
        });
    }

    pub fn is_empty(&self) -> bool {
        self.third_party.is_empty() && self.first_party.is_empty()
    }

    pub fn render(&self) -> String {
        let sections: Vec<String> = [&self.third_party, &self.first_party]
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.iter()
                    .map(ImportLine::render)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect();
        sections.join("\n\n")
    }
}

/// Snake-cased module name restricted to `[A-Za-z0-9_]`, so it is always a
/// single path segment.
fn module_identifier(name: &str) -> String {
    to_snake_case(name)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// `<kind dir>/<module>.py`. `module` comes from `module_identifier` or a
/// fixed name, so the path is relative with no parent components.
fn module_file(kind: ArtifactKind, module: &str) -> RelativePath {
    RelativePath::new(Path::new(kind.directory()).join(format!("{module}.py")))
}

fn module_docstring(class_name: &str) -> String {
    format!("\"\"\"Module containing the {class_name}.\"\"\"")
}

fn header_block(class_name: &str, imports: &ImportBlock) -> String {
    let doc = module_docstring(class_name);
    if imports.is_empty() {
        doc
    } else {
        format!("{doc}\n\n{}", imports.render())
    }
}

/// Substitute the class name and indent continuation lines to method-body
/// depth, so `return <expr>` stays valid for multi-line expressions.
fn layout_body(expression: &str, class_name: &str) -> String {
    let expression = expression.replace(CLASS_NAME_PLACEHOLDER, class_name);
    let body_indent = INDENT.repeat(2);
    let mut lines = expression.trim_end().lines();
    let mut out = format!("return {}", lines.next().unwrap_or("None").trim_start());
    for line in lines {
        out.push('\n');
        if !line.trim().is_empty() {
            out.push_str(&body_indent);
            out.push_str(line);
        }
    }
    out
}

// ============================================================================
// App
// ============================================================================

/// The `app.py` entry file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppArtifact;

impl AppArtifact {
    pub fn new() -> Self {
        Self
    }
}

impl Artifact for AppArtifact {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::App
    }

    fn path(&self) -> RelativePath {
        RelativePath::new("app.py")
    }

    fn class_name(&self) -> Option<&str> {
        None
    }

    fn module_name(&self) -> &str {
        "app"
    }

    fn content_list(&self) -> Vec<String> {
        vec![
            "import dash".to_owned(),
            "app: dash.Dash = dash.Dash(__name__, use_pages=True)".to_owned(),
            format!("if __name__ == \"__main__\":\n{INDENT}app.run(debug=True)"),
        ]
    }
}

// ============================================================================
// Pages
// ============================================================================

/// A routable page module under `pages/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageArtifact {
    class_name: String,
    module_name: String,
    url_path: Option<String>,
    layout: Option<String>,
    imports: ImportBlock,
}

impl PageArtifact {
    /// Page for an artifact name: `Analytics` → `pages/analytics.py`,
    /// class `AnalyticsPage`.
    pub fn new(name: &str) -> Self {
        Self::named(
            class_name(name, ArtifactKind::Page.suffix()),
            module_identifier(name),
        )
    }

    /// `pages/home.py` served at `/`.
    pub fn homepage() -> Self {
        Self::named("HomePage".into(), "home".into()).with_url_path("/")
    }

    /// `pages/not_found_404.py`, picked up by Dash as the 404 page.
    pub fn not_found() -> Self {
        Self::named("NotFound404".into(), "not_found_404".into())
    }

    fn named(class_name: String, module_name: String) -> Self {
        let mut imports = ImportBlock::new();
        imports.add_module("dash", None);
        imports.add_module("dash_mantine_components", Some("dmc"));
        imports.add_from("dash", "html");
        imports.add_from(FIRST_PARTY_PACKAGE, "DashPage");
        Self {
            class_name,
            module_name,
            url_path: None,
            layout: None,
            imports,
        }
    }

    pub fn with_url_path(mut self, url_path: impl Into<String>) -> Self {
        self.url_path = Some(url_path.into());
        self
    }

    /// Expression returned by `valid_layout`. `{{CLASS_NAME}}` is replaced.
    pub fn with_layout(mut self, expression: impl Into<String>) -> Self {
        self.layout = Some(expression.into());
        self
    }

    pub fn with_import(mut self, package: &str, symbol: &str) -> Self {
        self.imports.add_from(package, symbol);
        self
    }

    pub fn url_path(&self) -> Option<&str> {
        self.url_path.as_deref()
    }

    fn registration(&self) -> String {
        match &self.url_path {
            None => "dash.register_page(__name__)".to_owned(),
            Some(path) => format!("dash.register_page(__name__, path=\"{path}\")"),
        }
    }

    fn class_definition(&self) -> String {
        let class = &self.class_name;
        let layout = self.layout.clone().unwrap_or_else(|| {
            format!("[html.Div(dmc.Title(\"This is the {class}\", order=2))]")
        });
        [
            format!("class {class}(DashPage):"),
            format!("{INDENT}\"\"\"{class}.\"\"\""),
            String::new(),
            format!("{INDENT}@classmethod"),
            format!("{INDENT}def valid_layout(cls, **kwargs):"),
            format!("{INDENT}{INDENT}\"\"\"Render valid layout for the {class}.\"\"\""),
            format!("{INDENT}{INDENT}{}", layout_body(&layout, class)),
        ]
        .join("\n")
    }

    fn entry_point(&self) -> String {
        let class = &self.class_name;
        [
            "def layout(**kwargs):".to_owned(),
            format!("{INDENT}\"\"\"Render valid layout for the {class}.\"\"\""),
            format!("{INDENT}return {class}.layout(**kwargs)"),
        ]
        .join("\n")
    }
}

impl Artifact for PageArtifact {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Page
    }

    fn path(&self) -> RelativePath {
        module_file(ArtifactKind::Page, &self.module_name)
    }

    fn class_name(&self) -> Option<&str> {
        Some(&self.class_name)
    }

    fn module_name(&self) -> &str {
        &self.module_name
    }

    fn content_list(&self) -> Vec<String> {
        vec![
            header_block(&self.class_name, &self.imports),
            self.registration(),
            self.class_definition(),
            self.entry_point(),
        ]
    }
}

// ============================================================================
// Views
// ============================================================================

/// A reusable view module under `views/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewArtifact {
    class_name: String,
    module_name: String,
    layout: Option<String>,
    imports: ImportBlock,
}

impl ViewArtifact {
    /// View for an artifact name: `Sidebar` → `views/sidebar.py`,
    /// class `SidebarView`.
    pub fn new(name: &str) -> Self {
        let mut imports = ImportBlock::new();
        imports.add_module("dash_mantine_components", Some("dmc"));
        imports.add_from(FIRST_PARTY_PACKAGE, "DashView");
        Self {
            class_name: class_name(name, ArtifactKind::View.suffix()),
            module_name: module_identifier(name),
            layout: None,
            imports,
        }
    }

    /// Expression returned by `valid_layout`. `{{CLASS_NAME}}` is replaced.
    pub fn with_layout(mut self, expression: impl Into<String>) -> Self {
        self.layout = Some(expression.into());
        self
    }

    pub fn with_import(mut self, package: &str, symbol: &str) -> Self {
        self.imports.add_from(package, symbol);
        self
    }

    fn class_definition(&self) -> String {
        let class = &self.class_name;
        let layout = self
            .layout
            .clone()
            .unwrap_or_else(|| format!("dmc.Text(\"This is the {class}.\", id=cls.id(id))"));
        [
            format!("class {class}(DashView):"),
            format!("{INDENT}\"\"\"{class}.\"\"\""),
            String::new(),
            format!("{INDENT}@classmethod"),
            format!("{INDENT}def valid_layout(cls, id: str, **kwargs):"),
            format!("{INDENT}{INDENT}\"\"\"Render valid layout for the {class}.\"\"\""),
            format!("{INDENT}{INDENT}{}", layout_body(&layout, class)),
        ]
        .join("\n")
    }
}

impl Artifact for ViewArtifact {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::View
    }

    fn path(&self) -> RelativePath {
        module_file(ArtifactKind::View, &self.module_name)
    }

    fn class_name(&self) -> Option<&str> {
        Some(&self.class_name)
    }

    fn module_name(&self) -> &str {
        &self.module_name
    }

    fn content_list(&self) -> Vec<String> {
        vec![
            header_block(&self.class_name, &self.imports),
            self.class_definition(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANALYTICS_PAGE: &str = r#""""Module containing the AnalyticsPage."""

import dash
import dash_mantine_components as dmc
from dash import html

from dash_builder import DashPage


dash.register_page(__name__, path="/analytics")


class AnalyticsPage(DashPage):
    """AnalyticsPage."""

    @classmethod
    def valid_layout(cls, **kwargs):
        """Render valid layout for the AnalyticsPage."""
        return [html.Div(dmc.Title("This is the AnalyticsPage", order=2))]


def layout(**kwargs):
    """Render valid layout for the AnalyticsPage."""
    return AnalyticsPage.layout(**kwargs)
"#;

    #[test]
    fn page_content_matches_expected_layout() {
        let page = PageArtifact::new("Analytics").with_url_path("/analytics");
        assert_eq!(page.content(), ANALYTICS_PAGE);
        assert_eq!(page.path().as_str(), "pages/analytics.py");
    }

    #[test]
    fn content_is_deterministic() {
        let build = || {
            PageArtifact::new("Sales")
                .with_url_path("/sales")
                .with_import("dash", "dcc")
                .content()
        };
        assert_eq!(build(), build());
        assert_eq!(ViewArtifact::new("Chart").content(), ViewArtifact::new("Chart").content());
    }

    #[test]
    fn registration_without_path_takes_module_only() {
        let content = PageArtifact::not_found().content();
        assert!(content.contains("\ndash.register_page(__name__)\n"));
        assert!(content.contains("class NotFound404(DashPage):"));
    }

    #[test]
    fn homepage_is_served_at_root() {
        let home = PageArtifact::homepage();
        assert_eq!(home.path().as_str(), "pages/home.py");
        assert_eq!(home.class_name(), Some("HomePage"));
        assert!(home.content().contains(r#"dash.register_page(__name__, path="/")"#));
    }

    #[test]
    fn view_has_no_registration_or_entry_point() {
        let view = ViewArtifact::new("Sidebar");
        let content = view.content();
        assert_eq!(view.path().as_str(), "views/sidebar.py");
        assert_eq!(view.content_list().len(), 2);
        assert!(!content.contains("register_page"));
        assert!(!content.contains("def layout("));
        assert!(content.contains("class SidebarView(DashView):"));
        assert!(content.contains("def valid_layout(cls, id: str, **kwargs):"));
        assert!(content.contains(r#"return dmc.Text("This is the SidebarView.", id=cls.id(id))"#));
    }

    #[test]
    fn module_path_stays_inside_its_directory() {
        let page = PageArtifact::new("../Evil");
        assert_eq!(page.module_name(), "_evil");
        assert_eq!(page.path().as_str(), "pages/_evil.py");

        let view = ViewArtifact::new("/abs/Side bar");
        assert_eq!(view.path().as_path().parent(), Some(Path::new("views")));
    }

    #[test]
    fn class_and_module_names_follow_artifact_name() {
        let page = PageArtifact::new("salesReport");
        assert_eq!(page.class_name(), Some("SalesReportPage"));
        assert_eq!(page.module_name(), "sales_report");
    }

    #[test]
    fn layout_placeholder_is_substituted_and_indented() {
        let page = PageArtifact::new("Report")
            .with_layout("html.Div(\n    [\"{{CLASS_NAME}}\"],\n)");
        let content = page.content();
        assert!(content.contains(
            "        return html.Div(\n            [\"ReportPage\"],\n        )\n"
        ));
    }

    #[test]
    fn extra_imports_merge_into_existing_lines() {
        let page = PageArtifact::new("Data")
            .with_import("dash", "dcc")
            .with_import("dash", "html")
            .with_import("dash_builder", "DashPage");
        let content = page.content();
        assert!(content.contains("from dash import html, dcc\n"));
        assert_eq!(content.matches("from dash_builder import DashPage").count(), 1);
    }

    #[test]
    fn app_has_entry_and_main_guard() {
        let content = AppArtifact::new().content();
        assert_eq!(
            content,
            "import dash\n\n\napp: dash.Dash = dash.Dash(__name__, use_pages=True)\n\n\n\
             if __name__ == \"__main__\":\n    app.run(debug=True)\n"
        );
    }

    #[test]
    fn first_party_imports_follow_third_party() {
        let mut imports = ImportBlock::new();
        imports.add_from("dash_builder", "DashView");
        imports.add_module("dash", None);
        assert_eq!(imports.render(), "import dash\n\nfrom dash_builder import DashView");
    }
}
