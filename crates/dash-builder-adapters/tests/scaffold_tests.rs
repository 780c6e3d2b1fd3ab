//! End-to-end scenarios over the real filesystem.

use std::fs;
use std::path::Path;

use dash_builder_adapters::{InMemoryStore, LocalFilesystem, NoopFormatter, SimpleRenderer};
use dash_builder_core::application::{
    ArtifactService, Materializer, ScaffoldService, VIEWS_AGGREGATOR, WriteOutcome,
};
use dash_builder_core::domain::EditOutcome;
use dash_builder_core::error::ErrorCategory;
use tempfile::TempDir;

fn scaffold() -> ScaffoldService {
    ScaffoldService::new(
        Box::new(InMemoryStore::with_builtin().unwrap()),
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
    )
    .with_formatter(Box::new(NoopFormatter))
}

fn artifacts() -> ArtifactService {
    ArtifactService::new(Box::new(LocalFilesystem::new())).with_formatter(Box::new(NoopFormatter))
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn materialize_never_overwrites() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pages").join("x.py");
    let fs = LocalFilesystem::new();
    let materializer = Materializer::new(&fs);

    assert_eq!(materializer.materialize(&path, "first").unwrap(), WriteOutcome::Created);
    assert_eq!(materializer.materialize(&path, "second").unwrap(), WriteOutcome::Conflict);
    assert_eq!(read(&path), "first");
}

#[test]
fn register_export_twice_lists_symbol_once() {
    let temp = TempDir::new().unwrap();
    let aggregator = temp.path().join(VIEWS_AGGREGATOR);
    let service = artifacts();

    assert_eq!(
        service.register_export(&aggregator, "view_a", "ViewA").unwrap(),
        EditOutcome::Registered
    );
    assert_eq!(
        service.register_export(&aggregator, "view_a", "ViewA").unwrap(),
        EditOutcome::AlreadyRegistered
    );

    let text = read(&aggregator);
    assert_eq!(text.matches("\"ViewA\"").count(), 1);
    assert_eq!(text.matches("from .view_a import ViewA").count(), 1);
}

#[test]
fn build_basic_creates_runnable_app() {
    let temp = TempDir::new().unwrap();

    let report = scaffold().build("demo", "basic", temp.path()).unwrap();

    let root = temp.path().join("demo");
    assert_eq!(report.project_root, root);
    assert!(report.skipped.is_empty());
    assert!(!report.formatted);

    let app = read(root.join("app.py"));
    assert!(app.contains("app: dash.Dash = dash.Dash(__name__, use_pages=True)"));
    assert!(app.contains("if __name__ == \"__main__\":\n    app.run(debug=True)"));

    assert!(read(root.join("pages/home.py")).contains("dash.register_page(__name__, path=\"/\")"));
    assert!(read(root.join("pages/not_found_404.py")).contains("class NotFound404(DashPage):"));
    assert!(read(root.join(VIEWS_AGGREGATOR)).contains("__all__ = []"));
}

#[test]
fn build_basic_mantine_substitutes_project_name() {
    let temp = TempDir::new().unwrap();

    scaffold().build("sales_board", "basic-mantine", temp.path()).unwrap();

    let root = temp.path().join("sales_board");
    assert!(read(root.join("views/header.py")).contains("dmc.Title(\"sales_board\")"));
    assert!(!read(root.join("views/footer.py")).contains("{{YEAR}}"));
    assert!(root.join("pages/analytics.py").is_file());
}

#[test]
fn build_refuses_existing_app_and_unknown_template() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("demo");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("app.py"), "# mine\n").unwrap();

    let err = scaffold().build("demo", "basic", temp.path()).unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(read(root.join("app.py")), "# mine\n");

    let err = scaffold().build("other", "nope", temp.path()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NotFound);
    assert!(!temp.path().join("other").exists());
}

#[test]
fn build_skips_other_existing_files() {
    let temp = TempDir::new().unwrap();
    let pages = temp.path().join("demo").join("pages");
    fs::create_dir_all(&pages).unwrap();
    fs::write(pages.join("home.py"), "# keep\n").unwrap();

    let report = scaffold().build("demo", "basic", temp.path()).unwrap();

    assert_eq!(report.skipped, [pages.join("home.py")]);
    assert_eq!(read(pages.join("home.py")), "# keep\n");
}

#[test]
fn add_page_creates_registered_page() {
    let temp = TempDir::new().unwrap();
    scaffold().build("demo", "basic", temp.path()).unwrap();
    let project = temp.path().join("demo");

    let report = artifacts()
        .add_page("Analytics", Some("/analytics"), &project, None)
        .unwrap();

    assert_eq!(report.path, project.join("pages/analytics.py"));
    let text = read(&report.path);
    assert!(text.contains("dash.register_page(__name__, path=\"/analytics\")"));
    assert!(text.contains("class AnalyticsPage(DashPage):"));
}

#[test]
fn add_page_twice_is_a_conflict() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("demo");
    let service = artifacts();

    service
        .add_page("Analytics", Some("/analytics"), &project, None)
        .unwrap();
    let first = read(project.join("pages/analytics.py"));

    let err = service
        .add_page("Analytics", Some("/other"), &project, Some("html.Div()"))
        .unwrap_err();

    assert!(err.is_conflict());
    assert_eq!(read(project.join("pages/analytics.py")), first);
}

#[test]
fn add_view_updates_existing_aggregator() {
    let temp = TempDir::new().unwrap();
    scaffold().build("demo", "basic-mantine", temp.path()).unwrap();
    let project = temp.path().join("demo");

    let report = artifacts().add_view("Chart", &project, None).unwrap();

    assert_eq!(report.class_name, "ChartView");
    assert_eq!(report.registration, Some(EditOutcome::Registered));
    let aggregator = read(project.join(VIEWS_AGGREGATOR));
    assert!(aggregator.contains("from .sidebar import Sidebar\nfrom .chart import ChartView\n"));
    assert!(aggregator.contains("__all__ = [\"Footer\", \"Header\", \"Sidebar\", \"ChartView\"]"));
}

#[test]
fn add_view_against_malformed_aggregator_can_be_retried() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("demo");
    let aggregator = project.join(VIEWS_AGGREGATOR);
    fs::create_dir_all(aggregator.parent().unwrap()).unwrap();
    fs::write(&aggregator, "__all__ = [\n\"A\",\n").unwrap();

    let err = artifacts().add_view("Chart", &project, None).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert!(!project.join("views").join("chart.py").exists());

    fs::write(&aggregator, "__all__ = [\n\"A\",\n]\n").unwrap();
    let report = artifacts().add_view("Chart", &project, None).unwrap();
    assert_eq!(report.registration, Some(EditOutcome::Registered));
    assert!(project.join("views").join("chart.py").exists());
    assert!(read(&aggregator).contains("__all__ = [\"A\", \"ChartView\"]"));
}
