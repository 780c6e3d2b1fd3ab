//! Artifact Service - adds pages and views to an existing project.
//!
//! `add_view` writes `views/<module>.py` and registers the class in the
//! `views/__init__.py` aggregator; `add_page` writes `pages/<module>.py`
//! with no aggregator update. An existing target file is a conflict and is
//! never overwritten.

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{FormatOutcome, Formatter, Filesystem, WriteOutcome},
        services::materializer::Materializer,
    },
    domain::{
        AggregatorFile, Artifact, ArtifactKind, DomainValidator as validator, EditOutcome,
        PageArtifact, ViewArtifact,
    },
    error::DashBuilderResult,
};

/// Aggregator file re-exporting generated views, relative to the project.
pub const VIEWS_AGGREGATOR: &str = "views/__init__.py";

/// What an `add-page` / `add-view` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReport {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub class_name: String,
    /// Aggregator outcome; `None` for pages.
    pub registration: Option<EditOutcome>,
    pub formatted: bool,
}

pub struct ArtifactService {
    filesystem: Box<dyn Filesystem>,
    formatter: Option<Box<dyn Formatter>>,
}

impl ArtifactService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            filesystem,
            formatter: None,
        }
    }

    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Generate a view and export it from the views package.
    #[instrument(skip(self, layout), fields(project = %project_dir.display()))]
    pub fn add_view(
        &self,
        name: &str,
        project_dir: &Path,
        layout: Option<&str>,
    ) -> DashBuilderResult<ArtifactReport> {
        validator::validate_artifact_name(name)?;

        let mut view = ViewArtifact::new(name);
        if let Some(expr) = layout {
            view = view.with_layout(expr);
        }

        // The aggregator is parsed before anything is written, so a malformed
        // file leaves the project untouched.
        let aggregator_path = project_dir.join(VIEWS_AGGREGATOR);
        let class_name = view.class_name().unwrap_or_default().to_owned();
        let mut aggregator = self.load_aggregator(&aggregator_path)?;
        let registration = aggregator.register(view.module_name(), &class_name);

        let path = self.write_artifact(&view, project_dir)?;
        self.store_aggregator(&aggregator_path, &aggregator, registration)?;

        let formatted = self.format(&path);
        info!(path = %path.display(), class = %class_name, "View added");
        Ok(ArtifactReport {
            kind: ArtifactKind::View,
            path,
            class_name,
            registration: Some(registration),
            formatted,
        })
    }

    /// Generate a page, optionally served at `url_path`.
    #[instrument(skip(self, layout), fields(project = %project_dir.display()))]
    pub fn add_page(
        &self,
        name: &str,
        url_path: Option<&str>,
        project_dir: &Path,
        layout: Option<&str>,
    ) -> DashBuilderResult<ArtifactReport> {
        validator::validate_artifact_name(name)?;
        if let Some(url) = url_path {
            validator::validate_url_path(url)?;
        }

        let mut page = PageArtifact::new(name);
        if let Some(url) = url_path {
            page = page.with_url_path(url);
        }
        if let Some(expr) = layout {
            page = page.with_layout(expr);
        }

        let path = self.write_artifact(&page, project_dir)?;
        let formatted = self.format(&path);
        let class_name = page.class_name().unwrap_or_default().to_owned();
        info!(path = %path.display(), class = %class_name, "Page added");
        Ok(ArtifactReport {
            kind: ArtifactKind::Page,
            path,
            class_name,
            registration: None,
            formatted,
        })
    }

    /// Make `symbol` importable from the aggregator at `aggregator_path`,
    /// creating the file if it is missing. Applying it twice is a no-op.
    #[instrument(skip(self), fields(aggregator = %aggregator_path.display()))]
    pub fn register_export(
        &self,
        aggregator_path: &Path,
        module_name: &str,
        symbol_name: &str,
    ) -> DashBuilderResult<EditOutcome> {
        let mut file = self.load_aggregator(aggregator_path)?;
        let outcome = file.register(module_name, symbol_name);
        self.store_aggregator(aggregator_path, &file, outcome)?;
        Ok(outcome)
    }

    fn load_aggregator(&self, aggregator_path: &Path) -> DashBuilderResult<AggregatorFile> {
        if self.filesystem.exists(aggregator_path) {
            let text = self.filesystem.read_to_string(aggregator_path)?;
            Ok(AggregatorFile::parse(&text)?)
        } else {
            debug!("aggregator missing, creating it");
            Ok(AggregatorFile::empty())
        }
    }

    fn store_aggregator(
        &self,
        aggregator_path: &Path,
        file: &AggregatorFile,
        outcome: EditOutcome,
    ) -> DashBuilderResult<()> {
        match outcome {
            EditOutcome::Registered => {
                if let Some(parent) = aggregator_path.parent() {
                    self.filesystem.create_dir_all(parent)?;
                }
                self.filesystem.write_file(aggregator_path, &file.render())?;
            }
            EditOutcome::AlreadyRegistered => {
                debug!(path = %aggregator_path.display(), "already exported");
            }
        }
        Ok(())
    }

    fn write_artifact(&self, artifact: &dyn Artifact, project_dir: &Path) -> DashBuilderResult<PathBuf> {
        let path = project_dir.join(artifact.path());
        match Materializer::new(self.filesystem.as_ref()).materialize(&path, &artifact.content())? {
            WriteOutcome::Created => Ok(path),
            WriteOutcome::Conflict => Err(ApplicationError::ArtifactExists { path }.into()),
        }
    }

    fn format(&self, path: &Path) -> bool {
        let Some(formatter) = &self.formatter else {
            return false;
        };
        match formatter.format(path) {
            Ok(outcome) => outcome == FormatOutcome::Formatted,
            Err(e) => {
                warn!(error = %e, "Formatting failed, file left as generated");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::error::ErrorCategory;
    use std::sync::{Arc, Mutex};

    #[test]
    fn add_page_conflict_leaves_file_alone() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_create_new().never();
        fs.expect_write_file().never();

        let service = ArtifactService::new(Box::new(fs));
        let err = service
            .add_page("Analytics", Some("/analytics"), Path::new("demo"), None)
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn add_page_writes_page_module() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&written);

        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_new().returning(move |p, c| {
            sink.lock().unwrap().push((p.to_path_buf(), c.to_string()));
            Ok(WriteOutcome::Created)
        });

        let report = ArtifactService::new(Box::new(fs))
            .add_page("Analytics", Some("/analytics"), Path::new("demo"), None)
            .unwrap();

        assert_eq!(report.path, PathBuf::from("demo/pages/analytics.py"));
        assert_eq!(report.class_name, "AnalyticsPage");
        assert_eq!(report.registration, None);
        let written = written.lock().unwrap();
        assert!(written[0].1.contains(r#"dash.register_page(__name__, path="/analytics")"#));
    }

    #[test]
    fn bad_url_path_is_rejected() {
        let service = ArtifactService::new(Box::new(MockFilesystem::new()));
        let err = service
            .add_page("Analytics", Some("analytics"), Path::new("demo"), None)
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn add_view_registers_in_new_aggregator() {
        let aggregator = Arc::new(Mutex::new(None::<String>));
        let sink = Arc::clone(&aggregator);

        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_new()
            .returning(|_, _| Ok(WriteOutcome::Created));
        fs.expect_read_to_string().never();
        fs.expect_write_file()
            .withf(|p, _| p == Path::new("demo/views/__init__.py"))
            .times(1)
            .returning(move |_, c| {
                *sink.lock().unwrap() = Some(c.to_string());
                Ok(())
            });

        let report = ArtifactService::new(Box::new(fs))
            .add_view("Sidebar", Path::new("demo"), None)
            .unwrap();
        assert_eq!(report.registration, Some(EditOutcome::Registered));
        assert_eq!(report.class_name, "SidebarView");

        let content = aggregator.lock().unwrap().clone().unwrap();
        assert!(content.contains("from .sidebar import SidebarView\n"));
        assert!(content.contains("__all__ = [\"SidebarView\"]"));
    }

    #[test]
    fn register_export_twice_does_not_rewrite() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_read_to_string().returning(|_| {
            Ok("from .view_a import ViewA\n\n__all__ = [\"ViewA\"]\n".to_string())
        });
        fs.expect_write_file().never();

        let outcome = ArtifactService::new(Box::new(fs))
            .register_export(Path::new("views/__init__.py"), "view_a", "ViewA")
            .unwrap();
        assert_eq!(outcome, EditOutcome::AlreadyRegistered);
    }

    #[test]
    fn add_view_with_malformed_aggregator_writes_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|p| p == Path::new("demo/views/__init__.py"));
        fs.expect_read_to_string()
            .returning(|_| Ok("__all__ = [\n\"A\",\n".to_string()));
        fs.expect_create_new().never();
        fs.expect_write_file().never();

        let err = ArtifactService::new(Box::new(fs))
            .add_view("Chart", Path::new("demo"), None)
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn invalid_view_name_is_rejected() {
        let service = ArtifactService::new(Box::new(MockFilesystem::new()));
        assert!(service.add_view("my-view", Path::new("demo"), None).is_err());
    }
}
