//! Scaffold Service - project creation orchestrator.
//!
//! This service coordinates the `build` workflow:
//! 1. Validate the project name and resolve the template
//! 2. Refuse to touch a project whose `app.py` already exists
//! 3. Render the template with the project's context
//! 4. Materialize every file, rolling back on I/O failure
//! 5. Run the formatter (failures are logged, never fatal)

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{FormatOutcome, Formatter, Filesystem, TemplateRenderer, TemplateStore, WriteOutcome},
        services::materializer::Materializer,
    },
    domain::{
        APP_ENTRY, DomainValidator as validator, FsEntry, ProjectStructure, RenderContext,
        TemplateId,
    },
    error::{DashBuilderError, DashBuilderResult},
};

/// What a `build` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub project_root: PathBuf,
    pub template: TemplateId,
    /// Files written by this run, in creation order.
    pub created: Vec<PathBuf>,
    /// Files that already existed and were left untouched.
    pub skipped: Vec<PathBuf>,
    pub formatted: bool,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    formatter: Option<Box<dyn Formatter>>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use dash_builder_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     Box::new(store),      // impl TemplateStore
    ///     Box::new(renderer),   // impl TemplateRenderer
    ///     Box::new(filesystem), // impl Filesystem
    /// )
    /// .with_formatter(Box::new(formatter));
    /// ```
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
            formatter: None,
        }
    }

    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Create `<destination>/<project_name>` from a template.
    #[instrument(
        skip_all,
        fields(
            project = %project_name,
            template = %template_name,
            destination = %destination.display()
        )
    )]
    pub fn build(
        &self,
        project_name: &str,
        template_name: &str,
        destination: &Path,
    ) -> DashBuilderResult<BuildReport> {
        validator::validate_project_name(project_name)?;

        let template = self.store.get(&TemplateId::new(template_name))?;
        validator::validate_template(&template)?;
        info!(template = %template.id, "Template resolved");

        let project_root = destination.join(project_name);
        let app_path = project_root.join(APP_ENTRY);
        if self.filesystem.exists(&app_path) {
            return Err(ApplicationError::ProjectExists { path: app_path }.into());
        }

        let context = RenderContext::new(project_name);
        let structure = self.renderer.render(&template, &context, &project_root)?;
        validator::validate_project_structure(&structure)?;

        let (created, skipped) = self.write_structure(&structure)?;
        for path in &skipped {
            warn!(path = %path.display(), "File already exists, skipped");
        }

        let formatted = self.format(&project_root);

        info!(
            created = created.len(),
            skipped = skipped.len(),
            "Build completed"
        );
        Ok(BuildReport {
            project_root,
            template: template.id,
            created,
            skipped,
            formatted,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Write the structure, removing this run's files if any write fails.
    fn write_structure(
        &self,
        structure: &ProjectStructure,
    ) -> DashBuilderResult<(Vec<PathBuf>, Vec<PathBuf>)> {
        let mut created = Vec::new();
        let mut skipped = Vec::new();

        match self.write_all(structure, &mut created, &mut skipped) {
            Ok(()) => Ok((created, skipped)),
            Err(e) => {
                warn!(error = %e, "Write failed, attempting rollback");
                self.rollback(&created);
                Err(e)
            }
        }
    }

    fn write_all(
        &self,
        structure: &ProjectStructure,
        created: &mut Vec<PathBuf>,
        skipped: &mut Vec<PathBuf>,
    ) -> DashBuilderResult<()> {
        let materializer = Materializer::new(self.filesystem.as_ref());
        self.filesystem.create_dir_all(structure.root())?;

        for entry in &structure.entries {
            let path = structure.root().join(entry.path());
            match entry {
                FsEntry::Directory(_) => self.filesystem.create_dir_all(&path)?,
                FsEntry::File(file) => match materializer.materialize(&path, &file.content)? {
                    WriteOutcome::Created => created.push(path),
                    WriteOutcome::Conflict => skipped.push(path),
                },
            }
        }

        Ok(())
    }

    /// Best-effort rollback. Directories are left in place.
    fn rollback(&self, created: &[PathBuf]) {
        for path in created.iter().rev() {
            if let Err(e) = self.filesystem.remove_file(path) {
                let err = DashBuilderError::from(ApplicationError::RollbackFailed {
                    path: path.clone(),
                    reason: e.to_string(),
                });
                warn!(error = %err, "Rollback failed");
            }
        }
        info!(removed = created.len(), "Rollback finished");
    }

    fn format(&self, root: &Path) -> bool {
        let Some(formatter) = &self.formatter else {
            return false;
        };
        match formatter.format(root) {
            Ok(FormatOutcome::Formatted) => true,
            Ok(FormatOutcome::Skipped) => false,
            Err(e) => {
                warn!(error = %e, "Formatting failed, files left as generated");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        MockFilesystem, MockFormatter, MockTemplateRenderer, MockTemplateStore,
    };
    use crate::domain::{FileSpec, Template, TemplateContent, TemplateNode};
    use crate::error::ErrorCategory;

    fn basic_template() -> Template {
        Template::builder()
            .id("basic")
            .add_node(TemplateNode::File(FileSpec::new(
                "app.py",
                TemplateContent::Literal("import dash\n".into()),
            )))
            .build()
            .unwrap()
    }

    fn store_with_basic() -> MockTemplateStore {
        let mut store = MockTemplateStore::new();
        store.expect_get().returning(|id| {
            if id.name() == "basic" {
                Ok(basic_template())
            } else {
                Err(ApplicationError::TemplateNotFound {
                    name: id.name().to_string(),
                    available: vec!["basic".into()],
                }
                .into())
            }
        });
        store
    }

    fn renderer_for(files: &'static [&'static str]) -> MockTemplateRenderer {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(move |_, _, root| {
            let mut structure = ProjectStructure::new(root);
            for f in files {
                structure = structure.with_file(*f, "x");
            }
            Ok(structure)
        });
        renderer
    }

    #[test]
    fn unknown_template_is_not_found() {
        let service = ScaffoldService::new(
            Box::new(store_with_basic()),
            Box::new(MockTemplateRenderer::new()),
            Box::new(MockFilesystem::new()),
        );
        let err = service
            .build("demo", "fancy", Path::new("/tmp"))
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn existing_app_entry_is_a_conflict() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|p| p.ends_with("demo/app.py"))
            .return_const(true);
        fs.expect_create_new().never();

        let service = ScaffoldService::new(
            Box::new(store_with_basic()),
            Box::new(MockTemplateRenderer::new()),
            Box::new(fs),
        );
        let err = service
            .build("demo", "basic", Path::new("/tmp"))
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn invalid_project_name_fails_before_touching_the_store() {
        let mut store = MockTemplateStore::new();
        store.expect_get().never();
        let service = ScaffoldService::new(
            Box::new(store),
            Box::new(MockTemplateRenderer::new()),
            Box::new(MockFilesystem::new()),
        );
        let err = service.build("../up", "basic", Path::new("/tmp")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn existing_files_are_skipped_and_formatter_runs() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|p| p.ends_with("pages/home.py"));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_new()
            .returning(|_, _| Ok(WriteOutcome::Created));

        let mut formatter = MockFormatter::new();
        formatter
            .expect_format()
            .withf(|p| p == Path::new("/tmp/demo"))
            .times(1)
            .returning(|_| Ok(FormatOutcome::Formatted));

        let service = ScaffoldService::new(
            Box::new(store_with_basic()),
            Box::new(renderer_for(&["app.py", "pages/home.py"])),
            Box::new(fs),
        )
        .with_formatter(Box::new(formatter));

        let report = service.build("demo", "basic", Path::new("/tmp")).unwrap();
        assert_eq!(report.created, vec![PathBuf::from("/tmp/demo/app.py")]);
        assert_eq!(report.skipped, vec![PathBuf::from("/tmp/demo/pages/home.py")]);
        assert!(report.formatted);
        assert_eq!(report.template, TemplateId::new("basic"));
    }

    #[test]
    fn write_failure_rolls_back_created_files() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_new().returning(|p, _| {
            if p.ends_with("pages/home.py") {
                Err(ApplicationError::FilesystemError {
                    path: p.to_path_buf(),
                    reason: "disk full".into(),
                }
                .into())
            } else {
                Ok(WriteOutcome::Created)
            }
        });
        fs.expect_remove_file()
            .withf(|p| p == Path::new("/tmp/demo/app.py"))
            .times(1)
            .returning(|_| Ok(()));

        let service = ScaffoldService::new(
            Box::new(store_with_basic()),
            Box::new(renderer_for(&["app.py", "pages/home.py"])),
            Box::new(fs),
        );
        assert!(service.build("demo", "basic", Path::new("/tmp")).is_err());
    }

    #[test]
    fn formatter_failure_is_not_fatal() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_new()
            .returning(|_, _| Ok(WriteOutcome::Created));

        let mut formatter = MockFormatter::new();
        formatter.expect_format().returning(|_| {
            Err(ApplicationError::FormatterFailed {
                command: "ruff".into(),
                reason: "not found".into(),
            }
            .into())
        });

        let service = ScaffoldService::new(
            Box::new(store_with_basic()),
            Box::new(renderer_for(&["app.py"])),
            Box::new(fs),
        )
        .with_formatter(Box::new(formatter));

        let report = service.build("demo", "basic", Path::new("/tmp")).unwrap();
        assert!(!report.formatted);
        assert_eq!(report.created.len(), 1);
    }
}
