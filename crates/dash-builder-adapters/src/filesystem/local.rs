//! Local filesystem adapter using std::fs.
//!
//! Writes go through a temporary file in the target directory that is then
//! persisted into place, so a reader never observes a partially written file.

use std::io::{self, Write};
use std::path::Path;

use dash_builder_core::{
    application::{ApplicationError, ports::Filesystem, WriteOutcome},
    error::{DashBuilderError, DashBuilderResult},
};
use tempfile::NamedTempFile;
use tracing::trace;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }

    /// Stage `content` in a temp file next to `path`.
    fn stage(path: &Path, content: &str) -> DashBuilderResult<NamedTempFile> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged =
            NamedTempFile::new_in(dir).map_err(|e| map_io_error(path, e, "create temp file"))?;
        staged
            .write_all(content.as_bytes())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|e| map_io_error(path, e, "write file"))?;
        Ok(staged)
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> DashBuilderResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn create_new(&self, path: &Path, content: &str) -> DashBuilderResult<WriteOutcome> {
        if path.exists() {
            return Ok(WriteOutcome::Conflict);
        }
        let staged = Self::stage(path, content)?;
        match staged.persist_noclobber(path) {
            Ok(_) => {
                trace!(path = %path.display(), "created");
                Ok(WriteOutcome::Created)
            }
            // Lost a race against another writer; the temp file is dropped.
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(WriteOutcome::Conflict),
            Err(e) => Err(map_io_error(path, e.error, "create file")),
        }
    }

    fn write_file(&self, path: &Path, content: &str) -> DashBuilderResult<()> {
        let staged = Self::stage(path, content)?;
        staged
            .persist(path)
            .map(|_| ())
            .map_err(|e| map_io_error(path, e.error, "replace file"))
    }

    fn read_to_string(&self, path: &Path) -> DashBuilderResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_file(&self, path: &Path) -> DashBuilderResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> DashBuilderError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn create_new_writes_full_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.py");

        let outcome = LocalFilesystem::new().create_new(&path, "import dash\n").unwrap();

        assert_eq!(outcome, WriteOutcome::Created);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "import dash\n");
    }

    #[test]
    fn create_new_never_replaces_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.py");
        std::fs::write(&path, "original").unwrap();

        let outcome = LocalFilesystem::new().create_new(&path, "replacement").unwrap();

        assert_eq!(outcome, WriteOutcome::Conflict);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn create_new_leaves_no_temp_files_behind() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        fs.create_new(&temp.path().join("a.py"), "a").unwrap();
        fs.create_new(&temp.path().join("a.py"), "b").unwrap();

        let names: Vec<_> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, ["a.py"]);
    }

    #[test]
    fn write_file_replaces_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("__init__.py");
        let fs = LocalFilesystem::new();

        fs.write_file(&path, "one").unwrap();
        fs.write_file(&path, "two").unwrap();

        assert_eq!(fs.read_to_string(&path).unwrap(), "two");
    }

    #[test]
    fn missing_parent_is_a_filesystem_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("x.py");

        let err = LocalFilesystem::new().create_new(&path, "x").unwrap_err();
        assert!(err.to_string().contains("Filesystem error"));
    }

    #[test]
    fn remove_file_deletes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("x.py");
        let fs = LocalFilesystem::new();
        fs.create_new(&path, "x").unwrap();

        fs.remove_file(&path).unwrap();
        assert!(!fs.exists(&path));
    }
}
