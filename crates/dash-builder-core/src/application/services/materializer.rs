//! Project file materialization.
//!
//! Writes a single generated file without ever replacing an existing one:
//!
//! ```text
//! exists? ──yes──▶ Conflict (file untouched)
//!    │
//!    no ──▶ create missing parents ──▶ create_new (atomic) ──▶ Created
//! ```
//!
//! `create_new` is atomic and no-clobber, so a file that appears between the
//! existence check and the write also yields `Conflict`.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::ports::{Filesystem, WriteOutcome},
    error::DashBuilderResult,
};

pub struct Materializer<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> Materializer<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    #[instrument(skip(self, content), fields(path = %path.display(), bytes = content.len()))]
    pub fn materialize(&self, path: &Path, content: &str) -> DashBuilderResult<WriteOutcome> {
        if self.filesystem.exists(path) {
            debug!("target exists, leaving it untouched");
            return Ok(WriteOutcome::Conflict);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.filesystem.create_dir_all(parent)?;
        }

        let outcome = self.filesystem.create_new(path, content)?;
        debug!(?outcome, "materialized");
        Ok(outcome)
    }
}
