//! In-memory template store with built-in templates.

use std::{
    collections::BTreeMap,
    path::Path,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use dash_builder_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{DomainValidator as validator, Template, TemplateId},
    error::DashBuilderResult,
};
use tracing::{debug, info, instrument};

use crate::{builtin_templates, template_loader::FilesystemTemplateLoader};

/// Thread-safe in-memory template store, keyed and ordered by name.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<TemplateId, Template>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with built-in templates loaded.
    pub fn with_builtin() -> DashBuilderResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    /// Load built-in templates.
    pub fn load_builtin(&self) -> DashBuilderResult<()> {
        for template in builtin_templates::all_templates()? {
            self.insert(template)?;
        }
        Ok(())
    }

    /// Load every template under `dir`, replacing same-named entries.
    ///
    /// Returns how many templates were loaded.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub fn load_directory(&self, dir: &Path) -> DashBuilderResult<usize> {
        let templates = FilesystemTemplateLoader::new(dir).load_all()?;
        let count = templates.len();
        for template in templates {
            if self.contains(&template.id) {
                debug!(name = %template.id, "directory template overrides existing entry");
            }
            self.insert(template)?;
        }
        info!(count, "directory templates loaded");
        Ok(count)
    }

    pub fn contains(&self, id: &TemplateId) -> bool {
        self.read().map(|inner| inner.contains_key(id)).unwrap_or(false)
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> DashBuilderResult<RwLockReadGuard<'_, BTreeMap<TemplateId, Template>>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    fn write(&self) -> DashBuilderResult<RwLockWriteGuard<'_, BTreeMap<TemplateId, Template>>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, id: &TemplateId) -> DashBuilderResult<Template> {
        let inner = self.read()?;
        inner.get(id).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                name: id.to_string(),
                available: inner.keys().map(ToString::to_string).collect(),
            }
            .into()
        })
    }

    fn list(&self) -> DashBuilderResult<Vec<Template>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn insert(&self, template: Template) -> DashBuilderResult<()> {
        validator::validate_template(&template)?;
        self.write()?.insert(template.id.clone(), template);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_builder_core::domain::TemplateOrigin;
    use dash_builder_core::error::ErrorCategory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn builtin_store_lists_sorted() {
        let store = InMemoryStore::with_builtin().unwrap();
        let names: Vec<_> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(names, ["basic", "basic-mantine"]);
    }

    #[test]
    fn unknown_template_lists_available_names() {
        let store = InMemoryStore::with_builtin().unwrap();
        let err = store.get(&TemplateId::new("nope")).unwrap_err();

        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(
            err.suggestions()
                .iter()
                .any(|s| s == "Available templates: basic, basic-mantine")
        );
    }

    #[test]
    fn directory_template_overrides_builtin() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("basic");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("app.py"), "# custom\n").unwrap();

        let store = InMemoryStore::with_builtin().unwrap();
        assert_eq!(store.load_directory(temp.path()).unwrap(), 1);

        let basic = store.get(&TemplateId::new("basic")).unwrap();
        assert_eq!(basic.metadata.origin, TemplateOrigin::Directory(dir));
        assert_eq!(basic.files().count(), 1);
        assert_eq!(store.len(), 2);
    }
}
