//! Template Service - template queries.
//!
//! Backs the `list` command. Separated from ScaffoldService for single
//! responsibility.

use crate::{
    application::ports::TemplateStore,
    domain::{Template, TemplateId},
    error::DashBuilderResult,
};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TemplateInfo {
    pub name: String,
    pub description: String,
    pub version: String,
    /// `builtin` or the directory the template was loaded from.
    pub origin: String,
    pub files: usize,
}

impl From<&Template> for TemplateInfo {
    fn from(t: &Template) -> Self {
        Self {
            name: t.id.to_string(),
            description: t.metadata.description.clone(),
            version: t.metadata.version.clone(),
            origin: t.metadata.origin.to_string(),
            files: t.files().count(),
        }
    }
}

/// Service for template operations.
pub struct TemplateService {
    store: Box<dyn TemplateStore>,
}

impl TemplateService {
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self { store }
    }

    pub fn get(&self, name: &str) -> DashBuilderResult<Template> {
        self.store.get(&TemplateId::new(name))
    }

    /// List all templates, sorted by name.
    pub fn list(&self) -> DashBuilderResult<Vec<TemplateInfo>> {
        let mut infos: Vec<TemplateInfo> = self.store.list()?.iter().map(TemplateInfo::from).collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }
}
