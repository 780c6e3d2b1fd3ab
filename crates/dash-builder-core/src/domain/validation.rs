use crate::domain::{
    entities::{ProjectStructure, Template},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_template(template: &Template) -> Result<(), DomainError> {
        template.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }

    /// Page and view names become Python class and module names, so they
    /// must be ASCII identifiers starting with a letter.
    pub fn validate_artifact_name(name: &str) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidName {
            name: name.to_owned(),
            reason: reason.to_owned(),
        };

        let mut chars = name.chars();
        match chars.next() {
            None => return Err(invalid("name cannot be empty")),
            Some(c) if !c.is_ascii_alphabetic() => {
                return Err(invalid("name must start with a letter"));
            }
            Some(_) => {}
        }
        if let Some(c) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            return Err(invalid(&format!("character '{c}' is not allowed")));
        }
        Ok(())
    }

    /// Project names become a single directory below the destination and are
    /// substituted into Python string literals.
    pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidName {
            name: name.to_owned(),
            reason: reason.to_owned(),
        };

        if name.trim().is_empty() {
            return Err(invalid("project name cannot be empty"));
        }
        if name.starts_with('.') {
            return Err(invalid("project name cannot start with '.'"));
        }
        if name.contains(['/', '\\']) {
            return Err(invalid("project name cannot contain path separators"));
        }
        if name.contains(['"', '\'']) {
            return Err(invalid("project name cannot contain quotes"));
        }
        if name.chars().any(char::is_control) {
            return Err(invalid("project name cannot contain control characters"));
        }
        Ok(())
    }

    /// URL paths are written into a Python string literal.
    pub fn validate_url_path(path: &str) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidUrlPath {
            path: path.to_owned(),
            reason: reason.to_owned(),
        };

        if !path.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }
        if path.contains(['"', '\'', '\\']) {
            return Err(invalid("quotes and backslashes are not allowed"));
        }
        if path.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(invalid("whitespace and control characters are not allowed"));
        }
        Ok(())
    }
}
