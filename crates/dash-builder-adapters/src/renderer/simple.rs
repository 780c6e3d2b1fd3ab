//! Simple variable substitution renderer.

use std::path::Path;

use dash_builder_core::{
    application::ports::TemplateRenderer,
    domain::{
        DomainValidator as validator, ProjectStructure, RenderContext, Template, TemplateContent,
        TemplateNode,
    },
    error::DashBuilderResult,
};
use tracing::{debug, instrument};

/// Renderer using `{{VARIABLE}}` substitution.
///
/// Literal files are copied verbatim. Parameterized files have every known
/// variable replaced; unknown placeholders are left untouched.
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimpleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(template = %template.id))]
    fn render(
        &self,
        template: &Template,
        context: &RenderContext,
        output_root: &Path,
    ) -> DashBuilderResult<ProjectStructure> {
        validator::validate_template(template)?;

        let mut structure = ProjectStructure::new(output_root);

        for node in &template.tree.nodes {
            match node {
                TemplateNode::File(spec) => {
                    structure.add_file(spec.path.clone(), render_content(&spec.content, context));
                }
                TemplateNode::Directory(spec) => {
                    structure.add_directory(spec.path.clone());
                }
            }
        }

        validator::validate_project_structure(&structure)?;
        debug!(entries = structure.entry_count(), "rendered");

        Ok(structure)
    }
}

fn render_content(content: &TemplateContent, ctx: &RenderContext) -> String {
    match content {
        TemplateContent::Literal(source) => source.as_str().to_string(),
        TemplateContent::Parameterized(source) => ctx.render(source.as_str()),
    }
}
