//! Implementation of the `dash-builder list` command.

use dash_builder_core::application::{TemplateInfo, TemplateService};

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = TemplateService::new(Box::new(super::template_store(&config)?));
    let templates = service.list()?;

    match args.format {
        ListFormat::Table => {
            output.header("Available Templates:")?;
            for line in table_rows(&templates, &config.defaults.template) {
                output.print(&line)?;
            }
        }
        // JSON and bare names go straight to stdout even in quiet mode so
        // they stay usable in scripts.
        ListFormat::Json => output.json(&templates)?,
        ListFormat::List => {
            for t in &templates {
                println!("{}", t.name);
            }
        }
    }

    Ok(())
}

fn table_rows(templates: &[TemplateInfo], default: &str) -> Vec<String> {
    let width = templates.iter().map(|t| t.name.len()).max().unwrap_or(0);
    templates
        .iter()
        .map(|t| {
            let marker = if t.name == default { "*" } else { " " };
            format!(
                "{marker} {:<width$}  {} ({} files, {})",
                t.name, t.description, t.files, t.origin
            )
        })
        .collect()
}
