//! `dash-builder build`: create a project from a template.

use std::path::{Path, PathBuf};

use dash_builder_adapters::{LocalFilesystem, SimpleRenderer};
use dash_builder_core::application::{BuildReport, ScaffoldService};
use serde::Serialize;
use tracing::info;

use crate::{
    cli::{BuildArgs, OutputFormat},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::{OutputManager, render_tree},
};

pub fn execute(args: BuildArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let template = args
        .template
        .clone()
        .unwrap_or_else(|| config.defaults.template.clone());
    let location = args
        .location
        .clone()
        .unwrap_or_else(|| config.defaults.location.clone());

    let service = ScaffoldService::new(
        Box::new(super::template_store(&config)?),
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
    )
    .with_formatter(super::formatter(&config, args.no_format));

    let spinner = output.spinner(&format!("Building {} from '{template}'", args.name));
    let result = service.build(&args.name, &template, &location);
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let report = result?;

    info!(project = %args.name, files = report.created.len(), "Project created");
    report_build(&args.name, &location, &report, &output)
}

/// `--output-format json` document.
#[derive(Serialize)]
struct BuildSummary<'a> {
    project: &'a str,
    template: &'a str,
    root: &'a Path,
    created: &'a [PathBuf],
    skipped: &'a [PathBuf],
    formatted: bool,
}

fn report_build(
    name: &str,
    location: &Path,
    report: &BuildReport,
    output: &OutputManager,
) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(&BuildSummary {
            project: name,
            template: report.template.name(),
            root: &report.project_root,
            created: &report.created,
            skipped: &report.skipped,
            formatted: report.formatted,
        })?;
        return Ok(());
    }

    let location = absolute(location);
    output.success(&format!(
        "`{name}` successfully created in `{}`.",
        location.display()
    ))?;

    if !output.is_quiet() {
        let tree = render_tree(&report.project_root)
            .with_cli_context(|| format!("Failed to list {}", report.project_root.display()))?;
        output.print(tree.trim_end())?;
    }

    for path in &report.skipped {
        output.warning(&format!("{} already existed and was left untouched", path.display()))?;
    }
    Ok(())
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
