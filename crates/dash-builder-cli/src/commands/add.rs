//! `dash-builder add-view` and `dash-builder add-page`.

use dash_builder_adapters::LocalFilesystem;
use dash_builder_core::application::{ArtifactReport, ArtifactService};
use dash_builder_core::domain::{ArtifactKind, EditOutcome};
use serde::Serialize;

use crate::{
    cli::{AddPageArgs, AddViewArgs, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

fn service(config: &AppConfig, no_format: bool) -> ArtifactService {
    ArtifactService::new(Box::new(LocalFilesystem::new()))
        .with_formatter(super::formatter(config, no_format))
}

pub fn view(args: AddViewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let report = service(&config, args.no_format).add_view(
        &args.name,
        &args.location,
        args.layout.as_deref(),
    )?;
    report_artifact(&report, &output)
}

pub fn page(args: AddPageArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let report = service(&config, args.no_format).add_page(
        &args.name,
        args.url_path.as_deref(),
        &args.location,
        args.layout.as_deref(),
    )?;
    report_artifact(&report, &output)
}

#[derive(Serialize)]
struct ArtifactSummary<'a> {
    kind: &'static str,
    path: &'a std::path::Path,
    class: &'a str,
    registered: Option<bool>,
    formatted: bool,
}

fn kind_label(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::App => "app",
        ArtifactKind::Page => "page",
        ArtifactKind::View => "view",
    }
}

fn report_artifact(report: &ArtifactReport, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(&ArtifactSummary {
            kind: kind_label(report.kind),
            path: &report.path,
            class: &report.class_name,
            registered: report
                .registration
                .map(|outcome| outcome == EditOutcome::Registered),
            formatted: report.formatted,
        })?;
        return Ok(());
    }

    output.success(&format!(
        "{} `{}` created in `{}`.",
        capitalised(kind_label(report.kind)),
        report.class_name,
        report.path.display()
    ))?;
    match report.registration {
        Some(EditOutcome::Registered) => {
            output.info(&format!("Exported `{}` from views/__init__.py", report.class_name))?
        }
        Some(EditOutcome::AlreadyRegistered) => output.info(&format!(
            "`{}` was already exported from views/__init__.py",
            report.class_name
        ))?,
        None => {}
    }
    Ok(())
}

fn capitalised(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_lowercase_kinds() {
        assert_eq!(kind_label(ArtifactKind::View), "view");
        assert_eq!(capitalised(kind_label(ArtifactKind::Page)), "Page");
    }
}
