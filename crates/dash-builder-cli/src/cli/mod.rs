//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name     = "dash-builder",
    bin_name = "dash-builder",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold multi-page Dash applications",
    long_about = "Dash Builder creates Dash projects from templates and adds \
                  pages and views to them, keeping the views package exports \
                  up to date.",
    after_help = "EXAMPLES:\n\
        \x20 dash-builder build demo\n\
        \x20 dash-builder build demo --template basic-mantine --location ~/code\n\
        \x20 dash-builder add-page Analytics --path /analytics --location demo\n\
        \x20 dash-builder add-view Sidebar --location demo",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from a template.
    #[command(
        visible_alias = "create",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 dash-builder build demo\n\
            \x20 dash-builder build demo -t basic-mantine -l ./projects\n\
            \x20 dash-builder create demo --no-format"
    )]
    Build(BuildArgs),

    /// Add a view to an existing project.
    #[command(
        about = "Add a view and export it from views/__init__.py",
        after_help = "EXAMPLES:\n\
            \x20 dash-builder add-view Sidebar\n\
            \x20 dash-builder add-view Chart -l demo --layout 'dmc.Paper(id=cls.id(id))'"
    )]
    AddView(AddViewArgs),

    /// Add a page to an existing project.
    #[command(
        about = "Add a page",
        after_help = "EXAMPLES:\n\
            \x20 dash-builder add-page Analytics\n\
            \x20 dash-builder add-page Reports -p /reports -l demo"
    )]
    AddPage(AddPageArgs),

    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 dash-builder list\n\
            \x20 dash-builder list --format json"
    )]
    List(ListArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 dash-builder init           # user config location\n\
            \x20 dash-builder init --local   # .dash-builder.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 dash-builder completions bash > ~/.local/share/bash-completion/completions/dash-builder\n\
            \x20 dash-builder completions zsh  > ~/.zfunc/_dash-builder\n\
            \x20 dash-builder completions fish > ~/.config/fish/completions/dash-builder.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect and edit the configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 dash-builder config get defaults.template\n\
            \x20 dash-builder config set formatter.enabled false\n\
            \x20 dash-builder config list"
    )]
    Config(ConfigCommands),
}

// ── build ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Name of the project directory.
    #[arg(value_name = "PROJECT")]
    pub name: String,

    /// Template to build from (see `dash-builder list`).
    #[arg(short = 't', long = "template", value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Directory the project directory is created in.
    #[arg(short = 'l', long = "location", value_name = "DIR")]
    pub location: Option<PathBuf>,

    #[arg(long = "no-format", help = "Do not run the formatter on generated files")]
    pub no_format: bool,
}

// ── add-view / add-page ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AddViewArgs {
    /// View name, e.g. `Sidebar` (generates `SidebarView`).
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Project directory.
    #[arg(short = 'l', long = "location", value_name = "DIR", default_value = ".")]
    pub location: PathBuf,

    /// Python expression returned by `valid_layout`. `{{CLASS_NAME}}` is
    /// replaced by the generated class name.
    #[arg(long = "layout", value_name = "EXPR")]
    pub layout: Option<String>,

    #[arg(long = "no-format", help = "Do not run the formatter on the generated file")]
    pub no_format: bool,
}

#[derive(Debug, Args)]
pub struct AddPageArgs {
    /// Page name, e.g. `Analytics` (generates `AnalyticsPage`).
    #[arg(value_name = "NAME")]
    pub name: String,

    /// URL path the page is served at. Dash derives one from the module name
    /// when omitted.
    #[arg(short = 'p', long = "path", value_name = "URL")]
    pub url_path: Option<String>,

    /// Project directory.
    #[arg(short = 'l', long = "location", value_name = "DIR", default_value = ".")]
    pub location: PathBuf,

    /// Python expression returned by `valid_layout`.
    #[arg(long = "layout", value_name = "EXPR")]
    pub layout: Option<String>,

    #[arg(long = "no-format", help = "Do not run the formatter on the generated file")]
    pub no_format: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Name, origin and description columns.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.dash-builder.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.template`.
        key: String,
    },
    /// Set a configuration key in the configuration file.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the path to the configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_build_command() {
        let cli = Cli::parse_from([
            "dash-builder",
            "build",
            "demo",
            "-t",
            "basic-mantine",
            "-l",
            "/tmp",
            "--no-format",
        ]);
        let Commands::Build(args) = cli.command else {
            panic!("expected Build command");
        };
        assert_eq!(args.name, "demo");
        assert_eq!(args.template.as_deref(), Some("basic-mantine"));
        assert_eq!(args.location, Some(PathBuf::from("/tmp")));
        assert!(args.no_format);
    }

    #[test]
    fn create_is_an_alias_for_build() {
        let cli = Cli::parse_from(["dash-builder", "create", "demo"]);
        assert!(matches!(cli.command, Commands::Build(_)));
    }

    #[test]
    fn add_page_defaults_location_to_cwd() {
        let cli = Cli::parse_from(["dash-builder", "add-page", "Analytics", "-p", "/analytics"]);
        let Commands::AddPage(args) = cli.command else {
            panic!("expected AddPage command");
        };
        assert_eq!(args.location, PathBuf::from("."));
        assert_eq!(args.url_path.as_deref(), Some("/analytics"));
        assert!(args.layout.is_none());
    }

    #[test]
    fn add_view_takes_layout() {
        let cli = Cli::parse_from(["dash-builder", "add-view", "Chart", "--layout", "dmc.Paper()"]);
        let Commands::AddView(args) = cli.command else {
            panic!("expected AddView command");
        };
        assert_eq!(args.layout.as_deref(), Some("dmc.Paper()"));
    }

    #[test]
    fn list_format_defaults_to_table() {
        let cli = Cli::parse_from(["dash-builder", "ls"]);
        let Commands::List(args) = cli.command else {
            panic!("expected List command");
        };
        assert_eq!(args.format, ListFormat::Table);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["dash-builder", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
