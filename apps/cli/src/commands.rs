//! CLI argument definitions, tracing setup, and run orchestration.

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use terralabel_editor::{WalkReporter, walk_tree};
use terralabel_lookup::load_lookup;
use terralabel_shared::{AppConfig, LabelerError, WalkSummary, load_config, load_config_from};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// terralabel — inject team ownership labels into terragrunt files.
#[derive(Parser)]
#[command(
    name = "terralabel",
    version,
    about = "Inject biso_team labels into terragrunt.hcl files from a CSV lookup.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Path to the delimited lookup file mapping projects to team contacts.
    #[arg(long, value_name = "PATH")]
    pub csv: PathBuf,

    /// Root directory of the infrastructure tree to scan.
    #[arg(long = "iac-path", value_name = "PATH")]
    pub iac_path: PathBuf,

    /// Config file (defaults to ~/.terralabel/terralabel.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the lookup field delimiter.
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<String>,

    /// Override the project-name column header.
    #[arg(long, value_name = "NAME")]
    pub project_column: Option<String>,

    /// Override the team-contact column header.
    #[arg(long, value_name = "NAME")]
    pub team_column: Option<String>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "terralabel=info",
        1 => "terralabel=debug",
        _ => "terralabel=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Run orchestration
// ---------------------------------------------------------------------------

/// Run the label injection: load the lookup, then walk the tree.
///
/// Any error out of the loading phase aborts before a single target
/// file is touched.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    apply_overrides(&mut config, &cli);

    info!(
        csv = %cli.csv.display(),
        iac_path = %cli.iac_path.display(),
        "starting label injection"
    );

    let lookup = load_lookup(&cli.csv, &config.lookup)?;
    println!(
        "Loaded {} projects from {}",
        lookup.len(),
        cli.csv.display()
    );

    let reporter = CliProgress::new();
    let summary = walk_tree(&cli.iac_path, &lookup, &reporter)?;

    println!();
    println!("  Label injection complete!");
    println!("  Processed: {}", summary.files_processed);
    println!("  Modified:  {}", summary.files_modified);
    println!();

    Ok(())
}

/// CLI flags override config file values, which override defaults.
fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(delimiter) = &cli.delimiter {
        config.lookup.delimiter = delimiter.clone();
    }
    if let Some(column) = &cli.project_column {
        config.lookup.project_column = column.clone();
    }
    if let Some(column) = &cli.team_column {
        config.lookup.team_column = column.clone();
    }
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Walk progress on an indicatif spinner; per-file lines are printed
/// above it so they survive the spinner's redraws.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        spinner.set_message("Scanning for terragrunt.hcl files");
        Self { spinner }
    }
}

impl WalkReporter for CliProgress {
    fn file_matched(&self, path: &Path, project: &str) {
        self.spinner.set_message(format!("Updating {}", path.display()));
        self.spinner
            .println(format!("Match for project '{project}': {}", path.display()));
    }

    fn label_inserted(&self, _path: &Path, line: &str) {
        self.spinner
            .println(format!("  inserted: {}", line.trim_start()));
    }

    fn block_missing(&self, path: &Path) {
        self.spinner.println(format!(
            "  warning: no labels block in {}; file left unchanged",
            path.display()
        ));
    }

    fn file_failed(&self, path: &Path, error: &LabelerError) {
        self.spinner
            .println(format!("  error: {} ({error})", path.display()));
    }

    fn done(&self, _summary: &WalkSummary) {
        self.spinner.finish_and_clear();
    }
}
