//! luminous-rehab CLI
//!
//! Browse the Luminous Rehab clinic and therapist portals in the terminal,
//! or print individual screens.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;

use luminous_rehab::fixtures::Fixtures;
use luminous_rehab::logging::{self, default_log_path};
use luminous_rehab::registry::ScreenRegistry;
use luminous_rehab::report::{format_panel, format_screens};
use luminous_rehab::route::resolve_path;
use luminous_rehab::tui::{self, App};
use luminous_rehab::types::{LogConfig, OutputFormat, Role, ScreenKey, SessionConfig, Variant};

const DEFAULT_BASE: &str = "/luminous-rehab";

#[derive(Parser)]
#[command(name = "luminous-rehab")]
#[command(about = "Role-based portals for rehabilitation clinics and therapists")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with patients, therapists, requests and dashboard data
    #[arg(long, global = true, value_name = "FILE")]
    fixtures: Option<PathBuf>,

    /// Write logs to FILE (default location when no FILE is given)
    #[arg(long, global = true, value_name = "FILE", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    /// Log navigation at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive mobile app: welcome, sign-in, then the role's tabs
    App,

    /// Interactive web app entered at a URL path
    Web {
        /// Path to open, e.g. /clinic or /luminous-rehab/therapist
        #[arg(default_value = "/")]
        path: String,

        /// Deployment prefix stripped before matching
        #[arg(long, default_value = DEFAULT_BASE)]
        base: String,
    },

    /// Print one screen of a role's shell
    Show {
        /// clinic or therapist
        role: Role,

        /// Screen key, e.g. dashboard or medications
        screen: ScreenKey,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// List each role's tabs in order
    Screens {
        /// Only this role
        role: Option<Role>,
    },

    /// Show which screen a web path opens
    Resolve {
        path: String,

        /// Deployment prefix stripped before matching
        #[arg(long, default_value = DEFAULT_BASE)]
        base: String,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let log_config = LogConfig {
        path: cli.log_file.map(|path| path.unwrap_or_else(default_log_path)),
        verbose: cli.verbose,
    };
    logging::init(&log_config).map_err(|e| e.to_string())?;

    let fixtures = load_fixtures(cli.fixtures)?;

    match cli.command {
        Commands::App => cmd_app(fixtures),
        Commands::Web { path, base } => cmd_web(fixtures, path, base),
        Commands::Show { role, screen, format } => cmd_show(fixtures, role, screen, format.into()),
        Commands::Screens { role } => cmd_screens(role),
        Commands::Resolve { path, base } => cmd_resolve(&path, &base),
    }
}

/// Fixture data from a file, or the built-in sample set.
fn load_fixtures(path: Option<PathBuf>) -> Result<Fixtures, String> {
    match path {
        Some(path) => {
            let fixtures = Fixtures::load(&path)
                .map_err(|e| format!("Cannot load fixtures from {}: {}", path.display(), e))?;
            info!(path = %path.display(), "loaded fixtures");
            Ok(fixtures)
        }
        None => Ok(Fixtures::sample()),
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_app(fixtures: Fixtures) -> Result<(), String> {
    let app = App::new(SessionConfig::default(), ScreenRegistry::with_fixtures(fixtures));
    tui::run(app).map_err(|e| e.to_string())
}

fn cmd_web(fixtures: Fixtures, path: String, base: String) -> Result<(), String> {
    let config = SessionConfig {
        variant: Variant::Web,
        base_path: base,
    };
    let app = App::at_path(config, ScreenRegistry::with_fixtures(fixtures), &path);
    tui::run(app).map_err(|e| e.to_string())
}

fn cmd_show(fixtures: Fixtures, role: Role, screen: ScreenKey, format: OutputFormat) -> Result<(), String> {
    let registry = ScreenRegistry::with_fixtures(fixtures);
    let panel = registry.render(role, screen).ok_or_else(|| {
        let keys: Vec<&str> = role.screens().iter().map(|k| k.as_str()).collect();
        format!(
            "{} has no {} screen (available: {})",
            role.label(),
            screen.as_str(),
            keys.join(", ")
        )
    })?;

    print!("{}", format_panel(&panel, format));
    Ok(())
}

fn cmd_screens(role: Option<Role>) -> Result<(), String> {
    let roles = match role {
        Some(role) => vec![role],
        None => Role::ALL.to_vec(),
    };
    print!("{}", format_screens(&roles));
    Ok(())
}

fn cmd_resolve(path: &str, base: &str) -> Result<(), String> {
    let route = resolve_path(path, base);
    println!("{} -> {} ({})", path, route, route.path());
    Ok(())
}
