//! CLI entry point for ax-records.
//!
//! # Usage
//!
//! ```bash
//! # Replay a JSON tree dump and print the walked window
//! ax-records tree capture.json
//!
//! # Parse a dump with the calendar reader
//! ax-records tree capture.json --domain events
//!
//! # Indented outline of a dump
//! ax-records outline capture.json
//!
//! # Patterns found in a string
//! ax-records patterns "Join https://zoom.us/j/1 at 2:00 PM"
//!
//! # Live extraction (macOS)
//! ax-records check-permissions
//! ax-records app com.apple.iCal
//! ```
//!
//! All results are JSON on stdout. Errors go to stderr and exit with code 1.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;

use ax_records::patterns::{classify_content_type, extract_all};
use ax_records::{Domain, ExtractionError, RecordExtractor, Settings};

#[derive(Debug, Parser)]
#[command(
    name = "ax-records",
    version,
    about = "Extract structured records from desktop applications via Accessibility trees"
)]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Walk a JSON tree dump and print the window content or parsed records
    Tree {
        file: PathBuf,
        /// Parse with this domain's reader (events, mail, messages, notes,
        /// photos, diagnostics, browser_tabs, terminal)
        #[arg(long)]
        domain: Option<Domain>,
        /// Override the traversal depth bound
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// Print the indented element outline of a JSON tree dump
    Outline {
        file: PathBuf,
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// Print every pattern found in TEXT and its content type
    Patterns { text: String },
    /// Walk the focused window of a running application (macOS)
    App {
        bundle_id: String,
        /// Reader to use; defaults to the one registered for the bundle
        #[arg(long)]
        domain: Option<Domain>,
        /// Print the walked window instead of parsed records
        #[arg(long)]
        raw: bool,
    },
    /// Report whether accessibility access is granted (macOS)
    CheckPermissions,
}

fn load_settings(path: Option<&Path>) -> Result<Settings, ExtractionError> {
    match path {
        Some(path) => Settings::load_from_path(path),
        None => Ok(Settings::default()),
    }
}

fn init_logging(settings: &Settings) {
    let env = env_logger::Env::default().default_filter_or(settings.general.log_level.as_str());
    // A second init (tests) is harmless.
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn extractor(settings: &Settings, max_depth: Option<usize>) -> Result<RecordExtractor, ExtractionError> {
    let max_depth = max_depth.unwrap_or(settings.walker.max_depth);
    if max_depth == 0 {
        return Err(ExtractionError::InvalidInput(
            "--max-depth must be at least 1".into(),
        ));
    }
    Ok(RecordExtractor::new(max_depth, settings.tuning()))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ExtractionError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ExtractionError::InvalidInput(format!("cannot serialize output: {}", e)))?;
    println!("{}", json);
    Ok(())
}

#[derive(Serialize)]
struct PatternReport {
    content_type: String,
    patterns: Vec<ax_records::patterns::ExtractedPattern>,
}

#[derive(Serialize)]
struct PermissionReport {
    enabled: bool,
    message: &'static str,
}

fn run(cli: Cli) -> Result<(), ExtractionError> {
    let settings = load_settings(cli.config.as_deref())?;
    init_logging(&settings);
    // Settings pick the log level, so this can only be reported afterwards.
    if let Some(path) = &cli.config {
        log::info!("[AX-EXTRACTOR] Loaded configuration from {:?}", path);
    }
    log::debug!("Executing command: {:?}", cli.command);

    match cli.command {
        Commands::Tree {
            file,
            domain,
            max_depth,
        } => {
            let extractor = extractor(&settings, max_depth)?;
            let json = std::fs::read_to_string(&file)?;
            let content = extractor.read_tree(&json)?;
            match domain {
                Some(domain) => print_json(&extractor.parse(domain, &content)),
                None => print_json(&content),
            }
        }
        Commands::Outline { file, max_depth } => {
            let extractor = extractor(&settings, max_depth)?;
            let json = std::fs::read_to_string(&file)?;
            print!("{}", extractor.read_tree(&json)?.outline());
            Ok(())
        }
        Commands::Patterns { text } => print_json(&PatternReport {
            content_type: classify_content_type(&text).to_string(),
            patterns: extract_all(&text),
        }),
        Commands::App {
            bundle_id,
            domain,
            raw,
        } => {
            let extractor = extractor(&settings, None)?;
            if raw {
                print_json(&extractor.read_app(&bundle_id)?)
            } else {
                print_json(&extractor.parse_app(&bundle_id, domain)?)
            }
        }
        Commands::CheckPermissions => check_permissions(),
    }
}

#[cfg(target_os = "macos")]
fn check_permissions() -> Result<(), ExtractionError> {
    let enabled = RecordExtractor::is_enabled();
    print_json(&PermissionReport {
        enabled,
        message: if enabled {
            "Accessibility permissions are granted"
        } else {
            "Accessibility permissions are NOT granted. Enable them in System Settings."
        },
    })?;
    if enabled {
        Ok(())
    } else {
        Err(ExtractionError::PermissionDenied(
            ax_records::platform::macos::permission_instructions().trim().to_string(),
        ))
    }
}

#[cfg(not(target_os = "macos"))]
fn check_permissions() -> Result<(), ExtractionError> {
    print_json(&PermissionReport {
        enabled: false,
        message: "Accessibility extraction is only available on macOS",
    })?;
    Err(ExtractionError::UnsupportedPlatform(
        std::env::consts::OS.to_string(),
    ))
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("[AX-EXTRACTOR] ❌ {}", e);
        process::exit(1);
    }
}
