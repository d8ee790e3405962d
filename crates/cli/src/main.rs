//! docmigrate CLI: bootstraps for document migrations and attachment checks.
//!
//! - `docmigrate init --data <snapshot>`: load the snapshot, run the Person
//!   migration and write the snapshot back
//! - `docmigrate server check-mime <type>`: validate a MIME type against the
//!   configured allow-list
//! - `docmigrate config show|init`: inspect or create `docmigrate.toml`

mod bootstrap;
mod commands;
mod format;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use tracing::{debug, Level};

use docmigrate_core::{TemplateConfig, CONFIG_FILE_NAME};

use bootstrap::{check_mime, init_config, init_snapshot, mime_exit_code};
use commands::{build_cli, leaf_matches};
use format::{format_error, format_init, format_mime_check, OutputMode};

fn main() {
    let matches = build_cli().get_matches();
    let leaf = leaf_matches(&matches);

    init_logging(leaf.get_flag("verbose"));

    let mode = if leaf.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match run(&matches, mode) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches, mode: OutputMode) -> Result<i32> {
    let config_path = config_path(leaf_matches(matches));

    match matches.subcommand() {
        Some(("init", sub)) => {
            let config = load_config(&config_path)?;
            let data = sub
                .get_one::<String>("data")
                .map(PathBuf::from)
                .context("--data is required")?;
            run_init(&config, &data, sub.get_flag("dry-run"), mode)
        }
        Some(("server", sub)) => match sub.subcommand() {
            Some(("check-mime", check)) => {
                let config = load_config(&config_path)?;
                let mime_type = check
                    .get_one::<String>("type")
                    .context("MIME type is required")?;
                run_check_mime(&config, mime_type, mode)
            }
            _ => bail!("unknown server subcommand"),
        },
        Some(("config", sub)) => match sub.subcommand() {
            Some(("show", _)) => {
                let config = load_config(&config_path)?;
                let text = toml::to_string_pretty(&config).context("serializing config")?;
                print!("{}", text);
                Ok(0)
            }
            Some(("init", _)) => {
                if init_config(&config_path)? {
                    println!("{}", config_path.display());
                } else {
                    println!("{} (already exists)", config_path.display());
                }
                Ok(0)
            }
            _ => bail!("unknown config subcommand"),
        },
        _ => bail!("no subcommand given"),
    }
}

fn config_path(matches: &ArgMatches) -> PathBuf {
    matches
        .get_one::<String>("config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

fn load_config(path: &Path) -> Result<TemplateConfig> {
    let config = TemplateConfig::load_or_default(path)
        .with_context(|| format!("loading config {}", path.display()))?;
    debug!(target: "docmigrate::cli", path = %path.display(), ?config, "Config loaded");
    Ok(config)
}

fn run_init(config: &TemplateConfig, data: &Path, dry_run: bool, mode: OutputMode) -> Result<i32> {
    let outcome = init_snapshot(config, data, dry_run)?;
    println!(
        "{}",
        format_init(&outcome.step, &outcome.report, outcome.written, mode)
    );
    Ok(0)
}

fn run_check_mime(config: &TemplateConfig, mime_type: &str, mode: OutputMode) -> Result<i32> {
    let result = check_mime(config, mime_type);
    println!("{}", format_mime_check(mime_type, result.is_ok(), mode));
    if let Err(e) = &result {
        eprintln!("{}", format_error(&anyhow::anyhow!("{}", e), mode));
    }
    Ok(mime_exit_code(&result))
}
