//! Clap command tree definition.

use clap::{Arg, ArgAction, ArgMatches, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("docmigrate")
        .about("Document migrations and attachment checks")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Config file (default: ./docmigrate.toml)")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log at debug level")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(build_init())
        .subcommand(build_server())
        .subcommand(build_config())
}

fn build_init() -> Command {
    Command::new("init")
        .about("Run pending document migrations against a snapshot file")
        .arg(
            Arg::new("data")
                .long("data")
                .help("Snapshot file holding the stored documents")
                .required(true),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Migrate in memory without writing the snapshot back")
                .action(ArgAction::SetTrue),
        )
}

fn build_server() -> Command {
    Command::new("server")
        .about("Attachment handling checks")
        .subcommand_required(true)
        .subcommand(
            Command::new("check-mime")
                .about("Validate a MIME type against the configured allow-list")
                .arg(Arg::new("type").required(true).help("MIME type, e.g. image/png")),
        )
}

fn build_config() -> Command {
    Command::new("config")
        .about("Config file helpers")
        .subcommand_required(true)
        .subcommand(Command::new("show").about("Print the effective configuration"))
        .subcommand(Command::new("init").about("Write a default docmigrate.toml if missing"))
}

/// Deepest subcommand matches.
///
/// Global args propagate down, so the leaf sees them wherever they were given.
pub fn leaf_matches(matches: &ArgMatches) -> &ArgMatches {
    let mut current = matches;
    while let Some((_, sub)) = current.subcommand() {
        current = sub;
    }
    current
}
