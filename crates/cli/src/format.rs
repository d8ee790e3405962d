//! Result → human/json string formatting.
//!
//! Two modes:
//! - **Human** (default): one `key: value` line per field
//! - **JSON** (`--json`): `serde_json::to_string_pretty`

use serde::Serialize;

use docmigrate_migration::{MigrationReport, MigrationStep};

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

#[derive(Serialize)]
struct InitOutput<'a> {
    step: &'a MigrationStep,
    report: &'a MigrationReport,
    written: bool,
}

/// Format the outcome of `init`.
pub fn format_init(
    step: &MigrationStep,
    report: &MigrationReport,
    written: bool,
    mode: OutputMode,
) -> String {
    match mode {
        OutputMode::Json => to_json(&InitOutput {
            step,
            report,
            written,
        }),
        OutputMode::Human => {
            let mut out = format!(
                "step: {}\nmodel: {}\nscanned: {}\nupdated: {}\nmissing: {}",
                step, report.model, report.scanned, report.updated, report.missing
            );
            if !written {
                out.push_str("\n(dry run, snapshot not written)");
            }
            out
        }
    }
}

/// Format a MIME check result.
pub fn format_mime_check(mime_type: &str, accepted: bool, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(&serde_json::json!({
            "mime_type": mime_type,
            "accepted": accepted,
        })),
        OutputMode::Human if accepted => format!("{}: accepted", mime_type),
        OutputMode::Human => format!("{}: rejected", mime_type),
    }
}

/// Format an error.
pub fn format_error(err: &anyhow::Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "error": format!("{:#}", err)
        }))
        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err)),
        OutputMode::Human => format!("(error) {:#}", err),
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("(error) {}", e))
}
