//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use arcsift_core::ExtractionReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ListingOutput<'a> {
    archive: String,
    count: usize,
    entries: &'a [String],
}

#[derive(Serialize)]
struct ExtractionOutput<'a> {
    destination: String,
    format: &'static str,
    entries: &'a [String],
    files_extracted: usize,
    files_flattened: usize,
    directories_pruned: usize,
    source_deleted: bool,
    duration_ms: u128,
    warnings: &'a [String],
}

impl<'a> ExtractionOutput<'a> {
    fn from_report(report: &'a ExtractionReport) -> Self {
        Self {
            destination: report.destination.display().to_string(),
            format: report.format.name(),
            entries: &report.entries,
            files_extracted: report.files_extracted,
            files_flattened: report.files_flattened,
            directories_pruned: report.directories_pruned,
            source_deleted: report.source_deleted,
            duration_ms: report.duration.as_millis(),
            warnings: &report.warnings,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_listing(&self, archive: &Path, entries: &[String]) -> Result<()> {
        let data = ListingOutput {
            archive: archive.display().to_string(),
            count: entries.len(),
            entries,
        };

        Self::output(&JsonOutput::success("view", data))
    }

    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        let output = JsonOutput::success("extract", ExtractionOutput::from_report(report));
        Self::output(&output)
    }

    fn format_move_result(&self, from: &Path, to: &Path) -> Result<()> {
        #[derive(Serialize)]
        struct MoveOutput {
            from: String,
            to: String,
        }

        let data = MoveOutput {
            from: from.display().to_string(),
            to: to.display().to_string(),
        };

        Self::output(&JsonOutput::success("move", data))
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}
