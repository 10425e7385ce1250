//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use arcsift_core::ExtractionReport;
use console::Term;
use console::style;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn write_done(&self, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_listing(&self, archive: &Path, entries: &[String]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if entries.is_empty() {
            self.format_warning(&format!("no entries selected in {}", archive.display()));
            return Ok(());
        }

        for entry in entries {
            let _ = self.term.write_line(entry);
        }

        if self.verbose {
            let _ = self.term.write_line("");
            let _ = self.term.write_line(&format!(
                "Total: {} entries",
                Self::format_number(entries.len())
            ));
        }

        Ok(())
    }

    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.write_done("Extraction complete");

        let _ = self.term.write_line(&format!(
            "  Destination:      {}",
            report.destination.display()
        ));
        let _ = self.term.write_line(&format!(
            "  Entries selected: {}",
            Self::format_number(report.entries.len())
        ));
        let _ = self.term.write_line(&format!(
            "  Files extracted:  {}",
            Self::format_number(report.files_extracted)
        ));

        if report.files_flattened > 0 || report.directories_pruned > 0 {
            let _ = self.term.write_line(&format!(
                "  Files flattened:  {}",
                Self::format_number(report.files_flattened)
            ));
            let _ = self.term.write_line(&format!(
                "  Folders removed:  {}",
                report.directories_pruned
            ));
        }

        if report.source_deleted {
            let _ = self.term.write_line("  Archive deleted");
        }

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Format:           {}", report.format));
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", report.duration));
        }

        if report.has_warnings() {
            let _ = self.term.write_line("");
            if self.use_colors {
                let _ = self
                    .term
                    .write_line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                let _ = self.term.write_line("Warnings:");
            }
            for warning in &report.warnings {
                let _ = self.term.write_line(&format!("  - {warning}"));
            }
        }

        Ok(())
    }

    fn format_move_result(&self, from: &Path, to: &Path) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.write_done(&format!("Moved {} to {}", from.display(), to.display()));
        Ok(())
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}
