//! Run reports.
//!
//! A [`RunReport`] records what happened to every input file and to the
//! archive. The CLI prints a summary from it and, with `--report`, writes it
//! as JSON.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::output::ArchiveSummary;
use crate::parsers::{ExtractIssue, ExtractStats};

/// Outcome of one input file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub stats: ExtractStats,
    /// Lines contributed to the chat log.
    pub lines: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ExtractIssue>,
}

/// Outcome of a whole conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    pub archive: ArchiveSummary,
}

impl RunReport {
    /// Counters summed over all files.
    pub fn totals(&self) -> ExtractStats {
        let mut totals = ExtractStats::default();
        for file in &self.files {
            totals.absorb(&file.stats);
        }
        totals
    }

    /// Total chat log lines.
    pub fn lines(&self) -> usize {
        self.files.iter().map(|f| f.lines).sum()
    }

    /// Number of issues across all files.
    pub fn issue_count(&self) -> usize {
        self.files.iter().map(|f| f.issues.len()).sum()
    }

    /// Serializes the report as pretty-printed JSON.
    #[cfg(feature = "json-report")]
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the report as JSON to `path`.
    #[cfg(feature = "json-report")]
    pub fn write_json(&self, path: &std::path::Path) -> crate::Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
