//! Command-line interface definition using clap.
//!
//! [`Args`] is the argument structure parsed by the `chatport` binary. It
//! turns into a [`ConvertConfig`] and an [`InputSource`] so the library can
//! be driven the same way from code.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::batch::InputSource;
use crate::config::{ConvertConfig, DiagnosticsConfig};

/// Convert a Telegram HTML chat export into a WhatsApp-style chat archive.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatport")]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "dir"])))]
#[command(after_help = "EXAMPLES:
    chatport -d ChatExport_2023-02-01
    chatport -f ChatExport_2023-02-01/messages.html
    chatport -d ChatExport_2023-02-01 -o archives --chat-name Alice
    chatport -d ChatExport_2023-02-01 --report report.json -v")]
pub struct Args {
    /// Convert a single exported HTML page
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Convert every *.html page of an export directory
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Directory for the archive (default: parent of the export directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Chat name used in the archive file name
    #[arg(long, value_name = "NAME")]
    pub chat_name: Option<String>,

    /// Write a JSON run report to this path
    #[cfg(feature = "json-report")]
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Leave HTML fragments out of structural error logs
    #[arg(long)]
    pub no_fragments: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// The input selected with `--file` or `--dir`.
    pub fn source(&self) -> Option<InputSource> {
        match (&self.file, &self.dir) {
            (Some(file), _) => Some(InputSource::File(file.clone())),
            (None, Some(dir)) => Some(InputSource::Directory(dir.clone())),
            (None, None) => None,
        }
    }

    /// Builds the conversion configuration from the flags.
    pub fn convert_config(&self) -> ConvertConfig {
        let mut config = ConvertConfig::new()
            .with_diagnostics(DiagnosticsConfig::new().with_dump_fragments(!self.no_fragments));
        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir);
        }
        if let Some(name) = &self.chat_name {
            config = config.with_chat_name(name);
        }
        config
    }

    /// Log level selected by `-q` / `-v`.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::WARN;
        }
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
