//! # chatport CLI
//!
//! Command-line interface for the chatport library.

use std::collections::BTreeMap;
use std::io::{self, IsTerminal};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::FmtSubscriber;

use chatport::ChatportError;
use chatport::batch::{Converter, InputSource};
use chatport::cli::Args;
use chatport::report::RunReport;

fn main() {
    let args = <Args as ClapParser>::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("⚠️  Logging disabled: {}", e);
    }

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ChatportError> {
    let start = Instant::now();
    // clap enforces that exactly one of --file / --dir is present
    let Some(source) = args.source() else {
        return Ok(());
    };
    let converter = Converter::new(args.convert_config());
    let destination = converter.archive_path(&source)?;

    println!("📦 chatport v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    match &source {
        InputSource::File(path) => println!("📄 File:    {}", path.display()),
        InputSource::Directory(dir) => println!("📂 Export:  {}", dir.display()),
    }
    println!("💾 Output:  {}", destination.display());
    println!();

    let report = converter.convert(&source)?;
    let elapsed = start.elapsed();

    println!("✅ Done! Archive saved to {}", report.archive.path.display());
    print_summary(&report);
    println!();
    println!("⚡ Total time: {:.2}s", elapsed.as_secs_f64());

    #[cfg(feature = "json-report")]
    if let Some(path) = &args.report {
        report.write_json(path)?;
        println!("📝 Report written to {}", path.display());
    }

    Ok(())
}

fn print_summary(report: &RunReport) {
    let totals = report.totals();

    println!();
    println!("📊 Summary:");
    println!("   Files:       {}", report.files.len());
    println!("   Messages:    {} of {}", totals.retained, totals.elements);
    if totals.dropped > 0 {
        println!("   Dropped:     {}", totals.dropped);
    }
    println!("   Chat lines:  {}", report.lines());
    println!("   Media:       {} packed", report.archive.media_written);
    if !report.archive.media_missing.is_empty() {
        println!("   Missing:     {} media files", report.archive.media_missing.len());
    }
    if totals.attachments_dropped > 0 {
        println!("   Skipped:     {} attachments", totals.attachments_dropped);
    }

    let mut issues: BTreeMap<&str, usize> = BTreeMap::new();
    for issue in report.files.iter().flat_map(|f| &f.issues) {
        *issues.entry(issue.kind.label()).or_default() += 1;
    }
    if !issues.is_empty() {
        println!();
        println!("⚠️  Issues:");
        for (label, count) in issues {
            println!("   {:<24} {}", label, count);
        }
    }
}
