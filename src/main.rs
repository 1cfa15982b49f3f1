//! # xhrpack CLI
//!
//! Command-line interface for the xhrpack library.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use xhrpack::XhrpackError;
use xhrpack::cli::{Args, Command, ExtractArgs, ReportArgs};
use xhrpack::config::ExtractConfig;
use xhrpack::report::{ReportConfig, ReportFormat, write_report};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = <Args as ClapParser>::parse();
    let result = match &args.command {
        Command::Extract(extract) => run_extract(extract),
        Command::Report(report) => run_report(report),
    };

    match result {
        Ok(()) => {}
        // A stage without input prints a hint and ends normally.
        Err(XhrpackError::MissingInput { path }) => {
            println!("❌ Input not found: {}", path.display());
            if matches!(args.command, Command::Report(_)) {
                println!("💡 Run `xhrpack extract` first.");
            }
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

fn run_extract(args: &ExtractArgs) -> Result<(), XhrpackError> {
    let start = Instant::now();
    let config = ExtractConfig::from(args);

    println!("📦 xhrpack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", config.input.display());
    println!("🖼️  Images:  {}", config.image_dir.display());
    println!();

    println!("⏳ Extracting messages...");
    let report = xhrpack::core::run(&config)?;
    let stats = report.stats;

    println!();
    println!("✅ Done! {} records written", report.record_count());
    println!("   JSON: {}", report.json_output.display());
    if let Some(csv) = &report.csv_output {
        println!("   CSV:  {}", csv.display());
    }

    println!();
    println!("📊 Summary:");
    println!("   Items:      {}", stats.items_seen);
    println!("   Records:    {}", stats.records);
    if stats.dropped > 0 {
        println!("   Dropped:    {} (undecodable payload)", stats.dropped);
    }
    if stats.recovered > 0 {
        println!("   Recovered:  {} (trailing data trimmed)", stats.recovered);
    }
    println!(
        "   Images:     {} found, {} cached, {} downloaded, {} failed ({:.1}% local)",
        stats.urls,
        stats.images_cached,
        stats.images_downloaded,
        stats.images_failed,
        stats.image_coverage()
    );

    println!();
    println!("⚡ Total time: {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn run_report(args: &ReportArgs) -> Result<(), XhrpackError> {
    let format: ReportFormat = match (args.format, &args.output) {
        (Some(format), _) => format.into(),
        (None, Some(output)) => ReportFormat::from_path(output)?,
        (None, None) => ReportFormat::default(),
    };
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format.default_output()));

    let mut config = ReportConfig::new().with_title(&args.title);
    if let Some(base) = &args.base_dir {
        config = config.with_base_dir(base);
    }

    println!("📄 Rendering {} report...", format);
    let count = write_report(&args.input, &output, format, &config)?;
    println!("✅ {} records rendered to {}", count, output.display());
    Ok(())
}
