//! `sheetease` command-line exporter.
//!
//! Exit codes: 0 when every sheet exported cleanly, 1 when diagnostics were
//! reported, 2 on a fatal error (bad config, unreadable input, unwritable
//! output).

mod args;

use args::{Cli, Command};
use clap::Parser;
use sheetease::{ExportReport, Exporter, export::sorted_diagnostics};
use std::{error::Error, process::ExitCode};
use tracing_subscriber::EnvFilter;

const EXIT_DIAGNOSTICS: u8 = 1;
const EXIT_FATAL: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli.command) {
        Ok(report) if report.has_diagnostics() => ExitCode::from(EXIT_DIAGNOSTICS),
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn run(command: &Command) -> Result<ExportReport, Box<dyn Error>> {
    match command {
        Command::Export(args) => {
            let report = Exporter::new(args.config()?)?.run()?;
            print_diagnostics(&report);

            let verb = if report.dry_run { "would write" } else { "wrote" };
            println!(
                "exported {} table(s) from {} workbook(s): {verb} {}, {} unchanged, {} pruned",
                report.tables.len(),
                report.workbooks,
                report.written.len(),
                report.unchanged.len(),
                report.pruned.len(),
            );

            Ok(report)
        }

        Command::Check(args) => {
            let report = Exporter::new(args.config()?)?.check()?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_diagnostics(&report);
                println!(
                    "checked {} table(s) from {} workbook(s): {} diagnostic(s)",
                    report.tables.len(),
                    report.workbooks,
                    report.diagnostics.len(),
                );
            }

            Ok(report)
        }
    }
}

fn print_diagnostics(report: &ExportReport) {
    for path in &report.skipped_inputs {
        println!("skipped {}", path.display());
    }
    for diagnostic in sorted_diagnostics(&report.diagnostics) {
        println!("{diagnostic}");
    }
}
