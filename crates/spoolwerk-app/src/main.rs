// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spoolwerk: print PDFs through the local print spooler.
//
// Entry point. Loads config, initialises logging on stderr, and dispatches
// one command against the platform's native backend.

mod cli;
mod data_dir;
mod output;

use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use spoolwerk_bridge::platform_backend;
use spoolwerk_core::config::OutputFormat;
use spoolwerk_core::error::Result;
use spoolwerk_core::types::JobState;
use spoolwerk_core::AppConfig;
use spoolwerk_document::preflight;
use spoolwerk_print::SpoolService;

use cli::{AddJob, Cli, Command, JobCommand, PrinterCommand};
use output::JobRow;

#[derive(Serialize)]
struct Submitted<'a> {
    printer: &'a str,
    job_id: u32,
    title: &'a str,
    pages: usize,
}

#[derive(Serialize)]
struct StatusReport<'a> {
    printer: &'a str,
    job_id: u32,
    state: JobState,
}

#[derive(Serialize)]
struct Released<'a> {
    printer: &'a str,
    job_id: u32,
    released: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let dir = data_dir::data_dir();
    let config = AppConfig::load(&dir).unwrap_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.output
    };

    match cli.command {
        Command::Version => {
            println!("spoolwerk {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Config { write } => {
            if write {
                let dir = data_dir::ensure_data_dir()?;
                config.persist(&dir)?;
                info!(path = %dir.display(), "config written");
            }
            println!("{}", output::json(&config)?);
            Ok(())
        }
        Command::Printer { command } => {
            let service = SpoolService::new(platform_backend(), config.native_job_queue_size);
            match command {
                PrinterCommand::Ls => {
                    let printers = service.list_printers()?;
                    emit(format, &printers, || output::printers_table(&printers))
                }
                PrinterCommand::Inspect { name } => {
                    let printer = service.printer(&name)?;
                    emit(format, &printer, || output::printer_detail(&printer))
                }
            }
        }
        Command::Job { command } => {
            let service = SpoolService::new(platform_backend(), config.native_job_queue_size);
            match command {
                JobCommand::Add(add) => add_job(&service, &config, &add, format).await,
                JobCommand::Status { printer, job_id } => {
                    let state = service.get_job_state(&printer, job_id)?;
                    let report = StatusReport {
                        printer: &printer,
                        job_id,
                        state,
                    };
                    emit(format, &report, || {
                        format!("job {job_id} on {printer}: {}\n", output::job_state(&state))
                    })
                }
                JobCommand::Ls { printer } => {
                    let jobs = service.job_list(&printer)?;
                    let rows: Vec<JobRow<'_>> = jobs.iter().map(JobRow::new).collect();
                    emit(format, &rows, || output::jobs_table(&rows))
                }
                JobCommand::Release { printer, job_id } => {
                    let released = service.release_job(&printer, job_id)?;
                    let report = Released {
                        printer: &printer,
                        job_id,
                        released,
                    };
                    emit(format, &report, || {
                        if released {
                            format!("released job {job_id} on {printer}\n")
                        } else {
                            format!("job {job_id} on {printer} was not retained\n")
                        }
                    })
                }
            }
        }
    }
}

async fn add_job(
    service: &SpoolService,
    config: &AppConfig,
    add: &AddJob,
    format: OutputFormat,
) -> Result<()> {
    let summary = preflight(&add.file)?;
    let printer = service.printer(&add.printer)?;
    let title = add.title.clone().unwrap_or_else(|| config.job_title());

    let job_id = service
        .print(&printer, &add.file, &title, &add.ticket())
        .await?;
    info!(printer = %printer.name, job_id, pages = summary.page_count, "job submitted");

    let report = Submitted {
        printer: &printer.name,
        job_id,
        title: &title,
        pages: summary.page_count,
    };
    emit(format, &report, || {
        format!(
            "submitted job {job_id} to {} ({} pages)\n",
            printer.name, summary.page_count
        )
    })
}

fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    table: impl FnOnce() -> String,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", output::json(value)?),
        OutputFormat::Table => print!("{}", table()),
    }
    Ok(())
}
