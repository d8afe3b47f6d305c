// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use spoolwerk_core::types::{
    ColorTicketItem, ColorType, CollateTicketItem, CopiesTicketItem, DuplexTicketItem,
    DuplexType, FitToPageTicketItem, FitToPageType, JobTicket, MediaSizeTicketItem,
    PageOrientationTicketItem, PageOrientationType,
};

/// Spoolwerk - print PDFs through the local print spooler
#[derive(Parser, Debug)]
#[command(name = "spoolwerk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect printers known to the spooler
    Printer {
        #[command(subcommand)]
        command: PrinterCommand,
    },
    /// Submit and track print jobs
    Job {
        #[command(subcommand)]
        command: JobCommand,
    },
    /// Show the effective configuration
    Config {
        /// Save it to config.json in the data directory
        #[arg(long)]
        write: bool,
    },
    /// Print version information
    Version,
}

#[derive(Subcommand, Debug)]
pub enum PrinterCommand {
    /// List printers with their state
    Ls,
    /// Show one printer's capabilities and state
    Inspect { name: String },
}

#[derive(Subcommand, Debug)]
pub enum JobCommand {
    /// Print a PDF
    Add(AddJob),
    /// Show the current state of a job
    Status { printer: String, job_id: u32 },
    /// List the jobs queued on a printer
    Ls { printer: String },
    /// Release a job the spooler is retaining
    Release { printer: String, job_id: u32 },
}

#[derive(Args, Debug)]
pub struct AddJob {
    /// Target printer name
    #[arg(short, long)]
    pub printer: String,

    /// PDF file to print
    #[arg(short, long, value_name = "FILE")]
    pub file: PathBuf,

    /// Job title shown in the spooler (generated when omitted)
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, value_parser = clap::value_parser!(i32).range(1..))]
    pub copies: Option<i32>,

    #[arg(long, value_enum)]
    pub color: Option<ColorArg>,

    #[arg(long, value_enum)]
    pub duplex: Option<DuplexArg>,

    #[arg(long, value_enum)]
    pub orientation: Option<OrientationArg>,

    /// Scale pages to the printable area
    #[arg(long)]
    pub fit_to_page: bool,

    /// Native paper code, as listed by `printer inspect`
    #[arg(long, value_name = "ID")]
    pub media_vendor_id: Option<String>,

    #[arg(long, value_name = "BOOL")]
    pub collate: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
    Color,
    Monochrome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DuplexArg {
    #[value(name = "none")]
    Simplex,
    LongEdge,
    ShortEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrientationArg {
    Portrait,
    Landscape,
}

impl AddJob {
    /// Ticket holding only the options given on the command line.
    pub fn ticket(&self) -> JobTicket {
        JobTicket {
            color: self.color.map(|c| ColorTicketItem {
                vendor_id: String::new(),
                kind: Some(match c {
                    ColorArg::Color => ColorType::StandardColor,
                    ColorArg::Monochrome => ColorType::StandardMonochrome,
                }),
            }),
            duplex: self.duplex.map(|d| DuplexTicketItem {
                kind: match d {
                    DuplexArg::Simplex => DuplexType::NoDuplex,
                    DuplexArg::LongEdge => DuplexType::LongEdge,
                    DuplexArg::ShortEdge => DuplexType::ShortEdge,
                },
            }),
            page_orientation: self.orientation.map(|o| PageOrientationTicketItem {
                kind: match o {
                    OrientationArg::Portrait => PageOrientationType::Portrait,
                    OrientationArg::Landscape => PageOrientationType::Landscape,
                },
            }),
            copies: self.copies.map(|copies| CopiesTicketItem { copies }),
            fit_to_page: self.fit_to_page.then_some(FitToPageTicketItem {
                kind: FitToPageType::FitToPage,
            }),
            media_size: self.media_vendor_id.clone().map(|vendor_id| MediaSizeTicketItem {
                vendor_id,
                ..Default::default()
            }),
            collate: self.collate.map(|collate| CollateTicketItem { collate }),
        }
    }
}
