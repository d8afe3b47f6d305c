// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Spoolwerk.

use thiserror::Error;

/// Top-level error type for all Spoolwerk operations.
///
/// Native causes are carried as opaque strings. Callers act on the
/// normalized printer and job states, never on raw native codes.
#[derive(Debug, Error)]
pub enum SpoolwerkError {
    // -- Native spooler --
    #[error("spooler call failed: {0}")]
    Spooler(String),

    #[error("capability query for {printer} failed: {cause}")]
    CapabilityQuery { printer: String, cause: String },

    #[error("job {0} no longer exists")]
    JobNotFound(u32),

    #[error("printer not found: {0}")]
    PrinterNotFound(String),

    // -- Submission --
    #[error("invalid job ticket: {0}")]
    InvalidTicket(String),

    #[error("admission control closed for printer")]
    AdmissionClosed,

    // -- Document / rendering --
    #[error("document error: {0}")]
    Document(String),

    #[error("render error: {0}")]
    Render(String),

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform --
    #[error("native spooler not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SpoolwerkError>;
