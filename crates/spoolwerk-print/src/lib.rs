// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spoolwerk Print: the print-job engine. Translates native capability and
// status data into the normalized model, resolves job tickets into device
// settings, places pages, and drives the native job lifecycle under
// per-printer admission control.

pub mod capabilities;
pub mod job;
pub mod registry;
pub mod scaling;
pub mod service;
pub mod status;
pub mod ticket;

#[cfg(test)]
mod fake;

pub use job::JobPhase;
pub use registry::PrinterRegistry;
pub use service::SpoolService;
pub use ticket::ResolvedSettings;
