// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// spoolwerk-document: PDF inspection ahead of printing.
//
// Opens a document with `lopdf` and reports what the print path needs to
// know up front: that the file parses, how many pages it has, and each
// page's size in points. Unusable input is rejected here, before any
// spooler resource is touched.

pub mod pdf;

pub use pdf::preflight::{DocumentSummary, preflight};
pub use pdf::reader::{PageSize, PdfReader};
