// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Submission preflight: reject input the print path cannot use before a
// native job is created for it.

use std::path::Path;

use serde::Serialize;
use spoolwerk_core::error::{Result, SpoolwerkError};
use tracing::{info, instrument};

use super::reader::{PageSize, PdfReader};

/// What the preflight learned about a printable document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub path: String,
    pub page_count: usize,
    pub pages: Vec<PageSize>,
}

/// Check that `path` is a readable PDF with at least one measurable page.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn preflight(path: impl AsRef<Path>) -> Result<DocumentSummary> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(SpoolwerkError::Document(format!(
            "{} is not a readable file",
            path.display()
        )));
    }

    let reader = PdfReader::open(path)?;
    let page_count = reader.page_count();
    if page_count == 0 {
        return Err(SpoolwerkError::Document(format!(
            "{} has no pages",
            path.display()
        )));
    }
    let pages = reader.page_sizes()?;

    info!(page_count, "document passed preflight");
    Ok(DocumentSummary {
        path: path.display().to_string(),
        page_count,
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::reader::tests::sample_pdf;

    #[test]
    fn accepts_a_valid_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("letter.pdf");
        std::fs::write(&path, sample_pdf(&[(612, 792, 0), (612, 792, 90)])).unwrap();

        let summary = preflight(&path).unwrap();
        assert_eq!(summary.page_count, 2);
        assert_eq!(summary.pages[1].width, 792.0);
        assert!(summary.path.ends_with("letter.pdf"));
    }

    #[test]
    fn rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = preflight(dir.path().join("nope.pdf")).unwrap_err();
        assert!(matches!(err, SpoolwerkError::Document(_)));
    }

    #[test]
    fn rejects_directories_and_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        assert!(preflight(dir.path()).is_err());

        let text = dir.path().join("notes.txt");
        std::fs::write(&text, "hello").unwrap();
        assert!(matches!(
            preflight(&text),
            Err(SpoolwerkError::Document(_))
        ));
    }

    #[test]
    fn rejects_zero_page_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pdf");
        std::fs::write(&path, sample_pdf(&[])).unwrap();
        assert!(matches!(
            preflight(&path),
            Err(SpoolwerkError::Document(_))
        ));
    }
}
