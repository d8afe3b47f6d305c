// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader: open a document with `lopdf` and read its page geometry.

use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};
use serde::Serialize;
use spoolwerk_core::error::{Result, SpoolwerkError};
use tracing::{debug, instrument};

/// `/MediaBox`, `/Rotate` and friends may sit on any ancestor in the page
/// tree. Deeper chains are treated as malformed.
const MAX_PAGE_TREE_DEPTH: usize = 32;

/// Size of one page as it will be placed on paper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    /// Width in points, after applying `/Rotate`.
    pub width: f64,
    /// Height in points, after applying `/Rotate`.
    pub height: f64,
    /// Page rotation in degrees, normalised to 0, 90, 180 or 270.
    pub rotation: i64,
}

/// Read-only view of a parsed PDF.
pub struct PdfReader {
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        let document = Document::load(path_ref).map_err(|err| {
            SpoolwerkError::Document(format!("failed to open {}: {err}", path_ref.display()))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Parse a PDF already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            SpoolwerkError::Document(format!("failed to load PDF from memory: {err}"))
        })?;

        Ok(Self {
            document,
            source_path: None,
        })
    }

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Size of every page in page order.
    pub fn page_sizes(&self) -> Result<Vec<PageSize>> {
        self.document
            .get_pages()
            .into_iter()
            .map(|(number, id)| self.page_size(number, id))
            .collect()
    }

    fn page_size(&self, number: u32, id: ObjectId) -> Result<PageSize> {
        let media_box = self
            .inherited(id, b"MediaBox")?
            .ok_or_else(|| SpoolwerkError::Document(format!("page {number} has no /MediaBox")))?;
        let (width, height) = rect_size(&self.document, media_box).ok_or_else(|| {
            SpoolwerkError::Document(format!("page {number} has a malformed /MediaBox"))
        })?;
        if width <= 0.0 || height <= 0.0 {
            return Err(SpoolwerkError::Document(format!(
                "page {number} has an empty /MediaBox"
            )));
        }

        let rotation = self
            .inherited(id, b"Rotate")?
            .and_then(|o| number_value(&self.document, o))
            .map_or(0, |deg| (deg as i64).rem_euclid(360) / 90 * 90);

        let (width, height) = if rotation % 180 == 90 {
            (height, width)
        } else {
            (width, height)
        };
        Ok(PageSize {
            width,
            height,
            rotation,
        })
    }

    /// Look `key` up on the page, then on each `/Parent` in turn.
    fn inherited(&self, page: ObjectId, key: &[u8]) -> Result<Option<&Object>> {
        let mut node = self.dictionary(page)?;
        for _ in 0..MAX_PAGE_TREE_DEPTH {
            if let Ok(value) = node.get(key) {
                return Ok(Some(value));
            }
            match node.get(b"Parent") {
                Ok(Object::Reference(parent)) => node = self.dictionary(*parent)?,
                _ => return Ok(None),
            }
        }
        Err(SpoolwerkError::Document(
            "page tree is too deep or cyclic".to_string(),
        ))
    }

    fn dictionary(&self, id: ObjectId) -> Result<&Dictionary> {
        self.document
            .get_object(id)
            .and_then(Object::as_dict)
            .map_err(|err| SpoolwerkError::Document(format!("object {id:?}: {err}")))
    }
}

/// Follow one level of indirection.
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn number_value(doc: &Document, object: &Object) -> Option<f64> {
    match resolve(doc, object)? {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

/// Width and height of a `[llx lly urx ury]` rectangle.
fn rect_size(doc: &Document, object: &Object) -> Option<(f64, f64)> {
    let Object::Array(values) = resolve(doc, object)? else {
        return None;
    };
    if values.len() != 4 {
        return None;
    }
    let mut n = [0.0; 4];
    for (slot, value) in n.iter_mut().zip(values) {
        *slot = number_value(doc, value)?;
    }
    Some(((n[2] - n[0]).abs(), (n[3] - n[1]).abs()))
}
