// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page placement: uniform scale plus centering offset for one document page
// on one sheet of paper.

use spoolwerk_core::error::{Result, SpoolwerkError};

/// Points per inch.
const POINTS_PER_INCH: f64 = 72.0;

/// Paper geometry as reported by an open device context, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaperGeometry {
    pub paper_width_px: i32,
    pub paper_height_px: i32,
    pub printable_width_px: i32,
    pub printable_height_px: i32,
    pub dpi_x: i32,
    pub dpi_y: i32,
}

/// Where and how large to draw a page, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTransform {
    pub scale: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

fn to_points(pixels: i32, dpi: i32) -> f64 {
    f64::from(pixels) * POINTS_PER_INCH / f64::from(dpi)
}

/// Fit a `doc_width` x `doc_height` point page onto `paper`.
///
/// The scale is uniform and targets the printable area when `fit_to_page`
/// is set, the full sheet otherwise. Content is always centered on the full
/// sheet.
pub fn page_transform(
    doc_width: f64,
    doc_height: f64,
    paper: &PaperGeometry,
    fit_to_page: bool,
) -> Result<PageTransform> {
    if paper.dpi_x <= 0 || paper.dpi_y <= 0 {
        return Err(SpoolwerkError::Render(format!(
            "device reports non-positive resolution {}x{}",
            paper.dpi_x, paper.dpi_y
        )));
    }
    if !(doc_width > 0.0 && doc_height > 0.0) {
        return Err(SpoolwerkError::Render(format!(
            "page has no area ({doc_width}x{doc_height} pt)"
        )));
    }

    let paper_w = to_points(paper.paper_width_px, paper.dpi_x);
    let paper_h = to_points(paper.paper_height_px, paper.dpi_y);

    let (target_w, target_h) = if fit_to_page {
        (
            to_points(paper.printable_width_px, paper.dpi_x),
            to_points(paper.printable_height_px, paper.dpi_y),
        )
    } else {
        (paper_w, paper_h)
    };

    let scale = (target_w / doc_width).min(target_h / doc_height);

    Ok(PageTransform {
        scale,
        x_offset: (paper_w - doc_width * scale) / 2.0,
        y_offset: (paper_h - doc_height * scale) / 2.0,
    })
}
