// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job ticket → device settings.
//
// Resolution is split from application: `resolve` validates the ticket
// against the printer's advertised description without touching any native
// resource, so a malformed ticket fails before a job exists. The returned
// `ResolvedSettings` is later applied onto the device's own `DevMode`.

use tracing::debug;

use spoolwerk_bridge::native::{DevMode, PaperSelection, dm};
use spoolwerk_core::error::{Result, SpoolwerkError};
use spoolwerk_core::types::{
    ColorType, Description, DuplexType, FitToPageType, JobTicket, PageOrientationType,
};

/// Device-setting overrides derived from one ticket.
///
/// `None` leaves the device's current value alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedSettings {
    pub color: Option<i16>,
    pub duplex: Option<i16>,
    pub orientation: Option<i16>,
    pub copies: Option<i16>,
    pub paper: Option<PaperSelection>,
    pub collate: Option<i16>,
    /// Scale pages to the printable area instead of the full sheet.
    pub fit_to_page: bool,
}

impl ResolvedSettings {
    /// Write the overrides into `dev_mode`.
    ///
    /// A paper override replaces the whole selection, so a code clears any
    /// explicit dimensions and vice versa.
    pub fn apply(&self, dev_mode: &mut DevMode) {
        if let Some(v) = self.color {
            dev_mode.color = Some(v);
        }
        if let Some(v) = self.duplex {
            dev_mode.duplex = Some(v);
        }
        if let Some(v) = self.orientation {
            dev_mode.orientation = Some(v);
        }
        if let Some(v) = self.copies {
            dev_mode.copies = Some(v);
        }
        if let Some(paper) = self.paper {
            dev_mode.paper = Some(paper);
        }
        if let Some(v) = self.collate {
            dev_mode.collate = Some(v);
        }
    }
}

fn color_code(kind: ColorType) -> i16 {
    match kind {
        ColorType::StandardColor => dm::COLOR_COLOR,
        ColorType::StandardMonochrome => dm::COLOR_MONOCHROME,
    }
}

fn duplex_code(kind: DuplexType) -> i16 {
    match kind {
        DuplexType::NoDuplex => dm::DUPLEX_SIMPLEX,
        DuplexType::LongEdge => dm::DUPLEX_VERTICAL,
        DuplexType::ShortEdge => dm::DUPLEX_HORIZONTAL,
    }
}

/// `Auto` has no device code; the driver keeps its own choice.
fn orientation_code(kind: PageOrientationType) -> Option<i16> {
    match kind {
        PageOrientationType::Portrait => Some(dm::ORIENT_PORTRAIT),
        PageOrientationType::Landscape => Some(dm::ORIENT_LANDSCAPE),
        PageOrientationType::Auto => None,
    }
}

fn parse_vendor_id(field: &str, vendor_id: &str) -> Result<i16> {
    vendor_id.trim().parse::<i16>().map_err(|e| {
        SpoolwerkError::InvalidTicket(format!("{field} vendor id {vendor_id:?}: {e}"))
    })
}

/// Micrometres → tenths of a millimetre, clamped to the device field.
fn microns_to_tenth_mm(microns: i32) -> i16 {
    let tenths = microns / 100;
    i16::try_from(tenths).unwrap_or(if tenths < 0 { i16::MIN } else { i16::MAX })
}

/// Resolve `ticket` against `description`.
///
/// Items the description does not advertise are ignored. An unparsable
/// color or media vendor id is an error.
pub fn resolve(ticket: &JobTicket, description: &Description) -> Result<ResolvedSettings> {
    let mut out = ResolvedSettings::default();

    if let (Some(color), Some(_)) = (&ticket.color, &description.color) {
        out.color = match color.kind {
            Some(kind) => Some(color_code(kind)),
            None if !color.vendor_id.is_empty() => {
                Some(parse_vendor_id("color", &color.vendor_id)?)
            }
            None => None,
        };
    }

    if let (Some(duplex), Some(_)) = (&ticket.duplex, &description.duplex) {
        out.duplex = Some(duplex_code(duplex.kind));
    }

    if let (Some(orientation), Some(_)) = (&ticket.page_orientation, &description.page_orientation)
    {
        out.orientation = orientation_code(orientation.kind);
    }

    if let (Some(copies), Some(_)) = (&ticket.copies, &description.copies) {
        if copies.copies > 0 {
            out.copies = Some(i16::try_from(copies.copies).unwrap_or(i16::MAX));
        }
    }

    if let (Some(fit), Some(_)) = (&ticket.fit_to_page, &description.fit_to_page) {
        out.fit_to_page = fit.kind == FitToPageType::FitToPage;
    }

    if let (Some(media), Some(_)) = (&ticket.media_size, &description.media_size) {
        out.paper = Some(if media.vendor_id.is_empty() {
            PaperSelection::Dimensions {
                width: microns_to_tenth_mm(media.width_microns),
                length: microns_to_tenth_mm(media.height_microns),
            }
        } else {
            PaperSelection::Code(parse_vendor_id("media size", &media.vendor_id)?)
        });
    }

    if let (Some(collate), Some(_)) = (&ticket.collate, &description.collate) {
        out.collate = Some(if collate.collate {
            dm::COLLATE_TRUE
        } else {
            dm::COLLATE_FALSE
        });
    }

    debug!(?out, "ticket resolved");
    Ok(out)
}
