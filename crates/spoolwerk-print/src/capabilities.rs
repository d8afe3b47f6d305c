// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printer description from native capability queries.
//
// A capability group is advertised only when the driver exposes the
// matching device-setting field and the device reports support for it.
// The printer's default settings mark the default option of each group.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use spoolwerk_bridge::native::{DeviceCapability, PrinterInfo, dm};
use spoolwerk_bridge::traits::Spooler;
use spoolwerk_core::error::{Result, SpoolwerkError};
use spoolwerk_core::semaphore::NativeJobSemaphore;
use spoolwerk_core::types::{
    CollateCapability, ColorCapability, ColorOption, ColorType, CopiesCapability, Description,
    DuplexCapability, DuplexOption, DuplexType, LocalizedString, MEDIA_SIZE_CUSTOM,
    MediaSizeCapability, MediaSizeOption, PageOrientationCapability, PageOrientationOption,
    PageOrientationType, Printer,
};

use crate::status;

const FALLBACK_MANUFACTURER: &str = "Generic";
const FALLBACK_MODEL: &str = "Printer";

/// Split a driver name like `"HP LaserJet 400 M401"` on its first space.
pub fn manufacturer_and_model(driver: &str) -> (String, String) {
    let (man, model) = driver.trim().split_once(' ').unwrap_or((driver.trim(), ""));
    let pick = |s: &str, fallback: &str| {
        let s = s.trim();
        let chosen = if s.is_empty() { fallback } else { s };
        chosen.to_string()
    };
    (pick(man, FALLBACK_MANUFACTURER), pick(model, FALLBACK_MODEL))
}

/// Capability queries bound to one printer, with errors tagged by printer.
struct Queries<'a> {
    spooler: &'a dyn Spooler,
    printer: &'a str,
    port: &'a str,
}

impl Queries<'_> {
    fn tag(&self, kind: DeviceCapability, e: SpoolwerkError) -> SpoolwerkError {
        SpoolwerkError::CapabilityQuery {
            printer: self.printer.to_string(),
            cause: format!("{kind:?}: {e}"),
        }
    }

    fn int(&self, kind: DeviceCapability) -> Result<i32> {
        self.spooler
            .capability_i32(self.printer, self.port, kind)
            .map_err(|e| self.tag(kind, e))
    }

    fn strings(&self, kind: DeviceCapability) -> Result<Vec<String>> {
        self.spooler
            .capability_strings(self.printer, self.port, kind)
            .map_err(|e| self.tag(kind, e))
    }

    fn codes(&self, kind: DeviceCapability) -> Result<Vec<u16>> {
        self.spooler
            .capability_u16s(self.printer, self.port, kind)
            .map_err(|e| self.tag(kind, e))
    }

    fn pairs(&self, kind: DeviceCapability) -> Result<Vec<(i32, i32)>> {
        self.spooler
            .capability_i32_pairs(self.printer, self.port, kind)
            .map_err(|e| self.tag(kind, e))
    }
}

/// Build the normalized `Printer` for one enumeration record.
///
/// Any failing capability query fails the whole printer.
#[instrument(skip_all, fields(printer = %info.name))]
pub fn describe_printer(
    spooler: &dyn Spooler,
    info: &PrinterInfo,
    queue_size: usize,
) -> Result<Printer> {
    let q = Queries {
        spooler,
        printer: &info.name,
        port: &info.port,
    };
    let (manufacturer, model) = manufacturer_and_model(&info.driver);

    let description = Description {
        color: color_capability(&q, info.dev_mode.color)?,
        duplex: duplex_capability(&q, info.dev_mode.duplex)?,
        page_orientation: orientation_capability(&q, info.dev_mode.orientation)?,
        copies: copies_capability(&q, info.dev_mode.copies)?,
        media_size: media_size_capability(&q, info)?,
        collate: collate_capability(&q, info.dev_mode.collate)?,
        ..Description::base()
    };

    let mut tags = BTreeMap::new();
    tags.insert("printer-location".to_string(), info.location.clone());
    tags.insert("printer-port".to_string(), info.port.clone());
    tags.insert("printer-driver".to_string(), info.driver.clone());

    debug!(
        color = description.color.is_some(),
        duplex = description.duplex.is_some(),
        media_sizes = description.media_size.as_ref().map_or(0, |m| m.options.len()),
        "described printer"
    );

    Ok(Printer {
        name: info.name.clone(),
        default_display_name: info.name.clone(),
        manufacturer,
        model,
        state: status::printer_state(info.status, info.attributes),
        description,
        tags,
        native_job_semaphore: NativeJobSemaphore::new(queue_size),
    })
}

fn color_capability(q: &Queries<'_>, active: Option<i16>) -> Result<Option<ColorCapability>> {
    if q.int(DeviceCapability::ColorDevice)? != 1 {
        return Ok(None);
    }
    let mono_default = active == Some(dm::COLOR_MONOCHROME);
    Ok(Some(ColorCapability {
        options: vec![
            ColorOption {
                vendor_id: dm::COLOR_COLOR.to_string(),
                kind: ColorType::StandardColor,
                is_default: !mono_default,
                display_name: LocalizedString::new("Color"),
            },
            ColorOption {
                vendor_id: dm::COLOR_MONOCHROME.to_string(),
                kind: ColorType::StandardMonochrome,
                is_default: mono_default,
                display_name: LocalizedString::new("Monochrome"),
            },
        ],
    }))
}

fn duplex_capability(q: &Queries<'_>, active: Option<i16>) -> Result<Option<DuplexCapability>> {
    let Some(active) = active else {
        return Ok(None);
    };
    if q.int(DeviceCapability::Duplex)? != 1 {
        return Ok(None);
    }
    let option = |kind, code| DuplexOption {
        kind,
        is_default: active == code,
    };
    Ok(Some(DuplexCapability {
        options: vec![
            option(DuplexType::NoDuplex, dm::DUPLEX_SIMPLEX),
            option(DuplexType::LongEdge, dm::DUPLEX_VERTICAL),
            option(DuplexType::ShortEdge, dm::DUPLEX_HORIZONTAL),
        ],
    }))
}

fn orientation_capability(
    q: &Queries<'_>,
    active: Option<i16>,
) -> Result<Option<PageOrientationCapability>> {
    let Some(active) = active else {
        return Ok(None);
    };
    if !matches!(q.int(DeviceCapability::Orientation)?, 90 | 270) {
        return Ok(None);
    }
    Ok(Some(PageOrientationCapability {
        options: vec![
            PageOrientationOption {
                kind: PageOrientationType::Portrait,
                is_default: active == dm::ORIENT_PORTRAIT,
            },
            PageOrientationOption {
                kind: PageOrientationType::Landscape,
                is_default: active == dm::ORIENT_LANDSCAPE,
            },
        ],
    }))
}

fn copies_capability(q: &Queries<'_>, active: Option<i16>) -> Result<Option<CopiesCapability>> {
    let Some(active) = active else {
        return Ok(None);
    };
    let max = q.int(DeviceCapability::Copies)?;
    if max <= 1 {
        return Ok(None);
    }
    Ok(Some(CopiesCapability {
        default: i32::from(active).max(1),
        max,
    }))
}

fn collate_capability(q: &Queries<'_>, active: Option<i16>) -> Result<Option<CollateCapability>> {
    let Some(active) = active else {
        return Ok(None);
    };
    if q.int(DeviceCapability::Collate)? != 1 {
        return Ok(None);
    }
    Ok(Some(CollateCapability {
        default: active == dm::COLLATE_TRUE,
    }))
}

/// Media sizes from three index-aligned queries: names, paper codes, and
/// sizes in tenths of a millimetre.
fn media_size_capability(
    q: &Queries<'_>,
    info: &PrinterInfo,
) -> Result<Option<MediaSizeCapability>> {
    let names = q.strings(DeviceCapability::PaperNames)?;
    let codes = q.codes(DeviceCapability::Papers)?;
    let sizes = q.pairs(DeviceCapability::PaperSize)?;

    if names.len() != codes.len() || names.len() != sizes.len() {
        debug!(
            names = names.len(),
            codes = codes.len(),
            sizes = sizes.len(),
            "paper lists disagree, advertising no media sizes"
        );
        return Ok(None);
    }

    let dev_mode = &info.dev_mode;
    let is_device_default = |code: u16, (width, length): (i32, i32)| match dev_mode.paper_size() {
        Some(active) => i32::from(active) == i32::from(code),
        None => {
            dev_mode.paper_width().map(i32::from) == Some(width)
                && dev_mode.paper_length().map(i32::from) == Some(length)
        }
    };

    let mut options = Vec::with_capacity(names.len());
    let mut found_default = false;
    for ((name, code), size) in names.iter().zip(&codes).zip(&sizes) {
        if name.is_empty() {
            continue;
        }
        let is_default = !found_default && is_device_default(*code, *size);
        found_default |= is_default;
        options.push(MediaSizeOption {
            name: MEDIA_SIZE_CUSTOM.to_string(),
            width_microns: size.0.saturating_mul(100),
            height_microns: size.1.saturating_mul(100),
            is_default,
            vendor_id: code.to_string(),
            display_name: LocalizedString::new(name.as_str()),
        });
    }

    if options.is_empty() {
        return Ok(None);
    }
    if !found_default {
        options[0].is_default = true;
    }
    Ok(Some(MediaSizeCapability { options }))
}
