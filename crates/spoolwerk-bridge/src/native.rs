// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native spooler vocabulary: status bitfields, device-setting codes,
// capability kinds, and the records the spooler hands back.
//
// Values match the Windows spooler (winspool.h / wingdi.h) so a real
// backend can pass them through untouched.

use chrono::{DateTime, Utc};

/// Printer status bits (`PRINTER_INFO_2::Status`).
pub mod printer_status {
    pub const PAUSED: u32 = 0x0000_0001;
    pub const ERROR: u32 = 0x0000_0002;
    pub const PENDING_DELETION: u32 = 0x0000_0004;
    pub const PAPER_JAM: u32 = 0x0000_0008;
    pub const PAPER_OUT: u32 = 0x0000_0010;
    pub const MANUAL_FEED: u32 = 0x0000_0020;
    pub const PAPER_PROBLEM: u32 = 0x0000_0040;
    pub const OFFLINE: u32 = 0x0000_0080;
    pub const IO_ACTIVE: u32 = 0x0000_0100;
    pub const BUSY: u32 = 0x0000_0200;
    pub const PRINTING: u32 = 0x0000_0400;
    pub const OUTPUT_BIN_FULL: u32 = 0x0000_0800;
    pub const NOT_AVAILABLE: u32 = 0x0000_1000;
    pub const WAITING: u32 = 0x0000_2000;
    pub const PROCESSING: u32 = 0x0000_4000;
    pub const INITIALIZING: u32 = 0x0000_8000;
    pub const WARMING_UP: u32 = 0x0001_0000;
    pub const TONER_LOW: u32 = 0x0002_0000;
    pub const NO_TONER: u32 = 0x0004_0000;
    pub const PAGE_PUNT: u32 = 0x0008_0000;
    pub const USER_INTERVENTION: u32 = 0x0010_0000;
    pub const OUT_OF_MEMORY: u32 = 0x0020_0000;
    pub const DOOR_OPEN: u32 = 0x0040_0000;
    pub const SERVER_UNKNOWN: u32 = 0x0080_0000;
    pub const POWER_SAVE: u32 = 0x0100_0000;
}

/// Printer attribute bits (`PRINTER_INFO_2::Attributes`).
pub mod printer_attribute {
    /// The spooler will not despool to the device. Some USB drivers flip
    /// this automatically with the physical connection.
    pub const WORK_OFFLINE: u32 = 0x0000_0400;
}

/// Job status bits (`JOB_INFO_1::Status`).
pub mod job_status {
    pub const PAUSED: u32 = 0x0000_0001;
    pub const ERROR: u32 = 0x0000_0002;
    pub const DELETING: u32 = 0x0000_0004;
    pub const SPOOLING: u32 = 0x0000_0008;
    pub const PRINTING: u32 = 0x0000_0010;
    pub const OFFLINE: u32 = 0x0000_0020;
    pub const PAPEROUT: u32 = 0x0000_0040;
    pub const PRINTED: u32 = 0x0000_0080;
    pub const DELETED: u32 = 0x0000_0100;
    pub const BLOCKED_DEVQ: u32 = 0x0000_0200;
    pub const USER_INTERVENTION: u32 = 0x0000_0400;
    pub const RESTART: u32 = 0x0000_0800;
    pub const COMPLETE: u32 = 0x0000_1000;
    pub const RETAINED: u32 = 0x0000_2000;
    pub const RENDERING_LOCALLY: u32 = 0x0000_4000;
}

/// `DEVMODE` field codes.
pub mod dm {
    pub const COLOR_MONOCHROME: i16 = 1;
    pub const COLOR_COLOR: i16 = 2;

    pub const DUPLEX_SIMPLEX: i16 = 1;
    pub const DUPLEX_VERTICAL: i16 = 2;
    pub const DUPLEX_HORIZONTAL: i16 = 3;

    pub const ORIENT_PORTRAIT: i16 = 1;
    pub const ORIENT_LANDSCAPE: i16 = 2;

    pub const COLLATE_FALSE: i16 = 0;
    pub const COLLATE_TRUE: i16 = 1;
}

/// What a `DeviceCapabilities` query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceCapability {
    /// Paper codes (array of u16).
    Papers,
    /// Paper sizes in tenths of a millimetre (array of width/length pairs).
    PaperSize,
    /// Paper names (array of strings).
    PaperNames,
    /// 1 if the device can print duplex.
    Duplex,
    /// Rotation in degrees between portrait and landscape (0, 90, 270).
    Orientation,
    /// Maximum copies.
    Copies,
    /// 1 if the device can collate.
    Collate,
    /// 1 if the device is a color device.
    ColorDevice,
}

impl DeviceCapability {
    /// `DC_*` constant.
    pub fn code(self) -> u16 {
        match self {
            Self::Papers => 2,
            Self::PaperSize => 3,
            Self::Duplex => 7,
            Self::PaperNames => 16,
            Self::Orientation => 17,
            Self::Copies => 18,
            Self::Collate => 22,
            Self::ColorDevice => 32,
        }
    }
}

/// `GetDeviceCaps` index on an open device context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceCap {
    /// Printable width in pixels.
    HorzRes,
    /// Printable height in pixels.
    VertRes,
    LogPixelsX,
    LogPixelsY,
    PhysicalWidth,
    PhysicalHeight,
    PhysicalOffsetX,
    PhysicalOffsetY,
}

impl DeviceCap {
    pub fn code(self) -> i32 {
        match self {
            Self::HorzRes => 8,
            Self::VertRes => 10,
            Self::LogPixelsX => 88,
            Self::LogPixelsY => 90,
            Self::PhysicalWidth => 110,
            Self::PhysicalHeight => 111,
            Self::PhysicalOffsetX => 112,
            Self::PhysicalOffsetY => 113,
        }
    }
}

/// `SetJob` control commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobCommand {
    Retain,
    Release,
}

impl JobCommand {
    pub fn code(self) -> u32 {
        match self {
            Self::Retain => 8,
            Self::Release => 9,
        }
    }
}

/// Affine world transform (`XFORM`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XForm {
    pub m11: f32,
    pub m12: f32,
    pub m21: f32,
    pub m22: f32,
    pub dx: f32,
    pub dy: f32,
}

impl XForm {
    /// Axis-aligned scale followed by a translation.
    pub fn scale_translate(sx: f32, sy: f32, dx: f32, dy: f32) -> Self {
        Self {
            m11: sx,
            m12: 0.0,
            m21: 0.0,
            m22: sy,
            dx,
            dy,
        }
    }
}

/// How the paper is selected on the device.
///
/// The native structure carries a paper code and explicit dimensions side
/// by side; only one of them may be in effect at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSelection {
    /// Native paper code (`DMPAPER_*`).
    Code(i16),
    /// Explicit size in tenths of a millimetre.
    Dimensions { width: i16, length: i16 },
}

/// Device-specific settings of one printer connection (`DEVMODE`).
///
/// `None` means the driver does not expose that field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DevMode {
    pub device_name: String,
    pub color: Option<i16>,
    pub duplex: Option<i16>,
    pub orientation: Option<i16>,
    pub copies: Option<i16>,
    pub collate: Option<i16>,
    pub paper: Option<PaperSelection>,
}

impl DevMode {
    /// `dmPaperSize`, if the paper is selected by code.
    pub fn paper_size(&self) -> Option<i16> {
        match self.paper {
            Some(PaperSelection::Code(code)) => Some(code),
            _ => None,
        }
    }

    /// `dmPaperLength`, if the paper is selected by dimensions.
    pub fn paper_length(&self) -> Option<i16> {
        match self.paper {
            Some(PaperSelection::Dimensions { length, .. }) => Some(length),
            _ => None,
        }
    }

    /// `dmPaperWidth`, if the paper is selected by dimensions.
    pub fn paper_width(&self) -> Option<i16> {
        match self.paper {
            Some(PaperSelection::Dimensions { width, .. }) => Some(width),
            _ => None,
        }
    }
}

/// One enumerated printer (`PRINTER_INFO_2` subset).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrinterInfo {
    pub name: String,
    pub port: String,
    pub driver: String,
    pub location: String,
    pub attributes: u32,
    pub status: u32,
    /// The printer's current default settings.
    pub dev_mode: DevMode,
}

/// One spooled job (`JOB_INFO_1`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobInfo {
    pub job_id: u32,
    pub printer_name: String,
    pub machine_name: String,
    pub user_name: String,
    pub document: String,
    pub datatype: String,
    pub status: u32,
    pub priority: u32,
    pub position: u32,
    pub total_pages: u32,
    pub pages_printed: u32,
    pub submitted: Option<DateTime<Utc>>,
}
