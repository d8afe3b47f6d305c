// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: the normalized, cloud-print style view of a local
// printer, its advertised capabilities, job tickets, and job states.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::semaphore::NativeJobSemaphore;

/// Locale attached to every default text we emit.
pub const DEFAULT_LOCALE: &str = "EN";

/// Media size name used for every option built from device paper lists.
pub const MEDIA_SIZE_CUSTOM: &str = "CUSTOM";

/// MIME type accepted by every printer.
pub const CONTENT_TYPE_PDF: &str = "application/pdf";

/// Human-readable text with the locale it is written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedString {
    pub locale: String,
    pub value: String,
}

impl LocalizedString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            value: value.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Printer state
// ---------------------------------------------------------------------------

/// Top-level device state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloudDeviceState {
    #[default]
    Idle,
    Processing,
    Stopped,
}

impl std::fmt::Display for CloudDeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
            Self::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// Severity of a vendor-state detail item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VendorStateSeverity {
    Info,
    Warning,
    Error,
}

/// One detail explaining a device state, e.g. "paper jam".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorStateItem {
    /// Stable identifier of the condition (e.g. `paper_jam`).
    pub id: String,
    pub severity: VendorStateSeverity,
    pub description: LocalizedString,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VendorState {
    pub items: Vec<VendorStateItem>,
}

/// Normalized printer state plus optional detail items.
///
/// `vendor_state` is `None` (not an empty list) when the printer is idle
/// and nothing noteworthy was reported.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrinterState {
    pub state: CloudDeviceState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_state: Option<VendorState>,
}

// ---------------------------------------------------------------------------
// Printer description (advertised capabilities)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorType {
    StandardColor,
    StandardMonochrome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    pub vendor_id: String,
    #[serde(rename = "type")]
    pub kind: ColorType,
    pub is_default: bool,
    pub display_name: LocalizedString,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCapability {
    pub options: Vec<ColorOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DuplexType {
    NoDuplex,
    LongEdge,
    ShortEdge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplexOption {
    #[serde(rename = "type")]
    pub kind: DuplexType,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplexCapability {
    pub options: Vec<DuplexOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageOrientationType {
    Portrait,
    Landscape,
    /// Only meaningful in tickets; never advertised.
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOrientationOption {
    #[serde(rename = "type")]
    pub kind: PageOrientationType,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOrientationCapability {
    pub options: Vec<PageOrientationOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopiesCapability {
    pub default: i32,
    pub max: i32,
}

/// A paper size the device accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSizeOption {
    pub name: String,
    pub width_microns: i32,
    pub height_microns: i32,
    pub is_default: bool,
    /// Native paper code, as a decimal string.
    pub vendor_id: String,
    pub display_name: LocalizedString,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSizeCapability {
    pub options: Vec<MediaSizeOption>,
}

impl MediaSizeCapability {
    /// The option marked default, if any.
    pub fn default_option(&self) -> Option<&MediaSizeOption> {
        self.options.iter().find(|o| o.is_default)
    }

    pub fn by_vendor_id(&self, vendor_id: &str) -> Option<&MediaSizeOption> {
        self.options.iter().find(|o| o.vendor_id == vendor_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateCapability {
    pub default: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FitToPageType {
    NoFitting,
    FitToPage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitToPageOption {
    #[serde(rename = "type")]
    pub kind: FitToPageType,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitToPageCapability {
    pub options: Vec<FitToPageOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedContentType {
    pub content_type: String,
}

/// Advertised capability set of one printer.
///
/// A `None` group means the device does not support that setting and any
/// ticket request for it is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Description {
    pub supported_content_type: Vec<SupportedContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit_to_page: Option<FitToPageCapability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorCapability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplex: Option<DuplexCapability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_orientation: Option<PageOrientationCapability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copies: Option<CopiesCapability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_size: Option<MediaSizeCapability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collate: Option<CollateCapability>,
}

impl Description {
    /// Capabilities every spooled printer has: PDF input and fit-to-page.
    pub fn base() -> Self {
        Self {
            supported_content_type: vec![SupportedContentType {
                content_type: CONTENT_TYPE_PDF.to_string(),
            }],
            fit_to_page: Some(FitToPageCapability {
                options: vec![
                    FitToPageOption {
                        kind: FitToPageType::NoFitting,
                        is_default: true,
                    },
                    FitToPageOption {
                        kind: FitToPageType::FitToPage,
                        is_default: false,
                    },
                ],
            }),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Printer
// ---------------------------------------------------------------------------

/// A local printer as seen through the spooler.
///
/// Rebuilt wholesale on every capability refresh; `name` is the only
/// identity that survives a refresh.
#[derive(Debug, Clone, Serialize)]
pub struct Printer {
    pub name: String,
    pub default_display_name: String,
    pub manufacturer: String,
    pub model: String,
    pub state: PrinterState,
    pub description: Description,
    pub tags: BTreeMap<String, String>,
    /// Bounds concurrent native jobs on this device.
    #[serde(skip)]
    pub native_job_semaphore: NativeJobSemaphore,
}

// ---------------------------------------------------------------------------
// Job ticket
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorTicketItem {
    /// Native color code, used when `kind` is absent.
    #[serde(default)]
    pub vendor_id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<ColorType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplexTicketItem {
    #[serde(rename = "type")]
    pub kind: DuplexType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOrientationTicketItem {
    #[serde(rename = "type")]
    pub kind: PageOrientationType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopiesTicketItem {
    pub copies: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitToPageTicketItem {
    #[serde(rename = "type")]
    pub kind: FitToPageType,
}

/// Requested paper, either by native code (`vendor_id`) or by dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaSizeTicketItem {
    #[serde(default)]
    pub width_microns: i32,
    #[serde(default)]
    pub height_microns: i32,
    #[serde(default)]
    pub vendor_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateTicketItem {
    pub collate: bool,
}

/// Device-agnostic print options for one job. Every item is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobTicket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorTicketItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplex: Option<DuplexTicketItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_orientation: Option<PageOrientationTicketItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copies: Option<CopiesTicketItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit_to_page: Option<FitToPageTicketItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_size: Option<MediaSizeTicketItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collate: Option<CollateTicketItem>,
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// Normalized job lifecycle value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStateType {
    Queued,
    InProgress,
    Done,
    Stopped,
    Aborted,
}

impl std::fmt::Display for JobStateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Queued => "queued",
            Self::InProgress => "in-progress",
            Self::Done => "done",
            Self::Stopped => "stopped",
            Self::Aborted => "aborted",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceActionCauseCode {
    DownloadFailure,
    InvalidTicket,
    PrintFailure,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserActionCauseCode {
    Canceled,
    Paused,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceStateCauseCode {
    InputTray,
    Marker,
    MediaPath,
    MediaSize,
    MediaType,
    Other,
}

/// Why a job is in its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "cause")]
pub enum JobStateCause {
    DeviceAction(DeviceActionCauseCode),
    UserAction(UserActionCauseCode),
    DeviceState(DeviceStateCauseCode),
}

impl std::fmt::Display for JobStateCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeviceAction(c) => write!(f, "device action: {c:?}"),
            Self::UserAction(c) => write!(f, "user action: {c:?}"),
            Self::DeviceState(c) => write!(f, "device state: {c:?}"),
        }
    }
}

/// Normalized job state, recomputed from native status bits on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobState {
    #[serde(rename = "type")]
    pub kind: JobStateType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<JobStateCause>,
}

impl JobState {
    pub fn new(kind: JobStateType) -> Self {
        Self { kind, cause: None }
    }

    pub fn with_cause(kind: JobStateType, cause: JobStateCause) -> Self {
        Self {
            kind,
            cause: Some(cause),
        }
    }
}

/// A job in a printer's spooler queue.
///
/// `status` holds the raw native bits at the time of the listing; derive
/// the normalized state from it, never cache the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: u32,
    pub printer_name: String,
    pub document: String,
    pub user_name: String,
    pub machine_name: String,
    pub datatype: String,
    pub status: u32,
    pub priority: u32,
    pub position: u32,
    pub total_pages: u32,
    pub pages_printed: u32,
    pub submitted: Option<DateTime<Utc>>,
}
