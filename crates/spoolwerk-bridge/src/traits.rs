// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic contracts for the native print collaborators.
//
// Handles that own a native resource expose an explicit release method
// taking `self: Box<Self>` so the caller controls release order.

use std::path::Path;

use spoolwerk_core::error::Result;

use crate::native::{DevMode, DeviceCap, DeviceCapability, JobCommand, JobInfo, PrinterInfo, XForm};

/// The OS print spooler.
pub trait Spooler: Send + Sync {
    /// All local printers with their status and default settings.
    fn enum_printers(&self) -> Result<Vec<PrinterInfo>>;

    fn open_printer(&self, name: &str) -> Result<Box<dyn PrinterHandle>>;

    /// Create a device context configured with `dev_mode`.
    fn create_dc(&self, printer_name: &str, dev_mode: &DevMode) -> Result<Box<dyn DeviceContext>>;

    /// Scalar capability query.
    fn capability_i32(&self, printer: &str, port: &str, kind: DeviceCapability) -> Result<i32>;

    /// String-array capability query (e.g. paper names).
    fn capability_strings(
        &self,
        printer: &str,
        port: &str,
        kind: DeviceCapability,
    ) -> Result<Vec<String>>;

    /// u16-array capability query (e.g. paper codes).
    fn capability_u16s(&self, printer: &str, port: &str, kind: DeviceCapability)
    -> Result<Vec<u16>>;

    /// Pair-array capability query (e.g. paper sizes as width/length).
    fn capability_i32_pairs(
        &self,
        printer: &str,
        port: &str,
        kind: DeviceCapability,
    ) -> Result<Vec<(i32, i32)>>;
}

/// An open printer (`HANDLE` from `OpenPrinter`).
pub trait PrinterHandle: Send {
    /// Current document properties of the printer.
    fn get_dev_mode(&mut self) -> Result<DevMode>;

    /// Validate and store document properties.
    fn set_dev_mode(&mut self, dev_mode: &DevMode) -> Result<()>;

    /// Fails with `SpoolwerkError::JobNotFound` once the spooler has purged
    /// the job.
    fn get_job(&mut self, job_id: u32) -> Result<JobInfo>;

    fn enum_jobs(&mut self) -> Result<Vec<JobInfo>>;

    fn set_job_command(&mut self, job_id: u32, command: JobCommand) -> Result<()>;

    /// Stamp the job with the calling user's name.
    fn set_job_user_name(&mut self, job_id: u32) -> Result<()>;

    fn close(self: Box<Self>) -> Result<()>;
}

/// A printer device context (`HDC`).
pub trait DeviceContext: Send {
    /// Start a spooled document. Returns the spooler job id.
    fn start_doc(&mut self, title: &str) -> Result<u32>;

    fn end_doc(&mut self) -> Result<()>;

    /// Apply changed settings before the next page.
    fn reset(&mut self, dev_mode: &DevMode) -> Result<()>;

    fn device_caps(&self, cap: DeviceCap) -> i32;

    /// Switch to advanced graphics mode and install `xform`.
    fn set_world_transform(&mut self, xform: XForm) -> Result<()>;

    fn start_page(&mut self) -> Result<()>;

    fn end_page(&mut self) -> Result<()>;

    fn delete(self: Box<Self>) -> Result<()>;
}

/// Opens documents for rendering.
pub trait DocumentSource: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn NativeDocument>>;
}

/// A parsed document.
pub trait NativeDocument: Send {
    fn page_count(&self) -> usize;

    /// Zero-based page access. The page is released when dropped.
    fn page(&self, index: usize) -> Result<Box<dyn NativePage>>;

    fn unref(self: Box<Self>);
}

/// One page of a parsed document.
pub trait NativePage {
    /// Width and height in points.
    fn size_points(&self) -> Result<(f64, f64)>;

    /// Render for printing onto the current transform of `context`.
    fn render(&self, context: &mut dyn RenderContext) -> Result<()>;
}

/// Creates rendering surfaces bound to printer device contexts.
pub trait SurfaceProvider: Send + Sync {
    fn create_surface(&self, dc: &dyn DeviceContext) -> Result<Box<dyn RenderSurface>>;
}

/// A printing surface drawing into a device context.
pub trait RenderSurface: Send {
    fn create_context(&mut self) -> Result<Box<dyn RenderContext>>;

    /// Flush the current page to the device.
    fn show_page(&mut self) -> Result<()>;

    fn destroy(self: Box<Self>) -> Result<()>;
}

/// A 2D drawing context on a surface.
pub trait RenderContext: Send {
    fn save(&mut self) -> Result<()>;

    fn restore(&mut self) -> Result<()>;

    fn identity_matrix(&mut self) -> Result<()>;

    fn translate(&mut self, x: f64, y: f64) -> Result<()>;

    fn scale(&mut self, sx: f64, sy: f64) -> Result<()>;

    fn destroy(self: Box<Self>) -> Result<()>;
}
