// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for hosts without a native print spooler.
//
// Every call returns `PlatformUnavailable`. Since no handle can ever be
// created, only the provider traits need implementing.

use std::path::Path;

use spoolwerk_core::error::{Result, SpoolwerkError};

use crate::native::{DevMode, DeviceCapability, PrinterInfo};
use crate::traits::*;

/// No-op bridge used when the platform has no supported spooler.
pub struct StubBridge;

impl Spooler for StubBridge {
    fn enum_printers(&self) -> Result<Vec<PrinterInfo>> {
        tracing::warn!("Spooler::enum_printers called on stub bridge");
        Err(SpoolwerkError::PlatformUnavailable)
    }

    fn open_printer(&self, _name: &str) -> Result<Box<dyn PrinterHandle>> {
        tracing::warn!("Spooler::open_printer called on stub bridge");
        Err(SpoolwerkError::PlatformUnavailable)
    }

    fn create_dc(&self, _printer_name: &str, _dev_mode: &DevMode) -> Result<Box<dyn DeviceContext>> {
        Err(SpoolwerkError::PlatformUnavailable)
    }

    fn capability_i32(&self, _printer: &str, _port: &str, _kind: DeviceCapability) -> Result<i32> {
        Err(SpoolwerkError::PlatformUnavailable)
    }

    fn capability_strings(
        &self,
        _printer: &str,
        _port: &str,
        _kind: DeviceCapability,
    ) -> Result<Vec<String>> {
        Err(SpoolwerkError::PlatformUnavailable)
    }

    fn capability_u16s(
        &self,
        _printer: &str,
        _port: &str,
        _kind: DeviceCapability,
    ) -> Result<Vec<u16>> {
        Err(SpoolwerkError::PlatformUnavailable)
    }

    fn capability_i32_pairs(
        &self,
        _printer: &str,
        _port: &str,
        _kind: DeviceCapability,
    ) -> Result<Vec<(i32, i32)>> {
        Err(SpoolwerkError::PlatformUnavailable)
    }
}

impl DocumentSource for StubBridge {
    fn open(&self, _path: &Path) -> Result<Box<dyn NativeDocument>> {
        tracing::warn!("DocumentSource::open called on stub bridge");
        Err(SpoolwerkError::PlatformUnavailable)
    }
}

impl SurfaceProvider for StubBridge {
    fn create_surface(&self, _dc: &dyn DeviceContext) -> Result<Box<dyn RenderSurface>> {
        Err(SpoolwerkError::PlatformUnavailable)
    }
}
