// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spoolwerk: Native platform bridge abstractions.
//
// The print core talks to three external collaborators: the OS print
// spooler, a document parser that can render pages, and a 2D rendering
// surface bound to a printer device context. This crate defines their
// contracts and the native constants shared with the core.

pub mod native;
pub mod stub;
pub mod traits;

use std::sync::Arc;

pub use native::{DevMode, JobInfo, PaperSelection, PrinterInfo};
pub use traits::{
    DeviceContext, DocumentSource, NativeDocument, NativePage, PrinterHandle, RenderContext,
    RenderSurface, Spooler, SurfaceProvider,
};

/// The set of native providers one print service runs against.
#[derive(Clone)]
pub struct NativeBackend {
    pub spooler: Arc<dyn Spooler>,
    pub documents: Arc<dyn DocumentSource>,
    pub surfaces: Arc<dyn SurfaceProvider>,
}

impl NativeBackend {
    pub fn new(
        spooler: Arc<dyn Spooler>,
        documents: Arc<dyn DocumentSource>,
        surfaces: Arc<dyn SurfaceProvider>,
    ) -> Self {
        Self {
            spooler,
            documents,
            surfaces,
        }
    }
}

/// Backend for the current platform.
///
/// Hosts without a supported native spooler get the stub, whose every call
/// fails with `SpoolwerkError::PlatformUnavailable`.
pub fn platform_backend() -> NativeBackend {
    let stub = Arc::new(stub::StubBridge);
    NativeBackend::new(stub.clone(), stub.clone(), stub)
}
