// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native job lifecycle: open → configure → start document → render pages →
// retain, with every acquired resource released in reverse order on all
// exit paths.
//
// Resources live in `JobContext` as `Option`s filled in acquisition order.
// Its `Drop` releases whatever was acquired, newest first:
// rendering context, surface, document (end_doc), device context, printer
// handle, parsed document. Release failures are logged and never replace
// the error that ended the job.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use spoolwerk_bridge::NativeBackend;
use spoolwerk_bridge::native::{DevMode, DeviceCap, JobCommand, XForm, job_status};
use spoolwerk_bridge::traits::{
    DeviceContext, NativeDocument, NativePage, PrinterHandle, RenderContext, RenderSurface,
    Spooler,
};
use spoolwerk_core::error::{Result, SpoolwerkError};

use crate::scaling::{PaperGeometry, page_transform};
use crate::ticket::ResolvedSettings;

const POINTS_PER_INCH: f32 = 72.0;

/// Where a submission is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    Created,
    DeviceOpened,
    SettingsApplied,
    DocumentStarted,
    PagesRendered,
    Finalized,
    Failed,
}

/// A printer handle that is closed when the guard goes out of scope.
pub(crate) struct ScopedPrinter {
    name: String,
    handle: Option<Box<dyn PrinterHandle>>,
}

impl ScopedPrinter {
    pub(crate) fn open(spooler: &dyn Spooler, name: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            handle: Some(spooler.open_printer(name)?),
        })
    }

    pub(crate) fn handle(&mut self) -> Result<&mut dyn PrinterHandle> {
        match self.handle.as_deref_mut() {
            Some(handle) => Ok(handle),
            None => Err(SpoolwerkError::Spooler(format!(
                "printer handle for {} already closed",
                self.name
            ))),
        }
    }
}

impl Drop for ScopedPrinter {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.close() {
                warn!(printer = %self.name, error = %e, "failed to close printer handle");
            }
        }
    }
}

/// Every native resource one submission holds.
struct JobContext {
    printer_name: String,
    phase: JobPhase,
    document: Option<Box<dyn NativeDocument>>,
    printer: Option<Box<dyn PrinterHandle>>,
    dev_mode: DevMode,
    dc: Option<Box<dyn DeviceContext>>,
    job_id: Option<u32>,
    surface: Option<Box<dyn RenderSurface>>,
    context: Option<Box<dyn RenderContext>>,
}

impl JobContext {
    fn new(printer_name: &str) -> Self {
        Self {
            printer_name: printer_name.to_string(),
            phase: JobPhase::Created,
            document: None,
            printer: None,
            dev_mode: DevMode::default(),
            dc: None,
            job_id: None,
            surface: None,
            context: None,
        }
    }

    fn advance(&mut self, phase: JobPhase) {
        debug!(printer = %self.printer_name, from = ?self.phase, to = ?phase, "job phase");
        self.phase = phase;
    }

    /// Open the document and printer, push the ticket's settings into the
    /// device, start the spooled document, and bind a rendering context.
    fn open(
        &mut self,
        backend: &NativeBackend,
        path: &Path,
        title: &str,
        settings: &ResolvedSettings,
    ) -> Result<u32> {
        self.document = Some(backend.documents.open(path)?);
        self.printer = Some(backend.spooler.open_printer(&self.printer_name)?);
        self.advance(JobPhase::DeviceOpened);

        let printer = self.printer.as_deref_mut().ok_or_else(|| missing("printer handle"))?;
        let mut dev_mode = printer.get_dev_mode()?;
        settings.apply(&mut dev_mode);
        printer.set_dev_mode(&dev_mode)?;
        self.dev_mode = dev_mode;
        self.advance(JobPhase::SettingsApplied);

        self.dc = Some(backend.spooler.create_dc(&self.printer_name, &self.dev_mode)?);
        let dc = self.dc.as_deref_mut().ok_or_else(|| missing("device context"))?;
        let job_id = dc.start_doc(title)?;
        self.job_id = Some(job_id);
        self.advance(JobPhase::DocumentStarted);

        if let Some(printer) = self.printer.as_deref_mut() {
            if let Err(e) = printer.set_job_user_name(job_id) {
                warn!(job_id, error = %e, "could not stamp job owner");
            }
        }

        let dc = self.dc.as_deref().ok_or_else(|| missing("device context"))?;
        self.surface = Some(backend.surfaces.create_surface(dc)?);
        let surface = self.surface.as_deref_mut().ok_or_else(|| missing("surface"))?;
        self.context = Some(surface.create_context()?);
        Ok(job_id)
    }

    fn render_pages(&mut self, fit_to_page: bool) -> Result<()> {
        let pages = self
            .document
            .as_deref()
            .ok_or_else(|| missing("document"))?
            .page_count();
        for index in 0..pages {
            self.render_page(index, fit_to_page)?;
        }
        debug!(printer = %self.printer_name, pages, "pages rendered");
        self.advance(JobPhase::PagesRendered);
        Ok(())
    }

    fn render_page(&mut self, index: usize, fit_to_page: bool) -> Result<()> {
        let (Some(document), Some(printer), Some(dc), Some(surface), Some(context)) = (
            self.document.as_deref(),
            self.printer.as_deref_mut(),
            self.dc.as_deref_mut(),
            self.surface.as_deref_mut(),
            self.context.as_deref_mut(),
        ) else {
            return Err(missing("rendering resources"));
        };

        let page = document.page(index)?;

        printer.set_dev_mode(&self.dev_mode)?;
        dc.reset(&self.dev_mode)?;

        // Device units → points, origin at the physical sheet corner.
        let dpi_x = dc.device_caps(DeviceCap::LogPixelsX);
        let dpi_y = dc.device_caps(DeviceCap::LogPixelsY);
        let margin_x = dc.device_caps(DeviceCap::PhysicalOffsetX);
        let margin_y = dc.device_caps(DeviceCap::PhysicalOffsetY);
        dc.set_world_transform(XForm::scale_translate(
            dpi_x as f32 / POINTS_PER_INCH,
            dpi_y as f32 / POINTS_PER_INCH,
            -(margin_x as f32),
            -(margin_y as f32),
        ))?;

        dc.start_page()?;
        let drawn = draw_page(&*page, dc, surface, context, fit_to_page);
        let ended = dc.end_page();

        match (drawn, ended) {
            (Err(e), Err(end_err)) => {
                warn!(page = index, error = %end_err, "end_page failed after render error");
                Err(e)
            }
            (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
            (Ok(()), Ok(())) => {
                debug!(page = index, "page done");
                Ok(())
            }
        }
    }

    /// Keep the job in the queue for later status queries, unless it is
    /// paused: releasing a paused job would delete it unprinted.
    fn finalize(&mut self) -> Result<u32> {
        let job_id = self.job_id.ok_or_else(|| missing("job id"))?;
        let printer = self.printer.as_deref_mut().ok_or_else(|| missing("printer handle"))?;

        let job = printer.get_job(job_id)?;
        if job.status & job_status::PAUSED == 0 {
            printer.set_job_command(job_id, JobCommand::Retain)?;
        } else {
            debug!(job_id, "job paused, not retained");
        }
        self.advance(JobPhase::Finalized);
        Ok(job_id)
    }

    fn run(
        &mut self,
        backend: &NativeBackend,
        path: &Path,
        title: &str,
        settings: &ResolvedSettings,
    ) -> Result<u32> {
        self.open(backend, path, title, settings)?;
        self.render_pages(settings.fit_to_page)?;
        self.finalize()
    }

    fn teardown(&mut self) {
        let printer = self.printer_name.as_str();
        let log = |step: &str, r: Result<()>| {
            if let Err(e) = r {
                warn!(printer, step, error = %e, "teardown step failed");
            }
        };

        if let Some(context) = self.context.take() {
            log("destroy context", context.destroy());
        }
        if let Some(surface) = self.surface.take() {
            log("destroy surface", surface.destroy());
        }
        if let Some(mut dc) = self.dc.take() {
            if self.job_id.is_some() {
                log("end document", dc.end_doc());
            }
            log("delete device context", dc.delete());
        }
        if let Some(handle) = self.printer.take() {
            log("close printer", handle.close());
        }
        if let Some(document) = self.document.take() {
            document.unref();
        }
    }
}

impl Drop for JobContext {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn missing(what: &str) -> SpoolwerkError {
    SpoolwerkError::Spooler(format!("{what} not acquired"))
}

/// Place and draw one page between `start_page` and `end_page`.
fn draw_page(
    page: &dyn NativePage,
    dc: &dyn DeviceContext,
    surface: &mut dyn RenderSurface,
    context: &mut dyn RenderContext,
    fit_to_page: bool,
) -> Result<()> {
    context.save()?;

    let paper = PaperGeometry {
        paper_width_px: dc.device_caps(DeviceCap::PhysicalWidth),
        paper_height_px: dc.device_caps(DeviceCap::PhysicalHeight),
        printable_width_px: dc.device_caps(DeviceCap::HorzRes),
        printable_height_px: dc.device_caps(DeviceCap::VertRes),
        dpi_x: dc.device_caps(DeviceCap::LogPixelsX),
        dpi_y: dc.device_caps(DeviceCap::LogPixelsY),
    };
    let (width, height) = page.size_points()?;
    let t = page_transform(width, height, &paper, fit_to_page)?;

    context.identity_matrix()?;
    context.translate(t.x_offset, t.y_offset)?;
    context.scale(t.scale, t.scale)?;
    page.render(context)?;
    context.restore()?;
    surface.show_page()
}

/// Print `path` on `printer_name` and return the spooler job id.
///
/// Blocking: run it off the async executor. The caller owns admission
/// control; this function only drives the native resources.
#[instrument(skip(backend, path, settings), fields(path = %path.display()))]
pub fn print_document(
    backend: &NativeBackend,
    printer_name: &str,
    path: &Path,
    title: &str,
    settings: &ResolvedSettings,
) -> Result<u32> {
    let mut job = JobContext::new(printer_name);

    match job.run(backend, path, title, settings) {
        Ok(job_id) => {
            info!(job_id, "print job spooled");
            Ok(job_id)
        }
        Err(e) => {
            warn!(phase = ?job.phase, error = %e, "print job failed");
            job.advance(JobPhase::Failed);
            Err(e)
        }
    }
}

/// Let the spooler purge a job that `print_document` retained.
///
/// Releasing a job that is not retained is a native error, so the retained
/// bit is checked first and a non-retained job is left alone.
#[instrument(skip(spooler))]
pub fn release_job(spooler: &dyn Spooler, printer_name: &str, job_id: u32) -> Result<bool> {
    let mut printer = ScopedPrinter::open(spooler, printer_name)?;
    let handle = printer.handle()?;
    let job = handle.get_job(job_id)?;
    if job.status & job_status::RETAINED == 0 {
        debug!("job not retained, nothing to release");
        return Ok(false);
    }
    handle.set_job_command(job_id, JobCommand::Release)?;
    info!("job released");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeNative;
    use spoolwerk_bridge::native::PaperSelection;

    const TEARDOWN: [&str; 6] = [
        "destroy_context",
        "destroy_surface",
        "end_doc",
        "delete_dc",
        "close_printer",
        "unref_document",
    ];

    fn print(fake: &FakeNative, settings: &ResolvedSettings) -> Result<u32> {
        print_document(
            &fake.backend(),
            "Office",
            Path::new("/tmp/doc.pdf"),
            "doc",
            settings,
        )
    }

    fn tail(events: &[String], n: usize) -> Vec<&str> {
        events[events.len() - n..].iter().map(String::as_str).collect()
    }

    #[test]
    fn successful_job_runs_in_order() {
        let fake = FakeNative::new();
        fake.set_page_sizes(vec![(612.0, 792.0)]);
        let job_id = print(&fake, &ResolvedSettings::default()).unwrap();

        let events = fake.events();
        let expected = [
            "open_document",
            "open_printer",
            "get_dev_mode",
            "set_dev_mode",
            "create_dc",
            "start_doc",
            "set_job_user_name",
            "create_surface",
            "create_context",
            "get_page",
            "set_dev_mode",
            "reset_dc",
            "set_world_transform",
            "start_page",
            "save",
            "identity",
            "translate",
            "scale",
            "render",
            "restore",
            "show_page",
            "end_page",
            "get_job",
            "retain",
        ];
        assert_eq!(&events[..expected.len()], &expected[..]);
        assert_eq!(tail(&events, TEARDOWN.len()), TEARDOWN);

        let job = fake.job(job_id).unwrap();
        assert_ne!(job.status & job_status::RETAINED, 0);
        assert_eq!(job.user_name, "tester");
        assert_eq!(fake.in_flight(), 0);
    }

    #[test]
    fn ticket_settings_reach_the_device() {
        let fake = FakeNative::new();
        let settings = ResolvedSettings {
            copies: Some(4),
            paper: Some(PaperSelection::Code(1)),
            ..Default::default()
        };
        print(&fake, &settings).unwrap();
        let set = fake.dev_modes_set();
        assert!(!set.is_empty());
        assert!(set.iter().all(|d| d.copies == Some(4)));
        assert!(set.iter().all(|d| d.paper == Some(PaperSelection::Code(1))));
    }

    #[test]
    fn every_page_gets_its_own_placement() {
        let fake = FakeNative::new();
        fake.set_page_sizes(vec![(612.0, 792.0), (792.0, 612.0), (300.0, 300.0)]);
        print(&fake, &ResolvedSettings::default()).unwrap();
        let transforms = fake.transforms();
        assert_eq!(transforms.len(), 3);
        assert!(transforms[0].0 != transforms[1].0);
        let renders = fake.events().iter().filter(|e| *e == "render").count();
        assert_eq!(renders, 3);
    }

    #[test]
    fn surface_failure_unwinds_in_reverse() {
        let fake = FakeNative::new();
        fake.fail_on("create_surface");
        let err = print(&fake, &ResolvedSettings::default()).unwrap_err();
        assert!(matches!(err, SpoolwerkError::Spooler(_)));

        let events = fake.events();
        assert_eq!(
            tail(&events, 5),
            ["create_surface", "end_doc", "delete_dc", "close_printer", "unref_document"]
        );
        assert!(!events.iter().any(|e| e == "destroy_context"));
        assert_eq!(fake.in_flight(), 0);
    }

    #[test]
    fn printer_open_failure_only_releases_document() {
        let fake = FakeNative::new();
        fake.fail_on("open_printer");
        assert!(print(&fake, &ResolvedSettings::default()).is_err());
        assert_eq!(
            fake.events(),
            ["open_document", "open_printer", "unref_document"]
        );
    }

    #[test]
    fn start_doc_failure_skips_end_doc() {
        let fake = FakeNative::new();
        fake.fail_on("start_doc");
        assert!(print(&fake, &ResolvedSettings::default()).is_err());
        let events = fake.events();
        assert_eq!(
            tail(&events, 4),
            ["start_doc", "delete_dc", "close_printer", "unref_document"]
        );
        assert!(!events.iter().any(|e| e == "end_doc"));
    }

    #[test]
    fn render_failure_still_ends_page_and_tears_down() {
        let fake = FakeNative::new();
        fake.fail_on("render");
        assert!(print(&fake, &ResolvedSettings::default()).is_err());
        let events = fake.events();
        let render = events.iter().position(|e| e == "render").unwrap();
        assert_eq!(events[render + 1], "end_page");
        assert_eq!(tail(&events, TEARDOWN.len()), TEARDOWN);
        assert!(!events.iter().any(|e| e == "retain"));
    }

    #[test]
    fn teardown_failures_do_not_mask_success() {
        let fake = FakeNative::new();
        fake.fail_on("destroy_surface");
        fake.fail_on("close_printer");
        assert!(print(&fake, &ResolvedSettings::default()).is_ok());
        assert_eq!(tail(&fake.events(), TEARDOWN.len()), TEARDOWN);
    }

    #[test]
    fn paused_job_is_not_retained() {
        let fake = FakeNative::new();
        fake.set_started_job_status(job_status::PAUSED);
        let job_id = print(&fake, &ResolvedSettings::default()).unwrap();
        assert!(!fake.events().iter().any(|e| e == "retain"));
        assert_eq!(fake.job(job_id).unwrap().status & job_status::RETAINED, 0);
    }

    #[test]
    fn release_only_touches_retained_jobs() {
        let fake = FakeNative::new();
        let retained = print(&fake, &ResolvedSettings::default()).unwrap();
        fake.set_started_job_status(job_status::PAUSED);
        let paused = print(&fake, &ResolvedSettings::default()).unwrap();

        assert!(release_job(&fake, "Office", retained).unwrap());
        assert_eq!(fake.job(retained).unwrap().status & job_status::RETAINED, 0);
        assert!(!release_job(&fake, "Office", paused).unwrap());

        let events = fake.events();
        assert_eq!(events.iter().filter(|e| *e == "release").count(), 1);
        assert_eq!(events.last().map(String::as_str), Some("close_printer"));
    }

    #[test]
    fn release_of_unknown_job_closes_handle() {
        let fake = FakeNative::new();
        let err = release_job(&fake, "Office", 4242).unwrap_err();
        assert!(matches!(err, SpoolwerkError::JobNotFound(4242)));
        assert_eq!(
            fake.events(),
            ["open_printer", "get_job", "close_printer"]
        );
    }
}
