// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `SpoolService`: the operations callers use: list printers, print, query
// and list jobs, release a retained job.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use spoolwerk_bridge::NativeBackend;
use spoolwerk_bridge::native::JobInfo;
use spoolwerk_core::error::{Result, SpoolwerkError};
use spoolwerk_core::semaphore::DEFAULT_NATIVE_JOB_QUEUE_SIZE;
use spoolwerk_core::types::{Job, JobState, JobTicket, Printer};

use crate::capabilities::describe_printer;
use crate::job::{self, ScopedPrinter};
use crate::registry::PrinterRegistry;
use crate::{status, ticket};

/// Print operations against one native backend.
pub struct SpoolService {
    backend: NativeBackend,
    registry: Arc<PrinterRegistry>,
    queue_size: usize,
}

impl SpoolService {
    pub fn new(backend: NativeBackend, queue_size: usize) -> Self {
        Self {
            backend,
            registry: Arc::new(PrinterRegistry::default()),
            queue_size,
        }
    }

    pub fn with_default_queue(backend: NativeBackend) -> Self {
        Self::new(backend, DEFAULT_NATIVE_JOB_QUEUE_SIZE)
    }

    pub fn registry(&self) -> &Arc<PrinterRegistry> {
        &self.registry
    }

    /// Enumerate the spooler, describe every printer, and refresh the
    /// registry with the result.
    #[instrument(skip(self))]
    pub fn list_printers(&self) -> Result<Vec<Printer>> {
        let infos = self.backend.spooler.enum_printers()?;
        let printers = infos
            .iter()
            .map(|info| describe_printer(self.backend.spooler.as_ref(), info, self.queue_size))
            .collect::<Result<Vec<_>>>()?;
        info!(count = printers.len(), "enumerated printers");
        self.registry.refresh(printers);
        Ok(self.registry.get_all())
    }

    /// Registry lookup, re-enumerating once on a miss.
    pub fn printer(&self, name: &str) -> Result<Printer> {
        if let Some(p) = self.registry.get_by_name(name) {
            return Ok(p);
        }
        debug!(printer = name, "not cached, re-enumerating");
        self.list_printers()?;
        self.registry
            .get_by_name(name)
            .ok_or_else(|| SpoolwerkError::PrinterNotFound(name.to_string()))
    }

    /// Print `path` on `printer` with `ticket`; returns the spooler job id.
    ///
    /// Waits for a free slot on the printer's admission semaphore. The slot
    /// stays taken until the native resources of this job are released, even
    /// if the returned future is dropped early.
    #[instrument(skip(self, printer, path, ticket), fields(printer = %printer.name))]
    pub async fn print(
        &self,
        printer: &Printer,
        path: &Path,
        title: &str,
        ticket: &JobTicket,
    ) -> Result<u32> {
        let settings = ticket::resolve(ticket, &printer.description)?;

        let permit = printer.native_job_semaphore.acquire().await?;
        debug!(
            available = printer.native_job_semaphore.available(),
            "admission slot acquired"
        );

        let backend = self.backend.clone();
        let name = printer.name.clone();
        let path = path.to_path_buf();
        let title = title.to_string();
        tokio::task::spawn_blocking(move || {
            let _slot = permit;
            job::print_document(&backend, &name, &path, &title, &settings)
        })
        .await
        .map_err(|e| SpoolwerkError::Spooler(format!("print task failed: {e}")))?
    }

    /// Current normalized state of a job. A job the spooler has already
    /// purged is reported as aborted rather than as an error.
    #[instrument(skip(self))]
    pub fn get_job_state(&self, printer_name: &str, job_id: u32) -> Result<JobState> {
        let mut printer = ScopedPrinter::open(self.backend.spooler.as_ref(), printer_name)?;
        match printer.handle()?.get_job(job_id) {
            Ok(job) => Ok(status::job_state(job.status)),
            Err(SpoolwerkError::JobNotFound(_)) => {
                debug!("job gone from spooler");
                Ok(status::vanished_job_state())
            }
            Err(e) => Err(e),
        }
    }

    /// Every job queued on `printer_name`.
    #[instrument(skip(self))]
    pub fn job_list(&self, printer_name: &str) -> Result<Vec<Job>> {
        let mut printer = ScopedPrinter::open(self.backend.spooler.as_ref(), printer_name)?;
        let jobs = printer.handle()?.enum_jobs()?;
        Ok(jobs.into_iter().map(to_job).collect())
    }

    /// Release a retained job. Returns whether a release was issued.
    pub fn release_job(&self, printer_name: &str, job_id: u32) -> Result<bool> {
        job::release_job(self.backend.spooler.as_ref(), printer_name, job_id)
    }
}

fn to_job(info: JobInfo) -> Job {
    Job {
        job_id: info.job_id,
        printer_name: info.printer_name,
        document: info.document,
        user_name: info.user_name,
        machine_name: info.machine_name,
        datatype: info.datatype,
        status: info.status,
        priority: info.priority,
        position: info.position,
        total_pages: info.total_pages,
        pages_printed: info.pages_printed,
        submitted: info.submitted,
    }
}
