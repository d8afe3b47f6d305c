// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory native backend for tests.
//
// Every native call is appended to a shared event log so tests can assert
// call order, and any call can be made to fail by name prefix.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use spoolwerk_bridge::NativeBackend;
use spoolwerk_bridge::native::{
    DevMode, DeviceCap, DeviceCapability, JobCommand, JobInfo, PaperSelection, PrinterInfo, XForm,
    dm, job_status,
};
use spoolwerk_bridge::traits::*;
use spoolwerk_core::error::{Result, SpoolwerkError};

struct State {
    printers: Vec<PrinterInfo>,
    capabilities: HashMap<DeviceCapability, i32>,
    paper_names: Vec<String>,
    paper_codes: Vec<u16>,
    paper_sizes: Vec<(i32, i32)>,
    device_caps: HashMap<DeviceCap, i32>,
    page_sizes: Vec<(f64, f64)>,
    jobs: HashMap<u32, JobInfo>,
    next_job_id: u32,
    started_job_status: u32,
    failures: HashSet<String>,
    events: Vec<String>,
    dev_modes_set: Vec<DevMode>,
    transforms: Vec<(f64, f64, f64)>,
    render_delay: Duration,
    in_flight: usize,
    max_in_flight: usize,
}

impl State {
    /// Log `op` and fail it if a registered prefix matches.
    fn call(&mut self, op: &str) -> Result<()> {
        self.events.push(op.to_string());
        if self.failures.iter().any(|f| op.starts_with(f.as_str())) {
            return Err(SpoolwerkError::Spooler(format!("{op} failed")));
        }
        Ok(())
    }
}

/// Shared fake spooler, document source and surface provider.
#[derive(Clone)]
pub struct FakeNative {
    state: Arc<Mutex<State>>,
}

impl FakeNative {
    /// One office printer with color, duplex, rotation, 99 copies, collate,
    /// and two paper sizes (Letter, A4).
    pub fn new() -> Self {
        let capabilities = HashMap::from([
            (DeviceCapability::ColorDevice, 1),
            (DeviceCapability::Duplex, 1),
            (DeviceCapability::Orientation, 90),
            (DeviceCapability::Copies, 99),
            (DeviceCapability::Collate, 1),
        ]);
        let device_caps = HashMap::from([
            (DeviceCap::LogPixelsX, 600),
            (DeviceCap::LogPixelsY, 600),
            (DeviceCap::PhysicalWidth, 4960),
            (DeviceCap::PhysicalHeight, 7016),
            (DeviceCap::HorzRes, 4760),
            (DeviceCap::VertRes, 6816),
            (DeviceCap::PhysicalOffsetX, 100),
            (DeviceCap::PhysicalOffsetY, 100),
        ]);
        Self {
            state: Arc::new(Mutex::new(State {
                printers: vec![Self::office_printer()],
                capabilities,
                paper_names: vec!["Letter".to_string(), "A4".to_string()],
                paper_codes: vec![1, 9],
                paper_sizes: vec![(2159, 2794), (2100, 2970)],
                device_caps,
                page_sizes: vec![(612.0, 792.0), (612.0, 792.0)],
                jobs: HashMap::new(),
                next_job_id: 100,
                started_job_status: job_status::PRINTING,
                failures: HashSet::new(),
                events: Vec::new(),
                dev_modes_set: Vec::new(),
                transforms: Vec::new(),
                render_delay: Duration::ZERO,
                in_flight: 0,
                max_in_flight: 0,
            })),
        }
    }

    pub fn office_printer() -> PrinterInfo {
        PrinterInfo {
            name: "Office".to_string(),
            port: "USB001".to_string(),
            driver: "Acme LaserPro 9000".to_string(),
            location: "Room 101".to_string(),
            attributes: 0,
            status: 0,
            dev_mode: DevMode {
                device_name: "Office".to_string(),
                color: Some(dm::COLOR_COLOR),
                duplex: Some(dm::DUPLEX_VERTICAL),
                orientation: Some(dm::ORIENT_PORTRAIT),
                copies: Some(1),
                collate: Some(dm::COLLATE_FALSE),
                paper: Some(PaperSelection::Code(9)),
            },
        }
    }

    pub fn backend(&self) -> NativeBackend {
        let shared = Arc::new(self.clone());
        NativeBackend::new(shared.clone(), shared.clone(), shared)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn fail_on(&self, op_prefix: &str) {
        self.lock().failures.insert(op_prefix.to_string());
    }

    pub fn events(&self) -> Vec<String> {
        self.lock().events.clone()
    }

    pub fn clear_events(&self) {
        self.lock().events.clear();
    }

    pub fn set_printers(&self, printers: Vec<PrinterInfo>) {
        self.lock().printers = printers;
    }

    pub fn set_capability(&self, kind: DeviceCapability, value: i32) {
        self.lock().capabilities.insert(kind, value);
    }

    pub fn set_paper_names(&self, names: Vec<String>) {
        self.lock().paper_names = names;
    }

    pub fn set_paper_codes(&self, codes: Vec<u16>) {
        self.lock().paper_codes = codes;
    }

    pub fn set_page_sizes(&self, sizes: Vec<(f64, f64)>) {
        self.lock().page_sizes = sizes;
    }

    pub fn set_started_job_status(&self, status: u32) {
        self.lock().started_job_status = status;
    }

    pub fn set_render_delay(&self, delay: Duration) {
        self.lock().render_delay = delay;
    }

    pub fn insert_job(&self, job: JobInfo) {
        self.lock().jobs.insert(job.job_id, job);
    }

    pub fn job(&self, job_id: u32) -> Option<JobInfo> {
        self.lock().jobs.get(&job_id).cloned()
    }

    /// Every `DevMode` handed to `set_dev_mode`, in order.
    pub fn dev_modes_set(&self) -> Vec<DevMode> {
        self.lock().dev_modes_set.clone()
    }

    /// `(scale, x, y)` of each page placement.
    pub fn transforms(&self) -> Vec<(f64, f64, f64)> {
        self.lock().transforms.clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.lock().max_in_flight
    }

    pub fn in_flight(&self) -> usize {
        self.lock().in_flight
    }
}

impl Spooler for FakeNative {
    fn enum_printers(&self) -> Result<Vec<PrinterInfo>> {
        let mut s = self.lock();
        s.call("enum_printers")?;
        Ok(s.printers.clone())
    }

    fn open_printer(&self, name: &str) -> Result<Box<dyn PrinterHandle>> {
        let mut s = self.lock();
        s.call("open_printer")?;
        if !s.printers.iter().any(|p| p.name == name) {
            return Err(SpoolwerkError::PrinterNotFound(name.to_string()));
        }
        let dev_mode = s
            .printers
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.dev_mode.clone())
            .unwrap_or_default();
        Ok(Box::new(FakePrinter {
            fake: self.clone(),
            name: name.to_string(),
            dev_mode,
        }))
    }

    fn create_dc(&self, printer_name: &str, _dev_mode: &DevMode) -> Result<Box<dyn DeviceContext>> {
        self.lock().call("create_dc")?;
        Ok(Box::new(FakeDc {
            fake: self.clone(),
            printer: printer_name.to_string(),
        }))
    }

    fn capability_i32(&self, _printer: &str, _port: &str, kind: DeviceCapability) -> Result<i32> {
        let mut s = self.lock();
        s.call("capability_i32")?;
        Ok(s.capabilities.get(&kind).copied().unwrap_or(0))
    }

    fn capability_strings(
        &self,
        _printer: &str,
        _port: &str,
        _kind: DeviceCapability,
    ) -> Result<Vec<String>> {
        let mut s = self.lock();
        s.call("capability_strings")?;
        Ok(s.paper_names.clone())
    }

    fn capability_u16s(
        &self,
        _printer: &str,
        _port: &str,
        _kind: DeviceCapability,
    ) -> Result<Vec<u16>> {
        let mut s = self.lock();
        s.call("capability_u16s")?;
        Ok(s.paper_codes.clone())
    }

    fn capability_i32_pairs(
        &self,
        _printer: &str,
        _port: &str,
        _kind: DeviceCapability,
    ) -> Result<Vec<(i32, i32)>> {
        let mut s = self.lock();
        s.call("capability_i32_pairs")?;
        Ok(s.paper_sizes.clone())
    }
}

struct FakePrinter {
    fake: FakeNative,
    name: String,
    dev_mode: DevMode,
}

impl PrinterHandle for FakePrinter {
    fn get_dev_mode(&mut self) -> Result<DevMode> {
        self.fake.lock().call("get_dev_mode")?;
        Ok(self.dev_mode.clone())
    }

    fn set_dev_mode(&mut self, dev_mode: &DevMode) -> Result<()> {
        let mut s = self.fake.lock();
        s.call("set_dev_mode")?;
        s.dev_modes_set.push(dev_mode.clone());
        self.dev_mode = dev_mode.clone();
        Ok(())
    }

    fn get_job(&mut self, job_id: u32) -> Result<JobInfo> {
        let mut s = self.fake.lock();
        s.call("get_job")?;
        s.jobs
            .get(&job_id)
            .filter(|j| j.printer_name == self.name)
            .cloned()
            .ok_or(SpoolwerkError::JobNotFound(job_id))
    }

    fn enum_jobs(&mut self) -> Result<Vec<JobInfo>> {
        let mut s = self.fake.lock();
        s.call("enum_jobs")?;
        let mut jobs: Vec<_> = s
            .jobs
            .values()
            .filter(|j| j.printer_name == self.name)
            .cloned()
            .collect();
        jobs.sort_by_key(|j| j.job_id);
        Ok(jobs)
    }

    fn set_job_command(&mut self, job_id: u32, command: JobCommand) -> Result<()> {
        let mut s = self.fake.lock();
        s.call(match command {
            JobCommand::Retain => "retain",
            JobCommand::Release => "release",
        })?;
        let job = s
            .jobs
            .get_mut(&job_id)
            .ok_or(SpoolwerkError::JobNotFound(job_id))?;
        match command {
            JobCommand::Retain => job.status |= job_status::RETAINED,
            JobCommand::Release => {
                if job.status & job_status::RETAINED == 0 {
                    return Err(SpoolwerkError::Spooler("job is not retained".into()));
                }
                job.status &= !job_status::RETAINED;
            }
        }
        Ok(())
    }

    fn set_job_user_name(&mut self, job_id: u32) -> Result<()> {
        let mut s = self.fake.lock();
        s.call("set_job_user_name")?;
        if let Some(job) = s.jobs.get_mut(&job_id) {
            job.user_name = "tester".to_string();
        }
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.fake.lock().call("close_printer")
    }
}

struct FakeDc {
    fake: FakeNative,
    printer: String,
}

impl DeviceContext for FakeDc {
    fn start_doc(&mut self, title: &str) -> Result<u32> {
        let mut s = self.fake.lock();
        s.call("start_doc")?;
        let job_id = s.next_job_id;
        s.next_job_id += 1;
        let status = s.started_job_status;
        s.jobs.insert(
            job_id,
            JobInfo {
                job_id,
                printer_name: self.printer.clone(),
                document: title.to_string(),
                datatype: "RAW".to_string(),
                status,
                ..Default::default()
            },
        );
        Ok(job_id)
    }

    fn end_doc(&mut self) -> Result<()> {
        self.fake.lock().call("end_doc")
    }

    fn reset(&mut self, _dev_mode: &DevMode) -> Result<()> {
        self.fake.lock().call("reset_dc")
    }

    fn device_caps(&self, cap: DeviceCap) -> i32 {
        self.fake.lock().device_caps.get(&cap).copied().unwrap_or(0)
    }

    fn set_world_transform(&mut self, _xform: XForm) -> Result<()> {
        self.fake.lock().call("set_world_transform")
    }

    fn start_page(&mut self) -> Result<()> {
        self.fake.lock().call("start_page")
    }

    fn end_page(&mut self) -> Result<()> {
        self.fake.lock().call("end_page")
    }

    fn delete(self: Box<Self>) -> Result<()> {
        self.fake.lock().call("delete_dc")
    }
}

impl DocumentSource for FakeNative {
    fn open(&self, _path: &Path) -> Result<Box<dyn NativeDocument>> {
        let mut s = self.lock();
        s.call("open_document")?;
        s.in_flight += 1;
        s.max_in_flight = s.max_in_flight.max(s.in_flight);
        let pages = s.page_sizes.clone();
        Ok(Box::new(FakeDoc {
            fake: self.clone(),
            pages,
        }))
    }
}

struct FakeDoc {
    fake: FakeNative,
    pages: Vec<(f64, f64)>,
}

impl NativeDocument for FakeDoc {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Result<Box<dyn NativePage>> {
        self.fake.lock().call("get_page")?;
        let size = self
            .pages
            .get(index)
            .copied()
            .ok_or_else(|| SpoolwerkError::Document(format!("no page {index}")))?;
        Ok(Box::new(FakePage {
            fake: self.fake.clone(),
            size,
        }))
    }

    fn unref(self: Box<Self>) {
        let mut s = self.fake.lock();
        s.events.push("unref_document".to_string());
        s.in_flight = s.in_flight.saturating_sub(1);
    }
}

struct FakePage {
    fake: FakeNative,
    size: (f64, f64),
}

impl NativePage for FakePage {
    fn size_points(&self) -> Result<(f64, f64)> {
        Ok(self.size)
    }

    fn render(&self, _context: &mut dyn RenderContext) -> Result<()> {
        let delay = {
            let mut s = self.fake.lock();
            s.call("render")?;
            s.render_delay
        };
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        Ok(())
    }
}

impl SurfaceProvider for FakeNative {
    fn create_surface(&self, _dc: &dyn DeviceContext) -> Result<Box<dyn RenderSurface>> {
        self.lock().call("create_surface")?;
        Ok(Box::new(FakeSurface { fake: self.clone() }))
    }
}

struct FakeSurface {
    fake: FakeNative,
}

impl RenderSurface for FakeSurface {
    fn create_context(&mut self) -> Result<Box<dyn RenderContext>> {
        self.fake.lock().call("create_context")?;
        Ok(Box::new(FakeContext {
            fake: self.fake.clone(),
            pending: (1.0, 0.0, 0.0),
        }))
    }

    fn show_page(&mut self) -> Result<()> {
        self.fake.lock().call("show_page")
    }

    fn destroy(self: Box<Self>) -> Result<()> {
        self.fake.lock().call("destroy_surface")
    }
}

struct FakeContext {
    fake: FakeNative,
    /// Scale and translation since the last identity reset.
    pending: (f64, f64, f64),
}

impl RenderContext for FakeContext {
    fn save(&mut self) -> Result<()> {
        self.fake.lock().call("save")
    }

    fn restore(&mut self) -> Result<()> {
        let mut s = self.fake.lock();
        s.call("restore")?;
        s.transforms.push(self.pending);
        Ok(())
    }

    fn identity_matrix(&mut self) -> Result<()> {
        self.pending = (1.0, 0.0, 0.0);
        self.fake.lock().call("identity")
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<()> {
        self.pending.1 = x;
        self.pending.2 = y;
        self.fake.lock().call("translate")
    }

    fn scale(&mut self, sx: f64, _sy: f64) -> Result<()> {
        self.pending.0 = sx;
        self.fake.lock().call("scale")
    }

    fn destroy(self: Box<Self>) -> Result<()> {
        self.fake.lock().call("destroy_context")
    }
}
