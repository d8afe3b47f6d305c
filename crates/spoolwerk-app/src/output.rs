// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rendering of command results as aligned text tables or pretty JSON.

use serde::Serialize;

use spoolwerk_core::error::Result;
use spoolwerk_core::types::{Job, JobState, Printer, PrinterState};
use spoolwerk_print::status;

/// Plain text table with columns padded to their widest cell.
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.len()).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let header: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        for cells in std::iter::once(&header).chain(&self.rows) {
            let line: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{cell:<w$}"))
                .collect();
            out.push_str(line.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}

pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// A queued job together with the state derived from its status bits.
#[derive(Serialize)]
pub struct JobRow<'a> {
    #[serde(flatten)]
    pub job: &'a Job,
    pub state: JobState,
}

impl<'a> JobRow<'a> {
    pub fn new(job: &'a Job) -> Self {
        Self {
            job,
            state: status::job_state(job.status),
        }
    }
}

pub fn job_state(state: &JobState) -> String {
    match state.cause {
        Some(cause) => format!("{} ({cause})", state.kind),
        None => state.kind.to_string(),
    }
}

fn printer_state(state: &PrinterState) -> String {
    let notes: Vec<&str> = state
        .vendor_state
        .iter()
        .flat_map(|v| &v.items)
        .map(|item| item.description.value.as_str())
        .collect();
    if notes.is_empty() {
        state.state.to_string()
    } else {
        format!("{} ({})", state.state, notes.join(", "))
    }
}

pub fn printers_table(printers: &[Printer]) -> String {
    let mut table = Table::new(&["NAME", "STATE", "MANUFACTURER", "MODEL"]);
    for p in printers {
        table.row(vec![
            p.name.clone(),
            printer_state(&p.state),
            p.manufacturer.clone(),
            p.model.clone(),
        ]);
    }
    table.render()
}

pub fn jobs_table(rows: &[JobRow<'_>]) -> String {
    let mut table = Table::new(&["ID", "STATE", "DOCUMENT", "USER", "PAGES", "SUBMITTED"]);
    for row in rows {
        let job = row.job;
        table.row(vec![
            job.job_id.to_string(),
            job_state(&row.state),
            job.document.clone(),
            job.user_name.clone(),
            format!("{}/{}", job.pages_printed, job.total_pages),
            job.submitted
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        ]);
    }
    table.render()
}

/// Human-readable capability listing for `printer inspect`.
pub fn printer_detail(p: &Printer) -> String {
    let d = &p.description;
    let mut out = format!(
        "{}\n  model: {} {}\n  state: {}\n",
        p.name,
        p.manufacturer,
        p.model,
        printer_state(&p.state)
    );
    for (key, value) in &p.tags {
        out.push_str(&format!("  {key}: {value}\n"));
    }

    let types: Vec<&str> = d
        .supported_content_type
        .iter()
        .map(|c| c.content_type.as_str())
        .collect();
    out.push_str(&format!("  content types: {}\n", types.join(", ")));

    if let Some(color) = &d.color {
        let opts = options(color.options.iter().map(|o| (format!("{:?}", o.kind), o.is_default)));
        out.push_str(&format!("  color: {opts}\n"));
    }
    if let Some(duplex) = &d.duplex {
        let opts = options(duplex.options.iter().map(|o| (format!("{:?}", o.kind), o.is_default)));
        out.push_str(&format!("  duplex: {opts}\n"));
    }
    if let Some(orientation) = &d.page_orientation {
        let opts = options(
            orientation
                .options
                .iter()
                .map(|o| (format!("{:?}", o.kind), o.is_default)),
        );
        out.push_str(&format!("  orientation: {opts}\n"));
    }
    if let Some(copies) = &d.copies {
        out.push_str(&format!(
            "  copies: default {}, max {}\n",
            copies.default, copies.max
        ));
    }
    if let Some(collate) = &d.collate {
        out.push_str(&format!("  collate: default {}\n", collate.default));
    }
    if let Some(fit) = &d.fit_to_page {
        let opts = options(fit.options.iter().map(|o| (format!("{:?}", o.kind), o.is_default)));
        out.push_str(&format!("  fit to page: {opts}\n"));
    }
    if let Some(media) = &d.media_size {
        out.push_str("  media:\n");
        let mut table = Table::new(&["ID", "NAME", "WIDTH µm", "HEIGHT µm", "DEFAULT"]);
        for m in &media.options {
            table.row(vec![
                m.vendor_id.clone(),
                m.name.clone(),
                m.width_microns.to_string(),
                m.height_microns.to_string(),
                if m.is_default { "*".into() } else { String::new() },
            ]);
        }
        for line in table.render().lines() {
            out.push_str(&format!("    {line}\n"));
        }
    }
    out
}

// "A, B*" with the default starred.
fn options(opts: impl Iterator<Item = (String, bool)>) -> String {
    opts.map(|(name, is_default)| if is_default { format!("{name}*") } else { name })
        .collect::<Vec<_>>()
        .join(", ")
}
