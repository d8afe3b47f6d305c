// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native status bitfields → normalized printer and job states.
//
// Both translations walk an ordered rule table. Every matching printer
// rule contributes its vendor-state item; a rule's state override replaces
// the state reached so far, so later rules take precedence. All overrides
// after the first rule are `Stopped`, which keeps hard faults and offline
// above merely informational bits. Job rules are first-match.

use spoolwerk_bridge::native::{job_status, printer_attribute, printer_status};
use spoolwerk_core::types::{
    CloudDeviceState, DeviceActionCauseCode, DeviceStateCauseCode, JobState, JobStateCause,
    JobStateType, LocalizedString, PrinterState, UserActionCauseCode, VendorState,
    VendorStateItem, VendorStateSeverity,
};

use VendorStateSeverity::{Error, Info, Warning};

/// One row of the printer status table.
struct PrinterStatusRule {
    /// Matches when any of these status bits is set.
    status_any: u32,
    /// ...or any of these attribute bits is set.
    attribute_any: u32,
    state: Option<CloudDeviceState>,
    item: Option<(&'static str, VendorStateSeverity, &'static str)>,
}

impl PrinterStatusRule {
    const fn stop(status_any: u32, id: &'static str, text: &'static str) -> Self {
        Self {
            status_any,
            attribute_any: 0,
            state: Some(CloudDeviceState::Stopped),
            item: Some((id, Error, text)),
        }
    }

    const fn note(
        status_any: u32,
        id: &'static str,
        severity: VendorStateSeverity,
        text: &'static str,
    ) -> Self {
        Self {
            status_any,
            attribute_any: 0,
            state: None,
            item: Some((id, severity, text)),
        }
    }

    fn matches(&self, status: u32, attributes: u32) -> bool {
        status & self.status_any != 0 || attributes & self.attribute_any != 0
    }
}

const PRINTER_STATUS_RULES: &[PrinterStatusRule] = &[
    PrinterStatusRule {
        status_any: printer_status::PRINTING | printer_status::PROCESSING,
        attribute_any: 0,
        state: Some(CloudDeviceState::Processing),
        item: None,
    },
    PrinterStatusRule {
        status_any: printer_status::PAUSED,
        attribute_any: 0,
        state: Some(CloudDeviceState::Stopped),
        item: Some(("paused", Warning, "printer paused")),
    },
    PrinterStatusRule::stop(printer_status::ERROR, "error", "printer error"),
    PrinterStatusRule::stop(
        printer_status::PENDING_DELETION,
        "pending_deletion",
        "printer is being deleted",
    ),
    PrinterStatusRule::stop(printer_status::PAPER_JAM, "paper_jam", "paper jam"),
    PrinterStatusRule::stop(printer_status::PAPER_OUT, "paper_out", "paper out"),
    PrinterStatusRule::note(printer_status::MANUAL_FEED, "manual_feed", Info, "manual feed mode"),
    PrinterStatusRule::stop(printer_status::PAPER_PROBLEM, "paper_problem", "paper problem"),
    PrinterStatusRule {
        status_any: printer_status::OFFLINE,
        attribute_any: printer_attribute::WORK_OFFLINE,
        state: Some(CloudDeviceState::Stopped),
        item: Some(("offline", Error, "printer is offline")),
    },
    PrinterStatusRule::note(printer_status::IO_ACTIVE, "io_active", Info, "active I/O state"),
    PrinterStatusRule::note(printer_status::BUSY, "busy", Info, "busy"),
    PrinterStatusRule::stop(
        printer_status::OUTPUT_BIN_FULL,
        "output_bin_full",
        "output bin is full",
    ),
    PrinterStatusRule::stop(
        printer_status::NOT_AVAILABLE,
        "not_available",
        "printer not available",
    ),
    PrinterStatusRule::note(printer_status::WAITING, "waiting", Error, "waiting"),
    PrinterStatusRule::note(printer_status::INITIALIZING, "initializing", Info, "initializing"),
    PrinterStatusRule::note(printer_status::WARMING_UP, "warming_up", Info, "warming up"),
    PrinterStatusRule::note(printer_status::TONER_LOW, "toner_low", Warning, "toner low"),
    PrinterStatusRule::stop(printer_status::NO_TONER, "no_toner", "no toner"),
    PrinterStatusRule::stop(
        printer_status::PAGE_PUNT,
        "page_punt",
        "cannot print the current page",
    ),
    PrinterStatusRule::stop(
        printer_status::USER_INTERVENTION,
        "user_intervention",
        "user intervention required",
    ),
    PrinterStatusRule::stop(printer_status::OUT_OF_MEMORY, "out_of_memory", "out of memory"),
    PrinterStatusRule::stop(printer_status::DOOR_OPEN, "door_open", "door open"),
    PrinterStatusRule::note(
        printer_status::SERVER_UNKNOWN,
        "server_unknown",
        Error,
        "printer status unknown",
    ),
    PrinterStatusRule::note(printer_status::POWER_SAVE, "power_save", Info, "power save mode"),
];

/// Translate native printer status and attribute bits.
///
/// Pure: identical inputs always give identical output. The vendor-state
/// list is `None` when no rule contributed an item.
pub fn printer_state(status: u32, attributes: u32) -> PrinterState {
    let mut state = CloudDeviceState::Idle;
    let mut items = Vec::new();

    for rule in PRINTER_STATUS_RULES
        .iter()
        .filter(|r| r.matches(status, attributes))
    {
        if let Some(next) = rule.state {
            state = next;
        }
        if let Some((id, severity, text)) = rule.item {
            items.push(VendorStateItem {
                id: id.to_string(),
                severity,
                description: LocalizedString::new(text),
            });
        }
    }

    PrinterState {
        state,
        vendor_state: if items.is_empty() {
            None
        } else {
            Some(VendorState { items })
        },
    }
}

/// Which native job bitfields a rule accepts.
enum JobStatusMatch {
    AnyOf(u32),
    /// No bits at all.
    Empty,
}

struct JobStatusRule {
    matches: &'static [JobStatusMatch],
    state: JobState,
}

const fn state(kind: JobStateType, cause: Option<JobStateCause>) -> JobState {
    JobState { kind, cause }
}

// A paused job maps to done, same as a completed one. The two are
// different outcomes; kept as is pending product review.
const JOB_STATUS_RULES: &[JobStatusRule] = &[
    JobStatusRule {
        matches: &[JobStatusMatch::AnyOf(job_status::SPOOLING | job_status::PRINTING)],
        state: state(JobStateType::InProgress, None),
    },
    JobStatusRule {
        matches: &[JobStatusMatch::AnyOf(job_status::PRINTED | job_status::COMPLETE)],
        state: state(JobStateType::Done, None),
    },
    JobStatusRule {
        matches: &[JobStatusMatch::AnyOf(job_status::PAUSED), JobStatusMatch::Empty],
        state: state(JobStateType::Done, None),
    },
    JobStatusRule {
        matches: &[JobStatusMatch::AnyOf(job_status::ERROR)],
        state: state(
            JobStateType::Aborted,
            Some(JobStateCause::DeviceAction(DeviceActionCauseCode::PrintFailure)),
        ),
    },
    JobStatusRule {
        matches: &[JobStatusMatch::AnyOf(job_status::DELETING | job_status::DELETED)],
        state: state(
            JobStateType::Aborted,
            Some(JobStateCause::UserAction(UserActionCauseCode::Canceled)),
        ),
    },
    JobStatusRule {
        matches: &[JobStatusMatch::AnyOf(
            job_status::OFFLINE
                | job_status::PAPEROUT
                | job_status::BLOCKED_DEVQ
                | job_status::USER_INTERVENTION,
        )],
        state: state(
            JobStateType::Stopped,
            Some(JobStateCause::DeviceState(DeviceStateCauseCode::Other)),
        ),
    },
];

/// Anything no rule recognises. Aborting keeps an unknown job from
/// blocking the queue forever.
const UNKNOWN_JOB_STATE: JobState = state(
    JobStateType::Aborted,
    Some(JobStateCause::DeviceAction(DeviceActionCauseCode::Other)),
);

/// Translate native job status bits.
pub fn job_state(status: u32) -> JobState {
    JOB_STATUS_RULES
        .iter()
        .find(|rule| {
            rule.matches.iter().any(|m| match m {
                JobStatusMatch::AnyOf(mask) => status & mask != 0,
                JobStatusMatch::Empty => status == 0,
            })
        })
        .map(|rule| rule.state)
        .unwrap_or(UNKNOWN_JOB_STATE)
}

/// State reported for a job the spooler no longer knows about.
pub fn vanished_job_state() -> JobState {
    UNKNOWN_JOB_STATE
}
