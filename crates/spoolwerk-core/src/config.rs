// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::semaphore::DEFAULT_NATIVE_JOB_QUEUE_SIZE;

/// File name of the persisted config inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Persistent application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Concurrent native jobs allowed per printer.
    pub native_job_queue_size: usize,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Default output format for command results.
    pub output: OutputFormat,
    /// Prefix for generated job titles.
    pub job_title_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            native_job_queue_size: DEFAULT_NATIVE_JOB_QUEUE_SIZE,
            log_filter: "info".to_string(),
            output: OutputFormat::Table,
            job_title_prefix: "spoolwerk".to_string(),
        }
    }
}

impl AppConfig {
    /// Load `config.json` from `dir`. Missing or unreadable files yield `None`.
    pub fn load(dir: &Path) -> Option<Self> {
        let data = std::fs::read_to_string(dir.join(CONFIG_FILE)).ok()?;
        serde_json::from_str(&data).ok()
    }

    /// Write the config as pretty JSON into `dir`.
    pub fn persist(&self, dir: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(dir.join(CONFIG_FILE), json)?;
        Ok(())
    }

    /// Generate a title like `spoolwerk-3f9a1c0d` for untitled jobs.
    pub fn job_title(&self) -> String {
        let id = Uuid::new_v4().simple().to_string();
        format!("{}-{}", self.job_title_prefix, &id[..8])
    }
}
