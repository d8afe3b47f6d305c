// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Data directory resolution.

use std::ffi::OsString;
use std::path::PathBuf;

const APP_DIR: &str = "spoolwerk";

/// Where `config.json` lives. Not created until something is written.
pub fn data_dir() -> PathBuf {
    resolve(std::env::var_os("XDG_DATA_HOME"), std::env::var_os("HOME"))
}

/// Like [`data_dir`], but makes sure the directory exists.
pub fn ensure_data_dir() -> std::io::Result<PathBuf> {
    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

// XDG data dir, then ~/.local/share, then the system temp dir.
fn resolve(xdg: Option<OsString>, home: Option<OsString>) -> PathBuf {
    let base = match (xdg, home) {
        (Some(xdg), _) if !xdg.is_empty() => PathBuf::from(xdg),
        (_, Some(home)) if !home.is_empty() => PathBuf::from(home).join(".local").join("share"),
        _ => std::env::temp_dir(),
    };
    base.join(APP_DIR)
}
