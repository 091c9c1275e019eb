// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware config location.

use std::path::PathBuf;

const CONFIG_FILE: &str = "pitchwire.json";

/// Default config path: `$XDG_CONFIG_HOME/pitchwire/pitchwire.json`, falling
/// back to `~/.config`. The directory is not created; a missing file just
/// means defaults.
pub fn default_config_path() -> PathBuf {
    config_base().join("pitchwire").join(CONFIG_FILE)
}

fn config_base() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config");
    }
    PathBuf::from("/tmp")
}
