// SPDX-License-Identifier: GPL-3.0-only

//! Host share capability
//!
//! Sharing hands the exported artifact to the system's open handler. The
//! capability is probed once at startup and injected into the booth;
//! when the probe fails the share action is hidden entirely instead of
//! failing at invocation time.

use std::path::Path;
use tracing::{info, warn};

/// Result of probing the host for a share handler.
///
/// Separates "handler exists" from "we may use it" so the UI can hide the
/// action rather than surface a runtime error.
#[derive(Debug, Clone)]
pub struct ShareCapability {
    available: bool,
}

impl ShareCapability {
    /// Probe the host for a usable open/share handler
    ///
    /// On Linux this means an XDG-style opener on PATH; other platforms
    /// ship a system handler with the OS.
    pub fn detect() -> ShareCapability {
        let available = if cfg!(target_os = "linux") {
            let found = ["xdg-open", "gio", "gnome-open", "kde-open"]
                .iter()
                .any(|bin| binary_on_path(bin));
            if !found {
                warn!("No XDG open handler found, share action disabled");
            }
            found
        } else {
            true
        };

        if available {
            info!("Share handler available");
        }
        ShareCapability { available }
    }

    /// Capability absent; used by tests and headless runs
    pub fn unsupported() -> ShareCapability {
        ShareCapability { available: false }
    }

    /// Whether the share action may be offered
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Hand a saved artifact to the host handler
    ///
    /// Must not be called when the capability is unavailable; callers gate
    /// on [`Self::is_available`] first.
    pub fn share_file(&self, path: &Path) -> Result<(), String> {
        if !self.available {
            return Err("Sharing is not supported on this system".to_string());
        }
        open::that_detached(path).map_err(|e| format!("Share handler failed: {}", e))
    }
}

fn binary_on_path(name: &str) -> bool {
    let Ok(path_var) = std::env::var("PATH") else {
        return false;
    };
    std::env::split_paths(&path_var).any(|dir| dir.join(name).is_file())
}
