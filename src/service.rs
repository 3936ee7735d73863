/*
 * This file is part of fancontrol-resync.
 *
 * Copyright (C) 2025 fancontrol-resync contributors
 *
 * fancontrol-resync is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * fancontrol-resync is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with fancontrol-resync. If not, see <https://www.gnu.org/licenses/>.
 */

use std::process::Command;

use crate::error::{ResyncError, Result};

/// Unit this tool exists to keep healthy.
pub const DEFAULT_UNIT: &str = "fancontrol.service";

/// Seam over the init system so the run logic can be tested without one.
#[cfg_attr(test, mockall::automock)]
pub trait ServiceControl {
    /// Whether the unit is currently running.
    fn is_active(&self) -> bool;

    /// Restart the unit after a successful rewrite.
    fn restart(&self) -> Result<()>;
}

/// systemd-backed implementation.
pub struct SystemdUnit {
    unit: String,
}

impl SystemdUnit {
    pub fn new(unit: impl Into<String>) -> Self {
        Self { unit: unit.into() }
    }
}

impl ServiceControl for SystemdUnit {
    fn is_active(&self) -> bool {
        Command::new("systemctl")
            .args(["is-active", "--quiet", self.unit.as_str()])
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn restart(&self) -> Result<()> {
        let status = Command::new("systemctl")
            .args(["restart", self.unit.as_str()])
            .status()
            .map_err(|e| {
                ResyncError::Service(format!("failed to run systemctl restart {}: {}", self.unit, e))
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(ResyncError::Service(format!(
                "systemctl restart {} exited with {}",
                self.unit, status
            )))
        }
    }
}
