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

use serde::Serialize;

use crate::config::DeviceBinding;

/// True when either identifier changed between the recorded and the freshly
/// resolved binding for its role. Identical identifiers on both roles mean
/// the configuration is current, whatever else the document contains.
pub fn has_drifted(old_primary: &str, old_fan: &str, new_primary: &str, new_fan: &str) -> bool {
    old_primary != new_primary || old_fan != new_fan
}

/// Old and new identifier for one device role.
#[derive(Debug, Clone, Serialize)]
pub struct BindingChange {
    pub device: String,
    pub old: String,
    pub new: String,
}

impl BindingChange {
    pub fn new(recorded: &DeviceBinding, resolved: &str) -> Self {
        Self {
            device: recorded.device.clone(),
            old: recorded.hwmon.clone(),
            new: resolved.to_string(),
        }
    }
}

/// Per-role drift rows, printable as `coretemp: hwmon0 -> hwmon2` and
/// serializable for `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct DriftReport {
    pub primary: BindingChange,
    pub fan: BindingChange,
}

impl DriftReport {
    pub fn has_drifted(&self) -> bool {
        has_drifted(
            &self.primary.old,
            &self.fan.old,
            &self.primary.new,
            &self.fan.new,
        )
    }
}
