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

use crate::error::{ResyncError, Result};

/// Default configuration file written by pwmconfig.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/fancontrol";

/// Key of the assignment line that maps hwmon identifiers to device names.
pub const DEVNAME_KEY: &str = "DEVNAME";

/// Name of the always-present temperature source device.
pub const DEFAULT_PRIMARY_DEVICE: &str = "coretemp";

/// One device name bound to a hwmon identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceBinding {
    pub device: String,
    pub hwmon: String,
}

/// The two bindings a fancontrol configuration records: the primary
/// temperature source and the fan controller chip. The fan device name is
/// not known in advance; it is whatever the DEVNAME line says it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigBindings {
    pub primary: DeviceBinding,
    pub fan: DeviceBinding,
}

/// Extract the recorded bindings from the configuration text.
///
/// Exactly one `DEVNAME=` line must exist, holding whitespace-separated
/// `identifier=name` tokens. The token naming `primary_device` becomes the
/// primary binding; the first other token becomes the fan binding.
pub fn read_bindings(contents: &str, primary_device: &str) -> Result<ConfigBindings> {
    let mut assignments: Option<&str> = None;
    for line in contents.lines() {
        if let Some(rest) = line.strip_prefix(DEVNAME_KEY) {
            if let Some(rest) = rest.strip_prefix('=') {
                if assignments.is_some() {
                    return Err(ResyncError::Parse(format!(
                        "more than one {} line",
                        DEVNAME_KEY
                    )));
                }
                assignments = Some(rest.trim());
            }
        }
    }
    let assignments = assignments
        .ok_or_else(|| ResyncError::Parse(format!("no {} line found", DEVNAME_KEY)))?;

    let mut primary: Option<DeviceBinding> = None;
    let mut fan: Option<DeviceBinding> = None;

    for token in assignments.split_whitespace() {
        let Some((hwmon, device)) = token.split_once('=') else {
            return Err(ResyncError::Parse(format!(
                "malformed assignment '{}' (expected identifier=name)",
                token
            )));
        };
        if hwmon.is_empty() || device.is_empty() {
            return Err(ResyncError::Parse(format!(
                "malformed assignment '{}' (expected identifier=name)",
                token
            )));
        }

        if device == primary_device {
            if primary.is_some() {
                return Err(ResyncError::Parse(format!(
                    "'{}' assigned more than once",
                    primary_device
                )));
            }
            primary = Some(DeviceBinding {
                device: device.to_string(),
                hwmon: hwmon.to_string(),
            });
        } else if fan.is_none() {
            fan = Some(DeviceBinding {
                device: device.to_string(),
                hwmon: hwmon.to_string(),
            });
        }
    }

    let primary = primary.ok_or_else(|| {
        ResyncError::Parse(format!(
            "no '{}' assignment in {} line",
            primary_device, DEVNAME_KEY
        ))
    })?;
    let fan = fan.ok_or_else(|| {
        ResyncError::Parse(format!("no fan device assignment in {} line", DEVNAME_KEY))
    })?;

    // Shared identifiers would make the later substitution ambiguous.
    if primary.hwmon == fan.hwmon {
        return Err(ResyncError::Parse(format!(
            "'{}' and '{}' share the identifier '{}'",
            primary.device, fan.device, primary.hwmon
        )));
    }

    Ok(ConfigBindings { primary, fan })
}
