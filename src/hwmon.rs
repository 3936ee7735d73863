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

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{ResyncError, Result};

/// Default registry root on Linux.
pub const DEFAULT_HWMON_ROOT: &str = "/sys/class/hwmon";

fn read_trimmed<P: AsRef<Path>>(p: P) -> io::Result<String> {
    let mut s = String::new();
    fs::File::open(p)?.read_to_string(&mut s)?;
    Ok(s.trim().to_string())
}

/// Find the hwmon identifier (e.g. "hwmon3") currently bound to a device name.
///
/// Each entry under `root` exposes its driver name in a `name` attribute; some
/// chips only report it through the nested `device/name` attribute, so that is
/// checked as a fallback. The first entry whose declared name matches wins;
/// enumeration order is whatever the kernel hands out.
pub fn resolve_device(root: &Path, device_name: &str) -> Result<String> {
    if device_name.is_empty() {
        return Err(ResyncError::EmptyDeviceName);
    }

    let entries = fs::read_dir(root).map_err(|e| ResyncError::FileRead {
        path: root.to_path_buf(),
        source: e,
    })?;

    for ent in entries.flatten() {
        let dir = ent.path();
        if !dir.is_dir() {
            continue;
        }
        let Some(id) = dir.file_name().and_then(|s| s.to_str()) else {
            continue;
        };

        if let Ok(name) = read_trimmed(dir.join("name")) {
            if name == device_name {
                return Ok(id.to_string());
            }
        }

        if let Ok(name) = read_trimmed(dir.join("device").join("name")) {
            if name == device_name {
                return Ok(id.to_string());
            }
        }
    }

    Err(ResyncError::DeviceNotFound {
        device: device_name.to_string(),
        root: root.to_path_buf(),
    })
}
