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

use std::io;
use std::path::PathBuf;

/// Result type alias using ResyncError
pub type Result<T> = std::result::Result<T, ResyncError>;

/// Unified error type for all resync operations
#[derive(thiserror::Error, Debug)]
pub enum ResyncError {
    #[error("empty device name")]
    EmptyDeviceName,

    #[error("no hwmon entry named '{device}' under {}", root.display())]
    DeviceNotFound { device: String, root: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    FileRead { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    FileWrite { path: PathBuf, source: io::Error },

    #[error("invalid configuration: {0}")]
    Parse(String),

    #[error("rewrite refused: {0}")]
    Rewrite(String),

    #[error("service control failed: {0}")]
    Service(String),
}
