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
use std::path::PathBuf;

use tracing::info;

use crate::config::read_bindings;
use crate::drift::{BindingChange, DriftReport};
use crate::error::{ResyncError, Result};
use crate::hwmon::resolve_device;
use crate::rewrite;
use crate::service::ServiceControl;

/// Everything a run needs, passed in explicitly.
#[derive(Debug, Clone)]
pub struct Options {
    pub config_path: PathBuf,
    pub hwmon_root: PathBuf,
    pub primary_device: String,
    pub apply: bool,
}

/// What a run ended up doing. Every variant maps to exit code 0.
#[derive(Debug)]
pub enum Outcome {
    /// The service is running, so the recorded identifiers are good.
    ServiceActive,
    /// The recorded identifiers match the registry.
    InSync,
    /// Drift found, but apply mode was off.
    DryRun(DriftReport),
    /// Configuration rewritten and the service restarted.
    Applied(DriftReport),
}

/// The single control path: check the service, read the recorded bindings,
/// re-resolve both devices, and rewrite + restart only on drift in apply
/// mode. Any error before the commit leaves the live configuration
/// untouched; a restart failure surfaces after the commit and the
/// configuration is not rolled back.
pub fn run(opts: &Options, service: &dyn ServiceControl) -> Result<Outcome> {
    if service.is_active() {
        info!("service is already active, nothing to do");
        return Ok(Outcome::ServiceActive);
    }

    let contents = fs::read_to_string(&opts.config_path).map_err(|e| ResyncError::FileRead {
        path: opts.config_path.clone(),
        source: e,
    })?;
    let recorded = read_bindings(&contents, &opts.primary_device)?;

    let new_primary = resolve_device(&opts.hwmon_root, &recorded.primary.device)?;
    let new_fan = resolve_device(&opts.hwmon_root, &recorded.fan.device)?;

    let report = DriftReport {
        primary: BindingChange::new(&recorded.primary, &new_primary),
        fan: BindingChange::new(&recorded.fan, &new_fan),
    };
    info!(
        "{}: {} -> {}",
        report.primary.device, report.primary.old, report.primary.new
    );
    info!("{}: {} -> {}", report.fan.device, report.fan.old, report.fan.new);

    if !report.has_drifted() {
        info!("hwmon assignments are current, nothing to do");
        return Ok(Outcome::InSync);
    }

    if !opts.apply {
        info!("leaving {} untouched", opts.config_path.display());
        return Ok(Outcome::DryRun(report));
    }

    let updated = rewrite::rewrite(
        &contents,
        &recorded.primary.hwmon,
        &recorded.fan.hwmon,
        &new_primary,
        &new_fan,
    )?;
    rewrite::commit(&opts.config_path, &updated)?;
    info!("updated hwmon assignments in {}", opts.config_path.display());

    service.restart()?;
    info!("service restarted");

    Ok(Outcome::Applied(report))
}
