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

//! fancontrol-resync - rebind drifted hwmon identifiers in /etc/fancontrol
//!
//! The kernel assigns hwmonN numbers in probe order, so a reboot can leave
//! the identifiers recorded in the fancontrol configuration pointing at the
//! wrong chips. This crate re-resolves the recorded device names against
//! /sys/class/hwmon, and on drift rewrites the configuration atomically and
//! restarts the service.

pub mod config;
pub mod drift;
pub mod error;
pub mod hwmon;
pub mod rewrite;
pub mod run;
pub mod service;

#[cfg(test)]
pub mod test_utils;
