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
use std::io::Write;
use std::path::Path;

use regex::{NoExpand, Regex};
use tempfile::NamedTempFile;

use crate::error::{ResyncError, Result};

// Reserved intermediate token for the first substitution pass. Must never
// appear in a real configuration; rewrite() refuses documents that contain it.
const PLACEHOLDER: &str = "FANCONTROL_RESYNC_PLACEHOLDER";

// Identifiers are restricted to word characters so that whole-token matching
// via \b is well defined. Real hwmon identifiers are "hwmon" plus digits.
fn is_substitution_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn replace_token(text: &str, from: &str, to: &str) -> Result<String> {
    let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(from)))
        .map_err(|e| ResyncError::Rewrite(format!("pattern for '{}': {}", from, e)))?;
    Ok(pattern.replace_all(text, NoExpand(to)).into_owned())
}

/// Substitute both stale identifiers with their fresh counterparts everywhere
/// they appear as whole tokens, in three passes:
///
/// 1. `old_primary` -> placeholder
/// 2. `old_fan` -> `new_fan`
/// 3. placeholder -> `new_primary`
///
/// The detour through the placeholder keeps adversarial overlaps correct,
/// e.g. the new fan identifier being equal to the old primary one. Matching
/// is token-bounded, so `hwmon1` never touches `hwmon10`, while occurrences
/// inside path components such as `hwmon0/temp1_input` are still rewritten.
pub fn rewrite(
    doc: &str,
    old_primary: &str,
    old_fan: &str,
    new_primary: &str,
    new_fan: &str,
) -> Result<String> {
    for id in [old_primary, old_fan, new_primary, new_fan] {
        if !is_substitution_token(id) {
            return Err(ResyncError::Rewrite(format!(
                "identifier '{}' is not a plain token",
                id
            )));
        }
    }
    if old_primary == old_fan {
        return Err(ResyncError::Rewrite(format!(
            "stale identifiers collide ('{}')",
            old_primary
        )));
    }
    if new_primary == new_fan {
        return Err(ResyncError::Rewrite(format!(
            "both devices resolved to '{}'",
            new_primary
        )));
    }
    if doc.contains(PLACEHOLDER) {
        return Err(ResyncError::Rewrite(format!(
            "document already contains the reserved token '{}'",
            PLACEHOLDER
        )));
    }

    let doc = replace_token(doc, old_primary, PLACEHOLDER)?;
    let doc = replace_token(&doc, old_fan, new_fan)?;
    replace_token(&doc, PLACEHOLDER, new_primary)
}

/// Atomically replace the file at `path` with `contents`.
///
/// The text is written to a temporary file in the same directory, synced,
/// then renamed over the target. The temporary file is removed on every exit
/// path, and the live file stays untouched unless the rename succeeds.
pub fn commit(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| ResyncError::FileWrite {
        path: parent.to_path_buf(),
        source: e,
    })?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| ResyncError::FileWrite {
            path: tmp.path().to_path_buf(),
            source: e,
        })?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| ResyncError::FileWrite {
            path: tmp.path().to_path_buf(),
            source: e,
        })?;

    // Keep the target's permission bits; NamedTempFile creates mode 0600.
    if let Ok(meta) = fs::metadata(path) {
        let _ = tmp.as_file().set_permissions(meta.permissions());
    }

    tmp.persist(path).map_err(|e| ResyncError::FileWrite {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
