/*
 * Test utilities for fancontrol-resync
 *
 * Fixture helpers shared by the unit test modules: a mock hwmon registry
 * built inside a TempDir and a realistic pwmconfig-style document.
 */

use std::fs;

use tempfile::TempDir;

/// A pwmconfig-generated document recording coretemp on hwmon0 and the
/// nct6775 fan controller on hwmon3, with the identifiers also appearing
/// as path components in the channel lines.
pub const SAMPLE_CONFIG: &str = "\
# Configuration file generated by pwmconfig, changes will be lost
INTERVAL=10
DEVPATH=hwmon0=devices/platform/coretemp.0 hwmon3=devices/platform/nct6775.656
DEVNAME=hwmon0=coretemp hwmon3=nct6775
FCTEMPS=hwmon3/pwm2=hwmon0/temp1_input
FCFANS=hwmon3/pwm2=hwmon3/fan2_input
MINTEMP=hwmon3/pwm2=40
MAXTEMP=hwmon3/pwm2=70
MINSTART=hwmon3/pwm2=51
MINSTOP=hwmon3/pwm2=31
";

/// Build a mock hwmon registry. Each entry is (identifier, `name` attribute,
/// nested `device/name` attribute); `None` leaves the attribute out.
pub fn create_mock_hwmon_root(entries: &[(&str, Option<&str>, Option<&str>)]) -> TempDir {
    let root = TempDir::new().unwrap();
    for (id, name, device_name) in entries {
        let dir = root.path().join(id);
        fs::create_dir_all(&dir).unwrap();
        if let Some(n) = name {
            fs::write(dir.join("name"), format!("{}\n", n)).unwrap();
        }
        if let Some(n) = device_name {
            let device = dir.join("device");
            fs::create_dir_all(&device).unwrap();
            fs::write(device.join("name"), format!("{}\n", n)).unwrap();
        }
    }
    root
}
