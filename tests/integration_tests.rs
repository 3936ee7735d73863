/*
 * Integration tests for fancontrol-resync
 *
 * These tests drive the whole run path over temp-dir fixtures: a mock hwmon
 * registry, a pwmconfig-style configuration file, and a counting stand-in
 * for the service collaborator.
 */

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use fancontrol_resync::error::{ResyncError, Result};
use fancontrol_resync::rewrite::rewrite;
use fancontrol_resync::run::{run, Options, Outcome};
use fancontrol_resync::service::ServiceControl;

const SAMPLE_CONFIG: &str = "\
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

/// Service stand-in counting restarts; the run logic only sees the trait.
struct CountingService {
    active: bool,
    fail_restart: bool,
    restarts: Cell<u32>,
}

impl CountingService {
    fn inactive() -> Self {
        Self {
            active: false,
            fail_restart: false,
            restarts: Cell::new(0),
        }
    }

    fn active() -> Self {
        Self {
            active: true,
            ..Self::inactive()
        }
    }

    fn failing() -> Self {
        Self {
            fail_restart: true,
            ..Self::inactive()
        }
    }
}

impl ServiceControl for CountingService {
    fn is_active(&self) -> bool {
        self.active
    }

    fn restart(&self) -> Result<()> {
        self.restarts.set(self.restarts.get() + 1);
        if self.fail_restart {
            Err(ResyncError::Service("simulated restart failure".to_string()))
        } else {
            Ok(())
        }
    }
}

fn mock_hwmon_root(entries: &[(&str, &str)]) -> TempDir {
    let root = TempDir::new().unwrap();
    for (id, name) in entries {
        let dir = root.path().join(id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("name"), format!("{}\n", name)).unwrap();
    }
    root
}

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("fancontrol");
    fs::write(&path, contents).unwrap();
    path
}

fn options(config: PathBuf, hwmon_root: PathBuf, apply: bool) -> Options {
    Options {
        config_path: config,
        hwmon_root,
        primary_device: "coretemp".to_string(),
        apply,
    }
}

#[test]
fn drifted_configuration_is_rewritten_and_the_service_restarted_once() {
    let hwmon = mock_hwmon_root(&[("hwmon2", "coretemp"), ("hwmon5", "nct6775")]);
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, SAMPLE_CONFIG);

    let service = CountingService::inactive();
    let opts = options(config.clone(), hwmon.path().to_path_buf(), true);
    let outcome = run(&opts, &service).unwrap();
    assert!(matches!(outcome, Outcome::Applied(_)));
    assert_eq!(service.restarts.get(), 1);

    let expected = "\
# Configuration file generated by pwmconfig, changes will be lost
INTERVAL=10
DEVPATH=hwmon2=devices/platform/coretemp.0 hwmon5=devices/platform/nct6775.656
DEVNAME=hwmon2=coretemp hwmon5=nct6775
FCTEMPS=hwmon5/pwm2=hwmon2/temp1_input
FCFANS=hwmon5/pwm2=hwmon5/fan2_input
MINTEMP=hwmon5/pwm2=40
MAXTEMP=hwmon5/pwm2=70
MINSTART=hwmon5/pwm2=51
MINSTOP=hwmon5/pwm2=31
";
    assert_eq!(fs::read_to_string(&config).unwrap(), expected);

    // No temporary artifacts next to the configuration.
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn current_identifiers_are_a_no_op() {
    let hwmon = mock_hwmon_root(&[("hwmon0", "coretemp"), ("hwmon3", "nct6775")]);
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, SAMPLE_CONFIG);

    let service = CountingService::inactive();
    let opts = options(config.clone(), hwmon.path().to_path_buf(), true);
    let outcome = run(&opts, &service).unwrap();
    assert!(matches!(outcome, Outcome::InSync));
    assert_eq!(service.restarts.get(), 0);
    assert_eq!(fs::read_to_string(&config).unwrap(), SAMPLE_CONFIG);
}

#[test]
fn dry_run_reports_but_never_writes_or_restarts() {
    let hwmon = mock_hwmon_root(&[("hwmon2", "coretemp"), ("hwmon5", "nct6775")]);
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, SAMPLE_CONFIG);

    let service = CountingService::inactive();
    let opts = options(config.clone(), hwmon.path().to_path_buf(), false);
    let Outcome::DryRun(report) = run(&opts, &service).unwrap() else {
        panic!("expected a dry-run outcome");
    };
    assert!(report.has_drifted());
    assert_eq!(service.restarts.get(), 0);
    assert_eq!(fs::read_to_string(&config).unwrap(), SAMPLE_CONFIG);
}

#[test]
fn running_service_means_no_work_at_all() {
    let service = CountingService::active();
    // Deliberately broken paths: the run must bail out before touching them.
    let opts = options(
        PathBuf::from("/nonexistent/fancontrol"),
        PathBuf::from("/nonexistent/hwmon"),
        true,
    );
    let outcome = run(&opts, &service).unwrap();
    assert!(matches!(outcome, Outcome::ServiceActive));
    assert_eq!(service.restarts.get(), 0);
}

#[test]
fn failure_mid_sequence_leaves_the_file_byte_identical() {
    // The fan identifier recorded in the file is not a plain token, so the
    // substitution sequence fails after resolution but before any write.
    let broken = "DEVNAME=hwmon0=coretemp bad-id=nct6775\nFCTEMPS=bad-id/pwm2=hwmon0/temp1_input\n";
    let hwmon = mock_hwmon_root(&[("hwmon2", "coretemp"), ("hwmon5", "nct6775")]);
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, broken);

    let service = CountingService::inactive();
    let opts = options(config.clone(), hwmon.path().to_path_buf(), true);
    let err = run(&opts, &service).unwrap_err();
    assert!(matches!(err, ResyncError::Rewrite(_)));
    assert_eq!(service.restarts.get(), 0);

    assert_eq!(fs::read_to_string(&config).unwrap(), broken);
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "no temporary artifacts may remain");
}

#[test]
fn restart_failure_surfaces_after_the_commit() {
    let hwmon = mock_hwmon_root(&[("hwmon2", "coretemp"), ("hwmon5", "nct6775")]);
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, SAMPLE_CONFIG);

    let service = CountingService::failing();
    let opts = options(config.clone(), hwmon.path().to_path_buf(), true);
    let err = run(&opts, &service).unwrap_err();
    assert!(matches!(err, ResyncError::Service(_)));
    assert_eq!(service.restarts.get(), 1);

    // The configuration keeps the fresh identifiers; only the restart failed.
    let updated = fs::read_to_string(&config).unwrap();
    assert!(updated.contains("DEVNAME=hwmon2=coretemp hwmon5=nct6775"));
}

#[test]
fn colliding_swap_rewrites_without_corruption() {
    // new primary == old fan: the naive two-pass substitution would fold
    // every original A into C. The three-pass scheme must not.
    let doc = "DEVNAME=A=coretemp B=nct6775\nFCTEMPS=B/pwm1=A/temp1_input\n";
    let out = rewrite(doc, "A", "B", "B", "C").unwrap();
    assert_eq!(
        out,
        "DEVNAME=B=coretemp C=nct6775\nFCTEMPS=C/pwm1=B/temp1_input\n"
    );
}

#[test]
fn identifier_prefixes_are_never_rewritten() {
    let doc = "DEVNAME=hwmon1=coretemp hwmon10=nct6775\nFCTEMPS=hwmon10/pwm2=hwmon1/temp1_input\n";
    let out = rewrite(doc, "hwmon1", "hwmon10", "hwmon3", "hwmon12").unwrap();
    assert_eq!(
        out,
        "DEVNAME=hwmon3=coretemp hwmon12=nct6775\nFCTEMPS=hwmon12/pwm2=hwmon3/temp1_input\n"
    );
}
