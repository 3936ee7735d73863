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

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fancontrol_resync::config::{DEFAULT_CONFIG_PATH, DEFAULT_PRIMARY_DEVICE};
use fancontrol_resync::hwmon::DEFAULT_HWMON_ROOT;
use fancontrol_resync::run::{run, Options, Outcome};
use fancontrol_resync::service::{SystemdUnit, DEFAULT_UNIT};

#[derive(Parser)]
#[command(name = "fancontrol-resync")]
#[command(version)]
#[command(about = "Rebind drifted hwmon identifiers in /etc/fancontrol")]
#[command(long_about = "Rebind drifted hwmon identifiers in /etc/fancontrol

The kernel numbers hwmon entries in probe order, so a reboot can leave the
identifiers recorded by pwmconfig pointing at the wrong chips and the
fancontrol service refusing to start. This tool re-resolves the recorded
device names against the live registry and, with --apply, rewrites the
configuration atomically and restarts the service.

Without --apply nothing is written; the drift is only reported.")]
struct Cli {
    /// Suppress informational output
    #[arg(short, long)]
    quiet: bool,

    /// Write the updated configuration and restart the service
    #[arg(short, long)]
    apply: bool,

    /// Print the outcome and drift report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Fancontrol configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Root of the hwmon registry
    #[arg(long, default_value = DEFAULT_HWMON_ROOT)]
    hwmon_root: PathBuf,

    /// Service unit to check and restart
    #[arg(long, default_value = DEFAULT_UNIT)]
    service: String,

    /// Name of the always-present temperature source device
    #[arg(long, default_value = DEFAULT_PRIMARY_DEVICE)]
    primary: String,
}

fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn outcome_json(outcome: &Outcome) -> serde_json::Value {
    match outcome {
        Outcome::ServiceActive => serde_json::json!({ "outcome": "service-active" }),
        Outcome::InSync => serde_json::json!({ "outcome": "in-sync" }),
        Outcome::DryRun(report) => serde_json::json!({ "outcome": "dry-run", "report": report }),
        Outcome::Applied(report) => serde_json::json!({ "outcome": "applied", "report": report }),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    // Rewriting /etc/fancontrol and restarting the unit both need root.
    if cli.apply && unsafe { libc::geteuid() } != 0 {
        eprintln!(
            "Error: --apply requires root privileges to rewrite {} and restart {}.",
            cli.config.display(),
            cli.service
        );
        std::process::exit(1);
    }

    if !cli.apply {
        info!("dry mode (use --apply to make changes)");
    }

    let opts = Options {
        config_path: cli.config,
        hwmon_root: cli.hwmon_root,
        primary_device: cli.primary,
        apply: cli.apply,
    };
    let service = SystemdUnit::new(cli.service.clone());

    match run(&opts, &service) {
        Ok(outcome) => {
            if cli.json {
                println!("{}", outcome_json(&outcome));
            }
            Ok(())
        }
        Err(err) => {
            error!("{}", err);
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "outcome": "error", "error": err.to_string() })
                );
            }
            std::process::exit(1);
        }
    }
}
