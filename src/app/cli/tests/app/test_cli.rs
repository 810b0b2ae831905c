// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use clap::Parser as _;
use pretty_assertions::assert_eq;
use warden_accounts::SweepSummary;
use warden_cli::cli::{Cli, Command};
use warden_cli::commands::format_summary;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_parse_sweep_with_options() {
    let cli =
        Cli::try_parse_from(["warden", "-vv", "--config", "/etc/warden.yaml", "sweep"]).unwrap();

    assert_eq!(cli.verbose, 2);
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/etc/warden.yaml"))
    );
    assert!(matches!(cli.command, Command::Sweep));
}

#[test]
fn test_parse_run_without_options() {
    let cli = Cli::try_parse_from(["warden", "run"]).unwrap();

    assert_eq!(cli.verbose, 0);
    assert_eq!(cli.config, None);
    assert!(matches!(cli.command, Command::Run));
}

#[test]
fn test_subcommand_is_required() {
    assert!(Cli::try_parse_from(["warden"]).is_err());
    assert!(Cli::try_parse_from(["warden", "purge"]).is_err());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_format_summary() {
    console::set_colors_enabled(false);

    assert_eq!(
        format_summary(&SweepSummary {
            checked: 3,
            kept_active: 1,
            deactivated: 2,
            ..SweepSummary::default()
        }),
        "Checked 3 user(s): 1 kept active, 2 deactivated"
    );
    assert_eq!(
        format_summary(&SweepSummary {
            checked: 2,
            kept_active: 1,
            failed: 1,
            ..SweepSummary::default()
        }),
        "Checked 2 user(s): 1 kept active, 0 deactivated, 1 failed"
    );
    assert_eq!(
        format_summary(&SweepSummary::skipped()),
        "Sweep skipped: another one is in progress"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
