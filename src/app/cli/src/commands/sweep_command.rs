// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use console::style;
use warden_accounts::SweepSummary;
use warden_accounts_services::DeactivateUnauthorizedUsersJob;

use super::{CLIError, Command};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct SweepCommand {
    job: Arc<DeactivateUnauthorizedUsersJob>,
}

impl SweepCommand {
    pub fn new(job: Arc<DeactivateUnauthorizedUsersJob>) -> Self {
        Self { job }
    }
}

#[async_trait::async_trait(?Send)]
impl Command for SweepCommand {
    async fn run(&mut self) -> Result<(), CLIError> {
        let summary = self.job.run_once().await?;

        println!("{}", format_summary(&summary));

        Ok(())
    }
}

pub fn format_summary(summary: &SweepSummary) -> String {
    if summary.skipped {
        return format!("{}", style("Sweep skipped: another one is in progress").yellow());
    }

    let mut line = format!(
        "Checked {} user(s): {} kept active, {} deactivated",
        summary.checked,
        style(summary.kept_active).green(),
        style(summary.deactivated).red(),
    );
    if summary.failed > 0 {
        line.push_str(&format!(", {} failed", style(summary.failed).yellow().bold()));
    }
    line
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
