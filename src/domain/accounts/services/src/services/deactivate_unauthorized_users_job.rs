// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use dill::*;
use internal_error::InternalError;
use time_source::SystemTimeSource;
use warden_accounts::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Periodically runs the [`AuthorizationSweeper`]
pub struct DeactivateUnauthorizedUsersJob {
    sweeper: Arc<dyn AuthorizationSweeper>,
    time_source: Arc<dyn SystemTimeSource>,
    sweep_config: Arc<SweepConfig>,
}

#[component(pub)]
#[scope(Singleton)]
impl DeactivateUnauthorizedUsersJob {
    pub fn new(
        sweeper: Arc<dyn AuthorizationSweeper>,
        time_source: Arc<dyn SystemTimeSource>,
        sweep_config: Arc<SweepConfig>,
    ) -> Self {
        Self {
            sweeper,
            time_source,
            sweep_config,
        }
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        name = "DeactivateUnauthorizedUsersJob::run_once"
    )]
    pub async fn run_once(&self) -> Result<SweepSummary, InternalError> {
        self.sweeper.run().await
    }

    /// Runs sweeps forever, pausing for the configured interval after each
    /// one. A failed sweep is logged and retried on the next tick.
    pub async fn run_loop(&self) {
        tracing::info!(
            job_name = JOB_WARDEN_ACCOUNTS_DEACTIVATE_UNAUTHORIZED_USERS,
            interval = ?self.sweep_config.interval,
            "Starting periodic authorization sweeps"
        );

        loop {
            if let Err(e) = self.run_once().await {
                tracing::error!(
                    error = ?e,
                    error_msg = %e.reason(),
                    "Authorization sweep failed"
                );
            }

            self.time_source.sleep(self.sweep_config.interval).await;
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
