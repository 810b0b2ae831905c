// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use internal_error::ResultIntoInternal;
use warden_accounts_services::DeactivateUnauthorizedUsersJob;

use super::{CLIError, Command};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct RunCommand {
    job: Arc<DeactivateUnauthorizedUsersJob>,
}

impl RunCommand {
    pub fn new(job: Arc<DeactivateUnauthorizedUsersJob>) -> Self {
        Self { job }
    }
}

#[async_trait::async_trait(?Send)]
impl Command for RunCommand {
    async fn run(&mut self) -> Result<(), CLIError> {
        tokio::select! {
            () = self.job.run_loop() => {}
            res = tokio::signal::ctrl_c() => {
                res.int_err()?;
                tracing::info!("Interrupted, shutting down");
            }
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
