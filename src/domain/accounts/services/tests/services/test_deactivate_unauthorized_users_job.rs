// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use pretty_assertions::assert_eq;
use warden_accounts::*;
use warden_accounts_services::DeactivateUnauthorizedUsersJob;

use crate::utils::SweeperHarness;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_run_once_sweeps_users() {
    let harness = SweeperHarness::new(MockOAuth2ProviderClient::new());
    let alice = harness.add_user(1, "alice").await;

    let job = harness
        .catalog
        .get_one::<DeactivateUnauthorizedUsersJob>()
        .unwrap();
    let summary = job.run_once().await.unwrap();

    assert_eq!(
        summary,
        SweepSummary {
            checked: 1,
            deactivated: 1,
            ..SweepSummary::default()
        }
    );
    assert!(!harness.is_active(&alice).await);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_run_loop_sweeps_on_interval() {
    let harness = SweeperHarness::new(MockOAuth2ProviderClient::new());
    let alice = harness.add_user(1, "alice").await;

    let job = harness
        .catalog
        .get_one::<DeactivateUnauthorizedUsersJob>()
        .unwrap();
    let job_handle = tokio::spawn(async move { job.run_loop().await });

    // First sweep happens right away
    wait_for_next_sleep(&harness).await;
    assert!(!harness.is_active(&alice).await);

    let bob = harness.add_user(2, "bob").await;

    harness.time_source.advance(chrono::Duration::minutes(4));
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert_eq!(harness.time_source.sleepers_count(), 1);
    assert!(harness.is_active(&bob).await);

    harness.time_source.advance(chrono::Duration::minutes(1));
    wait_for_next_sleep(&harness).await;
    assert!(!harness.is_active(&bob).await);

    job_handle.abort();
}

async fn wait_for_next_sleep(harness: &SweeperHarness) {
    while harness.time_source.sleepers_count() == 0 {
        tokio::task::yield_now().await;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
