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
use warden_accounts_inmem::InMemoryAssociatedAccountRepository;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const OTHER_PROVIDER: &str = "github";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_find_by_provider_and_user() {
    let repo = InMemoryAssociatedAccountRepository::new();
    let alice_id = UserID::new(1);

    let account = AssociatedAccount::new(
        OAUTH2_BASIC_PROVIDER_NAME,
        alice_id,
        Some(OAuth2Credentials {
            token: Some("abc".to_string()),
            ..Default::default()
        }),
    );
    repo.save_associated_account(&account).await.unwrap();

    assert_eq!(
        repo.find_associated_account(OAUTH2_BASIC_PROVIDER_NAME, alice_id)
            .await
            .unwrap(),
        Some(account)
    );
    assert_eq!(
        repo.find_associated_account(OTHER_PROVIDER, alice_id)
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        repo.find_associated_account(OAUTH2_BASIC_PROVIDER_NAME, UserID::new(2))
            .await
            .unwrap(),
        None
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_update_credentials_replaces_whole_record() {
    let repo = InMemoryAssociatedAccountRepository::new();
    let alice_id = UserID::new(1);

    repo.save_associated_account(&AssociatedAccount::new(
        OAUTH2_BASIC_PROVIDER_NAME,
        alice_id,
        Some(OAuth2Credentials {
            token: Some("old".to_string()),
            refresh_token: Some("r1".to_string()),
            expires_at: Some(100),
            expires: true,
        }),
    ))
    .await
    .unwrap();

    let refreshed = OAuth2Credentials {
        token: Some("new".to_string()),
        refresh_token: None,
        expires_at: Some(3700),
        expires: true,
    };
    repo.update_credentials(OAUTH2_BASIC_PROVIDER_NAME, alice_id, &refreshed)
        .await
        .unwrap();

    let stored = repo
        .find_associated_account(OAUTH2_BASIC_PROVIDER_NAME, alice_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.credentials, Some(refreshed));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_update_credentials_of_missing_account() {
    let repo = InMemoryAssociatedAccountRepository::new();

    assert!(matches!(
        repo.update_credentials(
            OAUTH2_BASIC_PROVIDER_NAME,
            UserID::new(1),
            &OAuth2Credentials::default()
        )
        .await,
        Err(UpdateCredentialsError::NotFound(_))
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
