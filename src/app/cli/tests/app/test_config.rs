// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::Path;
use std::time::Duration;

use indoc::indoc;
use merge::Merge;
use pretty_assertions::assert_eq;
use secrecy::ExposeSecret;
use warden_accounts::*;
use warden_cli::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const FULL_CONFIG: &str = indoc!(
    r#"
    oauth2:
      providerName: digitalocean
      tokenUrl: https://cloud.example.com/v1/oauth/token
      userInfoUrl: https://api.example.com/v2/account
      clientId: warden
      clientSecret: s3cr3t
      requestTimeout: 3s
    sweep:
      interval: 10m
    users:
      predefined:
        - id: 1
          username: alice
          associatedAccount:
            credentials:
              token: abc
              refresh_token: r1
              expires_at: 2000000000
              expires: true
        - id: 2
          username: bob
          active: false
    "#
);

fn parse(yaml: &str) -> Result<WardenConfig, CLIError> {
    WardenConfig::from_yaml(Path::new("test.yaml"), yaml)
}

fn with_defaults(mut config: WardenConfig) -> WardenConfig {
    config.merge(WardenConfig::sample());
    config
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_full_config_is_parsed() {
    let config = with_defaults(parse(FULL_CONFIG).unwrap());

    let provider_config = config.oauth2.unwrap().into_provider_config().unwrap();
    assert_eq!(provider_config.provider_name, "digitalocean");
    assert_eq!(
        provider_config.token_url,
        "https://cloud.example.com/v1/oauth/token"
    );
    assert_eq!(
        provider_config.user_info_url,
        "https://api.example.com/v2/account"
    );
    assert_eq!(provider_config.client_id.as_deref(), Some("warden"));
    assert_eq!(
        provider_config
            .client_secret
            .as_ref()
            .map(ExposeSecret::expose_secret),
        Some("s3cr3t")
    );
    assert_eq!(provider_config.request_timeout, Duration::from_secs(3));
    assert_eq!(provider_config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);

    let sweep_config = config.sweep.unwrap().into_sweep_config().unwrap();
    assert_eq!(sweep_config.interval, Duration::from_secs(600));

    let users = config.users.unwrap();
    let alice = users.find_user_config_by_username("alice").unwrap();
    assert!(alice.active);
    assert_eq!(
        alice
            .to_associated_account(OAUTH2_BASIC_PROVIDER_NAME)
            .and_then(|account| account.credentials),
        Some(OAuth2Credentials {
            token: Some("abc".to_string()),
            refresh_token: Some("r1".to_string()),
            expires_at: Some(2_000_000_000),
            expires: true,
        })
    );

    let bob = users.find_user_config_by_username("bob").unwrap();
    assert!(!bob.active);
    assert_eq!(bob.associated_account, None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_defaults_fill_missing_values() {
    let config = with_defaults(
        parse(indoc!(
            r#"
            oauth2:
              tokenUrl: http://localhost:8080/oauth/token
              userInfoUrl: http://localhost:8080/v2/account
            "#
        ))
        .unwrap(),
    );

    let provider_config = config.oauth2.unwrap().into_provider_config().unwrap();
    assert_eq!(provider_config.provider_name, OAUTH2_BASIC_PROVIDER_NAME);
    assert_eq!(provider_config.client_id, None);
    assert!(provider_config.client_secret.is_none());
    assert_eq!(provider_config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    assert_eq!(provider_config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);

    let sweep_config = config.sweep.unwrap().into_sweep_config().unwrap();
    assert_eq!(sweep_config.interval, DEFAULT_SWEEP_INTERVAL);

    assert!(config.users.unwrap().predefined.is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_env_overrides_take_precedence_over_file() {
    let mut config = WardenConfig::from_env_with(|name| match name {
        ENV_VAR_OAUTH2_TOKEN_URL => Some("http://override/token".to_string()),
        ENV_VAR_OAUTH2_CLIENT_SECRET => Some("from-env".to_string()),
        _ => None,
    });
    config.merge(parse(FULL_CONFIG).unwrap());
    config.merge(WardenConfig::sample());

    let provider_config = config.oauth2.unwrap().into_provider_config().unwrap();
    assert_eq!(provider_config.token_url, "http://override/token");
    assert_eq!(
        provider_config.user_info_url,
        "https://api.example.com/v2/account"
    );
    assert_eq!(provider_config.client_id.as_deref(), Some("warden"));
    assert_eq!(
        provider_config
            .client_secret
            .as_ref()
            .map(ExposeSecret::expose_secret),
        Some("from-env")
    );
    assert_eq!(provider_config.request_timeout, Duration::from_secs(3));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_missing_endpoints_are_reported() {
    let config = with_defaults(WardenConfig::default());

    let res = config.oauth2.unwrap().into_provider_config();
    assert!(
        matches!(
            res,
            Err(CLIError::UsageError { ref msg }) if msg.contains(ENV_VAR_OAUTH2_TOKEN_URL)
        ),
        "{res:?}"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_unknown_keys_are_rejected() {
    let res = parse(indoc!(
        r#"
        oauth2:
          tokenURL: http://localhost:8080/oauth/token
        "#
    ));

    assert!(matches!(res, Err(CLIError::Config { .. })), "{res:?}");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_zero_interval_is_rejected() {
    let config = parse(indoc!(
        r#"
        sweep:
          interval: 0s
        "#
    ))
    .unwrap();

    assert!(matches!(
        config.sweep.unwrap().into_sweep_config(),
        Err(CLIError::UsageError { .. })
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_catalog_runs_sweep_over_predefined_users() {
    let config = with_defaults(
        parse(indoc!(
            r#"
            oauth2:
              tokenUrl: http://127.0.0.1:1/oauth/token
              userInfoUrl: http://127.0.0.1:1/v2/account
            users:
              predefined:
                - id: 1
                  username: alice
                - id: -2
                  username: discobot
            "#
        ))
        .unwrap(),
    );

    let catalog = configure_catalog(config).unwrap().build();

    catalog
        .get_one::<warden_accounts_services::PredefinedUsersRegistrator>()
        .unwrap()
        .run_initialization()
        .await
        .unwrap();

    let summary = catalog
        .get_one::<warden_accounts_services::DeactivateUnauthorizedUsersJob>()
        .unwrap()
        .run_once()
        .await
        .unwrap();

    assert_eq!(
        summary,
        SweepSummary {
            checked: 1,
            deactivated: 1,
            ..SweepSummary::default()
        }
    );

    let user_repo = catalog.get_one::<dyn UserRepository>().unwrap();
    let alice = user_repo.get_user_by_id(UserID::new(1)).await.unwrap();
    assert!(!alice.active);
    assert_eq!(alice.deactivated_by, Some(SYSTEM_USER_ID));
    let bot = user_repo.get_user_by_id(UserID::new(-2)).await.unwrap();
    assert!(bot.active);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
