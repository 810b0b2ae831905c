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
use internal_error::{ErrorIntoInternal, InternalError};
use time_source::SystemTimeSource;
use warden_accounts::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct AuthorizationSweeperImpl {
    user_repo: Arc<dyn UserRepository>,
    associated_account_repo: Arc<dyn AssociatedAccountRepository>,
    provider_client: Arc<dyn OAuth2ProviderClient>,
    time_source: Arc<dyn SystemTimeSource>,
    provider_config: Arc<OAuth2ProviderConfig>,
    run_guard: tokio::sync::Mutex<()>,
}

enum AccessTokenOutcome {
    Obtained(String),
    Lost(DeactivationReason),
}

#[component(pub)]
#[interface(dyn AuthorizationSweeper)]
#[scope(Singleton)]
impl AuthorizationSweeperImpl {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        associated_account_repo: Arc<dyn AssociatedAccountRepository>,
        provider_client: Arc<dyn OAuth2ProviderClient>,
        time_source: Arc<dyn SystemTimeSource>,
        provider_config: Arc<OAuth2ProviderConfig>,
    ) -> Self {
        Self {
            user_repo,
            associated_account_repo,
            provider_client,
            time_source,
            provider_config,
            run_guard: tokio::sync::Mutex::new(()),
        }
    }

    async fn obtain_access_token(
        &self,
        user: &User,
        credentials: &OAuth2Credentials,
    ) -> Result<AccessTokenOutcome, InternalError> {
        let now = self.time_source.now_epoch_seconds();

        if let Some(token) = credentials.unexpired_token(now) {
            tracing::debug!(username = %user.username, "Using stored access token");
            return Ok(AccessTokenOutcome::Obtained(token.to_string()));
        }

        let Some(refresh_token) = credentials.refresh_token.as_deref() else {
            return Ok(AccessTokenOutcome::Lost(DeactivationReason::TokenExpired));
        };

        let maybe_access_token = self
            .provider_client
            .refresh_access_token(refresh_token)
            .await?
            .and_then(|response| {
                let access_token = response.access_token.clone()?;
                Some((access_token, response))
            });

        let Some((access_token, response)) = maybe_access_token else {
            return Ok(AccessTokenOutcome::Lost(DeactivationReason::RefreshRejected));
        };

        let refreshed = OAuth2Credentials::refreshed(&access_token, &response, now);
        if refreshed.refresh_token.is_none() {
            tracing::debug!(
                username = %user.username,
                "Token response carries no refresh token, the stored one is dropped"
            );
        }

        self.associated_account_repo
            .update_credentials(&self.provider_config.provider_name, user.id, &refreshed)
            .await
            .map_err(|e| match e {
                UpdateCredentialsError::NotFound(e) => e.int_err(),
                UpdateCredentialsError::Internal(e) => e,
            })?;

        tracing::debug!(username = %user.username, "Access token refreshed");

        Ok(AccessTokenOutcome::Obtained(access_token))
    }

    #[tracing::instrument(level = "debug", skip_all, fields(username = %user.username))]
    async fn decide(&self, user: &User) -> Result<SweepDecision, InternalError> {
        let maybe_associated_account = self
            .associated_account_repo
            .find_associated_account(&self.provider_config.provider_name, user.id)
            .await
            .map_err(|e| match e {
                FindAssociatedAccountError::Internal(e) => e,
            })?;

        let Some(credentials) = maybe_associated_account.and_then(|account| account.credentials)
        else {
            return Ok(SweepDecision::Deactivate(
                DeactivationReason::NeverAuthorized,
            ));
        };

        let access_token = match self.obtain_access_token(user, &credentials).await? {
            AccessTokenOutcome::Obtained(access_token) => access_token,
            AccessTokenOutcome::Lost(reason) => return Ok(SweepDecision::Deactivate(reason)),
        };

        let Some(account_status) = self
            .provider_client
            .fetch_account_status(&access_token)
            .await?
        else {
            return Ok(SweepDecision::Deactivate(
                DeactivationReason::AccountStatusUnavailable,
            ));
        };

        if account_status.is_verified_and_active() {
            Ok(SweepDecision::KeepActive)
        } else {
            Ok(SweepDecision::Deactivate(
                DeactivationReason::AccountNotVerifiedOrInactive,
            ))
        }
    }

    async fn sweep_user(&self, user: &User) -> Result<SweepDecision, InternalError> {
        let decision = self.decide(user).await?;

        match decision {
            SweepDecision::KeepActive => {
                tracing::info!(username = %user.username, "User keeps access");
            }
            SweepDecision::Deactivate(reason) => {
                tracing::warn!(
                    username = %user.username,
                    %reason,
                    "Deactivating user {}: {reason}",
                    user.username,
                );

                self.user_repo
                    .deactivate_user(user.id, &Actor::system())
                    .await
                    .map_err(|e| match e {
                        DeactivateUserError::NotFound(e) => e.int_err(),
                        DeactivateUserError::Internal(e) => e,
                    })?;
            }
        }

        Ok(decision)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl AuthorizationSweeper for AuthorizationSweeperImpl {
    #[tracing::instrument(level = "info", skip_all)]
    async fn run(&self) -> Result<SweepSummary, InternalError> {
        let Ok(_guard) = self.run_guard.try_lock() else {
            tracing::warn!("Previous authorization sweep is still running, skipping");
            return Ok(SweepSummary::skipped());
        };

        let users = self
            .user_repo
            .list_active_human_users()
            .await
            .map_err(|e| match e {
                ListUsersError::Internal(e) => e,
            })?;

        let mut summary = SweepSummary::default();

        for user in &users {
            summary.checked += 1;

            match self.sweep_user(user).await {
                Ok(SweepDecision::KeepActive) => summary.kept_active += 1,
                Ok(SweepDecision::Deactivate(_)) => summary.deactivated += 1,
                Err(e) => {
                    tracing::error!(
                        username = %user.username,
                        error = ?e,
                        error_msg = %e.reason(),
                        "Failed to check user authorization, leaving the user as is",
                    );
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            checked = summary.checked,
            kept_active = summary.kept_active,
            deactivated = summary.deactivated,
            failed = summary.failed,
            "Authorization sweep finished"
        );

        Ok(summary)
    }

    async fn check_user(&self, user: &User) -> Result<SweepDecision, InternalError> {
        let _guard = self.run_guard.lock().await;

        self.decide(user).await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
