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
use warden_accounts::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Registers users from the configuration on a one-time basis.
/// Users that already exist are left untouched.
pub struct PredefinedUsersRegistrator {
    predefined_users_config: Arc<PredefinedUsersConfig>,
    provider_config: Arc<OAuth2ProviderConfig>,
    user_repo: Arc<dyn UserRepository>,
    associated_account_repo: Arc<dyn AssociatedAccountRepository>,
}

#[component(pub)]
impl PredefinedUsersRegistrator {
    pub fn new(
        predefined_users_config: Arc<PredefinedUsersConfig>,
        provider_config: Arc<OAuth2ProviderConfig>,
        user_repo: Arc<dyn UserRepository>,
        associated_account_repo: Arc<dyn AssociatedAccountRepository>,
    ) -> Self {
        Self {
            predefined_users_config,
            provider_config,
            user_repo,
            associated_account_repo,
        }
    }

    async fn register_unknown_user(&self, user_config: &UserConfig) -> Result<(), InternalError> {
        self.user_repo
            .save_user(&user_config.to_user())
            .await
            .map_err(|e| match e {
                SaveUserError::Internal(e) => e,
            })?;

        if let Some(associated_account) =
            user_config.to_associated_account(&self.provider_config.provider_name)
        {
            self.associated_account_repo
                .save_associated_account(&associated_account)
                .await
                .map_err(|e| match e {
                    SaveAssociatedAccountError::Internal(e) => e,
                })?;
        }

        tracing::debug!(
            user_id = %user_config.id,
            username = %user_config.username,
            "Registered predefined user"
        );

        Ok(())
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        name = "PredefinedUsersRegistrator::run_initialization"
    )]
    pub async fn run_initialization(&self) -> Result<(), InternalError> {
        tracing::debug!(
            job_name = JOB_WARDEN_ACCOUNTS_PREDEFINED_USERS_REGISTRATOR,
            users = self.predefined_users_config.predefined.len(),
            "Registering predefined users"
        );

        for user_config in &self.predefined_users_config.predefined {
            let is_unknown_user = match self.user_repo.get_user_by_id(user_config.id).await {
                Ok(_) => Ok(false),
                Err(GetUserByIdError::NotFound(_)) => Ok(true),
                Err(GetUserByIdError::Internal(e)) => Err(e),
            }?;

            if is_unknown_user {
                self.register_unknown_user(user_config).await?;
            }
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
