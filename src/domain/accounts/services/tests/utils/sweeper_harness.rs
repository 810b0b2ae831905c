// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use dill::{Catalog, CatalogBuilder};
use time_source::{SystemTimeSource, SystemTimeSourceStub};
use warden_accounts::*;
use warden_accounts_inmem::{InMemoryAssociatedAccountRepository, InMemoryUserRepository};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) struct SweeperHarness {
    pub catalog: Catalog,
    pub time_source: SystemTimeSourceStub,
    pub sweeper: Arc<dyn AuthorizationSweeper>,
    user_repo: Arc<dyn UserRepository>,
    associated_account_repo: Arc<dyn AssociatedAccountRepository>,
}

impl SweeperHarness {
    pub fn new(provider_client: MockOAuth2ProviderClient) -> Self {
        Self::new_with(PredefinedUsersConfig::new(), |b| {
            b.add_value(provider_client);
            b.bind::<dyn OAuth2ProviderClient, MockOAuth2ProviderClient>();
        })
    }

    pub fn new_with(
        predefined_users_config: PredefinedUsersConfig,
        register_provider_client: impl FnOnce(&mut CatalogBuilder),
    ) -> Self {
        let time_source =
            SystemTimeSourceStub::new_set(Utc.with_ymd_and_hms(2050, 1, 1, 12, 0, 0).unwrap());

        let catalog = {
            let mut b = CatalogBuilder::new();

            b.add::<InMemoryUserRepository>()
                .add::<InMemoryAssociatedAccountRepository>()
                .add_value(time_source.clone())
                .bind::<dyn SystemTimeSource, SystemTimeSourceStub>()
                .add_value(OAuth2ProviderConfig::sample())
                .add_value(SweepConfig::default())
                .add_value(predefined_users_config);

            register_provider_client(&mut b);

            warden_accounts_services::register_dependencies(&mut b);

            b.build()
        };

        Self {
            sweeper: catalog.get_one().unwrap(),
            user_repo: catalog.get_one().unwrap(),
            associated_account_repo: catalog.get_one().unwrap(),
            time_source,
            catalog,
        }
    }

    pub fn now(&self) -> i64 {
        self.time_source.now_epoch_seconds()
    }

    pub async fn add_user(&self, id: i64, username: &str) -> User {
        let user = User::new(UserID::new(id), username);
        self.user_repo.save_user(&user).await.unwrap();
        user
    }

    pub async fn add_associated_account(
        &self,
        user: &User,
        credentials: Option<OAuth2Credentials>,
    ) {
        self.associated_account_repo
            .save_associated_account(&AssociatedAccount::new(
                OAUTH2_BASIC_PROVIDER_NAME,
                user.id,
                credentials,
            ))
            .await
            .unwrap();
    }

    pub async fn add_user_with_credentials(
        &self,
        id: i64,
        username: &str,
        credentials: OAuth2Credentials,
    ) -> User {
        let user = self.add_user(id, username).await;
        self.add_associated_account(&user, Some(credentials)).await;
        user
    }

    pub async fn stored_user(&self, user: &User) -> User {
        self.user_repo.get_user_by_id(user.id).await.unwrap()
    }

    pub async fn is_active(&self, user: &User) -> bool {
        self.stored_user(user).await.active
    }

    pub async fn stored_credentials(&self, user: &User) -> Option<OAuth2Credentials> {
        self.associated_account_repo
            .find_associated_account(OAUTH2_BASIC_PROVIDER_NAME, user.id)
            .await
            .unwrap()
            .and_then(|account| account.credentials)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
