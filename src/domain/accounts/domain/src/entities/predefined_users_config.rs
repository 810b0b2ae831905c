// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::{AssociatedAccount, OAuth2Credentials, User, UserID};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Users registered in the in-memory stores on startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredefinedUsersConfig {
    #[serde(default)]
    pub predefined: Vec<UserConfig>,
}

impl PredefinedUsersConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_user_config_by_username(&self, username: &str) -> Option<&UserConfig> {
        self.predefined
            .iter()
            .find(|user_config| user_config.username == username)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    pub id: UserID,

    pub username: String,

    #[serde(default = "UserConfig::default_active")]
    pub active: bool,

    /// Absent when the user never linked the provider
    #[serde(default)]
    pub associated_account: Option<AssociatedAccountConfig>,
}

impl UserConfig {
    fn default_active() -> bool {
        true
    }

    pub fn to_user(&self) -> User {
        User {
            active: self.active,
            ..User::new(self.id, self.username.clone())
        }
    }

    pub fn to_associated_account(&self, provider_name: &str) -> Option<AssociatedAccount> {
        self.associated_account.as_ref().map(|account_config| {
            AssociatedAccount::new(
                provider_name,
                self.id,
                account_config.credentials.clone(),
            )
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedAccountConfig {
    #[serde(default)]
    pub credentials: Option<OAuth2Credentials>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
