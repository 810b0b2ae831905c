// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use dill::*;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryAssociatedAccountRepository {
    state: Arc<Mutex<State>>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct State {
    accounts_by_key: HashMap<(String, UserID), AssociatedAccount>,
}

impl State {
    fn key(provider_name: &str, user_id: UserID) -> (String, UserID) {
        (provider_name.to_string(), user_id)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[component(pub)]
#[interface(dyn AssociatedAccountRepository)]
#[scope(Singleton)]
impl InMemoryAssociatedAccountRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl AssociatedAccountRepository for InMemoryAssociatedAccountRepository {
    async fn save_associated_account(
        &self,
        associated_account: &AssociatedAccount,
    ) -> Result<(), SaveAssociatedAccountError> {
        let mut guard = self.state.lock().unwrap();
        guard.accounts_by_key.insert(
            State::key(&associated_account.provider_name, associated_account.user_id),
            associated_account.clone(),
        );

        Ok(())
    }

    async fn find_associated_account(
        &self,
        provider_name: &str,
        user_id: UserID,
    ) -> Result<Option<AssociatedAccount>, FindAssociatedAccountError> {
        let guard = self.state.lock().unwrap();

        Ok(guard
            .accounts_by_key
            .get(&State::key(provider_name, user_id))
            .cloned())
    }

    async fn update_credentials(
        &self,
        provider_name: &str,
        user_id: UserID,
        credentials: &OAuth2Credentials,
    ) -> Result<(), UpdateCredentialsError> {
        let mut guard = self.state.lock().unwrap();

        let Some(associated_account) = guard
            .accounts_by_key
            .get_mut(&State::key(provider_name, user_id))
        else {
            return Err(UpdateCredentialsError::NotFound(
                AssociatedAccountNotFoundError {
                    provider_name: provider_name.to_string(),
                    user_id,
                },
            ));
        };

        associated_account.credentials = Some(credentials.clone());

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
