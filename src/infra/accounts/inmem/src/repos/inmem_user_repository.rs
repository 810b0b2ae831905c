// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use dill::*;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryUserRepository {
    state: Arc<Mutex<State>>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct State {
    // Ordered, so listings come out sorted by ID
    users_by_id: BTreeMap<UserID, User>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[component(pub)]
#[interface(dyn UserRepository)]
#[scope(Singleton)]
impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save_user(&self, user: &User) -> Result<(), SaveUserError> {
        let mut guard = self.state.lock().unwrap();
        guard.users_by_id.insert(user.id, user.clone());

        Ok(())
    }

    async fn get_user_by_id(&self, user_id: UserID) -> Result<User, GetUserByIdError> {
        let guard = self.state.lock().unwrap();
        if let Some(user) = guard.users_by_id.get(&user_id) {
            Ok(user.clone())
        } else {
            Err(GetUserByIdError::NotFound(UserNotFoundError { user_id }))
        }
    }

    async fn list_active_human_users(&self) -> Result<Vec<User>, ListUsersError> {
        let guard = self.state.lock().unwrap();

        let users = guard
            .users_by_id
            .values()
            .filter(|user| user.active && user.is_human())
            .cloned()
            .collect();

        Ok(users)
    }

    async fn deactivate_user(
        &self,
        user_id: UserID,
        actor: &Actor,
    ) -> Result<(), DeactivateUserError> {
        // The lock spans the read and the write, which makes the change atomic
        let mut guard = self.state.lock().unwrap();

        let Some(user) = guard.users_by_id.get_mut(&user_id) else {
            return Err(DeactivateUserError::NotFound(UserNotFoundError {
                user_id,
            }));
        };

        if user.active {
            user.active = false;
            user.deactivated_by = Some(actor.id);

            tracing::debug!(%user_id, actor = %actor.username, "User deactivated");
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
