// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use thiserror::Error;

use crate::{Actor, User, UserID};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// User store of the host identity system
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user or replaces the stored one with the same ID
    async fn save_user(&self, user: &User) -> Result<(), SaveUserError>;

    async fn get_user_by_id(&self, user_id: UserID) -> Result<User, GetUserByIdError>;

    /// Active users with a human (positive) ID, ordered by ID
    async fn list_active_human_users(&self) -> Result<Vec<User>, ListUsersError>;

    /// Flips `active` to false and records the actor, as a single atomic
    /// unit of work. Deactivating an inactive user is a no-op.
    async fn deactivate_user(
        &self,
        user_id: UserID,
        actor: &Actor,
    ) -> Result<(), DeactivateUserError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SaveUserError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetUserByIdError {
    #[error(transparent)]
    NotFound(UserNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("User not found by ID: '{user_id}'")]
pub struct UserNotFoundError {
    pub user_id: UserID,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ListUsersError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum DeactivateUserError {
    #[error(transparent)]
    NotFound(UserNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
