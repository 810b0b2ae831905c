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

use crate::{AssociatedAccount, OAuth2Credentials, UserID};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Credential store: links between users and external identity providers
#[async_trait::async_trait]
pub trait AssociatedAccountRepository: Send + Sync {
    /// Inserts the association or replaces the one for the same
    /// `(provider_name, user_id)` pair
    async fn save_associated_account(
        &self,
        associated_account: &AssociatedAccount,
    ) -> Result<(), SaveAssociatedAccountError>;

    async fn find_associated_account(
        &self,
        provider_name: &str,
        user_id: UserID,
    ) -> Result<Option<AssociatedAccount>, FindAssociatedAccountError>;

    /// Replaces the whole credentials record atomically
    async fn update_credentials(
        &self,
        provider_name: &str,
        user_id: UserID,
        credentials: &OAuth2Credentials,
    ) -> Result<(), UpdateCredentialsError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SaveAssociatedAccountError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum FindAssociatedAccountError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum UpdateCredentialsError {
    #[error(transparent)]
    NotFound(AssociatedAccountNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("Associated account of user '{user_id}' with provider '{provider_name}' not found")]
pub struct AssociatedAccountNotFoundError {
    pub provider_name: String,
    pub user_id: UserID,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
