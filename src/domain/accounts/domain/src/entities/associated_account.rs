// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{OAuth2Credentials, UserID};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const OAUTH2_BASIC_PROVIDER_NAME: &str = "oauth2_basic";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Links a user to an external identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociatedAccount {
    pub provider_name: String,
    pub user_id: UserID,
    pub credentials: Option<OAuth2Credentials>,
}

impl AssociatedAccount {
    pub fn new(
        provider_name: impl Into<String>,
        user_id: UserID,
        credentials: Option<OAuth2Credentials>,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            user_id,
            credentials,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
