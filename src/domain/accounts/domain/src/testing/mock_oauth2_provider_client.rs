// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{
    AccountStatusResponse,
    MockOAuth2ProviderClient,
    OAuth2Credentials,
    ProviderAccount,
    TokenResponse,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl MockOAuth2ProviderClient {
    /// Expects a refresh with exactly `refresh_token`, answering `response`
    pub fn with_refresh(
        mut self,
        refresh_token: &str,
        response: Option<TokenResponse>,
    ) -> Self {
        let expected = refresh_token.to_string();
        self.expect_refresh_access_token()
            .withf(move |rt| rt == expected)
            .times(1)
            .returning(move |_| Ok(response.clone()));
        self
    }

    pub fn without_refresh(mut self) -> Self {
        self.expect_refresh_access_token().never();
        self
    }

    /// Expects a status check with exactly `access_token`, answering `response`
    pub fn with_account_status(
        mut self,
        access_token: &str,
        response: Option<AccountStatusResponse>,
    ) -> Self {
        let expected = access_token.to_string();
        self.expect_fetch_account_status()
            .withf(move |token| token == expected)
            .times(1)
            .returning(move |_| Ok(response.clone()));
        self
    }

    pub fn without_account_status(mut self) -> Self {
        self.expect_fetch_account_status().never();
        self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl TokenResponse {
    pub fn test(access_token: &str, refresh_token: Option<&str>, expires_in: i64) -> Self {
        Self {
            access_token: Some(access_token.to_string()),
            refresh_token: refresh_token.map(ToString::to_string),
            expires_in,
        }
    }
}

impl AccountStatusResponse {
    pub fn test(email_verified: bool, status: &str) -> Self {
        Self {
            account: Some(ProviderAccount {
                email_verified: Some(email_verified),
                status: Some(status.to_string()),
            }),
        }
    }

    pub fn verified_active() -> Self {
        Self::test(true, crate::PROVIDER_ACCOUNT_STATUS_ACTIVE)
    }
}

impl OAuth2Credentials {
    pub fn test_token(token: &str, expires_at: i64) -> Self {
        Self {
            token: Some(token.to_string()),
            refresh_token: None,
            expires_at: Some(expires_at),
            expires: true,
        }
    }

    pub fn test_refreshable(token: Option<&str>, refresh_token: &str, expires_at: i64) -> Self {
        Self {
            token: token.map(ToString::to_string),
            refresh_token: Some(refresh_token.to_string()),
            expires_at: Some(expires_at),
            expires: true,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
