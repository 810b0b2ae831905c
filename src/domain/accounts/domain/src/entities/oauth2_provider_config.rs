// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::Duration;

use secrecy::SecretString;

use crate::OAUTH2_BASIC_PROVIDER_NAME;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Endpoints and client settings of the external OAuth2 identity provider
#[derive(Debug)]
pub struct OAuth2ProviderConfig {
    /// Provider name under which associated accounts are stored
    pub provider_name: String,

    pub token_url: String,

    pub user_info_url: String,

    /// When both client ID and secret are set, they are sent as HTTP Basic
    /// credentials on token refresh
    pub client_id: Option<String>,

    pub client_secret: Option<SecretString>,

    /// Upper bound for a whole request, including reading the body
    pub request_timeout: Duration,

    pub connect_timeout: Duration,
}

impl OAuth2ProviderConfig {
    pub fn new(token_url: impl Into<String>, user_info_url: impl Into<String>) -> Self {
        Self {
            provider_name: OAUTH2_BASIC_PROVIDER_NAME.to_string(),
            token_url: token_url.into(),
            user_info_url: user_info_url.into(),
            client_id: None,
            client_secret: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn sample() -> Self {
        Self::new(
            "http://localhost:8080/oauth/token",
            "http://localhost:8080/v2/account",
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
