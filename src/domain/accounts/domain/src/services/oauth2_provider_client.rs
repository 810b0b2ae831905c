// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const PROVIDER_ACCOUNT_STATUS_ACTIVE: &str = "active";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Client of the external OAuth2 identity provider.
///
/// Both calls return `Ok(None)` when the provider answered with anything but
/// `200 OK` or with a body that could not be parsed. `Err` is reserved for
/// transport failures (unreachable host, timeout).
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait::async_trait]
pub trait OAuth2ProviderClient: Send + Sync {
    /// `POST <token_url>` with `grant_type=refresh_token`
    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<TokenResponse>, InternalError>;

    /// `GET <user_info_url>` authorized with the bearer `access_token`
    async fn fetch_account_status(
        &self,
        access_token: &str,
    ) -> Result<Option<AccountStatusResponse>, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds. Values that are not a number
    /// (`null`, garbage) read as `0`.
    #[serde(deserialize_with = "deserialize_lenient_seconds")]
    pub expires_in: i64,
}

/// Accepts integers, floats and numeric strings
fn deserialize_lenient_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        Integer(i64),
        Float(f64),
        Text(String),
        Other(IgnoredAny),
    }

    #[allow(clippy::cast_possible_truncation)]
    let seconds = match Seconds::deserialize(deserializer)? {
        Seconds::Integer(value) => value,
        Seconds::Float(value) => value as i64,
        Seconds::Text(value) => {
            let value = value.trim();
            value
                .parse::<i64>()
                .ok()
                .or_else(|| value.parse::<f64>().ok().map(|value| value as i64))
                .unwrap_or(0)
        }
        Seconds::Other(_) => 0,
    };

    Ok(seconds)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccountStatusResponse {
    pub account: Option<ProviderAccount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProviderAccount {
    pub email_verified: Option<bool>,
    pub status: Option<String>,
}

impl AccountStatusResponse {
    pub fn is_verified_and_active(&self) -> bool {
        self.account.as_ref().is_some_and(|account| {
            account.email_verified == Some(true)
                && account.status.as_deref() == Some(PROVIDER_ACCOUNT_STATUS_ACTIVE)
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
