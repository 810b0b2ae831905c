// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::TokenResponse;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Token state cached for an associated account.
///
/// Every field is optional: records are written by several login flows and
/// only some of them store an expiry or a refresh token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuth2Credentials {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    /// Seconds since the Unix epoch
    pub expires_at: Option<i64>,
    pub expires: bool,
}

impl OAuth2Credentials {
    /// Returns the stored access token if it is still valid at `now`.
    /// A record without `expires_at` is considered expired.
    pub fn unexpired_token(&self, now_epoch_seconds: i64) -> Option<&str> {
        let token = self.token.as_deref()?;
        (self.expires_at.unwrap_or(0) > now_epoch_seconds).then_some(token)
    }

    /// Builds the record persisted after a successful refresh.
    ///
    /// Note: `refresh_token` is taken from the response as is, so a provider
    /// that does not rotate refresh tokens leaves the record without one.
    pub fn refreshed(
        access_token: impl Into<String>,
        response: &TokenResponse,
        now_epoch_seconds: i64,
    ) -> Self {
        Self {
            token: Some(access_token.into()),
            refresh_token: response.refresh_token.clone(),
            expires_at: Some(now_epoch_seconds.saturating_add(response.expires_in)),
            expires: true,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
