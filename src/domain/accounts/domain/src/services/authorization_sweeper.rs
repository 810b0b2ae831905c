// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;

use internal_error::InternalError;

use crate::User;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Deactivates users that no longer hold a valid authorization with the
/// external OAuth2 provider
#[async_trait::async_trait]
pub trait AuthorizationSweeper: Send + Sync {
    /// Checks every active human user and deactivates the ones that fail.
    ///
    /// Failures while processing one user are logged and counted, they never
    /// abort the sweep. A call made while another sweep is still running
    /// returns immediately with [`SweepSummary::skipped`] set.
    async fn run(&self) -> Result<SweepSummary, InternalError>;

    /// Decides the fate of a single user without deactivating anybody.
    /// May refresh and persist the user's credentials as a side effect, so it
    /// waits for a running sweep to finish first.
    async fn check_user(&self, user: &User) -> Result<SweepDecision, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDecision {
    KeepActive,
    Deactivate(DeactivationReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeactivationReason {
    /// No associated account or no credentials record
    NeverAuthorized,
    /// Stored token expired and there is no refresh token
    TokenExpired,
    /// Refresh call failed or returned no access token
    RefreshRejected,
    /// User-info call failed or returned an unparseable body
    AccountStatusUnavailable,
    /// User-info says the e-mail is not verified or the account is not active
    AccountNotVerifiedOrInactive,
}

impl fmt::Display for DeactivationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NeverAuthorized => "has not been authorized with the provider",
            Self::TokenExpired => "is no longer authorized: token expired and no refresh token",
            Self::RefreshRejected => "is no longer authorized: token refresh was rejected",
            Self::AccountStatusUnavailable => "provider account status could not be obtained",
            Self::AccountNotVerifiedOrInactive => {
                "does not have a verified, active provider account"
            }
        };
        f.write_str(s)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub checked: usize,
    pub kept_active: usize,
    pub deactivated: usize,
    pub failed: usize,
    /// Set when the run did not happen because another one was in progress
    pub skipped: bool,
}

impl SweepSummary {
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
