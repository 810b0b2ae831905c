// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::{Path, PathBuf};
use std::time::Duration;

use duration_string::DurationString;
use merge::Merge;
use secrecy::SecretString;
use serde::Deserialize;
use warden_accounts::{
    DEFAULT_CONNECT_TIMEOUT,
    DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_SWEEP_INTERVAL,
    OAUTH2_BASIC_PROVIDER_NAME,
    OAuth2ProviderConfig,
    PredefinedUsersConfig,
    SweepConfig,
};

use crate::CLIError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_CONFIG_PATH: &str = "warden.yaml";

pub const ENV_VAR_OAUTH2_TOKEN_URL: &str = "WARDEN_OAUTH2_TOKEN_URL";
pub const ENV_VAR_OAUTH2_USER_INFO_URL: &str = "WARDEN_OAUTH2_USER_INFO_URL";
pub const ENV_VAR_OAUTH2_CLIENT_ID: &str = "WARDEN_OAUTH2_CLIENT_ID";
pub const ENV_VAR_OAUTH2_CLIENT_SECRET: &str = "WARDEN_OAUTH2_CLIENT_SECRET";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default, Deserialize, Merge)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct WardenConfig {
    /// External identity provider
    #[merge(strategy = merge_recursive)]
    pub oauth2: Option<OAuth2Config>,

    /// Scheduling of the periodic sweep
    #[merge(strategy = merge_recursive)]
    pub sweep: Option<SweepSettings>,

    /// Users to seed the store with on startup
    pub users: Option<PredefinedUsersConfig>,
}

impl WardenConfig {
    pub fn sample() -> Self {
        Self {
            oauth2: Some(OAuth2Config::sample()),
            sweep: Some(SweepSettings::sample()),
            users: Some(PredefinedUsersConfig::new()),
        }
    }

    /// Overrides taken from `WARDEN_*` environment variables
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let oauth2 = OAuth2Config {
            token_url: lookup(ENV_VAR_OAUTH2_TOKEN_URL),
            user_info_url: lookup(ENV_VAR_OAUTH2_USER_INFO_URL),
            client_id: lookup(ENV_VAR_OAUTH2_CLIENT_ID),
            client_secret: lookup(ENV_VAR_OAUTH2_CLIENT_SECRET).map(SecretString::from),
            ..OAuth2Config::default()
        };

        Self {
            oauth2: Some(oauth2),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    pub fn from_yaml(path: &Path, yaml: &str) -> Result<Self, CLIError> {
        serde_yaml::from_str(yaml).map_err(|e| CLIError::config_error(path, e))
    }

    /// Loads the effective config: environment overrides first, then the
    /// config file (if any), then built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self, CLIError> {
        let mut config = Self::from_env();

        if let Some(file_config) = Self::load_file(path)? {
            config.merge(file_config);
        }

        config.merge(Self::sample());
        Ok(config)
    }

    fn load_file(path: Option<&Path>) -> Result<Option<Self>, CLIError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if !default_path.is_file() {
                    return Ok(None);
                }
                default_path
            }
        };

        let yaml =
            std::fs::read_to_string(&path).map_err(|e| CLIError::config_error(&path, e))?;

        Self::from_yaml(&path, &yaml).map(Some)
    }
}

fn merge_recursive<T: Merge>(left: &mut Option<T>, right: Option<T>) {
    if let Some(right) = right {
        match left {
            Some(left) => left.merge(right),
            None => *left = Some(right),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// OAuth2
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default, Deserialize, Merge)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct OAuth2Config {
    /// Provider name under which associated accounts are stored
    pub provider_name: Option<String>,

    /// Token endpoint used to refresh expired access tokens
    pub token_url: Option<String>,

    /// Endpoint returning the provider account status
    pub user_info_url: Option<String>,

    /// Sent with the client secret as HTTP Basic credentials on refresh
    pub client_id: Option<String>,

    pub client_secret: Option<SecretString>,

    /// Upper bound for a single provider request
    pub request_timeout: Option<DurationString>,

    pub connect_timeout: Option<DurationString>,
}

impl OAuth2Config {
    pub fn sample() -> Self {
        Self {
            provider_name: Some(OAUTH2_BASIC_PROVIDER_NAME.to_string()),
            token_url: None,
            user_info_url: None,
            client_id: None,
            client_secret: None,
            request_timeout: Some(DurationString::from(DEFAULT_REQUEST_TIMEOUT)),
            connect_timeout: Some(DurationString::from(DEFAULT_CONNECT_TIMEOUT)),
        }
    }

    pub fn into_provider_config(self) -> Result<OAuth2ProviderConfig, CLIError> {
        let Some(token_url) = self.token_url else {
            return Err(CLIError::usage_error(format!(
                "OAuth2 token URL is not configured, set oauth2.tokenUrl or \
                 {ENV_VAR_OAUTH2_TOKEN_URL}"
            )));
        };
        let Some(user_info_url) = self.user_info_url else {
            return Err(CLIError::usage_error(format!(
                "OAuth2 user info URL is not configured, set oauth2.userInfoUrl or \
                 {ENV_VAR_OAUTH2_USER_INFO_URL}"
            )));
        };

        let mut provider_config = OAuth2ProviderConfig::new(token_url, user_info_url);

        if let Some(provider_name) = self.provider_name {
            provider_config.provider_name = provider_name;
        }
        provider_config.client_id = self.client_id;
        provider_config.client_secret = self.client_secret;
        if let Some(request_timeout) = self.request_timeout {
            provider_config.request_timeout = request_timeout.into();
        }
        if let Some(connect_timeout) = self.connect_timeout {
            provider_config.connect_timeout = connect_timeout.into();
        }

        Ok(provider_config)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Sweep
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default, Deserialize, Merge)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SweepSettings {
    /// Pause between two consecutive sweeps
    pub interval: Option<DurationString>,
}

impl SweepSettings {
    pub fn sample() -> Self {
        Self {
            interval: Some(DurationString::from(DEFAULT_SWEEP_INTERVAL)),
        }
    }

    pub fn into_sweep_config(self) -> Result<SweepConfig, CLIError> {
        let interval: Duration = self.interval.map_or(DEFAULT_SWEEP_INTERVAL, Into::into);
        if interval.is_zero() {
            return Err(CLIError::usage_error("Sweep interval must be positive"));
        }

        Ok(SweepConfig { interval })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
