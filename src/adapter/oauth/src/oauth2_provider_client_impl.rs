// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use dill::*;
use internal_error::{InternalError, ResultIntoInternal};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use warden_accounts::{
    AccountStatusResponse,
    OAuth2ProviderClient,
    OAuth2ProviderConfig,
    TokenResponse,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const GRANT_TYPE_REFRESH_TOKEN: &str = "refresh_token";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct OAuth2ProviderClientImpl {
    config: Arc<OAuth2ProviderConfig>,
}

#[component(pub)]
#[interface(dyn OAuth2ProviderClient)]
impl OAuth2ProviderClientImpl {
    pub fn new(config: Arc<OAuth2ProviderConfig>) -> Self {
        Self { config }
    }

    fn get_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION"),
            ))
            .connect_timeout(self.config.connect_timeout)
            .timeout(self.config.request_timeout)
            .build()
    }

    /// Parses the body of a `200 OK` response. Any other status, or a body
    /// that is not the expected JSON, yields `None`.
    async fn process_response<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        response: reqwest::Response,
    ) -> Result<Option<T>, InternalError> {
        let status = response.status();
        if status != http::StatusCode::OK {
            tracing::debug!(endpoint, %status, "Provider responded with non-OK status");
            return Ok(None);
        }

        let body = response.text().await.int_err()?;

        match serde_json::from_str::<T>(&body) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => {
                tracing::debug!(endpoint, error = %e, "Provider response is not valid JSON");
                Ok(None)
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl OAuth2ProviderClient for OAuth2ProviderClientImpl {
    #[tracing::instrument(level = "debug", skip_all)]
    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<TokenResponse>, InternalError> {
        let client = self.get_client().int_err()?;

        let params = [
            ("grant_type", GRANT_TYPE_REFRESH_TOKEN),
            ("refresh_token", refresh_token),
        ];

        let mut request = client.post(&self.config.token_url).form(&params);

        if let (Some(client_id), Some(client_secret)) =
            (&self.config.client_id, &self.config.client_secret)
        {
            request = request.basic_auth(client_id, Some(client_secret.expose_secret()));
        }

        let response = request
            .send()
            .await
            .context_int_err("token endpoint request failed")?;

        self.process_response("token", response).await
    }

    #[tracing::instrument(level = "debug", skip_all)]
    async fn fetch_account_status(
        &self,
        access_token: &str,
    ) -> Result<Option<AccountStatusResponse>, InternalError> {
        let client = self.get_client().int_err()?;

        let response = client
            .get(&self.config.user_info_url)
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .context_int_err("user info endpoint request failed")?;

        self.process_response("user_info", response).await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
