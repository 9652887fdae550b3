// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::constants::{AZURE_PUBLIC_CLOUD, STORAGE_SCOPE};
use crate::Credentials;
use async_trait::async_trait;
use blobgate_core::time::now;
use blobgate_core::{AccessToken, Context, Error, ProvideToken, Result};
use log::debug;

/// Obtain bearer tokens with the OAuth 2.0 client-credentials grant.
///
/// Every call goes to the token endpoint, nothing is cached here. Wrap the
/// provider in [`blobgate_core::TokenCache`] to reuse tokens until they expire.
///
/// Reference: <https://learn.microsoft.com/en-us/azure/active-directory/develop/v2-oauth2-client-creds-grant-flow>
#[derive(Debug, Clone)]
pub struct ClientSecretTokenProvider {
    credentials: Credentials,
    authority_host: String,
}

impl ClientSecretTokenProvider {
    /// Create a new provider for `credentials` against the public Azure cloud.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            authority_host: AZURE_PUBLIC_CLOUD.to_string(),
        }
    }

    /// Set the authority host URL.
    pub fn with_authority_host(mut self, authority_host: impl Into<String>) -> Self {
        self.authority_host = authority_host.into();
        self
    }

    /// Exchange the client credentials for an access token.
    pub async fn get_access_token(&self, ctx: &Context) -> Result<AccessToken> {
        let token = get_client_secret_token(&self.credentials, &self.authority_host, ctx).await?;

        let access_token = AccessToken::new(token.access_token);
        Ok(match token.expires_in {
            Some(expires_in) => match chrono::TimeDelta::try_seconds(expires_in as i64) {
                Some(d) => access_token.with_expires_at(now() + d),
                None => access_token,
            },
            None => access_token,
        })
    }
}

#[async_trait]
impl ProvideToken for ClientSecretTokenProvider {
    async fn provide_token(&self, ctx: &Context) -> Result<AccessToken> {
        self.get_access_token(ctx).await
    }
}

#[derive(serde::Deserialize)]
struct ClientSecretTokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

async fn get_client_secret_token(
    credentials: &Credentials,
    authority_host: &str,
    ctx: &Context,
) -> Result<ClientSecretTokenResponse> {
    let url = format!(
        "{}/{}/oauth2/v2.0/token",
        authority_host.trim_end_matches('/'),
        credentials.tenant_id
    );

    let body = form_urlencoded::Serializer::new(String::new())
        .append_pair("grant_type", "client_credentials")
        .append_pair("client_id", &credentials.client_id)
        .append_pair("client_secret", &credentials.client_secret)
        .append_pair("scope", STORAGE_SCOPE)
        .finish();

    let req = http::Request::builder()
        .method(http::Method::POST)
        .uri(&url)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(bytes::Bytes::from(body))
        .map_err(|e| Error::auth("failed to build token request").with_source(e))?;

    debug!("requesting access token from {url}");
    let resp = ctx.http_send(req).await.map_err(|e| {
        Error::auth(format!("Error obtaining access token: {e}")).with_source(e)
    })?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = String::from_utf8_lossy(resp.body());
        debug!("token request failed with status {status}");
        return Err(Error::auth(format!(
            "Failed to obtain access token: {body}"
        )));
    }

    serde_json::from_slice(resp.body()).map_err(|e| {
        let body = String::from_utf8_lossy(resp.body());
        Error::auth(format!("Failed to parse access token response: {body}")).with_source(e)
    })
}
