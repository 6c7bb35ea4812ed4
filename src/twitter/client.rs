// Signed HTTP client for the Twitter REST API v1.1.
//
// Every request carries an OAuth 1.0a Authorization header built from the
// user's four credentials. Authentication is just a verify_credentials call:
// if that succeeds we know who the user is and the rest of the API works.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use super::oauth::{authorization_header, Nonce};
use crate::config::Credentials;
use crate::error::{CloudError, Result};

/// The authenticated account.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id_str: String,
    pub screen_name: String,
}

/// Authenticated Twitter client.
///
/// Construct with [`TwitterClient::authenticate`]; the handle is only ever
/// created for credentials the API has accepted.
pub struct TwitterClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    user: User,
}

impl TwitterClient {
    /// Verify `credentials` against `base_url` and return a ready client.
    ///
    /// Fails with `Authentication` on rejected credentials or an unreachable
    /// service.
    pub async fn authenticate(credentials: &Credentials, base_url: &str) -> Result<Self> {
        credentials.validate()?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("tweetcloud/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CloudError::Authentication(format!("failed to build HTTP client: {e}")))?;

        let base_url = base_url.trim_end_matches('/').to_string();

        let user: User = signed_get(
            &http,
            &base_url,
            credentials,
            "account/verify_credentials.json",
            &[("skip_status", "true")],
            CloudError::Authentication,
        )
        .await?;

        info!(screen_name = %user.screen_name, "Authenticated with Twitter");

        Ok(Self {
            http,
            base_url,
            credentials: credentials.clone(),
            user,
        })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// GET an API path with signed parameters; failures become `Retrieval`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        signed_get(
            &self.http,
            &self.base_url,
            &self.credentials,
            path,
            params,
            CloudError::Retrieval,
        )
        .await
    }
}

/// Make a signed GET request and deserialize the JSON body.
///
/// `fail` picks the error kind, so the same plumbing serves both the
/// authentication call and ordinary retrieval.
async fn signed_get<T: DeserializeOwned>(
    http: &reqwest::Client,
    base_url: &str,
    credentials: &Credentials,
    path: &str,
    params: &[(&str, &str)],
    fail: fn(String) -> CloudError,
) -> Result<T> {
    let url = format!("{base_url}/{path}");
    let header = authorization_header(credentials, "GET", &url, params, &Nonce::generate())?;

    debug!(path = path, "Signed GET request");

    let response = http
        .get(&url)
        .query(params)
        .header(reqwest::header::AUTHORIZATION, header)
        .send()
        .await
        .map_err(|e| fail(format!("request to {path} failed: {e}")))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(fail(format!("{path} returned {status}: {body}")));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| fail(format!("failed to deserialize {path} response: {e}")))
}
