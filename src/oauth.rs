use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::provider::ProviderClient;

/// Refresh a token once it is this close to expiring.
pub const REFRESH_WINDOW_HOURS: i64 = 24;

/// Tokens in the shape the platform stores on the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: String,
    /// RFC3339 UTC expiry.
    pub expires_on: String,
}

/// Account credentials the platform asks us to validate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub expires_on: String,
    #[serde(default)]
    pub refresh_token: String,
}

/// A validated (and possibly refreshed) account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedAccount {
    /// Email of the token owner, used as the account label.
    pub name: String,
    #[serde(flatten)]
    pub tokens: TokenSet,
}

#[derive(Debug, Deserialize)]
struct GrantResponse {
    access_token: String,
    #[serde(default)]
    expires_in: i64,
    #[serde(default)]
    refresh_token: String,
}

impl GrantResponse {
    fn into_token_set(self, now: DateTime<Utc>) -> TokenSet {
        TokenSet {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_on: (now + Duration::seconds(self.expires_in))
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OAuthClient {
    provider: ProviderClient,
    client_id: String,
    client_secret: String,
}

impl OAuthClient {
    pub fn new(config: &Config, provider: ProviderClient) -> Self {
        Self {
            provider,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }

    /// Provider URL the user is sent to in order to grant access.
    pub fn authorize_url(&self, callback_uri: &str, state: &str) -> Result<String> {
        let mut url = url::Url::parse(&self.provider.url("authorize"))
            .map_err(|e| Error::Config(format!("error parsing authorize url: {e}")))?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", callback_uri)
            .append_pair("state", state);
        Ok(url.into())
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TokenSet> {
        let form = [
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];
        let grant = self.grant(&form, None).await?;
        Ok(grant.into_token_set(Utc::now()))
    }

    /// Trade a refresh token for a new token pair.
    pub async fn refresh(&self, refresh_token: &str, access_token: &str) -> Result<TokenSet> {
        let form = [
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
        ];
        let grant = self.grant(&form, Some(access_token)).await?;
        Ok(grant.into_token_set(Utc::now()))
    }

    async fn grant(&self, form: &[(&str, &str)], bearer: Option<&str>) -> Result<GrantResponse> {
        let mut req = self.provider.http().post(self.provider.url("grant")).form(form);
        if let Some(token) = bearer.filter(|t| !t.is_empty()) {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| Error::Auth(format!("error executing grant request: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Auth(format!("grant request error: {}", status.as_u16())));
        }
        resp.json::<GrantResponse>()
            .await
            .map_err(|e| Error::Auth(format!("unable to decode grant response: {e}")))
    }

    /// Validate account credentials, refreshing them first when they are
    /// inside the refresh window.
    pub async fn validate(&self, fields: &AccountFields) -> Result<ValidatedAccount> {
        let tokens = if refresh_needed(&fields.expires_on, Utc::now(), REFRESH_WINDOW_HOURS)? {
            log::info!("Access token expires on {}, refreshing", fields.expires_on);
            self.refresh(&fields.refresh_token, &fields.access_token).await?
        } else {
            TokenSet {
                access_token: fields.access_token.clone(),
                refresh_token: fields.refresh_token.clone(),
                expires_on: fields.expires_on.clone(),
            }
        };

        let owner = self
            .provider
            .current_user(&tokens.access_token)
            .await
            .map_err(|e| Error::Auth(format!("token validation error: {e}")))?;

        Ok(ValidatedAccount {
            name: owner.email,
            tokens,
        })
    }
}

/// True once `now` is within `window_hours` of `expires_on`, or past it.
pub fn refresh_needed(expires_on: &str, now: DateTime<Utc>, window_hours: i64) -> Result<bool> {
    let expiration = DateTime::parse_from_rfc3339(expires_on).map_err(|e| {
        Error::Validation(format!("unable to parse token expiration time {expires_on:?}: {e}"))
    })?;
    let deadline = expiration.with_timezone(&Utc) - Duration::hours(window_hours);
    Ok(now >= deadline)
}
