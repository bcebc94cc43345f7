//! REST adapter implementing every backend trait over `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use deskhub_core::config::BackendConfig;
use deskhub_core::error::{AppError, ErrorKind};
use deskhub_core::result::AppResult;
use deskhub_core::types::UserId;
use deskhub_entity::chat::ChatSummary;
use deskhub_entity::notification::NotificationPreferences;

use crate::backend::{
    ChatSource, PreferencesBackend, PresenceActivity, PresenceBackend, PresenceUpdate, RoleSource,
    SessionBackend, SessionToken,
};
use crate::dto::{self, Envelope, PreferencesRecordDto, SessionTokenDto};

const ACTIVE_CHATS: &str = "csa/active-chats";
const PROFILE_SETTINGS: &str = "csa/profile-settings";
const CUSTOMER_SUPPORT_ACTIVITY: &str = "csa/customer-support-activity";
const EXTEND_SESSION: &str = "auth/jwt/extend";
const LOGOUT: &str = "accounts/logout";
const USER_ROLE: &str = "accounts/user-role";

/// HTTP client for the console backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    /// Shared connection pool.
    http: Client,
    /// Base URL with a trailing slash.
    base_url: Url,
}

impl HttpBackend {
    /// Build a client from configuration.
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let mut base = config.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base).map_err(|e| {
            AppError::configuration(format!("Invalid backend URL '{}': {e}", config.base_url))
        })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::with_source(ErrorKind::Configuration, "HTTP client", e))?;

        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::internal(format!("Bad endpoint path '{path}': {e}")))
    }

    /// Send a request and decode the `{"response": ...}` envelope.
    async fn send<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> AppResult<Option<T>>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let path = url.path().to_string();
        debug!(%method, path, "Backend request");

        let mut request = self.http.request(method.clone(), url);
        if let Some(body) = body {
            let json = serde_json::to_vec(body)?;
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(json);
        }

        let response = request.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Network,
                format!("{method} {path} failed: {e}"),
                e,
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%method, path, %status, "Backend rejected request");
            return Err(AppError::network(format!(
                "{method} {path} failed with status {status}"
            )));
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Network,
                format!("{method} {path}: failed to read body: {e}"),
                e,
            )
        })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let envelope: Envelope<T> = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::invalid_response(format!("{method} {path}: unexpected payload: {e}"))
        })?;
        Ok(envelope.response)
    }
}

#[async_trait]
impl ChatSource for HttpBackend {
    async fn active_chats(&self) -> AppResult<Vec<ChatSummary>> {
        let url = self.url(ACTIVE_CHATS)?;
        let rows: Option<Vec<Value>> = self.send::<(), _>(Method::GET, url, None).await?;
        Ok(dto::narrow_chats(rows.unwrap_or_default()))
    }
}

#[async_trait]
impl PreferencesBackend for HttpBackend {
    async fn fetch_preferences(
        &self,
        user_id: &UserId,
    ) -> AppResult<Option<NotificationPreferences>> {
        let mut url = self.url(PROFILE_SETTINGS)?;
        url.query_pairs_mut().append_pair("userId", user_id.as_str());
        let raw: Option<Value> = self.send::<(), _>(Method::GET, url, None).await?;
        dto::narrow_preferences(raw)
    }

    async fn save_preferences(
        &self,
        user_id: &UserId,
        preferences: &NotificationPreferences,
    ) -> AppResult<()> {
        let url = self.url(PROFILE_SETTINGS)?;
        let body = PreferencesRecordDto {
            user_id,
            preferences,
        };
        self.send::<_, Value>(Method::POST, url, Some(&body)).await?;
        Ok(())
    }
}

#[async_trait]
impl PresenceBackend for HttpBackend {
    async fn current_presence(&self) -> AppResult<Option<PresenceActivity>> {
        let url = self.url(CUSTOMER_SUPPORT_ACTIVITY)?;
        let raw: Option<Value> = self.send::<(), _>(Method::GET, url, None).await?;
        dto::narrow_presence_activity(raw)
    }

    async fn update_presence(&self, update: &PresenceUpdate) -> AppResult<()> {
        let url = self.url(CUSTOMER_SUPPORT_ACTIVITY)?;
        self.send::<_, Value>(Method::POST, url, Some(update)).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionBackend for HttpBackend {
    async fn extend_session(&self) -> AppResult<Option<SessionToken>> {
        let url = self.url(EXTEND_SESSION)?;
        let dto: Option<SessionTokenDto> = self.send::<(), _>(Method::POST, url, None).await?;
        Ok(dto.and_then(SessionTokenDto::narrow))
    }

    async fn logout(&self) -> AppResult<()> {
        let url = self.url(LOGOUT)?;
        self.send::<(), Value>(Method::POST, url, None).await?;
        Ok(())
    }
}

#[async_trait]
impl RoleSource for HttpBackend {
    async fn authorities(&self) -> AppResult<Vec<String>> {
        let url = self.url(USER_ROLE)?;
        let raw: Option<Vec<String>> = self.send::<(), _>(Method::GET, url, None).await?;
        Ok(dto::narrow_authorities(raw))
    }
}
