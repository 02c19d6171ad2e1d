//! HTTP client for an Egeria OMAG server platform.
//!
//! [`ServerClient`] owns the connection pool, the bearer token and the URL
//! layout shared by every view service. Per-domain managers in
//! [`crate::omvs`] are thin layers over it. All wire types for the token
//! exchange are private to this module.

pub mod blocking;
pub mod body;
pub mod response;
pub mod validate;

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, trace};

use crate::core::config::{Config, ServerConfig};
use crate::core::error::{EgeriaError, ExceptionReport, Result};

use self::response::check_response;
use self::validate::{validate_name, validate_url, validate_user_id};

// ── Public client ─────────────────────────────────────────────────────────────

/// Connection to one platform / view server pair.
///
/// Cheap to clone: `reqwest::Client` is an `Arc` internally and clones share
/// the bearer token, so a token issued through one clone is used by all.
#[derive(Debug, Clone)]
pub struct ServerClient {
    http: Client,
    platform_url: Url,
    view_server: String,
    user_id: String,
    user_password: Option<String>,
    page_size: u32,
    local_qualifier: Option<String>,
    token: Arc<RwLock<Option<String>>>,
}

impl ServerClient {
    /// Build a client from server settings and an optional password.
    ///
    /// The password is only used to request bearer tokens; it is never sent
    /// on ordinary requests.
    pub fn new(settings: &ServerConfig, user_password: Option<String>) -> Result<Self> {
        let platform_url = validate_url(&settings.platform_url)?;
        validate_name("view_server", &settings.view_server)?;
        validate_user_id(&settings.user_id)?;

        let mut builder = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .danger_accept_invalid_certs(!settings.verify_tls)
            .user_agent(concat!("egeria-client/", env!("CARGO_PKG_VERSION")));
        if !settings.use_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| EgeriaError::Connection(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            platform_url,
            view_server: settings.view_server.trim().to_string(),
            user_id: settings.user_id.trim().to_string(),
            user_password,
            page_size: 0,
            local_qualifier: None,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Build a client from a fully-resolved [`Config`].
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut client = Self::new(&config.server, config.user_password.clone())?;
        client.page_size = config.defaults.page_size;
        client.local_qualifier = config.defaults.local_qualifier.clone();
        Ok(client)
    }

    pub fn platform_url(&self) -> &str {
        self.platform_url.as_str().trim_end_matches('/')
    }

    pub fn view_server(&self) -> &str {
        &self.view_server
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Page size used when a request leaves it at `0`.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn local_qualifier(&self) -> Option<&str> {
        self.local_qualifier.as_deref()
    }

    /// Qualified name for a new element, prefixed with the configured local
    /// qualifier when there is one.
    pub fn qualified_name(&self, type_name: &str, display_name: &str, version: Option<&str>) -> Result<String> {
        validate::qualified_name(type_name, display_name, self.local_qualifier(), version)
    }

    // ── URLs ──────────────────────────────────────────────────────────────

    /// Platform URL extended by `segments`, each percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.platform_url.clone();
        url.path_segments_mut()
            .map_err(|_| EgeriaError::invalid("platform_url", "cannot be used as a base URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `{platform}/servers/{view_server}/api/open-metadata/{marker}/{segments..}`
    pub fn view_service_url(&self, marker: &str, segments: &[&str]) -> Result<Url> {
        let mut all = vec!["servers", self.view_server.as_str(), "api", "open-metadata", marker];
        all.extend_from_slice(segments);
        self.endpoint(&all)
    }

    // ── Bearer token ──────────────────────────────────────────────────────

    /// Exchange user id and password for a bearer token and keep it for
    /// subsequent requests. `None` arguments fall back to the configured
    /// user and `EGERIA_USER_PASSWORD`.
    pub async fn create_egeria_bearer_token(
        &self,
        user_id: Option<&str>,
        password: Option<&str>,
    ) -> Result<String> {
        let user_id = user_id.unwrap_or(&self.user_id);
        validate_user_id(user_id)?;
        let password = password
            .or(self.user_password.as_deref())
            .ok_or_else(|| EgeriaError::invalid("password", "no password given and none configured"))?;

        let url = self.endpoint(&["api", "token"])?;
        let body = TokenRequest { user_id, password };
        let (status, text) = self.send(Method::POST, url, Some(&body), false).await?;
        if !status.is_success() {
            check_response(status, &text)?;
        }

        // Token failures can arrive as a JSON envelope under a 200 status.
        if let Ok(json) = serde_json::from_str::<Value>(&text) {
            if json.get("relatedHTTPCode").is_some() {
                check_response(status, &text)?;
                return Err(EgeriaError::NotAuthorized(ExceptionReport {
                    related_http_code: status.as_u16(),
                    message: "token endpoint returned a response envelope instead of a token".into(),
                    ..Default::default()
                }));
            }
        }

        let token = text.trim().to_string();
        if token.is_empty() {
            return Err(EgeriaError::NotAuthorized(ExceptionReport {
                related_http_code: status.as_u16(),
                message: "token endpoint returned an empty token".into(),
                ..Default::default()
            }));
        }

        self.set_bearer_token(token.clone());
        info!(user_id = %user_id, "bearer token issued");
        Ok(token)
    }

    /// Re-issue the token with the configured credentials.
    pub async fn refresh_egeria_bearer_token(&self) -> Result<String> {
        self.create_egeria_bearer_token(None, None).await
    }

    pub fn set_bearer_token(&self, token: impl Into<String>) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.into());
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn clear_bearer_token(&self) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    // ── Platform services ─────────────────────────────────────────────────

    /// Text describing the platform build, e.g. `Egeria OMAG Server Platform (version 5.2)`.
    pub async fn get_platform_origin(&self) -> Result<String> {
        let url = self.endpoint(&[
            "open-metadata",
            "platform-services",
            "users",
            &self.user_id,
            "server-platform",
            "origin",
        ])?;
        let (status, text) = self.send::<()>(Method::GET, url, None, true).await?;
        if !status.is_success() {
            check_response(status, &text)?;
        }
        Ok(text.trim().to_string())
    }

    // ── Requests ──────────────────────────────────────────────────────────

    /// Send one request and return the checked JSON response.
    pub async fn make_request<B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let (status, text) = self.send(method, url, body, true).await?;
        if tracing::enabled!(tracing::Level::TRACE) {
            trace!(%status, response = %text, "full Egeria response payload");
        }
        check_response(status, &text)
    }

    pub async fn post<B>(&self, url: Url, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.make_request(Method::POST, url, Some(body)).await
    }

    pub async fn get(&self, url: Url) -> Result<Value> {
        self.make_request::<()>(Method::GET, url, None).await
    }

    async fn send<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        with_token: bool,
    ) -> Result<(StatusCode, String)>
    where
        B: Serialize + ?Sized,
    {
        debug!(%method, url = %url, has_body = body.is_some(), "sending Egeria request");

        let mut req = self.http.request(method, url.clone());
        if let Some(body) = body {
            if tracing::enabled!(tracing::Level::TRACE) {
                let json = serde_json::to_string_pretty(body)
                    .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
                trace!(payload = %json, "full Egeria request payload");
            }
            req = req.json(body);
        }
        if with_token {
            if let Some(token) = self.bearer_token() {
                req = req.bearer_auth(token);
            }
        }

        let response = req.send().await.map_err(|e| {
            error!(url = %url, error = %e, "Egeria HTTP request failed (transport)");
            EgeriaError::Connection(e.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| EgeriaError::Connection(format!("failed to read response body: {e}")))?;
        Ok((status, text))
    }
}

/// Append query parameters to `url`.
pub(crate) fn with_query(mut url: Url, pairs: &[(&str, String)]) -> Url {
    if !pairs.is_empty() {
        let mut query = url.query_pairs_mut();
        for (key, value) in pairs {
            query.append_pair(key, value);
        }
    }
    url
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenRequest<'a> {
    user_id: &'a str,
    password: &'a str,
}
