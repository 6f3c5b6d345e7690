//! Request wrappers for the notification and user routes.

use crate::config::{ClientConfig, ConfigError};
use crate::error::{ApiError, ApiResult};
use dengue_core::constants::{HEALTH_PATH, NOTIFICATIONS_PATH, USERS_PATH};
use dengue_core::{ApiEnvelope, NotificationRecord, User, UserPatch};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Stateless wrapper around the dengue notification API.
///
/// Cloning is cheap; clones share one connection pool. Every operation resolves exactly once,
/// either with the decoded body or with a normalised [`ApiError`]. Nothing is retried.
#[derive(Clone, Debug)]
pub struct NotificationClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl NotificationClient {
    /// Build a client for the API described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Build`] if the underlying HTTP client cannot be initialised.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET {base}/../health`.
    ///
    /// The body is returned as-is: any JSON success response means the API is reachable,
    /// whatever shape the server gives it.
    pub async fn health_check(&self) -> ApiResult<serde_json::Value> {
        self.execute(self.request(Method::GET, HEALTH_PATH)).await
    }

    /// `POST {base}/dengue-notifications`.
    pub async fn create(
        &self,
        record: &NotificationRecord,
    ) -> ApiResult<ApiEnvelope<NotificationRecord>> {
        self.execute_with_body(Method::POST, NOTIFICATIONS_PATH, record)
            .await
    }

    /// `GET {base}/dengue-notifications`.
    pub async fn list(&self) -> ApiResult<ApiEnvelope<Vec<NotificationRecord>>> {
        self.execute(self.request(Method::GET, NOTIFICATIONS_PATH))
            .await
    }

    /// `GET {base}/dengue-notifications/{id}`.
    pub async fn get_by_id(&self, id: i64) -> ApiResult<ApiEnvelope<NotificationRecord>> {
        self.execute(self.request(Method::GET, &notification_path(id)))
            .await
    }

    /// `PUT {base}/dengue-notifications/{id}`.
    pub async fn update(
        &self,
        id: i64,
        record: &NotificationRecord,
    ) -> ApiResult<ApiEnvelope<NotificationRecord>> {
        self.execute_with_body(Method::PUT, &notification_path(id), record)
            .await
    }

    /// `DELETE {base}/dengue-notifications/{id}`.
    ///
    /// The payload of a delete envelope is opaque and passed through as JSON.
    pub async fn delete(&self, id: i64) -> ApiResult<ApiEnvelope<serde_json::Value>> {
        self.execute(self.request(Method::DELETE, &notification_path(id)))
            .await
    }

    /// `POST {base}/users`.
    pub async fn create_user(&self, user: &User) -> ApiResult<ApiEnvelope<User>> {
        self.execute_with_body(Method::POST, USERS_PATH, user).await
    }

    /// `GET {base}/users`.
    pub async fn list_users(&self) -> ApiResult<ApiEnvelope<Vec<User>>> {
        self.execute(self.request(Method::GET, USERS_PATH)).await
    }

    /// `GET {base}/users/{id}`.
    pub async fn get_user(&self, id: i64) -> ApiResult<ApiEnvelope<User>> {
        self.execute(self.request(Method::GET, &user_path(id)))
            .await
    }

    /// `PUT {base}/users/{id}`.
    pub async fn update_user(&self, id: i64, patch: &UserPatch) -> ApiResult<ApiEnvelope<User>> {
        self.execute_with_body(Method::PUT, &user_path(id), patch)
            .await
    }

    /// `DELETE {base}/users/{id}`.
    pub async fn delete_user(&self, id: i64) -> ApiResult<ApiEnvelope<serde_json::Value>> {
        self.execute(self.request(Method::DELETE, &user_path(id)))
            .await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.config.endpoint(path))
    }

    async fn execute_with_body<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(method, path).json(body)).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let result = self.send(request).await;
        if let Err(err) = &result {
            tracing::error!("API request failed: {err}");
        }
        result
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().to_string();
        tracing::debug!(%status, %url, "API response");

        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::from_response(status, &url, &body));
        }

        serde_json::from_slice(&body).map_err(|e| {
            tracing::debug!("failed to decode response body from {url}: {e}");
            ApiError::undecodable(status, &url)
        })
    }
}

fn notification_path(id: i64) -> String {
    format!("{NOTIFICATIONS_PATH}/{id}")
}

fn user_path(id: i64) -> String {
    format!("{USERS_PATH}/{id}")
}
