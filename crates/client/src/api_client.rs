//! HTTP client for the WAY studio REST API.
//!
//! Wraps `reqwest` with base-URL joining, bearer-token attachment, and
//! error normalization into [`ApiError`]: non-2xx responses are parsed
//! through the `{success, message, data}` envelope, transport failures
//! become `ApiError::Network`. Typed wrappers cover each endpoint so views
//! never build paths or bodies by hand.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use way_shared::registration::RegistrationApi;
use way_shared::{
    ApiError, ApiResponse, AuthPayload, CapacityReport, ChangePasswordRequest, Event,
    EventRequest, FullClassRequest, LoginRequest, MyRegistrations, PasswordResetRequest,
    Product, ProductCategory, ProductRequest, RegisterRequest, RegisterSessionRequest,
    RegistrationRecord, ResetPasswordRequest, ResetTokenPayload, Schedule,
    SendVerificationRequest, UpdateProfileRequest, VerifyEmailRequest,
    VerifyResetCodeRequest,
};

use crate::config;

/// HTTP client for the studio API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: config::api_base_url(),
            token: None,
        }
    }

    /// Set the base URL for API requests
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Attach a bearer token to every request this client sends
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// A copy of this client carrying the given bearer token.
    fn authed(&self, token: &str) -> Self {
        self.clone().with_token(Some(token.to_string()))
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if self.base_url.is_empty() {
            if path.starts_with('/') {
                path.to_string()
            } else {
                format!("/{path}")
            }
        } else {
            let base = self.base_url.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            format!("{base}/{path}")
        }
    }

    /// Make a GET request, decoding the JSON response
    pub async fn get_json<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, ApiError> {
        let url = self.url(path);
        let mut rb = self.client.get(&url);
        if let Some(token) = &self.token {
            rb = rb.bearer_auth(token);
        }

        let resp = rb.send().await.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let is_success = resp.status().is_success();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read body: {e}")))?;

        if !is_success {
            return Err(ApiError::from_response(status, &text));
        }

        decode(&text)
    }

    /// Make a POST request with a JSON body, decoding the JSON response
    pub async fn post_json<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        let url = self.url(path);
        let mut rb = self.client.post(&url);
        if let Some(token) = &self.token {
            rb = rb.bearer_auth(token);
        }

        let resp = rb
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let is_success = resp.status().is_success();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read body: {e}")))?;

        if !is_success {
            return Err(ApiError::from_response(status, &text));
        }

        decode(&text)
    }

    // --- Schedules ---

    /// List schedules with their embedded sessions
    pub async fn schedules(&self) -> Result<Vec<Schedule>, ApiError> {
        let resp: ApiResponse<Vec<Schedule>> = self.get_json("/schedule").await?;
        Ok(resp.data.unwrap_or_default())
    }

    /// Per-session paid/total capacity for one schedule
    pub async fn schedule_capacity(&self, schedule_id: &str) -> Result<CapacityReport, ApiError> {
        let resp: ApiResponse<CapacityReport> = self
            .get_json(&format!("/registrations/schedule/{schedule_id}/capacity"))
            .await?;
        resp.data
            .ok_or_else(|| ApiError::Decode("capacity report missing data".into()))
    }

    // --- Auth ---

    pub async fn login(&self, req: &LoginRequest) -> Result<AuthPayload, ApiError> {
        let resp: ApiResponse<AuthPayload> = self.post_json("/auth/login", req).await?;
        resp.data
            .ok_or_else(|| ApiError::Decode("login response missing data".into()))
    }

    pub async fn register_account(&self, req: &RegisterRequest) -> Result<AuthPayload, ApiError> {
        let resp: ApiResponse<AuthPayload> = self.post_json("/auth/register", req).await?;
        resp.data
            .ok_or_else(|| ApiError::Decode("register response missing data".into()))
    }

    pub async fn verify_email(
        &self,
        req: &VerifyEmailRequest,
    ) -> Result<ApiResponse<serde_json::Value>, ApiError> {
        self.post_json("/auth/verify-email", req).await
    }

    pub async fn send_verification_code(
        &self,
        req: &SendVerificationRequest,
    ) -> Result<ApiResponse<serde_json::Value>, ApiError> {
        self.post_json("/auth/send-verification", req).await
    }

    // --- Account management ---

    pub async fn change_password(
        &self,
        token: &str,
        req: &ChangePasswordRequest,
    ) -> Result<ApiResponse<serde_json::Value>, ApiError> {
        self.authed(token).post_json("/user/change-password", req).await
    }

    pub async fn update_profile(
        &self,
        token: &str,
        req: &UpdateProfileRequest,
    ) -> Result<ApiResponse<serde_json::Value>, ApiError> {
        self.authed(token).post_json("/user/profile", req).await
    }

    pub async fn request_password_reset(
        &self,
        req: &PasswordResetRequest,
    ) -> Result<ApiResponse<serde_json::Value>, ApiError> {
        self.post_json("/user/request-password-reset", req).await
    }

    pub async fn verify_reset_code(
        &self,
        req: &VerifyResetCodeRequest,
    ) -> Result<ResetTokenPayload, ApiError> {
        let resp: ApiResponse<ResetTokenPayload> =
            self.post_json("/user/verify-reset-code", req).await?;
        resp.data
            .ok_or_else(|| ApiError::Decode("reset-code response missing data".into()))
    }

    pub async fn reset_password(
        &self,
        req: &ResetPasswordRequest,
    ) -> Result<ApiResponse<serde_json::Value>, ApiError> {
        self.post_json("/user/reset-password", req).await
    }

    // --- Events ---

    pub async fn events(&self) -> Result<Vec<Event>, ApiError> {
        let resp: ApiResponse<Vec<Event>> = self.get_json("/event").await?;
        Ok(resp.data.unwrap_or_default())
    }

    pub async fn request_event(
        &self,
        req: &EventRequest,
    ) -> Result<ApiResponse<serde_json::Value>, ApiError> {
        self.post_json("/event/request", req).await
    }

    // --- Shop ---

    pub async fn product_categories(&self) -> Result<Vec<ProductCategory>, ApiError> {
        let resp: ApiResponse<Vec<ProductCategory>> =
            self.get_json("/product-categories").await?;
        Ok(resp.data.unwrap_or_default())
    }

    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        let resp: ApiResponse<Vec<Product>> = self.get_json("/products").await?;
        Ok(resp.data.unwrap_or_default())
    }

    pub async fn products_in_category(&self, category_id: &str) -> Result<Vec<Product>, ApiError> {
        let resp: ApiResponse<Vec<Product>> = self
            .get_json(&format!("/products/category/{category_id}"))
            .await?;
        Ok(resp.data.unwrap_or_default())
    }

    pub async fn request_product(
        &self,
        req: &ProductRequest,
    ) -> Result<ApiResponse<serde_json::Value>, ApiError> {
        self.post_json("/product-requests", req).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let text = if text.is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// The seam the registration state machine talks through.
#[async_trait(?Send)]
impl RegistrationApi for ApiClient {
    async fn my_registrations(&self, token: &str) -> Result<Vec<RegistrationRecord>, ApiError> {
        let resp: ApiResponse<MyRegistrations> = self
            .authed(token)
            .get_json("/registrations/my-registrations")
            .await?;
        Ok(resp.data.map(|d| d.registrations).unwrap_or_default())
    }

    async fn submit_registration(
        &self,
        token: &str,
        schedule_id: &str,
        session_id: &str,
    ) -> Result<(), ApiError> {
        let req = RegisterSessionRequest {
            schedule_id: schedule_id.to_string(),
            session_id: session_id.to_string(),
        };
        let _: ApiResponse<serde_json::Value> =
            self.authed(token).post_json("/registrations", &req).await?;
        Ok(())
    }

    async fn request_full_class(
        &self,
        token: &str,
        schedule_id: &str,
        session_id: &str,
        message: &str,
    ) -> Result<(), ApiError> {
        let req = FullClassRequest {
            schedule_id: schedule_id.to_string(),
            session_id: session_id.to_string(),
            message: message.to_string(),
        };
        let _: ApiResponse<serde_json::Value> = self
            .authed(token)
            .post_json("/registrations/request-full-class", &req)
            .await?;
        Ok(())
    }
}
