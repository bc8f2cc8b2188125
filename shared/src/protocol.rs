use crate::{Session, User};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or suffix), relative to the identity service base URL.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
}

// =========================================================
// Identity (GoTrue) Request Definitions
// =========================================================

/// Register a new email/password account
#[derive(Debug, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
}

/// Sign-up answers with a full session when the project auto-confirms
/// accounts, and with the bare user while email verification is pending.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(Session),
    User(User),
}

impl ApiRequest for SignUpRequest {
    type Response = SignUpResponse;
    const PATH: &'static str = "/auth/v1/signup";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Exchange email/password for a session
#[derive(Debug, Serialize, Deserialize)]
pub struct PasswordGrantRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for PasswordGrantRequest {
    type Response = Session;
    const PATH: &'static str = "/auth/v1/token?grant_type=password";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Exchange a refresh token for a new session
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

impl ApiRequest for RefreshTokenRequest {
    type Response = Session;
    const PATH: &'static str = "/auth/v1/token?grant_type=refresh_token";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Revoke the current session (authenticated with the access token)
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    // 204 No Content
    type Response = ();
    const PATH: &'static str = "/auth/v1/logout";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Error payload returned by the identity service.
///
/// Different GoTrue versions put the human readable message in different
/// fields, so all of them are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl IdentityErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.msg
            .or(self.error_description)
            .or(self.message)
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}
