//! Users API client helpers.
//!
//! Free functions performing network IO against `/api/v1/users*`. They are
//! called from commands only; callers map the results into compute updates.

use thiserror::Error;
use ustr::Ustr;

use crate::BusinessConfig;
use crate::http::{Client, HttpError, RequestBuilder};
use crate::session::Session;
use crate::users::model::{BatchRequest, ListUsersResponse, User};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsersApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API returned status: {0}")]
    Status(u16),
    #[error("failed to parse {what}: {message}")]
    Decode { what: &'static str, message: String },
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl From<HttpError> for UsersApiError {
    fn from(err: HttpError) -> Self {
        if err.timed_out {
            Self::Network(format!("request timed out ({})", err.message))
        } else {
            Self::Network(err.message)
        }
    }
}

pub type ApiResult<T> = Result<T, UsersApiError>;

/// The four batch endpoints under `/api/v1/users/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsersActionKind {
    Disable,
    Enable,
    MakeAdmin,
    MakeUser,
}

impl UsersActionKind {
    pub const ALL: [Self; 4] = [Self::Disable, Self::Enable, Self::MakeAdmin, Self::MakeUser];

    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Disable => "disable",
            Self::Enable => "enable",
            Self::MakeAdmin => "makeadmin",
            Self::MakeUser => "makeuser",
        }
    }

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            Self::Disable => "Disable Account",
            Self::Enable => "Enable Account",
            Self::MakeAdmin => "Make Admin",
            Self::MakeUser => "Make Normal",
        }
    }
}

fn authorize(request: RequestBuilder, config: &BusinessConfig, session: &Session) -> RequestBuilder {
    let request = request.timeout(config.request_timeout);
    match session.token() {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// GET `/api/v1/users`
pub async fn list_users(config: &BusinessConfig, session: &Session) -> ApiResult<Vec<User>> {
    let url = format!("{}/users", config.api_url());

    let response = authorize(Client::get(&url), config, session).send().await?;

    if !response.is_success() {
        log::warn!("GET {url} returned {}", response.status);
        return Err(UsersApiError::Status(response.status));
    }

    let list: ListUsersResponse = response.json().map_err(|e| UsersApiError::Decode {
        what: "ListUsersResponse",
        message: e.to_string(),
    })?;

    Ok(list.users)
}

/// POST `/api/v1/users/{endpoint}`
/// Body: `{ "users": [id, ...] }`
///
/// Any 2xx counts as success; the response body is ignored.
pub async fn apply_action(
    config: &BusinessConfig,
    session: &Session,
    kind: UsersActionKind,
    ids: &[Ustr],
) -> ApiResult<()> {
    let url = format!("{}/users/{}", config.api_url(), kind.endpoint());
    let body = BatchRequest {
        users: ids.iter().map(Ustr::as_str).collect(),
    };

    let request = Client::post(&url)
        .json(&body)
        .map_err(|e| UsersApiError::Encode(e.to_string()))?;
    let response = authorize(request, config, session).send().await?;

    if !response.is_success() {
        log::warn!("POST {url} returned {}", response.status);
        return Err(UsersApiError::Status(response.status));
    }

    Ok(())
}
