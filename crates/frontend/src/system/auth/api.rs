use contracts::shared::api_error::ApiError;
use contracts::system::auth::{
    ChangeLoginRequest, ChangePasswordRequest, CurrentUser, LoginRequest, LoginResponse,
};

use crate::shared::crud_api::{get_json, write_json};
use crate::shared::http::{send_json, Method};

const INVALID_CREDENTIALS: &str = "Login ou senha inválidos";

/// `POST /auth/login`
pub async fn login(login: String, password: String) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest { login, password };
    let response = send_json(Method::Post, "/auth/login", &request).await;
    let response = match response {
        Err(ApiError::Unauthorized) => return Err(invalid_credentials()),
        other => other?,
    };
    response
        .into_json::<LoginResponse>()?
        .filter(|r| !r.token.is_empty())
        .ok_or_else(|| ApiError::Decode("resposta de login sem token".to_string()))
}

fn invalid_credentials() -> ApiError {
    ApiError::Http {
        status: 401,
        message: INVALID_CREDENTIALS.to_string(),
        detail: None,
    }
}

/// `GET /auth/me`
pub async fn me() -> Result<Option<CurrentUser>, ApiError> {
    get_json("/auth/me").await
}

/// `PUT /auth/alterar-senha`
pub async fn change_password(request: &ChangePasswordRequest) -> Result<(), ApiError> {
    write_json::<_, serde_json::Value>(Method::Put, "/auth/alterar-senha", request)
        .await
        .map(drop)
}

/// `PUT /auth/alterar-login`
pub async fn change_login(request: &ChangeLoginRequest) -> Result<(), ApiError> {
    write_json::<_, serde_json::Value>(Method::Put, "/auth/alterar-login", request)
        .await
        .map(drop)
}
