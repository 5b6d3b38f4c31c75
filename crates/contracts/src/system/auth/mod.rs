use serde::{Deserialize, Serialize};

use crate::domain::common::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    #[serde(rename = "senha")]
    pub password: String,
}

/// `POST /auth/login` response. Fields may be missing on older backends; the
/// session store falls back to the token claims for those.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "expiraEm", default)]
    pub expires_at: Option<String>,
    #[serde(rename = "usuarioId", default)]
    pub user_id: Option<RecordId>,
    #[serde(rename = "colaboradorId", default)]
    pub employee_id: Option<RecordId>,
    #[serde(rename = "colaboradorNome", default)]
    pub employee_name: Option<String>,
    #[serde(rename = "nivelAcesso", default)]
    pub access_level: Option<String>,
}

/// Claims read from the token payload (second JWT segment).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    /// Expiration, seconds since the epoch
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(rename = "usuarioId", default)]
    pub user_id: Option<RecordId>,
    #[serde(rename = "colaboradorId", default)]
    pub employee_id: Option<RecordId>,
    #[serde(rename = "colaboradorNome", default)]
    pub employee_name: Option<String>,
    #[serde(rename = "nivelAcesso", default)]
    pub access_level: Option<String>,
}

/// `GET /auth/me`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(rename = "usuarioId", default)]
    pub user_id: Option<RecordId>,
    #[serde(default)]
    pub login: String,
    #[serde(rename = "colaboradorId", default)]
    pub employee_id: Option<RecordId>,
    #[serde(rename = "colaboradorNome", default)]
    pub employee_name: Option<String>,
    #[serde(rename = "nivelAcesso", default)]
    pub access_level: Option<String>,
}

/// `PUT /auth/alterar-senha`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(rename = "senhaAtual")]
    pub current_password: String,
    #[serde(rename = "novaSenha")]
    pub new_password: String,
}

/// `PUT /auth/alterar-login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeLoginRequest {
    #[serde(rename = "novoLogin")]
    pub new_login: String,
    #[serde(rename = "senha")]
    pub password: String,
}

pub const MIN_PASSWORD_LEN: usize = 6;

/// Checks the change-password form before it is sent.
pub fn validate_password_change(
    current: &str,
    new_password: &str,
    confirmation: &str,
) -> Result<ChangePasswordRequest, String> {
    if current.is_empty() {
        return Err("Informe a senha atual".into());
    }
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "A nova senha deve ter ao menos {MIN_PASSWORD_LEN} caracteres"
        ));
    }
    if new_password != confirmation {
        return Err("A confirmação não confere com a nova senha".into());
    }
    if new_password == current {
        return Err("A nova senha deve ser diferente da atual".into());
    }
    Ok(ChangePasswordRequest {
        current_password: current.to_string(),
        new_password: new_password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_from_backend() {
        let body = r#"{"token":"a.b.c","expiraEm":"2024-06-10T18:00:00Z","usuarioId":3,"colaboradorId":7,"colaboradorNome":"Ana Souza","nivelAcesso":"ADMIN"}"#;
        let resp: LoginResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.employee_id, Some(7));
        assert_eq!(resp.access_level.as_deref(), Some("ADMIN"));

        let resp: LoginResponse = serde_json::from_str(r#"{"token":"a.b.c"}"#).unwrap();
        assert!(resp.expires_at.is_none());
    }

    #[test]
    fn test_password_change_rules() {
        assert!(validate_password_change("", "segredo1", "segredo1").is_err());
        assert!(validate_password_change("antiga", "abc", "abc").is_err());
        assert!(validate_password_change("antiga", "segredo1", "segredo2").is_err());
        assert!(validate_password_change("segredo1", "segredo1", "segredo1").is_err());
        let req = validate_password_change("antiga", "segredo1", "segredo1").unwrap();
        assert_eq!(req.new_password, "segredo1");
    }
}
