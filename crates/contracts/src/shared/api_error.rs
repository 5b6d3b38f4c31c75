//! Error shape shared by every API call.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Falha de comunicação com o servidor: {0}")]
    Network(String),

    /// HTTP 401. The session has already been cleared and the user redirected.
    #[error("Sessão expirada. Faça login novamente.")]
    Unauthorized,

    /// Any other non-2xx response.
    #[error("{}", join_detail(.message, .detail.as_deref()))]
    Http {
        status: u16,
        message: String,
        detail: Option<String>,
    },

    /// A 2xx response whose body is not what the caller expected.
    #[error("Resposta inválida do servidor: {0}")]
    Decode(String),
}

fn join_detail(message: &str, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("{message}\n{detail}"),
        None => message.to_string(),
    }
}

impl ApiError {
    /// Builds the error for a non-2xx response.
    ///
    /// Message priority: `error` > `message`/`mensagem` > flattened
    /// `errors`/`erros` > `"{status} {statusText}"`. A `detail`/`detalhe` line is
    /// kept when present and different from the message.
    pub fn from_response(status: u16, status_text: &str, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }

        let status_line = format!("{status} {status_text}").trim().to_string();
        let parsed = serde_json::from_str::<Value>(body).ok();

        let Some(Value::Object(map)) = parsed else {
            return ApiError::Http {
                status,
                message: status_line,
                detail: None,
            };
        };

        let text = |key: &str| {
            map.get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let message = text("error")
            .or_else(|| text("message"))
            .or_else(|| text("mensagem"))
            .or_else(|| {
                map.get("errors")
                    .or_else(|| map.get("erros"))
                    .and_then(flatten_field_errors)
            })
            .unwrap_or(status_line);

        let detail = text("detail")
            .or_else(|| text("detalhe"))
            .filter(|d| *d != message);

        ApiError::Http {
            status,
            message,
            detail,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// `{ "nome": "obrigatório", "cpf": ["inválido", "duplicado"] }` ->
/// `"nome: obrigatório; cpf: inválido, duplicado"`
fn flatten_field_errors(errors: &Value) -> Option<String> {
    let parts: Vec<String> = match errors {
        Value::Object(map) => map
            .iter()
            .filter_map(|(field, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    Value::Array(items) => items
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(", "),
                    other => other.to_string(),
                };
                (!text.is_empty()).then(|| format!("{field}: {text}"))
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_of(err: ApiError) -> (String, Option<String>) {
        match err {
            ApiError::Http {
                message, detail, ..
            } => (message, detail),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_error_field_has_priority() {
        let body = r#"{"error":"Nome já cadastrado","message":"Bad Request"}"#;
        let (message, detail) = message_of(ApiError::from_response(400, "Bad Request", body));
        assert_eq!(message, "Nome já cadastrado");
        assert_eq!(detail, None);
    }

    #[test]
    fn test_message_then_field_errors() {
        let (message, _) = message_of(ApiError::from_response(
            422,
            "Unprocessable Entity",
            r#"{"mensagem":"Dados inválidos"}"#,
        ));
        assert_eq!(message, "Dados inválidos");

        let (message, _) = message_of(ApiError::from_response(
            422,
            "Unprocessable Entity",
            r#"{"errors":{"cpf":["inválido","duplicado"],"nome":"obrigatório"}}"#,
        ));
        assert_eq!(message, "cpf: inválido, duplicado; nome: obrigatório");
    }

    #[test]
    fn test_detail_appended_when_distinct() {
        let err = ApiError::from_response(
            409,
            "Conflict",
            r#"{"message":"Conflito","detail":"Setor possui colaboradores ativos"}"#,
        );
        assert_eq!(
            err.to_string(),
            "Conflito\nSetor possui colaboradores ativos"
        );

        let (_, detail) = message_of(ApiError::from_response(
            409,
            "Conflict",
            r#"{"message":"Conflito","detail":"Conflito"}"#,
        ));
        assert_eq!(detail, None);
    }

    #[test]
    fn test_empty_or_unparsable_body_uses_status_line() {
        let (message, _) = message_of(ApiError::from_response(500, "Internal Server Error", ""));
        assert_eq!(message, "500 Internal Server Error");

        let (message, _) = message_of(ApiError::from_response(502, "Bad Gateway", "<html>"));
        assert_eq!(message, "502 Bad Gateway");

        let (message, _) = message_of(ApiError::from_response(404, "Not Found", "{}"));
        assert_eq!(message, "404 Not Found");
    }

    #[test]
    fn test_401_is_unauthorized() {
        let err = ApiError::from_response(401, "Unauthorized", r#"{"error":"token"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
    }
}
