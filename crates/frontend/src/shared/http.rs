//! Authorized HTTP wrapper around `gloo-net`.
//!
//! Single attempt, no timeout. Attaches the bearer token and turns a 401 into
//! "clear the session and go to the login page". Interpreting the status is
//! left to the caller (see [`RawResponse::into_json`]).

use contracts::shared::api_error::ApiError;
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::api_utils::api_url;
use crate::shared::config::LOGIN_ROUTE;
use crate::system::auth::storage::{browser_session, KeyValueStore, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    fn builder(&self, url: &str) -> RequestBuilder {
        match self {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Delete => Request::delete(url),
        }
    }
}

/// Where the app is and how to leave it.
pub trait Navigator {
    fn current_path(&self) -> String;
    fn redirect(&self, path: &str);
}

/// Hard navigation through `window.location`
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default()
    }

    fn redirect(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            if window.location().set_href(path).is_err() {
                log::error!("Failed to navigate to {path}");
            }
        }
    }
}

/// Clears the session and sends the user to the login page unless already
/// there. Returns whether a redirect was issued.
pub fn handle_unauthorized<S: KeyValueStore, N: Navigator>(
    session: &SessionStore<S>,
    navigator: &N,
    login_route: &str,
) -> bool {
    session.clear();
    if navigator.current_path() == login_route {
        return false;
    }
    log::info!("401 received, redirecting to {login_route}");
    navigator.redirect(login_route);
    true
}

pub fn bearer(token: Option<&str>) -> Option<String> {
    token
        .filter(|t| !t.is_empty())
        .map(|t| format!("Bearer {t}"))
}

/// Status line and body of a finished request.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `Ok(None)` for 204 or an empty body; `Err` for any non-2xx.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<Option<T>, ApiError> {
        if !self.is_success() {
            return Err(ApiError::from_response(
                self.status,
                &self.status_text,
                &self.body,
            ));
        }
        if self.status == 204 || self.body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&self.body)
            .map(Some)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Sends `method path` against the API base with the session token.
pub async fn send(method: Method, path: &str, body: Option<String>) -> Result<RawResponse, ApiError> {
    let session = browser_session();
    let url = api_url(path);
    log::debug!("{} {}", method.as_str(), path);

    let mut builder = method.builder(&url).header("Accept", "application/json");
    if let Some(auth) = bearer(session.get_token().as_deref()) {
        builder = builder.header("Authorization", &auth);
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(json),
        None => builder.build(),
    }
    .map_err(|e| ApiError::Network(e.to_string()))?;

    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let status = response.status();
    if status == 401 {
        handle_unauthorized(&session, &BrowserNavigator, LOGIN_ROUTE);
        return Err(ApiError::Unauthorized);
    }

    let status_text = response.status_text();
    let body = read_body(response.text().await)?;
    if !response.ok() {
        log::warn!("{} {} -> {} {}", method.as_str(), path, status, status_text);
    }
    Ok(RawResponse {
        status,
        status_text,
        body,
    })
}

/// A body that cannot be read is a transport failure, never an empty body.
fn read_body<E: std::fmt::Display>(read: Result<String, E>) -> Result<String, ApiError> {
    read.map_err(|e| ApiError::Network(e.to_string()))
}

pub async fn send_json<B: Serialize>(
    method: Method,
    path: &str,
    payload: &B,
) -> Result<RawResponse, ApiError> {
    let body = serde_json::to_string(payload).map_err(|e| ApiError::Decode(e.to_string()))?;
    send(method, path, Some(body)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::storage::MemoryStore;
    use chrono::{Duration, Utc};
    use contracts::system::auth::LoginResponse;
    use std::cell::RefCell;

    struct FakeNavigator {
        path: String,
        visited: RefCell<Vec<String>>,
    }

    impl FakeNavigator {
        fn at(path: &str) -> Self {
            Self {
                path: path.to_string(),
                visited: RefCell::new(Vec::new()),
            }
        }
    }

    impl Navigator for FakeNavigator {
        fn current_path(&self) -> String {
            self.path.clone()
        }

        fn redirect(&self, path: &str) {
            self.visited.borrow_mut().push(path.to_string());
        }
    }

    fn logged_in() -> SessionStore<MemoryStore> {
        let session = SessionStore::new(MemoryStore::default(), "auth_session", Duration::minutes(30));
        session.save_at(
            &LoginResponse {
                token: "a.e30.c".into(),
                expires_at: Some((Utc::now() + Duration::hours(1)).to_rfc3339()),
                ..Default::default()
            },
            Utc::now(),
        );
        session
    }

    #[test]
    fn test_unauthorized_clears_and_redirects() {
        let session = logged_in();
        assert!(session.get_token().is_some());
        let nav = FakeNavigator::at("/clientes");

        assert!(handle_unauthorized(&session, &nav, "/login"));
        assert!(session.get_token().is_none());
        assert_eq!(nav.visited.borrow().as_slice(), ["/login".to_string()]);
    }

    #[test]
    fn test_unauthorized_on_login_page_does_not_redirect() {
        let session = logged_in();
        let nav = FakeNavigator::at("/login");
        assert!(!handle_unauthorized(&session, &nav, "/login"));
        assert!(session.get_token().is_none());
        assert!(nav.visited.borrow().is_empty());
    }

    #[test]
    fn test_unreadable_body_is_network_error() {
        assert_eq!(read_body::<String>(Ok("[]".into())), Ok("[]".to_string()));
        assert_eq!(
            read_body(Err("connection reset")),
            Err(ApiError::Network("connection reset".to_string()))
        );
    }

    #[test]
    fn test_bearer() {
        assert_eq!(bearer(Some("abc")).as_deref(), Some("Bearer abc"));
        assert_eq!(bearer(Some("")), None);
        assert_eq!(bearer(None), None);
    }

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            status_text: "Status".into(),
            body: body.into(),
        }
    }

    #[test]
    fn test_into_json() {
        let empty: Option<serde_json::Value> = raw(204, "").into_json().unwrap();
        assert!(empty.is_none());
        let empty: Option<serde_json::Value> = raw(200, "  ").into_json().unwrap();
        assert!(empty.is_none());

        let list: Option<Vec<i32>> = raw(200, "[1,2]").into_json().unwrap();
        assert_eq!(list, Some(vec![1, 2]));

        let bad = raw(200, "<html>").into_json::<Vec<i32>>().unwrap_err();
        assert!(matches!(bad, ApiError::Decode(_)));

        let err = raw(409, r#"{"message":"Nome duplicado"}"#)
            .into_json::<Vec<i32>>()
            .unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.to_string(), "Nome duplicado");
    }
}
