use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone, Utc};
use contracts::domain::common::RecordId;
use contracts::system::auth::{LoginResponse, TokenClaims};
use serde::{Deserialize, Serialize};
use web_sys::window;

use crate::shared::config::{session_idle_window, SESSION_STORAGE_KEY};

/// Minimal string key/value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = get_local_storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage rejected write for {key}");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Process-local store, used when no browser storage is around.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore(Arc<Mutex<HashMap<String, String>>>);

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut map) = self.0.lock() {
            map.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.0.lock() {
            map.remove(key);
        }
    }
}

/// What is persisted under the session key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub token: String,
    /// RFC 3339, or a local timestamp without offset
    pub expires_at: Option<String>,
    pub user_id: Option<RecordId>,
    pub employee_id: Option<RecordId>,
    pub employee_name: Option<String>,
    pub access_level: Option<String>,
    /// Unix milliseconds
    pub last_activity_at: i64,
}

/// Reads the payload segment of a JWT without verifying it.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

fn parse_expiry(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Session persisted as a single JSON blob.
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    store: S,
    key: &'static str,
    idle_window: Duration,
}

pub type BrowserSession = SessionStore<BrowserStorage>;

/// Session backed by localStorage with the configured key and idle window
pub fn browser_session() -> BrowserSession {
    SessionStore::new(BrowserStorage, SESSION_STORAGE_KEY, session_idle_window())
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S, key: &'static str, idle_window: Duration) -> Self {
        Self {
            store,
            key,
            idle_window,
        }
    }

    pub fn save(&self, response: &LoginResponse) -> StoredSession {
        self.save_at(response, Utc::now())
    }

    /// Persists the login, filling gaps from the token claims.
    pub fn save_at(&self, response: &LoginResponse, now: DateTime<Utc>) -> StoredSession {
        let claims = decode_claims(&response.token).unwrap_or_default();
        let expires_at = response.expires_at.clone().or_else(|| {
            claims
                .exp
                .and_then(|exp| Utc.timestamp_opt(exp, 0).single())
                .map(|dt| dt.to_rfc3339())
        });
        let session = StoredSession {
            token: response.token.clone(),
            expires_at,
            user_id: response.user_id.or(claims.user_id),
            employee_id: response.employee_id.or(claims.employee_id),
            employee_name: response.employee_name.clone().or(claims.employee_name),
            access_level: response.access_level.clone().or(claims.access_level),
            last_activity_at: now.timestamp_millis(),
        };
        self.write(&session);
        session
    }

    fn write(&self, session: &StoredSession) {
        match serde_json::to_string(session) {
            Ok(json) => self.store.set(self.key, &json),
            Err(e) => log::error!("Failed to serialize session: {e}"),
        }
    }

    /// The stored blob, if it is readable
    pub fn load(&self) -> Option<StoredSession> {
        let raw = self.store.get(self.key)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Clears the session as a side effect when it is no longer usable.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        let Some(session) = self.load() else {
            if self.store.get(self.key).is_some() {
                self.clear();
            }
            return false;
        };
        if session.token.is_empty() {
            self.clear();
            return false;
        }
        let Some(expires_at) = session.expires_at.as_deref().and_then(parse_expiry) else {
            log::info!("Session without a usable expiry, clearing");
            self.clear();
            return false;
        };
        if expires_at <= now {
            log::info!("Session expired at {expires_at}");
            self.clear();
            return false;
        }
        let idle_ms = now.timestamp_millis() - session.last_activity_at;
        if idle_ms > self.idle_window.num_milliseconds() {
            log::info!("Session dropped after {} min of inactivity", idle_ms / 60_000);
            self.clear();
            return false;
        }
        true
    }

    pub fn touch_activity(&self) {
        self.touch_activity_at(Utc::now());
    }

    pub fn touch_activity_at(&self, now: DateTime<Utc>) {
        if let Some(mut session) = self.load() {
            session.last_activity_at = now.timestamp_millis();
            self.write(&session);
        }
    }

    pub fn clear(&self) {
        log::info!("Session cleared");
        self.store.remove(self.key);
    }

    pub fn get_token(&self) -> Option<String> {
        self.load()
            .map(|s| s.token)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "auth_session";

    fn store() -> (MemoryStore, SessionStore<MemoryStore>) {
        let mem = MemoryStore::default();
        let session = SessionStore::new(mem.clone(), KEY, Duration::minutes(30));
        (mem, session)
    }

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn token_with(claims: &str) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", URL_SAFE_NO_PAD.encode(claims))
    }

    fn login(expires: Option<&str>) -> LoginResponse {
        LoginResponse {
            token: "a.e30.c".into(),
            expires_at: expires.map(str::to_string),
            user_id: Some(1),
            employee_id: Some(7),
            employee_name: Some("Ana Souza".into()),
            access_level: Some("ADMIN".into()),
        }
    }

    #[test]
    fn test_save_persists_single_blob() {
        let (mem, session) = store();
        let now = at("2024-06-10T12:00:00Z");
        session.save_at(&login(Some("2024-06-10T20:00:00Z")), now);

        let raw = mem.get(KEY).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["token"], "a.e30.c");
        assert_eq!(json["employeeName"], "Ana Souza");
        assert_eq!(json["lastActivityAt"], now.timestamp_millis());
        assert_eq!(session.get_token().as_deref(), Some("a.e30.c"));
    }

    #[test]
    fn test_claims_fill_missing_fields() {
        let (_, session) = store();
        let mut response = login(None);
        response.token = token_with(
            r#"{"sub":"ana","exp":1718049600,"colaboradorId":9,"colaboradorNome":"Ana","nivelAcesso":"USER"}"#,
        );
        response.employee_id = None;
        response.employee_name = None;
        let saved = session.save_at(&response, at("2024-06-10T12:00:00Z"));
        assert_eq!(saved.employee_id, Some(9));
        assert_eq!(saved.employee_name.as_deref(), Some("Ana"));
        // response wins over claims
        assert_eq!(saved.access_level.as_deref(), Some("ADMIN"));
        assert_eq!(
            saved.expires_at.as_deref().and_then(parse_expiry),
            Utc.timestamp_opt(1718049600, 0).single()
        );
    }

    #[test]
    fn test_validity_rules() {
        let (_, session) = store();
        let now = at("2024-06-10T12:00:00Z");
        assert!(!session.is_valid_at(now));

        session.save_at(&login(Some("2024-06-10T20:00:00Z")), now);
        assert!(session.is_valid_at(now + Duration::minutes(29)));

        // idle for longer than the window
        assert!(!session.is_valid_at(now + Duration::minutes(31)));
        assert!(session.get_token().is_none());
    }

    #[test]
    fn test_touch_extends_idle_window() {
        let (_, session) = store();
        let now = at("2024-06-10T12:00:00Z");
        session.save_at(&login(Some("2024-06-10T20:00:00Z")), now);
        session.touch_activity_at(now + Duration::minutes(20));
        assert!(session.is_valid_at(now + Duration::minutes(45)));
        assert_eq!(session.load().unwrap().employee_id, Some(7));
    }

    #[test]
    fn test_expired_or_missing_expiry_clears() {
        let (mem, session) = store();
        let now = at("2024-06-10T12:00:00Z");

        session.save_at(&login(Some("2024-06-10T11:59:59Z")), now);
        assert!(!session.is_valid_at(now));
        assert!(mem.get(KEY).is_none());

        session.save_at(&login(None), now);
        assert!(!session.is_valid_at(now));
        assert!(mem.get(KEY).is_none());

        session.save_at(&login(Some("amanhã")), now);
        assert!(!session.is_valid_at(now));
        assert!(mem.get(KEY).is_none());
    }

    #[test]
    fn test_corrupted_blob_is_cleared() {
        let (mem, session) = store();
        mem.set(KEY, "{not json");
        assert!(!session.is_valid_at(at("2024-06-10T12:00:00Z")));
        assert!(mem.get(KEY).is_none());
    }

    #[test]
    fn test_decode_claims() {
        assert!(decode_claims("garbage").is_none());
        let claims = decode_claims(&token_with(r#"{"sub":"ana","usuarioId":3}"#)).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("ana"));
        assert_eq!(claims.user_id, Some(3));
    }
}
