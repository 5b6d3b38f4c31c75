use contracts::domain::common::RecordId;
use contracts::shared::api_error::ApiError;
use contracts::system::auth::{CurrentUser, LoginResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use super::storage::{browser_session, StoredSession};

/// Who is logged in, as far as the UI needs to know.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUser {
    pub employee_id: Option<RecordId>,
    pub employee_name: Option<String>,
    pub access_level: Option<String>,
    pub login: Option<String>,
}

impl SessionUser {
    pub fn display_name(&self) -> String {
        self.employee_name
            .clone()
            .or_else(|| self.login.clone())
            .unwrap_or_else(|| "Usuário".to_string())
    }

    fn merge(&mut self, me: CurrentUser) {
        if !me.login.is_empty() {
            self.login = Some(me.login);
        }
        if me.employee_id.is_some() {
            self.employee_id = me.employee_id;
        }
        if me.employee_name.is_some() {
            self.employee_name = me.employee_name;
        }
        if me.access_level.is_some() {
            self.access_level = me.access_level;
        }
    }
}

impl From<&StoredSession> for SessionUser {
    fn from(session: &StoredSession) -> Self {
        Self {
            employee_id: session.employee_id,
            employee_name: session.employee_name.clone(),
            access_level: session.access_level.clone(),
            login: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    pub user: RwSignal<Option<SessionUser>>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.user.with(Option::is_some)
    }

    pub fn sign_in(&self, response: &LoginResponse) {
        let stored = browser_session().save(response);
        log::info!("Signed in as employee {:?}", stored.employee_id);
        self.user.set(Some(SessionUser::from(&stored)));
    }

    pub fn sign_out(&self) {
        browser_session().clear();
        self.user.set(None);
    }

    /// Drops the in-memory user when the stored session is gone or expired.
    pub fn revalidate(&self) -> bool {
        let valid = browser_session().is_valid();
        if !valid && self.user.with_untracked(Option::is_some) {
            self.user.set(None);
        }
        valid
    }
}

/// Restores the stored session and confirms it against `/auth/me`.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let session = browser_session();
    let restored = if session.is_valid() {
        session.load().as_ref().map(SessionUser::from)
    } else {
        None
    };
    let has_session = restored.is_some();
    let auth = AuthContext {
        user: RwSignal::new(restored),
    };
    provide_context(auth);

    if has_session {
        spawn_local(async move {
            match api::me().await {
                Ok(Some(me)) => auth.user.update(|u| {
                    if let Some(user) = u {
                        user.merge(me);
                    }
                }),
                Ok(None) => {}
                Err(ApiError::Unauthorized) => auth.user.set(None),
                Err(e) => log::warn!("Could not confirm session: {e}"),
            }
        });
    }

    children()
}

pub fn use_session() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_known_fields() {
        let mut user = SessionUser {
            employee_id: Some(7),
            employee_name: Some("Ana Souza".into()),
            access_level: Some("ADMIN".into()),
            login: None,
        };
        user.merge(CurrentUser {
            login: "ana".into(),
            employee_name: None,
            ..Default::default()
        });
        assert_eq!(user.login.as_deref(), Some("ana"));
        assert_eq!(user.employee_name.as_deref(), Some("Ana Souza"));
        assert_eq!(user.employee_id, Some(7));
        assert_eq!(user.display_name(), "Ana Souza");
    }

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(SessionUser::default().display_name(), "Usuário");
        let user = SessionUser {
            login: Some("ana".into()),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "ana");
    }
}
