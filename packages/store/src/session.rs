//! # Session store — who is logged in, and as what
//!
//! [`SessionStore`] is the single source of truth for the authenticated
//! identity. It keeps the current [`Session`] in memory for synchronous reads
//! and mirrors it into a [`KeyValueStore`] so that a reload restores it.
//!
//! ## Persisted keys
//!
//! | Key | Value |
//! |-----|-------|
//! | [`ACCESS_TOKEN_KEY`] | bearer token |
//! | [`USER_ROLE_KEY`] | `"owner"` or `"walker"` |
//! | [`USER_DATA_KEY`] | profile snapshot as JSON (absent when there is none) |
//! | [`WALKER_AVAILABLE_KEY`] | `"true"` / `"false"`, walker sessions only |
//!
//! ## Mutation
//!
//! Only [`SessionStore::login`] and [`SessionStore::logout`] change the
//! session. Both write storage first, then update memory, then call every
//! observer synchronously. A login while a session of the *other* role is
//! active is rejected with [`SessionError::InvalidState`]; a login with the
//! same role replaces the previous session. Every login and logout resets the
//! availability flag, so a new walker session never inherits a stale
//! "available" from an earlier one.
//!
//! ## Restore
//!
//! [`SessionStore::open`] reads the keys back. Token and role must both be
//! present and valid; anything else is treated as logged out and the keys are
//! wiped. An unparsable profile restores as `None`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::kv::{KeyValueStore, StorageError};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const USER_ROLE_KEY: &str = "userRole";
pub const USER_DATA_KEY: &str = "userData";
pub const WALKER_AVAILABLE_KEY: &str = "walker_available";

const SESSION_KEYS: [&str; 4] = [
    ACCESS_TOKEN_KEY,
    USER_ROLE_KEY,
    USER_DATA_KEY,
    WALKER_AVAILABLE_KEY,
];

/// Which side of the marketplace the user is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Walker,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Walker => "walker",
        }
    }

    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "owner" => Some(Role::Owner),
            "walker" => Some(Role::Walker),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loosely-typed user snapshot returned by the backend at login.
///
/// The well-known fields are typed; everything else the backend sends is
/// kept verbatim in `extra` so nothing is lost across a reload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Profile {
    pub fn named(id: i64, name: &str) -> Self {
        Self {
            id: Some(id),
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// Name, falling back to email.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.email.as_deref())
    }

    /// Profile photo file name, under whichever key the backend used.
    pub fn photo_url(&self) -> Option<&str> {
        ["photoUrl", "photoProfile", "photo"]
            .iter()
            .find_map(|key| self.extra.get(*key).and_then(|v| v.as_str()))
    }
}

/// An authenticated session. "No session" is `Option::None`.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub role: Role,
    pub token: String,
    pub profile: Option<Profile>,
}

impl Session {
    pub fn is_walker(&self) -> bool {
        self.role == Role::Walker
    }

    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .and_then(Profile::display_name)
            .unwrap_or(match self.role {
                Role::Owner => "owner",
                Role::Walker => "walker",
            })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("a {active} session is already active; log out before signing in as {requested}")]
    InvalidState { active: Role, requested: Role },
    #[error("the server returned an empty token")]
    EmptyToken,
    #[error("no walker session is active")]
    NotWalker,
    #[error("failed to encode profile: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result of gating a view on a required role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Send the user to the login view of this role.
    Redirect(Role),
}

/// Decide whether a view that requires `required` may render for `session`.
pub fn check_access(session: Option<&Session>, required: Role) -> Access {
    match session {
        Some(s) if s.role == required => Access::Granted,
        _ => Access::Redirect(required),
    }
}

type Observer = Box<dyn Fn(Option<&Session>)>;

/// Persisted, observable session state.
///
/// Clones share state: every view and the API client can hold one.
#[derive(Clone)]
pub struct SessionStore<K> {
    backend: K,
    current: Rc<RefCell<Option<Session>>>,
    observers: Rc<RefCell<Vec<Observer>>>,
}

impl<K: KeyValueStore> SessionStore<K> {
    /// Open the store and restore any persisted session.
    pub fn open(backend: K) -> Self {
        let restored = restore(&backend);
        if restored.is_none() {
            clear_keys(&backend);
        }
        Self {
            backend,
            current: Rc::new(RefCell::new(restored)),
            observers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.current.borrow().as_ref().map(|s| s.role)
    }

    pub fn access(&self, required: Role) -> Access {
        check_access(self.current.borrow().as_ref(), required)
    }

    /// Register an observer, called synchronously after every login/logout.
    ///
    /// Observers must not call `subscribe` themselves.
    pub fn subscribe(&self, observer: impl Fn(Option<&Session>) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    /// Start a session. Persists all three fields or none of them.
    pub fn login(
        &self,
        role: Role,
        token: impl Into<String>,
        profile: Option<Profile>,
    ) -> Result<Session, SessionError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }
        if let Some(active) = self.role() {
            if active != role {
                tracing::warn!(%active, requested = %role, "login rejected: other role still signed in");
                return Err(SessionError::InvalidState {
                    active,
                    requested: role,
                });
            }
        }

        let session = Session {
            role,
            token,
            profile,
        };

        if let Err(e) = self.persist(&session) {
            tracing::error!("failed to persist session: {e}");
            clear_keys(&self.backend);
            let had_session = self.current.replace(None).is_some();
            if had_session {
                self.notify();
            }
            return Err(e);
        }

        *self.current.borrow_mut() = Some(session.clone());
        tracing::info!(role = %session.role, "session started");
        self.notify();
        Ok(session)
    }

    /// End the session. Safe to call when already logged out.
    pub fn logout(&self) {
        clear_keys(&self.backend);
        let had_session = self.current.replace(None).is_some();
        if had_session {
            tracing::info!("session ended");
            self.notify();
        }
    }

    /// Persisted availability flag; always `false` outside a walker session.
    pub fn is_available(&self) -> bool {
        self.role() == Some(Role::Walker)
            && self.backend.get(WALKER_AVAILABLE_KEY).as_deref() == Some("true")
    }

    /// Persist the availability flag. Callers write it only after the
    /// backend accepted the change.
    pub fn set_available(&self, available: bool) -> Result<(), SessionError> {
        if self.role() != Some(Role::Walker) {
            return Err(SessionError::NotWalker);
        }
        let value = if available { "true" } else { "false" };
        self.backend.set(WALKER_AVAILABLE_KEY, value)?;
        Ok(())
    }

    fn persist(&self, session: &Session) -> Result<(), SessionError> {
        self.backend.set(ACCESS_TOKEN_KEY, &session.token)?;
        self.backend.set(USER_ROLE_KEY, session.role.as_str())?;
        match &session.profile {
            Some(profile) => {
                let raw = serde_json::to_string(profile)?;
                self.backend.set(USER_DATA_KEY, &raw)?;
            }
            None => self.backend.remove(USER_DATA_KEY),
        }
        self.backend.remove(WALKER_AVAILABLE_KEY);
        Ok(())
    }

    fn notify(&self) {
        let snapshot = self.current();
        for observer in self.observers.borrow().iter() {
            observer(snapshot.as_ref());
        }
    }
}

fn restore<K: KeyValueStore>(backend: &K) -> Option<Session> {
    let token = backend
        .get(ACCESS_TOKEN_KEY)
        .filter(|t| !t.trim().is_empty());
    let role = backend.get(USER_ROLE_KEY).and_then(|r| Role::parse(&r));

    match (token, role) {
        (Some(token), Some(role)) => {
            let profile = backend.get(USER_DATA_KEY).and_then(|raw| {
                serde_json::from_str::<Profile>(&raw)
                    .map_err(|e| tracing::warn!("discarding unreadable profile: {e}"))
                    .ok()
            });
            Some(Session {
                role,
                token,
                profile,
            })
        }
        (None, None) => None,
        _ => {
            tracing::warn!("persisted session is inconsistent, clearing it");
            None
        }
    }
}

fn clear_keys<K: KeyValueStore>(backend: &K) {
    for key in SESSION_KEYS {
        backend.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::MemoryStore;

    fn walker_profile() -> Profile {
        let mut profile = Profile::named(3, "Luis");
        profile
            .extra
            .insert("priceHour".to_string(), serde_json::json!(25));
        profile
    }

    #[test]
    fn test_login_then_current_returns_same_triple() {
        let sessions = SessionStore::open(MemoryStore::new());
        assert!(sessions.current().is_none());

        sessions
            .login(Role::Walker, "T1", Some(walker_profile()))
            .unwrap();

        let session = sessions.current().unwrap();
        assert_eq!(session.role, Role::Walker);
        assert_eq!(session.token, "T1");
        assert_eq!(session.profile, Some(walker_profile()));
        assert_eq!(sessions.token().as_deref(), Some("T1"));
    }

    #[test]
    fn test_session_survives_restart() {
        let backend = MemoryStore::new();
        let sessions = SessionStore::open(backend.clone());
        sessions
            .login(Role::Walker, "T1", Some(walker_profile()))
            .unwrap();

        // Simulated reload: a fresh store over the same storage
        let reloaded = SessionStore::open(backend.clone());
        assert_eq!(reloaded.current(), sessions.current());
        assert_eq!(backend.get(USER_ROLE_KEY).as_deref(), Some("walker"));

        reloaded.logout();
        let reloaded_again = SessionStore::open(backend.clone());
        assert!(reloaded_again.current().is_none());
        assert!(backend.is_empty());
    }

    #[test]
    fn test_login_without_profile_restores_without_profile() {
        let backend = MemoryStore::new();
        SessionStore::open(backend.clone())
            .login(Role::Owner, "T2", None)
            .unwrap();

        let reloaded = SessionStore::open(backend.clone());
        let session = reloaded.current().unwrap();
        assert_eq!(session.role, Role::Owner);
        assert!(session.profile.is_none());
        assert!(backend.get(USER_DATA_KEY).is_none());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let sessions = SessionStore::open(MemoryStore::new());
        sessions.logout();
        assert!(sessions.current().is_none());

        sessions.login(Role::Owner, "T2", None).unwrap();
        sessions.logout();
        sessions.logout();
        assert!(sessions.current().is_none());
        assert!(sessions.role().is_none());
    }

    #[test]
    fn test_login_with_other_role_is_rejected() {
        let sessions = SessionStore::open(MemoryStore::new());
        sessions.login(Role::Owner, "T-owner", None).unwrap();

        let err = sessions.login(Role::Walker, "T1", None).unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidState {
                active: Role::Owner,
                requested: Role::Walker
            }
        ));
        assert_eq!(sessions.token().as_deref(), Some("T-owner"));

        sessions.logout();
        sessions.login(Role::Walker, "T1", None).unwrap();
        assert_eq!(sessions.role(), Some(Role::Walker));
    }

    #[test]
    fn test_same_role_login_replaces_session() {
        let sessions = SessionStore::open(MemoryStore::new());
        sessions.login(Role::Owner, "old", None).unwrap();
        sessions
            .login(Role::Owner, "new", Some(Profile::named(1, "Ana")))
            .unwrap();
        assert_eq!(sessions.token().as_deref(), Some("new"));
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let sessions = SessionStore::open(MemoryStore::new());
        assert!(matches!(
            sessions.login(Role::Owner, "  ", None),
            Err(SessionError::EmptyToken)
        ));
        assert!(sessions.current().is_none());
    }

    #[test]
    fn test_failed_persist_leaves_no_session() {
        let sessions = SessionStore::open(MemoryStore::read_only());
        let err = sessions.login(Role::Owner, "T2", None).unwrap_err();
        assert!(matches!(err, SessionError::Storage(_)));
        assert!(sessions.current().is_none());
    }

    #[test]
    fn test_inconsistent_storage_is_cleared() {
        let backend = MemoryStore::new();
        backend.set(ACCESS_TOKEN_KEY, "dangling").unwrap();
        backend.set(USER_DATA_KEY, "{}").unwrap();

        let sessions = SessionStore::open(backend.clone());
        assert!(sessions.current().is_none());
        assert!(backend.is_empty());

        backend.set(ACCESS_TOKEN_KEY, "T").unwrap();
        backend.set(USER_ROLE_KEY, "admin").unwrap();
        assert!(SessionStore::open(backend.clone()).current().is_none());
    }

    #[test]
    fn test_unreadable_profile_restores_as_none() {
        let backend = MemoryStore::new();
        backend.set(ACCESS_TOKEN_KEY, "T1").unwrap();
        backend.set(USER_ROLE_KEY, "Walker").unwrap();
        backend.set(USER_DATA_KEY, "not json").unwrap();

        let session = SessionStore::open(backend).current().unwrap();
        assert_eq!(session.role, Role::Walker);
        assert!(session.profile.is_none());
        assert_eq!(session.display_name(), "walker");
    }

    #[test]
    fn test_observers_are_notified_synchronously() {
        let sessions = SessionStore::open(MemoryStore::new());
        let calls = Rc::new(Cell::new(0));
        let last_role = Rc::new(Cell::new(None));

        let (c, r) = (calls.clone(), last_role.clone());
        sessions.subscribe(move |s| {
            c.set(c.get() + 1);
            r.set(s.map(|s| s.role));
        });

        sessions.login(Role::Walker, "T1", None).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(last_role.get(), Some(Role::Walker));

        sessions.logout();
        sessions.logout();
        assert_eq!(calls.get(), 2);
        assert_eq!(last_role.get(), None);
    }

    #[test]
    fn test_availability_is_walker_scoped_and_cleared() {
        let backend = MemoryStore::new();
        let sessions = SessionStore::open(backend.clone());

        assert!(matches!(
            sessions.set_available(true),
            Err(SessionError::NotWalker)
        ));

        sessions.login(Role::Walker, "T1", None).unwrap();
        assert!(!sessions.is_available());
        sessions.set_available(true).unwrap();
        assert!(sessions.is_available());
        assert!(SessionStore::open(backend.clone()).is_available());

        // A fresh login on the same device starts off duty
        sessions.login(Role::Walker, "T1b", None).unwrap();
        assert!(!sessions.is_available());

        sessions.set_available(true).unwrap();
        sessions.logout();
        assert!(backend.get(WALKER_AVAILABLE_KEY).is_none());
    }

    #[test]
    fn test_role_gate_redirects_to_required_login() {
        let owner = Session {
            role: Role::Owner,
            token: "T".to_string(),
            profile: None,
        };
        assert_eq!(check_access(Some(&owner), Role::Owner), Access::Granted);
        assert_eq!(
            check_access(Some(&owner), Role::Walker),
            Access::Redirect(Role::Walker)
        );
        assert_eq!(check_access(None, Role::Walker), Access::Redirect(Role::Walker));
        assert_eq!(check_access(None, Role::Owner), Access::Redirect(Role::Owner));
    }
}
