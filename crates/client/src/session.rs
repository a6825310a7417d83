//! # Session Context
//!
//! The bearer token and role of the signed-in user travel as an explicit
//! [`Session`] value that every authenticated call takes as a parameter.
//! Components that need to react to sign-in and sign-out subscribe to a
//! [`SessionStore`] instead of listening for a global event.

use medisys_core::{
    errors::{BookingError, BookingResult},
    models::auth::{AuthResponse, Role},
};
use tokio::sync::watch;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<Role>,
    pub user_id: Option<i64>,
}

impl Session {
    /// A session with no credentials, for public endpoints.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session carrying only a bearer token, e.g. one forwarded from an
    /// incoming request.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn from_auth(auth: &AuthResponse) -> Self {
        Self {
            token: Some(auth.token.clone()),
            role: Some(auth.role),
            user_id: Some(auth.user_id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }

    /// The token, or an `Authentication` error for anonymous sessions.
    pub fn require_token(&self) -> BookingResult<&str> {
        self.token.as_deref().ok_or_else(|| {
            BookingError::Authentication("Sign in to continue".to_string())
        })
    }
}

/// Observable holder of the current [`Session`].
///
/// Every subscriber sees each change, which replaces the global `authChange`
/// notification.
#[derive(Debug)]
pub struct SessionStore {
    sender: watch::Sender<Session>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Session::anonymous());
        Self { sender }
    }

    pub fn current(&self) -> Session {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.sender.subscribe()
    }

    /// Replaces the current session with one built from a login response.
    pub fn sign_in(&self, auth: &AuthResponse) -> Session {
        let session = Session::from_auth(auth);
        self.sender.send_replace(session.clone());
        info!("User {} signed in as {:?}", auth.user_id, auth.role);
        session
    }

    /// Drops the current credentials. Subscribers are only notified if a
    /// user was actually signed in.
    pub fn sign_out(&self) {
        let changed = self.sender.send_if_modified(|session| {
            if session.is_authenticated() {
                *session = Session::anonymous();
                true
            } else {
                false
            }
        });

        if changed {
            info!("User signed out");
        }
    }
}
