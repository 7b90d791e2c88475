use serde_json::json;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::feedback::Notifier;
use crate::models::user::User;
use crate::transport::traits::ApiTransport;

/// Process-wide authentication state: the current user (if any) and
/// whether the initial session check is still in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub loading: bool,
}

/// Shared authentication context.
///
/// Lifecycle: created with `loading = true`, resolved exactly once by
/// [`initialize`](SessionContext::initialize), mutated wholesale by
/// login/register/[`update_user`](SessionContext::update_user), cleared
/// by logout. Every screen reads the same instance through an `Arc`.
///
/// Login and register report their outcome as a `bool` and through the
/// notifier; no error ever crosses this boundary.
pub struct SessionContext {
    transport: Arc<dyn ApiTransport>,
    notifier: Arc<dyn Notifier>,
    state: RwLock<SessionState>,
}

impl SessionContext {
    pub fn new(transport: Arc<dyn ApiTransport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            notifier,
            state: RwLock::new(SessionState {
                user: None,
                loading: true,
            }),
        }
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// Snapshot of the current user, if authenticated.
    pub fn user(&self) -> Option<User> {
        self.read_state().user.clone()
    }

    /// `true` until the initial "who am I" check has resolved.
    pub fn is_loading(&self) -> bool {
        self.read_state().loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().user.is_some()
    }

    /// Full snapshot of the session state.
    pub fn snapshot(&self) -> SessionState {
        self.read_state().clone()
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// The one "who am I" check, run at application mount.
    ///
    /// Any failure — transport or plain unauthenticated — resolves to a
    /// signed-out state. Terminal for the mount phase: never retried
    /// automatically.
    pub async fn initialize(&self) {
        let user = match self.transport.get_json("/user/profile", &[]).await {
            Ok(value) => serde_json::from_value(value).ok(),
            Err(_) => None,
        };
        let mut state = self.write_state();
        state.user = user;
        state.loading = false;
    }

    /// Returns `true` on success. On failure the session stays signed
    /// out and the server's `error` message (or a default) is surfaced.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        let body = json!({ "email": email, "password": password });
        match self.transport.post_json("/auth/login", &body).await {
            Ok(value) => match serde_json::from_value::<User>(value) {
                Ok(user) => {
                    self.write_state().user = Some(user);
                    self.notifier.success("Login successful!");
                    true
                }
                Err(e) => {
                    log::warn!("login response was not a user payload: {e}");
                    self.notifier.error("Login failed");
                    false
                }
            },
            Err(e) => {
                self.notifier.error(&e.message("Login failed"));
                false
            }
        }
    }

    /// Register a new account. A successful response is an authenticated
    /// session (auto-login). Failure messages resolve in order:
    /// `error` field, then `password`, then `email`, then the default.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> bool {
        let body = json!({
            "name": name,
            "email": email,
            "password": password,
            "confirmPassword": confirm_password,
        });
        match self.transport.post_json("/auth/register", &body).await {
            Ok(value) => match serde_json::from_value::<User>(value) {
                Ok(user) => {
                    self.write_state().user = Some(user);
                    self.notifier.success("Registration successful!");
                    true
                }
                Err(e) => {
                    log::warn!("register response was not a user payload: {e}");
                    self.notifier.error("Registration failed");
                    false
                }
            },
            Err(e) => {
                self.notifier
                    .error(&e.message_pref(&["error", "password", "email"], "Registration failed"));
                false
            }
        }
    }

    /// Best-effort server notification; local state is cleared no matter
    /// what, so the client can never stay stuck looking signed in after
    /// a logout intent. Only the notification differs on failure.
    pub async fn logout(&self) {
        let result = self.transport.post_json("/auth/logout", &json!({})).await;
        self.write_state().user = None;
        match result {
            Ok(_) => self.notifier.success("Logged out successfully"),
            Err(e) => {
                log::warn!("logout request failed: {e}");
                self.notifier.error("Logout failed");
            }
        }
    }

    /// Wholesale replacement of the cached user snapshot with a
    /// server-returned representation (after profile/currency/photo
    /// updates). No network call of its own.
    pub fn update_user(&self, user: User) {
        self.write_state().user = Some(user);
    }

    // ── Internal ────────────────────────────────────────────────────

    // A poisoned lock only means a panic elsewhere mid-write of this
    // plain-data state; recovering the inner value is always safe here.
    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
