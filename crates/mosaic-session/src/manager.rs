//! # Session Manager
//!
//! The single owner of the process identity. All mutation goes through the
//! operations here; consumers read via [`SessionManager::snapshot`] and the
//! `auth-change` topic.

use std::sync::Arc;

use parking_lot::RwLock;
use shared_bus::{AuthTransition, EventBus, HostEvent};
use shared_types::validation;
use shared_types::{Identity, SessionSnapshot};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::SessionError;
use crate::store::SessionStore;

/// Fixed storage key the identity is persisted under.
pub const USER_STORAGE_KEY: &str = "mosaic:user";

struct SessionState {
    user: Option<Identity>,
    is_loading: bool,
}

/// Owns the authenticated-identity lifecycle.
///
/// Overlapping sign-in/sign-up calls are last-caller-wins: the call that
/// completes last determines the active identity. Acceptable because there
/// is at most one human actor per process.
pub struct SessionManager {
    state: RwLock<SessionState>,
    store: Box<dyn SessionStore>,
    bus: Arc<EventBus>,
}

impl SessionManager {
    /// Create a manager that persists through `store` and broadcasts on
    /// `bus`. The manager starts in the loading state until
    /// [`restore`](Self::restore) completes.
    #[must_use]
    pub fn new(bus: Arc<EventBus>, store: Box<dyn SessionStore>) -> Self {
        Self {
            state: RwLock::new(SessionState {
                user: None,
                is_loading: true,
            }),
            store,
            bus,
        }
    }

    /// Restore the persisted identity, if any.
    ///
    /// Never fails the boot sequence: a missing key means unauthenticated,
    /// and a corrupt or unreadable document is logged and treated the same
    /// way. Clears the loading flag in every case.
    pub async fn restore(&self) -> SessionSnapshot {
        match self.store.load(USER_STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Identity>(&raw) {
                Ok(user) => {
                    info!(email = %user.email, "session restored");
                    self.state.write().user = Some(user);
                }
                Err(e) => {
                    warn!(error = %e, "persisted session is corrupt; treating as signed out");
                }
            },
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "session restore failed; treating as signed out");
            }
        }

        self.state.write().is_loading = false;
        self.snapshot()
    }

    /// Authenticate with an email and credential.
    ///
    /// Derives the identity deterministically from the email: the display
    /// name is the address's local part and the avatar reference is seeded
    /// by the full address. Persists the identity (best-effort) and
    /// publishes `auth-change` with `type: "login"`.
    pub async fn sign_in(
        &self,
        email: &str,
        credential: &str,
    ) -> Result<Identity, SessionError> {
        Self::validate_credentials(email, credential)?;

        self.state.write().is_loading = true;
        let user = Identity {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            display_name: local_part(email).to_string(),
            avatar_ref: Some(avatar_for(email)),
        };

        self.persist(&user).await;
        self.activate(user.clone(), AuthTransition::Login);
        Ok(user)
    }

    /// Register a new account.
    ///
    /// Same contract as [`sign_in`](Self::sign_in) with the caller-provided
    /// display name and `type: "signup"`.
    pub async fn sign_up(
        &self,
        email: &str,
        credential: &str,
        display_name: &str,
    ) -> Result<Identity, SessionError> {
        Self::validate_credentials(email, credential)?;
        if !validation::is_required(display_name) {
            return Err(SessionError::MissingDisplayName);
        }

        self.state.write().is_loading = true;
        let user = Identity {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            display_name: display_name.trim().to_string(),
            avatar_ref: Some(avatar_for(email)),
        };

        self.persist(&user).await;
        self.activate(user.clone(), AuthTransition::Signup);
        Ok(user)
    }

    /// Clear the active identity and its persisted copy, then publish
    /// `auth-change` with `type: "logout"`.
    pub async fn sign_out(&self) {
        self.state.write().user = None;

        if let Err(e) = self.store.remove(USER_STORAGE_KEY).await {
            warn!(error = %e, "failed to clear persisted session");
        }

        info!("signed out");
        self.bus.publish(HostEvent::AuthChanged {
            user: None,
            kind: AuthTransition::Logout,
        });
    }

    /// Read-only view of the current session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read();
        SessionSnapshot {
            user: state.user.clone(),
            is_authenticated: state.user.is_some(),
            is_loading: state.is_loading,
        }
    }

    fn validate_credentials(email: &str, credential: &str) -> Result<(), SessionError> {
        if !validation::is_required(email) || !validation::is_required(credential) {
            return Err(SessionError::MissingCredentials);
        }
        if !validation::is_email(email) {
            return Err(SessionError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }

    /// Persist the identity; failures are logged and never block the
    /// in-memory transition.
    async fn persist(&self, user: &Identity) {
        match serde_json::to_string(user) {
            Ok(raw) => {
                if let Err(e) = self.store.save(USER_STORAGE_KEY, &raw).await {
                    warn!(email = %user.email, error = %e, "failed to persist session");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize identity"),
        }
    }

    fn activate(&self, user: Identity, kind: AuthTransition) {
        {
            let mut state = self.state.write();
            state.user = Some(user.clone());
            state.is_loading = false;
        }
        info!(email = %user.email, transition = ?kind, "identity activated");
        self.bus.publish(HostEvent::AuthChanged {
            user: Some(user),
            kind,
        });
    }
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

fn avatar_for(email: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={email}")
}
