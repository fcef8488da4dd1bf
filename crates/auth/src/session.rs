//! Session store: current identity plus its durable mirror.
//!
//! The store is an explicitly constructed context object. It is created once
//! at startup, [`SessionStore::restore`] is called, and it is then lent to the
//! router and to anything else that needs identity. It is written only
//! through `set_token`, `set_user`, `restore` and `logout`.
//!
//! # Invariants
//! - `user.is_some()` implies `token.is_some()`.
//! - `token.is_some() && user.is_none()` is legal (token restored, profile not
//!   yet resolved).
//! - Role flags are computed from current state on every call.

use crate::storage::keys;
use crate::{KeyValueStore, Role, TokenClaims, UserProfile, decode_claims, identity_from_token};

/// Read-only view of the authentication state, as consumed by the router.
pub trait SessionFlags {
    fn is_authenticated(&self) -> bool;

    /// Landlord-level access (landlords and admins).
    fn is_landlord(&self) -> bool;

    fn is_admin(&self) -> bool;
}

/// Detached copy of the flags-relevant part of a session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub authenticated: bool,
    pub role: Option<Role>,
}

impl SessionSnapshot {
    pub const fn anonymous() -> Self {
        Self {
            authenticated: false,
            role: None,
        }
    }

    /// Token present, profile not yet resolved.
    pub const fn token_only() -> Self {
        Self {
            authenticated: true,
            role: None,
        }
    }

    pub const fn signed_in(role: Role) -> Self {
        Self {
            authenticated: true,
            role: Some(role),
        }
    }
}

impl SessionFlags for SessionSnapshot {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn is_landlord(&self) -> bool {
        self.role.is_some_and(|r| r.is_landlord())
    }

    fn is_admin(&self) -> bool {
        self.role.is_some_and(|r| r.is_admin())
    }
}

#[derive(Debug)]
pub struct SessionStore<S> {
    token: Option<String>,
    user: Option<UserProfile>,
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Empty session over `store`. Call [`Self::restore`] before the first
    /// navigation decision.
    pub fn new(store: S) -> Self {
        Self {
            token: None,
            user: None,
            store,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            authenticated: self.token.is_some(),
            role: self.role(),
        }
    }

    /// Unverified claims of the current token, if it decodes.
    pub fn token_claims(&self) -> Option<TokenClaims> {
        decode_claims(self.token.as_deref()?).ok()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Install (or clear) the credential and mirror it durably.
    ///
    /// `None` deliberately clears two fields: the token and the user, in
    /// memory and durably. A profile without a credential is not a valid
    /// session.
    pub fn set_token(&mut self, token: Option<String>) {
        match token {
            Some(token) => {
                self.persist(keys::TOKEN, &token);
                self.token = Some(token);
            }
            None => {
                self.token = None;
                self.erase(keys::TOKEN);
                if self.user.is_some() {
                    tracing::debug!("token cleared; dropping cached profile");
                    self.user = None;
                    self.erase(keys::USER);
                }
            }
        }
    }

    /// Install (or clear) the profile and mirror it durably as JSON.
    ///
    /// A profile is refused while no token is installed.
    pub fn set_user(&mut self, user: Option<UserProfile>) {
        match user {
            Some(user) => {
                if self.token.is_none() {
                    tracing::warn!(user_id = %user.id, "refusing to install a profile without a token");
                    return;
                }
                match serde_json::to_string(&user) {
                    Ok(raw) => self.persist(keys::USER, &raw),
                    Err(err) => tracing::error!(error = %err, "failed to serialize user profile"),
                }
                self.user = Some(user);
            }
            None => {
                self.user = None;
                self.erase(keys::USER);
            }
        }
    }

    /// Rebuild the session from the durable mirror.
    ///
    /// Only ever adds state: a saved token is installed, then the saved
    /// profile, falling back to the identity carried by the token when the
    /// profile is missing or unreadable. No failure is raised to the caller.
    ///
    /// The only state ever dropped is an in-memory profile that belonged to a
    /// different credential than the one restored.
    pub fn restore(&mut self) {
        let Some(token) = self.read(keys::TOKEN) else {
            if self.read(keys::USER).is_some() {
                tracing::debug!("ignoring saved profile without a saved token");
            }
            return;
        };
        if self.token.as_deref() != Some(token.as_str()) && self.user.is_some() {
            tracing::debug!("restored credential differs from the installed one; dropping its profile");
            self.user = None;
        }
        self.token = Some(token.clone());

        match self.read(keys::USER) {
            Some(raw) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(user) => self.user = Some(user),
                Err(err) => {
                    tracing::error!(error = %err, "failed to parse saved user record; deriving identity from token");
                    self.adopt_token_identity(&token);
                }
            },
            None => self.adopt_token_identity(&token),
        }

        tracing::info!(
            authenticated = self.token.is_some(),
            role = self.role().map(|r| r.as_str()),
            "session restored"
        );
    }

    /// Clear everything, in memory and durably. Idempotent.
    pub fn logout(&mut self) {
        self.user = None;
        self.token = None;
        self.erase(keys::TOKEN);
        self.erase(keys::USER);
    }

    fn adopt_token_identity(&mut self, token: &str) {
        if let Some(user) = identity_from_token(token) {
            self.user = Some(user);
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::error!(key, error = %err, "failed to read durable session key");
                None
            }
        }
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            tracing::error!(key, error = %err, "failed to write durable session key");
        }
    }

    fn erase(&mut self, key: &str) {
        if let Err(err) = self.store.remove(key) {
            tracing::error!(key, error = %err, "failed to remove durable session key");
        }
    }
}

impl<S> SessionFlags for SessionStore<S> {
    fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn is_landlord(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role.is_landlord())
    }

    fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role.is_admin())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
