//! Authentication session management with durable persistence.
//!
//! The session lives in three signals (user, token, logged-in flag) plus
//! three storage keys (`user`, `token`, `isLoggedIn`). Memory and storage
//! are always written in the same operation so a reload can never observe a
//! half-updated session. Domain code never reads this context directly: it
//! gets a [`SessionSnapshot`] passed in explicitly.

use dioxus::prelude::*;

use way_shared::registration::SessionSnapshot;
use way_shared::{UpdateProfileRequest, User};

use crate::api_client::ApiClient;
use crate::storage;

const USER_KEY: &str = "user";
const TOKEN_KEY: &str = "token";
const LOGGED_IN_KEY: &str = "isLoggedIn";

/// Authentication context provided to the app
#[derive(Clone, Copy)]
pub struct AuthContext {
    user: Signal<Option<User>>,
    token: Signal<Option<String>>,
    logged_in: Signal<bool>,
}

/// Provider component that restores the session and supplies [`AuthContext`].
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let restored = use_hook(restore_session);
    let user = use_signal(|| restored.clone().map(|(user, _)| user));
    let token = use_signal(|| restored.clone().map(|(_, token)| token));
    let logged_in = use_signal(|| restored.is_some());

    use_context_provider(|| AuthContext {
        user,
        token,
        logged_in,
    });

    children
}

/// Rehydrate from durable storage; logged out unless all keys agree.
fn restore_session() -> Option<(User, String)> {
    if storage::load_str(LOGGED_IN_KEY).as_deref() != Some("true") {
        return None;
    }
    let user: User = storage::load(USER_KEY)?;
    let token = storage::load_str(TOKEN_KEY)?;
    Some((user, token))
}

impl AuthContext {
    /// Log in: set in-memory state and persist all three keys together.
    pub fn login(&mut self, user: User, token: String) {
        storage::save(USER_KEY, &user);
        storage::save_str(TOKEN_KEY, &token);
        storage::save_str(LOGGED_IN_KEY, "true");

        self.user.set(Some(user));
        self.token.set(Some(token));
        self.logged_in.set(true);
    }

    /// Log out: clear in-memory state and remove the durable keys.
    pub fn logout(&mut self) {
        storage::remove(USER_KEY);
        storage::remove(TOKEN_KEY);
        storage::remove(LOGGED_IN_KEY);

        self.user.set(None);
        self.token.set(None);
        self.logged_in.set(false);
    }

    /// Merge updated profile fields into the current user and re-persist.
    /// No-op when nobody is logged in.
    pub fn update_profile(&mut self, update: &UpdateProfileRequest) {
        let mut user = self.user.write();
        if let Some(user) = user.as_mut() {
            user.full_name = update.full_name.clone();
            user.phone_number = Some(update.phone_number.clone());
            user.email = update.email.clone();
            storage::save(USER_KEY, user);
        }
    }

    /// Record a successful email verification on the stored user.
    pub fn mark_verified(&mut self) {
        let mut user = self.user.write();
        if let Some(user) = user.as_mut() {
            user.verified = true;
            storage::save(USER_KEY, user);
        }
    }

    pub fn is_logged_in(&self) -> bool {
        (self.logged_in)()
    }

    pub fn is_verified(&self) -> bool {
        self.user.read().as_ref().is_some_and(|u| u.verified)
    }

    pub fn user(&self) -> Option<User> {
        self.user.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// The session as an explicit value for the registration machine.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            logged_in: self.is_logged_in(),
            verified: self.is_verified(),
            token: self.token(),
        }
    }

    /// An API client for the current session.
    pub fn client(&self) -> ApiClient {
        ApiClient::new().with_token(self.token())
    }
}
