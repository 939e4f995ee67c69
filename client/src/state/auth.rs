//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided as `RwSignal<AuthState>` from the app root. The route guard reads
//! it before every navigation; `net::api` replaces it after each auth flow.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use session::guard::Viewer;
use session::{ExpiryPolicy, Session, User};

/// Reactive snapshot of the session plus whether the profile is still loading.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub session: Session,
    /// A persisted token is being exchanged for a profile; the guard waits.
    pub loading: bool,
}

impl AuthState {
    /// Initial state for a session hydrated from storage.
    #[must_use]
    pub fn hydrated(session: Session) -> Self {
        let loading = session.needs_profile();
        Self { session, loading }
    }

    /// State after an auth flow finished.
    #[must_use]
    pub fn settled(session: Session) -> Self {
        Self { session, loading: false }
    }

    pub fn sign_out(&mut self) {
        self.session = Session::default();
        self.loading = false;
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    /// Guard input at `now` under `policy`.
    #[must_use]
    pub fn viewer(&self, now: i64, policy: ExpiryPolicy) -> Viewer {
        Viewer { authenticated: self.session.is_authenticated(now, policy), is_admin: self.session.is_admin() }
    }

    /// Name shown in page headers.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.session.username().unwrap_or("there").to_owned()
    }
}
