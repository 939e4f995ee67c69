//! Route-guard wiring between the Leptos router and `session::guard`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every routed page is wrapped in `app::Guarded`, which calls
//! [`install_route_guard`]. The guard re-runs when the URL changes or when
//! the initial profile fetch finishes; sign-outs navigate explicitly instead.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;
use session::guard::{self, GuardDecision};
use session::{ExpiryPolicy, Location};

use crate::state::auth::AuthState;

/// Last location the guard let through; the guard's `from`.
#[derive(Clone, Copy)]
pub struct GuardHistory(pub StoredValue<Option<Location>>);

impl GuardHistory {
    pub fn new() -> Self {
        Self(StoredValue::new(None))
    }
}

impl Default for GuardHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Current time in seconds since the Unix epoch.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn now_secs() -> i64 {
    #[cfg(feature = "csr")]
    {
        (js_sys::Date::now() / 1000.0) as i64
    }
    #[cfg(not(feature = "csr"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_secs() as i64)
    }
}

/// Run the guard for `to`. Returns the redirect target, or `None` when the
/// navigation may proceed (in which case `history` now points at `to`).
pub fn decide(
    to: &Location,
    history: &mut Option<Location>,
    state: &AuthState,
    now: i64,
    policy: ExpiryPolicy,
) -> Option<String> {
    match guard::evaluate(to, history.as_ref(), state.viewer(now, policy)) {
        GuardDecision::Proceed(_) => {
            *history = Some(to.clone());
            None
        }
        GuardDecision::Redirect(target) => Some(target),
    }
}

/// Guard the current route. The returned signal turns `true` once the
/// route may render; redirects go through `navigate`.
pub fn install_route_guard<F>(auth: RwSignal<AuthState>, policy: ExpiryPolicy, navigate: F) -> RwSignal<bool>
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let history = use_context::<GuardHistory>().unwrap_or_default();
    let location = use_location();
    let loading = Memo::new(move |_| auth.with(|s| s.loading));
    let allowed = RwSignal::new(false);

    Effect::new(move || {
        let to = Location::new(location.pathname.get(), location.search.get());
        if loading.get() {
            allowed.set(false);
            return;
        }
        let state = auth.get_untracked();
        let mut from = history.0.get_value();
        match decide(&to, &mut from, &state, now_secs(), policy) {
            None => {
                history.0.set_value(from);
                allowed.set(true);
            }
            Some(target) => {
                allowed.set(false);
                navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
            }
        }
    });

    allowed
}
