//! Navigation guard: allow or redirect a route transition.
//!
//! SYSTEM CONTEXT
//! ==============
//! Evaluated before every navigation with a snapshot of the session. The
//! function is pure so the browser router, the CLI `status` command and tests
//! share one decision table.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::routes::{self, HOME_PATH, LOGIN_PATH, Location, Resolution, RouteDef};

/// Session facts the guard needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewer {
    pub authenticated: bool,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed(&'static RouteDef),
    Redirect(String),
}

impl GuardDecision {
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Proceed(_) => None,
            Self::Redirect(to) => Some(to),
        }
    }
}

/// Decide the transition `from` → `to` for `viewer`.
///
/// `from` is `None` on the initial page load.
#[must_use]
pub fn evaluate(to: &Location, from: Option<&Location>, viewer: Viewer) -> GuardDecision {
    match routes::resolve(&to.path) {
        Resolution::Matched(def) => check_route(def, to, from, viewer),
        Resolution::Redirect(target) => GuardDecision::Redirect(target.to_owned()),
    }
}

/// Apply `def`'s access rules to the transition `from` → `to`.
fn check_route(def: &'static RouteDef, to: &Location, from: Option<&Location>, viewer: Viewer) -> GuardDecision {
    if def.meta.requires_auth {
        if !viewer.authenticated {
            // Re-entering the same protected path: drop the redirect chain.
            let reentry = from.is_some_and(|f| f.path == to.path && f.path != LOGIN_PATH);
            let target =
                if reentry { LOGIN_PATH.to_owned() } else { routes::login_redirect(&to.full_path()) };
            log::debug!("guard: {} requires auth, redirecting to {target}", to.path);
            return GuardDecision::Redirect(target);
        }
        if def.meta.requires_admin && !viewer.is_admin {
            log::debug!("guard: {} requires admin, redirecting home", to.path);
            return GuardDecision::Redirect(HOME_PATH.to_owned());
        }
    } else if def.meta.requires_guest && viewer.authenticated {
        log::debug!("guard: {} is guest-only, redirecting home", to.path);
        return GuardDecision::Redirect(HOME_PATH.to_owned());
    }

    GuardDecision::Proceed(def)
}
