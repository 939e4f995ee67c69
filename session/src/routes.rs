//! Static route table and location helpers.
//!
//! DESIGN
//! ======
//! Routes are data, not components: the table carries only the metadata the
//! guard needs. The Leptos router maps each [`RouteId`] to a page.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REDIRECT_PARAM: &str = "redirect";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteId {
    Home,
    Login,
    Register,
    Chat,
    Subscription,
}

/// Access requirements checked by the navigation guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_guest: bool,
    pub requires_admin: bool,
}

impl RouteMeta {
    const OPEN: Self = Self { requires_auth: false, requires_guest: false, requires_admin: false };
    const AUTH: Self = Self { requires_auth: true, ..Self::OPEN };
    const GUEST: Self = Self { requires_guest: true, ..Self::OPEN };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    pub id: RouteId,
    pub path: &'static str,
    pub name: &'static str,
    pub meta: RouteMeta,
}

pub const ROUTES: &[RouteDef] = &[
    RouteDef { id: RouteId::Home, path: HOME_PATH, name: "Home", meta: RouteMeta::AUTH },
    RouteDef { id: RouteId::Login, path: LOGIN_PATH, name: "Login", meta: RouteMeta::GUEST },
    RouteDef { id: RouteId::Register, path: "/register", name: "Register", meta: RouteMeta::GUEST },
    RouteDef { id: RouteId::Chat, path: "/chat", name: "Chat", meta: RouteMeta::AUTH },
    RouteDef { id: RouteId::Subscription, path: "/subscription", name: "Subscription", meta: RouteMeta::AUTH },
];

impl RouteId {
    #[must_use]
    pub fn def(self) -> &'static RouteDef {
        // ROUTES has exactly one entry per variant.
        ROUTES.iter().find(|r| r.id == self).unwrap_or(&ROUTES[0])
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        self.def().path
    }
}

/// Result of matching a path against [`ROUTES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Matched(&'static RouteDef),
    /// Catch-all: unknown paths go home.
    Redirect(&'static str),
}

/// Match `path` exactly, ignoring one trailing slash.
#[must_use]
pub fn resolve(path: &str) -> Resolution {
    let normalized = match path.strip_suffix('/') {
        Some(rest) if !rest.is_empty() => rest,
        _ if path.is_empty() => HOME_PATH,
        _ => path,
    };
    ROUTES
        .iter()
        .find(|r| r.path == normalized)
        .map_or(Resolution::Redirect(HOME_PATH), Resolution::Matched)
}

/// Path plus raw (still encoded) query string, without the leading `?`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub path: String,
    pub query: String,
}

impl Location {
    #[must_use]
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        let query: String = query.into();
        Self { path: path.into(), query: query.trim_start_matches('?').to_owned() }
    }

    /// Split `full` at the first `?`; any `#fragment` is dropped.
    #[must_use]
    pub fn parse(full: &str) -> Self {
        let without_fragment = full.split('#').next().unwrap_or_default();
        match without_fragment.split_once('?') {
            Some((path, query)) => Self::new(path, query),
            None => Self::new(without_fragment, ""),
        }
    }

    #[must_use]
    pub fn full_path(&self) -> String {
        if self.query.is_empty() { self.path.clone() } else { format!("{}?{}", self.path, self.query) }
    }

    /// Decoded value of the first `key=` pair in the query.
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.query.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_query_value(k) == key).then(|| decode_query_value(v))
        })
    }
}

/// Percent-encode a query value. `/` is left readable so redirect targets
/// stay legible (`/login?redirect=/chat`).
#[must_use]
pub fn encode_query_value(raw: &str) -> String {
    urlencoding::encode(raw).replace("%2F", "/")
}

/// Decode a query key or value; `+` is a space.
#[must_use]
pub fn decode_query_value(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

/// `/login?redirect=<target>`, or plain `/login` when `target` is home.
#[must_use]
pub fn login_redirect(target: &str) -> String {
    if target == HOME_PATH || target.is_empty() {
        LOGIN_PATH.to_owned()
    } else {
        format!("{LOGIN_PATH}?{REDIRECT_PARAM}={}", encode_query_value(target))
    }
}

/// Where to go after signing in: the `redirect` value if it is a local
/// absolute path, otherwise home.
#[must_use]
pub fn post_login_target(redirect: Option<&str>) -> String {
    match redirect {
        Some(target) if target.starts_with('/') && !target.starts_with("//") => target.to_owned(),
        _ => HOME_PATH.to_owned(),
    }
}

/// Where to send the user after logging out while on `current`: back to login
/// (remembering `current`) if the route requires authentication.
#[must_use]
pub fn logout_redirect(current: &Location) -> Option<String> {
    match resolve(&current.path) {
        Resolution::Matched(def) if def.meta.requires_auth => Some(login_redirect(&current.full_path())),
        _ => None,
    }
}
