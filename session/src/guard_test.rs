use super::*;
use crate::routes::{ROUTES, RouteDef, RouteId, RouteMeta};

const SIGNED_IN: Viewer = Viewer { authenticated: true, is_admin: false };
const SIGNED_OUT: Viewer = Viewer { authenticated: false, is_admin: false };
const ADMIN: Viewer = Viewer { authenticated: true, is_admin: true };

static ADMIN_ROUTE: RouteDef = RouteDef {
    id: RouteId::Subscription,
    path: "/subscription",
    name: "Admin",
    meta: RouteMeta { requires_auth: true, requires_guest: false, requires_admin: true },
};

fn go(to: &str, from: Option<&str>, viewer: Viewer) -> GuardDecision {
    let from = from.map(Location::parse);
    evaluate(&Location::parse(to), from.as_ref(), viewer)
}

#[test]
fn protected_routes_redirect_signed_out_viewer_with_destination() {
    for def in ROUTES.iter().filter(|d| d.meta.requires_auth && d.path != "/") {
        let decision = go(def.path, Some("/login"), SIGNED_OUT);
        assert_eq!(
            decision,
            GuardDecision::Redirect(format!("/login?redirect={}", def.path)),
            "{}",
            def.path
        );
    }
}

#[test]
fn chat_without_token_redirects_with_redirect_param() {
    assert_eq!(go("/chat", None, SIGNED_OUT).redirect_target(), Some("/login?redirect=/chat"));
}

#[test]
fn home_redirect_omits_redirect_param() {
    assert_eq!(go("/", None, SIGNED_OUT).redirect_target(), Some("/login"));
}

#[test]
fn full_path_including_query_is_preserved() {
    assert_eq!(
        go("/subscription?plan=pro", Some("/"), SIGNED_OUT).redirect_target(),
        Some("/login?redirect=/subscription%3Fplan%3Dpro")
    );
}

#[test]
fn reentering_same_protected_path_drops_redirect_param() {
    assert_eq!(go("/chat", Some("/chat"), SIGNED_OUT).redirect_target(), Some("/login"));
}

#[test]
fn guest_routes_redirect_signed_in_viewer_home() {
    for def in ROUTES.iter().filter(|d| d.meta.requires_guest) {
        assert_eq!(go(def.path, Some("/chat"), SIGNED_IN).redirect_target(), Some("/"), "{}", def.path);
    }
}

#[test]
fn login_route_is_reachable_when_signed_out() {
    assert_eq!(go("/login", Some("/login"), SIGNED_OUT), GuardDecision::Proceed(RouteId::Login.def()));
    assert_eq!(go("/login?redirect=/chat", None, SIGNED_OUT), GuardDecision::Proceed(RouteId::Login.def()));
}

#[test]
fn signed_in_viewer_proceeds_to_protected_routes() {
    assert_eq!(go("/chat", Some("/"), SIGNED_IN), GuardDecision::Proceed(RouteId::Chat.def()));
    assert_eq!(go("/", None, SIGNED_IN), GuardDecision::Proceed(RouteId::Home.def()));
}

#[test]
fn unknown_paths_redirect_home_before_auth_checks() {
    assert_eq!(go("/does/not/exist", None, SIGNED_OUT).redirect_target(), Some("/"));
    assert_eq!(go("/does/not/exist", None, SIGNED_IN).redirect_target(), Some("/"));
}

#[test]
fn redirect_chain_terminates() {
    for viewer in [SIGNED_IN, SIGNED_OUT] {
        for start in ["/", "/login", "/register", "/chat", "/subscription", "/x"] {
            let mut here = Location::parse(start);
            let mut from: Option<Location> = None;
            let mut hops = 0;
            while let GuardDecision::Redirect(next) = evaluate(&here, from.as_ref(), viewer) {
                hops += 1;
                assert!(hops < 4, "redirect loop from {start} for {viewer:?}");
                from = Some(here);
                here = Location::parse(&next);
            }
        }
    }
}

#[test]
fn admin_route_sends_non_admin_home() {
    let to = Location::parse("/subscription");
    assert_eq!(check_route(&ADMIN_ROUTE, &to, None, SIGNED_IN).redirect_target(), Some("/"));
}

#[test]
fn admin_route_admits_admin() {
    let to = Location::parse("/subscription");
    assert_eq!(check_route(&ADMIN_ROUTE, &to, None, ADMIN), GuardDecision::Proceed(&ADMIN_ROUTE));
}

#[test]
fn admin_route_asks_signed_out_viewer_to_log_in_first() {
    let to = Location::parse("/subscription");
    assert_eq!(
        check_route(&ADMIN_ROUTE, &to, None, SIGNED_OUT).redirect_target(),
        Some("/login?redirect=/subscription")
    );
}

#[test]
fn admin_flag_does_not_bypass_guest_only_routes() {
    assert_eq!(go("/login", None, ADMIN).redirect_target(), Some("/"));
    assert_eq!(go("/chat", None, ADMIN), GuardDecision::Proceed(RouteId::Chat.def()));
}
