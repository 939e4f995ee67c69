use super::*;

#[test]
fn resolve_matches_every_declared_route() {
    for def in ROUTES {
        assert_eq!(resolve(def.path), Resolution::Matched(def));
        assert_eq!(def.id.path(), def.path);
    }
}

#[test]
fn resolve_tolerates_trailing_slash_and_empty_path() {
    assert_eq!(resolve("/chat/"), Resolution::Matched(RouteId::Chat.def()));
    assert_eq!(resolve(""), Resolution::Matched(RouteId::Home.def()));
}

#[test]
fn resolve_sends_unknown_paths_home() {
    assert_eq!(resolve("/nope"), Resolution::Redirect("/"));
    assert_eq!(resolve("/chat/extra"), Resolution::Redirect("/"));
}

#[test]
fn route_metadata_matches_access_rules() {
    for id in [RouteId::Home, RouteId::Chat, RouteId::Subscription] {
        assert!(id.def().meta.requires_auth, "{id:?}");
    }
    for id in [RouteId::Login, RouteId::Register] {
        assert!(id.def().meta.requires_guest, "{id:?}");
        assert!(!id.def().meta.requires_auth, "{id:?}");
    }
}

#[test]
fn location_parse_splits_query_and_drops_fragment() {
    let loc = Location::parse("/chat?room=1#bottom");
    assert_eq!(loc.path, "/chat");
    assert_eq!(loc.query, "room=1");
    assert_eq!(loc.full_path(), "/chat?room=1");
    assert_eq!(Location::parse("/login").full_path(), "/login");
}

#[test]
fn location_new_strips_leading_question_mark() {
    assert_eq!(Location::new("/x", "?a=1").query, "a=1");
}

#[test]
fn query_param_decodes_value() {
    let loc = Location::parse("/login?x=1&redirect=%2Fchat%3Froom%3D2");
    assert_eq!(loc.query_param("redirect").as_deref(), Some("/chat?room=2"));
    assert_eq!(loc.query_param("missing"), None);
}

#[test]
fn encode_keeps_slashes_and_escapes_reserved() {
    assert_eq!(encode_query_value("/chat"), "/chat");
    assert_eq!(encode_query_value("/chat?room=2&x=a b"), "/chat%3Froom%3D2%26x%3Da%20b");
}

#[test]
fn decode_treats_plus_as_space() {
    assert_eq!(decode_query_value("a+b%20c"), "a b c");
    assert_eq!(decode_query_value("%2Fchat"), "/chat");
}

#[test]
fn encoded_values_decode_back() {
    let raw = "/subscription?plan=pro&ref=üñí";
    assert_eq!(decode_query_value(&encode_query_value(raw)), raw);
}

#[test]
fn login_redirect_preserves_target_except_home() {
    assert_eq!(login_redirect("/chat"), "/login?redirect=/chat");
    assert_eq!(login_redirect("/"), "/login");
}

#[test]
fn post_login_target_only_follows_local_paths() {
    assert_eq!(post_login_target(Some("/chat")), "/chat");
    assert_eq!(post_login_target(Some("//evil.example")), "/");
    assert_eq!(post_login_target(Some("https://evil.example")), "/");
    assert_eq!(post_login_target(None), "/");
}

#[test]
fn logout_redirect_only_for_protected_routes() {
    assert_eq!(
        logout_redirect(&Location::parse("/subscription?plan=pro")).as_deref(),
        Some("/login?redirect=/subscription%3Fplan%3Dpro")
    );
    assert_eq!(logout_redirect(&Location::parse("/register")), None);
    assert_eq!(logout_redirect(&Location::parse("/")).as_deref(), Some("/login"));
}
