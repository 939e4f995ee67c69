use super::*;

fn user(role: Option<&str>) -> User {
    User {
        id: 1,
        username: "alice".to_owned(),
        email: "alice@example.com".to_owned(),
        role: role.map(str::to_owned),
        created_at: None,
        updated_at: None,
    }
}

// =============================================================
// AuthState lifecycle
// =============================================================

#[test]
fn auth_state_default_signed_out_and_not_loading() {
    let state = AuthState::default();
    assert!(state.user().is_none());
    assert!(!state.loading);
    assert!(!state.viewer(0, ExpiryPolicy::Ignore).authenticated);
}

#[test]
fn hydrated_with_token_but_no_profile_is_loading() {
    let state = AuthState::hydrated(Session { token: Some("t".to_owned()), user: None });
    assert!(state.loading);
}

#[test]
fn hydrated_without_token_is_not_loading() {
    assert!(!AuthState::hydrated(Session::default()).loading);
}

#[test]
fn settled_clears_loading() {
    let state = AuthState::settled(Session { token: Some("t".to_owned()), user: None });
    assert!(!state.loading);
}

#[test]
fn sign_out_drops_session() {
    let mut state = AuthState::settled(Session { token: Some("t".to_owned()), user: Some(user(None)) });
    state.sign_out();
    assert_eq!(state, AuthState::default());
}

// =============================================================
// Guard input
// =============================================================

#[test]
fn viewer_reflects_token_and_role() {
    let state = AuthState::settled(Session { token: Some("t".to_owned()), user: Some(user(Some("admin"))) });
    let viewer = state.viewer(0, ExpiryPolicy::Ignore);
    assert!(viewer.authenticated);
    assert!(viewer.is_admin);
}

#[test]
fn display_name_falls_back_without_profile() {
    assert_eq!(AuthState::default().display_name(), "there");
    let state = AuthState::settled(Session { token: None, user: Some(user(None)) });
    assert_eq!(state.display_name(), "alice");
}
