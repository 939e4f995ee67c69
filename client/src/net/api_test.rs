use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use session::http::{ApiRequest, ApiResponse, Transport};
use session::{MemoryStorage, Session, TokenStorage};

use super::*;

/// Transport answering every request with one fixed status.
struct FixedStatus(u16);

#[async_trait(?Send)]
impl Transport for FixedStatus {
    async fn send(&self, _request: ApiRequest) -> Result<ApiResponse, ApiError> {
        Ok(ApiResponse { status: self.0, body: r#"{"detail":"Could not validate credentials"}"#.to_owned() })
    }
}

type Visits = Rc<RefCell<Vec<String>>>;

fn recording_navigate() -> (Visits, impl Fn(&str, NavigateOptions) + Clone + 'static) {
    let visits: Visits = Rc::default();
    let sink = Rc::clone(&visits);
    (visits, move |to: &str, _: NavigateOptions| sink.borrow_mut().push(to.to_owned()))
}

fn signed_in() -> AuthState {
    AuthState::settled(Session { token: Some("t".to_owned()), user: None })
}

#[test]
fn config_uses_same_origin_api_prefix() {
    assert_eq!(config().url("/auth/me"), "/api/v1/auth/me");
}

#[test]
fn error_message_prefers_server_detail() {
    let err = ApiError::Unauthorized { detail: "Incorrect username or password".to_owned() };
    assert_eq!(error_message(&err), "Incorrect username or password");
    let err = ApiError::Status { status: 400, detail: "Username already exists".to_owned() };
    assert_eq!(error_message(&err), "Username already exists");
}

#[test]
fn error_message_hides_transport_internals() {
    let err = ApiError::Transport("TypeError: Failed to fetch".to_owned());
    assert!(!error_message(&err).contains("TypeError"));
}

#[test]
fn logout_clears_signal_and_redirects_from_protected_route() {
    Owner::new().with(|| {
        let auth = RwSignal::new(signed_in());
        let target = logout(auth, &Location::parse("/chat"));
        assert_eq!(target.as_deref(), Some("/login?redirect=/chat"));
        assert_eq!(auth.get_untracked(), AuthState::default());
    });
}

#[test]
fn logout_from_guest_route_stays_put() {
    Owner::new().with(|| {
        let auth = RwSignal::new(AuthState::default());
        assert_eq!(logout(auth, &Location::parse("/register")), None);
    });
}

#[tokio::test]
async fn rejected_bearer_signs_out_and_navigates_to_login() {
    let owner = Owner::new();
    owner.set();
    let auth = RwSignal::new(signed_in());
    let (visits, navigate) = recording_navigate();
    let storage = MemoryStorage::with_token("t");
    let api = ApiClient::new(config(), FixedStatus(401), storage.clone()).on_unauthorized(sign_out_hook(auth, navigate));

    let err = session::api::me(&api).await.expect_err("401");

    assert!(err.is_unauthorized());
    assert_eq!(auth.get_untracked(), AuthState::default());
    assert_eq!(storage.token().unwrap(), None);
    assert_eq!(*visits.borrow(), vec![LOGIN_PATH.to_owned()]);
}

#[cfg(not(feature = "csr"))]
#[tokio::test]
async fn failed_refresh_leaves_protected_page() {
    let owner = Owner::new();
    owner.set();
    let auth = RwSignal::new(signed_in());
    let (visits, navigate) = recording_navigate();

    // Native builds have no browser storage or fetch, so the request fails
    // before any HTTP status is seen.
    let err = refresh_profile(auth, navigate, Location::parse("/chat")).await.expect_err("no browser");

    assert!(!err.is_unauthorized());
    assert_eq!(auth.get_untracked(), AuthState::default());
    assert_eq!(*visits.borrow(), vec!["/login?redirect=/chat".to_owned()]);
}

#[cfg(not(feature = "csr"))]
#[tokio::test]
async fn failed_refresh_on_guest_page_stays_put() {
    let owner = Owner::new();
    owner.set();
    let auth = RwSignal::new(signed_in());
    let (visits, navigate) = recording_navigate();

    let _ = refresh_profile(auth, navigate, Location::parse("/register")).await;

    assert_eq!(auth.get_untracked(), AuthState::default());
    assert!(visits.borrow().is_empty());
}
