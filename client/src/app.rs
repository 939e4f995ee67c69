//! Root application component with routing, guard and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
    hooks::use_navigate,
};
use session::Session;

use crate::net::api;
use crate::pages::{
    chat::ChatPage, home::HomePage, login::LoginPage, register::RegisterPage, subscription::SubscriptionPage,
};
use crate::state::auth::AuthState;
use crate::util::auth::{GuardHistory, install_route_guard};
use crate::util::storage::BrowserStorage;

/// Root application component.
///
/// Hydrates the session from `localStorage`, provides it as context, and
/// sets up client-side routing. Unknown paths redirect to `/`.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::hydrated(Session::from_storage(&BrowserStorage)));
    provide_context(auth);
    provide_context(GuardHistory::new());

    view! {
        <Title text="Chat"/>

        <Router>
            <SessionRestore/>
            <Routes fallback=|| view! { <Redirect path="/"/> }>
                <Route path=StaticSegment("") view=|| view! { <Guarded><HomePage/></Guarded> }/>
                <Route path=StaticSegment("login") view=|| view! { <Guarded><LoginPage/></Guarded> }/>
                <Route path=StaticSegment("register") view=|| view! { <Guarded><RegisterPage/></Guarded> }/>
                <Route path=StaticSegment("chat") view=|| view! { <Guarded><ChatPage/></Guarded> }/>
                <Route
                    path=StaticSegment("subscription")
                    view=|| view! { <Guarded><SubscriptionPage/></Guarded> }
                />
            </Routes>
        </Router>
    }
}

/// Fetch the profile for a persisted token once, before the first guarded
/// route renders.
#[component]
fn SessionRestore() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    if auth.with_untracked(|s| s.loading) {
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(api::restore_session(auth, navigate));
        #[cfg(not(feature = "csr"))]
        {
            let _ = navigate;
            auth.update(|s| s.loading = false);
        }
    }
}

/// Render `children` only once the navigation guard lets the current route
/// through; otherwise the guard navigates away.
#[component]
fn Guarded(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let allowed = install_route_guard(auth, api::config().expiry, use_navigate());

    view! {
        <Show when=move || allowed.get()>
            {children()}
        </Show>
    }
}
