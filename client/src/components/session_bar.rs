//! Header shown on authenticated pages: who is signed in, navigation, logout.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::{use_location, use_navigate};
use session::Location;

use crate::net::api;
use crate::state::auth::AuthState;

#[component]
pub fn SessionBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let location = use_location();

    let on_logout = move |_| {
        let current = Location::new(location.pathname.get_untracked(), location.search.get_untracked());
        if let Some(target) = api::logout(auth, &current) {
            navigate(&target, NavigateOptions::default());
        }
    };

    view! {
        <header class="session-bar">
            <span class="session-bar__user">{move || auth.with(AuthState::display_name)}</span>
            <nav class="session-bar__nav">
                <A href="/">"Home"</A>
                <A href="/chat">"Chat"</A>
                <A href="/subscription">"Subscription"</A>
            </nav>
            <button class="session-bar__logout" on:click=on_logout>
                "Log out"
            </button>
        </header>
    }
}
