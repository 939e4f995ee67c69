//! Chat page shell.
//!
//! SYSTEM CONTEXT
//! ==============
//! Re-validates the session against `/auth/me` on mount so an expired token
//! is caught by the client's 401 handling before any chat request is made.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::session_bar::SessionBar;
use crate::state::auth::AuthState;

#[component]
pub fn ChatPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let status = RwSignal::new(String::from("Checking session..."));

    #[cfg(feature = "csr")]
    {
        let location = leptos_router::hooks::use_location();
        let current = session::Location::new(location.pathname.get_untracked(), location.search.get_untracked());
        leptos::task::spawn_local(async move {
            match crate::net::api::refresh_profile(auth, navigate, current).await {
                Ok(user) => status.set(format!("Signed in as {}", user.username)),
                Err(e) => status.set(crate::net::api::error_message(&e)),
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = navigate;
        status.set(format!("Signed in as {}", auth.with_untracked(AuthState::display_name)));
    }

    view! {
        <SessionBar/>
        <main class="chat-page">
            <h1>"Chat"</h1>
            <p class="chat-page__status">{move || status.get()}</p>
        </main>
    }
}
