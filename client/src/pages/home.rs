//! Home page: authenticated landing route.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::session_bar::SessionBar;
use crate::state::auth::AuthState;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <SessionBar/>
        <main class="home-page">
            <h1>{move || format!("Welcome, {}", auth.with(AuthState::display_name))}</h1>
            <div class="home-page__actions">
                <A href="/chat">"Start chatting"</A>
                <A href="/subscription">"Manage subscription"</A>
            </div>
        </main>
    }
}
