//! Subscription page: account summary for the signed-in user.

use leptos::prelude::*;

use crate::components::session_bar::SessionBar;
use crate::state::auth::AuthState;

#[component]
pub fn SubscriptionPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    let email = move || auth.with(|s| s.user().map(|u| u.email.clone()).unwrap_or_default());
    let role = move || auth.with(|s| s.session.role().to_owned());

    view! {
        <SessionBar/>
        <main class="subscription-page">
            <h1>"Subscription"</h1>
            <dl class="subscription-page__account">
                <dt>"Account"</dt>
                <dd>{move || auth.with(AuthState::display_name)}</dd>
                <dt>"Email"</dt>
                <dd>{email}</dd>
                <dt>"Role"</dt>
                <dd>{role}</dd>
            </dl>
        </main>
    }
}
