//! Login page: username/password sign-in plus password reset.
//!
//! After signing in the page follows the `redirect` query parameter the
//! route guard attached, falling back to home.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_query_map};
use session::Credentials;
use session::routes::REDIRECT_PARAM;

use super::register::{looks_like_email, password_problem};
use crate::state::auth::AuthState;

pub(crate) fn validate_login_input(username: &str, password: &str) -> Result<Credentials, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter both username and password.");
    }
    Ok(Credentials::new(username, password))
}

pub(crate) fn validate_reset_input(
    username: &str,
    email: &str,
    new_password: &str,
) -> Result<(String, String, String), &'static str> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() || email.is_empty() || new_password.is_empty() {
        return Err("Enter username, email and a new password.");
    }
    if !looks_like_email(email) {
        return Err("Enter a valid email address.");
    }
    if let Some(problem) = password_problem(new_password) {
        return Err(problem);
    }
    Ok((username.to_owned(), email.to_owned(), new_password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let query = use_query_map();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let show_reset = RwSignal::new(false);
    let reset_email = RwSignal::new(String::new());
    let reset_password = RwSignal::new(String::new());

    let on_login = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = match validate_login_input(&username.get(), &password.get()) {
            Ok(c) => c,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        let redirect = query.with_untracked(|q| q.get(REDIRECT_PARAM));
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "csr")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::login(auth, navigate.clone(), credentials).await {
                    Ok(user) => {
                        log::info!("signed in as {}", user.username);
                        let target = session::routes::post_login_target(redirect.as_deref());
                        navigate(&target, leptos_router::NavigateOptions::default());
                    }
                    Err(e) => {
                        info.set(crate::net::api::error_message(&e));
                        password.set(String::new());
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (auth, credentials, redirect, &navigate);
        }
    };

    let on_reset = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (name, email, new_password) =
            match validate_reset_input(&username.get(), &reset_email.get(), &reset_password.get()) {
                Ok(fields) => fields,
                Err(msg) => {
                    info.set(msg.to_owned());
                    return;
                }
            };
        busy.set(true);
        info.set("Resetting password...".to_owned());

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match crate::net::api::reset_password(auth, &name, &email, &new_password).await {
                Ok(resp) => {
                    let msg = if resp.message.is_empty() {
                        "Password reset. Sign in with the new password."
                    } else {
                        resp.message.as_str()
                    };
                    info.set(msg.to_owned());
                    show_reset.set(false);
                    reset_password.set(String::new());
                }
                Err(e) => info.set(crate::net::api::error_message(&e)),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (name, email, new_password);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign in"</h1>
                <form class="auth-form" on:submit=on_login>
                    <input
                        class="auth-input"
                        type="text"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <button class="auth-link" type="button" on:click=move |_| show_reset.update(|v| *v = !*v)>
                    "Forgot password?"
                </button>
                <Show when=move || show_reset.get()>
                    <form class="auth-form" on:submit=on_reset>
                        <input
                            class="auth-input"
                            type="email"
                            placeholder="Account email"
                            prop:value=move || reset_email.get()
                            on:input=move |ev| reset_email.set(event_target_value(&ev))
                        />
                        <input
                            class="auth-input"
                            type="password"
                            placeholder="New password"
                            prop:value=move || reset_password.get()
                            on:input=move |ev| reset_password.set(event_target_value(&ev))
                        />
                        <button class="auth-button" type="submit" disabled=move || busy.get()>
                            "Reset password"
                        </button>
                    </form>
                </Show>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <p class="auth-switch">
                    "No account yet? "
                    <A href="/register">"Register"</A>
                </p>
            </div>
        </div>
    }
}
