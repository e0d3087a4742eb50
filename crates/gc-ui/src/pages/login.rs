use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};
use leptos_router::NavigateOptions;

use crate::auth::{use_auth, AuthState};
use crate::components::toast::use_toasts;
use crate::guards::sanitize_next;
use crate::hooks::spawn;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let query = use_query_map();
    let navigate = use_navigate();

    let (email, setEmail) = signal(String::new());
    let (password, setPassword) = signal(String::new());

    // A `next` path wins over the role's home page.
    let target = move |home: &'static str| {
        sanitize_next(query.get_untracked().get("next").as_deref()).unwrap_or_else(|| home.to_string())
    };

    Effect::new(move |_| {
        if let AuthState::Authenticated(user) = auth.state() {
            navigate(
                &target(user.home_path()),
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    let onSubmit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let email = email.get_untracked();
        let password = password.get_untracked();
        spawn(async move {
            if auth.login(email, password).await.is_none() {
                if let Some(message) = auth.error() {
                    toasts.error(message);
                }
            }
        });
    };

    view! {
        <section class="auth-card card">
            <h1>"Login"</h1>
            <form on:submit=onSubmit>
                <div class="form-group">
                    <label for="email">"Email"</label>
                    <input
                        type="email"
                        id="email"
                        required
                        autofocus
                        prop:value=move || email.get()
                        on:input=move |ev| setEmail.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="password">"Password"</label>
                    <input
                        type="password"
                        id="password"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| setPassword.set(event_target_value(&ev))
                    />
                </div>
                {move || auth.error().map(|e| view! { <div class="form-error">{e}</div> })}
                <button type="submit" class="btn btn-primary" disabled=move || auth.busy()>
                    {move || if auth.busy() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
            <p class="auth-switch">
                "No account yet? " <a href="/signup">"Sign up"</a>
            </p>
        </section>
    }
}
