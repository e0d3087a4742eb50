use gc_types::RegisterRequest;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use super::redirect_when_authenticated;
use crate::auth::use_auth;
use crate::components::toast::use_toasts;
use crate::hooks::spawn;

pub const MIN_PASSWORD_LEN: usize = 6;

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let (fullName, setFullName) = signal(String::new());
    let (email, setEmail) = signal(String::new());
    let (password, setPassword) = signal(String::new());
    let (submitted, setSubmitted) = signal(false);

    // Once this form has signed the user in, it sends them to settings
    // instead of their home page.
    redirect_when_authenticated(Some(submitted));

    let onSubmit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let password = password.get_untracked();
        if password.len() < MIN_PASSWORD_LEN {
            toasts.error(format!("Password must be at least {MIN_PASSWORD_LEN} characters."));
            return;
        }
        let name = fullName.get_untracked();
        let request = RegisterRequest {
            email: email.get_untracked().trim().to_string(),
            password,
            full_name: (!name.trim().is_empty()).then(|| name.trim().to_string()),
        };
        setSubmitted.set(true);
        let navigate = navigate.clone();
        spawn(async move {
            match auth.register(request).await {
                Some(_) => {
                    toasts.success("Welcome to GreenCredits!");
                    navigate(
                        "/settings",
                        NavigateOptions {
                            replace: true,
                            ..Default::default()
                        },
                    );
                }
                None => {
                    setSubmitted.set(false);
                    toasts.error(auth.error().unwrap_or_else(|| "Registration failed".into()));
                }
            }
        });
    };

    view! {
        <section class="auth-card card">
            <h1>"Sign up"</h1>
            <form on:submit=onSubmit>
                <div class="form-group">
                    <label for="full-name">"Full name (optional)"</label>
                    <input
                        type="text"
                        id="full-name"
                        prop:value=move || fullName.get()
                        on:input=move |ev| setFullName.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="email">"Email"</label>
                    <input
                        type="email"
                        id="email"
                        required
                        prop:value=move || email.get()
                        on:input=move |ev| setEmail.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="password">"Password"</label>
                    <input
                        type="password"
                        id="password"
                        minlength=MIN_PASSWORD_LEN.to_string()
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| setPassword.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || auth.busy()>
                    {move || if auth.busy() { "Creating account..." } else { "Create account" }}
                </button>
            </form>
            <p class="auth-switch">
                "Already registered? " <a href="/login">"Log in"</a>
            </p>
        </section>
    }
}
