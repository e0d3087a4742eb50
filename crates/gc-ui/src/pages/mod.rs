pub mod admin;
pub mod claims;
pub mod collections;
pub mod driver;
pub mod landing;
pub mod login;
pub mod map;
pub mod notifications;
pub mod settings;
pub mod signup;
pub mod subscribe_result;
pub mod subscriptions;
pub mod wallet;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::auth::{use_auth, AuthState};

/// Sends a signed-in user to their home page. Used by the public pages;
/// `suppress` lets a page take over the redirect itself.
pub(crate) fn redirect_when_authenticated(suppress: Option<ReadSignal<bool>>) {
    let auth = use_auth();
    let navigate = use_navigate();
    Effect::new(move |_| {
        if suppress.is_some_and(|s| s.get()) {
            return;
        }
        if let AuthState::Authenticated(user) = auth.state() {
            navigate(
                user.home_path(),
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });
}
