//! Builds the REST client for the current page.
//!
//! In the browser the client talks to `<origin>/api`, which the console
//! server forwards to the REST API, and keeps the token in localStorage.
//! A 401 sends the user to `/login?next=<current path>`.

use std::sync::Arc;

use gc_client::ApiClient;

#[cfg(target_arch = "wasm32")]
pub fn client() -> ApiClient {
    use gc_client::BrowserTokenStore;

    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    ApiClient::new(format!("{origin}/api"), Arc::new(BrowserTokenStore))
        .with_unauthorized_hook(redirect_to_login)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn client() -> ApiClient {
    use gc_client::MemoryTokenStore;

    ApiClient::new("/api", Arc::new(MemoryTokenStore::new()))
}

#[cfg(target_arch = "wasm32")]
fn redirect_to_login() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let path = location.pathname().unwrap_or_default();
    if path == "/login" {
        return;
    }
    let search = location.search().unwrap_or_default();
    let target = crate::guards::login_path(&format!("{path}{search}"));
    let _ = location.set_href(&target);
}

/// Full page navigation, used for the external checkout page.
pub fn redirect(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(url);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = url;
    }
}

/// Asks the user to confirm a destructive action. Always false outside the
/// browser.
pub fn confirm(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        false
    }
}
