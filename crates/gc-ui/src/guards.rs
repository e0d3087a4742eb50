//! Route protection. The decision itself is a pure function so it can be
//! tested without a reactive runtime; the components below only render it.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::auth::{use_auth, AuthState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
    Driver,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Pending,
    Allow,
    RedirectLogin(String),
    RedirectHome(&'static str),
}

pub fn evaluate(state: &AuthState, role: Role, attemptedPath: &str) -> GuardOutcome {
    match state {
        AuthState::Loading => GuardOutcome::Pending,
        AuthState::Anonymous => GuardOutcome::RedirectLogin(attemptedPath.to_string()),
        AuthState::Authenticated(user) => match role {
            Role::Admin if !user.is_admin() => GuardOutcome::RedirectHome("/wallet"),
            Role::Driver if !user.is_driver() => GuardOutcome::RedirectHome("/wallet"),
            _ => GuardOutcome::Allow,
        },
    }
}

/// `/login?next=<path>` with the path percent-encoded.
pub fn login_path(next: &str) -> String {
    format!("/login?next={}", utf8_percent_encode(next, NON_ALPHANUMERIC))
}

/// Accepts only same-site absolute paths.
///
/// Browsers read `/\host` like `//host` and drop tabs and newlines before
/// parsing, so a backslash in second place or any control character is
/// rejected along with `//host`.
pub fn sanitize_next(next: Option<&str>) -> Option<String> {
    let next = next?.trim();
    let mut chars = next.chars();
    if chars.next() != Some('/') || matches!(chars.next(), Some('/' | '\\')) {
        return None;
    }
    if next.chars().any(char::is_control) {
        return None;
    }
    Some(next.to_string())
}

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    Guard(GuardProps::builder().role(Role::User).children(children).build())
}

#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    Guard(GuardProps::builder().role(Role::Admin).children(children).build())
}

#[component]
pub fn RequireDriver(children: ChildrenFn) -> impl IntoView {
    Guard(GuardProps::builder().role(Role::Driver).children(children).build())
}

#[component]
fn Guard(role: Role, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let outcome = Memo::new(move |_| {
        let attempted = format!("{}{}", location.pathname.get(), location.search.get());
        evaluate(&auth.state(), role, &attempted)
    });

    let navigate = use_navigate();
    Effect::new(move |_| {
        let replace = NavigateOptions {
            replace: true,
            ..Default::default()
        };
        match outcome.get() {
            GuardOutcome::RedirectLogin(next) => navigate(&login_path(&next), replace),
            GuardOutcome::RedirectHome(home) => navigate(home, replace),
            GuardOutcome::Pending | GuardOutcome::Allow => {}
        }
    });

    move || match outcome.get() {
        GuardOutcome::Allow => children().into_any(),
        GuardOutcome::Pending => view! {
            <div class="loading">
                <div class="spinner"></div>
                "Loading..."
            </div>
        }
        .into_any(),
        GuardOutcome::RedirectLogin(_) | GuardOutcome::RedirectHome(_) => {
            view! { <div class="loading">"Redirecting..."</div> }.into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gc_types::User;

    fn user(admin: bool, driver: bool) -> AuthState {
        AuthState::Authenticated(User {
            id: 1,
            email: "u@example.ie".into(),
            full_name: None,
            address: None,
            is_active: Some(true),
            is_admin: Some(admin),
            is_driver: Some(driver),
        })
    }

    #[test]
    fn loading_waits() {
        assert_eq!(evaluate(&AuthState::Loading, Role::Admin, "/admin"), GuardOutcome::Pending);
    }

    #[test]
    fn anonymous_goes_to_login_with_next() {
        assert_eq!(
            evaluate(&AuthState::Anonymous, Role::User, "/wallet"),
            GuardOutcome::RedirectLogin("/wallet".into())
        );
        assert_eq!(login_path("/collections?page=2"), "/login?next=%2Fcollections%3Fpage%3D2");
    }

    #[test]
    fn roles_are_enforced() {
        assert_eq!(evaluate(&user(false, false), Role::Admin, "/admin"), GuardOutcome::RedirectHome("/wallet"));
        assert_eq!(evaluate(&user(false, false), Role::Driver, "/driver"), GuardOutcome::RedirectHome("/wallet"));
        assert_eq!(evaluate(&user(true, false), Role::Admin, "/admin"), GuardOutcome::Allow);
        assert_eq!(evaluate(&user(false, true), Role::Driver, "/driver"), GuardOutcome::Allow);
        assert_eq!(evaluate(&user(false, false), Role::User, "/claims"), GuardOutcome::Allow);
    }

    #[test]
    fn next_must_be_a_local_path() {
        assert_eq!(sanitize_next(Some("/collections")), Some("/collections".into()));
        assert_eq!(sanitize_next(Some("//evil.example")), None);
        assert_eq!(sanitize_next(Some("https://evil.example")), None);
        assert_eq!(sanitize_next(None), None);
    }

    #[test]
    fn next_rejects_backslash_and_control_tricks() {
        assert_eq!(sanitize_next(Some("/\\evil.example")), None);
        assert_eq!(sanitize_next(Some("/\\/evil.example")), None);
        assert_eq!(sanitize_next(Some("/\t/evil.example")), None);
        assert_eq!(sanitize_next(Some("/\n/evil.example")), None);
        assert_eq!(sanitize_next(Some("/wallet\u{0}")), None);
        assert_eq!(sanitize_next(Some("/")), Some("/".into()));
        assert_eq!(
            sanitize_next(Some("/map?q=a\\b")),
            Some("/map?q=a\\b".into())
        );
    }
}
