use gc_client::ApiError;
use gc_types::{RegisterRequest, User};
use leptos::prelude::*;
use tracing::debug;

use crate::api;
use crate::hooks::spawn;
use crate::query::{use_query_client, QueryClient};

#[derive(Clone, Debug, PartialEq)]
pub enum AuthState {
    Loading,
    Authenticated(User),
    Anonymous,
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

#[derive(Clone, Copy)]
pub struct AuthContext {
    state: RwSignal<AuthState>,
    error: RwSignal<Option<String>>,
    busy: RwSignal<bool>,
    queries: QueryClient,
}

impl AuthContext {
    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|state| state.user().cloned())
    }

    pub fn error(&self) -> Option<String> {
        self.error.get()
    }

    pub fn busy(&self) -> bool {
        self.busy.get()
    }

    pub fn set_error(&self, message: Option<String>) {
        self.error.set(message);
    }

    /// Re-reads `/auth/me`. Without a stored token, or when the token is
    /// rejected, the session ends.
    pub async fn refresh_user(&self) -> Option<User> {
        let client = api::client();
        if !client.tokens().is_authenticated() {
            self.state.set(AuthState::Anonymous);
            return None;
        }
        match client.me().await {
            Ok(user) => {
                self.state.set(AuthState::Authenticated(user.clone()));
                Some(user)
            }
            Err(e) => {
                debug!("dropping session: {e}");
                client.logout();
                self.state.set(AuthState::Anonymous);
                None
            }
        }
    }

    pub async fn login(&self, email: String, password: String) -> Option<User> {
        self.busy.set(true);
        self.error.set(None);

        let user = match api::client().login(&email, &password).await {
            Ok(_) => {
                let user = self.refresh_user().await;
                if user.is_none() {
                    self.error.set(Some("Could not load your profile.".into()));
                }
                user
            }
            Err(e) => {
                self.error.set(Some(login_error(&e)));
                None
            }
        };

        self.busy.set(false);
        user
    }

    /// Creates the account and signs straight in.
    pub async fn register(&self, request: RegisterRequest) -> Option<User> {
        self.busy.set(true);
        self.error.set(None);

        let registered = api::client().register(&request).await;
        self.busy.set(false);
        match registered {
            Ok(()) => self.login(request.email, request.password).await,
            Err(e) => {
                self.error.set(Some(e.to_string()));
                None
            }
        }
    }

    pub fn logout(&self) {
        api::client().logout();
        self.queries.clear();
        self.state.set(AuthState::Anonymous);
    }

    /// Fire-and-forget [`AuthContext::refresh_user`].
    pub fn refresh(&self) {
        let ctx = *self;
        spawn(async move {
            ctx.refresh_user().await;
        });
    }
}

fn login_error(error: &ApiError) -> String {
    match error {
        ApiError::Http { message, .. } if !message.is_empty() => message.clone(),
        ApiError::Http { .. } => "Login failed".into(),
        other => other.to_string(),
    }
}

/// Owns the session. Starts in [`AuthState::Loading`] and resolves once
/// the stored token has been checked against `/auth/me`.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = AuthContext {
        state: RwSignal::new(AuthState::Loading),
        error: RwSignal::new(None),
        busy: RwSignal::new(false),
        queries: use_query_client(),
    };
    provide_context(ctx);

    spawn(async move {
        ctx.refresh_user().await;
    });

    children()
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
