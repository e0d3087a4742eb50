use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    StaticSegment,
};

use crate::auth::AuthProvider;
use crate::components::nav::Nav;
use crate::components::toast::ToastProvider;
use crate::guards::{RequireAdmin, RequireAuth, RequireDriver};
use crate::pages::admin::AdminPage;
use crate::pages::claims::ClaimsPage;
use crate::pages::collections::CollectionsPage;
use crate::pages::driver::DriverPage;
use crate::pages::landing::LandingPage;
use crate::pages::login::LoginPage;
use crate::pages::map::MapPage;
use crate::pages::notifications::NotificationsPage;
use crate::pages::settings::SettingsPage;
use crate::pages::signup::SignupPage;
use crate::pages::subscribe_result::{SubscribeCancelPage, SubscribeSuccessPage};
use crate::pages::subscriptions::SubscriptionsPage;
use crate::pages::wallet::WalletPage;
use crate::query::provide_query_client;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <link rel="icon" href="/favicon.svg" type="image/svg+xml" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    // The auth provider clears the cache on logout, so the cache comes first.
    provide_query_client();

    view! {
        <Stylesheet id="leptos" href="/pkg/gc-console.css" />
        <Title text="GreenCredits" />
        <ToastProvider>
            <AuthProvider>
                <Router>
                    <Routes fallback=|| view! { <p class="not-found">"Page not found."</p> }.into_any()>
                        <Route path=StaticSegment("") view=|| view! { <PublicLayout><LandingPage /></PublicLayout> } />
                        <Route path=StaticSegment("login") view=|| view! { <PublicLayout><LoginPage /></PublicLayout> } />
                        <Route path=StaticSegment("signup") view=|| view! { <PublicLayout><SignupPage /></PublicLayout> } />
                        <Route path=StaticSegment("wallet") view=|| view! { <AppLayout><WalletPage /></AppLayout> } />
                        <Route path=StaticSegment("collections") view=|| view! { <AppLayout><CollectionsPage /></AppLayout> } />
                        <Route path=StaticSegment("subscriptions") view=|| view! { <AppLayout><SubscriptionsPage /></AppLayout> } />
                        <Route path=StaticSegment("settings") view=|| view! { <AppLayout><SettingsPage /></AppLayout> } />
                        <Route
                            path=(StaticSegment("subscribe"), StaticSegment("success"))
                            view=|| view! { <AppLayout><SubscribeSuccessPage /></AppLayout> }
                        />
                        <Route
                            path=(StaticSegment("subscribe"), StaticSegment("cancel"))
                            view=|| view! { <AppLayout><SubscribeCancelPage /></AppLayout> }
                        />
                        <Route path=StaticSegment("claims") view=|| view! { <AppLayout><ClaimsPage /></AppLayout> } />
                        <Route path=StaticSegment("map") view=|| view! { <AppLayout><MapPage /></AppLayout> } />
                        <Route
                            path=StaticSegment("notifications")
                            view=|| view! { <AppLayout><NotificationsPage /></AppLayout> }
                        />
                        <Route path=StaticSegment("admin") view=AdminView />
                        <Route path=StaticSegment("driver") view=DriverView />
                    </Routes>
                </Router>
            </AuthProvider>
        </ToastProvider>
    }
}

#[component]
fn PublicLayout(children: Children) -> impl IntoView {
    view! {
        <main class="public-content">
            {children()}
        </main>
    }
}

/// Signed-in shell: sidebar plus the page, behind the session guard.
#[component]
fn AppLayout(children: ChildrenFn) -> impl IntoView {
    view! {
        <RequireAuth>
            <div class="app-layout">
                <Nav />
                <main class="main-content">
                    {children()}
                </main>
            </div>
        </RequireAuth>
    }
}

#[component]
fn AdminView() -> impl IntoView {
    view! {
        <AppLayout>
            <RequireAdmin>
                <AdminPage />
            </RequireAdmin>
        </AppLayout>
    }
}

#[component]
fn DriverView() -> impl IntoView {
    view! {
        <AppLayout>
            <RequireDriver>
                <DriverPage />
            </RequireDriver>
        </AppLayout>
    }
}
