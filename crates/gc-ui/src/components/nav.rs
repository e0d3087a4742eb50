use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::auth::use_auth;

struct NavLink {
    href: &'static str,
    icon: &'static str,
    label: &'static str,
}

static USER_LINKS: &[NavLink] = &[
    NavLink { href: "/wallet", icon: "\u{20AC}", label: "Wallet" },
    NavLink { href: "/collections", icon: "\u{21BB}", label: "Collections" },
    NavLink { href: "/subscriptions", icon: "\u{2605}", label: "Subscription" },
    NavLink { href: "/map", icon: "\u{2316}", label: "Return points" },
    NavLink { href: "/claims", icon: "\u{2691}", label: "Claims" },
    NavLink { href: "/notifications", icon: "\u{2709}", label: "Notifications" },
    NavLink { href: "/settings", icon: "\u{2699}", label: "Settings" },
];

static ADMIN_LINK: NavLink = NavLink { href: "/admin", icon: "\u{25A3}", label: "Admin" };
static DRIVER_LINK: NavLink = NavLink { href: "/driver", icon: "\u{26DF}", label: "Driver" };

#[component]
pub fn Nav() -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let navigate = use_navigate();

    let links = move || {
        let user = auth.user();
        let mut links: Vec<&'static NavLink> = Vec::new();
        if user.as_ref().is_some_and(|u| u.is_admin()) {
            links.push(&ADMIN_LINK);
        }
        if user.as_ref().is_some_and(|u| u.is_driver()) {
            links.push(&DRIVER_LINK);
        }
        links.extend(USER_LINKS.iter());
        links
    };

    let onLogout = move |_| {
        auth.logout();
        navigate("/login", Default::default());
    };

    view! {
        <nav class="nav-sidebar">
            <div class="nav-brand">
                <div class="brand-icon">"G"</div>
                <span class="brand-text">"GreenCredits"</span>
            </div>
            <ul class="nav-links">
                {move || {
                    let current = location.pathname.get();
                    links()
                        .into_iter()
                        .map(|link| {
                            let class = if current.starts_with(link.href) {
                                "nav-item active"
                            } else {
                                "nav-item"
                            };
                            view! {
                                <li class=class>
                                    <a href=link.href>
                                        <span class="nav-icon">{link.icon}</span>
                                        <span>{link.label}</span>
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            <div class="nav-footer">
                {move || {
                    auth.user()
                        .map(|user| {
                            view! { <div class="nav-user">{user.display_name().to_string()}</div> }
                        })
                }}
                <button class="btn btn-ghost btn-sm" on:click=onLogout>
                    "Log out"
                </button>
            </div>
        </nav>
    }
}
