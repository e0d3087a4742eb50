//! One `impl ApiClient` block per REST resource.

mod admin;
mod auth;
mod claims;
mod collections;
mod drivers;
mod notifications;
mod return_points;
mod slots;
mod subscriptions;
mod users;
mod wallet;
