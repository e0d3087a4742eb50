#![allow(non_snake_case)]

pub mod account;
pub mod admin;
pub mod claims;
pub mod collections;
pub mod drivers;
pub mod money;
pub mod notifications;
pub mod return_points;
pub mod schedule;
pub mod subscriptions;
pub mod timestamps;
pub mod wallet;

pub use account::*;
pub use admin::*;
pub use claims::*;
pub use collections::*;
pub use drivers::*;
pub use notifications::*;
pub use return_points::*;
pub use subscriptions::*;
pub use wallet::*;
