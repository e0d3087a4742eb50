#![allow(non_snake_case)]

pub mod api;
pub mod cache;
pub mod client;
pub mod error;
pub mod token;

pub use client::{ApiClient, UnauthorizedHook};
pub use error::ApiError;
#[cfg(target_arch = "wasm32")]
pub use token::BrowserTokenStore;
pub use token::{MemoryTokenStore, TokenStore, TOKEN_KEY};
