use std::sync::RwLock;

/// localStorage key for the bearer token.
pub const TOKEN_KEY: &str = "gc_access_token";

/// Where the bearer token lives between page loads.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);

    fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set(token);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set(&self, token: &str) {
        let value = (!token.is_empty()).then(|| token.to_string());
        match self.token.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }

    fn clear(&self) {
        match self.token.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}

/// Persists the token in `window.localStorage`. Storage failures (private
/// mode, disabled storage) behave like an empty store.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserTokenStore;

#[cfg(target_arch = "wasm32")]
impl BrowserTokenStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl TokenStore for BrowserTokenStore {
    fn get(&self) -> Option<String> {
        Self::storage()?
            .get_item(TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
    }

    fn set(&self, token: &str) {
        if token.is_empty() {
            self.clear();
            return;
        }
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(TOKEN_KEY, token);
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_token_round_trips() {
        let store = MemoryTokenStore::new();
        assert!(!store.is_authenticated());

        store.set("abc.def");
        assert_eq!(store.get().as_deref(), Some("abc.def"));
        assert!(store.is_authenticated());

        store.clear();
        assert_eq!(store.get(), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn empty_token_counts_as_none() {
        let store = MemoryTokenStore::with_token("first");
        store.set("");
        assert_eq!(store.get(), None);
    }
}
