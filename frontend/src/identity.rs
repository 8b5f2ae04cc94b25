use gloo_storage::{LocalStorage, Storage};
use std::fmt;
use uuid::Uuid;
use web_sys::js_sys;

pub const CLIENT_ID_KEY: &str = "hero_atlas_client_id";

/// Anonymous identifier of this browser profile, used as the favorites owner.
/// Empty when local storage is unavailable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn unset() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Durable key/value slot the identity lives in
pub trait IdentityStore {
    fn is_available(&self) -> bool;
    fn read(&self) -> Option<String>;
    fn write(&self, id: &str) -> bool;
}

pub struct BrowserStore;

impl IdentityStore for BrowserStore {
    fn is_available(&self) -> bool {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .is_some()
    }

    // Stored as a bare string, not JSON
    fn read(&self) -> Option<String> {
        LocalStorage::raw().get_item(CLIENT_ID_KEY).ok().flatten()
    }

    fn write(&self, id: &str) -> bool {
        LocalStorage::raw().set_item(CLIENT_ID_KEY, id).is_ok()
    }
}

/// Returns the persisted identity, creating it on first use
pub fn resolve() -> ClientId {
    resolve_with(&BrowserStore, generate_client_id)
}

pub fn resolve_with(store: &impl IdentityStore, generate: impl FnOnce() -> String) -> ClientId {
    if !store.is_available() {
        tracing::warn!("Local storage unavailable, favorites are disabled");
        return ClientId::unset();
    }

    if let Some(existing) = store.read().filter(|id| !id.is_empty()) {
        return ClientId(existing);
    }

    let id = generate();
    if !store.write(&id) {
        tracing::warn!("Failed to persist client id, it will not survive a reload");
    }
    ClientId(id)
}

fn generate_client_id() -> String {
    let has_crypto = web_sys::window()
        .and_then(|w| w.crypto().ok())
        .is_some();
    if has_crypto {
        Uuid::new_v4().to_string()
    } else {
        fallback_client_id(
            js_sys::Date::now() as u64,
            (js_sys::Math::random() * 10_000.0) as u32,
        )
    }
}

pub fn fallback_client_id(timestamp_ms: u64, suffix: u32) -> String {
    format!("client_{}_{}", timestamp_ms, suffix % 10_000)
}
