use feedback::config::ClientConfig;
use feedback::error::Result;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn local_storage_get_string(key: &str) -> Option<String> {
    local_storage().and_then(|s| s.get_item(key).ok().flatten())
}

/// Stored overrides, `Ok(None)` when nothing is stored.
pub(super) fn load_client_config() -> Result<Option<ClientConfig>> {
    match local_storage_get_string(super::LOCALSTORAGE_CONFIG_KEY) {
        Some(raw) if !raw.trim().is_empty() => ClientConfig::from_json(&raw).map(Some),
        _ => Ok(None),
    }
}
