//! Thin wrappers over `window.location` and the document head.
//!
//! All helpers degrade to `None`/no-op during server rendering.

#[cfg(test)]
#[path = "browser_test.rs"]
mod browser_test;

use crate::net::gateway::ProviderCallback;
use crate::net::oauth::parse_callback_fragment;
use crate::net::types::FirebaseConfig;

/// `name` of the `<meta>` tag carrying the serialized [`FirebaseConfig`].
pub const CONFIG_META_NAME: &str = "flow360-config";

/// Encode `config` for the `content` attribute of the config meta tag.
pub fn encode_config_meta(config: &FirebaseConfig) -> String {
    serde_json::to_string(config).unwrap_or_default()
}

/// Decode the `content` attribute written by [`encode_config_meta`].
pub fn decode_config_meta(content: &str) -> Option<FirebaseConfig> {
    serde_json::from_str(content).ok()
}

/// Read the config the server embedded in the page head.
pub fn read_config_meta() -> Option<FirebaseConfig> {
    #[cfg(feature = "hydrate")]
    {
        let document = web_sys::window()?.document()?;
        let meta = document
            .query_selector(&format!("meta[name=\"{CONFIG_META_NAME}\"]"))
            .ok()
            .flatten()?;
        decode_config_meta(&meta.get_attribute("content")?)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Page origin with a trailing slash, used as the OAuth redirect target.
pub fn entry_point_uri() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let origin = web_sys::window()?.location().origin().ok()?;
        Some(format!("{origin}/"))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Current URL fragment, including the leading `#`, if any.
pub fn location_fragment() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let hash = web_sys::window()?.location().hash().ok()?;
        (!hash.is_empty()).then_some(hash)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Remove the fragment from the address bar without adding a history entry.
pub fn clear_location_fragment() {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        if let Ok(history) = window.history() {
            let path = location.pathname().unwrap_or_else(|_| "/".to_owned());
            let search = location.search().unwrap_or_default();
            let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&format!("{path}{search}")));
        }
    }
}

/// Provider redirect carried in the current URL, if any. The fragment is
/// stripped from the address bar only when it is such a redirect.
pub fn take_provider_callback() -> Option<ProviderCallback> {
    provider_callback_from(location_fragment().as_deref(), clear_location_fragment)
}

/// Parse `fragment` and run `clear` only if it is a provider redirect.
pub(crate) fn provider_callback_from(fragment: Option<&str>, clear: impl FnOnce()) -> Option<ProviderCallback> {
    let callback = fragment.and_then(parse_callback_fragment)?;
    clear();
    Some(callback)
}

/// Leave the application for `url`.
pub fn navigate_to(url: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(url);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
    }
}
