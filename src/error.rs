//! Error type for fallible setup paths.
//!
//! ERROR HANDLING
//! ==============
//! Runtime behavior never surfaces these to the user. Startup code returns
//! `UiError`, the entry point logs it, and every component degrades to a
//! no-op (or a blocking alert for toasts) instead of panicking.

#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("dom unavailable: {0}")]
    Dom(String),
    #[error("navigation failed: {0}")]
    Navigation(String),
    #[error("install failed: {0}")]
    Install(String),
}

#[cfg(feature = "hydrate")]
impl UiError {
    /// Wrap a browser exception, keeping its debug text.
    pub fn dom(value: &wasm_bindgen::JsValue) -> Self {
        Self::Dom(format!("{value:?}"))
    }

    pub fn install(value: &wasm_bindgen::JsValue) -> Self {
        Self::Install(format!("{value:?}"))
    }
}
