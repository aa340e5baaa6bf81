//! Runtime configuration read from the page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server may embed a `<script type="application/json" id="boards-ui-config">`
//! element to override timings, the redirect target, or the user-facing
//! messages. Every field is optional; an absent element means defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::UiError;

/// Element id of the optional JSON config block.
pub const CONFIG_ELEMENT_ID: &str = "boards-ui-config";

const DEFAULT_TOAST_HIDE_MS: u32 = 3500;
const DEFAULT_TOAST_LIMIT: usize = 5;
const DEFAULT_REDIRECT_DELAY_MS: u32 = 1200;
const DEFAULT_REDIRECT_PATH: &str = "/boards/";
const DEFAULT_CAROUSEL_INTERVAL_MS: u32 = 5000;
const DEFAULT_SOCKET_PING_MS: u32 = 25_000;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub toast_hide_ms: u32,
    pub toast_limit: usize,
    pub redirect_delay_ms: u32,
    pub redirect_path: String,
    pub carousel_interval_ms: u32,
    pub socket_ping_ms: u32,
    pub realtime: bool,
    pub messages: Messages,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_hide_ms: DEFAULT_TOAST_HIDE_MS,
            toast_limit: DEFAULT_TOAST_LIMIT,
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY_MS,
            redirect_path: DEFAULT_REDIRECT_PATH.to_owned(),
            carousel_interval_ms: DEFAULT_CAROUSEL_INTERVAL_MS,
            socket_ping_ms: DEFAULT_SOCKET_PING_MS,
            realtime: true,
            messages: Messages::default(),
        }
    }
}

/// User-facing notification texts.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub access_revoked: String,
    pub connection_lost: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            access_revoked: "Vos droits d'accès à ce contenu ont été révoqués.".to_owned(),
            connection_lost: "Erreur de connexion. Veuillez vérifier votre accès à Internet.".to_owned(),
        }
    }
}

impl UiConfig {
    /// Parse the embedded config block, if any.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Config` when the block is present but not valid JSON
    /// for this shape.
    pub fn from_json(raw: Option<&str>) -> Result<Self, UiError> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::default());
        };
        let parsed: Self = serde_json::from_str(raw)?;
        Ok(parsed.normalized())
    }

    /// Like [`UiConfig::from_json`] but falls back to defaults on bad input.
    pub fn from_json_or_default(raw: Option<&str>) -> Self {
        Self::from_json(raw).unwrap_or_else(|e| {
            log::warn!("ignoring {CONFIG_ELEMENT_ID}: {e}");
            Self::default()
        })
    }

    fn normalized(mut self) -> Self {
        self.toast_limit = self.toast_limit.max(1);
        if self.carousel_interval_ms == 0 {
            self.carousel_interval_ms = DEFAULT_CAROUSEL_INTERVAL_MS;
        }
        if self.socket_ping_ms == 0 {
            self.socket_ping_ms = DEFAULT_SOCKET_PING_MS;
        }
        if self.redirect_path.trim().is_empty() {
            self.redirect_path = DEFAULT_REDIRECT_PATH.to_owned();
        }
        self
    }
}
