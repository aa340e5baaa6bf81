//! Page navigation seam.

use crate::error::UiError;

pub trait Navigator {
    /// Send the browser to `path`.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Navigation` if the browser refuses the navigation.
    fn navigate(&self, path: &str) -> Result<(), UiError>;
}

/// Navigates by assigning `window.location.href`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocationNavigator;

#[cfg(feature = "hydrate")]
impl Navigator for LocationNavigator {
    fn navigate(&self, path: &str) -> Result<(), UiError> {
        let window = web_sys::window().ok_or_else(|| UiError::Navigation("no window".to_owned()))?;
        window
            .location()
            .set_href(path)
            .map_err(|e| UiError::Navigation(format!("{e:?}")))
    }
}
