use super::store::PreferenceStore;
use crate::errors::CoreError;

/// Key under which the dark-mode flag is stored.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Typed access to the preferences the dashboard persists.
pub struct PreferenceManager {
    store: Box<dyn PreferenceStore>,
}

impl PreferenceManager {
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Read the dark-mode flag. Defaults to `false` when the key is absent,
    /// holds anything other than `"true"`/`"false"`, or cannot be read.
    pub fn load_dark_mode(&self) -> bool {
        match self.store.get(DARK_MODE_KEY) {
            Ok(Some(value)) => match value.as_str() {
                "true" => true,
                "false" => false,
                other => {
                    log::warn!("Ignoring invalid {DARK_MODE_KEY} value {other:?}");
                    false
                }
            },
            Ok(None) => false,
            Err(e) => {
                log::warn!("Could not read {DARK_MODE_KEY}: {e}");
                false
            }
        }
    }

    /// Persist the dark-mode flag as `"true"` or `"false"`.
    pub fn save_dark_mode(&mut self, enabled: bool) -> Result<(), CoreError> {
        let value = if enabled { "true" } else { "false" };
        self.store.set(DARK_MODE_KEY, value)?;
        log::debug!("Saved {DARK_MODE_KEY}={value}");
        Ok(())
    }
}
