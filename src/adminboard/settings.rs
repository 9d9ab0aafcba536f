//! Site-wide settings. Saving is a mock: values live only in memory.

use crate::error::ValidationError;
use serde::Serialize;
use tracing::info;

pub const DEFAULT_SITE_NAME: &str = "Mos Social";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub site_name: String,
    pub enable_notifications: bool,
    pub maintenance_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_SITE_NAME)
    }
}

impl Settings {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            enable_notifications: true,
            maintenance_mode: false,
        }
    }

    pub fn set_site_name(&mut self, name: &str) -> Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required { field: "Site Name" });
        }
        self.site_name = name.to_string();
        Ok(())
    }

    pub fn toggle_notifications(&mut self) -> bool {
        self.enable_notifications = !self.enable_notifications;
        self.enable_notifications
    }

    pub fn toggle_maintenance(&mut self) -> bool {
        self.maintenance_mode = !self.maintenance_mode;
        self.maintenance_mode
    }

    pub fn save(&self) -> &'static str {
        info!(
            site_name = %self.site_name,
            notifications = self.enable_notifications,
            maintenance = self.maintenance_mode,
            "settings saved"
        );
        "Settings saved (mock)"
    }
}
