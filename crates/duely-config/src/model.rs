use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stores user-configurable preferences. Every field has a serde default so
/// settings files written by older versions keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Hide already-paid occurrences from listings.
    #[serde(default)]
    pub hide_paid: bool,

    /// Days ahead within which an unpaid bill counts as urgent.
    #[serde(default = "Settings::default_alert_days")]
    pub alert_days: u32,

    /// Days of dated backups to keep; 0 keeps everything.
    #[serde(default = "Settings::default_backup_retention_days")]
    pub backup_retention_days: u32,

    /// Currency code applied to newly created templates.
    #[serde(default = "Settings::default_currency")]
    pub currency: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom data directory. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hide_paid: false,
            alert_days: Self::default_alert_days(),
            backup_retention_days: Self::default_backup_retention_days(),
            currency: Self::default_currency(),
            data_dir: None,
        }
    }
}

impl Settings {
    pub fn default_alert_days() -> u32 {
        3
    }

    pub fn default_backup_retention_days() -> u32 {
        7
    }

    pub fn default_currency() -> String {
        "PLN".into()
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("duely")
    }
}
