use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::warn;

use crate::{ConfigError, Settings};

const SETTINGS_FILE: &str = "settings.json";
const TMP_SUFFIX: &str = "tmp";

/// Handles persistence for [`Settings`].
#[derive(Debug, Clone)]
pub struct SettingsManager {
    settings_path: PathBuf,
}

impl SettingsManager {
    pub fn new(settings_path: PathBuf) -> Self {
        Self { settings_path }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SETTINGS_FILE))
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Loads settings, falling back to defaults when the file is missing or
    /// no longer decodes.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        if !self.settings_path.exists() {
            return Ok(Settings::default());
        }
        let data = fs::read_to_string(&self.settings_path)?;
        match serde_json::from_str(&data) {
            Ok(settings) => Ok(settings),
            Err(err) => {
                warn!(path = %self.settings_path.display(), %err, "unreadable settings, using defaults");
                Ok(Settings::default())
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.settings_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.settings_path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
