// docbrowser settings engine
// Loads, saves, updates and resets AppSettings.
// Settings live as pretty-printed JSON at the platform config path unless overridden.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::AppSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<AppSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &AppSettings;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine persisting to a JSON file.
pub struct SettingsEngine {
    config_path: String,
    settings: AppSettings,
}

impl SettingsEngine {
    /// Uses `path_override` when given, else `settings.json` in the platform config dir.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string()
        });

        Self {
            config_path,
            settings: AppSettings::default(),
        }
    }

    /// Walks `key` (dot-separated) inside `root` and replaces the leaf with `value`.
    fn set_path(root: &mut Value, key: &str, value: Value) -> Result<(), SettingsError> {
        let (parents, leaf) = match key.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, key),
        };

        let mut current = root;
        for part in parents.into_iter().flat_map(|p| p.split('.')) {
            current = current
                .get_mut(part)
                .ok_or_else(|| SettingsError::InvalidKey(format!("Key '{}' not found in settings", key)))?;
        }

        match current {
            Value::Object(map) if map.contains_key(leaf) => {
                map.insert(leaf.to_string(), value);
                Ok(())
            }
            Value::Object(_) => Err(SettingsError::InvalidKey(format!(
                "Key '{}' not found in settings",
                key
            ))),
            _ => Err(SettingsError::InvalidKey(format!(
                "Cannot navigate to key '{}': intermediate value is not an object",
                key
            ))),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Missing file means defaults; a malformed file is an error.
    fn load(&mut self) -> Result<AppSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.settings = AppSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        self.settings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        Ok(self.settings.clone())
    }

    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))
    }

    fn get_settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Updates one value by dot path, e.g. `frequently_viewed.retention_days`.
    ///
    /// The result is re-deserialized into [`AppSettings`] so a value of the
    /// wrong shape is rejected before anything is saved.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut json_value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        Self::set_path(&mut json_value, key, value)?;

        self.settings = serde_json::from_value(json_value).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;

        self.save()
    }

    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = AppSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
