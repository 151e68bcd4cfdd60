use super::{
    CONFIG_KEYS, ShowWeekday, default_busy_timeout_ms, default_log_level,
    default_max_save_retries,
};
use serde_yaml::Value;
use std::fs;
use std::io;
use std::path::Path;

fn default_value(key: &str) -> Option<Value> {
    match key {
        "max_save_retries" => Some(Value::from(default_max_save_retries())),
        "busy_timeout_ms" => Some(Value::from(default_busy_timeout_ms())),
        "show_weekday" => serde_yaml::to_value(ShowWeekday::default()).ok(),
        "log_level" => Some(Value::String(default_log_level())),
        _ => None,
    }
}

/// Keys of [`CONFIG_KEYS`] absent from the YAML document.
pub fn missing_keys(content: &str) -> io::Result<Vec<&'static str>> {
    let yaml: Value = serde_yaml::from_str(content)
        .map_err(|e| io::Error::other(format!("invalid config: {e}")))?;

    let map = yaml
        .as_mapping()
        .ok_or_else(|| io::Error::other("config root is not a mapping"))?;

    Ok(CONFIG_KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String((*k).to_string())))
        .collect())
}

/// Add missing keys with their defaults, keeping existing values.
/// Returns the keys that were added.
pub fn migrate_config_file(path: &Path) -> io::Result<Vec<&'static str>> {
    let content = fs::read_to_string(path)?;
    let mut yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| io::Error::other(format!("invalid config {:?}: {e}", path)))?;

    let map = yaml
        .as_mapping_mut()
        .ok_or_else(|| io::Error::other("config root is not a mapping"))?;

    let mut added = Vec::new();
    for key in CONFIG_KEYS {
        let k = Value::String((*key).to_string());
        if map.contains_key(&k) {
            continue;
        }
        // `database` has no sensible default to inject here.
        if let Some(v) = default_value(key) {
            map.insert(k, v);
            added.push(*key);
        }
    }

    if !added.is_empty() {
        let serialized = serde_yaml::to_string(&yaml)
            .map_err(|e| io::Error::other(format!("serialize error: {e}")))?;
        fs::write(path, serialized)?;
    }

    Ok(added)
}
