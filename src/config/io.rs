use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{ConfigError, ConfigField, LoadError, SaveError};
use crate::models::RawConfig;
use super::path::ensure_parent_dir;
use super::store::Config;

/// On-disk encoding, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

impl RawConfig {
    pub fn from_json_str(s: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(&value)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, LoadError> {
        let value: Value = toml::from_str(s)?;
        Self::from_value(&value)
    }

    /// Pull the record out of a loosely typed tree. Accepts both the current
    /// keys and the ones used by the browser demo page (`ipaddr`, `switchurl`...).
    pub fn from_value(value: &Value) -> Result<Self, LoadError> {
        let obj = value.as_object().ok_or(LoadError::NotATable)?;
        let mut legacy: Vec<&'static str> = Vec::new();
        let mut get = |field| lookup(obj, field, &mut legacy);

        let raw = RawConfig {
            address: as_string(ConfigField::Address, get(ConfigField::Address)?)?,
            port: as_int(ConfigField::Port, get(ConfigField::Port)?)?,
            path: as_string(ConfigField::Path, get(ConfigField::Path)?)?,
            network_timeout_ms: as_int(ConfigField::NetworkTimeoutMs, get(ConfigField::NetworkTimeoutMs)?)?,
            poll_interval_ms: as_int(ConfigField::PollIntervalMs, get(ConfigField::PollIntervalMs)?)?,
            output_names: as_labels(get(ConfigField::OutputNames)?)?,
        };
        if !legacy.is_empty() {
            warn!(keys = ?legacy, "config uses legacy key names");
        }
        let unknown = unknown_keys(obj);
        if !unknown.is_empty() {
            warn!(keys = ?unknown, "ignoring unknown config keys");
        }
        Ok(raw)
    }
}

fn lookup<'a>(
    obj: &'a Map<String, Value>,
    field: ConfigField,
    legacy: &mut Vec<&'static str>,
) -> Result<&'a Value, ConfigError> {
    if let Some(v) = obj.get(field.as_str()) {
        return Ok(v);
    }
    let key = field.legacy_key();
    let v = obj.get(key).ok_or_else(|| ConfigError::new(field, "missing"))?;
    if key != field.as_str() {
        legacy.push(key);
    }
    Ok(v)
}

fn as_string(field: ConfigField, v: &Value) -> Result<String, ConfigError> {
    v.as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::new(field, format!("expected a string, got {}", kind(v))))
}

fn as_int(field: ConfigField, v: &Value) -> Result<i64, ConfigError> {
    if let Some(n) = v.as_i64() {
        return Ok(n);
    }
    let reason = match v {
        Value::Number(n) if n.is_u64() => format!("{n} is out of range"),
        other => format!("expected an integer, got {}", kind(other)),
    };
    Err(ConfigError::new(field, reason))
}

fn as_labels(v: &Value) -> Result<Vec<String>, ConfigError> {
    let arr = v.as_array().ok_or_else(|| {
        ConfigError::new(ConfigField::OutputNames, format!("expected a list, got {}", kind(v)))
    })?;
    arr.iter()
        .enumerate()
        .map(|(i, e)| {
            e.as_str().map(str::to_string).ok_or_else(|| {
                ConfigError::new(
                    ConfigField::OutputNames,
                    format!("entry {i} is {}, expected a string", kind(e)),
                )
            })
        })
        .collect()
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_f64() => "a float",
        Value::Number(_) => "an integer",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a table",
    }
}

/// Read a raw record from `path` without validating it.
pub fn read_raw(path: &Path) -> Result<RawConfig, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "reading config");
    match ConfigFormat::from_path(path) {
        ConfigFormat::Json => RawConfig::from_json_str(&content),
        ConfigFormat::Toml => RawConfig::from_toml_str(&content),
    }
}

/// Read and validate the config at `path`.
pub fn load_config(path: &Path) -> Result<Config, LoadError> {
    let raw = read_raw(path)?;
    Ok(Config::load(&raw)?)
}

/// Persist `config` to `path` (temp file then rename).
pub fn write_config(path: &Path, config: &Config) -> Result<(), SaveError> {
    let raw = config.to_raw();
    let format = ConfigFormat::from_path(path);
    let text = match format {
        ConfigFormat::Json => {
            let mut s = serde_json::to_string_pretty(&raw)?;
            s.push('\n');
            s
        }
        ConfigFormat::Toml => toml::to_string_pretty(&raw)?,
    };

    let io_err = |source| SaveError::Io { path: path.to_path_buf(), source };
    ensure_parent_dir(path).map_err(io_err)?;
    let tmp = match format {
        ConfigFormat::Json => path.with_extension("json.tmp"),
        ConfigFormat::Toml => path.with_extension("toml.tmp"),
    };
    fs::write(&tmp, &text).map_err(io_err)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(e));
    }
    debug!(path = %path.display(), "config written");
    Ok(())
}

/// Keys present in `obj` that no field recognises.
pub fn unknown_keys(obj: &Map<String, Value>) -> Vec<String> {
    obj.keys()
        .filter(|k| {
            !ConfigField::ALL
                .iter()
                .any(|f| f.as_str() == k.as_str() || f.legacy_key() == k.as_str())
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture_logs;
    use serde_json::json;

    #[test]
    fn reads_current_keys() {
        let raw = RawConfig::from_json_str(
            r#"{
                "address": "192.168.42.201",
                "port": 2000,
                "path": "/gpiswitch/out",
                "networkTimeoutMs": 500,
                "pollIntervalMs": 1000,
                "outputNames": ["", "Relay 1", "Relay 2", "Relay 3", "Relay 4", "TX", "REH", "Phone 1", "Phone 2"]
            }"#,
        )
        .unwrap();
        assert_eq!(raw, RawConfig::default());
    }

    #[test]
    fn reads_demo_page_keys() {
        let raw = RawConfig::from_json_str(
            r#"{
                "ipaddr": "192.168.42.201",
                "port": 2000,
                "switchurl": "/gpiswitch/out",
                "net_timeout": 500,
                "poll_interval": 1000,
                "output_names": ["", "Relay 1", "Relay 2", "Relay 3", "Relay 4", "TX", "REH", "Phone 1", "Phone 2"]
            }"#,
        )
        .unwrap();
        assert_eq!(raw, RawConfig::default());
    }

    #[test]
    fn current_key_wins_over_legacy() {
        let mut v = serde_json::to_value(RawConfig::default()).unwrap();
        v["ipaddr"] = json!("10.9.9.9");
        let raw = RawConfig::from_value(&v).unwrap();
        assert_eq!(raw.address, "192.168.42.201");
    }

    #[test]
    fn reads_toml() {
        let raw = RawConfig::from_toml_str(
            r#"
            address = "gpo.local"
            port = 80
            path = "/gpiswitch/out"
            networkTimeoutMs = 250
            pollIntervalMs = 500
            outputNames = ["", "A", "B"]
            "#,
        )
        .unwrap();
        assert_eq!(raw.address, "gpo.local");
        assert_eq!(raw.output_names, vec!["", "A", "B"]);
    }

    fn field_error(v: Value) -> ConfigError {
        match RawConfig::from_value(&v) {
            Err(LoadError::Invalid(e)) => e,
            other => panic!("expected a field error, got {other:?}"),
        }
    }

    #[test]
    fn missing_field_is_reported() {
        let mut v = serde_json::to_value(RawConfig::default()).unwrap();
        v.as_object_mut().unwrap().remove("pollIntervalMs");
        let e = field_error(v);
        assert_eq!(e.field, ConfigField::PollIntervalMs);
        assert_eq!(e.reason, "missing");
    }

    #[test]
    fn wrong_types_are_reported() {
        let mut v = serde_json::to_value(RawConfig::default()).unwrap();
        v["port"] = json!("2000");
        assert_eq!(field_error(v).field, ConfigField::Port);

        let mut v = serde_json::to_value(RawConfig::default()).unwrap();
        v["networkTimeoutMs"] = json!(1.5);
        let e = field_error(v);
        assert_eq!(e.field, ConfigField::NetworkTimeoutMs);
        assert!(e.reason.contains("float"), "{}", e.reason);

        let mut v = serde_json::to_value(RawConfig::default()).unwrap();
        v["outputNames"] = json!(["", "A", 3]);
        let e = field_error(v);
        assert_eq!(e.field, ConfigField::OutputNames);
        assert!(e.reason.contains("entry 2"), "{}", e.reason);
    }

    #[test]
    fn huge_port_reaches_error_not_panic() {
        let mut v = serde_json::to_value(RawConfig::default()).unwrap();
        v["port"] = json!(u64::MAX);
        assert_eq!(field_error(v).field, ConfigField::Port);
    }

    #[test]
    fn non_object_root_rejected() {
        assert!(matches!(RawConfig::from_json_str("[1, 2]"), Err(LoadError::NotATable)));
        assert!(matches!(RawConfig::from_json_str("{"), Err(LoadError::Json(_))));
    }

    #[test]
    fn toml_values_without_json_shape_are_field_errors() {
        let err = RawConfig::from_toml_str(
            r#"
            address = "gpo.local"
            port = 1979-05-27
            path = "/gpiswitch/out"
            networkTimeoutMs = 250
            pollIntervalMs = 500
            outputNames = ["", "A"]
            "#,
        )
        .unwrap_err();
        match err {
            LoadError::Invalid(e) => assert_eq!(e.field, ConfigField::Port),
            other => panic!("expected a port error, got {other:?}"),
        }
        assert!(matches!(RawConfig::from_toml_str("port = "), Err(LoadError::Toml(_))));
    }

    #[test]
    fn legacy_keys_are_logged() {
        let v = json!({
            "ipaddr": "192.168.42.201",
            "port": 2000,
            "switchurl": "/gpiswitch/out",
            "net_timeout": 500,
            "poll_interval": 1000,
            "output_names": ["", "Relay 1"]
        });
        let logs = capture_logs(|| {
            RawConfig::from_value(&v).unwrap();
        });
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("config uses legacy key names"), "{logs}");
        assert!(logs.contains("ipaddr"), "{logs}");
        assert!(logs.contains("output_names"), "{logs}");
        assert!(!logs.contains("\"port\""), "{logs}");
    }

    #[test]
    fn unknown_keys_are_logged() {
        let mut v = serde_json::to_value(RawConfig::default()).unwrap();
        v["colour"] = json!("red");
        let logs = capture_logs(|| {
            RawConfig::from_value(&v).unwrap();
        });
        assert!(logs.contains("ignoring unknown config keys"), "{logs}");
        assert!(logs.contains("colour"), "{logs}");
        assert!(!logs.contains("legacy"), "{logs}");
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("cfg.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let cfg = Config::load(&RawConfig::default()).unwrap();
        let err = write_config(&target, &cfg).unwrap_err();
        assert!(matches!(err, SaveError::Io { .. }), "{err}");
        assert!(!dir.path().join("cfg.json.tmp").exists());
        assert!(target.join("keep").exists());
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/config.TOML")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("a/config.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), ConfigFormat::Json);
    }

    #[test]
    fn unknown_keys_listed() {
        let mut v = serde_json::to_value(RawConfig::default()).unwrap();
        v["colour"] = json!("red");
        v["ipaddr"] = json!("x");
        assert_eq!(unknown_keys(v.as_object().unwrap()), vec!["colour".to_string()]);
    }
}
