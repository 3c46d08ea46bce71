use std::{env, path::Path};

use anyhow::{Context, Result};
use field_projection::{ProjectionSettings, ProjectionType};
use serde::{Deserialize, Serialize};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectorConfig {
    /// Key and value projection settings
    pub settings: ProjectionSettings,

    /// Log level
    pub log_level: String,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            settings: ProjectionSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl ProjectorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Log level from `LOG_LEVEL`, without touching the settings file, so
    /// tracing can be installed before the rest of the configuration loads.
    pub fn log_level_from_env() -> String {
        Self::log_level_from_lookup(|name| env::var(name).ok())
    }

    pub fn log_level_from_lookup<F>(lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        non_empty(lookup("LOG_LEVEL")).unwrap_or_else(|| Self::default().log_level)
    }

    /// Resolves the configuration from `lookup`, which maps variable names to
    /// values.
    ///
    /// A settings file named by `PROJECTION_CONFIG_PATH` is loaded first;
    /// individual variables override it.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ProjectorConfig::default();

        if let Some(path) = non_empty(lookup("PROJECTION_CONFIG_PATH")) {
            config.settings = ProjectionSettings::from_json_file(Path::new(&path))
                .with_context(|| format!("failed to load projection settings from '{}'", path))?;
        }

        if let Some(kind) = non_empty(lookup("KEY_PROJECTION_TYPE")) {
            config.settings.key_projection_type = kind
                .parse()
                .context("failed to parse KEY_PROJECTION_TYPE")?;
        }

        if let Some(list) = lookup("KEY_PROJECTION_LIST") {
            config.settings.key_projection_list = list;
        }

        if let Some(kind) = non_empty(lookup("VALUE_PROJECTION_TYPE")) {
            config.settings.value_projection_type = kind
                .parse()
                .context("failed to parse VALUE_PROJECTION_TYPE")?;
        }

        if let Some(list) = lookup("VALUE_PROJECTION_LIST") {
            config.settings.value_projection_list = list;
        }

        config.log_level = Self::log_level_from_lookup(&lookup);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        EnvFilter::try_new(&self.log_level)
            .with_context(|| format!("invalid log level '{}'", self.log_level))?;

        let halves = [
            (
                "key",
                self.settings.key_projection_type,
                &self.settings.key_projection_list,
            ),
            (
                "value",
                self.settings.value_projection_type,
                &self.settings.value_projection_list,
            ),
        ];
        for (half, kind, list) in halves {
            if kind == ProjectionType::Whitelist && list.trim().is_empty() {
                warn!(half = half, "whitelist projection with an empty field list keeps only _id");
            }
        }

        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ProjectorConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.settings, ProjectionSettings::default());
    }

    #[test]
    fn test_env_overrides() {
        let config = ProjectorConfig::from_lookup(lookup_from(&[
            ("VALUE_PROJECTION_TYPE", "whitelist"),
            ("VALUE_PROJECTION_LIST", "a,b.c"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(
            config.settings.value_projection_type,
            ProjectionType::Whitelist
        );
        assert_eq!(config.settings.value_projection_list, "a,b.c");
        assert_eq!(config.settings.key_projection_type, ProjectionType::None);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_unsupported_projection_type() {
        let err = ProjectorConfig::from_lookup(lookup_from(&[("KEY_PROJECTION_TYPE", "blacklist")]))
            .unwrap_err();
        assert!(err.to_string().contains("KEY_PROJECTION_TYPE"));
    }

    #[test]
    fn test_settings_file_then_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"key_projection_type": "whitelist", "key_projection_list": "id", "value_projection_type": "whitelist", "value_projection_list": "name"}}"#
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = ProjectorConfig::from_lookup(lookup_from(&[
            ("PROJECTION_CONFIG_PATH", path.as_str()),
            ("VALUE_PROJECTION_LIST", "name,email"),
        ]))
        .unwrap();

        assert_eq!(config.settings.key_projection_list, "id");
        assert_eq!(config.settings.value_projection_list, "name,email");
    }

    #[test]
    fn test_missing_settings_file() {
        let err = ProjectorConfig::from_lookup(lookup_from(&[(
            "PROJECTION_CONFIG_PATH",
            "/nonexistent/projection.json",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("failed to load projection settings"));
    }

    #[test]
    fn test_log_level_resolves_without_settings_file() {
        let lookup = lookup_from(&[
            ("PROJECTION_CONFIG_PATH", "/nonexistent/projection.json"),
            ("LOG_LEVEL", "debug"),
        ]);
        assert_eq!(ProjectorConfig::log_level_from_lookup(&lookup), "debug");
        assert_eq!(ProjectorConfig::log_level_from_lookup(lookup_from(&[])), "info");
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_empty_whitelist_warning_reaches_installed_subscriber() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let config = tracing::subscriber::with_default(subscriber, || {
            ProjectorConfig::from_lookup(lookup_from(&[
                ("VALUE_PROJECTION_TYPE", "whitelist"),
                ("VALUE_PROJECTION_LIST", ""),
            ]))
        })
        .unwrap();

        assert_eq!(config.settings.value_projection_type, ProjectionType::Whitelist);
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("empty field list keeps only _id"));
    }

    #[test]
    fn test_invalid_log_level() {
        let err = ProjectorConfig::from_lookup(lookup_from(&[("LOG_LEVEL", "projector=loud")]))
            .unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }
}
