// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "prodcat";

const CONFIG_VERSION: i64 = 1;
const DEFAULT_STATUS_TIMEOUT: &str = "4s";
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            catalog: CatalogSection::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSection {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub status_timeout: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            status_timeout: Some(DEFAULT_STATUS_TIMEOUT.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("PRODCAT_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set PRODCAT_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is missing `version = 1`; add it and keep values under [catalog], [ui], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(dir) = &self.catalog.dir {
            prodcat_catalog::validate_catalog_dir(dir)
                .with_context(|| format!("invalid [catalog].dir in {}", path.display()))?;
        }

        if let Some(timeout) = &self.ui.status_timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "ui.status_timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        if let Some(level) = &self.log.level
            && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
        {
            bail!(
                "log.level in {} must be one of {}, got {:?}",
                path.display(),
                LOG_LEVELS.join(", "),
                level
            );
        }

        if let Some(file) = &self.log.file
            && file.trim().is_empty()
        {
            bail!("log.file in {} must not be empty", path.display());
        }

        Ok(())
    }

    pub fn catalog_dir(&self) -> Option<PathBuf> {
        match &self.catalog.dir {
            Some(dir) => Some(PathBuf::from(dir)),
            None => prodcat_catalog::catalog_dir_from_env(),
        }
    }

    pub fn status_timeout(&self) -> Result<Duration> {
        parse_duration(
            self.ui
                .status_timeout
                .as_deref()
                .unwrap_or(DEFAULT_STATUS_TIMEOUT),
        )
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log.file {
            Some(file) => Ok(PathBuf::from(file)),
            None => default_log_path(),
        }
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# prodcat config\n# Place this file at: {}\n\nversion = 1\n\n[catalog]\n# Optional. Directory holding users.json, categories.json, and products.json.\n# Without it (and without PRODCAT_CATALOG_DIR) the built-in demo catalog is shown.\n# dir = \"/absolute/path/to/catalog\"\n\n[ui]\nstatus_timeout = \"{}\"\n\n[log]\n# PRODCAT_LOG overrides this filter when set.\nlevel = \"{}\"\n# file = \"/absolute/path/to/prodcat.log\"\n",
            path.display(),
            DEFAULT_STATUS_TIMEOUT,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn default_log_path() -> Result<PathBuf> {
    let state_root = dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .ok_or_else(|| {
            anyhow!("cannot resolve state directory; set [log].file to a writable log path")
        })?;

    let app_dir = state_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create state directory {}", app_dir.display()))?;
    Ok(app_dir.join(format!("{APP_NAME}.log")))
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow!("duration {raw:?} is too large"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 4s)")
}

#[cfg(test)]
mod tests {
    use super::{APP_NAME, Config, parse_duration};
    use anyhow::Result;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.status_timeout()?, Duration::from_secs(4));
        assert_eq!(config.log_level(), "info");
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[ui]\nstatus_timeout = \"2s\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[catalog], [ui], and [log]"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[catalog]\ndir = \"/srv/catalog\"\n[ui]\nstatus_timeout = \"500ms\"\n[log]\nlevel = \"debug\"\nfile = \"/tmp/prodcat-test.log\"\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.catalog_dir(), Some(PathBuf::from("/srv/catalog")));
        assert_eq!(config.status_timeout()?, Duration::from_millis(500));
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_path()?, PathBuf::from("/tmp/prodcat-test.log"));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("PRODCAT_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("PRODCAT_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("PRODCAT_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("prodcat/config.toml"));
        Ok(())
    }

    #[test]
    fn catalog_dir_prefers_config_over_env_override() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n[catalog]\ndir = \"/from/config\"\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("PRODCAT_CATALOG_DIR", "/from/env");
        }
        let config = Config::load(&path)?;
        let resolved = config.catalog_dir();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("PRODCAT_CATALOG_DIR");
        }
        assert_eq!(resolved, Some(PathBuf::from("/from/config")));
        Ok(())
    }

    #[test]
    fn catalog_dir_uses_env_override_when_config_missing() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("PRODCAT_CATALOG_DIR", "/from/env-only");
        }
        let config = Config::load(&path)?;
        let resolved = config.catalog_dir();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("PRODCAT_CATALOG_DIR");
        }
        assert_eq!(resolved, Some(PathBuf::from("/from/env-only")));
        Ok(())
    }

    #[test]
    fn catalog_dir_defaults_to_demo_when_unset() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("PRODCAT_CATALOG_DIR");
        }
        let config = Config::load(&path)?;
        assert_eq!(config.catalog_dir(), None);
        Ok(())
    }

    #[test]
    fn catalog_dir_rejects_uri_style_value() -> Result<()> {
        let (_temp, path) =
            write_config("version = 1\n[catalog]\ndir = \"https://example.com/catalog\"\n")?;
        let error = Config::load(&path).expect_err("URI catalog dir should fail validation");
        let message = format!("{error:#}");
        assert!(message.contains("looks like a URI"), "unexpected message: {message}");
        Ok(())
    }

    #[test]
    fn status_timeout_parses_ms_seconds_and_minutes() -> Result<()> {
        assert_eq!(parse_duration("500ms")?, Duration::from_millis(500));
        assert_eq!(parse_duration("4s")?, Duration::from_secs(4));
        assert_eq!(parse_duration("2m")?, Duration::from_secs(120));
        Ok(())
    }

    #[test]
    fn status_timeout_rejects_minute_overflow() -> Result<()> {
        let error = parse_duration("18446744073709551615m").expect_err("overflow should fail");
        assert!(error.to_string().contains("too large"));

        let (_temp, path) =
            write_config("version = 1\n[ui]\nstatus_timeout = \"999999999999999999m\"\n")?;
        let error = Config::load(&path).expect_err("overflowing timeout should fail");
        assert!(error.to_string().contains("too large"));
        Ok(())
    }

    #[test]
    fn log_path_defaults_under_app_state_dir() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n")?;
        let resolved = Config::load(&path)?.log_path()?;
        assert!(
            resolved.ends_with(format!("{APP_NAME}/{APP_NAME}.log")),
            "got {}",
            resolved.display()
        );
        Ok(())
    }

    #[test]
    fn status_timeout_rejects_invalid_duration() {
        let error = parse_duration("oops").expect_err("invalid duration should fail");
        let message = error.to_string();
        assert!(
            message.contains("invalid duration") || message.contains("invalid timeout duration"),
            "unexpected message: {message}"
        );
    }

    #[test]
    fn status_timeout_rejects_zero_in_config() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nstatus_timeout = \"0s\"\n")?;
        let error = Config::load(&path).expect_err("zero timeout should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn log_level_is_validated() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[log]\nlevel = \"loud\"\n")?;
        let error = Config::load(&path).expect_err("unknown level should fail");
        assert!(error.to_string().contains("log.level"));

        let (_temp, path) = write_config("version = 1\n[log]\nlevel = \"WARN\"\n")?;
        assert_eq!(Config::load(&path)?.log_level(), "WARN");
        Ok(())
    }

    #[test]
    fn example_config_includes_required_sections() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[catalog]"));
        assert!(example.contains("[ui]"));
        assert!(example.contains("[log]"));
        Ok(())
    }

    #[test]
    fn example_config_round_trips_through_loader() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, Config::example_config(&path))?;
        let config = Config::load(&path)?;
        assert_eq!(config.status_timeout()?, Duration::from_secs(4));
        Ok(())
    }
}
