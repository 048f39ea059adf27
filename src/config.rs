/*
 * aur-rpc - Typed client for the Arch User Repository RPC interface.
 * Copyright (C) 2025  compiledkernel-idk and pacboost contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

//! Configuration management with validation and defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::aur::client::DEFAULT_RPC_URL;
use crate::aur::query::ProtocolVersion;
use crate::error::{AurError, AurResult};

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// AUR RPC endpoint
    pub rpc_url: String,

    /// Payload shape to request and validate against
    pub protocol_version: ProtocolVersion,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            protocol_version: ProtocolVersion::V5,
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: concat!("aur-rpc/", env!("CARGO_PKG_VERSION")).to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log file path (None = console only)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

/// The keys one config file actually sets
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub rpc_url: Option<String>,
    pub protocol_version: Option<ProtocolVersion>,
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    #[serde(default)]
    pub logging: LoggingLayer,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingLayer {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl ConfigLayer {
    /// Read a single TOML file, reporting why it could not be used
    pub fn from_file(path: &Path) -> AurResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AurError::config(format!("cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| AurError::config(format!("cannot parse {}: {}", path.display(), e)))
    }
}

impl Config {
    /// Load configuration from multiple sources with precedence:
    /// 1. /etc/aur-rpc/config.toml (system-wide)
    /// 2. ~/.config/aur-rpc/config.toml (user)
    /// 3. Environment variables (AUR_RPC_*)
    ///
    /// Missing files are skipped; unparsable ones are skipped with a warning.
    pub fn load() -> Self {
        let mut paths = vec![PathBuf::from("/etc/aur-rpc/config.toml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("aur-rpc").join("config.toml"));
        }

        let mut config = Config::default();
        for path in paths.iter().filter(|p| p.exists()) {
            match ConfigLayer::from_file(path) {
                Ok(layer) => config = config.apply(layer),
                Err(e) => eprintln!("warning: ignoring config file: {}", e),
            }
        }

        config.apply_env_overrides()
    }

    /// Defaults overlaid with a single TOML file
    pub fn from_file(path: &Path) -> AurResult<Self> {
        Ok(Config::default().apply(ConfigLayer::from_file(path)?))
    }

    /// Overlay every key the layer sets, whatever its value
    pub fn apply(mut self, layer: ConfigLayer) -> Self {
        if let Some(rpc_url) = layer.rpc_url {
            self.rpc_url = rpc_url;
        }
        if let Some(version) = layer.protocol_version {
            self.protocol_version = version;
        }
        if let Some(secs) = layer.timeout_secs {
            self.timeout_secs = secs;
        }
        if let Some(secs) = layer.connect_timeout_secs {
            self.connect_timeout_secs = secs;
        }
        if let Some(user_agent) = layer.user_agent {
            self.user_agent = user_agent;
        }
        if let Some(level) = layer.logging.level {
            self.logging.level = level;
        }
        if let Some(file) = layer.logging.file {
            self.logging.file = Some(file);
        }

        self
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(self) -> Self {
        self.apply_env(|key| std::env::var(key).ok())
    }

    fn apply_env(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = var("AUR_RPC_URL") {
            self.rpc_url = val;
        }

        if let Some(val) = var("AUR_RPC_PROTOCOL") {
            if let Some(version) = ProtocolVersion::parse(&val) {
                self.protocol_version = version;
            }
        }

        if let Some(val) = var("AUR_RPC_TIMEOUT") {
            if let Ok(n) = val.parse() {
                self.timeout_secs = n;
            }
        }

        if let Some(val) = var("AUR_RPC_LOG_LEVEL") {
            self.logging.level = val;
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> AurResult<()> {
        let url = url::Url::parse(&self.rpc_url)
            .map_err(|e| AurError::config(format!("invalid rpc_url '{}': {}", self.rpc_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AurError::config(format!(
                "rpc_url must use http or https, not '{}'",
                url.scheme()
            )));
        }
        if self.timeout_secs == 0 {
            return Err(AurError::config("timeout_secs must be at least 1"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(AurError::config("connect_timeout_secs must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.rpc_url, "https://aur.archlinux.org/rpc/");
        assert_eq!(config.protocol_version, ProtocolVersion::V5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.rpc_url = "ftp://aur.archlinux.org/rpc/".to_string();
        assert!(matches!(config.validate(), Err(AurError::Config { .. })));

        config.rpc_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
rpc_url = "https://aur.archlinux.org/rpc.php"
protocol_version = "legacy"
timeout_secs = 5

[logging]
level = "debug"
"#
        )
        .unwrap();

        let parsed = Config::from_file(file.path()).unwrap();
        assert_eq!(parsed.rpc_url, "https://aur.archlinux.org/rpc.php");
        assert_eq!(parsed.protocol_version, ProtocolVersion::Legacy);
        assert_eq!(parsed.timeout_secs, 5);
        assert_eq!(parsed.connect_timeout_secs, 10);
        assert_eq!(parsed.logging.level, "debug");
    }

    #[test]
    fn test_later_layer_can_restore_defaults() {
        let system: ConfigLayer = toml::from_str(
            r#"
protocol_version = "legacy"
timeout_secs = 5
user_agent = "system-agent"
"#,
        )
        .unwrap();
        let user: ConfigLayer = toml::from_str(
            r#"
protocol_version = "v5"
timeout_secs = 30
"#,
        )
        .unwrap();

        let config = Config::default().apply(system).apply(user);
        assert_eq!(config.protocol_version, ProtocolVersion::V5);
        assert_eq!(config.timeout_secs, 30);
        // Keys the user file leaves out keep the system value
        assert_eq!(config.user_agent, "system-agent");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("AUR_RPC_URL", "http://localhost:8080/rpc"),
            ("AUR_RPC_PROTOCOL", "legacy"),
            ("AUR_RPC_TIMEOUT", "7"),
            ("AUR_RPC_LOG_LEVEL", "trace"),
        ]
        .into_iter()
        .collect();

        let config = Config::default().apply_env(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.rpc_url, "http://localhost:8080/rpc");
        assert_eq!(config.protocol_version, ProtocolVersion::Legacy);
        assert_eq!(config.timeout_secs, 7);
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_env_overrides_ignore_bad_values() {
        let env: HashMap<&str, &str> =
            [("AUR_RPC_PROTOCOL", "v9"), ("AUR_RPC_TIMEOUT", "soon")].into_iter().collect();

        let config = Config::default().apply_env(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.protocol_version, ProtocolVersion::V5);
        assert_eq!(config.timeout_secs, 30);

        let untouched = Config::default().apply_env(|_| None);
        assert_eq!(untouched.rpc_url, DEFAULT_RPC_URL);
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::from_file(&dir.path().join("missing.toml")).is_err());

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "protocol_version = \"v9\"").unwrap();
        assert!(matches!(Config::from_file(&bad), Err(AurError::Config { .. })));
    }
}
