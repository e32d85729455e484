//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::qr::QrOptions;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use url::Url;

/// Theme resources
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThemeConfig {
    /// Href of the alternate "garage" stylesheet
    #[serde(default = "default_garage_stylesheet")]
    pub garage_stylesheet: String,
}

fn default_garage_stylesheet() -> String {
    "/garage.css".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            garage_stylesheet: default_garage_stylesheet(),
        }
    }
}

/// Complete configuration for the service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Public base URL links are built against (e.g. "https://pagos.example.mx")
    #[serde(default = "default_origin")]
    pub origin: String,

    #[serde(default)]
    pub qr: QrOptions,

    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_origin() -> String {
    "http://127.0.0.1:3000".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            origin: default_origin(),
            qr: QrOptions::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        let origin = Url::parse(&self.origin).map_err(|e| ConfigError::InvalidValue {
            key: "origin".to_string(),
            message: e.to_string(),
        })?;

        if !matches!(origin.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                key: "origin".to_string(),
                message: format!("unsupported scheme '{}'", origin.scheme()),
            });
        }

        if origin.query().is_some() || origin.fragment().is_some() {
            return Err(ConfigError::InvalidValue {
                key: "origin".to_string(),
                message: "origin must not carry a query or fragment".to_string(),
            });
        }

        if self.qr.size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "qr.size".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Replace the origin, keeping the rest
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }
}
