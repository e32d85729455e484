//! Server host for transport-agnostic state
//!
//! The host holds everything a handler needs: the loaded configuration and the
//! compiled page templates. Exposures consume it and never touch configuration
//! loading themselves.

use crate::config::AppConfig;
use crate::pages::templates;
use anyhow::Result;
use std::sync::Arc;
use tera::Tera;

/// Host context containing all service state
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(ServerHost::from_config(AppConfig::default())?);
/// let app = RestExposure::build_router(host, vec![])?;
/// ```
pub struct ServerHost {
    /// Validated configuration
    pub config: Arc<AppConfig>,

    /// Compiled page templates
    pub templates: Arc<Tera>,
}

impl ServerHost {
    /// Validate the configuration and compile the templates
    pub fn from_config(config: AppConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config: Arc::new(config),
            templates: Arc::new(templates::load()?),
        })
    }

    /// Public origin links are built against
    pub fn origin(&self) -> &str {
        &self.config.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_compiles_templates() {
        let host = ServerHost::from_config(AppConfig::default()).expect("should build host");
        let names: Vec<&str> = host.templates.get_template_names().collect();
        assert!(names.contains(&"form.html"));
        assert!(names.contains(&"viewer.html"));
    }

    #[test]
    fn test_from_config_rejects_invalid_config() {
        let config = AppConfig::default().with_origin("ftp://example.com");
        assert!(ServerHost::from_config(config).is_err());
    }

    #[test]
    fn test_origin_accessor() {
        let config = AppConfig::default().with_origin("https://pagos.example.mx");
        let host = ServerHost::from_config(config).unwrap();
        assert_eq!(host.origin(), "https://pagos.example.mx");
    }
}
