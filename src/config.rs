use std::env;
use std::path::Path;

use serde::Deserialize;
use url::Url;

/// Session configuration the host loads once at startup. The backend
/// endpoint and publishable key identify the hosted record store; the
/// fallback page is where join buttons route when the external form is
/// unavailable.
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub backend_url: String,
    pub backend_publishable_key: String,
    pub join_fallback_page: String,
    pub log_level: String,
}

impl SiteConfig {
    pub fn from_env(env_path: &Path) -> Result<Self, config::ConfigError> {
        // Load the specified .env file. Propagate an error if it fails.
        dotenvy::from_path(env_path).map_err(|e| {
            config::ConfigError::Message(format!(
                "FATAL: Failed to load .env file from '{}'. Error: {}",
                env_path.display(),
                e
            ))
        })?;

        let backend_url = env::var("BACKEND_URL").map_err(|_| {
            config::ConfigError::Message(
                "FATAL: Environment variable 'BACKEND_URL' is not set in your .env file."
                    .to_string(),
            )
        })?;

        // The endpoint must be a well-formed absolute URL; catching this at
        // startup beats every later request failing with an opaque message.
        Url::parse(&backend_url).map_err(|e| {
            config::ConfigError::Message(format!(
                "FATAL: 'BACKEND_URL' is not a valid absolute URL ('{}'): {}",
                backend_url, e
            ))
        })?;

        let backend_publishable_key = env::var("BACKEND_PUBLISHABLE_KEY").map_err(|_| {
            config::ConfigError::Message(
                "FATAL: Environment variable 'BACKEND_PUBLISHABLE_KEY' is not set in your .env file."
                    .to_string(),
            )
        })?;

        let join_fallback_page =
            env::var("JOIN_FALLBACK_PAGE").unwrap_or_else(|_| "contact.html".to_string());
        if join_fallback_page.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "FATAL: 'JOIN_FALLBACK_PAGE' must not be empty.".to_string(),
            ));
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let builder = config::Config::builder()
            .set_override("backend_url", backend_url)?
            .set_override("backend_publishable_key", backend_publishable_key)?
            .set_override("join_fallback_page", join_fallback_page)?
            .set_override("log_level", log_level)?
            .build()?;

        builder.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // One test drives every case in sequence: dotenvy never overrides
    // variables already present in the process environment, so the phases
    // set them directly and the .env file only has to exist.
    #[test]
    fn from_env_validates_then_loads() {
        let dir = env::temp_dir().join("ecell_site_core_config_test");
        fs::create_dir_all(&dir).expect("temp dir");
        let env_file = dir.join("site.env");
        fs::write(&env_file, "").expect("write env file");

        assert!(SiteConfig::from_env(&dir.join("missing.env")).is_err());

        env::set_var("BACKEND_URL", "not a url");
        env::set_var("BACKEND_PUBLISHABLE_KEY", "pk_anon");
        assert!(SiteConfig::from_env(&env_file).is_err());

        env::set_var("BACKEND_URL", "https://khx.example.supabase.co");
        let config = SiteConfig::from_env(&env_file).expect("config must load");
        assert_eq!(config.backend_url, "https://khx.example.supabase.co");
        assert_eq!(config.backend_publishable_key, "pk_anon");
        assert_eq!(config.join_fallback_page, "contact.html");
        assert_eq!(config.log_level, "info");
    }
}
