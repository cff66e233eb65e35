//! Server configuration.
//!
//! Settings come from an optional `config.toml` (non-secret defaults) with
//! environment variables taking precedence. Credentials come from the
//! environment only and are wrapped in [`SecretString`] immediately. A
//! missing or malformed file is tolerated with a warning; missing
//! credentials are a runtime 503 at the affected endpoints, not a startup
//! failure.

use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;

/// Default listen port.
const DEFAULT_PORT: u16 = 3001;

/// Default chat model.
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// Default builder model.
const DEFAULT_BUILDER_MODEL: &str = "gpt-4o";

/// Default ElevenLabs voice.
const DEFAULT_VOICE_ID: &str = "m3yAHyFEFKtbCIM5n7GF";

/// Resolved server configuration.
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub chat_model: String,
    pub builder_model: String,
    pub voice_id: String,
    /// Directory served as the web frontend, when it exists.
    pub web_dir: String,
    pub openai_api_key: Option<SecretString>,
    pub openrouter_api_key: Option<SecretString>,
    pub elevenlabs_api_key: Option<SecretString>,
}

// ServerConfig intentionally does NOT derive Debug so the credential
// fields can never leak through logging.

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            builder_model: DEFAULT_BUILDER_MODEL.to_string(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            web_dir: "web".to_string(),
            openai_api_key: None,
            openrouter_api_key: None,
            elevenlabs_api_key: None,
        }
    }
}

/// Optional non-secret settings file shape.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub chat_model: Option<String>,
    pub builder_model: Option<String>,
    pub voice_id: Option<String>,
    pub web_dir: Option<String>,
}

impl ServerConfig {
    /// Load configuration: file defaults, then environment overrides.
    pub async fn load(config_path: &Path) -> Self {
        let file = read_config_file(config_path).await;
        Self::default().with_file(file).with_env()
    }

    /// Apply non-secret settings from a parsed file.
    pub fn with_file(mut self, file: ConfigFile) -> Self {
        if let Some(host) = file.host {
            self.host = host;
        }
        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(model) = file.chat_model {
            self.chat_model = model;
        }
        if let Some(model) = file.builder_model {
            self.builder_model = model;
        }
        if let Some(voice) = file.voice_id {
            self.voice_id = voice;
        }
        if let Some(dir) = file.web_dir {
            self.web_dir = dir;
        }
        self
    }

    /// Overlay environment variables; credentials are env-only.
    pub fn with_env(mut self) -> Self {
        if let Ok(host) = std::env::var("HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!("Ignoring unparsable PORT value"),
            }
        }
        if let Ok(model) = std::env::var("ATELIER_CHAT_MODEL") {
            self.chat_model = model;
        }
        if let Ok(model) = std::env::var("ATELIER_BUILDER_MODEL") {
            self.builder_model = model;
        }
        if let Ok(voice) = std::env::var("ATELIER_VOICE_ID") {
            self.voice_id = voice;
        }
        if let Ok(dir) = std::env::var("ATELIER_WEB_DIR") {
            self.web_dir = dir;
        }
        self.openai_api_key = secret_from_env("OPENAI_API_KEY");
        self.openrouter_api_key = secret_from_env("OPENROUTER_API_KEY");
        self.elevenlabs_api_key = secret_from_env("ELEVENLABS_API_KEY");
        self
    }

    /// Whether any completion credential is configured.
    pub fn hosted_available(&self) -> bool {
        self.openai_api_key.is_some() || self.openrouter_api_key.is_some()
    }
}

fn secret_from_env(name: &str) -> Option<SecretString> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(SecretString::from)
}

/// Parse `config.toml`, tolerating absence and malformed content.
async fn read_config_file(path: &Path) -> ConfigFile {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return ConfigFile::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ConfigFile::default();
        }
    };

    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => file,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ConfigFile::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let file = read_config_file(&tmp.path().join("config.toml")).await;
        let config = ServerConfig::default().with_file(file);
        assert_eq!(config.port, 3001);
        assert_eq!(config.chat_model, "gpt-4o-mini");
        assert_eq!(config.builder_model, "gpt-4o");
    }

    #[tokio::test]
    async fn valid_file_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        tokio::fs::write(
            &path,
            r#"
port = 8080
builder_model = "gpt-4.1"
web_dir = "dist"
"#,
        )
        .await
        .unwrap();

        let config = ServerConfig::default().with_file(read_config_file(&path).await);
        assert_eq!(config.port, 8080);
        assert_eq!(config.builder_model, "gpt-4.1");
        assert_eq!(config.web_dir, "dist");
        // Untouched fields keep their defaults.
        assert_eq!(config.chat_model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn malformed_file_is_tolerated() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = ServerConfig::default().with_file(read_config_file(&path).await);
        assert_eq!(config.port, 3001);
    }

    #[test]
    fn hosted_availability_tracks_credentials() {
        let mut config = ServerConfig::default();
        assert!(!config.hosted_available());
        config.openai_api_key = Some(SecretString::from("sk-test"));
        assert!(config.hosted_available());
    }
}
