use crate::permissions::AuthorizationStatus;
use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub permissions: PermissionsConfig,
    pub devices: DevicesConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Answers of the static permission oracle
#[derive(Debug, Deserialize)]
pub struct PermissionsConfig {
    pub audio: AuthorizationStatus,
    pub video: AuthorizationStatus,
    /// Decision a permission prompt resolves to
    pub grant_on_prompt: bool,
}

#[derive(Debug, Deserialize)]
pub struct DevicesConfig {
    /// Audio input labels offered by simulated sessions
    pub audio_inputs: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SimulationConfig {
    /// Make every session start fail
    #[serde(default)]
    pub fail_start: bool,
}

impl Config {
    /// Load from a config file plus `MEETING_BRIDGE__*` environment overrides
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(
                config::Environment::with_prefix("MEETING_BRIDGE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read config {}", path))?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[service]
name = "meeting-bridge"

[service.http]
bind = "127.0.0.1"
port = 8787

[permissions]
audio = "authorized"
video = "restricted"
grant_on_prompt = false

[devices]
audio_inputs = ["Built-in Microphone", "Receiver"]
"#
        )
        .unwrap();

        let cfg = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.service.http.port, 8787);
        assert_eq!(cfg.permissions.audio, AuthorizationStatus::Authorized);
        assert_eq!(cfg.permissions.video, AuthorizationStatus::Restricted);
        assert!(!cfg.permissions.grant_on_prompt);
        assert_eq!(cfg.devices.audio_inputs.len(), 2);
        assert!(!cfg.simulation.fail_start);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(Config::load("/nonexistent/meeting-bridge").is_err());
    }
}
