use std::{path::Path, time::Duration};

use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// RUST_LOG compatible settings string. Default "info"
    #[serde(default = "default_log")]
    pub log: String,
    /// Pause between two frames of the draw announcement, in milliseconds
    #[serde(default = "default_animation_delay_ms")]
    pub animation_delay_ms: u64,
    /// File name the raffle record is attached under
    #[serde(default = "default_attachment_name")]
    pub attachment_name: String,
    /// Host ID of the `/raffle` command, used to link users to `create`
    #[serde(default)]
    pub create_command_id: Option<u64>,
}

fn default_log() -> String {
    "info".to_string()
}

fn default_animation_delay_ms() -> u64 {
    1000
}

fn default_attachment_name() -> String {
    "raffle.json".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log: default_log(),
            animation_delay_ms: default_animation_delay_ms(),
            attachment_name: default_attachment_name(),
            create_command_id: None,
        }
    }
}

impl Settings {
    pub fn animation_delay(&self) -> Duration {
        Duration::from_millis(self.animation_delay_ms)
    }

    /// Load Settings from an optional TOML file, overridden by environment
    /// variables prefixed with "RAFFLE_". For example "RAFFLE_LOG" overrides
    /// the log setting.
    pub fn new<P: AsRef<Path>>(path: Option<P>) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder();

        if let Some(file) = path {
            builder = builder
                .add_source(File::with_name(&file.as_ref().to_string_lossy()).required(false));
        }

        builder
            .add_source(
                Environment::with_prefix("RAFFLE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|config| config.try_deserialize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let settings = Settings::new(None::<&Path>).unwrap();
        assert_eq!(settings.attachment_name, "raffle.json");
        assert_eq!(settings.animation_delay(), Duration::from_secs(1));
        assert_eq!(settings.create_command_id, None);
    }

    #[test]
    fn test_env_overrides_log() {
        std::env::set_var("RAFFLE_LOG", "raffle_cog=debug");
        let settings = Settings::new(None::<&Path>).unwrap();
        std::env::remove_var("RAFFLE_LOG");

        assert_eq!(settings.log, "raffle_cog=debug");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir()
            .join(format!("raffle-settings-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "animation_delay_ms = 250\nattachment_name = \"draw.json\"\ncreate_command_id = 42\n",
        )
        .unwrap();

        let settings = Settings::new(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.animation_delay(), Duration::from_millis(250));
        assert_eq!(settings.attachment_name, "draw.json");
        assert_eq!(settings.create_command_id, Some(42));
    }
}
