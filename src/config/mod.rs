use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

mod symbols;
mod template;

pub use symbols::SymbolTable;
pub use template::{Align, Row, TemplateBlock};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub control: ControlConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

/// Everything the status renderer reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    /// Cycle ticks to dwell at each end of a scrolling block.
    #[serde(default = "default_cycle_pause")]
    pub initial_cycle_pause: u64,
    #[serde(default)]
    pub progressbar: ProgressbarConfig,
    #[serde(default = "template::default_template")]
    pub template: Vec<Row>,
    #[serde(
        default = "SymbolTable::default_symbols",
        deserialize_with = "symbols::deserialize_symbols"
    )]
    pub symbols: SymbolTable,
    #[serde(
        default = "SymbolTable::default_states",
        deserialize_with = "symbols::deserialize_states"
    )]
    pub states: SymbolTable,
}

fn default_width() -> usize {
    45
}

fn default_cycle_pause() -> u64 {
    3
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            initial_cycle_pause: default_cycle_pause(),
            progressbar: ProgressbarConfig::default(),
            template: template::default_template(),
            symbols: SymbolTable::default_symbols(),
            states: SymbolTable::default_states(),
        }
    }
}

impl StatusConfig {
    /// Parse the status section handed over by the editor as JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).with_context(|| "Failed to parse status config JSON")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressbarConfig {
    pub width: usize,
}

impl Default for ProgressbarConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Milliseconds to wait after a command before reading the player again.
    #[serde(default = "default_wait_ms")]
    pub wait_ms: u64,
    #[serde(default = "default_true")]
    pub auto_show_status: bool,
    #[serde(default = "default_process_name")]
    pub process_name: String,
}

fn default_wait_ms() -> u64 {
    200
}

fn default_true() -> bool {
    true
}

fn default_process_name() -> String {
    "spotify".to_string()
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            wait_ms: default_wait_ms(),
            auto_show_status: true,
            process_name: default_process_name(),
        }
    }
}

/// Timer settings consumed by the editor side only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    pub refresh_interval: u64,
    pub cycle_speed: u64,
    pub timeout: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            refresh_interval: 1000,
            cycle_speed: 250,
            timeout: 5000,
        }
    }
}

impl Config {
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spotify-nvim")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load from an explicit path, which must exist, or from the default
    /// location, falling back to defaults when there is no file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                Self::load_file(path)
            }
            None => {
                let config_path = Self::config_path();
                if config_path.exists() {
                    Self::load_file(&config_path)
                } else {
                    tracing::debug!("No config at {}, using defaults", config_path.display());
                    Ok(Config::default())
                }
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).with_context(|| "Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.status.width, 45);
        assert_eq!(config.status.initial_cycle_pause, 3);
        assert_eq!(config.control.wait_ms, 200);
        assert!(config.control.auto_show_status);
        assert_eq!(config.control.process_name, "spotify");
        assert_eq!(config.editor.cycle_speed, 250);
        assert_eq!(config.status.template.len(), 6);
        assert_eq!(config.status.symbols.get("volume.high"), "🔊");
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = Config::parse(
            r#"
            [status]
            width = 30

            [status.symbols]
            playing = ">"
            "volume.low" = "v"

            [control]
            auto_show_status = false
            "#,
        )
        .unwrap();

        assert_eq!(config.status.width, 30);
        assert_eq!(config.status.progressbar.width, 45);
        assert_eq!(config.status.symbols.get("playing"), ">");
        assert_eq!(config.status.symbols.get("volume.low"), "v");
        assert_eq!(config.status.symbols.get("paused"), "■");
        assert!(!config.control.auto_show_status);
        assert_eq!(config.control.wait_ms, 200);
    }

    #[test]
    fn test_template_rows() {
        let config = Config::parse(
            r#"
            [status]
            template = [
                "{title}",
                [],
                [{ content = "{time}", width = 10, align = "left" }, "{volume}%"],
                { content = "{artists}", align = "center", shorten = true },
            ]
            "#,
        )
        .unwrap();

        let template = &config.status.template;
        assert_eq!(template.len(), 4);
        assert_eq!(template[0].blocks().len(), 1);
        assert_eq!(template[0].blocks()[0].content, "{title}");
        assert!(template[1].blocks().is_empty());

        let blocks = template[2].blocks();
        assert_eq!(blocks[0].width, Some(10));
        assert_eq!(blocks[0].align, Some(Align::Left));
        assert_eq!(blocks[1].content, "{volume}%");
        assert_eq!(blocks[1].align, None);
        assert!(!blocks[1].shorten);

        let artists = &template[3].blocks()[0];
        assert_eq!(artists.align, Some(Align::Center));
        assert!(artists.shorten);
    }

    #[test]
    fn test_status_from_json() {
        let status = StatusConfig::from_json(
            r#"{
                "width": 20,
                "template": [["{title} {volume}%"]],
                "symbols": {"volume": {"high": "H"}}
            }"#,
        )
        .unwrap();
        assert_eq!(status.width, 20);
        assert_eq!(status.template.len(), 1);
        assert_eq!(status.symbols.get("volume.high"), "H");
        assert_eq!(status.states.get("playing"), "Playing");
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("nope.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_serialize_and_reload() {
        let text = Config::default().to_toml().unwrap();
        let config = Config::parse(&text).unwrap();
        assert_eq!(config.status.template.len(), 6);
        assert_eq!(config.status.symbols, SymbolTable::default_symbols());
    }
}
