use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_binary() -> String {
    "ollama".to_string()
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OllamaConfig {
    // Executable used for the `list` and `run` subcommands.
    #[serde(default = "default_binary")]
    pub binary: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        OllamaConfig {
            binary: default_binary(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ollama: OllamaConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl Config {
    // Any problem reading or parsing falls back to defaults. The file is
    // never written.
    pub fn load() -> Self {
        let config_path = Self::get_config_path();

        if config_path.exists() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => return config,
                    Err(e) => eprintln!("Error parsing config.toml: {}. Using defaults.", e),
                },
                Err(e) => eprintln!("Error reading config.toml: {}. Using defaults.", e),
            }
        }

        Config::default()
    }

    pub fn get_config_path() -> PathBuf {
        if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home).join(".config/ollama-chat/config.toml")
        } else {
            PathBuf::from("config.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.ollama.binary, "ollama");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let config: Config =
            toml::from_str("[ollama]\nbinary = \"/usr/local/bin/ollama\"\n").unwrap();
        assert_eq!(config.ollama.binary, "/usr/local/bin/ollama");
        assert_eq!(config.window.width, 800);

        let config: Config = toml::from_str("[window]\nwidth = 1024\n").unwrap();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
    }
}
