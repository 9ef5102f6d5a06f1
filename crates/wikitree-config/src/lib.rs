use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory that relative page arguments are looked up in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages_path: Option<PathBuf>,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// How trees are printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_positions: bool,
    pub show_raw: bool,
    /// Longest text printed per entity, in characters. 0 disables clipping.
    pub max_text_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_positions: true,
            show_raw: false,
            max_text_width: 60,
        }
    }
}

impl DisplayConfig {
    pub fn max_width(&self) -> Option<usize> {
        (self.max_text_width > 0).then_some(self.max_text_width)
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.pages_path = config
            .pages_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/wikitree");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Where to read a page argument from: relative paths that exist under
    /// `pages_path` resolve there, anything else is used as given.
    pub fn resolve_input(&self, input: &Path) -> PathBuf {
        if input.is_relative()
            && let Some(pages) = &self.pages_path
        {
            let candidate = pages.join(input);
            if candidate.exists() {
                return candidate;
            }
        }
        input.to_path_buf()
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/wikitree/config.toml"));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.display.max_width(), Some(60));
    }

    #[test]
    fn test_partial_display_section() {
        let config: Config = toml::from_str(
            r#"
[display]
show_raw = true
max_text_width = 0
"#,
        )
        .unwrap();

        assert!(config.display.show_positions);
        assert!(config.display.show_raw);
        assert_eq!(config.display.max_width(), None);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/wiki/pages");
        let expanded = Config::expand_path(&path).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("wiki/pages"));
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_toml_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "pages_path = [").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            pages_path: Some(PathBuf::from("/tmp/wiki-pages")),
            display: DisplayConfig {
                show_positions: false,
                show_raw: true,
                max_text_width: 20,
            },
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_pages_path_with_env_var_in_toml() {
        unsafe {
            env::set_var("WIKITREE_TEST_ROOT", "/custom/wiki");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "pages_path = \"$WIKITREE_TEST_ROOT/pages\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.pages_path, Some(PathBuf::from("/custom/wiki/pages")));

        unsafe {
            env::remove_var("WIKITREE_TEST_ROOT");
        }
    }

    #[test]
    fn test_resolve_input_prefers_pages_path() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("Main_Page.wiki"), "x").unwrap();
        let config = Config {
            pages_path: Some(temp_dir.path().to_path_buf()),
            ..Config::default()
        };

        assert_eq!(
            config.resolve_input(Path::new("Main_Page.wiki")),
            temp_dir.path().join("Main_Page.wiki")
        );
        assert_eq!(
            config.resolve_input(Path::new("Missing.wiki")),
            PathBuf::from("Missing.wiki")
        );
        assert_eq!(
            config.resolve_input(Path::new("/abs/Main_Page.wiki")),
            PathBuf::from("/abs/Main_Page.wiki")
        );
    }
}
