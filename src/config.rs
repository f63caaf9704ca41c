use crate::difficulty::Difficulty;
use crate::storage::JsonFileStore;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub(crate) struct Config {
    /// Difficulty tier selected when the program starts
    #[serde(default)]
    pub(crate) difficulty: Difficulty,

    /// Settings about data files
    #[serde(default)]
    files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("boomsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Whether scores should be loaded from & saved to disk at all
    pub(crate) fn save_scores(&self) -> bool {
        self.files.save_scores
    }

    /// Return the filepath at which scores should be stored: the file given
    /// in the configuration or, if that is not set, the default scores file
    /// path.  Return `None` if no path is present in the configuration and
    /// the default path could not be computed.
    pub(crate) fn scores_file(&self) -> Option<PathBuf> {
        self.files
            .scores_file
            .clone()
            .or_else(JsonFileStore::default_path)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which scores should be stored
    scores_file: Option<PathBuf>,

    /// Whether to load & save scores in a file
    save_scores: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            scores_file: None,
            save_scores: true,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let cfg = toml::from_str::<Config>(concat!(
            "difficulty = \"hard\"\n",
            "\n",
            "[files]\n",
            "scores-file = \"/tmp/scores.json\"\n",
            "save-scores = false\n",
        ))
        .unwrap();
        assert_eq!(cfg.difficulty, Difficulty::Hard);
        assert_eq!(cfg.files.scores_file, Some(PathBuf::from("/tmp/scores.json")));
        assert!(!cfg.save_scores());
    }

    #[test]
    fn parse_empty_config() {
        let cfg = toml::from_str::<Config>("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.difficulty, Difficulty::Easy);
        assert!(cfg.save_scores());
    }

    #[test]
    fn parse_difficulty_only() {
        let cfg = toml::from_str::<Config>("difficulty = \"normal\"\n").unwrap();
        assert_eq!(cfg.difficulty, Difficulty::Normal);
        assert_eq!(cfg.files, FileConfig::default());
    }

    #[test]
    fn parse_unknown_difficulty() {
        assert!(toml::from_str::<Config>("difficulty = \"brutal\"\n").is_err());
    }

    #[test]
    fn explicit_scores_file_wins() {
        let cfg = toml::from_str::<Config>(concat!(
            "[files]\n",
            "scores-file = \"/var/games/snake.json\"\n",
        ))
        .unwrap();
        assert_eq!(
            cfg.scores_file(),
            Some(PathBuf::from("/var/games/snake.json"))
        );
    }

    #[test]
    fn load_missing_file_allowed() {
        let tmp_path = tempfile::tempdir().unwrap();
        let path = tmp_path.path().join("config.toml");
        let cfg = Config::load(&path, true).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_missing_file_required() {
        let tmp_path = tempfile::tempdir().unwrap();
        let path = tmp_path.path().join("config.toml");
        assert!(matches!(Config::load(&path, false), Err(ConfigError::Read(_))));
    }

    #[test]
    fn load_real_file() {
        let tmp_path = tempfile::tempdir().unwrap();
        let path = tmp_path.path().join("config.toml");
        fs_err::write(&path, "difficulty = \"hard\"\n").unwrap();
        let cfg = Config::load(&path, true).unwrap();
        assert_eq!(cfg.difficulty, Difficulty::Hard);
    }

    #[test]
    fn load_unparseable_file() {
        let tmp_path = tempfile::tempdir().unwrap();
        let path = tmp_path.path().join("config.toml");
        fs_err::write(&path, "difficulty = [1, 2]\n").unwrap();
        assert!(matches!(
            Config::load(&path, true),
            Err(ConfigError::Parse(_))
        ));
    }
}
