use std::path::{Path, PathBuf};

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use platen::{Configuration, Paragraphs, Seconds};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SETTINGS_FILE: &str = "settings.toml";
const LOG_FILE: &str = "typewriter.log";
const ENV_PREFIX: &str = "TYPEWRITER_";

const DEFAULT_PARAGRAPHS: [&str; 4] = [
    "The quick brown fox jumps over the lazy dog while the farmer watches from the porch",
    "Practice makes progress and steady hands make fewer mistakes than hurried ones",
    "A good typist keeps their eyes on the text and lets their fingers find the keys",
    "Every keystroke counts so take a breath and focus on accuracy before speed",
];

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Session length in seconds
    pub duration_secs: Seconds,
    /// Seconds added by the extend keys, in key order
    pub extend_presets: Vec<Seconds>,
    /// Paragraphs to practice on
    pub paragraphs: Vec<String>,
    /// A TOML file with a `paragraphs = [...]` array, used instead of `paragraphs`
    pub paragraphs_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        let session = Configuration::default();
        Self {
            duration_secs: session.total_time,
            extend_presets: session.extend_presets,
            paragraphs: DEFAULT_PARAGRAPHS.iter().map(ToString::to_string).collect(),
            paragraphs_file: None,
            log_file: None,
            theme: Theme::default(),
        }
    }
}

/// Text color theme
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Theme {
    pub correct: Color,
    pub incorrect: Color,
    pub untyped: Color,
    pub cursor: Color,
    pub highlight: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            correct: Color::Green,
            incorrect: Color::Red,
            untyped: Color::Gray,
            cursor: Color::White,
            highlight: Color::Blue,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ParagraphFile {
    paragraphs: Vec<String>,
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    #[from(skip)]
    NoDirectory,

    #[error("Failed to create config directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),

    #[error("Failed to read paragraphs file '{path}': {error}")]
    #[from(skip)]
    ReadParagraphs {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Failed to parse paragraphs file: {0}")]
    ParseParagraphs(toml::de::Error),

    #[error("No paragraphs configured")]
    #[from(skip)]
    NoParagraphs,

    #[error("The session duration must be at least one second")]
    #[from(skip)]
    ZeroDuration,
}

#[derive(Debug)]
pub struct Config {
    pub settings: Settings,
    pub paragraphs: Paragraphs,
    pub directory: PathBuf,
}

impl Config {
    /// Locate the config directory and load the settings from it.
    ///
    /// `duration` overrides the configured session length.
    pub fn get(
        override_path: Option<PathBuf>,
        duration: Option<Seconds>,
    ) -> Result<Self, ConfigError> {
        let directory = override_path
            .or_else(|| {
                ProjectDirs::from("com", "Typewriter", "Typewriter")
                    .map(|dirs| dirs.config_dir().to_path_buf())
            })
            .ok_or(ConfigError::NoDirectory)?;

        let mut config = Self::load(directory)?;
        if let Some(duration) = duration {
            if duration == 0 {
                return Err(ConfigError::ZeroDuration);
            }
            config.settings.duration_secs = duration;
        }

        Ok(config)
    }

    /// Load settings from defaults, `settings.toml` in `directory`, and the environment, in
    /// that order.
    pub fn load(directory: PathBuf) -> Result<Self, ConfigError> {
        if !directory.exists() {
            std::fs::create_dir_all(&directory)?;
        }

        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(directory.join(SETTINGS_FILE)))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(Box::new)?;

        if settings.duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }

        let paragraphs = match &settings.paragraphs_file {
            Some(file) => read_paragraphs(&directory.join(file))?,
            None => settings.paragraphs.clone(),
        };
        let paragraphs = Paragraphs::new(paragraphs).ok_or(ConfigError::NoParagraphs)?;

        Ok(Self {
            settings,
            paragraphs,
            directory,
        })
    }

    /// Session settings for the engine
    pub fn session(&self) -> Configuration {
        Configuration {
            total_time: self.settings.duration_secs,
            extend_presets: self.settings.extend_presets.clone(),
            ..Configuration::default()
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.settings
            .log_file
            .as_ref()
            .map_or_else(|| self.directory.join(LOG_FILE), |file| self.directory.join(file))
    }
}

fn read_paragraphs(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|error| ConfigError::ReadParagraphs {
        path: path.to_path_buf(),
        error,
    })?;
    let file: ParagraphFile = toml::from_str(&content)?;
    Ok(file.paragraphs)
}
