use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::background::DEFAULT_GLYPHS;
use crate::error::{AgeError, AgeResult};
use crate::svg::Theme;

const ENV_THEME: &str = "AGECALC_THEME";
const ENV_SPEECH_COMMAND: &str = "AGECALC_SPEECH_COMMAND";
const ENV_MILESTONE_YEARS: &str = "AGECALC_MILESTONE_YEARS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
    pub speech_program: String,
    pub speech_args: Vec<String>,
    /// Birthday whose passing is reported as "over N years old".
    pub milestone_years: u32,
    pub glyphs: usize,
    pub width: u32,
    pub height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            speech_program: "espeak".to_string(),
            speech_args: Vec::new(),
            milestone_years: 14,
            glyphs: DEFAULT_GLYPHS,
            width: 960,
            height: 540,
        }
    }
}

impl std::str::FromStr for Config {
    type Err = AgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
            .map_err(|e| AgeError::config(format!("failed to parse config JSON: {e}")))
    }
}

impl Config {
    /// Defaults, then the JSON file at `path` if given, then environment.
    pub fn load(path: Option<&Path>) -> AgeResult<Self> {
        let mut config = match path {
            Some(path) => {
                let text = fs::read_to_string(path)?;
                tracing::debug!(path = %path.display(), "loaded config file");
                text.parse()?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> AgeResult<()> {
        if let Some(theme) = lookup(ENV_THEME) {
            self.theme = match theme.to_ascii_lowercase().as_str() {
                "dark" => Theme::Dark,
                "light" => Theme::Light,
                other => {
                    return Err(AgeError::config(format!(
                        "{ENV_THEME} must be 'dark' or 'light', got '{other}'"
                    )));
                }
            };
        }

        if let Some(program) = lookup(ENV_SPEECH_COMMAND) {
            self.speech_program = program;
        }

        if let Some(years) = lookup(ENV_MILESTONE_YEARS) {
            self.milestone_years = years.trim().parse().map_err(|e| {
                AgeError::config(format!("{ENV_MILESTONE_YEARS} is not a number: {e}"))
            })?;
        }

        Ok(())
    }

    pub fn validate(&self) -> AgeResult<()> {
        if self.milestone_years == 0 {
            return Err(AgeError::config("milestone_years must be at least 1"));
        }
        if self.speech_program.trim().is_empty() {
            return Err(AgeError::config("speech_program must not be empty"));
        }
        if self.glyphs == 0 && self.width > 0 && self.height > 0 {
            return Err(AgeError::config(
                "glyphs must be at least 1 when a viewport is set",
            ));
        }
        Ok(())
    }
}
