//! AI configuration.

use std::fmt;
use std::str::FromStr;

use chess_core::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Playing strength, expressed as search depth in plies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Returns the search depth for this difficulty.
    pub const fn depth(self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// Error returned when a difficulty name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}', expected easy, medium or hard")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Settings of one game against the AI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// The human's color. The AI plays the other one.
    pub player_color: Color,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            difficulty: Difficulty::Medium,
            player_color: Color::White,
        }
    }
}

impl AiConfig {
    /// Returns the color the AI plays.
    pub const fn ai_color(&self) -> Color {
        self.player_color.opposite()
    }

    /// Returns the search depth.
    pub const fn depth(&self) -> u32 {
        self.difficulty.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_depths() {
        assert_eq!(Difficulty::Easy.depth(), 2);
        assert_eq!(Difficulty::Medium.depth(), 3);
        assert_eq!(Difficulty::Hard.depth(), 4);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn difficulty_from_str() {
        assert_eq!("easy".parse(), Ok(Difficulty::Easy));
        assert_eq!("HARD".parse(), Ok(Difficulty::Hard));
        assert!("expert".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Medium.to_string(), "medium");
    }

    #[test]
    fn default_config() {
        let config = AiConfig::default();
        assert_eq!(config.player_color, Color::White);
        assert_eq!(config.ai_color(), Color::Black);
        assert_eq!(config.depth(), 3);
    }

    #[test]
    fn deserialize_partial_config() {
        let config: AiConfig = toml::from_str("difficulty = \"hard\"").unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.player_color, Color::White);

        let config: AiConfig = toml::from_str("player_color = \"black\"").unwrap();
        assert_eq!(config.ai_color(), Color::White);
        assert_eq!(config.difficulty, Difficulty::Medium);
    }
}
