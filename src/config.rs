//! Session tuning knobs. Defaults match the shipped game; a JSON override can
//! be stored in the browser under [`CONFIG_STORAGE_KEY`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;
use crate::model::{Color, Team};

pub const CONFIG_STORAGE_KEY: &str = "fd_config";

pub const DEFAULT_PALETTE: [&str; 6] = [
    "#FF3B30", "#34C759", "#007AFF", "#FF9500", "#FFD700", "#FF69B4",
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamColors {
    pub a: Color,
    pub b: Color,
}

impl Default for TeamColors {
    fn default() -> Self {
        Self {
            a: Color::new("#FF3B30"),
            b: Color::new("#007AFF"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds shown when the first finger lands.
    pub countdown_secs: u32,
    pub tick_ms: u32,
    /// How long a result stays on screen before the automatic reset.
    pub restart_delay_ms: u32,
    pub palette: Vec<Color>,
    pub team_colors: TeamColors,
    pub circle_radius: f64,
    pub show_debug: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            countdown_secs: 10,
            tick_ms: 1000,
            restart_delay_ms: 2000,
            palette: DEFAULT_PALETTE.iter().copied().map(Color::new).collect(),
            team_colors: TeamColors::default(),
            circle_radius: 50.0,
            show_debug: true,
        }
    }
}

impl SessionConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.countdown_secs == 0 {
            return Err(ConfigError::ZeroCountdown);
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if !(self.circle_radius > 0.0) {
            return Err(ConfigError::BadRadius(self.circle_radius));
        }
        Ok(())
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_ms))
    }

    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.restart_delay_ms))
    }

    pub fn team_color(&self, team: Team) -> &Color {
        match team {
            Team::A => &self.team_colors.a,
            Team::B => &self.team_colors.b,
        }
    }
}
