//! Game configuration and input profiles
//!
//! Profile-dependent balance (touch play is a little more forgiving) plus the
//! handful of tunables the simulation reads. On the web an optional JSON
//! document in the page can override any field; nothing is written back.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Input profile, chosen from the user agent at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputProfile {
    /// Keyboard play
    #[default]
    Desktop,
    /// On-screen touch buttons
    Touch,
}

impl InputProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputProfile::Desktop => "Desktop",
            InputProfile::Touch => "Touch",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "desktop" | "keyboard" => Some(InputProfile::Desktop),
            "touch" | "mobile" => Some(InputProfile::Touch),
            _ => None,
        }
    }

    /// Multiplier on the rock collision distance
    pub fn collision_forgiveness(&self) -> f32 {
        match self {
            InputProfile::Desktop => 1.0,
            InputProfile::Touch => 0.9,
        }
    }

    /// Rock scale range `[min, max)`
    pub fn rock_scale_range(&self) -> (f32, f32) {
        match self {
            InputProfile::Desktop => (1.0, 2.0),
            InputProfile::Touch => (0.8, 1.2),
        }
    }

    /// Rock speed range `[min, max)` in units per frame
    pub fn rock_speed_range(&self) -> (f32, f32) {
        match self {
            InputProfile::Desktop => (1.0, 8.0),
            InputProfile::Touch => (0.8, 5.8),
        }
    }

    /// Planet movement speed per level (units per frame)
    pub fn planet_move_speeds(&self) -> [f32; 4] {
        match self {
            InputProfile::Desktop => [0.5, 0.7, 0.9, 1.1],
            InputProfile::Touch => [0.4, 0.6, 0.8, 1.0],
        }
    }

    /// Whether the touch-button overlay feeds input
    pub fn touch_controls(&self) -> bool {
        *self == InputProfile::Touch
    }
}

/// Simulation and presentation tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub profile: InputProfile,

    // === Collision ===
    /// Scales `player.radius + rock.radius` before the overlap test
    pub collision_forgiveness: f32,
    /// Fixed player-to-planet distance that wins a level (not scaled to the field)
    pub win_distance: f32,

    // === Rocks ===
    pub rock_scale_range: (f32, f32),
    pub rock_speed_range: (f32, f32),
    /// Milliseconds between rock spawns
    pub spawn_interval_ms: f64,

    // === Planets ===
    pub planet_move_speeds: [f32; 4],

    // === Clock / trail ===
    /// Milliseconds per elapsed-time tick
    pub clock_interval_ms: f64,
    /// Catmull-Rom tension for the path trail
    pub trail_tension: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_profile(InputProfile::Desktop)
    }
}

/// Partial config document; every field is optional and overrides the profile defaults
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigOverrides {
    profile: Option<InputProfile>,
    collision_forgiveness: Option<f32>,
    win_distance: Option<f32>,
    rock_scale_range: Option<(f32, f32)>,
    rock_speed_range: Option<(f32, f32)>,
    spawn_interval_ms: Option<f64>,
    planet_move_speeds: Option<[f32; 4]>,
    clock_interval_ms: Option<f64>,
    trail_tension: Option<f32>,
}

impl GameConfig {
    /// Create a config with the defaults for a profile
    pub fn from_profile(profile: InputProfile) -> Self {
        Self {
            profile,
            collision_forgiveness: profile.collision_forgiveness(),
            win_distance: 40.0,
            rock_scale_range: profile.rock_scale_range(),
            rock_speed_range: profile.rock_speed_range(),
            spawn_interval_ms: 2000.0,
            planet_move_speeds: profile.planet_move_speeds(),
            clock_interval_ms: 1000.0,
            trail_tension: 0.5,
        }
    }

    /// Parse a JSON override document on top of `fallback`'s defaults.
    ///
    /// A `profile` key in the document switches the base profile before the
    /// remaining keys are applied.
    pub fn from_json(json: &str, fallback: InputProfile) -> Result<Self, ConfigError> {
        let overrides: ConfigOverrides = serde_json::from_str(json)?;
        let mut config = Self::from_profile(overrides.profile.unwrap_or(fallback));

        if let Some(v) = overrides.collision_forgiveness {
            config.collision_forgiveness = v;
        }
        if let Some(v) = overrides.win_distance {
            config.win_distance = v;
        }
        if let Some(v) = overrides.rock_scale_range {
            config.rock_scale_range = v;
        }
        if let Some(v) = overrides.rock_speed_range {
            config.rock_speed_range = v;
        }
        if let Some(v) = overrides.spawn_interval_ms {
            config.spawn_interval_ms = v;
        }
        if let Some(v) = overrides.planet_move_speeds {
            config.planet_move_speeds = v;
        }
        if let Some(v) = overrides.clock_interval_ms {
            config.clock_interval_ms = v;
        }
        if let Some(v) = overrides.trail_tension {
            config.trail_tension = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Shortest allowed period for the clock and spawner (ms)
    pub const MIN_INTERVAL_MS: f64 = 1.0;

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.collision_forgiveness > 0.0) {
            return Err(ConfigError::OutOfRange {
                name: "collision_forgiveness",
                value: self.collision_forgiveness as f64,
                expected: "> 0",
            });
        }
        if !(self.win_distance > 0.0) {
            return Err(ConfigError::OutOfRange {
                name: "win_distance",
                value: self.win_distance as f64,
                expected: "> 0",
            });
        }
        for (name, ms) in [
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("clock_interval_ms", self.clock_interval_ms),
        ] {
            if !(ms >= Self::MIN_INTERVAL_MS) {
                return Err(ConfigError::OutOfRange {
                    name,
                    value: ms,
                    expected: ">= 1",
                });
            }
        }
        for (name, (min, max)) in [
            ("rock_scale_range", self.rock_scale_range),
            ("rock_speed_range", self.rock_speed_range),
        ] {
            if !(min > 0.0) {
                return Err(ConfigError::OutOfRange {
                    name,
                    value: min as f64,
                    expected: "> 0",
                });
            }
            if !(max > min) {
                return Err(ConfigError::EmptyRange { name, min, max });
            }
        }
        if let Some(&speed) = self.planet_move_speeds.iter().find(|s| !(**s > 0.0)) {
            return Err(ConfigError::OutOfRange {
                name: "planet_move_speeds",
                value: speed as f64,
                expected: "> 0",
            });
        }
        Ok(())
    }

    /// Build the config for `profile`, applying the page's override document if present (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(profile: InputProfile) -> Self {
        /// DOM id of the optional override document
        const CONFIG_ELEMENT_ID: &str = "game-config";

        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json, profile) {
                Ok(config) => {
                    log::info!("Loaded config overrides ({})", config.profile.as_str());
                    return config;
                }
                Err(e) => log::warn!("Ignoring config overrides: {}", e),
            }
        }

        log::info!("Using {} defaults", profile.as_str());
        Self::from_profile(profile)
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(profile: InputProfile) -> Self {
        Self::from_profile(profile)
    }
}
