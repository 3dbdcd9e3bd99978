use anyhow::{Context, Result};
use engine::config_log;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::FlightError;
use crate::input_context::{ButtonId, Handedness, JoystickId, PalmId};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    pub thrust: ThrustConfig,
    pub view: ViewConfig,
    pub grab: GrabConfig,
    pub bindings: BindingConfig,
}

/// Thrust joystick ("hand jets")
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrustConfig {
    pub magnitude: f32,
    pub initial_multiplier: f32,
    /// Per-second growth of the ramp while the joystick stays deflected
    pub increase_rate: f32,
    pub max_multiplier: f32,
}

impl Default for ThrustConfig {
    fn default() -> Self {
        ThrustConfig {
            magnitude: 150.0,
            initial_multiplier: 1.0,
            increase_rate: 1.05,
            max_multiplier: 75.0,
        }
    }
}

/// View joystick, in degrees per second at full deflection
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub yaw_magnitude: f32,
    pub pitch_magnitude: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            yaw_magnitude: 100.0,
            pitch_magnitude: 50.0,
        }
    }
}

/// Which hand drives the shared grab delta when both are held
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrabArbitration {
    /// Hands write in processing order (right, then left); the last write wins
    #[default]
    LastProcessed,
    PreferRight,
    PreferLeft,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrabConfig {
    /// Thrust per unit of hand travel. Zero leaves grabbing rotation-only.
    pub thrust_scaling: f32,
    /// Impulse per unit of hand velocity applied when a grab is released
    pub release_follow_through: f32,
    pub yaw_scaling: f32,
    pub roll_scaling: f32,
    pub pitch_scaling: f32,
    /// Degrees of hand pitch ignored before the head starts pitching
    pub pitch_dead_zone: f32,
    pub arbitration: GrabArbitration,
}

impl Default for GrabConfig {
    fn default() -> Self {
        GrabConfig {
            thrust_scaling: 0.0,
            release_follow_through: 0.0,
            yaw_scaling: 2.0,
            roll_scaling: 2.0,
            pitch_scaling: 2.0,
            pitch_dead_zone: 2.0,
            arbitration: GrabArbitration::LastProcessed,
        }
    }
}

/// Host-side ids for the controls the mapper reads
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    pub thrust_joystick: JoystickId,
    pub view_joystick: JoystickId,
    pub left_palm: PalmId,
    pub right_palm: PalmId,
    pub left_grab_button: ButtonId,
    pub right_grab_button: ButtonId,
}

impl Default for BindingConfig {
    fn default() -> Self {
        BindingConfig {
            thrust_joystick: JoystickId(0),
            view_joystick: JoystickId(1),
            left_palm: PalmId(0),
            right_palm: PalmId(2),
            left_grab_button: ButtonId(4),
            right_grab_button: ButtonId(10),
        }
    }
}

impl BindingConfig {
    pub fn palm(&self, hand: Handedness) -> PalmId {
        match hand {
            Handedness::Left => self.left_palm,
            Handedness::Right => self.right_palm,
        }
    }

    pub fn grab_button(&self, hand: Handedness) -> ButtonId {
        match hand {
            Handedness::Left => self.left_grab_button,
            Handedness::Right => self.right_grab_button,
        }
    }

    pub fn joysticks(&self) -> [JoystickId; 2] {
        [self.thrust_joystick, self.view_joystick]
    }
}

impl FlightConfig {
    /// Load configuration from `config_path`, else from a default location, else defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let default_paths = ["hydra.toml", ".hydra.toml"];
        for path in &default_paths {
            let path = Path::new(path);
            if path.exists() {
                return Self::load_from_file(path);
            }
        }

        config_log!(INFO, "No flight config found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: FlightConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Rejected config file: {}", path.display()))?;

        config_log!(INFO, "Loaded flight config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), FlightError> {
        let values = [
            ("thrust.magnitude", self.thrust.magnitude),
            ("thrust.initial_multiplier", self.thrust.initial_multiplier),
            ("thrust.increase_rate", self.thrust.increase_rate),
            ("thrust.max_multiplier", self.thrust.max_multiplier),
            ("view.yaw_magnitude", self.view.yaw_magnitude),
            ("view.pitch_magnitude", self.view.pitch_magnitude),
            ("grab.thrust_scaling", self.grab.thrust_scaling),
            ("grab.release_follow_through", self.grab.release_follow_through),
            ("grab.yaw_scaling", self.grab.yaw_scaling),
            ("grab.roll_scaling", self.grab.roll_scaling),
            ("grab.pitch_scaling", self.grab.pitch_scaling),
            ("grab.pitch_dead_zone", self.grab.pitch_dead_zone),
        ];
        if let Some((item, _)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FlightError::validation(*item, "must be a finite number"));
        }

        if self.thrust.initial_multiplier <= 0.0 {
            return Err(FlightError::validation(
                "thrust.initial_multiplier",
                "must be greater than zero",
            ));
        }
        if self.thrust.max_multiplier < self.thrust.initial_multiplier {
            return Err(FlightError::validation(
                "thrust.max_multiplier",
                "must not be below thrust.initial_multiplier",
            ));
        }
        if self.thrust.increase_rate < 0.0 {
            return Err(FlightError::validation(
                "thrust.increase_rate",
                "must not be negative",
            ));
        }
        if self.grab.pitch_dead_zone < 0.0 {
            return Err(FlightError::validation(
                "grab.pitch_dead_zone",
                "must not be negative",
            ));
        }

        Ok(())
    }
}
