use std::path::Path;

use anyhow::{Context, Result};
use cgmath::{InnerSpace, Quaternion, vec2, vec3};
use hydra_flight::{
    ControllerSample, FlightError, Handedness, flight_config::BindingConfig, sim::SimController,
};
use serde::{Deserialize, Serialize};

/// Recorded controller input, one entry per frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputTrack {
    pub frames: Vec<InputFrame>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputFrame {
    /// Seconds since the previous frame
    pub dt: f32,
    #[serde(default)]
    pub thrust: [f32; 2],
    #[serde(default)]
    pub view: [f32; 2],
    #[serde(default)]
    pub left: HandFrame,
    #[serde(default)]
    pub right: HandFrame,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HandFrame {
    pub position: [f32; 3],
    pub rotation: [f32; 4], // quaternion, w first
    pub velocity: [f32; 3],
    pub grab: bool,
}

impl Default for HandFrame {
    fn default() -> Self {
        HandFrame {
            position: [0.0, 0.0, 0.0],
            rotation: [1.0, 0.0, 0.0, 0.0],
            velocity: [0.0, 0.0, 0.0],
            grab: false,
        }
    }
}

impl HandFrame {
    fn to_sample(&self) -> ControllerSample {
        let [w, x, y, z] = self.rotation;
        let [px, py, pz] = self.position;
        let [vx, vy, vz] = self.velocity;
        ControllerSample {
            position: vec3(px, py, pz),
            rotation: Quaternion::new(w, x, y, z).normalize(),
            velocity: vec3(vx, vy, vz),
            grab_pressed: self.grab,
        }
    }
}

impl InputTrack {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input track: {}", path.display()))?;

        let track: InputTrack = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse input track: {}", path.display()))?;

        track
            .validate()
            .with_context(|| format!("Rejected input track: {}", path.display()))?;

        Ok(track)
    }

    pub fn validate(&self) -> Result<(), FlightError> {
        for (index, frame) in self.frames.iter().enumerate() {
            if !frame.dt.is_finite() {
                return Err(FlightError::track(index, "dt must be a finite number"));
            }
            for (name, hand) in [("left", &frame.left), ("right", &frame.right)] {
                let non_finite = hand
                    .position
                    .iter()
                    .chain(hand.rotation.iter())
                    .chain(hand.velocity.iter())
                    .any(|v| !v.is_finite());
                if non_finite {
                    return Err(FlightError::track(
                        index,
                        format!("{} hand has a non-finite value", name),
                    ));
                }
                if hand.rotation.iter().all(|v| *v == 0.0) {
                    return Err(FlightError::track(
                        index,
                        format!("{} hand rotation has zero length", name),
                    ));
                }
            }
            if frame.thrust.iter().chain(frame.view.iter()).any(|v| !v.is_finite()) {
                return Err(FlightError::track(index, "joystick value is not finite"));
            }
        }
        Ok(())
    }
}

impl InputFrame {
    /// Push this frame's input into the simulated controller
    pub fn apply(&self, controller: &mut SimController, bindings: &BindingConfig) {
        controller.set_joystick(bindings.thrust_joystick, clamp_deflection(self.thrust));
        controller.set_joystick(bindings.view_joystick, clamp_deflection(self.view));

        for (hand, frame) in [(Handedness::Left, &self.left), (Handedness::Right, &self.right)] {
            controller.set_hand(
                bindings.palm(hand),
                bindings.grab_button(hand),
                frame.to_sample(),
            );
        }
    }
}

fn clamp_deflection([x, y]: [f32; 2]) -> cgmath::Vector2<f32> {
    vec2(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydra_flight::{ControllerHost, FlightConfig};

    #[test]
    fn test_minimal_frame_uses_defaults() {
        let track: InputTrack =
            serde_json::from_str(r#"{ "frames": [ { "dt": 0.1, "thrust": [0.0, 1.0] } ] }"#)
                .unwrap();
        assert!(track.validate().is_ok());

        let frame = &track.frames[0];
        assert_eq!(frame.view, [0.0, 0.0]);
        assert!(!frame.right.grab);
        assert_eq!(frame.left.rotation, [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_apply_sets_controller() {
        let bindings = FlightConfig::default().bindings;
        let frame: InputFrame = serde_json::from_str(
            r#"{
                "dt": 0.1,
                "thrust": [2.0, -0.5],
                "right": {
                    "position": [0.0, 1.0, 0.0],
                    "rotation": [2.0, 0.0, 0.0, 0.0],
                    "grab": true
                }
            }"#,
        )
        .unwrap();

        let mut controller = SimController::new();
        frame.apply(&mut controller, &bindings);

        assert_eq!(
            controller.joystick_position(bindings.thrust_joystick),
            vec2(1.0, -0.5)
        );
        let right = controller.sample_hand(bindings.right_palm, bindings.right_grab_button);
        assert!(right.grab_pressed);
        assert_eq!(right.position, vec3(0.0, 1.0, 0.0));
        assert_eq!(right.rotation, Quaternion::new(1.0, 0.0, 0.0, 0.0));
        assert!(!controller.is_button_pressed(bindings.left_grab_button));
    }

    #[test]
    fn test_validate_rejects_zero_rotation() {
        let track: InputTrack = serde_json::from_str(
            r#"{ "frames": [
                { "dt": 0.1 },
                { "dt": 0.1, "left": { "rotation": [0.0, 0.0, 0.0, 0.0] } }
            ] }"#,
        )
        .unwrap();
        assert_eq!(
            track.validate().unwrap_err(),
            FlightError::track(1, "left hand rotation has zero length")
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("track.json");
        std::fs::write(&path, r#"{ "frames": [ { "dt": 0.016 }, { "dt": 0.016 } ] }"#).unwrap();

        let track = InputTrack::load(&path).unwrap();
        assert_eq!(track.frames.len(), 2);

        let missing = dir.path().join("missing.json");
        assert!(InputTrack::load(&missing).is_err());
    }
}
