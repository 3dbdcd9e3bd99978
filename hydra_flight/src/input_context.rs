use cgmath::{Quaternion, Vector2, Vector3, vec2, vec3};
use serde::{Deserialize, Serialize};

/// Logical joystick id as understood by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoystickId(pub u32);

/// Logical spatial-control (palm) id
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PalmId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Order in which hands are processed each tick
    pub const PROCESSING_ORDER: [Handedness; 2] = [Handedness::Right, Handedness::Left];
}

/// Everything sampled from one hand controller in a single tick.
/// An untracked hand reads as `ControllerSample::default()`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerSample {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub velocity: Vector3<f32>,
    pub grab_pressed: bool,
}

impl Default for ControllerSample {
    fn default() -> Self {
        ControllerSample {
            position: vec3(0.0, 0.0, 0.0),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            velocity: vec3(0.0, 0.0, 0.0),
            grab_pressed: false,
        }
    }
}

/// Whether a joystick is away from center on either axis
pub fn is_deflected(deflection: Vector2<f32>) -> bool {
    deflection.x != 0.0 || deflection.y != 0.0
}

pub fn neutral() -> Vector2<f32> {
    vec2(0.0, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sample_is_untracked_hand() {
        let sample = ControllerSample::default();
        assert_eq!(sample.position, vec3(0.0, 0.0, 0.0));
        assert_eq!(sample.rotation, Quaternion::new(1.0, 0.0, 0.0, 0.0));
        assert!(!sample.grab_pressed);
    }

    #[test]
    fn test_deflection() {
        assert!(!is_deflected(neutral()));
        assert!(is_deflected(vec2(0.0, -0.01)));
        assert!(is_deflected(vec2(1.0, 0.0)));
    }
}
