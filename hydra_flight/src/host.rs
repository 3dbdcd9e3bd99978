//! Capabilities the mapper consumes from the hosting client.
//!
//! Every call is total: an untracked controller answers with a zeroed or
//! identity value, and mutators either apply or silently do nothing.

use cgmath::{Quaternion, Vector2, Vector3};

use crate::input_context::{ButtonId, ControllerSample, JoystickId, PalmId};

pub trait ControllerHost {
    /// Deflection in [-1, 1] on both axes
    fn joystick_position(&self, joystick: JoystickId) -> Vector2<f32>;

    fn spatial_control_position(&self, palm: PalmId) -> Vector3<f32>;

    fn spatial_control_raw_rotation(&self, palm: PalmId) -> Quaternion<f32>;

    fn spatial_control_velocity(&self, palm: PalmId) -> Vector3<f32>;

    fn is_button_pressed(&self, button: ButtonId) -> bool;

    /// Stop the host's default handling of this joystick and route it to us
    fn capture_joystick(&mut self, joystick: JoystickId);

    fn release_joystick(&mut self, joystick: JoystickId);

    /// Read one hand's full sample for this tick
    fn sample_hand(&self, palm: PalmId, grab_button: ButtonId) -> ControllerSample {
        ControllerSample {
            position: self.spatial_control_position(palm),
            rotation: self.spatial_control_raw_rotation(palm),
            velocity: self.spatial_control_velocity(palm),
            grab_pressed: self.is_button_pressed(grab_button),
        }
    }
}

pub trait AvatarHost {
    fn orientation(&self) -> Quaternion<f32>;

    fn head_orientation(&self) -> Quaternion<f32>;

    /// Head pitch in degrees
    fn head_pitch(&self) -> f32;

    /// Uniform avatar scale
    fn scale(&self) -> f32;

    /// Add a world-space thrust impulse
    fn add_thrust(&mut self, thrust: Vector3<f32>);

    fn set_orientation(&mut self, orientation: Quaternion<f32>);

    fn set_head_pitch(&mut self, pitch: f32);
}
