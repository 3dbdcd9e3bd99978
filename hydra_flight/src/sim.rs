//! In-memory host: scripted controllers and a recording avatar.
//! Drives the replay runtime and the mapper tests.

use std::collections::{HashMap, HashSet};

use cgmath::{Quaternion, Vector2, Vector3, Zero};
use engine::util;

use crate::{
    host::{AvatarHost, ControllerHost},
    input_context::{ButtonId, ControllerSample, JoystickId, PalmId, neutral},
};

#[derive(Default)]
pub struct SimController {
    joysticks: HashMap<JoystickId, Vector2<f32>>,
    palms: HashMap<PalmId, ControllerSample>,
    pressed: HashSet<ButtonId>,
    captured: HashSet<JoystickId>,
}

impl SimController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_joystick(&mut self, joystick: JoystickId, deflection: Vector2<f32>) {
        self.joysticks.insert(joystick, deflection);
    }

    /// Pose and button state for one hand; the sample's `grab_pressed` drives `button`
    pub fn set_hand(&mut self, palm: PalmId, button: ButtonId, sample: ControllerSample) {
        self.palms.insert(palm, sample);
        if sample.grab_pressed {
            self.pressed.insert(button);
        } else {
            self.pressed.remove(&button);
        }
    }

    pub fn is_captured(&self, joystick: JoystickId) -> bool {
        self.captured.contains(&joystick)
    }

    pub fn captured_count(&self) -> usize {
        self.captured.len()
    }

    fn palm(&self, palm: PalmId) -> ControllerSample {
        self.palms.get(&palm).copied().unwrap_or_default()
    }
}

impl ControllerHost for SimController {
    fn joystick_position(&self, joystick: JoystickId) -> Vector2<f32> {
        self.joysticks
            .get(&joystick)
            .copied()
            .unwrap_or_else(neutral)
    }

    fn spatial_control_position(&self, palm: PalmId) -> Vector3<f32> {
        self.palm(palm).position
    }

    fn spatial_control_raw_rotation(&self, palm: PalmId) -> Quaternion<f32> {
        self.palm(palm).rotation
    }

    fn spatial_control_velocity(&self, palm: PalmId) -> Vector3<f32> {
        self.palm(palm).velocity
    }

    fn is_button_pressed(&self, button: ButtonId) -> bool {
        self.pressed.contains(&button)
    }

    fn capture_joystick(&mut self, joystick: JoystickId) {
        self.captured.insert(joystick);
    }

    fn release_joystick(&mut self, joystick: JoystickId) {
        self.captured.remove(&joystick);
    }
}

/// A mutator call received by `SimAvatar`
#[derive(Clone, Debug, PartialEq)]
pub enum AvatarCommand {
    AddThrust(Vector3<f32>),
    SetOrientation(Quaternion<f32>),
    SetHeadPitch(f32),
}

/// Avatar that records every command and drifts with the thrust it receives
pub struct SimAvatar {
    pub position: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub orientation: Quaternion<f32>,
    pub head_pitch: f32,
    pub scale: f32,
    /// Fraction of velocity kept after each step
    pub damping: f32,
    pending_thrust: Vector3<f32>,
    commands: Vec<AvatarCommand>,
}

impl Default for SimAvatar {
    fn default() -> Self {
        SimAvatar {
            position: Vector3::zero(),
            velocity: Vector3::zero(),
            orientation: util::identity(),
            head_pitch: 0.0,
            scale: 1.0,
            damping: 0.9,
            pending_thrust: Vector3::zero(),
            commands: Vec::new(),
        }
    }
}

impl SimAvatar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[AvatarCommand] {
        &self.commands
    }

    /// Commands recorded since the last call
    pub fn drain_commands(&mut self) -> Vec<AvatarCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Sum of all thrust recorded so far
    pub fn total_thrust(&self) -> Vector3<f32> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                AvatarCommand::AddThrust(t) => Some(*t),
                _ => None,
            })
            .fold(Vector3::zero(), |acc, t| acc + t)
    }

    /// Fold pending thrust into velocity and move
    pub fn step(&mut self, delta_time: f32) {
        self.velocity += self.pending_thrust;
        self.pending_thrust = Vector3::zero();
        self.position += self.velocity * delta_time.max(0.0);
        self.velocity *= self.damping;
    }
}

impl AvatarHost for SimAvatar {
    fn orientation(&self) -> Quaternion<f32> {
        self.orientation
    }

    fn head_orientation(&self) -> Quaternion<f32> {
        self.orientation * util::from_pitch_yaw_roll_degrees(self.head_pitch, 0.0, 0.0)
    }

    fn head_pitch(&self) -> f32 {
        self.head_pitch
    }

    fn scale(&self) -> f32 {
        self.scale
    }

    fn add_thrust(&mut self, thrust: Vector3<f32>) {
        self.pending_thrust += thrust;
        self.commands.push(AvatarCommand::AddThrust(thrust));
    }

    fn set_orientation(&mut self, orientation: Quaternion<f32>) {
        self.orientation = orientation;
        self.commands.push(AvatarCommand::SetOrientation(orientation));
    }

    fn set_head_pitch(&mut self, pitch: f32) {
        self.head_pitch = pitch;
        self.commands.push(AvatarCommand::SetHeadPitch(pitch));
    }
}
