use cgmath::{Quaternion, Rotation, Vector3, Zero};
use engine::{input_log, util};

use crate::{
    flight_config::{GrabArbitration, GrabConfig},
    grab::grab_state::{GrabDelta, GrabEdge, GrabPhase, GrabState},
    input_context::{ControllerSample, Handedness},
};

/// Result of folding one tick of hand samples into the grab system
#[derive(Clone, Debug, PartialEq)]
pub struct GrabFrame {
    /// Delta of the hand that won arbitration, when any hand is grabbing
    pub active: Option<(Handedness, GrabDelta)>,
    /// Hands that let go this tick, with their release velocity
    pub released: Vec<(Handedness, Vector3<f32>)>,
}

/// Avatar-space motion derived from a grab delta for one tick
#[derive(Clone, Debug, PartialEq)]
pub struct GrabMotion {
    /// Front, right and up thrust components, world space
    pub thrust: [Vector3<f32>; 3],
    /// Degrees to turn about world up
    pub yaw: f32,
    /// Degrees to add to head pitch
    pub pitch: f32,
}

/// Grab tracking for both hands, sharing a single active delta
pub struct GrabSystem {
    arbitration: GrabArbitration,
    left_hand_state: GrabState,
    right_hand_state: GrabState,
}

impl GrabSystem {
    pub fn new(arbitration: GrabArbitration) -> Self {
        GrabSystem {
            arbitration,
            left_hand_state: GrabState::default(),
            right_hand_state: GrabState::default(),
        }
    }

    pub fn hand_state(&self, hand: Handedness) -> &GrabState {
        match hand {
            Handedness::Left => &self.left_hand_state,
            Handedness::Right => &self.right_hand_state,
        }
    }

    pub fn phase(&self, hand: Handedness) -> GrabPhase {
        self.hand_state(hand).phase()
    }

    fn hand_state_mut(&mut self, hand: Handedness) -> &mut GrabState {
        match hand {
            Handedness::Left => &mut self.left_hand_state,
            Handedness::Right => &mut self.right_hand_state,
        }
    }

    /// Process both hands (right first) and pick the delta that drives motion
    pub fn update(&mut self, left: &ControllerSample, right: &ControllerSample) -> GrabFrame {
        let mut active = None;
        let mut released = Vec::new();

        for hand in Handedness::PROCESSING_ORDER {
            let sample = match hand {
                Handedness::Left => left,
                Handedness::Right => right,
            };
            let state = self.hand_state_mut(hand);

            match state.update(sample) {
                GrabEdge::Pressed => {
                    input_log!(
                        DEBUG,
                        "{:?} grab start position {:.3?}",
                        hand,
                        state.start_position
                    );
                }
                GrabEdge::Released => {
                    input_log!(
                        DEBUG,
                        "{:?} grab released, velocity {:.3?}",
                        hand,
                        state.last_velocity
                    );
                    released.push((hand, state.last_velocity));
                }
                GrabEdge::None => {}
            }

            if let Some(delta) = state.delta() {
                active = match (self.arbitration, active) {
                    (GrabArbitration::LastProcessed, _) | (_, None) => Some((hand, delta)),
                    (GrabArbitration::PreferRight, Some((Handedness::Right, _))) => active,
                    (GrabArbitration::PreferLeft, Some((Handedness::Left, _))) => active,
                    (_, Some(_)) => Some((hand, delta)),
                };
            }
        }

        GrabFrame { active, released }
    }
}

/// Translate a grab delta into thrust, yaw and pitch for this tick.
///
/// Hand travel is mirrored and rotated by the avatar orientation; its z, x and
/// y components then scale the head's front, right and up axes. Rotation is
/// decomposed into Euler angles: hand yaw and roll both turn the body, hand
/// pitch beyond the dead zone tilts the head.
pub fn grab_motion(
    delta: &GrabDelta,
    config: &GrabConfig,
    avatar_orientation: Quaternion<f32>,
    head_orientation: Quaternion<f32>,
    scale: f32,
    delta_time: f32,
) -> GrabMotion {
    let travel = avatar_orientation.rotate_vector(-delta.position);
    let gain = scale * config.thrust_scaling * delta_time;

    let thrust = [
        util::front(head_orientation) * (travel.z * gain),
        util::right(head_orientation) * (travel.x * gain),
        util::up(head_orientation) * (travel.y * gain),
    ];

    let euler = util::safe_euler_angles(delta.rotation);
    let yaw = (euler.y * config.yaw_scaling + euler.z * config.roll_scaling) * delta_time;
    let pitch =
        apply_dead_zone(euler.x, config.pitch_dead_zone) * config.pitch_scaling * delta_time;

    GrabMotion { thrust, yaw, pitch }
}

/// Shrink `value` toward zero by `dead_zone`; anything within it becomes zero
pub fn apply_dead_zone(value: f32, dead_zone: f32) -> f32 {
    if value.abs() <= dead_zone {
        0.0
    } else if value < 0.0 {
        value + dead_zone
    } else {
        value - dead_zone
    }
}

/// Impulse applied when a grab is released; zero with the default follow-through
pub fn release_impulse(
    velocity: Vector3<f32>,
    config: &GrabConfig,
    avatar_orientation: Quaternion<f32>,
    scale: f32,
) -> Vector3<f32> {
    if config.release_follow_through == 0.0 {
        return Vector3::zero();
    }
    avatar_orientation.rotate_vector(-velocity) * (scale * config.release_follow_through)
}
