use cgmath::{Quaternion, Rotation, Vector3, vec3};

use crate::input_context::ControllerSample;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrabPhase {
    Idle,
    Grabbing,
}

/// What happened to the grab button this tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrabEdge {
    None,
    Pressed,
    Released,
}

/// Pose change of the grabbing hand since the press edge
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrabDelta {
    /// `current - start`, in the controller's tracking space
    pub position: Vector3<f32>,
    /// `current * inverse(start)`
    pub rotation: Quaternion<f32>,
}

/// Per-hand grab tracking
#[derive(Clone, Debug, PartialEq)]
pub struct GrabState {
    pub is_grabbing: bool,
    pub was_grabbing: bool,
    pub start_position: Vector3<f32>,
    pub start_rotation: Quaternion<f32>,
    pub current_position: Vector3<f32>,
    pub current_rotation: Quaternion<f32>,
    /// Hand velocity sampled on the release edge
    pub last_velocity: Vector3<f32>,
}

impl Default for GrabState {
    fn default() -> Self {
        GrabState {
            is_grabbing: false,
            was_grabbing: false,
            start_position: vec3(0.0, 0.0, 0.0),
            start_rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            current_position: vec3(0.0, 0.0, 0.0),
            current_rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            last_velocity: vec3(0.0, 0.0, 0.0),
        }
    }
}

impl GrabState {
    pub fn phase(&self) -> GrabPhase {
        if self.is_grabbing {
            GrabPhase::Grabbing
        } else {
            GrabPhase::Idle
        }
    }

    /// Fold in this tick's sample and report the button edge
    pub fn update(&mut self, sample: &ControllerSample) -> GrabEdge {
        self.was_grabbing = self.is_grabbing;
        self.is_grabbing = sample.grab_pressed;

        let edge = match (self.was_grabbing, self.is_grabbing) {
            (false, true) => GrabEdge::Pressed,
            (true, false) => GrabEdge::Released,
            _ => GrabEdge::None,
        };

        if edge == GrabEdge::Pressed {
            self.start_position = sample.position;
            self.start_rotation = sample.rotation;
        }

        if self.is_grabbing {
            self.current_position = sample.position;
            self.current_rotation = sample.rotation;
        }

        if edge == GrabEdge::Released {
            self.last_velocity = sample.velocity;
        }

        edge
    }

    /// Start-relative pose change; `None` while idle
    pub fn delta(&self) -> Option<GrabDelta> {
        if !self.is_grabbing {
            return None;
        }
        // An unchanged hand must read as exactly no rotation
        let rotation = if self.current_rotation == self.start_rotation {
            Quaternion::new(1.0, 0.0, 0.0, 0.0)
        } else {
            self.current_rotation * self.start_rotation.invert()
        };
        Some(GrabDelta {
            position: self.current_position - self.start_position,
            rotation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Rotation3};

    fn sample(
        position: Vector3<f32>,
        rotation: Quaternion<f32>,
        pressed: bool,
    ) -> ControllerSample {
        ControllerSample {
            position,
            rotation,
            velocity: vec3(0.0, 0.0, 0.0),
            grab_pressed: pressed,
        }
    }

    #[test]
    fn test_press_hold_release_cycle() {
        let mut state = GrabState::default();
        let start = vec3(0.1, 1.0, -0.3);
        let rotation = Quaternion::from_angle_y(Deg(20.0));

        assert_eq!(state.phase(), GrabPhase::Idle);
        assert_eq!(state.update(&sample(start, rotation, true)), GrabEdge::Pressed);
        assert_eq!(state.phase(), GrabPhase::Grabbing);
        assert_eq!(state.start_position, start);
        assert_eq!(state.start_rotation, rotation);

        let moved = start + vec3(0.0, 0.0, 1.0);
        assert_eq!(state.update(&sample(moved, rotation, true)), GrabEdge::None);
        // start pose is only captured on the press edge
        assert_eq!(state.start_position, start);

        let mut release = sample(moved, rotation, false);
        release.velocity = vec3(0.0, 0.5, 0.0);
        assert_eq!(state.update(&release), GrabEdge::Released);
        assert_eq!(state.phase(), GrabPhase::Idle);
        assert_eq!(state.last_velocity, vec3(0.0, 0.5, 0.0));
        assert_eq!(state.delta(), None);
    }

    #[test]
    fn test_delta_while_held() {
        let mut state = GrabState::default();
        let start = vec3(0.0, 1.0, 0.0);
        let identity = Quaternion::new(1.0, 0.0, 0.0, 0.0);
        state.update(&sample(start, identity, true));
        state.update(&sample(start + vec3(0.0, 0.0, 1.0), identity, true));

        let delta = state.delta().unwrap();
        assert_eq!(delta.position, vec3(0.0, 0.0, 1.0));
        assert_eq!(delta.rotation, identity);
    }

    #[test]
    fn test_rotation_delta_is_relative_to_start() {
        let mut state = GrabState::default();
        let origin = vec3(0.0, 0.0, 0.0);
        state.update(&sample(origin, Quaternion::from_angle_y(Deg(30.0)), true));
        state.update(&sample(origin, Quaternion::from_angle_y(Deg(45.0)), true));

        let delta = state.delta().unwrap().rotation;
        let expected = Quaternion::from_angle_y(Deg(15.0));
        assert!((delta.s - expected.s).abs() < 1e-5);
        assert!((delta.v.y - expected.v.y).abs() < 1e-5);
    }

    #[test]
    fn test_unchanged_rotation_is_exact_identity() {
        let mut state = GrabState::default();
        let rotation = Quaternion::from_angle_y(Deg(10.0));
        state.update(&sample(vec3(0.0, 0.0, 0.0), rotation, true));
        assert_eq!(
            state.delta().unwrap().rotation,
            Quaternion::new(1.0, 0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_idle_ticks_report_no_edge() {
        let mut state = GrabState::default();
        let idle = ControllerSample::default();
        assert_eq!(state.update(&idle), GrabEdge::None);
        assert_eq!(state.update(&idle), GrabEdge::None);
        assert!(!state.was_grabbing);
    }
}
