use cgmath::{InnerSpace, Vector2, Vector3, vec3};
use engine::{input_log, motion_log, util};

use crate::{
    flight_config::FlightConfig,
    grab::{GrabFrame, GrabPhase, GrabSystem, grab_motion, release_impulse},
    host::{AvatarHost, ControllerHost},
    input_context::{Handedness, is_deflected},
    thrust_ramp::ThrustRamp,
};

/// Turns controller input into avatar thrust, body yaw and head pitch.
///
/// Owns every piece of per-session state (grab tracking, thrust ramp). Create
/// it with [`GestureMapper::start`] when the session begins, call
/// [`GestureMapper::on_tick`] once per frame and hand it back through
/// [`GestureMapper::shutdown`] at the end. Ticks must not overlap; the mapper
/// is driven from a single thread.
pub struct GestureMapper {
    config: FlightConfig,
    thrust_ramp: ThrustRamp,
    grab_system: GrabSystem,
}

impl GestureMapper {
    /// Build the mapper and capture both joysticks from the host
    pub fn start(config: FlightConfig, controller: &mut impl ControllerHost) -> Self {
        for joystick in config.bindings.joysticks() {
            controller.capture_joystick(joystick);
        }
        input_log!(INFO, "Captured joysticks {:?}", config.bindings.joysticks());

        GestureMapper {
            thrust_ramp: ThrustRamp::new(&config.thrust),
            grab_system: GrabSystem::new(config.grab.arbitration),
            config,
        }
    }

    /// Release the joysticks captured in `start`
    pub fn shutdown(self, controller: &mut impl ControllerHost) {
        for joystick in self.config.bindings.joysticks() {
            controller.release_joystick(joystick);
        }
        input_log!(INFO, "Released joysticks {:?}", self.config.bindings.joysticks());
    }

    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    pub fn thrust_multiplier(&self) -> f32 {
        self.thrust_ramp.multiplier()
    }

    pub fn grab_phase(&self, hand: Handedness) -> GrabPhase {
        self.grab_system.phase(hand)
    }

    pub(crate) fn grab_system(&self) -> &GrabSystem {
        &self.grab_system
    }

    /// Advance one frame. A non-positive or non-finite `delta_time` is a no-op.
    pub fn on_tick(
        &mut self,
        delta_time: f32,
        controller: &impl ControllerHost,
        avatar: &mut impl AvatarHost,
    ) {
        if !delta_time.is_finite() || delta_time <= 0.0 {
            input_log!(TRACE, "Skipping tick with delta time {}", delta_time);
            return;
        }

        let bindings = &self.config.bindings;
        let thrust_deflection = controller.joystick_position(bindings.thrust_joystick);
        let view_deflection = controller.joystick_position(bindings.view_joystick);
        let left = controller.sample_hand(
            bindings.palm(Handedness::Left),
            bindings.grab_button(Handedness::Left),
        );
        let right = controller.sample_hand(
            bindings.palm(Handedness::Right),
            bindings.grab_button(Handedness::Right),
        );

        self.apply_thrust_joystick(thrust_deflection, delta_time, avatar);
        self.apply_view_joystick(view_deflection, delta_time, avatar);

        let frame = self.grab_system.update(&left, &right);
        self.apply_grab(&frame, delta_time, avatar);
    }

    fn apply_thrust_joystick(
        &mut self,
        deflection: Vector2<f32>,
        delta_time: f32,
        avatar: &mut impl AvatarHost,
    ) {
        if !is_deflected(deflection) {
            if self.thrust_ramp.multiplier() != self.config.thrust.initial_multiplier {
                input_log!(DEBUG, "Thrust joystick neutral, ramp reset");
            }
            self.thrust_ramp.reset();
            return;
        }

        let head = avatar.head_orientation();
        let gain = avatar.scale()
            * self.config.thrust.magnitude
            * self.thrust_ramp.multiplier()
            * delta_time;

        add_thrust(avatar, util::front(head) * (deflection.y * gain));
        add_thrust(avatar, util::right(head) * (deflection.x * gain));

        self.thrust_ramp.advance(delta_time);
        input_log!(
            TRACE,
            "Thrust deflection {:?}, ramp now {:.3}",
            deflection,
            self.thrust_ramp.multiplier()
        );
    }

    fn apply_view_joystick(
        &self,
        deflection: Vector2<f32>,
        delta_time: f32,
        avatar: &mut impl AvatarHost,
    ) {
        if !is_deflected(deflection) {
            return;
        }

        // Right deflection turns right, which is a negative yaw
        let yaw = -deflection.x * self.config.view.yaw_magnitude * delta_time;
        if yaw != 0.0 {
            let turn = util::from_pitch_yaw_roll_degrees(0.0, yaw, 0.0);
            let orientation = avatar.orientation() * turn;
            motion_log!(TRACE, "View yaw {:.3} deg", yaw);
            avatar.set_orientation(orientation);
        }

        let pitch = deflection.y * self.config.view.pitch_magnitude * delta_time;
        if pitch != 0.0 {
            let head_pitch = avatar.head_pitch() + pitch;
            motion_log!(TRACE, "View pitch {:.3} deg", pitch);
            avatar.set_head_pitch(head_pitch);
        }
    }

    fn apply_grab(&self, frame: &GrabFrame, delta_time: f32, avatar: &mut impl AvatarHost) {
        let grab = &self.config.grab;

        for (hand, velocity) in &frame.released {
            let impulse = release_impulse(*velocity, grab, avatar.orientation(), avatar.scale());
            if impulse.magnitude2() > 0.0 {
                motion_log!(DEBUG, "{:?} release impulse {:.3?}", hand, impulse);
            }
            add_thrust(avatar, impulse);
        }

        let Some((hand, delta)) = frame.active else {
            return;
        };

        let motion = grab_motion(
            &delta,
            grab,
            avatar.orientation(),
            avatar.head_orientation(),
            avatar.scale(),
            delta_time,
        );
        motion_log!(
            TRACE,
            "{:?} grab delta {:.3?}, yaw {:.3}, pitch {:.3}",
            hand,
            delta.position,
            motion.yaw,
            motion.pitch
        );

        for thrust in motion.thrust {
            add_thrust(avatar, thrust);
        }

        if motion.yaw != 0.0 {
            let turn = util::angle_axis_degrees(motion.yaw, vec3(0.0, 1.0, 0.0));
            let orientation = turn * avatar.orientation();
            avatar.set_orientation(orientation);
        }

        if motion.pitch != 0.0 {
            let head_pitch = avatar.head_pitch() + motion.pitch;
            avatar.set_head_pitch(head_pitch);
        }
    }
}

/// Forward a thrust impulse, skipping zero-length ones
fn add_thrust(avatar: &mut impl AvatarHost, thrust: Vector3<f32>) {
    if thrust.magnitude2() > 0.0 {
        avatar.add_thrust(thrust);
    }
}
