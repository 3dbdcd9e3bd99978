// Grab gesture tracking
//
// Holding a hand's grab button captures the hand's pose; while held, the
// start-relative pose change steers the avatar.

pub mod grab_state;
pub mod grab_system;

pub use grab_state::{GrabDelta, GrabEdge, GrabPhase, GrabState};
pub use grab_system::{
    GrabFrame, GrabMotion, GrabSystem, apply_dead_zone, grab_motion, release_impulse,
};
