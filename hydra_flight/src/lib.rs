//! Hand-controller flight for avatars.
//!
//! Each frame the [`GestureMapper`] reads two joysticks and both tracked hands
//! from a [`ControllerHost`] and steers an [`AvatarHost`]: the thrust joystick
//! flies along the head's forward/right axes with a growing thrust ramp, the
//! view joystick turns the body and tilts the head, and holding a hand's grab
//! button lets the hand's twist steer yaw and head pitch.

pub mod error;
pub mod flight_config;
pub mod grab;
pub mod host;
pub mod input_context;
pub mod mapper;
pub mod sim;
pub mod thrust_ramp;

pub use error::FlightError;
pub use flight_config::{FlightConfig, GrabArbitration};
pub use host::{AvatarHost, ControllerHost};
pub use input_context::{ButtonId, ControllerSample, Handedness, JoystickId, PalmId};
pub use mapper::GestureMapper;
