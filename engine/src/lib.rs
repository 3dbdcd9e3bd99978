#[macro_use]
pub mod macros;

pub mod logging;
pub mod util;
