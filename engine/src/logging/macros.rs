/// Log through tracing only when the scope's configured level allows it
#[macro_export]
macro_rules! scoped_log {
    ($level:ident, $scope:expr, $($arg:tt)*) => {
        let log_config = $crate::logging::get_log_config();
        if log_config.should_log($scope, $crate::logging::Level::$level) {
            tracing::event!($crate::logging::Level::$level, scope = $scope, $($arg)*);
        }
    };
}

// Controller edges, joystick deflection, thrust ramp
#[macro_export]
macro_rules! input_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "input", $($arg)*);
    };
}

// Commands sent to the avatar
#[macro_export]
macro_rules! motion_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "motion", $($arg)*);
    };
}

#[macro_export]
macro_rules! config_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "config", $($arg)*);
    };
}
