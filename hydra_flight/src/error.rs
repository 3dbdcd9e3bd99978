use std::fmt;

/// Errors raised while preparing a flight session. Ticking never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum FlightError {
    /// A configuration value is out of range
    Validation { item: String, reason: String },

    /// A recorded input frame could not be turned into controller samples
    Track { frame: usize, reason: String },
}

impl FlightError {
    pub fn validation(item: impl Into<String>, reason: impl Into<String>) -> Self {
        FlightError::Validation {
            item: item.into(),
            reason: reason.into(),
        }
    }

    pub fn track(frame: usize, reason: impl Into<String>) -> Self {
        FlightError::Track {
            frame,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightError::Validation { item, reason } => {
                write!(f, "Invalid value for '{}': {}", item, reason)
            }
            FlightError::Track { frame, reason } => {
                write!(f, "Bad input frame {}: {}", frame, reason)
            }
        }
    }
}

impl std::error::Error for FlightError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = FlightError::validation("thrust.max_multiplier", "must be >= 1.0");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'thrust.max_multiplier': must be >= 1.0"
        );

        let err = FlightError::track(3, "rotation has zero length");
        assert_eq!(err.to_string(), "Bad input frame 3: rotation has zero length");
    }

    #[test]
    fn test_converts_into_anyhow() {
        let err: anyhow::Error = FlightError::validation("view.yaw_magnitude", "not finite").into();
        assert!(err.downcast_ref::<FlightError>().is_some());
    }
}
