use crate::flight_config::ThrustConfig;

/// Acceleration multiplier for the thrust joystick.
///
/// Grows geometrically while the joystick stays deflected and snaps back to the
/// initial value as soon as it returns to neutral. There is no decay curve.
#[derive(Clone, Debug, PartialEq)]
pub struct ThrustRamp {
    multiplier: f32,
    initial: f32,
    max: f32,
    rate: f32,
}

impl ThrustRamp {
    pub fn new(config: &ThrustConfig) -> Self {
        ThrustRamp {
            multiplier: config.initial_multiplier,
            initial: config.initial_multiplier,
            max: config.max_multiplier,
            rate: config.increase_rate,
        }
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    #[cfg(test)]
    fn is_saturated(&self) -> bool {
        self.multiplier >= self.max
    }

    /// Grow by `1 + rate * delta_time`, clamped to the maximum.
    /// Never shrinks, even when the maximum sits below the current value.
    /// Non-positive time steps leave the multiplier unchanged.
    pub fn advance(&mut self, delta_time: f32) {
        if delta_time <= 0.0 {
            return;
        }
        let grown = (self.multiplier * (1.0 + self.rate * delta_time)).min(self.max);
        self.multiplier = self.multiplier.max(grown);
    }

    pub fn reset(&mut self) {
        self.multiplier = self.initial;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> ThrustRamp {
        ThrustRamp::new(&ThrustConfig::default())
    }

    #[test]
    fn test_starts_at_initial_multiplier() {
        assert_eq!(ramp().multiplier(), 1.0);
    }

    #[test]
    fn test_grows_geometrically() {
        let mut ramp = ramp();
        let mut expected = 1.0f32;
        for _ in 0..10 {
            ramp.advance(0.1);
            expected *= 1.0 + 1.05 * 0.1;
            assert!((ramp.multiplier() - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_never_decreases_and_clamps_at_max() {
        let mut ramp = ramp();
        let mut previous = ramp.multiplier();
        for _ in 0..2000 {
            ramp.advance(0.05);
            assert!(ramp.multiplier() >= previous);
            assert!(ramp.multiplier() <= 75.0);
            previous = ramp.multiplier();
        }
        assert_eq!(ramp.multiplier(), 75.0);
        assert!(ramp.is_saturated());
    }

    #[test]
    fn test_reset_is_immediate() {
        let mut ramp = ramp();
        for _ in 0..50 {
            ramp.advance(0.1);
        }
        assert!(ramp.multiplier() > 1.0);
        ramp.reset();
        assert_eq!(ramp.multiplier(), 1.0);
    }

    #[test]
    fn test_max_below_initial_holds_the_multiplier() {
        let config = ThrustConfig {
            max_multiplier: 0.5,
            increase_rate: -2.0,
            ..ThrustConfig::default()
        };
        let mut ramp = ThrustRamp::new(&config);
        for _ in 0..5 {
            ramp.advance(0.1);
            assert_eq!(ramp.multiplier(), 1.0);
        }
    }

    #[test]
    fn test_non_positive_step_is_ignored() {
        let mut ramp = ramp();
        ramp.advance(0.5);
        let before = ramp.multiplier();
        ramp.advance(0.0);
        ramp.advance(-1.0);
        assert_eq!(ramp.multiplier(), before);
    }
}
