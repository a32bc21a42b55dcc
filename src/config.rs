//! Game configuration and fixed rules.

use crate::error::GameError;
use crate::hint::Variant;
use std::time::Duration;

// Game rules
pub const STARTING_LIVES: u8 = 3;
pub const INITIAL_SECONDS: u32 = 10; // Shown before the first round starts
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub variant: Variant,
    pub min_seconds: u32,
    pub max_seconds: u32,
    pub tick: Duration,
}

impl GameConfig {
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        let bounds = variant.round_seconds();
        Self {
            variant,
            min_seconds: *bounds.start(),
            max_seconds: *bounds.end(),
            tick: TICK_PERIOD,
        }
    }

    /// Override the round countdown bounds; either side may be left at the
    /// variant's default.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the lower bound is zero or above the upper bound.
    pub fn with_bounds(mut self, min: Option<u32>, max: Option<u32>) -> Result<Self, GameError> {
        if let Some(min) = min {
            self.min_seconds = min;
        }
        if let Some(max) = max {
            self.max_seconds = max;
        }
        if self.min_seconds == 0 {
            return Err(GameError::InvalidConfig(
                "round countdown must be at least 1 second".to_string(),
            ));
        }
        if self.min_seconds > self.max_seconds {
            return Err(GameError::InvalidConfig(format!(
                "minimum countdown ({}s) exceeds maximum ({}s)",
                self.min_seconds, self.max_seconds
            )));
        }
        Ok(self)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_variant() {
        let config = GameConfig::new(Variant::Classic);
        assert_eq!((config.min_seconds, config.max_seconds), (10, 20));
        let config = GameConfig::default();
        assert_eq!(config.variant, Variant::Mixed);
        assert_eq!((config.min_seconds, config.max_seconds), (7, 15));
        assert_eq!(config.tick, Duration::from_secs(1));
    }

    #[test]
    fn test_with_bounds_overrides_one_side() {
        let config = GameConfig::new(Variant::Mixed)
            .with_bounds(None, Some(30))
            .unwrap();
        assert_eq!((config.min_seconds, config.max_seconds), (7, 30));
    }

    #[test]
    fn test_with_bounds_rejects_zero_minimum() {
        let result = GameConfig::default().with_bounds(Some(0), None);
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_with_bounds_rejects_inverted_range() {
        let result = GameConfig::default().with_bounds(Some(20), Some(5));
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
        // Only lowering the maximum below the default minimum is also caught
        let result = GameConfig::default().with_bounds(None, Some(3));
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }
}
