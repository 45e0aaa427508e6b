// Actor stats

use serde::Deserialize;

/// Movement stats of an actor
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActorStats {
    /// Movement speed (pixels/second)
    pub speed: f32,
}

/// Stats used when a definition leaves them out
pub const BASE_STATS: ActorStats = ActorStats { speed: 120.0 };

impl Default for ActorStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl ActorStats {
    pub fn with_speed(speed: f32) -> Self {
        Self { speed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = ActorStats::default();
        assert_eq!(stats.speed, 120.0);
    }

    #[test]
    fn test_missing_fields_fall_back_to_base() {
        let stats: ActorStats = ron::from_str("()").unwrap();
        assert_eq!(stats, BASE_STATS);

        let stats: ActorStats = ron::from_str("(speed: 40.0)").unwrap();
        assert_eq!(stats.speed, 40.0);
    }
}
