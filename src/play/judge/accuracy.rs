use serde::{Deserialize, Serialize};

use crate::play::complexity::{ComplexityConfig, TimingWindows};

/// Accuracy tier of a resolved keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccuracyTier {
    Perfect,
    Good,
    Almost,
    Miss,
    /// Advisory only: a note is on its way but not reachable yet.
    Early,
}

impl AccuracyTier {
    /// Returns true if this tier continues combo.
    pub fn continues_combo(self) -> bool {
        matches!(self, Self::Perfect | Self::Good | Self::Almost)
    }

    /// Multiplier applied to the complexity base score.
    pub fn score_factor(self) -> f64 {
        match self {
            Self::Perfect => 2.5,
            Self::Good => 1.5,
            Self::Almost => 0.75,
            Self::Miss | Self::Early => 0.0,
        }
    }

    /// Health gained before the combo bonus. Misses use the complexity penalty instead.
    fn health_reward(self) -> f64 {
        match self {
            Self::Perfect => 2.0,
            Self::Good => 1.0,
            Self::Almost => 0.5,
            Self::Miss | Self::Early => 0.0,
        }
    }

    /// Overlay colour as RGB.
    pub fn color(self) -> [u8; 3] {
        match self {
            Self::Perfect => [0xff, 0xd7, 0x00],
            Self::Good => [0x32, 0xcd, 0x32],
            Self::Almost => [0x1e, 0x90, 0xff],
            Self::Miss => [0xdc, 0x14, 0x3c],
            Self::Early => [0xa9, 0xa9, 0xa9],
        }
    }
}

/// Feedback text. Splits Perfect and Good into two labels each; the reward
/// only depends on the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackLabel {
    Excellent,
    Perfect,
    Great,
    Good,
    Almost,
    Miss,
    TooEarly,
}

impl FeedbackLabel {
    /// Pick the label for `tier` at absolute distance `distance` from the hit zone.
    pub fn classify(tier: AccuracyTier, distance: f64, windows: &TimingWindows) -> Self {
        match tier {
            AccuracyTier::Perfect if distance <= windows.perfect / 2.0 => Self::Excellent,
            AccuracyTier::Perfect => Self::Perfect,
            AccuracyTier::Good if distance <= (windows.perfect + windows.good) / 2.0 => {
                Self::Great
            }
            AccuracyTier::Good => Self::Good,
            AccuracyTier::Almost => Self::Almost,
            AccuracyTier::Miss => Self::Miss,
            AccuracyTier::Early => Self::TooEarly,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT!",
            Self::Perfect => "PERFECT!",
            Self::Great => "GREAT!",
            Self::Good => "GOOD!",
            Self::Almost => "ALMOST!",
            Self::Miss => "MISS",
            Self::TooEarly => "TOO EARLY",
        }
    }
}

/// Outcome of resolving one keypress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyResult {
    pub tier: AccuracyTier,
    /// Note position minus hit-zone center. Positive = pressed before arrival.
    pub timing_offset: f64,
    pub score_delta: u64,
    pub health_delta: f64,
    pub label: FeedbackLabel,
}

impl AccuracyResult {
    /// Build a result, deriving score/health deltas and the label from the tier.
    pub fn new(tier: AccuracyTier, timing_offset: f64, config: &ComplexityConfig) -> Self {
        let score_delta = (config.base_score() * tier.score_factor()).floor() as u64;
        let health_delta = match tier {
            AccuracyTier::Miss => -config.miss_penalty(),
            other => other.health_reward(),
        };
        Self {
            tier,
            timing_offset,
            score_delta,
            health_delta,
            label: FeedbackLabel::classify(tier, timing_offset.abs(), &config.timing_windows),
        }
    }

    /// Classify `timing_offset` against the three windows, inclusive on the near edge.
    /// Returns None when the distance is beyond the almost window.
    pub fn classify(timing_offset: f64, windows: &TimingWindows) -> Option<AccuracyTier> {
        let distance = timing_offset.abs();
        if distance <= windows.perfect {
            Some(AccuracyTier::Perfect)
        } else if distance <= windows.good {
            Some(AccuracyTier::Good)
        } else if distance <= windows.almost {
            Some(AccuracyTier::Almost)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play::complexity::ComplexityManager;

    #[test]
    fn test_classify_boundaries_inclusive() {
        let windows = ComplexityManager::config(30.0).timing_windows;
        assert_eq!(AccuracyResult::classify(0.0, &windows), Some(AccuracyTier::Perfect));
        assert_eq!(
            AccuracyResult::classify(windows.perfect, &windows),
            Some(AccuracyTier::Perfect)
        );
        assert_eq!(
            AccuracyResult::classify(-windows.good, &windows),
            Some(AccuracyTier::Good)
        );
        assert_eq!(
            AccuracyResult::classify(windows.almost, &windows),
            Some(AccuracyTier::Almost)
        );
        assert_eq!(AccuracyResult::classify(windows.almost + 1e-6, &windows), None);
    }

    #[test]
    fn test_perfect_score_at_complexity_30() {
        let config = ComplexityManager::config(30.0);
        let result = AccuracyResult::new(AccuracyTier::Perfect, 0.05, &config);
        assert_eq!(result.score_delta, 32);
        assert!((result.health_delta - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_miss_carries_penalty() {
        let config = ComplexityManager::config(50.0);
        let result = AccuracyResult::new(AccuracyTier::Miss, 0.0, &config);
        assert_eq!(result.score_delta, 0);
        assert!((result.health_delta + 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_early_is_neutral() {
        let config = ComplexityManager::config(80.0);
        let result = AccuracyResult::new(AccuracyTier::Early, 0.5, &config);
        assert_eq!(result.score_delta, 0);
        assert_eq!(result.health_delta, 0.0);
        assert_eq!(result.label, FeedbackLabel::TooEarly);
    }

    #[test]
    fn test_score_factor_ordering() {
        assert!(AccuracyTier::Perfect.score_factor() > AccuracyTier::Good.score_factor());
        assert!(AccuracyTier::Good.score_factor() > AccuracyTier::Almost.score_factor());
        assert!(AccuracyTier::Almost.score_factor() > AccuracyTier::Miss.score_factor());
    }

    #[test]
    fn test_sub_tier_labels() {
        let windows = ComplexityManager::config(0.0).timing_windows;
        assert_eq!(
            FeedbackLabel::classify(AccuracyTier::Perfect, 0.04, &windows),
            FeedbackLabel::Excellent
        );
        assert_eq!(
            FeedbackLabel::classify(AccuracyTier::Perfect, 0.08, &windows),
            FeedbackLabel::Perfect
        );
        assert_eq!(
            FeedbackLabel::classify(AccuracyTier::Good, 0.12, &windows),
            FeedbackLabel::Great
        );
        assert_eq!(
            FeedbackLabel::classify(AccuracyTier::Good, 0.18, &windows),
            FeedbackLabel::Good
        );
        assert_eq!(FeedbackLabel::Excellent.text(), "EXCELLENT!");
        assert_eq!(FeedbackLabel::TooEarly.text(), "TOO EARLY");
    }

    #[test]
    fn test_sub_tier_does_not_change_reward() {
        let config = ComplexityManager::config(0.0);
        let close = AccuracyResult::new(AccuracyTier::Perfect, 0.01, &config);
        let far = AccuracyResult::new(AccuracyTier::Perfect, 0.09, &config);
        assert_ne!(close.label, far.label);
        assert_eq!(close.score_delta, far.score_delta);
        assert_eq!(close.health_delta, far.health_delta);
    }

    #[test]
    fn test_combo_continuation() {
        assert!(AccuracyTier::Perfect.continues_combo());
        assert!(AccuracyTier::Almost.continues_combo());
        assert!(!AccuracyTier::Miss.continues_combo());
        assert!(!AccuracyTier::Early.continues_combo());
    }
}
