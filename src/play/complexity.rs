use serde::{Deserialize, Serialize};

/// Lowest accepted complexity.
pub const MIN_COMPLEXITY: f64 = 0.0;
/// Highest accepted complexity.
pub const MAX_COMPLEXITY: f64 = 100.0;

/// Timing windows at the loosest complexity, in travel seconds.
const BASE_WINDOWS: TimingWindows = TimingWindows {
    perfect: 0.10,
    good: 0.20,
    almost: 0.30,
};

/// Complexity bands. The thresholds are shared with hit-zone visualization
/// and must stay at 30 / 60 / 80.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplexityBand {
    /// complexity <= 30
    Relaxed,
    /// 30 < complexity <= 60. Windows shrink fastest here.
    Wall,
    /// 60 < complexity <= 80
    Steady,
    /// complexity > 80
    Expert,
}

impl ComplexityBand {
    pub fn from_complexity(complexity: f64) -> Self {
        if complexity <= 30.0 {
            Self::Relaxed
        } else if complexity <= 60.0 {
            Self::Wall
        } else if complexity <= 80.0 {
            Self::Steady
        } else {
            Self::Expert
        }
    }

    /// Widening factor applied to the almost window to build the hit box.
    pub fn window_factor(self) -> f64 {
        match self {
            Self::Relaxed => 1.5,
            Self::Wall => 1.25,
            Self::Steady => 1.1,
            Self::Expert => 1.0,
        }
    }

    /// Complexity span covered by the band and the per-point window shrink rate inside it.
    fn shrink_segment(self) -> (f64, f64, f64) {
        match self {
            Self::Relaxed => (MIN_COMPLEXITY, 30.0, 0.0),
            Self::Wall => (30.0, 60.0, 0.015),
            Self::Steady => (60.0, 80.0, 0.005),
            Self::Expert => (80.0, MAX_COMPLEXITY, 0.0025),
        }
    }
}

/// The three accuracy windows. Always positive and strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingWindows {
    pub perfect: f64,
    pub good: f64,
    pub almost: f64,
}

impl TimingWindows {
    fn scale(&self, factor: f64) -> Self {
        Self {
            perfect: self.perfect * factor,
            good: self.good * factor,
            almost: self.almost * factor,
        }
    }

    pub fn is_ordered(&self) -> bool {
        0.0 < self.perfect && self.perfect < self.good && self.good < self.almost
    }
}

/// Timing and speed parameters derived from a complexity value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityConfig {
    /// Clamped complexity this config was derived from.
    pub complexity: f64,
    pub band: ComplexityBand,
    pub speed_multiplier: f64,
    pub timing_windows: TimingWindows,
}

impl ComplexityConfig {
    pub fn band_multiplier(&self) -> f64 {
        self.band.window_factor()
    }

    /// Half-width of the hit box around the hit zone.
    pub fn max_window(&self) -> f64 {
        self.timing_windows.almost * self.band_multiplier()
    }

    /// Lookahead distance for "too early" feedback.
    pub fn early_window(&self) -> f64 {
        self.timing_windows.almost * 2.0
    }

    /// Score unit before the tier factor.
    pub fn base_score(&self) -> f64 {
        10.0 + self.complexity / 10.0
    }

    /// Health lost on a miss.
    pub fn miss_penalty(&self) -> f64 {
        3.0 + self.complexity / 25.0
    }
}

/// Maps a difficulty scalar to timing windows and note speed.
pub struct ComplexityManager;

impl ComplexityManager {
    /// Clamp to [0, 100]. NaN counts as the easiest setting.
    pub fn clamp(complexity: f64) -> f64 {
        if complexity.is_nan() {
            MIN_COMPLEXITY
        } else {
            complexity.clamp(MIN_COMPLEXITY, MAX_COMPLEXITY)
        }
    }

    pub fn config(complexity: f64) -> ComplexityConfig {
        let complexity = Self::clamp(complexity);
        let band = ComplexityBand::from_complexity(complexity);
        ComplexityConfig {
            complexity,
            band,
            speed_multiplier: 1.0 + complexity / 50.0,
            timing_windows: BASE_WINDOWS.scale(Self::window_scale(complexity)),
        }
    }

    /// Piecewise-linear window scale: 1.0 up to 30, 0.55 at 60, 0.45 at 80, 0.40 at 100.
    fn window_scale(complexity: f64) -> f64 {
        let mut scale = 1.0;
        for band in [
            ComplexityBand::Relaxed,
            ComplexityBand::Wall,
            ComplexityBand::Steady,
            ComplexityBand::Expert,
        ] {
            let (start, end, rate) = band.shrink_segment();
            if complexity <= start {
                break;
            }
            scale -= (complexity.min(end) - start) * rate;
        }
        scale
    }
}
