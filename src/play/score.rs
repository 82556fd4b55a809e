use super::judge::{AccuracyResult, AccuracyTier};
use super::run_state::{RunState, clamp_health};

/// Health bonus per 10 combo, capped at 10 steps.
const COMBO_BONUS_STEP: f64 = 0.1;
const COMBO_BONUS_MAX_STEPS: u32 = 10;

/// Applies resolved keypresses to the run state.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Update score, combo, health and counters from a resolution.
    ///
    /// Early results are advisory: only the early counter moves.
    pub fn apply(result: &AccuracyResult, run: &mut RunState) {
        match result.tier {
            AccuracyTier::Perfect | AccuracyTier::Good | AccuracyTier::Almost => {
                run.score = run.score.saturating_add(result.score_delta);
                run.combo = run.combo.saturating_add(1);
                run.max_combo = run.max_combo.max(run.combo);
                run.health =
                    clamp_health(run.health + result.health_delta + Self::combo_bonus(run.combo));
                match result.tier {
                    AccuracyTier::Perfect => run.perfect += 1,
                    AccuracyTier::Good => run.good += 1,
                    _ => run.almost += 1,
                }
                run.total_processed += 1;
            }
            AccuracyTier::Miss => {
                run.combo = 0;
                run.health = clamp_health(run.health - result.health_delta.abs());
                run.missed += 1;
                run.total_processed += 1;
            }
            AccuracyTier::Early => {
                run.early += 1;
            }
        }
    }

    /// Extra health for sustained streaks: +0.1 per 10 combo, up to +1.0.
    pub fn combo_bonus(combo: u32) -> f64 {
        (combo / 10).min(COMBO_BONUS_MAX_STEPS) as f64 * COMBO_BONUS_STEP
    }
}
