use crate::model::{Note, NoteGeometry, NoteId, NoteState};
use crate::play::complexity::ComplexityConfig;

use super::accuracy::{AccuracyResult, AccuracyTier, FeedbackLabel};

/// Outcome of resolving a keypress against the active notes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Note the press lands on. None for Early and for a Miss with nothing in reach.
    pub target: Option<NoteId>,
    pub result: AccuracyResult,
}

/// Selects the note a keypress targets and grades it.
///
/// Pure query: the caller applies the result to the run state and the timeline.
pub struct InputResolver;

impl InputResolver {
    /// Resolve a press of `lane` against `notes` (ordered by spawn).
    ///
    /// 1. A paused note in the lane is hit unconditionally with a Good reward.
    /// 2. Otherwise the pending note nearest to the hit zone, among those whose
    ///    span overlaps the hit box, is graded against the timing windows.
    ///    Equal distances keep the earliest spawned note.
    /// 3. A note beyond the almost window is Early if it is still approaching
    ///    and Miss if it has passed. With no candidate, a note approaching
    ///    within the early window gives Early, otherwise the press is a Miss.
    pub fn resolve(
        lane: usize,
        notes: &[Note],
        config: &ComplexityConfig,
        hit_zone_center: f64,
        geometry: &NoteGeometry,
    ) -> Resolution {
        if let Some(paused) = notes.iter().find(in_lane(lane, NoteState::Paused)) {
            return Self::resolve_paused(paused, config, hit_zone_center);
        }

        let max_window = config.max_window();
        let box_start = hit_zone_center - max_window;
        let box_end = hit_zone_center + max_window;

        let mut best: Option<(&Note, f64)> = None;
        for note in notes.iter().filter(in_lane(lane, NoteState::Pending)) {
            let half = note.half_height(geometry);
            if note.travel_position + half < box_start || note.travel_position - half > box_end {
                continue;
            }
            let distance = note.offset_from(hit_zone_center).abs();
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((note, distance));
            }
        }

        if let Some((note, _)) = best {
            let offset = note.offset_from(hit_zone_center);
            return match AccuracyResult::classify(offset, &config.timing_windows) {
                Some(tier) => Resolution {
                    target: Some(note.id),
                    result: AccuracyResult::new(tier, offset, config),
                },
                None if offset > 0.0 => Resolution {
                    target: None,
                    result: AccuracyResult::new(AccuracyTier::Early, offset, config),
                },
                None => Resolution {
                    target: Some(note.id),
                    result: AccuracyResult::new(AccuracyTier::Miss, offset, config),
                },
            };
        }

        let early_window = config.early_window();
        let upcoming = notes
            .iter()
            .filter(in_lane(lane, NoteState::Pending))
            .map(|note| note.offset_from(hit_zone_center))
            .filter(|offset| *offset > 0.0 && *offset <= early_window)
            .min_by(|a, b| a.total_cmp(b));

        match upcoming {
            Some(offset) => Resolution {
                target: None,
                result: AccuracyResult::new(AccuracyTier::Early, offset, config),
            },
            None => Resolution {
                target: None,
                result: AccuracyResult::new(AccuracyTier::Miss, 0.0, config),
            },
        }
    }

    fn resolve_paused(note: &Note, config: &ComplexityConfig, hit_zone_center: f64) -> Resolution {
        let mut result =
            AccuracyResult::new(AccuracyTier::Good, note.offset_from(hit_zone_center), config);
        result.label = FeedbackLabel::Good;
        Resolution {
            target: Some(note.id),
            result,
        }
    }
}

fn in_lane(lane: usize, state: NoteState) -> impl Fn(&&Note) -> bool {
    move |note| note.lane == lane && note.state == state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play::complexity::ComplexityManager;
    use crate::test_utils::builders::NoteBuilder;

    const CENTER: f64 = 0.0;

    fn resolve(lane: usize, notes: &[Note], complexity: f64) -> Resolution {
        InputResolver::resolve(
            lane,
            notes,
            &ComplexityManager::config(complexity),
            CENTER,
            &NoteGeometry::default(),
        )
    }

    // =========================================================================
    // Tier classification
    // =========================================================================

    #[test]
    fn perfect_within_perfect_window() {
        let notes = vec![NoteBuilder::tap(0, 0.05).id(1).build()];
        let res = resolve(0, &notes, 30.0);
        assert_eq!(res.target, Some(NoteId(1)));
        assert_eq!(res.result.tier, AccuracyTier::Perfect);
        assert_eq!(res.result.score_delta, 32);
    }

    #[test]
    fn tiers_by_distance() {
        let cases = [
            (0.10, AccuracyTier::Perfect),
            (0.15, AccuracyTier::Good),
            (-0.20, AccuracyTier::Good),
            (0.25, AccuracyTier::Almost),
            (-0.30, AccuracyTier::Almost),
        ];
        for (position, tier) in cases {
            let notes = vec![NoteBuilder::tap(2, position).build()];
            assert_eq!(resolve(2, &notes, 30.0).result.tier, tier, "at {position}");
        }
    }

    #[test]
    fn late_note_beyond_almost_is_miss_on_that_note() {
        // hit box at 30 = 0.45, almost = 0.30
        let notes = vec![NoteBuilder::tap(0, -0.40).id(7).build()];
        let res = resolve(0, &notes, 30.0);
        assert_eq!(res.result.tier, AccuracyTier::Miss);
        assert_eq!(res.target, Some(NoteId(7)));
        assert!(res.result.timing_offset < 0.0);
    }

    #[test]
    fn approaching_note_beyond_almost_is_early() {
        let notes = vec![NoteBuilder::tap(0, 0.40).build()];
        let res = resolve(0, &notes, 30.0);
        assert_eq!(res.result.tier, AccuracyTier::Early);
        assert_eq!(res.target, None);
    }

    // =========================================================================
    // No candidate
    // =========================================================================

    #[test]
    fn empty_lane_is_miss() {
        let notes = vec![NoteBuilder::tap(1, 0.0).build()];
        let res = resolve(0, &notes, 30.0);
        assert_eq!(res.result.tier, AccuracyTier::Miss);
        assert_eq!(res.target, None);
        assert!((res.result.health_delta + 4.2).abs() < 1e-9);
    }

    #[test]
    fn upcoming_within_early_window_is_early() {
        // early window at 30 = 0.6; note span 0.55 ± 0.05 misses the 0.45 hit box
        let notes = vec![NoteBuilder::tap(0, 0.55).build()];
        let res = resolve(0, &notes, 30.0);
        assert_eq!(res.result.tier, AccuracyTier::Early);
        assert!((res.result.timing_offset - 0.55).abs() < 1e-9);
    }

    #[test]
    fn upcoming_beyond_early_window_is_miss() {
        let notes = vec![NoteBuilder::tap(0, 0.9).build()];
        assert_eq!(resolve(0, &notes, 30.0).result.tier, AccuracyTier::Miss);
    }

    #[test]
    fn terminal_notes_are_ignored() {
        let notes = vec![
            NoteBuilder::tap(0, 0.0).state(NoteState::Hit).build(),
            NoteBuilder::tap(0, 0.0).state(NoteState::Missed).build(),
            NoteBuilder::tap(0, 0.0).state(NoteState::Processed).build(),
            NoteBuilder::hold(0, 0.0, 1.0).state(NoteState::BeingHeld).build(),
        ];
        let res = resolve(0, &notes, 30.0);
        assert_eq!(res.result.tier, AccuracyTier::Miss);
        assert_eq!(res.target, None);
    }

    // =========================================================================
    // Tie-break
    // =========================================================================

    #[test]
    fn nearest_candidate_wins() {
        let notes = vec![
            NoteBuilder::tap(0, 0.2).id(1).build(),
            NoteBuilder::tap(0, -0.05).id(2).build(),
        ];
        let res = resolve(0, &notes, 30.0);
        assert_eq!(res.target, Some(NoteId(2)));
        assert_eq!(res.result.tier, AccuracyTier::Perfect);
    }

    #[test]
    fn equal_distance_keeps_earliest_spawned() {
        let notes = vec![
            NoteBuilder::tap(0, -0.1).id(3).build(),
            NoteBuilder::tap(0, 0.1).id(4).build(),
        ];
        assert_eq!(resolve(0, &notes, 30.0).target, Some(NoteId(3)));
    }

    #[test]
    fn hold_note_span_reaches_hit_box() {
        // 4-beat hold: half height = (0.1 + 2.0) / 2 = 1.05
        let notes = vec![NoteBuilder::hold(0, 1.2, 4.0).id(5).build()];
        let res = resolve(0, &notes, 30.0);
        // Candidate by span, but its center is still approaching beyond almost.
        assert_eq!(res.result.tier, AccuracyTier::Early);
        assert!((res.result.timing_offset - 1.2).abs() < 1e-9);
    }

    // =========================================================================
    // Paused notes
    // =========================================================================

    #[test]
    fn paused_note_hit_regardless_of_position() {
        let notes = vec![
            NoteBuilder::tap(3, 0.0).id(1).build(),
            NoteBuilder::tap(3, 5.0).id(2).paused().build(),
        ];
        let res = resolve(3, &notes, 90.0);
        assert_eq!(res.target, Some(NoteId(2)));
        assert_eq!(res.result.tier, AccuracyTier::Good);
        assert_eq!(res.result.label, FeedbackLabel::Good);
    }

    #[test]
    fn paused_note_in_other_lane_is_ignored() {
        let notes = vec![NoteBuilder::tap(1, 0.0).paused().build()];
        assert_eq!(resolve(0, &notes, 30.0).result.tier, AccuracyTier::Miss);
    }
}
