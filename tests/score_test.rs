use letterfall::play::{AccuracyResult, AccuracyTier, ComplexityManager, RunState, ScoringEngine};

fn apply(run: &mut RunState, tier: AccuracyTier, complexity: f64) {
    let result = AccuracyResult::new(tier, 0.0, &ComplexityManager::config(complexity));
    ScoringEngine::apply(&result, run);
}

#[test]
fn test_score_per_tier() {
    let mut run = RunState::new(50.0);

    apply(&mut run, AccuracyTier::Perfect, 30.0);
    assert_eq!(run.score, 32);

    apply(&mut run, AccuracyTier::Good, 30.0);
    assert_eq!(run.score, 32 + 19);

    apply(&mut run, AccuracyTier::Almost, 30.0);
    assert_eq!(run.score, 32 + 19 + 9);

    apply(&mut run, AccuracyTier::Miss, 30.0);
    assert_eq!(run.score, 60);

    apply(&mut run, AccuracyTier::Early, 30.0);
    assert_eq!(run.score, 60);
}

#[test]
fn test_combo() {
    let mut run = RunState::default();

    apply(&mut run, AccuracyTier::Perfect, 30.0);
    assert_eq!(run.combo, 1);

    apply(&mut run, AccuracyTier::Good, 30.0);
    assert_eq!(run.combo, 2);

    apply(&mut run, AccuracyTier::Almost, 30.0);
    assert_eq!(run.combo, 3);

    // Early does not touch the streak
    apply(&mut run, AccuracyTier::Early, 30.0);
    assert_eq!(run.combo, 3);

    // Miss breaks combo
    apply(&mut run, AccuracyTier::Miss, 30.0);
    assert_eq!(run.combo, 0);

    apply(&mut run, AccuracyTier::Perfect, 30.0);
    assert_eq!(run.combo, 1);
    assert_eq!(run.max_combo, 3);
}

#[test]
fn test_miss_penalty_scales_with_complexity() {
    let mut easy = RunState::default();
    let mut hard = RunState::default();

    apply(&mut easy, AccuracyTier::Miss, 0.0);
    apply(&mut hard, AccuracyTier::Miss, 100.0);

    assert_eq!(easy.health, 97.0);
    assert_eq!(hard.health, 93.0);
}

#[test]
fn test_health_stays_in_bounds() {
    let mut run = RunState::new(99.5);
    for _ in 0..50 {
        apply(&mut run, AccuracyTier::Perfect, 30.0);
    }
    assert_eq!(run.health, 100.0);

    for _ in 0..50 {
        apply(&mut run, AccuracyTier::Miss, 100.0);
    }
    assert_eq!(run.health, 0.0);
}

#[test]
fn test_combo_bonus_caps() {
    assert_eq!(ScoringEngine::combo_bonus(0), 0.0);
    assert_eq!(ScoringEngine::combo_bonus(9), 0.0);
    assert!((ScoringEngine::combo_bonus(25) - 0.2).abs() < 1e-9);
    assert!((ScoringEngine::combo_bonus(100) - 1.0).abs() < 1e-9);
    assert!((ScoringEngine::combo_bonus(5000) - 1.0).abs() < 1e-9);
}

#[test]
fn test_accuracy() {
    let mut run = RunState::default();
    assert_eq!(run.accuracy(), 0.0);

    apply(&mut run, AccuracyTier::Perfect, 30.0);
    apply(&mut run, AccuracyTier::Almost, 30.0);
    apply(&mut run, AccuracyTier::Early, 30.0);
    assert_eq!(run.accuracy(), 100.0);

    apply(&mut run, AccuracyTier::Miss, 30.0);
    apply(&mut run, AccuracyTier::Miss, 30.0);
    assert_eq!(run.total_processed, 4);
    assert_eq!(run.accuracy(), 50.0);
}

#[test]
fn test_counts_by_tier() {
    let mut run = RunState::default();
    apply(&mut run, AccuracyTier::Perfect, 30.0);
    apply(&mut run, AccuracyTier::Perfect, 30.0);
    apply(&mut run, AccuracyTier::Good, 30.0);
    apply(&mut run, AccuracyTier::Early, 30.0);

    assert_eq!(run.count(AccuracyTier::Perfect), 2);
    assert_eq!(run.count(AccuracyTier::Good), 1);
    assert_eq!(run.count(AccuracyTier::Almost), 0);
    assert_eq!(run.count(AccuracyTier::Early), 1);
}
