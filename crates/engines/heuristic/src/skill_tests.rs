use super::*;

#[test]
fn strength_is_monotonic_across_levels() {
    for level in MIN_LEVEL..MAX_LEVEL {
        let weaker = calibrate(level);
        let stronger = calibrate(level + 1);

        assert!(stronger.target_rating > weaker.target_rating);
        assert!(
            stronger.blunder_probability <= weaker.blunder_probability,
            "blunder rate rises from level {level} to {}",
            level + 1
        );
        assert!(
            stronger.sub_optimal_probability.unwrap_or(0.0)
                <= weaker.sub_optimal_probability.unwrap_or(0.0),
            "sub-optimal rate rises from level {level} to {}",
            level + 1
        );
        assert!(stronger.top_fraction >= weaker.top_fraction);
    }
}

#[test]
fn levels_are_clamped() {
    assert_eq!(calibrate(0).level, 1);
    assert_eq!(calibrate(42).level, 10);
    assert_eq!(calibrate(7).target_rating, 2000);
}

#[test]
fn strong_levels_never_play_sub_optimal_on_purpose() {
    for level in 6..=MAX_LEVEL {
        assert!(calibrate(level).sub_optimal_probability.is_none());
    }
    assert_eq!(calibrate(1).sub_optimal_probability, Some(0.40));
}

#[test]
fn uci_skill_level_mapping() {
    assert_eq!(calibrate(1).uci_skill_level(), 0);
    assert_eq!(calibrate(7).uci_skill_level(), 13);
    assert_eq!(calibrate(10).uci_skill_level(), 20);

    assert_eq!(SkillProfile::from_uci_skill_level(0).level, 1);
    assert_eq!(SkillProfile::from_uci_skill_level(12).level, 6);
    assert_eq!(SkillProfile::from_uci_skill_level(13).level, 7);
    assert_eq!(SkillProfile::from_uci_skill_level(20).level, 10);
    assert_eq!(SkillProfile::from_uci_skill_level(99).level, 10);

    for level in MIN_LEVEL..=MAX_LEVEL {
        let skill = calibrate(level).uci_skill_level();
        assert_eq!(SkillProfile::from_uci_skill_level(skill).level, level);
    }
}

#[test]
fn elo_mapping() {
    assert_eq!(SkillProfile::from_elo(400).level, 1);
    assert_eq!(SkillProfile::from_elo(1000).level, 2);
    assert_eq!(SkillProfile::from_elo(1999).level, 6);
    assert_eq!(SkillProfile::from_elo(3500).level, 10);
}

#[test]
fn top_band_sizes() {
    let strongest = SkillProfile::strongest();
    assert_eq!(strongest.top_band(0), 0);
    assert_eq!(strongest.top_band(1), 1);
    assert_eq!(strongest.top_band(20), 1);
    assert_eq!(strongest.top_band(100), 2);

    // 20 * (1 - 0.95) is exactly one move
    assert_eq!(calibrate(7).top_band(20), 1);
    assert_eq!(calibrate(1).top_band(20), 8);
    assert_eq!(calibrate(1).top_band(3), 2);
}

#[test]
fn default_profile_is_mid_strength() {
    assert_eq!(SkillProfile::default().level, DEFAULT_LEVEL);
}
