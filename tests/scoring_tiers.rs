//! Composite formula and tier table behaviour through the public API

use titan_bench::scoring::tier_progress;
use titan_bench::{composite, tier_for, RawScores, TIERS};

#[test]
fn test_composite_of_tens_is_205() {
    let result = composite(&RawScores::new(10, 10, 10));
    assert_eq!(result.total, 205);
    assert_eq!(result.tier.name, "Potato / Calculator");
}

#[test]
fn test_composite_is_deterministic() {
    let scores = RawScores::new(123_456, 987_654, 4_321);
    assert_eq!(composite(&scores), composite(&scores));
}

#[test]
fn test_every_boundary_selects_its_own_tier() {
    for (i, tier) in TIERS.iter().enumerate() {
        assert_eq!(tier_for(tier.min_score).name, tier.name);
        if i > 0 {
            assert_eq!(tier_for(tier.min_score - 1).name, TIERS[i - 1].name);
        }
    }
}

#[test]
fn test_lookup_is_total_over_a_sweep() {
    let mut previous_min = 0;
    for total in (0..4_000_000u64).step_by(12_345) {
        let tier = tier_for(total);
        assert!(tier.min_score <= total);
        assert!(tier.min_score >= previous_min);
        previous_min = tier.min_score;
    }
}

#[test]
fn test_composite_lands_in_gaming_rig() {
    // 150k single, 400k multi, 50k gpu -> 1.5M + 200k + 500k
    let result = composite(&RawScores::new(150_000, 400_000, 50_000));
    assert_eq!(result.total, 2_200_000);
    assert_eq!(result.tier.name, "Gaming Rig");
    assert!((tier_progress(result.total) - 0.2).abs() < 1e-9);
}
