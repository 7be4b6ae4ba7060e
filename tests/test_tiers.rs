use balloon_blaster::entities::BalloonTier;
use balloon_blaster::tiers::*;

use approx::assert_relative_eq;

#[test]
fn first_ten_kills_spawn_red() {
    for defeated in 0..10 {
        let p = balloon_properties(defeated);
        assert_eq!(p.tier, BalloonTier::Red);
        assert_eq!(p.health, 1);
        assert_eq!(p.child, None);
        assert_relative_eq!(p.speed, 2.0);
    }
}

#[test]
fn thresholds_switch_exactly_on_multiples_of_ten() {
    let expected = [
        (9, BalloonTier::Red),
        (10, BalloonTier::Blue),
        (19, BalloonTier::Blue),
        (20, BalloonTier::Green),
        (30, BalloonTier::Yellow),
        (40, BalloonTier::Pink),
        (49, BalloonTier::Pink),
        (50, BalloonTier::Black),
        (60, BalloonTier::White),
        (70, BalloonTier::Purple),
        (79, BalloonTier::Purple),
    ];
    for (defeated, tier) in expected {
        assert_eq!(tier_for(defeated), tier, "at {} kills", defeated);
    }
}

#[test]
fn table_wraps_to_red_after_eighty() {
    assert_eq!(tier_for(80), BalloonTier::Red);
    assert_eq!(tier_for(500), BalloonTier::Red);
    assert_eq!(balloon_properties(80).child, None);
}

#[test]
fn health_grows_by_one_per_tier() {
    let tiers = [
        BalloonTier::Red,
        BalloonTier::Blue,
        BalloonTier::Green,
        BalloonTier::Yellow,
        BalloonTier::Pink,
        BalloonTier::Black,
        BalloonTier::White,
        BalloonTier::Purple,
    ];
    for (i, tier) in tiers.iter().enumerate() {
        assert_eq!(tier_properties(*tier).health, i as u32 + 1);
    }
}

#[test]
fn speed_table() {
    assert_relative_eq!(tier_properties(BalloonTier::Blue).speed, 2.3, epsilon = 1e-5);
    assert_relative_eq!(tier_properties(BalloonTier::Green).speed, 2.6, epsilon = 1e-5);
    assert_relative_eq!(tier_properties(BalloonTier::Yellow).speed, 2.75, epsilon = 1e-5);
    assert_relative_eq!(tier_properties(BalloonTier::Pink).speed, 2.9, epsilon = 1e-5);
    assert_relative_eq!(tier_properties(BalloonTier::Black).speed, 2.96, epsilon = 1e-5);
    assert_relative_eq!(tier_properties(BalloonTier::White).speed, 3.02, epsilon = 1e-5);
    assert_relative_eq!(tier_properties(BalloonTier::Purple).speed, 3.08, epsilon = 1e-5);
}

#[test]
fn every_child_chain_ends_at_red() {
    let mut tier = BalloonTier::Purple;
    let mut steps = 0;
    while let Some(child) = tier_properties(tier).child {
        assert!(tier_properties(child).health < tier_properties(tier).health);
        tier = child;
        steps += 1;
    }
    assert_eq!(tier, BalloonTier::Red);
    assert_eq!(steps, 7);
}

#[test]
fn hud_level_thresholds() {
    assert_eq!(level_for(0), 1);
    assert_eq!(level_for(9), 1);
    assert_eq!(level_for(10), 2);
    assert_eq!(level_for(20), 3);
    assert_eq!(level_for(29), 3);
    assert_eq!(level_for(30), 4);
    assert_eq!(level_for(1000), 4);
}
