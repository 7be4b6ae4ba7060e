//! Balloon tier table, keyed by cumulative kills.

use crate::entities::BalloonTier;

pub const BASE_SPEED: f32 = 2.0;
pub const SPEED_INCREMENT: f32 = 0.15;

/// Stats shared by every balloon of one tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierProps {
    pub tier: BalloonTier,
    pub health: u32,
    pub speed: f32,
    pub child: Option<BalloonTier>,
}

pub fn tier_properties(tier: BalloonTier) -> TierProps {
    let (health, steps, child) = match tier {
        BalloonTier::Red => (1, 0.0, None),
        BalloonTier::Blue => (2, 1.0, Some(BalloonTier::Red)),
        BalloonTier::Green => (3, 2.0, Some(BalloonTier::Blue)),
        BalloonTier::Yellow => (4, 2.5, Some(BalloonTier::Green)),
        BalloonTier::Pink => (5, 3.0, Some(BalloonTier::Yellow)),
        BalloonTier::Black => (6, 3.2, Some(BalloonTier::Pink)),
        BalloonTier::White => (7, 3.4, Some(BalloonTier::Black)),
        BalloonTier::Purple => (8, 3.6, Some(BalloonTier::White)),
    };
    TierProps {
        tier,
        health,
        speed: BASE_SPEED * (1.0 + SPEED_INCREMENT * steps),
        child,
    }
}

/// Tier for the next spawn. Past 80 kills the table wraps back to red.
pub fn tier_for(defeated: u32) -> BalloonTier {
    match defeated {
        0..=9 => BalloonTier::Red,
        10..=19 => BalloonTier::Blue,
        20..=29 => BalloonTier::Green,
        30..=39 => BalloonTier::Yellow,
        40..=49 => BalloonTier::Pink,
        50..=59 => BalloonTier::Black,
        60..=69 => BalloonTier::White,
        70..=79 => BalloonTier::Purple,
        _ => BalloonTier::Red,
    }
}

pub fn balloon_properties(defeated: u32) -> TierProps {
    tier_properties(tier_for(defeated))
}

/// Level shown on the HUD.
pub fn level_for(defeated: u32) -> u32 {
    match defeated {
        0..=9 => 1,
        10..=19 => 2,
        20..=29 => 3,
        _ => 4,
    }
}
