/// All game entity types: pure data, no logic.
///
/// Positions live in field space (`glam::Vec2`, origin top-left, y down).
/// Sizes are diameters: two entities touch when their centres are closer
/// than the mean of their sizes.

use bitflags::bitflags;
use glam::Vec2;

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BalloonTier {
    Red,
    Blue,
    Green,
    Yellow,
    Pink,
    Black,
    White,
    Purple,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
    /// Rapid-click cheat detected; the run is over.
    Busted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Adds a bullet fired opposite the aim.
    BackwardsShooting,
    /// Unlocks the 3-way spread shot.
    ExtraBullets,
}

bitflags! {
    /// Bullet behaviour unlocked so far.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Upgrades: u8 {
        /// Three bullets at −15°, 0°, +15°.
        const SPREAD_SHOT = 1;
        /// One extra bullet straight behind the player.
        const BACKWARDS = 1 << 1;
    }
}

// ── Projectiles & pickups ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    /// Unit vector.
    pub dir: Vec2,
    pub size: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: f32,
    pub kind: PowerUpKind,
}

/// Short-lived pop drawn where a balloon or the boss died.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub pos: Vec2,
    /// Frames since it appeared.
    pub frame: u32,
}

// ── Player, balloons & boss ───────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Balloon {
    pub pos: Vec2,
    pub size: f32,
    pub hits: u32,
    /// Hits needed to pop.
    pub health: u32,
    pub speed: f32,
    pub tier: BalloonTier,
    /// Tier of the two balloons released on pop, if any.
    pub child: Option<BalloonTier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub pos: Vec2,
    pub size: f32,
    pub hits: u32,
    pub health: u32,
}

// ── Bookkeeping ───────────────────────────────────────────────────────────────

/// Run-wide counters and one-shot flags.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Counters {
    pub score: u32,
    /// Balloons removed by bullets or by touching the player.
    pub defeated: u32,
    pub bosses_defeated: u32,
    pub lives: u32,
    pub upgrades: Upgrades,
    pub boss_spawned: bool,
    /// The single guaranteed drop after the first boss kill has happened.
    pub boss_drop_given: bool,
    /// Clock time at which the announced boss arrives.
    pub boss_warning_until: Option<u64>,
}

/// Consecutive rapid clicks, for cheat detection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClickTracker {
    pub count: u32,
    pub last_click_ms: Option<u64>,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub balloons: Vec<Balloon>,
    pub bullets: Vec<Bullet>,
    pub power_ups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    pub boss: Option<Boss>,
    pub counters: Counters,
    pub clicks: ClickTracker,
    pub status: GameStatus,
    /// Z-key cheat: balloons pass through the player harmlessly.
    pub invincible: bool,
    /// Simulated milliseconds since the run started.
    pub clock_ms: u64,
    pub frame: u64,
    pub spawn_interval_ms: f64,
    pub last_spawn_ms: u64,
    pub last_power_up_ms: u64,
    pub config: GameConfig,
}

impl GameState {
    pub fn field_size(&self) -> Vec2 {
        Vec2::new(self.config.field.width, self.config.field.height)
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver | GameStatus::Busted)
    }

    /// True while the boss announcement banner should be shown.
    pub fn boss_incoming(&self) -> bool {
        self.counters.boss_warning_until.is_some()
    }
}
