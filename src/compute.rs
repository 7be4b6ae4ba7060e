/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG and logging.

use glam::Vec2;
use log::{debug, info, warn};
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    Balloon, BalloonTier, Boss, Bullet, ClickTracker, Counters, Explosion, GameState, GameStatus,
    Player, PowerUp, PowerUpKind, Upgrades,
};
use crate::geometry::{aim_direction, circles_overlap, inside_field, rotate};
use crate::tiers::{balloon_properties, tier_properties};

pub const BALLOON_SIZE: f32 = 20.0;
pub const POWER_UP_SIZE: f32 = 10.0;
pub const SPREAD_ANGLE_DEG: f32 = 15.0;
/// Explosions disappear once they reach this age.
pub const EXPLOSION_FRAMES: u32 = 20;
/// From this score on, balloons move twice as fast and spread shot unlocks.
pub const FRENZY_SCORE: u32 = 10;

const MAX_SPAWN_ATTEMPTS: usize = 64;

/// Held movement keys for one frame; each axis is −1, 0 or 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Heading {
    pub dx: i8,
    pub dy: i8,
}

impl Heading {
    pub fn new(dx: i8, dy: i8) -> Self {
        Self {
            dx: dx.signum(),
            dy: dy.signum(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh run: player centred, full lives, empty field.
pub fn init_state(config: GameConfig) -> GameState {
    let field = Vec2::new(config.field.width, config.field.height);
    let gp = &config.gameplay;
    GameState {
        player: Player {
            pos: field / 2.0,
            size: gp.player_size,
        },
        balloons: Vec::new(),
        bullets: Vec::new(),
        power_ups: Vec::new(),
        explosions: Vec::new(),
        boss: None,
        counters: Counters {
            lives: gp.starting_lives,
            ..Counters::default()
        },
        clicks: ClickTracker::default(),
        status: GameStatus::Playing,
        invincible: false,
        clock_ms: 0,
        frame: 0,
        spawn_interval_ms: gp.spawn_interval_ms,
        last_spawn_ms: 0,
        last_power_up_ms: 0,
        config,
    }
}

/// Start over with the same configuration.
pub fn restart(state: &GameState) -> GameState {
    info!(
        "restarting run (previous score {}, kills {})",
        state.counters.score, state.counters.defeated
    );
    init_state(state.config.clone())
}

/// A balloon of `tier` at `pos`, with that tier's stats.
pub fn new_balloon(tier: BalloonTier, pos: Vec2) -> Balloon {
    let props = tier_properties(tier);
    Balloon {
        pos,
        size: BALLOON_SIZE,
        hits: 0,
        health: props.health,
        speed: props.speed,
        tier: props.tier,
        child: props.child,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player(state: &GameState, heading: Heading) -> GameState {
    if state.status != GameStatus::Playing || heading.is_idle() {
        return state.clone();
    }
    let field = state.field_size();
    let half = state.player.size / 2.0;
    let step = Vec2::new(heading.dx as f32, heading.dy as f32) * state.config.gameplay.player_speed;
    let moved = state.player.pos + step;
    let pos = Vec2::new(
        moved.x.min(field.x - half).max(half),
        moved.y.min(field.y - half).max(half),
    );
    GameState {
        player: Player {
            pos,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Click handler: fire toward `target` and track rapid clicking.
///
/// A click within `click_window_ms` of the previous one extends the streak;
/// a streak longer than `click_limit` busts the player.
pub fn fire(state: &GameState, target: Vec2) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let gp = &state.config.gameplay;
    let now = state.clock_ms;

    let rapid = state
        .clicks
        .last_click_ms
        .is_some_and(|last| now.saturating_sub(last) <= gp.click_window_ms);
    let count = if rapid { state.clicks.count + 1 } else { 1 };
    let clicks = ClickTracker {
        count,
        last_click_ms: Some(now),
    };

    if count > gp.click_limit {
        warn!("{} rapid clicks in a row, run forfeited", count);
        return GameState {
            clicks,
            status: GameStatus::Busted,
            ..state.clone()
        };
    }

    fire_at(
        &GameState {
            clicks,
            ..state.clone()
        },
        target,
    )
}

/// Launch the current shot pattern from the player toward `target`.
///
/// Keyboard fire lands here directly: it is rate-limited by the caller and
/// never counts toward the click streak.
pub fn fire_at(state: &GameState, target: Vec2) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let Some(aim) = aim_direction(state.player.pos, target) else {
        return state.clone();
    };

    let origin = state.player.pos;
    let size = state.config.gameplay.bullet_size;
    let upgrades = state.counters.upgrades;
    let mut bullets = state.bullets.clone();

    if upgrades.contains(Upgrades::SPREAD_SHOT) {
        let spread = SPREAD_ANGLE_DEG.to_radians();
        for offset in [-spread, 0.0, spread] {
            bullets.push(Bullet {
                pos: origin,
                dir: rotate(aim, offset),
                size,
            });
        }
    } else {
        bullets.push(Bullet {
            pos: origin,
            dir: aim,
            size,
        });
    }

    if upgrades.contains(Upgrades::BACKWARDS) {
        bullets.push(Bullet {
            pos: origin,
            dir: -aim,
            size,
        });
    }

    GameState {
        bullets,
        ..state.clone()
    }
}

/// P key. Only a running game can be paused, and only a paused one resumed.
pub fn toggle_pause(state: &GameState) -> GameState {
    let status = match state.status {
        GameStatus::Playing => GameStatus::Paused,
        GameStatus::Paused => GameStatus::Playing,
        other => other,
    };
    GameState {
        status,
        ..state.clone()
    }
}

/// Z key cheat.
pub fn toggle_invincible(state: &GameState) -> GameState {
    info!("invincibility {}", if state.invincible { "off" } else { "on" });
    GameState {
        invincible: !state.invincible,
        ..state.clone()
    }
}

// ── Per-frame tick (RNG is injected) ───────────────────────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let gp = &state.config.gameplay;
    let field = state.field_size();
    let clock_ms = state.clock_ms + state.config.runtime.frame_ms;
    let player = &state.player;
    let mut counters = state.counters.clone();

    // ── 1. Move bullets, dropping those that leave the field ─────────────────
    let mut bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .filter_map(|b| {
            let pos = b.pos + b.dir * gp.bullet_speed;
            inside_field(pos, field).then(|| Bullet { pos, ..b.clone() })
        })
        .collect();

    // ── 2. Spawn a balloon (never while the boss is up) ──────────────────────
    let mut balloons = state.balloons.clone();
    let mut spawn_interval_ms = state.spawn_interval_ms;
    let mut last_spawn_ms = state.last_spawn_ms;
    if state.boss.is_none() && (clock_ms - last_spawn_ms) as f64 > spawn_interval_ms {
        let pos = spawn_point(player.pos, field, gp.min_spawn_distance, rng);
        let props = balloon_properties(counters.defeated);
        debug!("spawning {:?} balloon at ({:.0}, {:.0})", props.tier, pos.x, pos.y);
        balloons.push(new_balloon(props.tier, pos));
        last_spawn_ms = clock_ms;
        spawn_interval_ms *= gp.spawn_decay;
    }

    // ── 3. Balloons chase the player ─────────────────────────────────────────
    let speed_factor = if counters.score >= FRENZY_SCORE { 2.0 } else { 1.0 };
    for balloon in &mut balloons {
        if let Some(dir) = aim_direction(balloon.pos, player.pos) {
            balloon.pos += dir * balloon.speed * speed_factor;
        }
    }

    // ── 4. Power-up pickup ───────────────────────────────────────────────────
    let (taken, mut power_ups): (Vec<PowerUp>, Vec<PowerUp>) = state
        .power_ups
        .iter()
        .cloned()
        .partition(|p| circles_overlap(player.pos, player.size, p.pos, p.size));
    for power_up in &taken {
        debug!("picked up {:?}", power_up.kind);
        counters.upgrades |= match power_up.kind {
            PowerUpKind::BackwardsShooting => Upgrades::BACKWARDS,
            PowerUpKind::ExtraBullets => Upgrades::SPREAD_SHOT,
        };
    }

    // ── 5. Age explosions ────────────────────────────────────────────────────
    let mut explosions: Vec<Explosion> = state
        .explosions
        .iter()
        .filter(|e| e.frame + 1 < EXPLOSION_FRAMES)
        .map(|e| Explosion {
            frame: e.frame + 1,
            ..e.clone()
        })
        .collect();

    // ── 6. Collisions ────────────────────────────────────────────────────────
    let mut status = GameStatus::Playing;
    let mut destroyed = 0;

    if !state.invincible {
        let mut survivors = Vec::with_capacity(balloons.len());
        for balloon in balloons {
            let touching = circles_overlap(player.pos, player.size, balloon.pos, balloon.size);
            if status == GameStatus::Playing && touching {
                counters.lives = counters.lives.saturating_sub(1);
                counters.defeated += 1;
                destroyed += 1;
                if counters.lives == 0 {
                    status = GameStatus::GameOver;
                }
            } else {
                survivors.push(balloon);
            }
        }
        balloons = survivors;
    }

    let (popped, mut children) = shoot_balloons(&mut bullets, &mut balloons, &mut explosions);
    counters.defeated += popped;
    destroyed += popped;
    balloons.append(&mut children);

    let mut boss = state.boss.clone();
    if let Some(mut target) = boss.take() {
        bullets.retain(|b| {
            if target.hits < target.health && circles_overlap(b.pos, b.size, target.pos, target.size) {
                target.hits += 1;
                false
            } else {
                true
            }
        });
        if target.hits >= target.health {
            counters.bosses_defeated += 1;
            info!("boss defeated ({} total)", counters.bosses_defeated);
            explosions.push(Explosion {
                pos: target.pos,
                frame: 0,
            });
            if !counters.boss_drop_given {
                power_ups.push(PowerUp {
                    pos: random_point(field, rng),
                    size: POWER_UP_SIZE,
                    kind: PowerUpKind::BackwardsShooting,
                });
                counters.boss_drop_given = true;
            }
        } else {
            boss = Some(target);
        }
    }

    counters.score += destroyed;

    // ── 7. Boss schedule ─────────────────────────────────────────────────────
    if !counters.boss_spawned
        && counters.boss_warning_until.is_none()
        && counters.defeated + 1 >= gp.boss_kill_threshold
    {
        info!("boss announced at {} kills", counters.defeated);
        counters.boss_warning_until = Some(clock_ms + gp.boss_warning_ms);
    }

    if counters.boss_warning_until.is_some_and(|until| clock_ms >= until) {
        let arrived = Boss {
            pos: Vec2::new(field.x / 2.0, gp.boss_y),
            size: gp.boss_size,
            hits: 0,
            health: gp.boss_health,
        };
        info!("boss spawned with {} health", arrived.health);
        let kind = if rng.gen_bool(0.5) {
            PowerUpKind::BackwardsShooting
        } else {
            PowerUpKind::ExtraBullets
        };
        power_ups.push(PowerUp {
            pos: arrived.pos + Vec2::new(0.0, arrived.size),
            size: POWER_UP_SIZE,
            kind,
        });
        boss = Some(arrived);
        counters.boss_spawned = true;
        counters.boss_warning_until = None;
    }

    let mut last_power_up_ms = state.last_power_up_ms;
    if let Some(b) = boss.as_mut() {
        b.pos.x = player.pos.x;
        if clock_ms - last_power_up_ms > gp.power_up_interval_ms {
            power_ups.push(PowerUp {
                pos: random_point(field, rng),
                size: POWER_UP_SIZE,
                kind: PowerUpKind::BackwardsShooting,
            });
            last_power_up_ms = clock_ms;
        }
    }

    // ── 8. Score unlocks ─────────────────────────────────────────────────────
    if counters.score >= FRENZY_SCORE {
        counters.upgrades |= Upgrades::SPREAD_SHOT;
    }

    if status == GameStatus::GameOver {
        info!(
            "game over: score {}, kills {}, bosses {}",
            counters.score, counters.defeated, counters.bosses_defeated
        );
    }

    GameState {
        balloons,
        bullets,
        power_ups,
        explosions,
        boss,
        counters,
        status,
        clock_ms,
        frame: state.frame + 1,
        spawn_interval_ms,
        last_spawn_ms,
        last_power_up_ms,
        ..state.clone()
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Each bullet hits at most one live balloon: the first it overlaps.
/// Returns the number of balloons popped and the children they released.
fn shoot_balloons(
    bullets: &mut Vec<Bullet>,
    balloons: &mut Vec<Balloon>,
    explosions: &mut Vec<Explosion>,
) -> (u32, Vec<Balloon>) {
    let mut popped = 0;
    let mut children = Vec::new();

    bullets.retain(|bullet| {
        let hit = balloons.iter_mut().find(|b| {
            b.hits < b.health && circles_overlap(bullet.pos, bullet.size, b.pos, b.size)
        });
        let Some(balloon) = hit else {
            return true;
        };
        balloon.hits += 1;
        if balloon.hits >= balloon.health {
            popped += 1;
            explosions.push(Explosion {
                pos: balloon.pos,
                frame: 0,
            });
            if let Some(child) = balloon.child {
                debug!("{:?} balloon split into two {:?}", balloon.tier, child);
                children.push(new_balloon(child, balloon.pos));
                children.push(new_balloon(child, balloon.pos));
            }
        }
        false
    });

    balloons.retain(|b| b.hits < b.health);
    (popped, children)
}

fn random_point(field: Vec2, rng: &mut impl Rng) -> Vec2 {
    Vec2::new(rng.gen::<f32>() * field.x, rng.gen::<f32>() * field.y)
}

/// A random field point at least `min_distance` from the player. Gives up
/// after a bounded number of draws when the field is too small to comply.
fn spawn_point(player: Vec2, field: Vec2, min_distance: f32, rng: &mut impl Rng) -> Vec2 {
    let mut point = random_point(field, rng);
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        if point.distance(player) >= min_distance {
            break;
        }
        point = random_point(field, rng);
    }
    point
}
