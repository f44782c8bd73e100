//! Simulation constants and tuning parameters.

// --- World ---

/// World units per grid tile.
pub const TILE_SIZE: f64 = 2.0;

/// Height at which towers sit.
pub const TOWER_HEIGHT: f64 = 0.5;

/// Height at which enemies travel.
pub const ENEMY_HEIGHT: f64 = 1.0;

// --- Match ---

pub const STARTING_MONEY: u32 = 150;
pub const STARTING_LIVES: u32 = 20;
pub const STARTING_WAVE: u32 = 1;

/// Maximum time scale accepted by `SetTimeScale`.
pub const MAX_TIME_SCALE: f64 = 4.0;

// --- Tower scaling per level above 1 ---

pub const TOWER_DAMAGE_PER_LEVEL: f64 = 0.25;
pub const TOWER_RANGE_PER_LEVEL: f64 = 0.10;
pub const TOWER_COOLDOWN_REDUCTION_PER_LEVEL: f64 = 0.05;
/// Cooldown never drops below this, whatever the level.
pub const TOWER_MIN_COOLDOWN: f64 = 0.1;
/// Upgrade cost base: cost(L) = floor(base_cost * UPGRADE_COST_GROWTH^L).
pub const UPGRADE_COST_GROWTH: f64 = 1.5;
/// Fraction of the base cost refunded on sell.
pub const SELL_REFUND_FRACTION: f64 = 0.7;

// --- Enemy scaling per wave above 1 ---

pub const ENEMY_HP_PER_WAVE: f64 = 0.4;
pub const ENEMY_REWARD_PER_WAVE: f64 = 2.0;

// --- Wave director ---

pub const SPAWN_INTERVAL_BASE: f64 = 2.5;
pub const SPAWN_INTERVAL_DECAY_PER_WAVE: f64 = 0.15;
pub const SPAWN_INTERVAL_MIN: f64 = 0.5;

/// Draw thresholds; later checks override earlier ones.
pub const FAST_MIN_WAVE: u32 = 2;
pub const FAST_THRESHOLD: f64 = 0.70;
pub const TANK_MIN_WAVE: u32 = 4;
pub const TANK_THRESHOLD: f64 = 0.85;
pub const BOSS_WAVE_MULTIPLE: u32 = 5;
pub const BOSS_THRESHOLD: f64 = 0.95;

/// Enemies per wave: WAVE_SIZE_BASE + floor(WAVE_SIZE_PER_WAVE * wave).
pub const WAVE_SIZE_BASE: u32 = 5;
pub const WAVE_SIZE_PER_WAVE: f64 = 1.5;

// --- Abilities ---

/// Range of the randomized initial ability cooldown (seconds).
pub const ABILITY_INITIAL_COOLDOWN_MIN: f64 = 2.0;
pub const ABILITY_INITIAL_COOLDOWN_MAX: f64 = 5.0;

pub const DASH_DURATION: f64 = 0.5;
pub const DASH_COOLDOWN: f64 = 4.0;
pub const DASH_SPEED_MULTIPLIER: f64 = 3.0;

// --- Projectiles ---

/// Flight progress gained per second (a full flight takes 1/3 s).
pub const PROJECTILE_FLIGHT_RATE: f64 = 3.0;
/// Nominal travel speed carried on every projectile for display.
pub const PROJECTILE_SPEED: f64 = 20.0;
/// Projectiles leave the tower this far above its base.
pub const PROJECTILE_ORIGIN_OFFSET: f64 = 1.5;

// --- Effects ---

pub const EXPLOSION_DURATION: f64 = 0.8;
/// Effect scale used for enemy kinds without an explicit scale.
pub const DEFAULT_EFFECT_SCALE: f64 = 0.4;

// --- Built-in maps (0 Grass, 1 Path, 2 Spawn, 3 Base, 4 Obstacle) ---

pub const MAP_WIDTH: usize = 12;
pub const MAP_HEIGHT: usize = 8;

pub type RawLayout = [[u8; MAP_WIDTH]; MAP_HEIGHT];

pub const MAP_1: RawLayout = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [2, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 0],
    [0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 1, 0],
    [0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 1, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];

pub const MAP_2: RawLayout = [
    [2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0],
    [0, 0, 1, 1, 1, 1, 0, 0, 1, 1, 1, 0],
    [0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0],
    [0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 1, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 3, 0],
];

pub const MAP_3: RawLayout = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0],
    [0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0],
    [0, 1, 0, 1, 1, 1, 1, 0, 0, 1, 0, 0],
    [0, 1, 0, 3, 0, 0, 1, 0, 0, 1, 0, 0],
    [0, 1, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0],
    [2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];

pub const MAP_LAYOUTS: [&RawLayout; 3] = [&MAP_1, &MAP_2, &MAP_3];
