//! Slash Simulation Core
//!
//! ECS-симуляция боевой логики на Bevy 0.16:
//! - enemy behavior FSM (патруль / погоня / атака / смерть)
//! - player action FSM (атака / экипировка)
//!
//! Движок (рендер, NavMesh, анимации, физика) снаружи. Всё что симуляция
//! от него хочет: events и команды на компонентах; headless stand-ins
//! в `headless` закрывают этот контур для бинарника и тестов.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::Collider;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

pub mod ai;
pub mod combat;
pub mod components;
pub mod headless;
pub mod logger;
pub mod player;
pub mod timer;

pub use ai::{AIPlugin, EnemyConfig, EnemyConfigError, EnemyController, EnemyState, PatrolRoute, PawnSeen};
pub use combat::{AgentDied, CombatPlugin, DamageReceived, Dead, HitReceived, Weapon};
pub use components::*;
pub use headless::{HeadlessWorldPlugin, PawnSensing};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel};
pub use player::{ActionState, EquipmentState, PlayerCombatant, PlayerIntent, PlayerPlugin};
pub use timer::{TimerPlugin, TimerService};

/// Порядок внутри FixedUpdate тика
///
/// Timers → Combat → Ai → Player → Headless. Таймеры, сработавшие в тике,
/// видны FSM в том же тике.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Timers,
    Combat,
    Ai,
    Player,
    Headless,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Headless stand-ins не включены: движковый слой подставляет свои.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .insert_resource(DeterministicRng::new(42))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Timers,
                    SimulationSet::Combat,
                    SimulationSet::Ai,
                    SimulationSet::Player,
                    SimulationSet::Headless,
                )
                    .chain(),
            )
            .add_plugins((TimerPlugin, CombatPlugin, AIPlugin, PlayerPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Minimal Bevy App для headless симуляции
///
/// Каждый `app.update()` = ровно один fixed tick (ManualDuration).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins((SimulationPlugin, HeadlessWorldPlugin))
        // После SimulationPlugin: перекрываем дефолтный seed
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 60.0,
        )));

    app
}

/// Enemy со всеми required компонентами + сенсором
///
/// Невалидный конфиг отклоняется до спавна.
pub fn enemy_bundle(
    position: Vec3,
    config: EnemyConfig,
    route: PatrolRoute,
) -> Result<impl Bundle, EnemyConfigError> {
    config.validate()?;

    Ok((
        Name::new("Enemy"),
        EnemyController::new(route),
        MovementSpeed {
            speed: config.patrolling_speed,
        },
        config,
        PawnSensing::default(),
        capsule_hitbox(),
        Transform::from_translation(position),
    ))
}

pub fn player_bundle(position: Vec3) -> impl Bundle {
    (
        Name::new("Player"),
        PlayerCombatant::default(),
        capsule_hitbox(),
        Transform::from_translation(position),
    )
}

/// Капсула персонажа (~180 см). При смерти врага выключается через ColliderDisabled
pub fn capsule_hitbox() -> Collider {
    Collider::capsule_y(56.0, 34.0)
}

/// Waypoint: просто точка с Transform
pub fn waypoint_bundle(position: Vec3) -> impl Bundle {
    (Name::new("Waypoint"), Transform::from_translation(position))
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
