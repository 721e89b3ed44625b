//! AI decision-making module
//!
//! Enemy behavior FSM: patrol → chase → attack → engaged → dead.
//! Логика: в EnemyController (components), ECS glue: в systems.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod patrol;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use events::{fire_enemy_timer, EnemyTimer, EnemyTimerFired, PawnSeen};
pub use patrol::{choose_patrol_target, PatrolRoute};
pub use systems::*;

use crate::combat::react_to_hits;
use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения (SimulationSet::Ai):
/// 1. arm_spawned_enemies + begin_enemy_behavior: новые враги (меч, health bar, старт патруля)
/// 2. apply_damage_to_enemies: DamageReceived
/// 3. react_to_hits::<EnemyController>: HitReceived (health bar, hit react, эффекты)
/// 4. handle_pawn_seen: perception
/// 5. handle_enemy_timers: patrol wait / attack
/// 6. handle_enemy_animation_finished: attack_end
/// 7. enemy_behavior_tick: per-tick evaluation
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PawnSeen>()
            .add_event::<EnemyTimerFired>()
            .register_type::<EnemyController>()
            .register_type::<EnemyConfig>();

        app.add_systems(
            FixedUpdate,
            (
                arm_spawned_enemies,
                begin_enemy_behavior,
                apply_damage_to_enemies,
                react_to_hits::<EnemyController>,
                handle_pawn_seen,
                handle_enemy_timers,
                handle_enemy_animation_finished,
                enemy_behavior_tick,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Ai),
        );
    }
}
