//! FSM AI systems (спавн, tick, таймеры, конец анимации).

use bevy::prelude::*;

use super::sinks::{drive_enemy, EnemyItems, EnemySenses, EnemySinks};
use crate::ai::events::{EnemyTimer, EnemyTimerFired};
use crate::ai::components::{EnemyConfig, EnemyController};
use crate::combat::{held_weapon_bundle, AnimationClip, AnimationFinished, Combatant, Dead, WeaponSocket};
use crate::timer::TimerService;
use crate::DeterministicRng;

/// Система: новый враг с `armed`: меч в RightHandSocket
///
/// Меч живёт, пока жив владелец (удаляется вместе с телом).
pub fn arm_spawned_enemies(
    mut commands: Commands,
    enemies: Query<(Entity, &EnemyConfig, &Transform), Added<EnemyController>>,
) {
    for (enemy, config, transform) in enemies.iter() {
        if !config.armed {
            continue;
        }

        let weapon = commands
            .spawn(held_weapon_bundle(enemy, WeaponSocket::RightHand, transform.translation))
            .id();
        crate::log(&format!("🗡️ Enemy {:?} armed with {:?}", enemy, weapon));
    }
}

/// Система: новый враг: скрыть health bar, запланировать старт патруля
pub fn begin_enemy_behavior(
    mut enemies: Query<EnemyItems, Added<EnemyController>>,
    mut timers: ResMut<TimerService>,
    mut rng: ResMut<DeterministicRng>,
    mut sinks: EnemySinks,
) {
    for item in enemies.iter_mut() {
        crate::log(&format!("👹 Enemy {:?} spawned, patrol route {:?}", item.0, item.1.route().waypoints()));
        drive_enemy(item, None, &mut timers, &mut rng.rng, &mut sinks, |controller, ctx| {
            controller.begin(ctx)
        });
    }
}

/// Система: EnemyTimerFired → patrol wait / attack
pub fn handle_enemy_timers(
    mut fired: EventReader<EnemyTimerFired>,
    mut enemies: Query<EnemyItems>,
    senses: EnemySenses,
    mut timers: ResMut<TimerService>,
    mut rng: ResMut<DeterministicRng>,
    mut sinks: EnemySinks,
) {
    for event in fired.read() {
        // Враг мог быть удалён раньше, чем таймер отменили
        let Ok(item) = enemies.get_mut(event.enemy) else {
            continue;
        };

        drive_enemy(item, Some(&senses), &mut timers, &mut rng.rng, &mut sinks, |controller, ctx| {
            match event.timer {
                EnemyTimer::PatrolWait => controller.patrol_timer_finished(ctx),
                EnemyTimer::Attack => controller.attack_timer_finished(ctx),
            }
        });
    }
}

/// Система: attack клип доиграл → attack_end (немедленный пересчёт)
pub fn handle_enemy_animation_finished(
    mut finished: EventReader<AnimationFinished>,
    mut enemies: Query<EnemyItems>,
    senses: EnemySenses,
    mut timers: ResMut<TimerService>,
    mut rng: ResMut<DeterministicRng>,
    mut sinks: EnemySinks,
) {
    for event in finished.read() {
        if event.clip != AnimationClip::Attack {
            continue;
        }
        let Ok(item) = enemies.get_mut(event.entity) else {
            continue;
        };

        drive_enemy(item, Some(&senses), &mut timers, &mut rng.rng, &mut sinks, |controller, ctx| {
            controller.attack_end(ctx)
        });
    }
}

/// Система: per-tick evaluation FSM
///
/// Запускается последней в AI фазе: все события этого тика уже применены.
pub fn enemy_behavior_tick(
    mut enemies: Query<EnemyItems, Without<Dead>>,
    senses: EnemySenses,
    mut timers: ResMut<TimerService>,
    mut rng: ResMut<DeterministicRng>,
    mut sinks: EnemySinks,
) {
    for item in enemies.iter_mut() {
        drive_enemy(item, Some(&senses), &mut timers, &mut rng.rng, &mut sinks, |controller, ctx| {
            controller.tick(ctx)
        });
    }
}
