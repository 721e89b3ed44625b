//! Мост между EnemyController и ECS
//!
//! - EnemySenses: дистанции до цели/waypoint (с проверкой liveness)
//! - EnemySinks: применение EnemyEffects к компонентам и событиям
//! - drive_enemy: собрать контекст → шаг FSM → применить effects

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::ColliderDisabled;
use rand_chacha::ChaCha8Rng;

use crate::ai::components::{EnemyConfig, EnemyContext, EnemyController, EnemyEffects, Senses};
use crate::combat::{AgentDied, Dead, PlayAnimation};
use crate::components::{Attributes, HealthBar, MovementCommand, MovementSpeed};
use crate::timer::TimerService;

/// Query data врага, общая для всех AI систем
pub type EnemyItems = (
    Entity,
    &'static mut EnemyController,
    &'static EnemyConfig,
    &'static Transform,
    &'static mut MovementCommand,
    &'static mut MovementSpeed,
    &'static mut HealthBar,
);

/// Один элемент EnemyItems (после get_mut / iter_mut)
pub type EnemyItem<'a> = (
    Entity,
    Mut<'a, EnemyController>,
    &'a EnemyConfig,
    &'a Transform,
    Mut<'a, MovementCommand>,
    Mut<'a, MovementSpeed>,
    Mut<'a, HealthBar>,
);

/// Чтение мира для Senses
#[derive(SystemParam)]
pub struct EnemySenses<'w, 's> {
    transforms: Query<'w, 's, &'static Transform>,
    attributes: Query<'w, 's, &'static Attributes>,
}

impl EnemySenses<'_, '_> {
    pub fn sense(&self, position: Vec3, controller: &EnemyController) -> Senses {
        Senses {
            target_distance: controller
                .combat_target()
                .and_then(|target| self.distance_to_live(position, target)),
            waypoint_distance: controller
                .patrol_target()
                .and_then(|waypoint| self.distance(position, waypoint)),
        }
    }

    fn distance(&self, position: Vec3, entity: Entity) -> Option<f32> {
        let transform = self.transforms.get(entity).ok()?;
        Some(transform.translation.distance(position))
    }

    /// Stale цель (despawned или мёртвая): None, как "вне combat radius"
    fn distance_to_live(&self, position: Vec3, entity: Entity) -> Option<f32> {
        if let Ok(attributes) = self.attributes.get(entity) {
            if !attributes.is_alive() {
                return None;
            }
        }
        self.distance(position, entity)
    }
}

/// Запись effects: компоненты через Mut, остальное: events и Commands
#[derive(SystemParam)]
pub struct EnemySinks<'w, 's> {
    commands: Commands<'w, 's>,
    animations: EventWriter<'w, PlayAnimation>,
    deaths: EventWriter<'w, AgentDied>,
}

impl EnemySinks<'_, '_> {
    pub fn apply(
        &mut self,
        entity: Entity,
        effects: EnemyEffects,
        mut command: Mut<MovementCommand>,
        mut speed: Mut<MovementSpeed>,
        mut health_bar: Mut<HealthBar>,
    ) {
        // Пишем только то, что FSM реально меняла (change detection для UI/навигатора)
        if let Some(navigation) = effects.navigation {
            *command = navigation;
        }
        if let Some(value) = effects.speed {
            speed.speed = value;
        }
        if let Some(visible) = effects.health_bar_visible {
            health_bar.visible = visible;
        }
        if let Some(percent) = effects.health_percent {
            health_bar.percent = percent;
        }

        for request in effects.animations {
            self.animations.write(request.into_event(entity));
        }

        if let Some(death) = effects.death {
            if let Ok(mut entity_commands) = self.commands.get_entity(entity) {
                entity_commands.insert((Dead, ColliderDisabled));
            }
            self.deaths.write(AgentDied {
                entity,
                killer: death.killer,
                pose: death.pose,
            });
        }
    }
}

/// Шаг FSM для одного врага
///
/// `senses: None`: шаг не смотрит на дистанции (урон).
pub fn drive_enemy(
    item: EnemyItem,
    senses: Option<&EnemySenses>,
    timers: &mut TimerService,
    rng: &mut ChaCha8Rng,
    sinks: &mut EnemySinks,
    step: impl FnOnce(&mut EnemyController, &mut EnemyContext),
) {
    let (entity, mut controller, config, transform, command, speed, health_bar) = item;

    let senses = senses
        .map(|senses| senses.sense(transform.translation, &controller))
        .unwrap_or_default();

    let mut ctx = EnemyContext::new(entity, config, senses, timers, rng);
    step(&mut *controller, &mut ctx);

    sinks.apply(entity, ctx.effects, command, speed, health_bar);
}
