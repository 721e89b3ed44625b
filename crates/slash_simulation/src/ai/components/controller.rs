//! EnemyController: behavior FSM врага
//!
//! Компонент держит состояние и слоты таймеров, но сам ничего не пишет в ECS:
//! каждый метод получает EnemyContext (senses + таймеры + RNG) и складывает
//! команды в EnemyEffects. Системы применяют effects к компонентам и событиям.
//!
//! Переходы:
//! - Patrolling → Chasing: pawn seen / урон / цель в combat radius
//! - Chasing → Attacking: цель в attack radius (взведён attack таймер)
//! - Attacking → Engaged: таймер сработал, удар в полёте
//! - Engaged → NoState → (пересчёт): attack клип доиграл
//! - * → Dead: здоровье кончилось (terminal)

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::fsm::{DeathPose, EnemyConfig, EnemyState, DEATH_POSES};
use crate::ai::events::{fire_enemy_timer, EnemyTimer};
use crate::ai::patrol::PatrolRoute;
use crate::combat::{despawn_held_weapons, AnimationClip, AnimationRequest, Combatant};
use crate::components::{Actor, Attributes, HealthBar, MovementCommand, MovementSpeed};
use crate::timer::{TimerService, TimerSlot};

/// Что враг "видит" в момент вызова (считают системы по Transform)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Senses {
    /// До цели. None: цели нет, она despawned или мертва
    pub target_distance: Option<f32>,
    /// До текущего waypoint. None: waypoint'а нет
    pub waypoint_distance: Option<f32>,
}

/// Смерть для AgentDied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathReport {
    pub pose: DeathPose,
    pub killer: Option<Entity>,
}

/// Команды коллабораторам, накопленные за вызов
///
/// `None` = не трогать компонент.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnemyEffects {
    pub navigation: Option<MovementCommand>,
    pub speed: Option<f32>,
    pub health_bar_visible: Option<bool>,
    pub health_percent: Option<f32>,
    pub animations: Vec<AnimationRequest>,
    pub death: Option<DeathReport>,
}

pub struct EnemyContext<'a> {
    pub entity: Entity,
    pub config: &'a EnemyConfig,
    pub senses: Senses,
    pub timers: &'a mut TimerService,
    pub rng: &'a mut ChaCha8Rng,
    pub effects: EnemyEffects,
}

impl<'a> EnemyContext<'a> {
    pub fn new(
        entity: Entity,
        config: &'a EnemyConfig,
        senses: Senses,
        timers: &'a mut TimerService,
        rng: &'a mut ChaCha8Rng,
    ) -> Self {
        Self {
            entity,
            config,
            senses,
            timers,
            rng,
            effects: EnemyEffects::default(),
        }
    }
}

/// Враг: FSM + цель + маршрут + таймеры
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Actor, EnemyConfig, HealthBar, MovementCommand, MovementSpeed)]
pub struct EnemyController {
    state: EnemyState,
    combat_target: Option<Entity>,
    route: PatrolRoute,
    patrol_timer: TimerSlot,
    attack_timer: TimerSlot,
    death_pose: DeathPose,
}

fn in_range(distance: Option<f32>, radius: f32) -> bool {
    distance.is_some_and(|distance| distance <= radius)
}

fn random_duration(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    rng.gen_range(low..=high)
}

impl EnemyController {
    pub fn new(route: PatrolRoute) -> Self {
        Self {
            route,
            ..Default::default()
        }
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn combat_target(&self) -> Option<Entity> {
        self.combat_target
    }

    pub fn patrol_target(&self) -> Option<Entity> {
        self.route.current()
    }

    pub fn route(&self) -> &PatrolRoute {
        &self.route
    }

    pub fn death_pose(&self) -> DeathPose {
        self.death_pose
    }

    pub fn is_patrol_wait_pending(&self, timers: &TimerService) -> bool {
        self.patrol_timer.is_armed(timers)
    }

    pub fn is_attack_pending(&self, timers: &TimerService) -> bool {
        self.attack_timer.is_armed(timers)
    }

    /// Можно ли взвести атаку: цель в attack radius и не атакуем/не мертвы
    pub fn can_attack(&self, target_distance: Option<f32>, config: &EnemyConfig) -> bool {
        in_range(target_distance, config.attack_radius)
            && !matches!(
                self.state,
                EnemyState::Attacking | EnemyState::Engaged | EnemyState::Dead
            )
    }

    /// Спавн: health bar скрыт, патруль стартует после короткой задержки
    pub fn begin(&mut self, ctx: &mut EnemyContext) {
        ctx.effects.health_bar_visible = Some(false);
        ctx.effects.speed = Some(ctx.config.patrolling_speed);
        self.patrol_timer.arm(
            ctx.timers,
            ctx.config.start_patrol_delay,
            fire_enemy_timer(ctx.entity, EnemyTimer::PatrolWait),
        );
    }

    /// Тик FSM (каждый FixedUpdate)
    pub fn tick(&mut self, ctx: &mut EnemyContext) {
        if self.is_dead() {
            return;
        }

        if self.state > EnemyState::Patrolling {
            self.check_combat_target(ctx);
        } else {
            self.check_patrol_target(ctx);
        }
    }

    pub fn check_combat_target(&mut self, ctx: &mut EnemyContext) {
        let distance = self.combat_target.and(ctx.senses.target_distance);

        if !in_range(distance, ctx.config.combat_radius) {
            self.attack_timer.clear(ctx.timers);
            self.lose_interest(ctx);
            if self.state != EnemyState::Engaged {
                self.start_patrolling(ctx);
            }
        } else if !in_range(distance, ctx.config.attack_radius) && self.state != EnemyState::Chasing {
            self.attack_timer.clear(ctx.timers);
            if self.state != EnemyState::Engaged {
                self.chase_target(ctx);
            }
        } else if self.can_attack(distance, ctx.config) {
            self.start_attack_timer(ctx);
        }
    }

    /// Пришли на waypoint → выбрать следующий и подождать
    pub fn check_patrol_target(&mut self, ctx: &mut EnemyContext) {
        if self.patrol_timer.is_armed(ctx.timers) {
            return;
        }
        if !in_range(ctx.senses.waypoint_distance, ctx.config.patrol_radius) {
            return;
        }

        let previous = self.route.current();
        let next = self.route.advance(ctx.rng);
        let wait = random_duration(ctx.rng, ctx.config.patrol_wait_min, ctx.config.patrol_wait_max);

        self.patrol_timer.arm(
            ctx.timers,
            wait,
            fire_enemy_timer(ctx.entity, EnemyTimer::PatrolWait),
        );

        crate::log(&format!(
            "🚶 {:?} reached waypoint {:?}, next {:?} in {:.2}s",
            ctx.entity, previous, next, wait
        ));
    }

    /// Patrol wait истёк: идём к (возможно новому) waypoint
    pub fn patrol_timer_finished(&mut self, ctx: &mut EnemyContext) {
        // Погоня/бой/смерть важнее запоздавшего таймера
        if self.state > EnemyState::Patrolling {
            return;
        }
        self.move_to(self.route.current(), ctx);
    }

    /// Attack таймер сработал
    pub fn attack_timer_finished(&mut self, ctx: &mut EnemyContext) {
        Combatant::attack(self, ctx);
    }

    /// Perception: pawn в поле зрения. true: начали преследование
    pub fn pawn_seen(&mut self, pawn: Entity, engageable: bool, ctx: &mut EnemyContext) -> bool {
        let should_chase = self.state != EnemyState::Dead
            && self.state != EnemyState::Chasing
            && self.state < EnemyState::Attacking
            && engageable;
        if !should_chase {
            return false;
        }

        self.combat_target = Some(pawn);
        self.patrol_timer.clear(ctx.timers);
        self.chase_target(ctx);
        true
    }

    fn start_attack_timer(&mut self, ctx: &mut EnemyContext) {
        self.state = EnemyState::Attacking;
        let delay = random_duration(ctx.rng, ctx.config.attack_min, ctx.config.attack_max);
        self.attack_timer.arm(
            ctx.timers,
            delay,
            fire_enemy_timer(ctx.entity, EnemyTimer::Attack),
        );

        crate::log(&format!(
            "⚔️ {:?} Attacking {:?} (swing in {:.2}s)",
            ctx.entity, self.combat_target, delay
        ));
    }

    fn chase_target(&mut self, ctx: &mut EnemyContext) {
        self.state = EnemyState::Chasing;
        self.patrol_timer.clear(ctx.timers);
        ctx.effects.speed = Some(ctx.config.chasing_speed);
        self.move_to(self.combat_target, ctx);

        crate::log(&format!("🏃 {:?} → Chasing {:?}", ctx.entity, self.combat_target));
    }

    fn start_patrolling(&mut self, ctx: &mut EnemyContext) {
        self.state = EnemyState::Patrolling;
        ctx.effects.speed = Some(ctx.config.patrolling_speed);
        self.move_to(self.route.current(), ctx);

        crate::log(&format!("🚶 {:?} → Patrolling {:?}", ctx.entity, self.route.current()));
    }

    fn lose_interest(&mut self, ctx: &mut EnemyContext) {
        self.combat_target = None;
        ctx.effects.health_bar_visible = Some(false);
    }

    fn move_to(&self, target: Option<Entity>, ctx: &mut EnemyContext) {
        let Some(target) = target else {
            return;
        };
        ctx.effects.navigation = Some(MovementCommand::FollowEntity {
            target,
            acceptance_radius: ctx.config.acceptance_radius,
        });
    }

    fn die(&mut self, killer: Option<Entity>, ctx: &mut EnemyContext) {
        self.state = EnemyState::Dead;
        self.attack_timer.clear(ctx.timers);
        self.patrol_timer.clear(ctx.timers);

        ctx.effects.navigation = Some(MovementCommand::Stop);
        ctx.effects.health_bar_visible = Some(false);

        let pose = DEATH_POSES.choose(ctx.rng).copied().unwrap_or(DeathPose::Death1);
        self.death_pose = pose;
        ctx.effects
            .animations
            .push(AnimationRequest::new(AnimationClip::Death, pose.section()));

        let enemy = ctx.entity;
        ctx.timers.schedule(ctx.config.death_lifespan, move |world: &mut World| {
            if let Ok(entity) = world.get_entity_mut(enemy) {
                entity.despawn();
                despawn_held_weapons(world, enemy);
                crate::log(&format!("🪦 {:?} body removed", enemy));
            }
        });

        ctx.effects.death = Some(DeathReport { pose, killer });
        crate::log_info(&format!("💀 {:?} died ({:?}), killer {:?}", enemy, pose, killer));
    }
}

impl Combatant for EnemyController {
    type Context<'c> = EnemyContext<'c>;

    /// Удар: только если взведён Attacking (иначе таймер устарел)
    fn attack(&mut self, ctx: &mut EnemyContext<'_>) -> bool {
        if self.state != EnemyState::Attacking {
            return false;
        }

        self.state = EnemyState::Engaged;
        ctx.effects.animations.push(AnimationRequest::random_attack(ctx.rng));
        crate::log(&format!("🗡️ {:?} Engaged {:?}", ctx.entity, self.combat_target));
        true
    }

    /// Удар закончился: сразу решаем, что дальше
    fn attack_end(&mut self, ctx: &mut EnemyContext<'_>) {
        if self.is_dead() {
            return;
        }
        self.state = EnemyState::NoState;
        self.check_combat_target(ctx);
    }

    /// Урон: health, health bar, смерть или retarget на instigator
    ///
    /// Engaged не сбивается уроном: цель меняется, но удар доигрывает,
    /// attack_end пересчитает состояние уже по новой цели.
    fn handle_damage(
        &mut self,
        amount: f32,
        instigator: Option<Entity>,
        attributes: &mut Attributes,
        ctx: &mut EnemyContext<'_>,
    ) {
        if self.is_dead() {
            return;
        }

        ctx.effects.health_percent = Some(attributes.receive_damage(amount));

        if !attributes.is_alive() {
            self.die(instigator, ctx);
            return;
        }

        let Some(instigator) = instigator else {
            return;
        };
        self.combat_target = Some(instigator);

        if self.state == EnemyState::Engaged {
            return;
        }
        self.attack_timer.clear(ctx.timers);
        self.chase_target(ctx);
    }

    fn is_dead(&self) -> bool {
        self.state == EnemyState::Dead
    }

    fn reacts_to_hits(&self) -> bool {
        true
    }

    fn shows_health_bar(&self) -> bool {
        true
    }
}
