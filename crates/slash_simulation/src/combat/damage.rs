//! Damage / hit события и маркер смерти
//!
//! Разделение как у движка:
//! - DamageReceived: числовой урон (takeDamage): health, retarget, смерть
//! - HitReceived: физическое попадание (getHit): реакция, звук, частицы
//!
//! Движок шлёт оба события на один удар, сначала DamageReceived.

use bevy::prelude::*;

use crate::ai::DeathPose;

/// Inbound: урон по entity
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageReceived {
    pub target: Entity,
    pub amount: f32,
    /// Кто нанёс урон (None: окружение, ловушки)
    pub instigator: Option<Entity>,
}

/// Inbound: попадание в точку (world space)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct HitReceived {
    pub target: Entity,
    pub impact_point: Vec3,
}

/// Outbound: запрос эффекта (EffectsPlayer)
#[derive(Event, Debug, Clone, PartialEq)]
pub enum PlayEffect {
    HitSound { location: Vec3 },
    HitParticles { location: Vec3 },
}

/// Outbound: агент умер (один раз на entity)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AgentDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
    pub pose: DeathPose,
}

/// Компонент-маркер: entity мертв
///
/// Навигатор и AI тики пропускают entity с этим маркером.
/// Удаление трупа: через таймер death_lifespan, не здесь.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;
