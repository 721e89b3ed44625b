//! Combat module: общее для игрока и врагов
//!
//! ECS ответственность:
//! - Combatant capability (attack / attack_end / handle_damage)
//! - Directional hit react (чистая функция)
//! - Weapon: сокеты и weapon box (ColliderDisabled по notify)
//! - Events: DamageReceived, HitReceived, PlayAnimation, PlayEffect, AgentDied
//!
//! Движок (или HeadlessWorldPlugin) ответственность:
//! - AnimationPlayer: проигрывает PlayAnimation, отвечает AnimationFinished/Notify
//! - collision: weapon box overlap → DamageReceived + HitReceived
//!
//! Реакция на события: в AIPlugin / PlayerPlugin (там конкретные Combatant).

use bevy::prelude::*;

pub mod animation;
pub mod combatant;
pub mod damage;
pub mod hit_react;
pub mod weapon;

// Re-export основных типов
pub use animation::{
    AnimNotify, AnimationClip, AnimationFinished, AnimationNotify, AnimationRequest, PlayAnimation,
    ATTACK_SECTIONS, EQUIP_SECTION, UNEQUIP_SECTION,
};
pub use combatant::{react_to_hits, Combatant};
pub use damage::{AgentDied, DamageReceived, Dead, HitReceived, PlayEffect};
pub use hit_react::{hit_angle_degrees, hit_react_direction, HitDirection};
pub use weapon::{
    despawn_held_weapons, handle_weapon_notifies, held_weapon_bundle, weapon_bundle, Weapon, WeaponSocket,
};

/// Combat Plugin
///
/// Регистрирует события и weapon notifies (SimulationSet::Combat).
/// Системы урона/попаданий параметризованы конкретным Combatant и живут
/// в AIPlugin / PlayerPlugin.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageReceived>()
            .add_event::<HitReceived>()
            .add_event::<PlayEffect>()
            .add_event::<AgentDied>()
            .add_event::<PlayAnimation>()
            .add_event::<AnimationFinished>()
            .add_event::<AnimationNotify>()
            .register_type::<Weapon>();

        app.add_systems(
            FixedUpdate,
            handle_weapon_notifies.in_set(crate::SimulationSet::Combat),
        );
    }
}
