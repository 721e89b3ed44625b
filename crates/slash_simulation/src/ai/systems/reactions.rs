//! AI reaction systems (урон, perception).

use bevy::prelude::*;

use super::sinks::{drive_enemy, EnemyItems, EnemySenses, EnemySinks};
use crate::ai::components::EnemyController;
use crate::ai::events::PawnSeen;
use crate::combat::{Combatant, DamageReceived};
use crate::components::{Attributes, EngageableTarget};
use crate::timer::TimerService;
use crate::DeterministicRng;

/// System: DamageReceived → handle_damage врага
///
/// Урон всегда перехватывает цель на instigator (кроме Engaged lock и смерти).
/// Attributes мутируются только здесь.
pub fn apply_damage_to_enemies(
    mut damage_events: EventReader<DamageReceived>,
    mut enemies: Query<EnemyItems>,
    mut attributes: Query<&mut Attributes, With<EnemyController>>,
    mut timers: ResMut<TimerService>,
    mut rng: ResMut<DeterministicRng>,
    mut sinks: EnemySinks,
) {
    for damage in damage_events.read() {
        let Ok(item) = enemies.get_mut(damage.target) else {
            continue;
        };
        let Ok(mut target_attributes) = attributes.get_mut(damage.target) else {
            continue;
        };

        crate::log(&format!(
            "🩸 {:?} takes {:.1} damage from {:?}",
            damage.target, damage.amount, damage.instigator
        ));

        drive_enemy(item, None, &mut timers, &mut rng.rng, &mut sinks, |controller, ctx| {
            controller.handle_damage(damage.amount, damage.instigator, &mut target_attributes, ctx)
        });
    }
}

/// System: PawnSeen → начать погоню
///
/// Engageable = несёт EngageableTarget и жив. Мёртвого игрока видно,
/// но гоняться за ним смысла нет (иначе chase → lose interest по кругу).
pub fn handle_pawn_seen(
    mut seen_events: EventReader<PawnSeen>,
    mut enemies: Query<EnemyItems>,
    engageable: Query<&Attributes, With<EngageableTarget>>,
    senses: EnemySenses,
    mut timers: ResMut<TimerService>,
    mut rng: ResMut<DeterministicRng>,
    mut sinks: EnemySinks,
) {
    for event in seen_events.read() {
        let Ok(item) = enemies.get_mut(event.observer) else {
            continue;
        };

        let is_engageable = engageable
            .get(event.pawn)
            .is_ok_and(|attributes| attributes.is_alive());

        drive_enemy(item, Some(&senses), &mut timers, &mut rng.rng, &mut sinks, |controller, ctx| {
            if controller.pawn_seen(event.pawn, is_engageable, ctx) {
                crate::log(&format!("👁️ {:?} spotted {:?}", event.observer, event.pawn));
            }
        });
    }
}
