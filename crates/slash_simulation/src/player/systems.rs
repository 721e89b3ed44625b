//! Player systems: input intents, урон, конец анимаций, overlap предметов.

use bevy::prelude::*;

use super::actions::{EquipOutcome, PlayerCombatant, PlayerContext};
use super::{ItemOverlap, PlayerIntent};
use crate::combat::{
    AnimationClip, AnimationFinished, Combatant, DamageReceived, PlayAnimation, Weapon, WeaponSocket,
};
use crate::components::{Attributes, MovementInput};
use crate::DeterministicRng;

/// System: DamageReceived → Attributes игрока
pub fn apply_damage_to_player(
    mut damage_events: EventReader<DamageReceived>,
    mut players: Query<(&mut PlayerCombatant, &mut Attributes)>,
    mut rng: ResMut<DeterministicRng>,
) {
    for damage in damage_events.read() {
        let Ok((mut player, mut attributes)) = players.get_mut(damage.target) else {
            continue;
        };

        let mut ctx = PlayerContext::new(&mut rng.rng);
        player.handle_damage(damage.amount, damage.instigator, &mut attributes, &mut ctx);

        crate::log(&format!(
            "🩸 Player {:?} health {:.1}/{:.1}",
            damage.target,
            attributes.health(),
            attributes.max_health()
        ));
    }
}

/// System: PlayerIntent → action FSM
///
/// Move пишет MovementInput только в Unoccupied (иначе обнуляет).
/// Атака и arm/disarm сбрасывают удерживаемое направление.
pub fn handle_player_intents(
    mut intents: EventReader<PlayerIntent>,
    mut players: Query<(&mut PlayerCombatant, &mut MovementInput)>,
    mut weapons: Query<&mut Weapon>,
    mut rng: ResMut<DeterministicRng>,
    mut animations: EventWriter<PlayAnimation>,
) {
    for intent in intents.read() {
        let player_entity = intent.player();
        let Ok((mut player, mut input)) = players.get_mut(player_entity) else {
            continue;
        };
        let mut ctx = PlayerContext::new(&mut rng.rng);

        match intent {
            PlayerIntent::Move { direction, .. } => {
                input.direction = if player.accepts_movement() {
                    *direction
                } else {
                    Vec2::ZERO
                };
            }
            PlayerIntent::Attack { .. } => {
                if player.attack(&mut ctx) {
                    input.direction = Vec2::ZERO;
                    crate::log(&format!("⚔️ Player {:?} attacks", player_entity));
                }
            }
            PlayerIntent::EquipPressed { .. } => {
                let overlapping_weapon = player
                    .overlapping_item()
                    .filter(|item| weapons.contains(*item));
                let previous = player.equipped_weapon();

                match player.equip_key_pressed(overlapping_weapon, &mut ctx) {
                    EquipOutcome::PickedUp(weapon) => {
                        if let Some(previous) = previous.filter(|previous| *previous != weapon) {
                            if let Ok(mut old) = weapons.get_mut(previous) {
                                old.drop_to_ground();
                            }
                        }
                        if let Ok(mut new) = weapons.get_mut(weapon) {
                            new.attach(player_entity, WeaponSocket::RightHand);
                        }
                        crate::log(&format!("🗡️ Player {:?} picked up {:?}", player_entity, weapon));
                    }
                    EquipOutcome::Disarming => {
                        input.direction = Vec2::ZERO;
                        crate::log(&format!("Player {:?} disarming", player_entity));
                    }
                    EquipOutcome::Arming => {
                        input.direction = Vec2::ZERO;
                        crate::log(&format!("Player {:?} arming", player_entity));
                    }
                    EquipOutcome::Nothing => {}
                }
            }
        }

        for request in ctx.animations {
            animations.write(request.into_event(player_entity));
        }
    }
}

/// System: attack / equip клип доиграл
pub fn handle_player_animation_finished(
    mut finished: EventReader<AnimationFinished>,
    mut players: Query<&mut PlayerCombatant>,
    mut rng: ResMut<DeterministicRng>,
) {
    for event in finished.read() {
        let Ok(mut player) = players.get_mut(event.entity) else {
            continue;
        };

        match event.clip {
            AnimationClip::Attack => {
                let mut ctx = PlayerContext::new(&mut rng.rng);
                player.attack_end(&mut ctx);
            }
            AnimationClip::Equip => player.finish_equipping(),
            AnimationClip::Death | AnimationClip::HitReact => {}
        }
    }
}

/// System: ItemOverlap begin/end
pub fn handle_item_overlaps(
    mut overlaps: EventReader<ItemOverlap>,
    mut players: Query<&mut PlayerCombatant>,
) {
    for overlap in overlaps.read() {
        let Ok(mut player) = players.get_mut(overlap.player) else {
            continue;
        };

        if overlap.overlapping {
            player.begin_overlap(overlap.item);
        } else {
            player.end_overlap(overlap.item);
        }
    }
}

/// System: held weapon удалён из мира → сбросить weak ссылку
pub fn forget_missing_weapons(
    mut players: Query<&mut PlayerCombatant>,
    weapons: Query<(), With<Weapon>>,
) {
    for mut player in players.iter_mut() {
        let Some(weapon) = player.equipped_weapon() else {
            continue;
        };
        if !weapons.contains(weapon) {
            player.forget_weapon(weapon);
            crate::log_warning(&format!("Player weapon {:?} no longer exists", weapon));
        }
    }
}
