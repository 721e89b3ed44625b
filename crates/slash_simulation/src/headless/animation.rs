//! Headless AnimationPlayer: PlayAnimation → notifies + AnimationFinished по таймерам
//!
//! Длительности и кадры notifies фиксированные (реальные клипы живут в движке).

use bevy::prelude::*;

use crate::combat::{AnimNotify, AnimationClip, AnimationFinished, AnimationNotify, PlayAnimation, UNEQUIP_SECTION};
use crate::timer::TimerService;

/// Длительность клипа (секунды). None: клип не репортит завершение
pub fn clip_length(clip: AnimationClip) -> Option<f32> {
    match clip {
        AnimationClip::Attack => Some(1.0),
        AnimationClip::Equip => Some(0.8),
        AnimationClip::HitReact => Some(0.5),
        // Death держит последнюю позу до удаления
        AnimationClip::Death => None,
    }
}

/// Окно удара внутри attack клипа (секунды от старта)
const ATTACK_WINDOW: (f32, f32) = (0.3, 0.7);
/// Кадр перекладывания меча в equip клипе
const EQUIP_SWAP_AT: f32 = 0.4;

fn notify_later(timers: &mut TimerService, delay: f32, entity: Entity, notify: AnimNotify) {
    timers.schedule(delay, move |world: &mut World| {
        world.send_event(AnimationNotify { entity, notify });
    });
}

/// System: "проиграть" запрошенные клипы
pub fn play_animations(mut requests: EventReader<PlayAnimation>, mut timers: ResMut<TimerService>) {
    for request in requests.read() {
        let entity = request.entity;
        let clip = request.clip;

        match clip {
            AnimationClip::Attack => {
                notify_later(&mut timers, ATTACK_WINDOW.0, entity, AnimNotify::WeaponCollision(true));
                notify_later(&mut timers, ATTACK_WINDOW.1, entity, AnimNotify::WeaponCollision(false));
            }
            AnimationClip::Equip => {
                let swap = if request.section == UNEQUIP_SECTION {
                    AnimNotify::AttachWeaponToBack
                } else {
                    AnimNotify::AttachWeaponToHand
                };
                notify_later(&mut timers, EQUIP_SWAP_AT, entity, swap);
            }
            AnimationClip::Death | AnimationClip::HitReact => {}
        }

        if let Some(length) = clip_length(clip) {
            timers.schedule(length, move |world: &mut World| {
                world.send_event(AnimationFinished { entity, clip });
            });
        }
    }
}
