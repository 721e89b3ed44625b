//! Combatant capability: общий интерфейс игрока и врага
//!
//! Вместо базового класса: trait с attack / attack_end / handle_damage и
//! политикой реакции на попадание. Контекст у каждой реализации свой
//! (враг тянет таймеры, сенсоры и эффекты; игроку хватает RNG).

use bevy::prelude::*;

use super::damage::{HitReceived, PlayEffect};
use super::hit_react::hit_react_direction;
use super::animation::{AnimationClip, PlayAnimation};
use crate::components::{Attributes, HealthBar};

pub trait Combatant {
    /// Данные и sinks, нужные реализации на время одного вызова
    type Context<'c>;

    /// Попытка атаки. false: отклонено guard'ом, состояние не менялось
    fn attack(&mut self, ctx: &mut Self::Context<'_>) -> bool;

    /// Attack клип доиграл
    fn attack_end(&mut self, ctx: &mut Self::Context<'_>);

    /// Численный урон (takeDamage). Attributes мутируются только отсюда
    fn handle_damage(
        &mut self,
        amount: f32,
        instigator: Option<Entity>,
        attributes: &mut Attributes,
        ctx: &mut Self::Context<'_>,
    );

    fn is_dead(&self) -> bool;

    /// Проигрывать directional hit react при попадании
    fn reacts_to_hits(&self) -> bool;

    /// Показывать health bar при попадании
    fn shows_health_bar(&self) -> bool {
        false
    }
}

/// Система: getHit для конкретного вида combatant
///
/// Звук и частицы: всегда. Health bar и directional react: по политике
/// combatant'а и только пока он жив.
pub fn react_to_hits<C: Combatant + Component>(
    mut hits: EventReader<HitReceived>,
    combatants: Query<(&C, &Transform)>,
    mut health_bars: Query<&mut HealthBar>,
    mut animations: EventWriter<PlayAnimation>,
    mut effects: EventWriter<PlayEffect>,
) {
    for hit in hits.read() {
        let Ok((combatant, transform)) = combatants.get(hit.target) else {
            continue;
        };

        if !combatant.is_dead() {
            if combatant.shows_health_bar() {
                if let Ok(mut bar) = health_bars.get_mut(hit.target) {
                    bar.visible = true;
                }
            }

            if combatant.reacts_to_hits() {
                let direction = hit_react_direction(
                    transform.forward().as_vec3(),
                    transform.translation,
                    hit.impact_point,
                );
                animations.write(PlayAnimation {
                    entity: hit.target,
                    clip: AnimationClip::HitReact,
                    section: direction.section(),
                });
                crate::log(&format!(
                    "💥 {:?} hit from {:?} (impact {:?})",
                    hit.target, direction, hit.impact_point
                ));
            }
        }

        effects.write(PlayEffect::HitSound {
            location: hit.impact_point,
        });
        effects.write(PlayEffect::HitParticles {
            location: hit.impact_point,
        });
    }
}
