//! Animation requests (клипы + секции)
//!
//! ECS не проигрывает анимации: он выбирает клип и секцию и пишет PlayAnimation.
//! AnimationPlayer на стороне движка отвечает AnimationFinished / AnimationNotify.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

/// Секции клипа атаки (выбор равновероятный)
pub const ATTACK_SECTIONS: [&str; 2] = ["Attack1", "Attack2"];

/// Секции клипа экипировки
pub const EQUIP_SECTION: &str = "Equip";
pub const UNEQUIP_SECTION: &str = "Unequip";

/// Клипы, которые запрашивает боевое ядро
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimationClip {
    Attack,
    Death,
    Equip,
    HitReact,
}

/// Запрос на проигрывание: клип + имя секции
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationRequest {
    pub clip: AnimationClip,
    pub section: &'static str,
}

impl AnimationRequest {
    pub fn new(clip: AnimationClip, section: &'static str) -> Self {
        Self { clip, section }
    }

    /// Атака со случайной секцией из ATTACK_SECTIONS
    pub fn random_attack(rng: &mut impl Rng) -> Self {
        let section = ATTACK_SECTIONS.choose(rng).copied().unwrap_or(ATTACK_SECTIONS[0]);
        Self::new(AnimationClip::Attack, section)
    }

    pub fn into_event(self, entity: Entity) -> PlayAnimation {
        PlayAnimation {
            entity,
            clip: self.clip,
            section: self.section,
        }
    }
}

/// Outbound: проиграть клип на entity (AnimationPlayer.play)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlayAnimation {
    pub entity: Entity,
    pub clip: AnimationClip,
    pub section: &'static str,
}

/// Inbound: клип доиграл (AnimationPlayer.onFinished)
///
/// Attack → attack_end, Equip → finish_equipping.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AnimationFinished {
    pub entity: Entity,
    pub clip: AnimationClip,
}

/// Inbound: notify внутри клипа (anim notify на конкретном кадре)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AnimationNotify {
    pub entity: Entity,
    pub notify: AnimNotify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimNotify {
    /// Disarm: меч уходит за спину
    AttachWeaponToBack,
    /// Arm: меч возвращается в руку
    AttachWeaponToHand,
    /// Окно удара: включить/выключить weapon box
    WeaponCollision(bool),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_attack_uses_known_sections() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..32 {
            let request = AnimationRequest::random_attack(&mut rng);
            assert_eq!(request.clip, AnimationClip::Attack);
            assert!(ATTACK_SECTIONS.contains(&request.section));
        }
    }
}
