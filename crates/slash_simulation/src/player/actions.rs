//! Player action FSM
//!
//! Две независимые оси:
//! - ActionState: чем игрок занят прямо сейчас (блокирует движение/атаку/экипировку)
//! - EquipmentState: в руке ли оружие
//!
//! Вместе они дают guards can_attack / can_arm / can_disarm.

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::combat::{AnimationClip, AnimationRequest, Combatant, EQUIP_SECTION, UNEQUIP_SECTION};
use crate::components::{Actor, Attributes, EngageableTarget, MovementInput, MovementSpeed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum ActionState {
    #[default]
    Unoccupied,
    Attacking,
    EquippingWeapon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum EquipmentState {
    #[default]
    Unequipped,
    EquippedOneHanded,
}

/// Результат нажатия кнопки экипировки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipOutcome {
    /// Подобрали оружие с земли (сразу в руку, без анимации)
    PickedUp(Entity),
    /// Убираем за спину (Unequip секция)
    Disarming,
    /// Достаём из-за спины (Equip секция)
    Arming,
    Nothing,
}

/// RNG + накопленные запросы анимаций
pub struct PlayerContext<'a> {
    pub rng: &'a mut ChaCha8Rng,
    pub animations: Vec<AnimationRequest>,
}

impl<'a> PlayerContext<'a> {
    pub fn new(rng: &'a mut ChaCha8Rng) -> Self {
        Self {
            rng,
            animations: Vec::new(),
        }
    }
}

/// Игрок: action FSM + ссылки на оружие
///
/// Ссылки (overlapping_item, equipped_weapon): weak: системы проверяют
/// их через Query перед использованием.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Actor, EngageableTarget, MovementInput, MovementSpeed)]
pub struct PlayerCombatant {
    action: ActionState,
    equipment: EquipmentState,
    overlapping_item: Option<Entity>,
    equipped_weapon: Option<Entity>,
}

impl PlayerCombatant {
    pub fn action_state(&self) -> ActionState {
        self.action
    }

    pub fn character_state(&self) -> EquipmentState {
        self.equipment
    }

    pub fn equipped_weapon(&self) -> Option<Entity> {
        self.equipped_weapon
    }

    pub fn overlapping_item(&self) -> Option<Entity> {
        self.overlapping_item
    }

    pub fn can_attack(&self) -> bool {
        self.action == ActionState::Unoccupied && self.equipment != EquipmentState::Unequipped
    }

    pub fn can_disarm(&self) -> bool {
        self.action == ActionState::Unoccupied && self.equipment != EquipmentState::Unequipped
    }

    pub fn can_arm(&self) -> bool {
        self.action == ActionState::Unoccupied
            && self.equipment == EquipmentState::Unequipped
            && self.equipped_weapon.is_some()
    }

    /// Movement input принимается только в Unoccupied
    pub fn accepts_movement(&self) -> bool {
        self.action == ActionState::Unoccupied
    }

    /// Кнопка экипировки
    ///
    /// `overlapping_weapon`: текущий overlapping item, если это оружие.
    pub fn equip_key_pressed(
        &mut self,
        overlapping_weapon: Option<Entity>,
        ctx: &mut PlayerContext,
    ) -> EquipOutcome {
        if let Some(weapon) = overlapping_weapon {
            self.equipment = EquipmentState::EquippedOneHanded;
            self.overlapping_item = None;
            self.equipped_weapon = Some(weapon);
            return EquipOutcome::PickedUp(weapon);
        }

        if self.can_disarm() {
            ctx.animations
                .push(AnimationRequest::new(AnimationClip::Equip, UNEQUIP_SECTION));
            self.equipment = EquipmentState::Unequipped;
            self.action = ActionState::EquippingWeapon;
            EquipOutcome::Disarming
        } else if self.can_arm() {
            ctx.animations
                .push(AnimationRequest::new(AnimationClip::Equip, EQUIP_SECTION));
            self.equipment = EquipmentState::EquippedOneHanded;
            self.action = ActionState::EquippingWeapon;
            EquipOutcome::Arming
        } else {
            EquipOutcome::Nothing
        }
    }

    /// Equip клип доиграл
    pub fn finish_equipping(&mut self) {
        self.action = ActionState::Unoccupied;
    }

    pub fn begin_overlap(&mut self, item: Entity) {
        self.overlapping_item = Some(item);
    }

    /// Конец overlap: сбрасываем только если это тот же item
    pub fn end_overlap(&mut self, item: Entity) {
        if self.overlapping_item == Some(item) {
            self.overlapping_item = None;
        }
    }

    /// Оружие удалено из мира: забыть ссылку
    pub fn forget_weapon(&mut self, weapon: Entity) {
        if self.equipped_weapon == Some(weapon) {
            self.equipped_weapon = None;
            self.equipment = EquipmentState::Unequipped;
        }
    }
}

impl Combatant for PlayerCombatant {
    type Context<'c> = PlayerContext<'c>;

    fn attack(&mut self, ctx: &mut PlayerContext<'_>) -> bool {
        if !self.can_attack() {
            return false;
        }

        ctx.animations.push(AnimationRequest::random_attack(ctx.rng));
        self.action = ActionState::Attacking;
        true
    }

    /// Всегда валиден, идемпотентен
    fn attack_end(&mut self, _ctx: &mut PlayerContext<'_>) {
        self.action = ActionState::Unoccupied;
    }

    fn handle_damage(
        &mut self,
        amount: f32,
        _instigator: Option<Entity>,
        attributes: &mut Attributes,
        _ctx: &mut PlayerContext<'_>,
    ) {
        attributes.receive_damage(amount);
    }

    // У игрока нет death перехода: здоровье просто доходит до нуля
    fn is_dead(&self) -> bool {
        false
    }

    fn reacts_to_hits(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::ATTACK_SECTIONS;
    use rand::SeedableRng;

    fn armed_player(world: &mut World) -> (PlayerCombatant, Entity) {
        let weapon = world.spawn_empty().id();
        let mut player = PlayerCombatant::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = PlayerContext::new(&mut rng);
        assert_eq!(
            player.equip_key_pressed(Some(weapon), &mut ctx),
            EquipOutcome::PickedUp(weapon)
        );
        (player, weapon)
    }

    #[test]
    fn test_unequipped_attack_rejected() {
        let mut player = PlayerCombatant::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = PlayerContext::new(&mut rng);

        assert!(!player.can_attack());
        assert!(!player.attack(&mut ctx));
        assert_eq!(player.action_state(), ActionState::Unoccupied);
        assert!(ctx.animations.is_empty());
    }

    #[test]
    fn test_attack_locks_until_attack_end() {
        let mut world = World::new();
        let (mut player, _) = armed_player(&mut world);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut ctx = PlayerContext::new(&mut rng);

        assert!(player.attack(&mut ctx));
        assert_eq!(player.action_state(), ActionState::Attacking);
        assert_eq!(ctx.animations.len(), 1);
        assert_eq!(ctx.animations[0].clip, AnimationClip::Attack);
        assert!(ATTACK_SECTIONS.contains(&ctx.animations[0].section));

        // Повторная атака до attack_end отклоняется
        assert!(!player.can_attack());
        assert!(!player.attack(&mut ctx));
        assert!(!player.accepts_movement());
        assert_eq!(ctx.animations.len(), 1);

        player.attack_end(&mut ctx);
        player.attack_end(&mut ctx);
        assert_eq!(player.action_state(), ActionState::Unoccupied);
        assert!(player.can_attack());
    }

    #[test]
    fn test_pickup_consumes_overlap() {
        let mut world = World::new();
        let weapon = world.spawn_empty().id();
        let mut player = PlayerCombatant::default();
        player.begin_overlap(weapon);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ctx = PlayerContext::new(&mut rng);
        let outcome = player.equip_key_pressed(player.overlapping_item(), &mut ctx);

        assert_eq!(outcome, EquipOutcome::PickedUp(weapon));
        assert_eq!(player.character_state(), EquipmentState::EquippedOneHanded);
        assert_eq!(player.equipped_weapon(), Some(weapon));
        assert_eq!(player.overlapping_item(), None);
        // Подбор: без анимации и без блокировки
        assert!(ctx.animations.is_empty());
        assert_eq!(player.action_state(), ActionState::Unoccupied);
    }

    #[test]
    fn test_disarm_then_arm_cycle() {
        let mut world = World::new();
        let (mut player, weapon) = armed_player(&mut world);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut ctx = PlayerContext::new(&mut rng);

        assert!(player.can_disarm());
        assert_eq!(player.equip_key_pressed(None, &mut ctx), EquipOutcome::Disarming);
        assert_eq!(player.action_state(), ActionState::EquippingWeapon);
        assert_eq!(player.character_state(), EquipmentState::Unequipped);
        assert_eq!(ctx.animations[0].section, UNEQUIP_SECTION);

        // Пока идёт анимация: ни экипировки, ни атаки
        assert_eq!(player.equip_key_pressed(None, &mut ctx), EquipOutcome::Nothing);
        assert!(!player.attack(&mut ctx));

        player.finish_equipping();
        assert!(player.can_arm());
        assert_eq!(player.equip_key_pressed(None, &mut ctx), EquipOutcome::Arming);
        assert_eq!(player.character_state(), EquipmentState::EquippedOneHanded);
        assert_eq!(ctx.animations[1].section, EQUIP_SECTION);
        assert_eq!(player.equipped_weapon(), Some(weapon));

        player.finish_equipping();
        assert!(player.can_attack());
    }

    #[test]
    fn test_arm_requires_held_weapon() {
        let mut player = PlayerCombatant::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut ctx = PlayerContext::new(&mut rng);

        assert!(!player.can_arm());
        assert_eq!(player.equip_key_pressed(None, &mut ctx), EquipOutcome::Nothing);
        assert_eq!(player.action_state(), ActionState::Unoccupied);
    }

    #[test]
    fn test_end_overlap_only_clears_matching_item() {
        let mut world = World::new();
        let first = world.spawn_empty().id();
        let second = world.spawn_empty().id();
        let mut player = PlayerCombatant::default();

        player.begin_overlap(first);
        player.begin_overlap(second);
        player.end_overlap(first);
        assert_eq!(player.overlapping_item(), Some(second));

        player.end_overlap(second);
        assert_eq!(player.overlapping_item(), None);
    }

    #[test]
    fn test_damage_forwards_to_attributes() {
        let mut player = PlayerCombatant::default();
        let mut attributes = Attributes::new(100.0);
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut ctx = PlayerContext::new(&mut rng);

        player.handle_damage(40.0, None, &mut attributes, &mut ctx);
        assert_eq!(attributes.health(), 60.0);
        assert_eq!(player.action_state(), ActionState::Unoccupied);
    }
}
