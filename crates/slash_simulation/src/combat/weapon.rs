//! Weapon: владелец, сокет, weapon box collider
//!
//! Сокеты: логические (Ground / RightHand / Spine); реальное крепление к
//! скелету делает движок по этому компоненту.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, ColliderDisabled};

use super::animation::{AnimNotify, AnimationNotify};

/// Куда прикреплено оружие
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum WeaponSocket {
    /// Лежит в мире (можно подобрать)
    #[default]
    Ground,
    RightHand,
    /// За спиной (disarm)
    Spine,
}

impl WeaponSocket {
    /// Имя сокета на скелете
    pub fn socket_name(self) -> Option<&'static str> {
        match self {
            WeaponSocket::Ground => None,
            WeaponSocket::RightHand => Some("RightHandSocket"),
            WeaponSocket::Spine => Some("SpineSocket"),
        }
    }
}

/// Оружие (equippable item)
///
/// Инвариант: у владельца максимум одно оружие (подбор нового роняет старое).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Weapon {
    pub owner: Option<Entity>,
    pub socket: WeaponSocket,
}

impl Weapon {
    pub fn attach(&mut self, owner: Entity, socket: WeaponSocket) {
        self.owner = Some(owner);
        self.socket = socket;
    }

    pub fn drop_to_ground(&mut self) {
        self.owner = None;
        self.socket = WeaponSocket::Ground;
    }

    pub fn is_held_by(&self, entity: Entity) -> bool {
        self.owner == Some(entity)
    }
}

/// Меч на земле: Weapon + weapon box (выключен, пока нет окна удара)
pub fn weapon_bundle(position: Vec3) -> impl Bundle {
    sword(Weapon::default(), position)
}

/// Меч сразу в сокете владельца (стартовое оружие врага)
pub fn held_weapon_bundle(owner: Entity, socket: WeaponSocket, position: Vec3) -> impl Bundle {
    let mut weapon = Weapon::default();
    weapon.attach(owner, socket);
    sword(weapon, position)
}

fn sword(weapon: Weapon, position: Vec3) -> impl Bundle {
    (
        weapon,
        Transform::from_translation(position),
        Collider::cuboid(2.5, 2.5, 40.0),
        ColliderDisabled,
    )
}

/// Система: notifies оружия (для любого владельца: игрок или враг)
///
/// - AttachWeaponToBack / AttachWeaponToHand: смена сокета
/// - WeaponCollision(on/off): ColliderDisabled на weapon box
pub fn handle_weapon_notifies(
    mut commands: Commands,
    mut notifies: EventReader<AnimationNotify>,
    mut weapons: Query<(Entity, &mut Weapon)>,
) {
    for notify in notifies.read() {
        for (weapon_entity, mut weapon) in weapons.iter_mut() {
            if !weapon.is_held_by(notify.entity) {
                continue;
            }

            match notify.notify {
                AnimNotify::AttachWeaponToBack => weapon.socket = WeaponSocket::Spine,
                AnimNotify::AttachWeaponToHand => weapon.socket = WeaponSocket::RightHand,
                AnimNotify::WeaponCollision(enabled) => {
                    let Ok(mut entity_commands) = commands.get_entity(weapon_entity) else {
                        continue;
                    };
                    if enabled {
                        entity_commands.remove::<ColliderDisabled>();
                    } else {
                        entity_commands.insert(ColliderDisabled);
                    }
                }
            }
        }
    }
}

/// Удалить оружие, которым владеет entity (вместе с владельцем)
pub fn despawn_held_weapons(world: &mut World, owner: Entity) {
    let mut query = world.query::<(Entity, &Weapon)>();
    let held: Vec<Entity> = query
        .iter(world)
        .filter(|(_, weapon)| weapon.is_held_by(owner))
        .map(|(entity, _)| entity)
        .collect();

    for weapon in held {
        if let Ok(entity) = world.get_entity_mut(weapon) {
            entity.despawn();
        }
    }
}
