//! Player module: action FSM игрока
//!
//! Input binding (движок) шлёт PlayerIntent, overlap sphere оружия: ItemOverlap.
//! AnimationFinished закрывает Attacking / EquippingWeapon.

use bevy::prelude::*;

pub mod actions;
pub mod systems;

pub use actions::{ActionState, EquipOutcome, EquipmentState, PlayerCombatant, PlayerContext};
pub use systems::*;

use crate::combat::react_to_hits;
use crate::SimulationSet;

/// Inbound: намерение игрока (input binding)
#[derive(Event, Debug, Clone, PartialEq)]
pub enum PlayerIntent {
    /// WASD (плоскость XZ)
    Move { player: Entity, direction: Vec2 },
    Attack { player: Entity },
    /// Кнопка E: подобрать / убрать / достать оружие
    EquipPressed { player: Entity },
}

impl PlayerIntent {
    pub fn player(&self) -> Entity {
        match self {
            PlayerIntent::Move { player, .. }
            | PlayerIntent::Attack { player }
            | PlayerIntent::EquipPressed { player } => *player,
        }
    }
}

/// Inbound: begin/end overlap игрока с item
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ItemOverlap {
    pub player: Entity,
    pub item: Entity,
    /// true: begin overlap, false: end overlap
    pub overlapping: bool,
}

/// Player Plugin
///
/// Порядок выполнения (SimulationSet::Player):
/// 1. apply_damage_to_player
/// 2. react_to_hits::<PlayerCombatant>: звук + частицы (без hit react)
/// 3. handle_item_overlaps: overlap до E, чтобы подбор сработал в том же тике
/// 4. forget_missing_weapons
/// 5. handle_player_intents
/// 6. handle_player_animation_finished
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerIntent>()
            .add_event::<ItemOverlap>()
            .register_type::<PlayerCombatant>();

        app.add_systems(
            FixedUpdate,
            (
                apply_damage_to_player,
                react_to_hits::<PlayerCombatant>,
                handle_item_overlaps,
                forget_missing_weapons,
                handle_player_intents,
                handle_player_animation_finished,
            )
                .chain()
                .in_set(SimulationSet::Player),
        );
    }
}
