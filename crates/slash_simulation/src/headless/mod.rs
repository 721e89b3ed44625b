//! Headless world: stand-ins внешних коллабораторов
//!
//! В игре их роль играет движок (NavMesh, PawnSensing, AnimationPlayer).
//! Для headless бинарника и end-to-end тестов:
//! - navigation: прямолинейный navigator + locomotion игрока
//! - sensing: PawnSensing → PawnSeen
//! - animation: PlayAnimation → AnimationNotify / AnimationFinished

use bevy::prelude::*;

pub mod animation;
pub mod navigation;
pub mod sensing;

pub use animation::{clip_length, play_animations};
pub use navigation::{follow_entities, move_players, step_towards};
pub use sensing::{sense_pawns, PawnSensing};

use crate::SimulationSet;

/// Headless World Plugin
///
/// Работает после AI/Player (SimulationSet::Headless): движение и сенсоры
/// этого тика видны FSM на следующем.
pub struct HeadlessWorldPlugin;

impl Plugin for HeadlessWorldPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PawnSensing>();

        app.add_systems(
            FixedUpdate,
            (follow_entities, move_players, sense_pawns, play_animations)
                .chain()
                .in_set(SimulationSet::Headless),
        );
    }
}
