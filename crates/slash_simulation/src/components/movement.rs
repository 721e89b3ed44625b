//! Movement компоненты: команды навигации, скорость, player input

use bevy::prelude::*;

/// Команда движения для актора (выполняется внешним Navigator)
///
/// Архитектура:
/// - ECS система пишет MovementCommand (high-level intent, fire-and-forget)
/// - Navigator (движок или HeadlessWorldPlugin) читает и ведёт актора
/// - Завершение навигации в ECS не репортится: FSM пересчитывает всё по дистанциям
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub enum MovementCommand {
    /// Стоять на месте (не трогать текущий путь)
    Idle,
    /// Следовать за entity (waypoint или цель), остановиться в acceptance radius
    FollowEntity { target: Entity, acceptance_radius: f32 },
    /// Остановиться немедленно и больше не навигировать (смерть)
    Stop,
}

impl Default for MovementCommand {
    fn default() -> Self {
        Self::Idle
    }
}

/// Максимальная скорость движения актора (units/sec)
///
/// Враг переключает её при входе в Patrolling/Chasing.
#[derive(Component, Clone, Copy, Debug, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 125.0 }
    }
}

/// Locomotion intent игрока (WASD)
///
/// Пишется только если ActionState == Unoccupied, иначе обнуляется.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementInput {
    /// Направление в плоскости XZ (не нормализуется: аналоговый stick)
    pub direction: Vec2,
}
