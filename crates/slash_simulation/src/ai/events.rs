//! AI Events: perception и таймеры врага
//!
//! PawnSeen шлёт PerceptionSensor (движок или headless PawnSensing).
//! EnemyTimerFired шлют callbacks TimerService, когда истекает слот врага.

use bevy::prelude::*;

/// Perception: наблюдатель увидел pawn
///
/// Фильтрация (EngageableTarget, живой ли pawn): на стороне AI, не сенсора.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PawnSeen {
    /// Entity наблюдателя (враг с сенсором)
    pub observer: Entity,
    /// Кого увидели
    pub pawn: Entity,
}

/// Какой слот таймера врага истёк
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum EnemyTimer {
    /// Пауза на waypoint (и стартовая задержка патруля)
    PatrolWait,
    /// Задержка перед ударом
    Attack,
}

/// Таймер врага сработал
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EnemyTimerFired {
    pub enemy: Entity,
    pub timer: EnemyTimer,
}

/// Callback для TimerService: пишет EnemyTimerFired в World
pub fn fire_enemy_timer(
    enemy: Entity,
    timer: EnemyTimer,
) -> impl FnOnce(&mut World) + Send + Sync + 'static {
    move |world: &mut World| {
        world.send_event(EnemyTimerFired { enemy, timer });
    }
}
