//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (Actor, Attributes, EngageableTarget)
//! - movement: навигация и перемещение (MovementCommand, MovementSpeed, MovementInput)
//! - hud: сигнал для UI (HealthBar)
//!
//! Состояния FSM живут рядом со своей логикой: crate::ai (EnemyController)
//! и crate::player (PlayerCombatant).

pub mod actor;
pub mod hud;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use hud::*;
pub use movement::*;
