//! HUD сигнал над врагом (health bar)
//!
//! UI слой только читает этот компонент; видимость и процент пишет AI.

use bevy::prelude::*;

/// Health bar врага: скрыт вне боя, показывается при попадании
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HealthBar {
    pub visible: bool,
    /// Доля здоровья 0.0..=1.0
    pub percent: f32,
}

impl Default for HealthBar {
    fn default() -> Self {
        Self {
            visible: false,
            percent: 1.0,
        }
    }
}
