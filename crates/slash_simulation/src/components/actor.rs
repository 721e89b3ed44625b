//! Базовые компоненты акторов: Actor, Attributes, EngageableTarget

use bevy::prelude::*;

/// Актор (игрок, враг): базовый компонент для живых существ
///
/// Автоматически добавляет Attributes и Transform через Required Components.
/// Headless sensing считает "pawn" любую entity с Actor.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Attributes, Transform)]
pub struct Actor;

/// Tag: по этой entity враг может начать преследование (PawnSeen фильтр)
///
/// Ставится на игрока. Враги этот tag не несут, поэтому друг друга игнорируют.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct EngageableTarget;

/// Attribute store: здоровье актора
///
/// Инвариант: 0 ≤ health ≤ max_health
/// Мутируется только через `receive_damage`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Attributes {
    health: f32,
    max_health: f32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Attributes {
    pub fn new(max_health: f32) -> Self {
        let max_health = max_health.max(0.0);
        Self {
            health: max_health,
            max_health,
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Применить урон (clamp в [0, max]), вернуть новую долю здоровья
    ///
    /// Отрицательный урон игнорируется: лечение идёт не через этот путь.
    pub fn receive_damage(&mut self, amount: f32) -> f32 {
        self.health = (self.health - amount.max(0.0)).clamp(0.0, self.max_health);
        self.health_percent()
    }

    /// Доля здоровья 0.0..=1.0 (для health bar)
    pub fn health_percent(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        self.health / self.max_health
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receive_damage_clamps_at_zero() {
        let mut attributes = Attributes::new(100.0);
        assert!(attributes.is_alive());

        let percent = attributes.receive_damage(30.0);
        assert_eq!(percent, 0.7);
        assert!(attributes.is_alive());

        let percent = attributes.receive_damage(500.0);
        assert_eq!(percent, 0.0);
        assert_eq!(attributes.health(), 0.0);
        assert!(!attributes.is_alive());
    }

    #[test]
    fn test_negative_damage_does_not_heal() {
        let mut attributes = Attributes::new(50.0);
        attributes.receive_damage(10.0);

        attributes.receive_damage(-40.0);
        assert_eq!(attributes.health(), 40.0);
    }

    #[test]
    fn test_zero_max_health_percent() {
        let attributes = Attributes::new(0.0);
        assert_eq!(attributes.health_percent(), 0.0);
        assert!(!attributes.is_alive());
    }
}
