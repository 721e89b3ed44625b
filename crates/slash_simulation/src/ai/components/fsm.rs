//! FSM AI components (состояния врага, death pose, конфиг).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Состояния врага
///
/// Порядок важен: `state > Patrolling` = "в каком-то боевом состоянии",
/// `state < Attacking` = ещё можно перехватить цель (pawn seen).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Reflect, Serialize, Deserialize,
)]
pub enum EnemyState {
    /// Транзитное: attack_end сбрасывает сюда перед пересчётом
    NoState,
    Patrolling,
    Chasing,
    /// Взведён таймер атаки
    Attacking,
    /// Lock на время удара (анимация в полёте)
    Engaged,
    /// Terminal
    Dead,
}

impl Default for EnemyState {
    fn default() -> Self {
        Self::Patrolling
    }
}

/// Поза смерти (совпадает с секцией death клипа)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum DeathPose {
    Alive,
    Death1,
    Death2,
    Death3,
}

/// Позы, из которых выбирается смерть (равновероятно)
pub const DEATH_POSES: [DeathPose; 3] = [DeathPose::Death1, DeathPose::Death2, DeathPose::Death3];

impl Default for DeathPose {
    fn default() -> Self {
        Self::Alive
    }
}

impl DeathPose {
    pub fn section(self) -> &'static str {
        match self {
            DeathPose::Alive => "Alive",
            DeathPose::Death1 => "Death1",
            DeathPose::Death2 => "Death2",
            DeathPose::Death3 => "Death3",
        }
    }
}

/// Параметры врага (static, задаются при спавне)
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct EnemyConfig {
    /// Дальше этого: теряем интерес к цели
    pub combat_radius: f32,
    /// Дистанция удара
    pub attack_radius: f32,
    /// Дистанция "пришёл на waypoint"
    pub patrol_radius: f32,
    /// Пауза на waypoint (секунды)
    pub patrol_wait_min: f32,
    pub patrol_wait_max: f32,
    /// Задержка перед ударом (секунды)
    pub attack_min: f32,
    pub attack_max: f32,
    pub patrolling_speed: f32,
    pub chasing_speed: f32,
    /// Сколько труп лежит до удаления (секунды)
    pub death_lifespan: f32,
    /// Задержка старта патруля после спавна (секунды)
    pub start_patrol_delay: f32,
    /// Acceptance radius для навигации
    pub acceptance_radius: f32,
    /// Спавнить меч в правой руке
    pub armed: bool,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            combat_radius: 1000.0,
            attack_radius: 150.0,
            patrol_radius: 200.0,
            patrol_wait_min: 5.0,
            patrol_wait_max: 10.0,
            attack_min: 0.5,
            attack_max: 1.0,
            patrolling_speed: 125.0,
            chasing_speed: 300.0,
            death_lifespan: 8.0,
            start_patrol_delay: 0.5,
            acceptance_radius: 50.0,
            armed: true,
        }
    }
}

/// Ошибки валидации EnemyConfig (единственный Result в AI)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnemyConfigError {
    #[error("{field} must be a non-negative number, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("combat radius {combat} is smaller than attack radius {attack}")]
    CombatInsideAttack { combat: f32, attack: f32 },

    #[error("{field}: min {min} is greater than max {max}")]
    InvertedRange { field: &'static str, min: f32, max: f32 },

    #[error("patrolling speed {patrolling} exceeds chasing speed {chasing}")]
    PatrolFasterThanChase { patrolling: f32, chasing: f32 },
}

impl EnemyConfig {
    pub fn validate(&self) -> Result<(), EnemyConfigError> {
        let fields = [
            ("combat_radius", self.combat_radius),
            ("attack_radius", self.attack_radius),
            ("patrol_radius", self.patrol_radius),
            ("patrol_wait_min", self.patrol_wait_min),
            ("patrol_wait_max", self.patrol_wait_max),
            ("attack_min", self.attack_min),
            ("attack_max", self.attack_max),
            ("patrolling_speed", self.patrolling_speed),
            ("chasing_speed", self.chasing_speed),
            ("death_lifespan", self.death_lifespan),
            ("start_patrol_delay", self.start_patrol_delay),
            ("acceptance_radius", self.acceptance_radius),
        ];
        // NaN тоже сюда
        if let Some((field, value)) = fields.into_iter().find(|(_, value)| !(*value >= 0.0)) {
            return Err(EnemyConfigError::Negative { field, value });
        }

        if self.combat_radius < self.attack_radius {
            return Err(EnemyConfigError::CombatInsideAttack {
                combat: self.combat_radius,
                attack: self.attack_radius,
            });
        }

        if self.patrol_wait_min > self.patrol_wait_max {
            return Err(EnemyConfigError::InvertedRange {
                field: "patrol_wait",
                min: self.patrol_wait_min,
                max: self.patrol_wait_max,
            });
        }

        if self.attack_min > self.attack_max {
            return Err(EnemyConfigError::InvertedRange {
                field: "attack",
                min: self.attack_min,
                max: self.attack_max,
            });
        }

        if self.patrolling_speed > self.chasing_speed {
            return Err(EnemyConfigError::PatrolFasterThanChase {
                patrolling: self.patrolling_speed,
                chasing: self.chasing_speed,
            });
        }

        Ok(())
    }
}
