//! AI components module.
//!
//! Разбит на:
//! - fsm: EnemyState, DeathPose, EnemyConfig (+ валидация)
//! - controller: EnemyController и его контекст/effects

pub mod controller;
pub mod fsm;

#[cfg(test)]
mod fsm_tests;

pub use controller::*;
pub use fsm::*;
