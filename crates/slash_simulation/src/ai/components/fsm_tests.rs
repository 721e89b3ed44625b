//! Tests for FSM AI components.

use super::fsm::{DeathPose, EnemyConfig, EnemyConfigError, EnemyState};

#[test]
fn test_enemy_state_default() {
    assert_eq!(EnemyState::default(), EnemyState::Patrolling);
    assert_eq!(DeathPose::default(), DeathPose::Alive);
}

#[test]
fn test_enemy_state_ordering() {
    // Tick делит состояния по Patrolling, pawn seen: по Attacking
    assert!(EnemyState::NoState < EnemyState::Patrolling);
    assert!(EnemyState::Chasing > EnemyState::Patrolling);
    assert!(EnemyState::Chasing < EnemyState::Attacking);
    assert!(EnemyState::Engaged > EnemyState::Attacking);
    assert!(EnemyState::Dead > EnemyState::Engaged);
}

#[test]
fn test_enemy_config_default() {
    let config = EnemyConfig::default();
    assert_eq!(config.combat_radius, 1000.0);
    assert_eq!(config.attack_radius, 150.0);
    assert_eq!(config.patrol_radius, 200.0);
    assert_eq!(config.patrol_wait_min, 5.0);
    assert_eq!(config.patrol_wait_max, 10.0);
    assert_eq!(config.attack_min, 0.5);
    assert_eq!(config.attack_max, 1.0);
    assert_eq!(config.patrolling_speed, 125.0);
    assert_eq!(config.chasing_speed, 300.0);
    assert_eq!(config.death_lifespan, 8.0);
    assert!(config.armed);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_config_rejects_attack_radius_beyond_combat_radius() {
    let config = EnemyConfig {
        combat_radius: 100.0,
        attack_radius: 150.0,
        ..Default::default()
    };

    assert_eq!(
        config.validate(),
        Err(EnemyConfigError::CombatInsideAttack {
            combat: 100.0,
            attack: 150.0
        })
    );
}

#[test]
fn test_config_rejects_inverted_ranges() {
    let config = EnemyConfig {
        attack_min: 2.0,
        attack_max: 1.0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(EnemyConfigError::InvertedRange { field: "attack", .. })
    ));

    let config = EnemyConfig {
        patrol_wait_min: 11.0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(EnemyConfigError::InvertedRange { field: "patrol_wait", .. })
    ));
}

#[test]
fn test_config_rejects_negative_and_nan() {
    let config = EnemyConfig {
        death_lifespan: -1.0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(EnemyConfigError::Negative { field: "death_lifespan", .. })
    ));

    let config = EnemyConfig {
        chasing_speed: f32::NAN,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(EnemyConfigError::Negative { field: "chasing_speed", .. })
    ));
}

#[test]
fn test_config_rejects_patrol_faster_than_chase() {
    let config = EnemyConfig {
        patrolling_speed: 400.0,
        ..Default::default()
    };
    let error = config.validate().unwrap_err();
    assert_eq!(error.to_string(), "patrolling speed 400 exceeds chasing speed 300");
}
