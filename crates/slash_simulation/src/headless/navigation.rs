//! Straight-line navigator (stand-in для NavMesh агента)
//!
//! Без pathfinding: агент идёт по прямой к цели FollowEntity в плоскости XZ
//! и останавливается в acceptance radius. Разворачивается по ходу движения.

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::{MovementCommand, MovementInput, MovementSpeed};
use crate::player::PlayerCombatant;

/// Шаг к точке: новая позиция (None: уже в acceptance radius)
pub fn step_towards(position: Vec3, goal: Vec3, acceptance_radius: f32, max_step: f32) -> Option<Vec3> {
    let offset = Vec3::new(goal.x - position.x, 0.0, goal.z - position.z);
    let distance = offset.length();
    let remaining = distance - acceptance_radius;
    if remaining <= 0.0 || distance <= f32::EPSILON {
        return None;
    }

    let travel = remaining.min(max_step);
    Some(position + offset / distance * travel)
}

/// System: выполнение MovementCommand::FollowEntity
pub fn follow_entities(
    mut transforms: ParamSet<(
        Query<&Transform>,
        Query<(Entity, &mut Transform, &MovementCommand, &MovementSpeed), Without<Dead>>,
    )>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.timestep().as_secs_f32();

    // Фаза 1: кто куда идёт
    let followers: Vec<(Entity, Entity, f32, f32)> = transforms
        .p1()
        .iter()
        .filter_map(|(entity, _, command, speed)| match *command {
            MovementCommand::FollowEntity {
                target,
                acceptance_radius,
            } => Some((entity, target, acceptance_radius, speed.speed)),
            MovementCommand::Idle | MovementCommand::Stop => None,
        })
        .collect();

    // Фаза 2: позиции целей (цель могла исчезнуть: тогда стоим)
    let goals: Vec<(Entity, Vec3, f32, f32)> = {
        let positions = transforms.p0();
        followers
            .into_iter()
            .filter_map(|(entity, target, acceptance, speed)| {
                let goal = positions.get(target).ok()?.translation;
                Some((entity, goal, acceptance, speed))
            })
            .collect()
    };

    // Фаза 3: двигаем
    let mut movers = transforms.p1();
    for (entity, goal, acceptance, speed) in goals {
        let Ok((_, mut transform, _, _)) = movers.get_mut(entity) else {
            continue;
        };
        let Some(next) = step_towards(transform.translation, goal, acceptance, speed * delta) else {
            continue;
        };

        let heading = next - transform.translation;
        transform.translation = next;
        if let Ok(direction) = Dir3::new(heading) {
            transform.look_to(direction, Dir3::Y);
        }
    }
}

/// System: locomotion игрока из MovementInput (x: вправо, y: вперёд)
///
/// Во время attack / equip клипов игрок стоит, даже если input ещё не обнулён.
pub fn move_players(
    mut players: Query<(&mut Transform, &MovementInput, &MovementSpeed, &PlayerCombatant)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.timestep().as_secs_f32();

    for (mut transform, input, speed, player) in players.iter_mut() {
        if !player.accepts_movement() {
            continue;
        }

        let direction = input.direction.clamp_length_max(1.0);
        if direction == Vec2::ZERO {
            continue;
        }

        // Bevy: forward = -Z
        let heading = Vec3::new(direction.x, 0.0, -direction.y);
        transform.translation += heading * speed.speed * delta;
        if let Ok(facing) = Dir3::new(heading) {
            transform.look_to(facing, Dir3::Y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_stops_inside_acceptance_radius() {
        let goal = Vec3::new(100.0, 0.0, 0.0);

        let next = step_towards(Vec3::ZERO, goal, 50.0, 10.0).unwrap();
        assert!((next.x - 10.0).abs() < 1e-4);

        // Не перешагиваем acceptance radius
        let next = step_towards(Vec3::new(45.0, 0.0, 0.0), goal, 50.0, 30.0).unwrap();
        assert!((next.x - 50.0).abs() < 1e-4);

        assert!(step_towards(Vec3::new(60.0, 0.0, 0.0), goal, 50.0, 10.0).is_none());
    }

    #[test]
    fn test_step_ignores_height() {
        let next = step_towards(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 100.0, -200.0), 0.0, 20.0).unwrap();
        assert_eq!(next.y, 5.0);
        assert!((next.z + 20.0).abs() < 1e-4);
    }
}
