//! PawnSensing: stand-in для движкового сенсора зрения
//!
//! Раз в sensing_interval проверяет всех акторов: в радиусе и в конусе
//! периферийного зрения → PawnSeen. Line of sight не проверяется.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::PawnSeen;
use crate::combat::Dead;
use crate::components::Actor;

#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct PawnSensing {
    pub sight_radius: f32,
    /// Половина угла конуса (градусы)
    pub peripheral_vision_angle: f32,
    /// Секунды между проверками
    pub sensing_interval: f32,
    #[serde(skip)]
    elapsed: f32,
}

impl Default for PawnSensing {
    fn default() -> Self {
        Self {
            sight_radius: 4000.0,
            peripheral_vision_angle: 45.0,
            sensing_interval: 0.5,
            elapsed: 0.0,
        }
    }
}

impl PawnSensing {
    /// Виден ли pawn наблюдателю (радиус + конус в плоскости XZ)
    pub fn can_see(&self, observer: &Transform, pawn_position: Vec3) -> bool {
        let offset = pawn_position - observer.translation;
        if offset.length() > self.sight_radius {
            return false;
        }

        let flat = Vec3::new(offset.x, 0.0, offset.z);
        let forward = observer.forward().as_vec3();
        let forward = Vec3::new(forward.x, 0.0, forward.z);
        if flat.length_squared() <= f32::EPSILON || forward.length_squared() <= f32::EPSILON {
            // Вплотную: видно
            return true;
        }

        flat.angle_between(forward).to_degrees() <= self.peripheral_vision_angle
    }

    /// Продвинуть таймер. true: пора сканировать
    fn tick(&mut self, delta: f32) -> bool {
        self.elapsed += delta;
        if self.elapsed + 1e-4 < self.sensing_interval {
            return false;
        }
        self.elapsed = 0.0;
        true
    }
}

/// System: periodic sensing → PawnSeen
pub fn sense_pawns(
    mut observers: Query<(Entity, &Transform, &mut PawnSensing), Without<Dead>>,
    pawns: Query<(Entity, &Transform), With<Actor>>,
    mut seen: EventWriter<PawnSeen>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.timestep().as_secs_f32();

    for (observer, transform, mut sensing) in observers.iter_mut() {
        if !sensing.tick(delta) {
            continue;
        }

        for (pawn, pawn_transform) in pawns.iter() {
            if pawn == observer {
                continue;
            }
            if sensing.can_see(transform, pawn_transform.translation) {
                seen.write(PawnSeen { observer, pawn });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_see_inside_cone_only() {
        let sensing = PawnSensing::default();
        // Смотрим в -Z
        let observer = Transform::default();

        assert!(sensing.can_see(&observer, Vec3::new(0.0, 0.0, -3000.0)));
        assert!(sensing.can_see(&observer, Vec3::new(500.0, 0.0, -1000.0)));
        // Сбоку (90°) и сзади: нет
        assert!(!sensing.can_see(&observer, Vec3::new(1000.0, 0.0, 0.0)));
        assert!(!sensing.can_see(&observer, Vec3::new(0.0, 0.0, 1000.0)));
        // Дальше sight radius: нет
        assert!(!sensing.can_see(&observer, Vec3::new(0.0, 0.0, -4500.0)));
    }

    #[test]
    fn test_sensing_interval() {
        let mut sensing = PawnSensing::default();
        let step = 1.0 / 60.0;

        let scans = (0..60).filter(|_| sensing.tick(step)).count();
        assert_eq!(scans, 2);
    }
}
