//! Directional hit react: выбор секции реакции по направлению удара
//!
//! Stateless helper, общий для игрока и врагов.

use bevy::prelude::*;

/// Квадрант, с которого пришёл удар (относительно взгляда актора)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum HitDirection {
    Front,
    Back,
    Left,
    Right,
}

impl HitDirection {
    /// Имя секции в клипе HitReact
    pub fn section(self) -> &'static str {
        match self {
            HitDirection::Front => "FromFront",
            HitDirection::Back => "FromBack",
            HitDirection::Left => "FromLeft",
            HitDirection::Right => "FromRight",
        }
    }
}

/// Signed угол (градусы) между forward и горизонтальным вектором на точку удара
///
/// Положительный угол: удар справа, отрицательный: слева.
/// Высота точки удара игнорируется (проецируем на высоту актора).
pub fn hit_angle_degrees(forward: Vec3, position: Vec3, impact_point: Vec3) -> Option<f32> {
    let impact_lowered = Vec3::new(impact_point.x, position.y, impact_point.z);
    let to_hit = (impact_lowered - position).normalize_or_zero();
    let forward = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();

    if to_hit == Vec3::ZERO || forward == Vec3::ZERO {
        return None;
    }

    let cos_theta = forward.dot(to_hit).clamp(-1.0, 1.0);
    let theta = cos_theta.acos().to_degrees();

    // Y-up, right-handed: удар справа даёт cross.y < 0
    if forward.cross(to_hit).y > 0.0 {
        Some(-theta)
    } else {
        Some(theta)
    }
}

/// Бакетинг по квадрантам: Front [-45, 45), Left [-135, -45), Right [45, 135), иначе Back
///
/// Вырожденный вектор (удар ровно в центр актора) считаем ударом спереди.
pub fn hit_react_direction(forward: Vec3, position: Vec3, impact_point: Vec3) -> HitDirection {
    let Some(theta) = hit_angle_degrees(forward, position, impact_point) else {
        return HitDirection::Front;
    };

    if (-45.0..45.0).contains(&theta) {
        HitDirection::Front
    } else if (-135.0..-45.0).contains(&theta) {
        HitDirection::Left
    } else if (45.0..135.0).contains(&theta) {
        HitDirection::Right
    } else {
        HitDirection::Back
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Bevy: forward = -Z, right = +X
    const FORWARD: Vec3 = Vec3::NEG_Z;

    #[test]
    fn test_hit_from_each_quadrant() {
        let origin = Vec3::ZERO;

        assert_eq!(hit_react_direction(FORWARD, origin, Vec3::new(0.0, 1.0, -5.0)), HitDirection::Front);
        assert_eq!(hit_react_direction(FORWARD, origin, Vec3::new(0.0, 1.0, 5.0)), HitDirection::Back);
        assert_eq!(hit_react_direction(FORWARD, origin, Vec3::new(5.0, 1.0, 0.0)), HitDirection::Right);
        assert_eq!(hit_react_direction(FORWARD, origin, Vec3::new(-5.0, 1.0, 0.0)), HitDirection::Left);
    }

    #[test]
    fn test_diagonal_boundaries() {
        let origin = Vec3::ZERO;

        // 30° вправо от взгляда: всё ещё спереди
        let front_right = Vec3::new(30f32.to_radians().sin(), 0.0, -30f32.to_radians().cos());
        assert_eq!(hit_react_direction(FORWARD, origin, front_right), HitDirection::Front);

        // 100° вправо: правый квадрант
        let right = Vec3::new(100f32.to_radians().sin(), 0.0, -100f32.to_radians().cos());
        assert_eq!(hit_react_direction(FORWARD, origin, right), HitDirection::Right);

        // 150° влево: сзади
        let back_left = Vec3::new(-150f32.to_radians().sin(), 0.0, -150f32.to_radians().cos());
        assert_eq!(hit_react_direction(FORWARD, origin, back_left), HitDirection::Back);
    }

    #[test]
    fn test_signed_angle() {
        let right = hit_angle_degrees(FORWARD, Vec3::ZERO, Vec3::X).unwrap();
        let left = hit_angle_degrees(FORWARD, Vec3::ZERO, Vec3::NEG_X).unwrap();
        assert!((right - 90.0).abs() < 1e-3, "right = {}", right);
        assert!((left + 90.0).abs() < 1e-3, "left = {}", left);
    }

    #[test]
    fn test_degenerate_impact_is_front() {
        let position = Vec3::new(3.0, 0.0, 3.0);
        assert_eq!(
            hit_react_direction(FORWARD, position, Vec3::new(3.0, 10.0, 3.0)),
            HitDirection::Front
        );
        assert_eq!(HitDirection::Front.section(), "FromFront");
    }
}
