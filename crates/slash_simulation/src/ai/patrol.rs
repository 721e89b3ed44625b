//! Patrol route + выбор следующего waypoint

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

/// Маршрут патруля: упорядоченные waypoints + текущий
///
/// Waypoints: обычные entity с Transform. Если waypoint despawned,
/// дистанция до него неизвестна и патруль просто стоит.
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct PatrolRoute {
    waypoints: Vec<Entity>,
    current: Option<Entity>,
}

impl PatrolRoute {
    /// Маршрут с текущим = первый waypoint
    pub fn new(waypoints: Vec<Entity>) -> Self {
        let current = waypoints.first().copied();
        Self { waypoints, current }
    }

    pub fn with_current(mut self, current: Option<Entity>) -> Self {
        self.current = current;
        self
    }

    pub fn waypoints(&self) -> &[Entity] {
        &self.waypoints
    }

    pub fn current(&self) -> Option<Entity> {
        self.current
    }

    /// Выбрать следующий waypoint. Нет альтернатив → текущий не меняется
    pub fn advance(&mut self, rng: &mut impl Rng) -> Option<Entity> {
        if let Some(next) = choose_patrol_target(&self.waypoints, self.current, rng) {
            self.current = Some(next);
        }
        self.current
    }
}

/// TargetSelector: случайный waypoint маршрута, кроме текущего
///
/// Дубликаты схлопываются, чтобы повторённый в маршруте waypoint не получал
/// больший вес. Пусто → None (caller оставляет текущий).
pub fn choose_patrol_target(
    route: &[Entity],
    current: Option<Entity>,
    rng: &mut impl Rng,
) -> Option<Entity> {
    let mut candidates: Vec<Entity> = Vec::with_capacity(route.len());
    for &waypoint in route {
        if Some(waypoint) != current && !candidates.contains(&waypoint) {
            candidates.push(waypoint);
        }
    }

    candidates.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn waypoints(world: &mut World, count: usize) -> Vec<Entity> {
        (0..count).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn test_two_waypoints_always_pick_other() {
        let mut world = World::new();
        let route = waypoints(&mut world, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..16 {
            assert_eq!(choose_patrol_target(&route, Some(route[0]), &mut rng), Some(route[1]));
            assert_eq!(choose_patrol_target(&route, Some(route[1]), &mut rng), Some(route[0]));
        }
    }

    #[test]
    fn test_never_returns_current() {
        let mut world = World::new();
        let route = waypoints(&mut world, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for i in 0..200 {
            let current = route[i % route.len()];
            let next = choose_patrol_target(&route, Some(current), &mut rng);
            assert!(next.is_some());
            assert_ne!(next, Some(current));
        }
    }

    #[test]
    fn test_single_waypoint_yields_none() {
        let mut world = World::new();
        let route = waypoints(&mut world, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(choose_patrol_target(&route, Some(route[0]), &mut rng), None);
        assert_eq!(choose_patrol_target(&[], None, &mut rng), None);
    }

    #[test]
    fn test_duplicates_of_current_are_excluded() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let route = vec![a, a, b, a];
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        for _ in 0..16 {
            assert_eq!(choose_patrol_target(&route, Some(a), &mut rng), Some(b));
        }
    }

    #[test]
    fn test_route_advance_keeps_current_without_alternatives() {
        let mut world = World::new();
        let only = world.spawn_empty().id();
        let mut route = PatrolRoute::new(vec![only]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        assert_eq!(route.advance(&mut rng), Some(only));
        assert_eq!(route.current(), Some(only));

        let mut empty = PatrolRoute::default();
        assert_eq!(empty.advance(&mut rng), None);
    }
}
