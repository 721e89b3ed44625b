//! One-shot таймеры симуляции
//!
//! Замена движковому TimerManager: callback хранится как closure над `&mut World`,
//! отмена по handle. Время двигается только в FixedUpdate (один timestep за проход),
//! поэтому порядок срабатывания детерминирован.
//!
//! Используется:
//! - patrol wait (пауза на waypoint)
//! - attack cooldown (задержка перед ударом)
//! - старт патруля после спавна, удаление трупа после lifespan

use bevy::prelude::*;

/// Callback таймера: выполняется exclusive системой с полным доступом к World
pub type TimerCallback = Box<dyn FnOnce(&mut World) + Send + Sync + 'static>;

/// Handle запланированного таймера (монотонный id, никогда не переиспользуется)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct TimerHandle(u64);

/// Допуск сравнения с дедлайном: шаг `1/60` в f32 не складывается ровно в 0.5s
const DEADLINE_TOLERANCE: f64 = 1e-6;

struct PendingTimer {
    handle: TimerHandle,
    /// Абсолютное время срабатывания (по часам сервиса)
    deadline: f64,
    callback: TimerCallback,
}

/// Планировщик one-shot таймеров
///
/// Часы в f64 копят сумму шагов: дедлайн не плывёт от повторных вычитаний.
#[derive(Resource, Default)]
pub struct TimerService {
    next_id: u64,
    clock: f64,
    pending: Vec<PendingTimer>,
}

impl TimerService {
    /// Запланировать callback через `duration_secs` секунд
    ///
    /// Отрицательная длительность трактуется как 0 (сработает на ближайшем тике).
    pub fn schedule(
        &mut self,
        duration_secs: f32,
        callback: impl FnOnce(&mut World) + Send + Sync + 'static,
    ) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);

        self.pending.push(PendingTimer {
            handle,
            deadline: self.clock + f64::from(duration_secs.max(0.0)),
            callback: Box::new(callback),
        });

        handle
    }

    /// Отменить таймер. Идемпотентно: уже сработавший/отменённый handle → false
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.handle != handle);
        before != self.pending.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|timer| timer.handle == handle)
    }

    /// Оставшееся время таймера (None если уже не ждёт)
    pub fn remaining(&self, handle: TimerHandle) -> Option<f32> {
        self.pending
            .iter()
            .find(|timer| timer.handle == handle)
            .map(|timer| (timer.deadline - self.clock).max(0.0) as f32)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Продвинуть время на `delta_secs` и забрать истёкшие callbacks
    ///
    /// Порядок: по времени срабатывания, при равенстве: по порядку планирования.
    pub fn advance(&mut self, delta_secs: f32) -> Vec<TimerCallback> {
        self.clock += f64::from(delta_secs);
        let now = self.clock + DEADLINE_TOLERANCE;

        let (mut expired, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|timer| timer.deadline <= now);
        self.pending = pending;

        // sort_by стабильный: равные дедлайны остаются в порядке handle
        expired.sort_by(|a, b| a.deadline.total_cmp(&b.deadline));
        expired.into_iter().map(|timer| timer.callback).collect()
    }
}

/// Логический слот таймера (patrol wait, attack cooldown)
///
/// Держит максимум один outstanding handle: `arm` сначала отменяет предыдущий,
/// поэтому повторное взведение не даёт двойных срабатываний.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub struct TimerSlot(Option<TimerHandle>);

impl TimerSlot {
    pub fn arm(
        &mut self,
        timers: &mut TimerService,
        duration_secs: f32,
        callback: impl FnOnce(&mut World) + Send + Sync + 'static,
    ) -> TimerHandle {
        self.clear(timers);
        let handle = timers.schedule(duration_secs, callback);
        self.0 = Some(handle);
        handle
    }

    pub fn clear(&mut self, timers: &mut TimerService) {
        if let Some(handle) = self.0.take() {
            timers.cancel(handle);
        }
    }

    /// Слот взведён и таймер ещё не сработал
    pub fn is_armed(&self, timers: &TimerService) -> bool {
        self.0.is_some_and(|handle| timers.is_pending(handle))
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.0
    }
}

/// Exclusive система: тик таймеров на один fixed timestep
///
/// Callbacks забираются из ресурса ДО запуска, поэтому callback может
/// спокойно планировать новые таймеры через `world.resource_mut::<TimerService>()`.
pub fn run_expired_timers(world: &mut World) {
    let step = world.resource::<Time<Fixed>>().timestep().as_secs_f32();
    let expired = world.resource_mut::<TimerService>().advance(step);

    for callback in expired {
        callback(world);
    }
}

/// Timer Plugin
pub struct TimerPlugin;

impl Plugin for TimerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TimerService>().add_systems(
            FixedUpdate,
            run_expired_timers.in_set(crate::SimulationSet::Timers),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct Fired(Vec<&'static str>);

    fn fire_all(service: &mut TimerService, world: &mut World, delta: f32) {
        for callback in service.advance(delta) {
            callback(world);
        }
    }

    fn push(label: &'static str) -> impl FnOnce(&mut World) + Send + Sync + 'static {
        move |world: &mut World| world.resource_mut::<Fired>().0.push(label)
    }

    #[test]
    fn test_timer_fires_after_duration() {
        let mut world = World::new();
        world.init_resource::<Fired>();
        let mut service = TimerService::default();

        let handle = service.schedule(1.0, push("patrol"));
        fire_all(&mut service, &mut world, 0.5);
        assert!(world.resource::<Fired>().0.is_empty());
        assert!(service.is_pending(handle));

        fire_all(&mut service, &mut world, 0.5);
        assert_eq!(world.resource::<Fired>().0, vec!["patrol"]);
        assert!(!service.is_pending(handle));
    }

    #[test]
    fn test_fixed_steps_hit_deadline_on_exact_tick() {
        let mut world = World::new();
        world.init_resource::<Fired>();
        let mut service = TimerService::default();
        let step = 1.0 / 60.0;

        let half = service.schedule(0.5, push("half"));
        let second = service.schedule(1.0, push("second"));
        let eight = service.schedule(8.0, push("eight"));

        let mut fired_at = Vec::new();
        for tick in 1..=480 {
            let before = world.resource::<Fired>().0.len();
            fire_all(&mut service, &mut world, step);
            if world.resource::<Fired>().0.len() != before {
                fired_at.push(tick);
            }

            if tick == 29 {
                assert!(service.is_pending(half));
                assert!(service.remaining(half).is_some_and(|r| r > 0.0 && r < step * 1.5));
            }
        }

        assert_eq!(fired_at, vec![30, 60, 480]);
        assert_eq!(world.resource::<Fired>().0, vec!["half", "second", "eight"]);
        assert!(!service.is_pending(second));
        assert!(!service.is_pending(eight));
    }

    #[test]
    fn test_timer_scheduled_mid_run_counts_from_now() {
        let mut world = World::new();
        world.init_resource::<Fired>();
        let mut service = TimerService::default();
        let step = 1.0 / 60.0;

        for _ in 0..17 {
            fire_all(&mut service, &mut world, step);
        }
        let handle = service.schedule(0.3, push("window"));
        assert!(service.remaining(handle).is_some_and(|r| (r - 0.3).abs() < 1e-5));

        for _ in 0..17 {
            fire_all(&mut service, &mut world, step);
        }
        assert!(service.is_pending(handle));

        fire_all(&mut service, &mut world, step);
        assert_eq!(world.resource::<Fired>().0, vec!["window"]);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut world = World::new();
        world.init_resource::<Fired>();
        let mut service = TimerService::default();

        let handle = service.schedule(0.1, push("attack"));
        assert!(service.cancel(handle));
        assert!(!service.cancel(handle)); // второй раз: no-op

        fire_all(&mut service, &mut world, 1.0);
        assert!(world.resource::<Fired>().0.is_empty());

        // cancel уже сработавшего handle тоже безопасен
        let fired = service.schedule(0.1, push("late"));
        fire_all(&mut service, &mut world, 1.0);
        assert!(!service.cancel(fired));
        assert_eq!(world.resource::<Fired>().0, vec!["late"]);
    }

    #[test]
    fn test_expired_timers_fire_in_deadline_order() {
        let mut world = World::new();
        world.init_resource::<Fired>();
        let mut service = TimerService::default();

        service.schedule(0.3, push("third"));
        service.schedule(0.1, push("first"));
        service.schedule(0.2, push("second"));
        service.schedule(0.2, push("second-b"));

        fire_all(&mut service, &mut world, 1.0);
        assert_eq!(
            world.resource::<Fired>().0,
            vec!["first", "second", "second-b", "third"]
        );
    }

    #[test]
    fn test_slot_rearm_cancels_previous() {
        let mut world = World::new();
        world.init_resource::<Fired>();
        let mut service = TimerService::default();
        let mut slot = TimerSlot::default();

        let first = slot.arm(&mut service, 0.5, push("old"));
        let second = slot.arm(&mut service, 0.5, push("new"));
        assert_ne!(first, second);
        assert!(!service.is_pending(first));
        assert_eq!(service.pending_count(), 1);

        fire_all(&mut service, &mut world, 0.5);
        assert_eq!(world.resource::<Fired>().0, vec!["new"]);
        assert!(!slot.is_armed(&service));
    }

    #[test]
    fn test_slot_clear_on_empty_slot() {
        let mut service = TimerService::default();
        let mut slot = TimerSlot::default();

        slot.clear(&mut service);
        assert!(slot.handle().is_none());
        assert!(!slot.is_armed(&service));
    }
}
