//! Headless симуляция Slash
//!
//! Патрулирующий enemy, игрок с мечом идёт на него и рубит.
//! Без рендера: всё видно только в логах.

use bevy::prelude::*;
use slash_simulation::combat::weapon_bundle;
use slash_simulation::player::ItemOverlap;
use slash_simulation::{
    create_headless_app, enemy_bundle, log_error, log_info, player_bundle, waypoint_bundle, Attributes,
    DamageReceived, Dead, EnemyConfig, EnemyController, PatrolRoute, PlayerCombatant, PlayerIntent,
};

const TICKS: usize = 3000;
const SWORD_DAMAGE: f32 = 20.0;
const SWORD_REACH: f32 = 180.0;

fn main() {
    let seed = 42;
    log_info(&format!("Starting Slash headless simulation (seed: {})", seed));

    let mut app = create_headless_app(seed);
    let world = app.world_mut();

    let waypoint_a = world.spawn(waypoint_bundle(Vec3::new(-600.0, 0.0, 0.0))).id();
    let waypoint_b = world.spawn(waypoint_bundle(Vec3::new(600.0, 0.0, 0.0))).id();

    let enemy = match enemy_bundle(
        Vec3::ZERO,
        EnemyConfig::default(),
        PatrolRoute::new(vec![waypoint_a, waypoint_b]),
    ) {
        Ok(bundle) => world.spawn(bundle).id(),
        Err(err) => {
            log_error(&format!("Invalid enemy config: {}", err));
            return;
        }
    };

    let player = world.spawn(player_bundle(Vec3::new(0.0, 0.0, -2500.0))).id();
    let sword = world.spawn(weapon_bundle(Vec3::new(0.0, 0.0, -2500.0))).id();

    // Меч под ногами: overlap + E
    world.send_event(ItemOverlap {
        player,
        item: sword,
        overlapping: true,
    });
    world.send_event(PlayerIntent::EquipPressed { player });

    for tick in 0..TICKS {
        drive_player(app.world_mut(), player, enemy);
        app.update();

        if tick % 120 == 0 {
            let world = app.world_mut();
            let state = world.get::<EnemyController>(enemy).map(|c| c.state());
            let health = world.get::<Attributes>(enemy).map(|a| a.health());
            log_info(&format!("Tick {}: enemy {:?} health {:?}", tick, state, health));
        }

        if app.world().get_entity(enemy).is_err() {
            log_info(&format!("Tick {}: enemy body removed", tick));
            break;
        }
    }

    log_info("Simulation complete!");
}

/// "Игрок": идёт к enemy, в радиусе меча: атакует
fn drive_player(world: &mut World, player: Entity, enemy: Entity) {
    let Some(player_position) = world.get::<Transform>(player).map(|t| t.translation) else {
        return;
    };
    let Some(enemy_position) = world.get::<Transform>(enemy).map(|t| t.translation) else {
        return;
    };
    if world.get::<Dead>(enemy).is_some() {
        world.send_event(PlayerIntent::Move {
            player,
            direction: Vec2::ZERO,
        });
        return;
    }

    let offset = enemy_position - player_position;
    let distance = Vec2::new(offset.x, offset.z).length();

    if distance > SWORD_REACH {
        // y: вперёд (-Z)
        let direction = Vec2::new(offset.x, -offset.z).normalize_or_zero();
        world.send_event(PlayerIntent::Move { player, direction });
        return;
    }

    world.send_event(PlayerIntent::Move {
        player,
        direction: Vec2::ZERO,
    });

    let can_swing = world
        .get::<PlayerCombatant>(player)
        .is_some_and(|p| p.can_attack());
    if can_swing {
        world.send_event(PlayerIntent::Attack { player });
        world.send_event(DamageReceived {
            target: enemy,
            amount: SWORD_DAMAGE,
            instigator: Some(player),
        });
    }
}
