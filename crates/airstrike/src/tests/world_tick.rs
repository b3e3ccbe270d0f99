use airstrike_engine::assets::{TextureId, TextureManager};
use airstrike_engine::command::CommandQueue;
use airstrike_engine::foundation::math::Vec2;
use airstrike_engine::input::{InputEvent, InputState, KeyCode};
use airstrike_engine::render::DrawList;
use approx::assert_relative_eq;
use std::rc::Rc;

use super::*;
use crate::error::GameError;
use crate::player_control::PlayerControl;
use crate::spawn::WaveEntry;

const EPSILON: f32 = 1e-3;

fn hold(control: &PlayerControl, keys: &[KeyCode], commands: &mut CommandQueue) {
    let mut input = InputState::new();
    for &key in keys {
        input.handle_event(InputEvent::KeyPressed(key));
    }
    control.handle_realtime_input(&input, commands);
}

fn enemies(world: &World) -> Vec<NodeId> {
    air_nodes::<Aircraft>(world)
        .into_iter()
        .filter(|&id| id != world.player())
        .collect()
}

#[test]
fn test_world_needs_textures() {
    let mut textures = TextureManager::new();
    let result = World::new(&GameConfig::default(), &mut textures);
    assert!(matches!(result, Err(GameError::Resource(_))));
}

#[test]
fn test_world_rejects_invalid_config() {
    let mut config = GameConfig::default();
    config.world.view_width = 0.0;
    let mut textures = placeholder_textures();
    assert!(matches!(World::new(&config, &mut textures), Err(GameError::InvalidConfig(_))));
}

#[test]
fn test_initial_layout() {
    let mut textures = placeholder_textures();
    let world = World::new(&GameConfig::default(), &mut textures).unwrap();

    assert!(textures.get(TextureId::Jungle).unwrap().repeated);
    assert_relative_eq!(world.spawn_position().x, 300.0);
    assert_relative_eq!(world.spawn_position().y, 1800.0);
    assert_eq!(player_position(&world), world.spawn_position());
    assert!(world.has_alive_player());
    assert!(!world.has_player_reached_end());

    let view = world.view_bounds();
    assert_relative_eq!(view.top, 1600.0);
    assert_relative_eq!(world.battlefield_bounds().top, 1500.0);
    assert_relative_eq!(world.battlefield_bounds().bottom(), view.bottom());
}

#[test]
fn test_view_scrolls_each_tick() {
    let mut world = quiet_world();
    let before = world.view_bounds();

    world.update(DT);

    assert_relative_eq!(world.view_bounds().top, before.top - 50.0 * DT, epsilon = EPSILON);
    assert_relative_eq!(world.view_bounds().left, before.left);
}

#[test]
fn test_enemy_bullet_hits_player() {
    let mut world = quiet_world();
    let at = world.spawn_position();
    let bullet = place_projectile(&mut world, ProjectileType::EnemyBullet, at);

    world.update(DT);

    assert_eq!(world.player_aircraft().map(Aircraft::hit_points), Some(90));
    assert!(!world.graph().contains(bullet));
}

#[test]
fn test_allied_bullet_hits_enemy() {
    let mut world = quiet_world();
    let position = Vec2::new(100.0, 1650.0);
    let enemy = place_enemy(&mut world, AircraftType::Raptor, position);
    let bullet = place_projectile(&mut world, ProjectileType::AlliedBullet, position);

    world.update(DT);

    assert_eq!(world.graph().entity(enemy).map(|e| e.hit_points()), Some(10));
    assert!(!world.graph().contains(bullet));
}

#[test]
fn test_ramming_destroys_enemy() {
    let mut world = quiet_world();
    let at = world.spawn_position();
    let enemy = place_enemy(&mut world, AircraftType::Raptor, at);

    world.update(DT);

    assert_eq!(world.player_aircraft().map(Aircraft::hit_points), Some(80));
    assert!(world.graph().is_destroyed(enemy));
    // Still exploding
    assert!(world.graph().contains(enemy));
}

#[test]
fn test_one_bullet_hits_every_overlapping_enemy() {
    let mut world = quiet_world();
    let position = Vec2::new(100.0, 1650.0);
    let first = place_enemy(&mut world, AircraftType::Raptor, position);
    let second = place_enemy(&mut world, AircraftType::Raptor, position);
    let bullet = place_projectile(&mut world, ProjectileType::AlliedBullet, position);

    world.update(DT);

    // Pairs are collected before any is resolved, so both enemies take the hit
    assert_eq!(world.graph().entity(first).map(|e| e.hit_points()), Some(10));
    assert_eq!(world.graph().entity(second).map(|e| e.hit_points()), Some(10));
    assert!(!world.graph().contains(bullet));
}

#[test]
fn test_player_hit_by_several_bullets_in_one_tick() {
    let mut world = quiet_world();
    let at = world.spawn_position();
    let bullets = [
        place_projectile(&mut world, ProjectileType::EnemyBullet, at),
        place_projectile(&mut world, ProjectileType::EnemyBullet, at),
    ];

    world.update(DT);

    assert_eq!(world.player_aircraft().map(Aircraft::hit_points), Some(80));
    assert!(bullets.iter().all(|&bullet| !world.graph().contains(bullet)));
}

#[test]
fn test_ramming_enemy_stored_before_player() {
    let mut world = quiet_world();
    // Free an early arena slot so the enemy lands ahead of the player
    let background = world.graph().children(world.graph().root())[0];
    let finish = world.graph().children(background)[1];
    world.graph_mut().detach_child(background, finish).unwrap();
    let at = world.spawn_position();
    let enemy = place_enemy(&mut world, AircraftType::Raptor, at);
    assert!(enemy < world.player());

    world.update(DT);

    assert_eq!(world.player_aircraft().map(Aircraft::hit_points), Some(80));
    assert!(world.graph().is_destroyed(enemy));
    assert!(!world.graph().is_destroyed(world.player()));
}

#[test]
fn test_pickup_collected() {
    let mut world = quiet_world();
    let player = world.player();
    world.graph_mut().entity_mut(player).unwrap().damage(50);
    let at = world.spawn_position();
    let pickup = place_pickup(&mut world, PickupType::HealthRefill, at);

    world.update(DT);

    assert_eq!(world.player_aircraft().map(Aircraft::hit_points), Some(75));
    assert!(!world.graph().contains(pickup));
}

#[test]
fn test_destroyed_enemy_drops_pickup_then_disappears() {
    let mut world = quiet_world();
    let enemy = Aircraft::new(AircraftType::Raptor, Rc::clone(world.tables())).with_pickup_drop_chance(1.0);
    let enemy = place_aircraft(&mut world, enemy, Vec2::new(100.0, 1650.0));
    world.graph_mut().entity_mut(enemy).unwrap().destroy();

    world.update(DT);
    assert!(air_nodes::<Pickup>(&world).is_empty());

    world.update(DT);
    assert_eq!(air_nodes::<Pickup>(&world).len(), 1);
    assert!(world.graph().contains(enemy));

    let mut ticks = 0;
    while world.graph().contains(enemy) && ticks < 120 {
        world.update(DT);
        ticks += 1;
    }

    assert!(!world.graph().contains(enemy));
    assert!(ticks > 30);
    assert_eq!(air_nodes::<Pickup>(&world).len(), 1);
}

#[test]
fn test_offscreen_projectiles_despawn() {
    let mut world = quiet_world();
    let far = place_projectile(&mut world, ProjectileType::AlliedBullet, Vec2::new(300.0, 1000.0));
    let near = place_projectile(&mut world, ProjectileType::AlliedBullet, Vec2::new(300.0, 1550.0));

    world.update(DT);

    assert!(!world.graph().contains(far));
    assert!(world.graph().contains(near));
}

#[test]
fn test_missile_guided_to_nearest_enemy() {
    let mut world = quiet_world();
    place_enemy(&mut world, AircraftType::Raptor, Vec2::new(300.0, 1540.0));
    place_enemy(&mut world, AircraftType::Raptor, Vec2::new(200.0, 1600.0));
    place_enemy(&mut world, AircraftType::Raptor, Vec2::new(400.0, 1600.0));
    let missile = place_projectile(&mut world, ProjectileType::Missile, Vec2::new(300.0, 1700.0));

    world.update(DT);

    let direction = world.graph().behavior::<Projectile>(missile).unwrap().target_direction();
    let expected = -std::f32::consts::FRAC_1_SQRT_2;
    assert_relative_eq!(direction.x, expected, epsilon = EPSILON);
    assert_relative_eq!(direction.y, expected, epsilon = EPSILON);
}

#[test]
fn test_missile_without_enemies_keeps_course() {
    let mut world = quiet_world();
    let missile = place_projectile(&mut world, ProjectileType::Missile, Vec2::new(300.0, 1700.0));

    world.update(DT);

    let direction = world.graph().behavior::<Projectile>(missile).unwrap().target_direction();
    assert_relative_eq!(direction.norm(), 0.0);
}

#[test]
fn test_diagonal_movement_normalised() {
    let mut world = quiet_world();
    let control = PlayerControl::new(200.0);
    hold(&control, &[KeyCode::Left, KeyCode::Up], world.command_queue());

    world.update(DT);

    let velocity = world.player_aircraft().unwrap().velocity();
    assert_relative_eq!(velocity.norm(), 200.0, epsilon = EPSILON);
    assert_relative_eq!(velocity.x, velocity.y, epsilon = EPSILON);
    assert!(player_position(&world).x < world.spawn_position().x);
}

#[test]
fn test_straight_movement_full_speed() {
    let mut world = quiet_world();
    let control = PlayerControl::new(200.0);
    hold(&control, &[KeyCode::Right], world.command_queue());

    world.update(DT);

    let velocity = world.player_aircraft().unwrap().velocity();
    assert_relative_eq!(velocity.x, 200.0, epsilon = EPSILON);
    assert_relative_eq!(velocity.y, 0.0);
    assert_relative_eq!(player_position(&world).x, 300.0 + 200.0 * DT, epsilon = EPSILON);
}

#[test]
fn test_player_velocity_reset_every_tick() {
    let mut world = quiet_world();
    let control = PlayerControl::new(200.0);
    hold(&control, &[KeyCode::Right], world.command_queue());
    world.update(DT);

    world.update(DT);

    assert_relative_eq!(world.player_aircraft().unwrap().velocity().norm(), 0.0);
}

#[test]
fn test_player_clamped_to_view() {
    let mut world = quiet_world();
    let player = world.player();
    world.graph_mut().transform_mut(player).unwrap().position = Vec2::new(-500.0, 0.0);

    world.update(DT);

    let view = world.view_bounds();
    let position = player_position(&world);
    assert_relative_eq!(position.x, view.left + 40.0, epsilon = EPSILON);
    assert_relative_eq!(position.y, view.top + 40.0, epsilon = EPSILON);
}

#[test]
fn test_player_fires_through_commands() {
    let mut world = quiet_world();
    let control = PlayerControl::new(200.0);
    hold(&control, &[KeyCode::Space], world.command_queue());

    // The aircraft queues the volley during its update; it lands on the next tick
    world.update(DT);
    assert!(air_nodes::<Projectile>(&world).is_empty());
    world.update(DT);

    let bullets = air_nodes::<Projectile>(&world);
    assert_eq!(bullets.len(), 1);
    let bullet = world.graph().behavior::<Projectile>(bullets[0]).unwrap();
    assert_eq!(bullet.kind(), ProjectileType::AlliedBullet);
    assert!(world.graph().world_position(bullets[0]).unwrap().y < player_position(&world).y);
}

#[test]
fn test_enemies_spawn_once_nearest_first() {
    let config = GameConfig {
        waves: vec![
            WaveEntry::new(AircraftType::Avenger, 50.0, 400.0),
            WaveEntry::new(AircraftType::Raptor, -250.0, 100.0),
        ],
        ..GameConfig::default()
    };
    let mut world = world_with(&config);
    assert_eq!(world.pending_spawns(), 2);

    world.update(DT);
    let spawned = enemies(&world);
    assert_eq!(spawned.len(), 1);
    assert_eq!(world.pending_spawns(), 1);

    let graph = world.graph();
    assert_eq!(graph.behavior::<Aircraft>(spawned[0]).map(Aircraft::kind), Some(AircraftType::Raptor));
    let transform = graph.transform(spawned[0]).unwrap();
    assert_relative_eq!(transform.rotation, 180.0);
    assert_relative_eq!(transform.position.x, 50.0);
    assert_relative_eq!(transform.position.y, 1700.0);

    world.update(DT);
    assert_eq!(enemies(&world).len(), 1);

    let mut ticks = 0;
    while world.pending_spawns() > 0 && ticks < 300 {
        world.update(DT);
        ticks += 1;
    }
    assert_eq!(world.pending_spawns(), 0);
    assert!(ticks > 100);
    assert!(enemies(&world)
        .iter()
        .any(|&id| world.graph().behavior::<Aircraft>(id).map(Aircraft::kind) == Some(AircraftType::Avenger)));
}

#[test]
fn test_player_death_and_mission_end() {
    let mut world = quiet_world();
    let player = world.player();

    world.graph_mut().transform_mut(player).unwrap().position = Vec2::new(300.0, -10.0);
    assert!(world.has_player_reached_end());

    world.graph_mut().entity_mut(player).unwrap().destroy();
    assert!(!world.has_alive_player());
}

#[test]
fn test_draw_uses_current_view() {
    let mut world = quiet_world();
    world.update(DT);

    let mut frame = DrawList::new();
    world.draw(&mut frame);

    assert_eq!(frame.view(), Some(world.view_bounds()));
    assert_eq!(frame.sprite_count(TextureId::Jungle), 1);
    assert_eq!(frame.sprite_count(TextureId::FinishLine), 1);
    assert_eq!(frame.sprite_count(TextureId::Entities), 1);
}
