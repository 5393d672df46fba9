use std::time::Duration;

use grid_snake_core::{Command, Event};
use grid_snake_system_clock::{Config, TickClock, MAX_CATCH_UP_TICKS};
use grid_snake_world::{self as world, query, GameConfig, World};

#[test]
fn emits_one_tick_per_interval() {
    let mut clock = TickClock::new(Config::new(Duration::from_millis(100)));
    let mut commands = Vec::new();

    clock.handle(Duration::from_millis(40), &mut commands);
    assert!(commands.is_empty());

    clock.handle(Duration::from_millis(70), &mut commands);
    assert_eq!(commands, vec![Command::Tick]);
    assert_eq!(clock.pending(), Duration::from_millis(10));

    commands.clear();
    clock.handle(Duration::from_millis(290), &mut commands);
    assert_eq!(commands.len(), 3);
}

#[test]
fn long_stall_emits_bounded_catch_up() {
    let mut clock = TickClock::new(Config::new(Duration::from_millis(100)));
    let mut commands = Vec::new();

    clock.handle(Duration::from_secs(3), &mut commands);
    assert_eq!(commands.len(), MAX_CATCH_UP_TICKS as usize);
    assert_eq!(clock.pending(), Duration::ZERO);
}

#[test]
fn zero_interval_never_ticks() {
    let mut clock = TickClock::new(Config::new(Duration::ZERO));
    let mut commands = Vec::new();
    clock.handle(Duration::from_secs(10), &mut commands);
    assert!(commands.is_empty());
}

#[test]
fn reset_discards_partial_interval() {
    let mut clock = TickClock::new(Config::new(Duration::from_millis(100)));
    let mut commands = Vec::new();
    clock.handle(Duration::from_millis(90), &mut commands);
    clock.reset();
    clock.handle(Duration::from_millis(20), &mut commands);
    assert!(commands.is_empty());
}

#[test]
fn clock_drives_world_at_configured_rate() {
    let config = GameConfig::bordered(20, 20)
        .with_walls(false)
        .with_food_seed(2);
    let mut clock = TickClock::new(Config::new(config.tick_interval()));
    let mut world = World::new(config).expect("valid config");

    let mut ticked = 0;
    for _ in 0..30 {
        let mut commands = Vec::new();
        clock.handle(Duration::from_millis(50), &mut commands);
        for command in commands {
            let mut events = Vec::new();
            world::apply(&mut world, command, &mut events);
            ticked += events
                .iter()
                .filter(|event| matches!(event, Event::Ticked { .. }))
                .count();
        }
    }

    assert_eq!(ticked, 15);
    assert_eq!(query::tick_index(&world), 15);
}
