use grid_snake_core::{Command, Direction, Event};
use grid_snake_system_input::{Gesture, InputRouter, KeyBindings, RawInput};
use grid_snake_world::{self as world, query, GameConfig, World};

fn route(router: &InputRouter, inputs: &[RawInput]) -> Vec<Command> {
    let mut commands = Vec::new();
    router.handle(inputs, &mut commands);
    commands
}

#[test]
fn keys_and_drags_map_to_direction_requests() {
    let router = InputRouter::default();
    let commands = route(
        &router,
        &[
            RawInput::Key('w'),
            RawInput::Key('x'),
            RawInput::Drag(Gesture::new(-4.0, 1.0)),
            RawInput::Key('R'),
            RawInput::Reset,
        ],
    );

    assert_eq!(
        commands,
        vec![
            Command::RequestDirection {
                direction: Direction::Up
            },
            Command::RequestDirection {
                direction: Direction::Left
            },
            Command::Reset,
            Command::Reset,
        ]
    );
}

#[test]
fn custom_bindings_replace_defaults() {
    let bindings = KeyBindings {
        up: 'i',
        down: 'k',
        left: 'j',
        right: 'l',
        reset: 'n',
    };
    let router = InputRouter::new(bindings).expect("distinct keys");
    let commands = route(&router, &[RawInput::Key('w'), RawInput::Key('J')]);

    assert_eq!(
        commands,
        vec![Command::RequestDirection {
            direction: Direction::Left
        }]
    );
}

#[test]
fn drag_and_key_share_the_one_change_per_tick_gate() {
    let router = InputRouter::default();
    let mut world = World::new(GameConfig::bordered(10, 10).with_food_seed(6)).expect("valid");

    let commands = route(
        &router,
        &[
            RawInput::Drag(Gesture::new(0.2, 3.0)),
            RawInput::Key('s'),
            RawInput::Key('a'),
        ],
    );

    let mut events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    assert_eq!(
        events,
        vec![Event::DirectionQueued {
            direction: Direction::Up
        }]
    );
    assert_eq!(query::snake(&world).pending_direction(), Direction::Up);
}

#[test]
fn rapid_double_reversal_cannot_turn_the_snake_around() {
    let router = InputRouter::default();
    let mut world = World::new(
        GameConfig::bordered(10, 10)
            .with_walls(false)
            .with_food_seed(6),
    )
    .expect("valid");

    let mut events = Vec::new();
    for command in route(&router, &[RawInput::Key('w'), RawInput::Key('a')]) {
        world::apply(&mut world, command, &mut events);
    }
    world::apply(&mut world, Command::Tick, &mut events);

    assert!(!query::is_defeated(&world));
    assert_eq!(query::snake(&world).current_direction(), Direction::Up);
    assert_eq!(query::snake(&world).head(), grid_snake_core::CellCoord::new(4, 7));
}
