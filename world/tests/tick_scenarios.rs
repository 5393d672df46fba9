use std::collections::HashSet;

use grid_snake_core::{CellCoord, Command, DefeatCause, Direction, Event};
use grid_snake_world::{self as world, query, GameConfig, World};

fn build(config: GameConfig) -> World {
    World::new(config).expect("valid config")
}

fn tick(world: &mut World) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick, &mut events);
    events
}

fn steer(world: &mut World, direction: Direction) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::RequestDirection { direction }, &mut events);
    events
}

fn cells(points: &[(u32, u32)]) -> Vec<CellCoord> {
    points.iter().map(|&(x, y)| CellCoord::new(x, y)).collect()
}

#[test]
fn bordered_ten_by_ten_starts_left_of_centre_and_moves_right() {
    let first_step = CellCoord::new(5, 6);
    let mut world = (0..64)
        .map(|seed| build(GameConfig::bordered(10, 10).with_food_seed(seed)))
        .find(|world| query::food(world) != Some(first_step))
        .expect("some seed places food away from the first step");
    assert_eq!(query::snake_cells(&world), cells(&[(2, 6), (3, 6), (4, 6)]));
    assert_eq!(query::snake(&world).current_direction(), Direction::Right);
    let food = query::food(&world);

    let events = tick(&mut world);
    assert_eq!(
        events,
        vec![
            Event::Ticked { tick: 1 },
            Event::SnakeAdvanced {
                head: first_step,
                grew: false,
            },
        ]
    );
    assert_eq!(query::snake_cells(&world), cells(&[(3, 6), (4, 6), (5, 6)]));
    assert_eq!(query::score(&world), 0);
    assert_eq!(query::food(&world), food);
}

#[test]
fn bordered_grid_defeats_at_the_east_wall() {
    let mut world = build(GameConfig::bordered(10, 10).with_food_seed(5));

    for expected_x in 5..=8 {
        let _ = tick(&mut world);
        assert!(!query::is_defeated(&world));
        assert_eq!(query::snake(&world).head(), CellCoord::new(expected_x, 6));
    }

    let events = tick(&mut world);
    assert!(query::is_defeated(&world));
    assert_eq!(query::defeat_cause(&world), Some(DefeatCause::WallCollision));
    assert_eq!(
        events.last(),
        Some(&Event::Defeated {
            head: CellCoord::new(9, 6),
            cause: DefeatCause::WallCollision,
        })
    );
    assert_eq!(query::snake(&world).head(), CellCoord::new(8, 6));
}

#[test]
fn open_grid_wraps_back_to_the_start_column() {
    let config = GameConfig::bordered(10, 10)
        .with_walls(false)
        .with_food_seed(9);
    let mut world = build(config);

    for step in 1..=10u32 {
        let _ = tick(&mut world);
        let head = query::snake(&world).head();
        assert!(head.x() < 10 && head.y() < 10);
        assert_eq!(head, CellCoord::new((4 + step) % 10, 6));
    }
    assert!(!query::is_defeated(&world));
}

#[test]
fn wall_marker_cells_block_food_and_the_head() {
    let layout = ["..#..", ".....", "....."];
    let config = GameConfig::from_map(&layout, '#')
        .with_start(2, Direction::Right)
        .with_food_seed(21);
    let mut world = build(config);
    let wall = CellCoord::new(2, 2);

    assert!(query::geometry(&world).is_wall(wall));
    assert_eq!(query::snake_cells(&world), cells(&[(0, 2), (1, 2)]));

    for _ in 0..64 {
        assert_ne!(query::food(&world), Some(wall));
        let mut events = Vec::new();
        world::apply(&mut world, Command::Reset, &mut events);
    }

    let events = tick(&mut world);
    assert!(query::is_defeated(&world));
    assert_eq!(
        events,
        vec![
            Event::Ticked { tick: 1 },
            Event::Defeated {
                head: wall,
                cause: DefeatCause::WallCollision,
            },
        ]
    );
}

#[test]
fn eating_grows_by_one_and_scores_one() {
    let config = GameConfig::from_map(&["...#"], '#').with_start(2, Direction::Right);
    let mut world = build(config);
    assert_eq!(query::snake_cells(&world), cells(&[(0, 0), (1, 0)]));
    assert_eq!(query::food(&world), Some(CellCoord::new(2, 0)));

    let events = tick(&mut world);
    assert_eq!(
        events,
        vec![
            Event::Ticked { tick: 1 },
            Event::SnakeAdvanced {
                head: CellCoord::new(2, 0),
                grew: true,
            },
            Event::FoodEaten {
                cell: CellCoord::new(2, 0),
            },
            Event::ScoreChanged { score: 1 },
            Event::FoodSpawned { cell: None },
        ]
    );
    assert_eq!(query::snake(&world).len(), 3);
    assert_eq!(query::score(&world), 1);
    assert_eq!(query::food(&world), None);
}

#[test]
fn sliding_keeps_length_unchanged() {
    let config = GameConfig::bordered(12, 12)
        .with_walls(false)
        .with_food_seed(77);
    let mut world = build(config);

    for _ in 0..40 {
        let before_len = query::snake(&world).len();
        let before_score = query::score(&world);
        let events = tick(&mut world);
        let grew = events.iter().any(|event| {
            matches!(event, Event::SnakeAdvanced { grew: true, .. })
        });
        if grew {
            assert_eq!(query::snake(&world).len(), before_len + 1);
            assert_eq!(query::score(&world), before_score + 1);
        } else if !query::is_defeated(&world) {
            assert_eq!(query::snake(&world).len(), before_len);
            assert_eq!(query::score(&world), before_score);
        }
    }
}

#[test]
fn moving_onto_the_vacating_tail_is_legal() {
    let config = GameConfig::bordered(4, 1)
        .with_walls(false)
        .with_start(4, Direction::Right);
    let mut world = build(config);
    assert_eq!(
        query::snake_cells(&world),
        cells(&[(2, 0), (3, 0), (0, 0), (1, 0)])
    );
    assert_eq!(query::food(&world), None);

    for _ in 0..12 {
        let events = tick(&mut world);
        assert!(!query::is_defeated(&world));
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::FoodEaten { .. })));
        assert_eq!(query::snake(&world).len(), 4);
    }
    assert_eq!(query::score(&world), 0);
}

#[test]
fn turning_into_the_body_is_a_self_collision() {
    let config = GameConfig::bordered(10, 10)
        .with_walls(false)
        .with_start(5, Direction::Right)
        .with_food_seed(4);
    let mut world = build(config);

    let _ = steer(&mut world, Direction::Up);
    let _ = tick(&mut world);
    let _ = steer(&mut world, Direction::Left);
    let _ = tick(&mut world);
    let _ = steer(&mut world, Direction::Down);
    let events = tick(&mut world);

    assert_eq!(
        events.last(),
        Some(&Event::Defeated {
            head: CellCoord::new(3, 6),
            cause: DefeatCause::SelfCollision,
        })
    );
}

#[test]
fn ticks_after_defeat_change_nothing() {
    let layout = ["..#..", ".....", "....."];
    let config = GameConfig::from_map(&layout, '#').with_start(2, Direction::Right);
    let mut world = build(config);
    let _ = tick(&mut world);
    assert!(query::is_defeated(&world));

    let frozen = query::snapshot(&world);
    for _ in 0..5 {
        assert!(tick(&mut world).is_empty());
        assert!(steer(&mut world, Direction::Down).is_empty());
    }
    assert_eq!(query::snapshot(&world), frozen);
}

#[test]
fn reset_restores_the_start_layout() {
    let mut world = build(GameConfig::bordered(10, 10).with_food_seed(8));
    let initial = query::snake_cells(&world);
    while !query::is_defeated(&world) {
        let _ = tick(&mut world);
    }

    let mut events = Vec::new();
    world::apply(&mut world, Command::Reset, &mut events);

    assert!(!query::is_defeated(&world));
    assert_eq!(query::score(&world), 0);
    assert_eq!(query::tick_index(&world), 0);
    assert_eq!(query::snake(&world).len(), 3);
    assert_eq!(query::snake_cells(&world), initial);
    assert_eq!(query::snake(&world).current_direction(), Direction::Right);
    assert_eq!(events[0], Event::SessionReset);
}

#[test]
fn opposite_requests_before_a_tick_buffer_one_change() {
    let mut world = build(GameConfig::bordered(10, 10).with_food_seed(1));

    assert_eq!(
        steer(&mut world, Direction::Up),
        vec![Event::DirectionQueued {
            direction: Direction::Up
        }]
    );
    assert!(steer(&mut world, Direction::Down).is_empty());
    assert_eq!(query::snake(&world).pending_direction(), Direction::Up);

    let _ = tick(&mut world);
    assert_eq!(query::snake(&world).head(), CellCoord::new(4, 7));
    assert!(steer(&mut world, Direction::Down).is_empty());
    assert_eq!(query::snake(&world).pending_direction(), Direction::Up);
}

#[test]
fn snake_never_holds_duplicate_cells_while_running() {
    let config = GameConfig::bordered(12, 9)
        .with_walls(false)
        .with_start(4, Direction::Right)
        .with_food_seed(0xfeed);
    let mut world = build(config);
    let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    for step in 0..400usize {
        if step % 7 == 0 {
            let _ = steer(&mut world, turns[(step / 7) % turns.len()]);
        }
        let _ = tick(&mut world);

        if query::is_defeated(&world) {
            let mut events = Vec::new();
            world::apply(&mut world, Command::Reset, &mut events);
            continue;
        }

        let snake = query::snake_cells(&world);
        let unique: HashSet<CellCoord> = snake.iter().copied().collect();
        assert_eq!(unique.len(), snake.len(), "duplicate cell at step {step}");
        if let Some(food) = query::food(&world) {
            assert!(!unique.contains(&food));
        }
    }
}
