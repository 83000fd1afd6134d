//! Headless demo build of the Drift scene: assembles the world, drives a
//! fixed number of ticks with scripted input, and logs what the player
//! would have seen. The drawing surface is a recording renderer, so the
//! binary runs anywhere.

mod panel;

use std::thread;
use std::time::Duration;

use scene_engine::{
    BoxBounds, ComponentKind, Entity, FrameRecorder, GameDriver, GameWorld, InputIntent, Movement,
    PlayerInput, SheetGeometryError, Sprite, SpriteError, TileAnimator, Vec2, WorldError,
    DEFAULT_MOVEMENT_Z_ORDER, MOVEMENT_COMPONENT_NAME,
};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::panel::{parse_game_info, PanelError};

const WORLD_WIDTH: f32 = 640.0;
const WORLD_HEIGHT: f32 = 360.0;

const PLAYER_NAME: &str = "player";
const PLAYER_START: Vec2 = Vec2::new(-200.0, 40.0);
const PLAYER_SPEED: f32 = 2.0;
const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 32.0);
const PLAYER_WALK_FPS: f32 = 8.0;

const CAMPFIRE_NAME: &str = "campfire";
const CAMPFIRE_POSITION: Vec2 = Vec2::new(120.0, 60.0);
const CAMPFIRE_SHEET: &str = "sheets/campfire.png";
const CAMPFIRE_SHEET_SIZE: (u32, u32) = (128, 32);
const CAMPFIRE_TILE_SIZE: (u32, u32) = (32, 32);
const CAMPFIRE_FRAME_DURATION: f32 = 0.8;
const CAMPFIRE_SIZE: Vec2 = Vec2::new(32.0, 32.0);

const DEMO_TICKS: u32 = 240;
const TICK_INTERVAL: Duration = Duration::from_millis(16);

const GAME_INFO_JSON: &str = include_str!("../assets/game_info.json");

#[derive(Debug, Error)]
enum GameError {
    #[error(transparent)]
    World(#[from] WorldError),
    #[error(transparent)]
    Sprite(#[from] SpriteError),
    #[error(transparent)]
    Sheet(#[from] SheetGeometryError),
    #[error(transparent)]
    Panel(#[from] PanelError),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}

fn player_walk_frames() -> Vec<String> {
    (0..4)
        .map(|index| format!("sprites/player/walk_{index}.png"))
        .collect()
}

fn build_world() -> Result<GameWorld, GameError> {
    let mut world = GameWorld::new(WORLD_WIDTH, WORLD_HEIGHT);

    world.add_game_object(Entity::new("backdrop", Vec2::ZERO))?;
    let backdrop = Sprite::new(
        vec!["sprites/camp_night.png".to_string()],
        0.0,
        false,
        Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
    )?;
    world.register_component("backdrop", "scenery", -10, ComponentKind::Sprite(backdrop))?;

    world.add_game_object(Entity::new(PLAYER_NAME, PLAYER_START))?;
    world.register_component(
        PLAYER_NAME,
        MOVEMENT_COMPONENT_NAME,
        DEFAULT_MOVEMENT_Z_ORDER,
        ComponentKind::Movement(Movement::with_speed(PLAYER_SPEED)),
    )?;
    world.register_component(
        PLAYER_NAME,
        "input",
        0,
        ComponentKind::PlayerInput(PlayerInput::default()),
    )?;
    let walk = Sprite::new(player_walk_frames(), PLAYER_WALK_FPS, true, PLAYER_SIZE)?;
    world.register_component(PLAYER_NAME, "sprite", 1, ComponentKind::Sprite(walk))?;

    world.add_game_object(Entity::new(CAMPFIRE_NAME, CAMPFIRE_POSITION))?;
    let flames = TileAnimator::new(
        CAMPFIRE_SHEET,
        CAMPFIRE_SHEET_SIZE,
        CAMPFIRE_TILE_SIZE,
        CAMPFIRE_FRAME_DURATION,
        0,
        CAMPFIRE_SIZE,
    )?;
    world.register_component(CAMPFIRE_NAME, "flames", 0, ComponentKind::TileAnimator(flames))?;
    world.register_component(
        CAMPFIRE_NAME,
        "hitbox",
        0,
        ComponentKind::BoxBounds(BoxBounds::new(CAMPFIRE_SIZE)),
    )?;

    Ok(world)
}

/// Scripted session: walk right for the first half of the run, let go,
/// and click on the campfire near the end.
fn run_demo(driver: &mut GameDriver<FrameRecorder>) {
    driver.start();
    driver.input_mut().set_intent(InputIntent::MoveRight, true);

    let mut draw_ops = 0usize;
    for tick in 0..DEMO_TICKS {
        if tick == DEMO_TICKS / 2 {
            driver.input_mut().set_intent(InputIntent::MoveRight, false);
        }
        if tick == DEMO_TICKS - 10 {
            driver
                .input_mut()
                .set_cursor_position(CAMPFIRE_POSITION.x, CAMPFIRE_POSITION.y);
            driver.input_mut().set_pointer_down(true);
            report_inspection(driver);
        }

        driver.tick();
        draw_ops += driver.renderer_mut().take_ops().len();
        thread::sleep(TICK_INTERVAL);
    }

    driver.stop();
    let player = driver
        .world()
        .game_object(PLAYER_NAME)
        .map(Entity::position)
        .unwrap_or(Vec2::ZERO);
    info!(
        frames = driver.frame_number(),
        draw_ops,
        player_x = player.x,
        player_y = player.y,
        "demo_finished"
    );
}

fn report_inspection(driver: &GameDriver<FrameRecorder>) {
    let world = driver.world();
    let hit = world
        .game_object(CAMPFIRE_NAME)
        .and_then(|campfire| campfire.component_id("hitbox"))
        .and_then(|id| world.component_contains_point(id, CAMPFIRE_POSITION).ok());
    match hit {
        Some(true) => info!(target_entity = CAMPFIRE_NAME, "inspected"),
        _ => info!("nothing to inspect here"),
    }
}

fn run() -> Result<(), GameError> {
    let game_info = parse_game_info(GAME_INFO_JSON)?;
    info!(
        game = %game_info.name,
        tag = %game_info.tag,
        year = game_info.year,
        sections = game_info.sections.len(),
        "panel_loaded"
    );

    let world = build_world()?;
    info!(
        objects = world.game_object_count(),
        width = WORLD_WIDTH,
        height = WORLD_HEIGHT,
        "world_ready"
    );

    let mut driver = GameDriver::new(world, FrameRecorder::default());
    run_demo(&mut driver);
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        error!(error = %err, "game failed to start");
        std::process::exit(1);
    }
}
