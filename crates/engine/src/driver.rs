use std::time::Instant;

use tracing::{debug, trace};

use crate::input::InputBuffer;
use crate::render::Renderer;
use crate::world::GameWorld;

/// Milliseconds per engine time unit. A component's per-tick delta is the
/// wall-clock gap divided by this, so speeds are tuned in tenths of a
/// second rather than raw milliseconds.
pub const MS_PER_TIME_UNIT: f32 = 100.0;

/// Upper bound on a single tick's delta, in engine time units. A stall
/// longer than 250 ms advances the simulation by this much instead of
/// teleporting everything.
pub const MAX_TICK_DELTA: f32 = 2.5;

fn clamp_tick_delta(raw: f32) -> f32 {
    if raw.is_finite() && raw > 0.0 {
        raw.min(MAX_TICK_DELTA)
    } else {
        0.0
    }
}

/// Owns the world, the drawing surface, and the input buffer, and drives
/// them on a fixed per-tick sequence: sample input, apply it, update the
/// world, clear, render.
pub struct GameDriver<R: Renderer> {
    world: GameWorld,
    renderer: R,
    input: InputBuffer,
    running: bool,
    last_tick: Option<Instant>,
    frame_number: u64,
}

impl<R: Renderer> GameDriver<R> {
    pub fn new(world: GameWorld, renderer: R) -> Self {
        Self {
            world,
            renderer,
            input: InputBuffer::default(),
            running: false,
            last_tick: None,
            frame_number: 0,
        }
    }

    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut GameWorld {
        &mut self.world
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Producer-side handle: key and pointer callbacks write here, the
    /// tick consumes it.
    pub fn input_mut(&mut self) -> &mut InputBuffer {
        &mut self.input
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Starting an already-running driver is a no-op.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_tick = Some(Instant::now());
        debug!("driver_started");
    }

    /// Stopping is idempotent as well.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.last_tick = None;
        debug!(frames = self.frame_number, "driver_stopped");
    }

    /// One wall-clock tick. Does nothing while stopped.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        let now = Instant::now();
        let elapsed_ms = match self.last_tick {
            Some(last) => now.duration_since(last).as_secs_f32() * 1000.0,
            None => 0.0,
        };
        self.last_tick = Some(now);
        self.advance(clamp_tick_delta(elapsed_ms / MS_PER_TIME_UNIT));
    }

    /// One tick with an explicit delta in engine time units. The delta is
    /// clamped the same way wall-clock deltas are.
    pub fn tick_with_dt(&mut self, dt: f32) {
        if !self.running {
            return;
        }
        self.advance(clamp_tick_delta(dt));
    }

    fn advance(&mut self, dt: f32) {
        let snapshot = self.input.snapshot_for_tick();
        self.world.process_input(&snapshot);
        self.world.update(dt);
        self.renderer.clear();
        self.world.render(&mut self.renderer);
        self.frame_number += 1;
        trace!(frame = self.frame_number, dt, "tick");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentKind, Movement, PlayerInput};
    use crate::entity::Entity;
    use crate::input::InputIntent;
    use crate::math::Vec2;
    use crate::render::{DrawOp, FrameRecorder};
    use crate::world::{MOVEMENT_COMPONENT_NAME, WORLD_ENTITY_NAME};

    fn driver_with_player(speed: f32) -> GameDriver<FrameRecorder> {
        let mut world = GameWorld::new(640.0, 480.0);
        world
            .add_game_object(Entity::new("player", Vec2::ZERO))
            .expect("player");
        world
            .register_component(
                "player",
                MOVEMENT_COMPONENT_NAME,
                -1,
                ComponentKind::Movement(Movement::with_speed(speed)),
            )
            .expect("movement");
        world
            .register_component(
                "player",
                "input",
                0,
                ComponentKind::PlayerInput(PlayerInput::default()),
            )
            .expect("input");
        GameDriver::new(world, FrameRecorder::default())
    }

    #[test]
    fn held_right_arrow_moves_the_player_each_tick() {
        let mut driver = driver_with_player(2.0);
        driver.start();
        driver.input_mut().set_intent(InputIntent::MoveRight, true);

        for _ in 0..3 {
            driver.tick_with_dt(0.5);
        }

        let player = driver.world().game_object("player").expect("player");
        assert_eq!(player.x(), 3.0);
        assert_eq!(player.y(), 0.0);
        assert_eq!(driver.frame_number(), 3);
    }

    #[test]
    fn releasing_the_key_stops_the_player() {
        let mut driver = driver_with_player(2.0);
        driver.start();
        driver.input_mut().set_intent(InputIntent::MoveRight, true);
        driver.tick_with_dt(0.5);
        driver.input_mut().set_intent(InputIntent::MoveRight, false);
        driver.tick_with_dt(0.5);

        let player = driver.world().game_object("player").expect("player");
        assert_eq!(player.x(), 1.0);
    }

    #[test]
    fn oversized_delta_is_clamped() {
        let mut driver = driver_with_player(1.0);
        driver.start();
        driver.input_mut().set_intent(InputIntent::MoveRight, true);

        driver.tick_with_dt(10.0);

        let player = driver.world().game_object("player").expect("player");
        assert_eq!(player.x(), MAX_TICK_DELTA);
    }

    #[test]
    fn non_finite_and_negative_deltas_advance_nothing() {
        let mut driver = driver_with_player(1.0);
        driver.start();
        driver.input_mut().set_intent(InputIntent::MoveRight, true);

        driver.tick_with_dt(f32::NAN);
        driver.tick_with_dt(-1.0);

        let player = driver.world().game_object("player").expect("player");
        assert_eq!(player.x(), 0.0);
    }

    #[test]
    fn stopped_driver_ticks_are_no_ops() {
        let mut driver = driver_with_player(2.0);
        driver.input_mut().set_intent(InputIntent::MoveRight, true);

        driver.tick_with_dt(0.5);
        driver.tick();

        let player = driver.world().game_object("player").expect("player");
        assert_eq!(player.x(), 0.0);
        assert_eq!(driver.frame_number(), 0);
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut driver = driver_with_player(1.0);
        driver.start();
        driver.start();
        assert!(driver.is_running());

        driver.stop();
        driver.stop();
        assert!(!driver.is_running());
    }

    #[test]
    fn each_tick_clears_before_drawing() {
        let mut driver = driver_with_player(1.0);
        driver.start();
        driver.tick_with_dt(0.1);
        driver.tick_with_dt(0.1);

        let ops = driver.renderer().ops();
        let clears: Vec<usize> = ops
            .iter()
            .enumerate()
            .filter_map(|(i, op)| matches!(op, DrawOp::Clear).then_some(i))
            .collect();
        assert_eq!(clears.len(), 2);
        assert_eq!(clears[0], 0);
    }

    #[test]
    fn input_applies_before_update_within_the_same_tick() {
        // A key pressed between ticks must move the player on the very
        // next tick, not one tick late.
        let mut driver = driver_with_player(1.0);
        driver.start();
        driver.tick_with_dt(1.0);
        assert_eq!(
            driver.world().game_object("player").expect("player").x(),
            0.0
        );

        driver.input_mut().set_intent(InputIntent::MoveRight, true);
        driver.tick_with_dt(1.0);
        assert_eq!(
            driver.world().game_object("player").expect("player").x(),
            1.0
        );
    }

    #[test]
    fn world_root_is_reachable_through_the_driver() {
        let driver = driver_with_player(1.0);
        assert_eq!(driver.world().root().name(), WORLD_ENTITY_NAME);
    }
}
