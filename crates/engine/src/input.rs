use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputIntent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
}

const INTENT_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
pub struct IntentStates {
    down: [bool; INTENT_COUNT],
}

impl IntentStates {
    pub fn set(&mut self, intent: InputIntent, is_down: bool) {
        self.down[intent.index()] = is_down;
    }

    pub fn is_down(&self, intent: InputIntent) -> bool {
        self.down[intent.index()]
    }
}

impl InputIntent {
    const fn index(self) -> usize {
        match self {
            InputIntent::MoveUp => 0,
            InputIntent::MoveDown => 1,
            InputIntent::MoveLeft => 2,
            InputIntent::MoveRight => 3,
        }
    }
}

/// Per-tick view of the input state, consumed once at the start of a tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    intents: IntentStates,
    cursor_position: Option<Vec2>,
    pointer_down: bool,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_down(&self, intent: InputIntent) -> bool {
        self.intents.is_down(intent)
    }

    pub fn with_intent_down(mut self, intent: InputIntent, is_down: bool) -> Self {
        self.intents.set(intent, is_down);
        self
    }

    pub fn with_cursor_position(mut self, cursor_position: Option<Vec2>) -> Self {
        self.cursor_position = cursor_position;
        self
    }

    pub fn with_pointer_down(mut self, pointer_down: bool) -> Self {
        self.pointer_down = pointer_down;
        self
    }

    pub fn cursor_position(&self) -> Option<Vec2> {
        self.cursor_position
    }

    pub fn pointer_down(&self) -> bool {
        self.pointer_down
    }
}

/// Buffer between the external event source and the tick loop. Events land
/// here at arbitrary times as plain held state; the loop samples it exactly
/// once per tick via `snapshot_for_tick`. Cursor writes are last-write-wins.
#[derive(Debug, Default)]
pub struct InputBuffer {
    intents: IntentStates,
    cursor_position: Option<Vec2>,
    pointer_down: bool,
}

impl InputBuffer {
    pub fn set_intent(&mut self, intent: InputIntent, is_down: bool) {
        self.intents.set(intent, is_down);
    }

    pub fn set_cursor_position(&mut self, x: f32, y: f32) {
        self.cursor_position = Some(Vec2::new(x, y));
    }

    pub fn clear_cursor_position(&mut self) {
        self.cursor_position = None;
    }

    pub fn set_pointer_down(&mut self, pointer_down: bool) {
        self.pointer_down = pointer_down;
    }

    pub fn snapshot_for_tick(&self) -> InputSnapshot {
        InputSnapshot {
            intents: self.intents,
            cursor_position: self.cursor_position,
            pointer_down: self.pointer_down,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_intents_persist_across_snapshots() {
        let mut buffer = InputBuffer::default();
        buffer.set_intent(InputIntent::MoveRight, true);

        let first = buffer.snapshot_for_tick();
        let second = buffer.snapshot_for_tick();

        assert!(first.is_down(InputIntent::MoveRight));
        assert!(second.is_down(InputIntent::MoveRight));
    }

    #[test]
    fn release_clears_intent() {
        let mut buffer = InputBuffer::default();
        buffer.set_intent(InputIntent::MoveUp, true);
        buffer.set_intent(InputIntent::MoveUp, false);

        assert!(!buffer.snapshot_for_tick().is_down(InputIntent::MoveUp));
    }

    #[test]
    fn cursor_position_is_last_write_wins() {
        let mut buffer = InputBuffer::default();
        buffer.set_cursor_position(10.0, 20.0);
        buffer.set_cursor_position(30.0, 40.0);

        let snapshot = buffer.snapshot_for_tick();
        assert_eq!(snapshot.cursor_position(), Some(Vec2::new(30.0, 40.0)));
    }

    #[test]
    fn cursor_can_leave_the_surface() {
        let mut buffer = InputBuffer::default();
        buffer.set_cursor_position(5.0, 5.0);
        buffer.clear_cursor_position();
        assert_eq!(buffer.snapshot_for_tick().cursor_position(), None);
    }

    #[test]
    fn pointer_down_round_trips() {
        let mut buffer = InputBuffer::default();
        buffer.set_pointer_down(true);
        assert!(buffer.snapshot_for_tick().pointer_down());
        buffer.set_pointer_down(false);
        assert!(!buffer.snapshot_for_tick().pointer_down());
    }

    #[test]
    fn opposite_intents_are_independent() {
        let mut buffer = InputBuffer::default();
        buffer.set_intent(InputIntent::MoveLeft, true);
        buffer.set_intent(InputIntent::MoveRight, true);

        let snapshot = buffer.snapshot_for_tick();
        assert!(snapshot.is_down(InputIntent::MoveLeft));
        assert!(snapshot.is_down(InputIntent::MoveRight));
    }
}
