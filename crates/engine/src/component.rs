use crate::anim::{FramePlayback, SheetGeometryError, SpriteError, TileCycle};
use crate::bounds::Aabb;
use crate::input::{InputIntent, InputSnapshot};
use crate::math::{Transform, Vec2};

/// Handle to a component slot in the world arena. Ids are never reused;
/// destroyed slots stay tombstoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(pub u64);

/// Named behavior unit owned by exactly one entity. The owner field is a
/// back-reference (the owning entity's name), not an ownership edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    name: String,
    owner: String,
    z_order: i32,
    kind: ComponentKind,
}

impl Component {
    pub(crate) fn new(name: String, owner: String, z_order: i32, kind: ComponentKind) -> Self {
        Self {
            name,
            owner,
            z_order,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn z_order(&self) -> i32 {
        self.z_order
    }

    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut ComponentKind {
        &mut self.kind
    }
}

/// Flattened capability set. Each variant carries its full payload; bounds
/// queries exist only on the variants that embed box geometry, so a missing
/// capability is unrepresentable rather than a call-time failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Movement(Movement),
    Scene(SceneNode),
    BoxBounds(BoxBounds),
    Sprite(Sprite),
    TileAnimator(TileAnimator),
    PlayerInput(PlayerInput),
}

impl ComponentKind {
    /// World-space box for variants that carry one, given the owning
    /// entity's position.
    pub fn aabb(&self, owner_position: Vec2) -> Option<Aabb> {
        match self {
            ComponentKind::BoxBounds(bounds) => Some(bounds.aabb(owner_position)),
            ComponentKind::Sprite(sprite) => Some(Aabb::from_center_size(
                sprite.node.world_position(owner_position),
                sprite.size,
            )),
            ComponentKind::Movement(_)
            | ComponentKind::Scene(_)
            | ComponentKind::TileAnimator(_)
            | ComponentKind::PlayerInput(_) => None,
        }
    }
}

pub const DEFAULT_MOVEMENT_Z_ORDER: i32 = -1;

/// Integrates a velocity vector into the owning entity's position each
/// tick. No bounds checking; staying inside the world is the collision
/// component's concern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    pub speed: f32,
    pub velocity: Vec2,
}

impl Movement {
    pub fn with_speed(speed: f32) -> Self {
        Self {
            speed,
            velocity: Vec2::ZERO,
        }
    }

    /// Position delta for one tick, per axis.
    pub fn step(&self, dt: f32) -> Vec2 {
        self.velocity.scaled(self.speed * dt)
    }
}

/// Local transform relative to the owning entity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneNode {
    pub transform: Transform,
}

impl SceneNode {
    pub fn at(position: Vec2) -> Self {
        Self {
            transform: Transform::from_position(position),
        }
    }

    /// World-space position: local offset composed with the owner.
    pub fn world_position(&self, owner_position: Vec2) -> Vec2 {
        owner_position.add(self.transform.position)
    }
}

/// Axis-aligned rectangle centered on the node's world-space position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxBounds {
    pub node: SceneNode,
    pub size: Vec2,
}

impl BoxBounds {
    pub fn new(size: Vec2) -> Self {
        Self {
            node: SceneNode::default(),
            size,
        }
    }

    pub fn at(position: Vec2, size: Vec2) -> Self {
        Self {
            node: SceneNode::at(position),
            size,
        }
    }

    pub fn aabb(&self, owner_position: Vec2) -> Aabb {
        Aabb::from_center_size(self.node.world_position(owner_position), self.size)
    }
}

/// Discrete image-frame animation drawn at the node's local transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub node: SceneNode,
    pub size: Vec2,
    pub playback: FramePlayback,
}

impl Sprite {
    pub fn new(
        frames: Vec<String>,
        frames_per_second: f32,
        looping: bool,
        size: Vec2,
    ) -> Result<Self, SpriteError> {
        Ok(Self {
            node: SceneNode::default(),
            size,
            playback: FramePlayback::new(frames, frames_per_second, looping)?,
        })
    }
}

/// Sprite-sheet playback drawn at the node's local transform, scaled to a
/// target on-screen size.
#[derive(Debug, Clone, PartialEq)]
pub struct TileAnimator {
    pub node: SceneNode,
    pub target_size: Vec2,
    pub cycle: TileCycle,
}

impl TileAnimator {
    pub fn new(
        sheet: impl Into<String>,
        sheet_size: (u32, u32),
        tile_size: (u32, u32),
        frame_duration: f32,
        start_index: usize,
        target_size: Vec2,
    ) -> Result<Self, SheetGeometryError> {
        Ok(Self {
            node: SceneNode::default(),
            target_size,
            cycle: TileCycle::new(sheet, sheet_size, tile_size, frame_duration, start_index)?,
        })
    }
}

/// Translates held direction intents into a movement velocity for the
/// sibling `movement` component. Pointer state is tracked for later use but
/// never consumed by movement logic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerInput {
    pub cursor_position: Option<Vec2>,
    pub pointer_down: bool,
}

impl PlayerInput {
    /// Velocity from the four direction intents: -1, 0, or 1 per axis.
    /// Diagonals are deliberately not normalized, so diagonal movement is
    /// faster than axis-aligned movement.
    pub fn velocity_from_intents(snapshot: &InputSnapshot) -> Vec2 {
        let mut velocity = Vec2::ZERO;
        if snapshot.is_down(InputIntent::MoveLeft) {
            velocity.x = -1.0;
        }
        if snapshot.is_down(InputIntent::MoveRight) {
            velocity.x = 1.0;
        }
        if snapshot.is_down(InputIntent::MoveUp) {
            velocity.y = -1.0;
        }
        if snapshot.is_down(InputIntent::MoveDown) {
            velocity.y = 1.0;
        }
        velocity
    }

    pub fn track_pointer(&mut self, snapshot: &InputSnapshot) {
        self.cursor_position = snapshot.cursor_position();
        self.pointer_down = snapshot.pointer_down();
    }
}
