//! A small real-time scene engine built around named entities and the
//! components attached to them.
//!
//! Entities are positioned containers; all behavior lives in components
//! ([`component::ComponentKind`]). A [`world::GameWorld`] owns every
//! component in a flat, z-ordered registry and walks it once per frame,
//! while a [`driver::GameDriver`] runs the fixed tick sequence: sample
//! input, apply it, update, clear, render. Drawing goes through the
//! [`render::Renderer`] trait so the engine never touches a concrete
//! surface.

pub mod anim;
pub mod bounds;
pub mod component;
pub mod driver;
pub mod entity;
pub mod input;
pub mod math;
pub mod render;
pub mod world;

pub use anim::{AnimationFrame, FramePlayback, SheetGeometryError, SpriteError, TileCycle};
pub use bounds::Aabb;
pub use component::{
    BoxBounds, Component, ComponentId, ComponentKind, Movement, PlayerInput, SceneNode, Sprite,
    TileAnimator, DEFAULT_MOVEMENT_Z_ORDER,
};
pub use driver::{GameDriver, MAX_TICK_DELTA, MS_PER_TIME_UNIT};
pub use entity::Entity;
pub use input::{InputBuffer, InputIntent, InputSnapshot};
pub use math::{Matrix2D, Transform, Vec2};
pub use render::{DrawOp, FrameRecorder, PixelRect, RenderError, Renderer};
pub use world::{
    GameWorld, WorldError, MOVEMENT_COMPONENT_NAME, WORLD_BOUNDS_COMPONENT, WORLD_ENTITY_NAME,
};
