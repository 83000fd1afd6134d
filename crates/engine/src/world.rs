use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::bounds::Aabb;
use crate::component::{BoxBounds, Component, ComponentId, ComponentKind, PlayerInput};
use crate::entity::Entity;
use crate::input::InputSnapshot;
use crate::math::Vec2;
use crate::render::{PixelRect, Renderer};

/// Name of the root entity; reserved, no game object may use it.
pub const WORLD_ENTITY_NAME: &str = "world";
/// Name of the world-bounds box registered on the root at construction.
pub const WORLD_BOUNDS_COMPONENT: &str = "bounds";
/// Name a player-input component looks up on its owner for the sibling
/// movement component.
pub const MOVEMENT_COMPONENT_NAME: &str = "movement";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("component {0:?} was never registered in this world")]
    UnknownComponent(ComponentId),
    #[error("use after destroy: component {0:?} has been destroyed")]
    UseAfterDestroy(ComponentId),
    #[error("unknown entity {0:?}")]
    UnknownEntity(String),
    #[error("entity name {0:?} is reserved for the world root")]
    ReservedEntityName(String),
    #[error("component {component:?} on entity {entity:?} carries no box bounds")]
    MissingBounds { entity: String, component: String },
}

/// Root of the scene: named top-level game objects plus a flat registry of
/// every component, kept sorted by z-order with a lazy re-sort gated by a
/// dirty flag.
///
/// Components live in an id-indexed arena; entities hold name-to-id maps
/// and components hold owner names, so neither side can dangle. Destroying
/// a component removes it from the registry, the owner map, and the arena
/// in one call.
#[derive(Debug)]
pub struct GameWorld {
    root: Entity,
    game_objects: BTreeMap<String, Entity>,
    arena: Vec<Option<Component>>,
    registry: Vec<ComponentId>,
    dirty: bool,
}

impl GameWorld {
    pub fn new(width: f32, height: f32) -> Self {
        let mut world = Self {
            root: Entity::new(WORLD_ENTITY_NAME, Vec2::ZERO),
            game_objects: BTreeMap::new(),
            arena: Vec::new(),
            registry: Vec::new(),
            dirty: false,
        };
        let id = world.allocate(Component::new(
            WORLD_BOUNDS_COMPONENT.to_string(),
            WORLD_ENTITY_NAME.to_string(),
            0,
            ComponentKind::BoxBounds(BoxBounds::new(Vec2::new(width, height))),
        ));
        world.root.insert_component(WORLD_BOUNDS_COMPONENT.to_string(), id);
        debug!(width, height, "world_created");
        world
    }

    fn allocate(&mut self, component: Component) -> ComponentId {
        let id = ComponentId(self.arena.len() as u64);
        self.arena.push(Some(component));
        self.registry.push(id);
        self.dirty = true;
        id
    }

    pub fn add_game_object(&mut self, entity: Entity) -> Result<(), WorldError> {
        if entity.name() == WORLD_ENTITY_NAME {
            return Err(WorldError::ReservedEntityName(entity.name().to_string()));
        }
        let name = entity.name().to_string();
        if self.game_objects.contains_key(&name) {
            // Replacing a game object destroys the old one's components so
            // nothing stays reachable from the registry.
            self.remove_game_object(&name)?;
        }
        debug!(entity = %name, "game_object_added");
        self.game_objects.insert(name, entity);
        Ok(())
    }

    /// Detaches and destroys every component the object owns, then removes
    /// the object itself.
    pub fn remove_game_object(&mut self, name: &str) -> Result<Entity, WorldError> {
        let entity = self
            .game_objects
            .remove(name)
            .ok_or_else(|| WorldError::UnknownEntity(name.to_string()))?;
        for id in entity.component_ids() {
            self.registry.retain(|&registered| registered != id);
            if let Some(slot) = self.arena.get_mut(id.0 as usize) {
                *slot = None;
            }
        }
        self.dirty = true;
        debug!(entity = %name, "game_object_removed");
        Ok(entity)
    }

    pub fn game_object(&self, name: &str) -> Option<&Entity> {
        self.entity_ref(name)
    }

    pub fn game_object_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entity_mut(name)
    }

    pub fn game_object_count(&self) -> usize {
        self.game_objects.len()
    }

    pub fn root(&self) -> &Entity {
        &self.root
    }

    fn entity_ref(&self, name: &str) -> Option<&Entity> {
        if name == WORLD_ENTITY_NAME {
            Some(&self.root)
        } else {
            self.game_objects.get(name)
        }
    }

    fn entity_mut(&mut self, name: &str) -> Option<&mut Entity> {
        if name == WORLD_ENTITY_NAME {
            Some(&mut self.root)
        } else {
            self.game_objects.get_mut(name)
        }
    }

    /// Creates the component registered: appended to the arena and the
    /// flat registry, inserted into the owner's map. A name collision on
    /// the owner silently displaces the previous component, which is then
    /// destroyed so the registry cannot keep a detached component alive.
    pub fn register_component(
        &mut self,
        owner: &str,
        name: &str,
        z_order: i32,
        kind: ComponentKind,
    ) -> Result<ComponentId, WorldError> {
        if self.entity_ref(owner).is_none() {
            return Err(WorldError::UnknownEntity(owner.to_string()));
        }
        let id = self.allocate(Component::new(
            name.to_string(),
            owner.to_string(),
            z_order,
            kind,
        ));
        let displaced = match self.entity_mut(owner) {
            Some(entity) => entity.insert_component(name.to_string(), id),
            None => None,
        };
        if let Some(old) = displaced {
            self.registry.retain(|&registered| registered != old);
            if let Some(slot) = self.arena.get_mut(old.0 as usize) {
                *slot = None;
            }
            debug!(
                entity = %owner,
                component = %name,
                displaced = old.0,
                "component_displaced"
            );
        }
        debug!(entity = %owner, component = %name, z_order, "component_registered");
        Ok(id)
    }

    /// Removes the component from the registry, the owner's map, and the
    /// arena in one call. Destroying an already-destroyed component is a
    /// `UseAfterDestroy` error.
    pub fn destroy_component(&mut self, id: ComponentId) -> Result<(), WorldError> {
        let (owner, name) = {
            let component = self.component(id)?;
            (component.owner().to_string(), component.name().to_string())
        };
        self.registry.retain(|&registered| registered != id);
        if let Some(entity) = self.entity_mut(&owner) {
            if entity.component_id(&name) == Some(id) {
                entity.remove_component(&name);
            }
        }
        self.arena[id.0 as usize] = None;
        self.dirty = true;
        debug!(entity = %owner, component = %name, "component_destroyed");
        Ok(())
    }

    pub fn component(&self, id: ComponentId) -> Result<&Component, WorldError> {
        match self.arena.get(id.0 as usize) {
            None => Err(WorldError::UnknownComponent(id)),
            Some(None) => Err(WorldError::UseAfterDestroy(id)),
            Some(Some(component)) => Ok(component),
        }
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Result<&mut Component, WorldError> {
        match self.arena.get_mut(id.0 as usize) {
            None => Err(WorldError::UnknownComponent(id)),
            Some(None) => Err(WorldError::UseAfterDestroy(id)),
            Some(Some(component)) => Ok(component),
        }
    }

    /// World-space box for a bounds-carrying component.
    pub fn component_aabb(&self, id: ComponentId) -> Result<Aabb, WorldError> {
        let component = self.component(id)?;
        let owner_position = self
            .entity_ref(component.owner())
            .map(Entity::position)
            .unwrap_or(Vec2::ZERO);
        component
            .kind()
            .aabb(owner_position)
            .ok_or_else(|| WorldError::MissingBounds {
                entity: component.owner().to_string(),
                component: component.name().to_string(),
            })
    }

    pub fn components_intersect(
        &self,
        a: ComponentId,
        b: ComponentId,
    ) -> Result<bool, WorldError> {
        let box_a = self.component_aabb(a)?;
        let box_b = self.component_aabb(b)?;
        Ok(box_a.intersects(&box_b))
    }

    pub fn component_contains_point(
        &self,
        id: ComponentId,
        point: Vec2,
    ) -> Result<bool, WorldError> {
        Ok(self.component_aabb(id)?.contains(point))
    }

    /// The per-tick input-consumption step: every player-input component
    /// translates the held intents into a velocity and forwards it to its
    /// sibling movement component.
    pub fn process_input(&mut self, snapshot: &InputSnapshot) {
        let mut input_ids: Vec<(ComponentId, String)> = Vec::new();
        for (index, slot) in self.arena.iter().enumerate() {
            if let Some(component) = slot {
                if matches!(component.kind(), ComponentKind::PlayerInput(_)) {
                    input_ids.push((ComponentId(index as u64), component.owner().to_string()));
                }
            }
        }

        let velocity = PlayerInput::velocity_from_intents(snapshot);
        for (id, owner) in input_ids {
            if let Ok(component) = self.component_mut(id) {
                if let ComponentKind::PlayerInput(input) = component.kind_mut() {
                    input.track_pointer(snapshot);
                }
            }

            let movement_id = self
                .entity_ref(&owner)
                .and_then(|entity| entity.component_id(MOVEMENT_COMPONENT_NAME));
            let Some(movement_id) = movement_id else {
                // Programmer error: an input component without its sibling.
                error!(
                    entity = %owner,
                    "player input component has no sibling movement component"
                );
                continue;
            };
            match self.component_mut(movement_id) {
                Ok(component) => {
                    if let ComponentKind::Movement(movement) = component.kind_mut() {
                        movement.velocity = velocity;
                    } else {
                        error!(
                            entity = %owner,
                            "component under {MOVEMENT_COMPONENT_NAME:?} is not a movement component"
                        );
                    }
                }
                Err(err) => error!(entity = %owner, error = %err, "movement sibling unavailable"),
            }
        }
    }

    /// Advances world state: walks game objects only (never the flat
    /// registry) and delegates to each object's components in stable name
    /// order. Components on the root are not updated.
    pub fn update(&mut self, dt: f32) {
        let names: Vec<String> = self.game_objects.keys().cloned().collect();
        for name in names {
            let ids: Vec<ComponentId> = match self.game_objects.get(&name) {
                Some(entity) => entity.component_ids().collect(),
                None => continue,
            };
            for id in ids {
                self.update_component(&name, id, dt);
            }
        }
    }

    fn update_component(&mut self, owner: &str, id: ComponentId, dt: f32) {
        let Some(slot) = self.arena.get_mut(id.0 as usize) else {
            return;
        };
        let Some(component) = slot.as_mut() else {
            return;
        };
        match component.kind_mut() {
            ComponentKind::Movement(movement) => {
                let delta = movement.step(dt);
                if let Some(entity) = self.game_objects.get_mut(owner) {
                    let position = entity.position();
                    entity.set_position(position.add(delta));
                }
            }
            ComponentKind::Sprite(sprite) => sprite.playback.advance(dt),
            ComponentKind::TileAnimator(tile) => tile.cycle.advance(dt),
            ComponentKind::Scene(_)
            | ComponentKind::BoxBounds(_)
            | ComponentKind::PlayerInput(_) => {}
        }
    }

    fn sort_registry_if_dirty(&mut self) {
        if !self.dirty {
            return;
        }
        let arena = &self.arena;
        self.registry.sort_by_key(|id| {
            arena
                .get(id.0 as usize)
                .and_then(|slot| slot.as_ref())
                .map(Component::z_order)
                .unwrap_or(i32::MAX)
        });
        self.dirty = false;
    }

    /// Registry handles in draw order, re-sorting lazily if needed.
    pub fn render_order(&mut self) -> Vec<ComponentId> {
        self.sort_registry_if_dirty();
        self.registry.clone()
    }

    pub fn is_render_order_dirty(&self) -> bool {
        self.dirty
    }

    /// Draws every visual component in global z-order (registry order, not
    /// per-object order), so a background sprite on one object is
    /// guaranteed to land under a foreground sprite on another. A failed
    /// draw is isolated to its component; the rest of the frame proceeds.
    pub fn render(&mut self, renderer: &mut dyn Renderer) {
        self.sort_registry_if_dirty();
        for &id in &self.registry {
            let Some(component) = self.arena.get(id.0 as usize).and_then(|slot| slot.as_ref())
            else {
                continue;
            };
            let Some(owner) = self.entity_ref(component.owner()) else {
                continue;
            };
            let owner_matrix = owner.transform.matrix();
            let result = match component.kind() {
                ComponentKind::Sprite(sprite) => {
                    renderer.save();
                    renderer.apply_transform(owner_matrix);
                    renderer.save();
                    renderer.apply_transform(sprite.node.transform.matrix());
                    let drawn =
                        renderer.draw_image(sprite.playback.current_image(), None, sprite.size);
                    renderer.restore();
                    renderer.restore();
                    drawn
                }
                ComponentKind::TileAnimator(tile) => {
                    let frame = tile.cycle.current_frame();
                    let source = PixelRect {
                        x: frame.offset_x as f32,
                        y: frame.offset_y as f32,
                        width: tile.cycle.tile_width() as f32,
                        height: tile.cycle.tile_height() as f32,
                    };
                    renderer.save();
                    renderer.apply_transform(owner_matrix);
                    renderer.save();
                    renderer.apply_transform(tile.node.transform.matrix());
                    let drawn =
                        renderer.draw_image(tile.cycle.sheet(), Some(source), tile.target_size);
                    renderer.restore();
                    renderer.restore();
                    drawn
                }
                ComponentKind::Movement(_)
                | ComponentKind::Scene(_)
                | ComponentKind::BoxBounds(_)
                | ComponentKind::PlayerInput(_) => Ok(()),
            };
            if let Err(err) = result {
                warn!(
                    entity = %component.owner(),
                    component = %component.name(),
                    error = %err,
                    "component_render_failed"
                );
            }
        }
    }
}
