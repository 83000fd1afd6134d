use std::collections::BTreeMap;

use crate::component::ComponentId;
use crate::math::{Transform, Vec2};

/// Named, positioned container of components. The map holds handles into
/// the world arena, one component per logical name; iteration order is the
/// stable name order.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: String,
    pub transform: Transform,
    components: BTreeMap<String, ComponentId>,
}

impl Entity {
    pub fn new(name: impl Into<String>, position: Vec2) -> Self {
        Self {
            name: name.into(),
            transform: Transform::from_position(position),
            components: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.transform.position = position;
    }

    pub fn x(&self) -> f32 {
        self.transform.position.x
    }

    pub fn y(&self) -> f32 {
        self.transform.position.y
    }

    pub fn component_id(&self, name: &str) -> Option<ComponentId> {
        self.components.get(name).copied()
    }

    /// Inserts under the given name, silently displacing any previous
    /// holder (defined behavior, not an error). Returns the displaced id so
    /// the world can destroy it and keep the registry consistent.
    pub(crate) fn insert_component(&mut self, name: String, id: ComponentId) -> Option<ComponentId> {
        self.components.insert(name, id)
    }

    pub(crate) fn remove_component(&mut self, name: &str) -> Option<ComponentId> {
        self.components.remove(name)
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Component handles in stable name order (the per-entity update
    /// order).
    pub fn component_ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.components.values().copied()
    }

    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }
}
