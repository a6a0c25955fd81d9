use std::collections::VecDeque;

use tracing::debug;

use crate::object::SceneObject;
use crate::{ObjectId, Placeable, SceneAccess};

/// Notifications queued by the scene and drained once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneEvent {
    Spawned(ObjectId),
    Destroyed(ObjectId),
}

#[derive(Clone, Debug, Default)]
struct Slot {
    generation: u32,
    object: Option<SceneObject>,
}

/// Generational arena of scene objects.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    events: VecDeque<SceneEvent>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, object: SceneObject) -> ObjectId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        slot.object = Some(object);
        let id = ObjectId::new(index, slot.generation);
        self.events.push_back(SceneEvent::Spawned(id));
        id
    }

    /// Removes the object and queues a `Destroyed` event; observers holding
    /// the id learn about it when the events are drained.
    pub fn destroy(&mut self, id: ObjectId) -> Option<SceneObject> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        let object = slot.object.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        self.events.push_back(SceneEvent::Destroyed(id));
        debug!(%id, name = %object.name, "scene object destroyed");
        Some(object)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.object.as_ref()
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.object.as_mut()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.object
                .as_ref()
                .map(|object| (ObjectId::new(index as u32, slot.generation), object))
        })
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.object.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = SceneEvent> + '_ {
        self.events.drain(..)
    }
}

impl SceneAccess for Scene {
    fn placeable(&self, id: ObjectId) -> Option<&dyn Placeable> {
        self.get(id).map(|object| object as &dyn Placeable)
    }

    fn placeable_mut(&mut self, id: ObjectId) -> Option<&mut dyn Placeable> {
        self.get_mut(id).map(|object| object as &mut dyn Placeable)
    }
}
