use crate::layer::{Layer, LayerId};
use rune_events::Event;

struct LayerEntry {
    id: LayerId,
    layer: Box<dyn Layer>,
}

/// Ordered layers: a normal prefix followed by an overlay suffix.
///
/// Iteration runs bottom-to-top (normals first, overlays last); event
/// dispatch runs top-to-bottom. Dropping the stack detaches every layer.
pub struct LayerStack {
    layers: Vec<LayerEntry>,
    /// Boundary between normal layers and overlays.
    insert_index: usize,
    next_id: u64,
}

impl LayerStack {
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            insert_index: 0,
            next_id: 0,
        }
    }

    /// Insert below all overlays and attach.
    pub fn push_layer(&mut self, layer: Box<dyn Layer>) -> LayerId {
        let id = self.allocate_id();
        self.layers.insert(self.insert_index, LayerEntry { id, layer });
        self.insert_index += 1;
        let entry = &mut self.layers[self.insert_index - 1];
        tracing::debug!(layer = entry.layer.name(), id = id.0, "push layer");
        entry.layer.on_attach();
        id
    }

    /// Append on top of everything and attach.
    pub fn push_overlay(&mut self, layer: Box<dyn Layer>) -> LayerId {
        let id = self.allocate_id();
        let index = self.layers.len();
        self.layers.push(LayerEntry { id, layer });
        let entry = &mut self.layers[index];
        tracing::debug!(layer = entry.layer.name(), id = id.0, "push overlay");
        entry.layer.on_attach();
        id
    }

    /// Remove a normal layer and detach it. Overlay ids yield `None`.
    pub fn pop_layer(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        let index = self.layers[..self.insert_index]
            .iter()
            .position(|entry| entry.id == id)?;
        self.insert_index -= 1;
        Some(self.detach_at(index))
    }

    /// Remove an overlay and detach it. Normal layer ids yield `None`.
    pub fn pop_overlay(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        let offset = self.layers[self.insert_index..]
            .iter()
            .position(|entry| entry.id == id)?;
        Some(self.detach_at(self.insert_index + offset))
    }

    /// Deliver `event` top-to-bottom until a layer marks it handled.
    pub fn dispatch_event(&mut self, event: &mut Event) {
        for entry in self.layers.iter_mut().rev() {
            if event.handled {
                break;
            }
            entry.layer.on_event(event);
            if event.handled {
                tracing::trace!(layer = entry.layer.name(), %event, "event handled");
            }
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &(dyn Layer + 'static)> {
        self.layers.iter().map(|entry| entry.layer.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut (dyn Layer + 'static)> {
        self.layers.iter_mut().map(|entry| entry.layer.as_mut())
    }

    pub fn ids(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.layers.iter().map(|entry| entry.id)
    }

    pub fn names(&self) -> Vec<&str> {
        self.layers.iter().map(|entry| entry.layer.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn overlay_count(&self) -> usize {
        self.layers.len() - self.insert_index
    }

    fn allocate_id(&mut self) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn detach_at(&mut self, index: usize) -> Box<dyn Layer> {
        let mut entry = self.layers.remove(index);
        tracing::debug!(layer = entry.layer.name(), id = entry.id.0, "pop layer");
        entry.layer.on_detach();
        entry.layer
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LayerStack {
    fn drop(&mut self) {
        for entry in self.layers.iter_mut().rev() {
            entry.layer.on_detach();
        }
    }
}
