// scene/element.rs
// Drawable element capability surface plus the arena the host stores
// elements in. The batchers never own elements; they hold ElementIds and
// resolve them through the arena each time. A removed element's stale id
// resolves to None, which every sweep treats as "drop and move on".

use crate::render::{Material, VertexBuffer};
use glam::Affine2;

/// Age tier of an element. New and recently-mutated elements are Gen0 and
/// render independently; long-stable elements end up in Gen2 and render
/// through a merged mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Generation {
    #[default]
    Gen0,
    Gen1,
    Gen2,
}

impl Generation {
    pub fn index(self) -> usize {
        match self {
            Self::Gen0 => 0,
            Self::Gen1 => 1,
            Self::Gen2 => 2,
        }
    }
}

/// Per-element batching record. Plain data with no back-pointer into the
/// batcher; only [`GenerationalBatcher`](crate::batch::GenerationalBatcher)
/// writes these fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchState {
    pub generation: Generation,
    pub stable_frames: u32,
    pub dirty_this_frame: bool,
}

/// The capability surface the batching core consumes from a drawable
/// element. The host scene graph implements this with whatever element
/// representation suits it.
pub trait Drawable {
    /// Material identity, or `None` for elements that cannot be batched and
    /// always render independently.
    fn material(&self) -> Option<Material>;

    /// Current world transform, snapshotted into batch members.
    fn world_matrix(&self) -> Affine2;

    /// Exports position/color/uv/index data pre-transformed by `world`.
    /// Returns `None` when the element currently has nothing to draw. The
    /// caller must call [`VertexBuffer::end`] exactly once per returned
    /// buffer after copying its contents.
    fn export_vertices(&mut self, world: Affine2) -> Option<VertexBuffer>;

    /// Toggles whether the element renders through a merged mesh (true) or
    /// independently (false). No other externally visible effect.
    fn set_batched(&mut self, batched: bool);

    /// Whether the element's own renderer participates in ordering.
    fn renderer_enabled(&self) -> bool;

    /// Render-order slot used when the element renders independently.
    fn set_sorting_order(&mut self, order: u32);

    fn batch_state(&self) -> &BatchState;

    fn batch_state_mut(&mut self) -> &mut BatchState;
}

/// Key into an [`ElementArena`]. Carries a slot version so ids left behind
/// by a removed element dangle safely instead of aliasing a new occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    index: u32,
    version: u32,
}

impl ElementId {
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

struct Slot<E> {
    version: u32,
    value: Option<E>,
}

/// Host-owned element table. The batchers borrow it per call and never
/// retain references across frames.
pub struct ElementArena<E> {
    slots: Vec<Slot<E>>,
    free: Vec<u32>,
    len: usize,
}

impl<E> ElementArena<E> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, element: E) -> ElementId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(element);
            ElementId {
                index,
                version: slot.version,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                version: 0,
                value: Some(element),
            });
            ElementId { index, version: 0 }
        }
    }

    pub fn remove(&mut self, id: ElementId) -> Option<E> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.version != id.version || slot.value.is_none() {
            return None;
        }
        slot.version += 1;
        self.free.push(id.index);
        self.len -= 1;
        slot.value.take()
    }

    pub fn get(&self, id: ElementId) -> Option<&E> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.version != id.version {
            return None;
        }
        slot.value.as_ref()
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut E> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.version != id.version {
            return None;
        }
        slot.value.as_mut()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<E> Default for ElementArena<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_roundtrip() {
        let mut arena: ElementArena<i32> = ElementArena::new();
        let a = arena.insert(1);
        let b = arena.insert(2);
        assert_eq!(arena.get(a), Some(&1));
        assert_eq!(arena.get(b), Some(&2));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn stale_id_after_remove_is_none() {
        let mut arena: ElementArena<i32> = ElementArena::new();
        let a = arena.insert(1);
        assert_eq!(arena.remove(a), Some(1));
        assert!(arena.get(a).is_none());
        assert!(!arena.contains(a));

        // Slot reuse must not resurrect the old id.
        let b = arena.insert(7);
        assert!(arena.get(a).is_none());
        assert_eq!(arena.get(b), Some(&7));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn double_remove_is_noop() {
        let mut arena: ElementArena<i32> = ElementArena::new();
        let a = arena.insert(1);
        assert_eq!(arena.remove(a), Some(1));
        assert_eq!(arena.remove(a), None);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn generation_ordering() {
        assert!(Generation::Gen0 < Generation::Gen1);
        assert!(Generation::Gen1 < Generation::Gen2);
        assert_eq!(Generation::default().index(), 0);
    }
}
