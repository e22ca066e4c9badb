// batch/generational.rs

use super::context::UpdateContext;
use super::mesh_batcher::MeshBatcher;
use crate::scene::{Drawable, ElementArena, ElementId, Generation, RenderRoot};
use crate::settings::BatcherSettings;

/// Counter snapshot for diagnostics panels.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatcherStats {
    pub gen0_count: usize,
    pub gen1_count: usize,
    pub gen2_count: usize,
    pub total_count: usize,
    pub batch_count: usize,
    pub total_vertex_count: usize,
}

/// Generational batching manager.
///
/// Borrows the generational GC model: elements enter Gen0 (volatile,
/// rendered independently), age into Gen1 after staying unchanged for
/// `promotion_threshold_gen1` frames, and into Gen2 after a further
/// `promotion_threshold_gen2` stable frames. Only Gen2 feeds the owned
/// [`MeshBatcher`], so merged meshes are rebuilt when stable membership
/// changes rather than every frame. Any mutation demotes an element straight
/// back to Gen0, the write-barrier analogue.
pub struct GenerationalBatcher {
    pub promotion_threshold_gen1: u32,
    pub promotion_threshold_gen2: u32,

    gen0: Vec<ElementId>,
    gen1: Vec<ElementId>,
    gen2: Vec<ElementId>,

    gen2_batcher: MeshBatcher,
    gen2_dirty: bool,

    // Staged promotions, applied only after both sweeps finish so an element
    // promoted this frame is never swept again in the same frame.
    promote_to_gen1: Vec<ElementId>,
    promote_to_gen2: Vec<ElementId>,
}

impl GenerationalBatcher {
    pub fn new(root: RenderRoot) -> Self {
        Self::with_settings(root, BatcherSettings::default())
    }

    pub fn with_settings(root: RenderRoot, settings: BatcherSettings) -> Self {
        Self {
            promotion_threshold_gen1: settings.promotion_threshold_gen1,
            promotion_threshold_gen2: settings.promotion_threshold_gen2,
            gen0: Vec::new(),
            gen1: Vec::new(),
            gen2: Vec::new(),
            gen2_batcher: MeshBatcher::with_settings(root, settings),
            gen2_dirty: false,
            promote_to_gen1: Vec::new(),
            promote_to_gen2: Vec::new(),
        }
    }

    /// Starts tracking an element at Gen0.
    pub fn add_element<E: Drawable>(&mut self, id: ElementId, elements: &mut ElementArena<E>) {
        let Some(element) = elements.get_mut(id) else {
            return;
        };
        let state = element.batch_state_mut();
        state.generation = Generation::Gen0;
        state.stable_frames = 0;
        state.dirty_this_frame = false;
        self.gen0.push(id);
    }

    /// Stops tracking an element. Works on already-destroyed ids too: the id
    /// is purged from whichever tier list still holds it.
    pub fn remove_element<E: Drawable>(&mut self, id: ElementId, elements: &mut ElementArena<E>) {
        match elements.get(id).map(|element| element.batch_state().generation) {
            Some(Generation::Gen0) => {
                remove_id(&mut self.gen0, id);
            }
            Some(Generation::Gen1) => {
                remove_id(&mut self.gen1, id);
            }
            Some(Generation::Gen2) => {
                remove_id(&mut self.gen2, id);
                if let Some(element) = elements.get_mut(id) {
                    element.set_batched(false);
                }
                self.gen2_dirty = true;
            }
            None => {
                remove_id(&mut self.gen0, id);
                remove_id(&mut self.gen1, id);
                if remove_id(&mut self.gen2, id) {
                    self.gen2_dirty = true;
                }
            }
        }

        if let Some(element) = elements.get_mut(id) {
            let state = element.batch_state_mut();
            state.generation = Generation::Gen0;
            state.stable_frames = 0;
        }
    }

    /// Demotes a mutated element back to Gen0 and resets its stability
    /// counter. Gen2 demotions unbatch the element and schedule a merged
    /// mesh rebuild for the next update.
    pub fn mark_dirty<E: Drawable>(&mut self, id: ElementId, elements: &mut ElementArena<E>) {
        let Some(element) = elements.get_mut(id) else {
            return;
        };

        match element.batch_state().generation {
            Generation::Gen2 => {
                remove_id(&mut self.gen2, id);
                element.set_batched(false);
                self.gen2_dirty = true;
            }
            Generation::Gen1 => {
                remove_id(&mut self.gen1, id);
            }
            Generation::Gen0 => {}
        }

        let state = element.batch_state_mut();
        state.generation = Generation::Gen0;
        state.stable_frames = 0;
        state.dirty_this_frame = true;

        if !self.gen0.contains(&id) {
            self.gen0.push(id);
        }
    }

    /// Per-frame tick: sweeps Gen0 then Gen1, applies staged promotions, and
    /// rebuilds the Gen2 merged meshes only when Gen2 membership changed.
    pub fn update<E: Drawable>(&mut self, elements: &mut ElementArena<E>) {
        self.promote_to_gen1.clear();
        self.promote_to_gen2.clear();

        // 1. Gen0 sweep: drop destroyed ids, age stable elements, stage
        //    promotion candidates.
        let threshold = self.promotion_threshold_gen1;
        let staged = &mut self.promote_to_gen1;
        self.gen0.retain(|&id| {
            let Some(element) = elements.get_mut(id) else {
                return false;
            };
            let state = element.batch_state_mut();
            let mut promoted = false;
            if !state.dirty_this_frame {
                state.stable_frames += 1;
                if state.stable_frames >= threshold {
                    staged.push(id);
                    promoted = true;
                }
            }
            state.dirty_this_frame = false;
            !promoted
        });

        // 2. Gen1 sweep, same shape.
        let threshold = self.promotion_threshold_gen2;
        let staged = &mut self.promote_to_gen2;
        self.gen1.retain(|&id| {
            let Some(element) = elements.get_mut(id) else {
                return false;
            };
            let state = element.batch_state_mut();
            let mut promoted = false;
            if !state.dirty_this_frame {
                state.stable_frames += 1;
                if state.stable_frames >= threshold {
                    staged.push(id);
                    promoted = true;
                }
            }
            state.dirty_this_frame = false;
            !promoted
        });

        // Apply staged promotions now that both sweeps are done. The
        // stability counter restarts in the new tier.
        for &id in &self.promote_to_gen1 {
            if let Some(element) = elements.get_mut(id) {
                let state = element.batch_state_mut();
                state.generation = Generation::Gen1;
                state.stable_frames = 0;
                self.gen1.push(id);
            }
        }
        let promoted_to_gen2 = !self.promote_to_gen2.is_empty();
        for &id in &self.promote_to_gen2 {
            if let Some(element) = elements.get_mut(id) {
                let state = element.batch_state_mut();
                state.generation = Generation::Gen2;
                state.stable_frames = 0;
                self.gen2.push(id);
            }
        }

        // 3. Rebuild merged meshes only when Gen2 membership changed.
        if promoted_to_gen2 || self.gen2_dirty {
            log::trace!(
                "rebuilding gen2 batches: {} elements, promotion={}, invalidated={}",
                self.gen2.len(),
                promoted_to_gen2,
                self.gen2_dirty
            );
            self.gen2_batcher.rebuild_batch(&self.gen2, elements);
            self.gen2_dirty = false;
        }
    }

    /// Assigns render order: Gen0 elements first, then Gen1, then the Gen2
    /// batch groups, all from the shared counter in `context`.
    ///
    /// This is not a z-order-preserving merge across tiers. Content whose
    /// visuals depend on exact interleaving should only be promoted when it
    /// is order-independent (opaque or non-overlapping).
    pub fn set_rendering_order<E: Drawable>(
        &mut self,
        context: &mut UpdateContext,
        elements: &mut ElementArena<E>,
    ) {
        for &id in &self.gen0 {
            if let Some(element) = elements.get_mut(id) {
                if element.renderer_enabled() {
                    element.set_sorting_order(context.next_order());
                }
            }
        }
        for &id in &self.gen1 {
            if let Some(element) = elements.get_mut(id) {
                if element.renderer_enabled() {
                    element.set_sorting_order(context.next_order());
                }
            }
        }

        self.gen2_batcher.set_rendering_order(context);
    }

    /// Forces every element back to Gen0. Gen2 elements return to
    /// independent rendering; the next `update` rebuilds the (now empty)
    /// merged meshes.
    pub fn reset<E: Drawable>(&mut self, elements: &mut ElementArena<E>) {
        for id in self.gen2.drain(..) {
            if let Some(element) = elements.get_mut(id) {
                element.set_batched(false);
                let state = element.batch_state_mut();
                state.generation = Generation::Gen0;
                state.stable_frames = 0;
                self.gen0.push(id);
            }
        }

        for id in self.gen1.drain(..) {
            if let Some(element) = elements.get_mut(id) {
                let state = element.batch_state_mut();
                state.generation = Generation::Gen0;
                state.stable_frames = 0;
                self.gen0.push(id);
            }
        }

        self.gen2_dirty = true;
        log::debug!("generational batcher reset: {} elements in gen0", self.gen0.len());
    }

    /// Releases the owned mesh batcher and stops tracking everything.
    pub fn dispose<E: Drawable>(&mut self, elements: &mut ElementArena<E>) {
        for &id in &self.gen2 {
            if let Some(element) = elements.get_mut(id) {
                element.set_batched(false);
            }
        }
        self.gen0.clear();
        self.gen1.clear();
        self.gen2.clear();
        self.gen2_batcher.dispose(elements);
        self.gen2_dirty = false;
    }

    pub fn gen0_count(&self) -> usize {
        self.gen0.len()
    }

    pub fn gen1_count(&self) -> usize {
        self.gen1.len()
    }

    pub fn gen2_count(&self) -> usize {
        self.gen2.len()
    }

    pub fn total_count(&self) -> usize {
        self.gen0.len() + self.gen1.len() + self.gen2.len()
    }

    pub fn batch_count(&self) -> usize {
        self.gen2_batcher.batch_count()
    }

    pub fn total_vertex_count(&self) -> usize {
        self.gen2_batcher.total_vertex_count()
    }

    pub fn mesh_batcher(&self) -> &MeshBatcher {
        &self.gen2_batcher
    }

    pub fn stats(&self) -> BatcherStats {
        BatcherStats {
            gen0_count: self.gen0_count(),
            gen1_count: self.gen1_count(),
            gen2_count: self.gen2_count(),
            total_count: self.total_count(),
            batch_count: self.batch_count(),
            total_vertex_count: self.total_vertex_count(),
        }
    }
}

fn remove_id(list: &mut Vec<ElementId>, id: ElementId) -> bool {
    if let Some(position) = list.iter().position(|&candidate| candidate == id) {
        list.remove(position);
        true
    } else {
        false
    }
}
