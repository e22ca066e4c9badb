// batch/mesh_batcher.rs

use super::context::UpdateContext;
use super::group::BatchGroup;
use crate::render::Material;
use crate::scene::{Drawable, ElementArena, ElementId, RenderRoot};
use crate::settings::BatcherSettings;
use std::collections::HashMap;

/// Partitions a candidate element set by material into batch groups and
/// keeps their combined meshes current.
///
/// `rebuild_batch` is a full resync: calling it twice with the same input
/// leaves the same visible state and the same groups for unchanged
/// materials.
pub struct MeshBatcher {
    groups: HashMap<Material, BatchGroup>,
    root: RenderRoot,
    settings: BatcherSettings,
    materials_to_remove: Vec<Material>,
}

impl MeshBatcher {
    pub fn new(root: RenderRoot) -> Self {
        Self::with_settings(root, BatcherSettings::default())
    }

    pub fn with_settings(root: RenderRoot, settings: BatcherSettings) -> Self {
        Self {
            groups: HashMap::new(),
            root,
            settings,
            materials_to_remove: Vec::new(),
        }
    }

    /// Resyncs the groups to exactly `ids`. Existing groups are cleared
    /// first (unbatching their members), then every element with a material
    /// is re-added, dirty groups rebuilt, and groups left empty disposed.
    /// Elements with no material are skipped and keep rendering
    /// independently.
    pub fn rebuild_batch<E: Drawable>(
        &mut self,
        ids: &[ElementId],
        elements: &mut ElementArena<E>,
    ) {
        for group in self.groups.values_mut() {
            group.clear(elements);
        }

        for &id in ids {
            let Some(element) = elements.get(id) else {
                continue;
            };
            let Some(material) = element.material() else {
                continue;
            };
            let world_matrix = element.world_matrix();

            let group = self
                .groups
                .entry(material)
                .or_insert_with(|| BatchGroup::new(material, &self.root, &self.settings));
            group.add_member(id, world_matrix);
        }

        for group in self.groups.values_mut() {
            if group.member_count() > 0 {
                group.rebuild_mesh(elements);
                group.node_mut().set_active(true);
            } else {
                group.node_mut().set_active(false);
            }
        }

        self.cleanup_empty_groups(elements);
    }

    fn cleanup_empty_groups<E: Drawable>(&mut self, elements: &mut ElementArena<E>) {
        self.materials_to_remove.clear();
        for (material, group) in &self.groups {
            if group.member_count() == 0 {
                self.materials_to_remove.push(*material);
            }
        }

        while let Some(material) = self.materials_to_remove.pop() {
            if let Some(mut group) = self.groups.remove(&material) {
                group.dispose(elements);
            }
        }
    }

    /// Assigns the next sequential order slot to every non-empty group.
    pub fn set_rendering_order(&mut self, context: &mut UpdateContext) {
        for group in self.groups.values_mut() {
            if group.member_count() > 0 {
                let order = context.next_order();
                group.node_mut().set_sorting_order(order);
            }
        }
    }

    /// Out-of-band invalidation: flags the group owning `id`'s material so
    /// the next `rebuild_batch` re-exports it even if membership is
    /// unchanged.
    pub fn mark_dirty<E: Drawable>(&mut self, id: ElementId, elements: &ElementArena<E>) {
        let Some(material) = elements.get(id).and_then(|element| element.material()) else {
            return;
        };
        if let Some(group) = self.groups.get_mut(&material) {
            group.mark_dirty();
        }
    }

    pub fn dispose<E: Drawable>(&mut self, elements: &mut ElementArena<E>) {
        for group in self.groups.values_mut() {
            group.dispose(elements);
        }
        self.groups.clear();
    }

    pub fn batch_count(&self) -> usize {
        self.groups.len()
    }

    pub fn total_vertex_count(&self) -> usize {
        self.groups
            .values()
            .map(|group| group.combined_mesh().vertex_count())
            .sum()
    }

    pub fn group(&self, material: Material) -> Option<&BatchGroup> {
        self.groups.get(&material)
    }

    pub fn groups(&self) -> impl Iterator<Item = &BatchGroup> {
        self.groups.values()
    }
}
