// batch/group.rs

use crate::render::{CombinedMesh, Material};
use crate::scene::{Drawable, ElementArena, ElementId, RenderNode, RenderRoot};
use crate::settings::BatcherSettings;
use glam::{Affine2, Vec2};

/// One member of a batch group: where a single element's geometry landed in
/// the combined mesh. Offsets are valid only until the next rebuild.
#[derive(Debug, Clone, Copy)]
pub struct BatchMember {
    pub element: ElementId,
    pub world_matrix: Affine2,
    pub vertex_offset: u32,
    pub index_offset: u32,
}

/// Merged mesh for all members sharing one material.
///
/// Rebuilds are always full: every member's vertex data is re-exported and
/// appended with a running index offset. Incremental updates are deliberately
/// not attempted; the generational tiering above keeps rebuild frequency low.
pub struct BatchGroup {
    material: Material,
    combined_mesh: CombinedMesh,
    node: RenderNode,
    members: Vec<BatchMember>,
    dirty: bool,

    // Scratch buffers reused across rebuilds.
    positions: Vec<Vec2>,
    colors: Vec<[u8; 4]>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
}

impl BatchGroup {
    pub fn new(material: Material, root: &RenderRoot, settings: &BatcherSettings) -> Self {
        let node = RenderNode::new(format!("batch:{}", material.texture), root);
        Self {
            material,
            combined_mesh: CombinedMesh::new(),
            node,
            members: Vec::new(),
            dirty: true,
            positions: Vec::with_capacity(settings.scratch_vertex_capacity),
            colors: Vec::with_capacity(settings.scratch_vertex_capacity),
            uvs: Vec::with_capacity(settings.scratch_vertex_capacity),
            indices: Vec::with_capacity(settings.scratch_index_capacity),
        }
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn members(&self) -> &[BatchMember] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn combined_mesh(&self) -> &CombinedMesh {
        &self.combined_mesh
    }

    pub fn node(&self) -> &RenderNode {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut RenderNode {
        &mut self.node
    }

    /// Appends a member with a snapshotted world transform. Does not touch
    /// the element's batched flag; that happens on rebuild.
    pub fn add_member(&mut self, element: ElementId, world_matrix: Affine2) {
        self.members.push(BatchMember {
            element,
            world_matrix,
            vertex_offset: 0,
            index_offset: 0,
        });
        self.dirty = true;
    }

    /// Detaches every member, flagging each surviving element as unbatched.
    pub fn clear<E: Drawable>(&mut self, elements: &mut ElementArena<E>) {
        for member in &self.members {
            if let Some(element) = elements.get_mut(member.element) {
                element.set_batched(false);
            }
        }
        self.members.clear();
        self.dirty = true;
    }

    /// Rebuilds the combined mesh from scratch out of every member's
    /// exported vertex data. No-op unless the group is dirty.
    pub fn rebuild_mesh<E: Drawable>(&mut self, elements: &mut ElementArena<E>) {
        if !self.dirty {
            return;
        }
        self.dirty = false;

        self.positions.clear();
        self.colors.clear();
        self.uvs.clear();
        self.indices.clear();

        let mut vertex_offset = 0u32;

        for member in &mut self.members {
            member.vertex_offset = vertex_offset;
            member.index_offset = self.indices.len() as u32;

            let Some(element) = elements.get_mut(member.element) else {
                continue;
            };
            let Some(buffer) = element.export_vertices(member.world_matrix) else {
                continue;
            };

            let vertex_count = buffer.positions.len() as u32;
            self.positions.extend_from_slice(&buffer.positions);
            self.colors.extend_from_slice(&buffer.colors);
            self.uvs.extend_from_slice(&buffer.uvs);
            self.indices
                .extend(buffer.indices.iter().map(|index| index + vertex_offset));
            vertex_offset += vertex_count;

            buffer.end();
            element.set_batched(true);
        }

        self.combined_mesh.clear();
        if !self.positions.is_empty() {
            self.combined_mesh.set_positions(&self.positions);
            self.combined_mesh.set_colors(&self.colors);
            self.combined_mesh.set_uvs(&self.uvs);
            self.combined_mesh.set_indices(&self.indices);
        }

        log::trace!(
            "rebuilt batch group {}: {} members, {} vertices",
            self.node.name(),
            self.members.len(),
            vertex_offset
        );
    }

    /// Clears members and releases the combined mesh and render node.
    pub fn dispose<E: Drawable>(&mut self, elements: &mut ElementArena<E>) {
        self.clear(elements);
        self.combined_mesh.clear();
        self.node.set_active(false);
    }
}
