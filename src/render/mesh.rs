// render/mesh.rs

use glam::Vec2;

/// CPU-side combined mesh owned by a batch group.
///
/// The position, color and uv arrays are always index-aligned, and every
/// triangle index is pre-offset so it refers to the correct member's slice.
/// Updates go through `clear()` followed by the `set_*` methods so partially
/// replaced buffers are never observable.
#[derive(Debug, Default)]
pub struct CombinedMesh {
    positions: Vec<Vec2>,
    colors: Vec<[u8; 4]>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
}

impl CombinedMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
        self.uvs.clear();
        self.indices.clear();
    }

    pub fn set_positions(&mut self, positions: &[Vec2]) {
        self.positions.clear();
        self.positions.extend_from_slice(positions);
    }

    pub fn set_colors(&mut self, colors: &[[u8; 4]]) {
        self.colors.clear();
        self.colors.extend_from_slice(colors);
    }

    pub fn set_uvs(&mut self, uvs: &[Vec2]) {
        self.uvs.clear();
        self.uvs.extend_from_slice(uvs);
    }

    pub fn set_indices(&mut self, indices: &[u32]) {
        self.indices.clear();
        self.indices.extend_from_slice(indices);
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn colors(&self) -> &[[u8; 4]] {
        &self.colors
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    // Byte views for uploading to GPU vertex/index buffers.

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
