// render/vertex.rs

use glam::{Affine2, Vec2};
use std::cell::RefCell;

thread_local! {
    static POOL: RefCell<Vec<VertexBuffer>> = const { RefCell::new(Vec::new()) };
}

/// Pooled export buffer handed from a drawable element to a batch group.
///
/// The position/color/uv arrays are parallel; `indices` are triangle indices
/// local to this buffer. Obtain with [`VertexBuffer::begin`] and return with
/// [`VertexBuffer::end`] exactly once after copying the contents out. All
/// batching runs on the single render thread, so the pool is thread-local.
#[derive(Debug, Default)]
pub struct VertexBuffer {
    pub positions: Vec<Vec2>,
    pub colors: Vec<[u8; 4]>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl VertexBuffer {
    /// Takes a cleared buffer from the pool, or allocates a fresh one.
    pub fn begin() -> Self {
        POOL.with(|pool| pool.borrow_mut().pop()).unwrap_or_default()
    }

    /// Returns the buffer to the pool. Contents are cleared; capacity is
    /// kept so steady-state exports stop allocating.
    pub fn end(mut self) {
        self.positions.clear();
        self.colors.clear();
        self.uvs.clear();
        self.indices.clear();
        POOL.with(|pool| pool.borrow_mut().push(self));
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

    /// Appends one axis-aligned quad (4 vertices, 6 indices) transformed by
    /// `world`, with uvs spanning `uv_min..uv_max`.
    pub fn add_quad(
        &mut self,
        world: Affine2,
        min: Vec2,
        max: Vec2,
        uv_min: Vec2,
        uv_max: Vec2,
        color: [u8; 4],
    ) {
        let base = self.positions.len() as u32;
        let corners = [
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(max.x, max.y),
            Vec2::new(min.x, max.y),
        ];
        let uvs = [
            Vec2::new(uv_min.x, uv_min.y),
            Vec2::new(uv_max.x, uv_min.y),
            Vec2::new(uv_max.x, uv_max.y),
            Vec2::new(uv_min.x, uv_max.y),
        ];
        for (corner, uv) in corners.iter().zip(uvs.iter()) {
            self.positions.push(world.transform_point2(*corner));
            self.colors.push(color);
            self.uvs.push(*uv);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_quad_appends_four_vertices_six_indices() {
        let mut vb = VertexBuffer::begin();
        vb.add_quad(
            Affine2::IDENTITY,
            Vec2::ZERO,
            Vec2::ONE,
            Vec2::ZERO,
            Vec2::ONE,
            [255; 4],
        );
        assert_eq!(vb.vertex_count(), 4);
        assert_eq!(vb.index_count(), 6);
        assert_eq!(vb.colors.len(), 4);
        assert_eq!(vb.uvs.len(), 4);

        // Second quad indexes past the first.
        vb.add_quad(
            Affine2::IDENTITY,
            Vec2::ZERO,
            Vec2::ONE,
            Vec2::ZERO,
            Vec2::ONE,
            [255; 4],
        );
        assert_eq!(vb.indices[6..], [4, 5, 6, 4, 6, 7]);
        vb.end();
    }

    #[test]
    fn quad_positions_are_world_transformed() {
        let world = Affine2::from_translation(Vec2::new(10.0, 0.0));
        let mut vb = VertexBuffer::begin();
        vb.add_quad(world, Vec2::ZERO, Vec2::ONE, Vec2::ZERO, Vec2::ONE, [0; 4]);
        assert!(vb.positions[0].abs_diff_eq(Vec2::new(10.0, 0.0), 1e-6));
        assert!(vb.positions[2].abs_diff_eq(Vec2::new(11.0, 1.0), 1e-6));
        vb.end();
    }

    #[test]
    fn end_returns_cleared_buffer_to_pool() {
        let mut vb = VertexBuffer::begin();
        vb.add_quad(
            Affine2::IDENTITY,
            Vec2::ZERO,
            Vec2::ONE,
            Vec2::ZERO,
            Vec2::ONE,
            [255; 4],
        );
        vb.end();

        let reused = VertexBuffer::begin();
        assert!(reused.is_empty());
        assert_eq!(reused.index_count(), 0);
        reused.end();
    }
}
