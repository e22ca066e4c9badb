#![allow(dead_code)]

use batch2d::{BatchState, Drawable, Material, Transform, VertexBuffer};
use glam::{Affine2, Vec2};

/// What `export_vertices` hands back, so tests can cover the degenerate
/// paths too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// One unit quad: 4 vertices, 6 indices.
    Quad,
    /// A buffer with zero vertices.
    Empty,
    /// No buffer at all.
    Nothing,
}

/// Minimal host-side drawable used by the integration tests.
pub struct TestElement {
    pub material: Option<Material>,
    pub transform: Transform,
    pub size: Vec2,
    pub color: [u8; 4],
    pub export: ExportMode,
    pub enabled: bool,
    pub batched: bool,
    pub sorting_order: u32,
    pub state: BatchState,
}

impl TestElement {
    pub fn quad(material: Material) -> Self {
        Self {
            material: Some(material),
            transform: Transform::IDENTITY,
            size: Vec2::ONE,
            color: [255, 255, 255, 255],
            export: ExportMode::Quad,
            enabled: true,
            batched: false,
            sorting_order: 0,
            state: BatchState::default(),
        }
    }

    pub fn unbatchable() -> Self {
        Self {
            material: None,
            ..Self::quad(Material::new(0))
        }
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.transform = Transform::from_translation(position);
        self
    }

    pub fn exporting(mut self, export: ExportMode) -> Self {
        self.export = export;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl Drawable for TestElement {
    fn material(&self) -> Option<Material> {
        self.material
    }

    fn world_matrix(&self) -> Affine2 {
        self.transform.matrix()
    }

    fn export_vertices(&mut self, world: Affine2) -> Option<VertexBuffer> {
        match self.export {
            ExportMode::Nothing => None,
            ExportMode::Empty => Some(VertexBuffer::begin()),
            ExportMode::Quad => {
                let mut buffer = VertexBuffer::begin();
                buffer.add_quad(
                    world,
                    Vec2::ZERO,
                    self.size,
                    Vec2::ZERO,
                    Vec2::ONE,
                    self.color,
                );
                Some(buffer)
            }
        }
    }

    fn set_batched(&mut self, batched: bool) {
        self.batched = batched;
    }

    fn renderer_enabled(&self) -> bool {
        self.enabled
    }

    fn set_sorting_order(&mut self, order: u32) {
        self.sorting_order = order;
    }

    fn batch_state(&self) -> &BatchState {
        &self.state
    }

    fn batch_state_mut(&mut self) -> &mut BatchState {
        &mut self.state
    }
}
