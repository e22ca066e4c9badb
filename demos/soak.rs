//! Churn soak: a few hundred quads across a handful of materials, with a
//! small fraction mutating every frame. Watch the tier counters settle and
//! the batch count stay near the material count.
//!
//! Run with `RUST_LOG=info cargo run --example soak`.

use batch2d::{
    BatchState, Drawable, ElementArena, ElementId, GenerationalBatcher, Material, RenderRoot,
    Transform, UpdateContext, VertexBuffer,
};
use glam::{Affine2, Vec2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const ELEMENT_COUNT: usize = 256;
const MATERIAL_COUNT: u32 = 8;
const FRAMES: u32 = 600;
const CHURN_CHANCE: f64 = 0.02;

struct Quad {
    material: Material,
    transform: Transform,
    batched: bool,
    sorting_order: u32,
    state: BatchState,
}

impl Drawable for Quad {
    fn material(&self) -> Option<Material> {
        Some(self.material)
    }

    fn world_matrix(&self) -> Affine2 {
        self.transform.matrix()
    }

    fn export_vertices(&mut self, world: Affine2) -> Option<VertexBuffer> {
        let mut buffer = VertexBuffer::begin();
        buffer.add_quad(
            world,
            Vec2::ZERO,
            Vec2::splat(8.0),
            Vec2::ZERO,
            Vec2::ONE,
            [255, 255, 255, 255],
        );
        Some(buffer)
    }

    fn set_batched(&mut self, batched: bool) {
        self.batched = batched;
    }

    fn renderer_enabled(&self) -> bool {
        true
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

fn main() {
    batch2d::init_logging();

    let mut rng = SmallRng::seed_from_u64(42);
    let mut elements: ElementArena<Quad> = ElementArena::new();
    let mut batcher = GenerationalBatcher::new(RenderRoot::new("soak-root", 0));

    let ids: Vec<ElementId> = (0..ELEMENT_COUNT)
        .map(|_| {
            let id = elements.insert(Quad {
                material: Material::new(rng.gen_range(0..MATERIAL_COUNT)),
                transform: Transform::from_translation(Vec2::new(
                    rng.gen_range(0.0..1920.0),
                    rng.gen_range(0.0..1080.0),
                )),
                batched: false,
                sorting_order: 0,
                state: BatchState::default(),
            });
            batcher.add_element(id, &mut elements);
            id
        })
        .collect();

    for frame in 0..FRAMES {
        for &id in &ids {
            if rng.gen_bool(CHURN_CHANCE) {
                if let Some(quad) = elements.get_mut(id) {
                    quad.transform.translation += Vec2::new(
                        rng.gen_range(-4.0..4.0),
                        rng.gen_range(-4.0..4.0),
                    );
                }
                batcher.mark_dirty(id, &mut elements);
            }
        }

        batcher.update(&mut elements);
        let mut context = UpdateContext::new();
        batcher.set_rendering_order(&mut context, &mut elements);

        if frame % 60 == 0 {
            let stats = batcher.stats();
            log::info!(
                "frame {frame:4}: gen0={} gen1={} gen2={} batches={} vertices={} draw slots={}",
                stats.gen0_count,
                stats.gen1_count,
                stats.gen2_count,
                stats.batch_count,
                stats.total_vertex_count,
                context.rendering_order
            );
        }
    }

    let merged = ids
        .iter()
        .filter(|&&id| elements.get(id).map(|quad| quad.batched).unwrap_or(false))
        .count();
    let max_order = ids
        .iter()
        .filter_map(|&id| elements.get(id).map(|quad| quad.sorting_order))
        .max()
        .unwrap_or(0);
    log::info!("final frame: {merged} merged quads, highest independent order slot {max_order}");

    batcher.dispose(&mut elements);
    log::info!("soak complete");
}
