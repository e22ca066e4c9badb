//! Draw-call reduction for retained-mode 2D scene graphs.
//!
//! Elements sharing a material are merged into one combined mesh per
//! material ([`MeshBatcher`]), and a generational tiering layer
//! ([`GenerationalBatcher`]) makes sure only long-stable elements pay the
//! merge cost: anything that changed recently keeps rendering independently
//! until it has been stable long enough to promote.

pub mod batch;
pub mod render;
pub mod scene;
pub mod settings;

pub use batch::{BatchGroup, BatchMember, BatcherStats, GenerationalBatcher, MeshBatcher, UpdateContext};
pub use render::{CombinedMesh, Material, MaterialFlags, VertexBuffer};
pub use scene::{
    BatchState, Drawable, ElementArena, ElementId, Generation, RenderNode, RenderRoot, Transform,
};
pub use settings::BatcherSettings;

pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}
