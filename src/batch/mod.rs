pub mod context;
pub mod generational;
pub mod group;
pub mod mesh_batcher;

pub use context::UpdateContext;
pub use generational::{BatcherStats, GenerationalBatcher};
pub use group::{BatchGroup, BatchMember};
pub use mesh_batcher::MeshBatcher;
