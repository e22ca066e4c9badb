pub mod material;
pub mod mesh;
pub mod vertex;

pub use material::{Material, MaterialFlags};
pub use mesh::CombinedMesh;
pub use vertex::VertexBuffer;
