// scene/mod.rs

pub mod element;
pub mod node;
pub mod transform;

// Re-export commonly used types
pub use element::{BatchState, Drawable, ElementArena, ElementId, Generation};
pub use node::{RenderNode, RenderRoot};
pub use transform::Transform;
