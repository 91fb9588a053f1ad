pub mod display_object;
pub mod material;
pub mod mesh;

pub use display_object::{batch_display_objects, DisplayBatch, DisplayObject, Instance};
pub use material::Material;
pub use mesh::{DisplayMesh, Vertex};
