pub mod bounds;
pub mod transform;

pub use bounds::AABB;
pub use transform::Transform;
