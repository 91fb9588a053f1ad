pub mod entry;
pub mod flatten;
pub mod instance_definition;
pub mod instance_reference;
pub mod layer;
pub mod model;
pub mod model_mesh;
pub mod model_object;

// Re-export main types for convenience
pub use entry::ModelEntry;
pub use flatten::{Flatten, FlattenContext};
pub use instance_definition::InstanceDefinition;
pub use instance_reference::InstanceReference;
pub use layer::Layer;
pub use model::{Model, ModelEntryId};
pub use model_mesh::ModelMesh;
pub use model_object::{Lifecycle, ModelObject, ObjectId, UNASSIGNED_LAYER};
