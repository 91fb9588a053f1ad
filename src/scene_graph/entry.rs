use crate::display::DisplayObject;
use crate::math::Transform;
use crate::scene_graph::flatten::{Flatten, FlattenContext};
use crate::scene_graph::instance_reference::InstanceReference;
use crate::scene_graph::model_mesh::ModelMesh;
use crate::scene_graph::model_object::ModelObject;

/// Anything that can sit in the model's object table or inside an instance
/// definition.
#[derive(Debug)]
pub enum ModelEntry {
    Mesh(ModelMesh),
    InstanceReference(InstanceReference),
}

impl ModelEntry {
    pub fn object(&self) -> &ModelObject {
        match self {
            ModelEntry::Mesh(mesh) => mesh.object(),
            ModelEntry::InstanceReference(reference) => reference.object(),
        }
    }

    pub fn object_mut(&mut self) -> &mut ModelObject {
        match self {
            ModelEntry::Mesh(mesh) => mesh.object_mut(),
            ModelEntry::InstanceReference(reference) => reference.object_mut(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ModelEntry::Mesh(mesh) => &mesh.name,
            ModelEntry::InstanceReference(reference) => &reference.name,
        }
    }

    /// Own triangles only; references resolve theirs through the model.
    pub fn triangle_count(&self) -> u32 {
        match self {
            ModelEntry::Mesh(mesh) => mesh.triangle_count(),
            ModelEntry::InstanceReference(reference) => reference.object().triangle_count(),
        }
    }

    pub fn release(&mut self) -> bool {
        match self {
            ModelEntry::Mesh(mesh) => mesh.release(),
            ModelEntry::InstanceReference(reference) => reference.release(),
        }
    }
}

impl Flatten for ModelEntry {
    fn flatten<'a>(
        &'a self,
        cx: &mut FlattenContext<'a>,
        out: &mut Vec<DisplayObject<'a>>,
        xform: &Transform,
    ) {
        match self {
            ModelEntry::Mesh(mesh) => mesh.flatten(cx, out, xform),
            ModelEntry::InstanceReference(reference) => reference.flatten(cx, out, xform),
        }
    }
}

impl From<ModelMesh> for ModelEntry {
    fn from(mesh: ModelMesh) -> Self {
        ModelEntry::Mesh(mesh)
    }
}

impl From<InstanceReference> for ModelEntry {
    fn from(reference: InstanceReference) -> Self {
        ModelEntry::InstanceReference(reference)
    }
}
