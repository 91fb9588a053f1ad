use uuid::Uuid;

use crate::display::{DisplayMesh, Material};
use crate::math::Transform;

pub type ObjectId = Uuid;

pub const UNASSIGNED_LAYER: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Live,
    Disposed,
}

/// State shared by every object wrapped from a document: identity, layer,
/// visibility, placement, and the display mesh and material it owns.
///
/// Owned resources are freed by [`ModelObject::release`] or, if that never
/// happens, when the object is dropped. Both go through the same path and
/// the second one is a no-op.
#[derive(Debug)]
pub struct ModelObject {
    object_id: ObjectId,
    pub layer_index: i32,
    pub visible: bool,
    mesh: Option<DisplayMesh>,
    xform: Transform,
    material: Option<Material>,
    lifecycle: Lifecycle,
}

impl ModelObject {
    pub fn new() -> Self {
        Self {
            object_id: Uuid::nil(),
            layer_index: UNASSIGNED_LAYER,
            visible: true,
            mesh: None,
            xform: Transform::IDENTITY,
            material: None,
            lifecycle: Lifecycle::Live,
        }
    }

    pub fn with_id(object_id: ObjectId) -> Self {
        let mut object = Self::new();
        object.object_id = object_id;
        object
    }

    pub fn object_id(&self) -> ObjectId {
        self.object_id
    }

    /// Assigns the id of an object created without one. Ids are never
    /// changed once set; returns whether the id was assigned.
    pub(crate) fn assign_object_id(&mut self, object_id: ObjectId) -> bool {
        if !self.object_id.is_nil() {
            log::warn!(
                "Object {} already has an id, not reassigning to {}",
                self.object_id,
                object_id
            );
            return false;
        }

        self.object_id = object_id;
        true
    }

    /// Layer table index, `None` when unassigned.
    pub fn layer(&self) -> Option<usize> {
        usize::try_from(self.layer_index).ok()
    }

    pub fn mesh(&self) -> Option<&DisplayMesh> {
        self.mesh.as_ref()
    }

    pub(crate) fn set_mesh(&mut self, mesh: DisplayMesh) {
        if self.is_disposed() {
            log::warn!(
                "Dropping mesh {} assigned to disposed object {}",
                mesh.name(),
                self.object_id
            );
            return;
        }

        self.mesh = Some(mesh);
    }

    pub fn xform(&self) -> Transform {
        self.xform
    }

    pub fn set_xform(&mut self, xform: Transform) {
        self.xform = xform;
    }

    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    /// Replaces the owned material. The previous one, if any, is freed.
    pub fn set_material(&mut self, material: Option<Material>) {
        if self.is_disposed() {
            if let Some(material) = material {
                log::warn!(
                    "Dropping material {} assigned to disposed object {}",
                    material.name,
                    self.object_id
                );
            }
            return;
        }

        self.material = material;
    }

    /// Always 0. Concrete objects report their own geometry.
    pub fn triangle_count(&self) -> u32 {
        0
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle == Lifecycle::Disposed
    }

    /// Frees the owned mesh and material and makes the object inert.
    /// Returns `false` if it was already released.
    pub fn release(&mut self) -> bool {
        if self.is_disposed() {
            return false;
        }

        self.lifecycle = Lifecycle::Disposed;

        if let Some(mesh) = self.mesh.take() {
            log::trace!("Releasing mesh {} of object {}", mesh.name(), self.object_id);
        }

        if let Some(material) = self.material.take() {
            log::trace!(
                "Releasing material {} of object {}",
                material.name,
                self.object_id
            );
        }

        true
    }
}

impl Default for ModelObject {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ModelObject {
    fn drop(&mut self) {
        if self.release() {
            log::trace!("Object {} released on drop", self.object_id);
        }
    }
}
