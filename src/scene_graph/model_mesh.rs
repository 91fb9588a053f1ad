use uuid::Uuid;

use crate::display::{DisplayMesh, DisplayObject};
use crate::math::Transform;
use crate::scene_graph::flatten::{Flatten, FlattenContext};
use crate::scene_graph::model_object::ModelObject;

/// A document object displayed through its own mesh.
#[derive(Debug)]
pub struct ModelMesh {
    pub name: String,
    object: ModelObject,
}

impl ModelMesh {
    pub fn new(mesh: DisplayMesh) -> Self {
        Self::with_id(Uuid::nil(), mesh)
    }

    pub fn with_id(object_id: Uuid, mesh: DisplayMesh) -> Self {
        let mut object = ModelObject::with_id(object_id);
        object.set_mesh(mesh);

        Self {
            name: String::new(),
            object,
        }
    }

    pub fn object(&self) -> &ModelObject {
        &self.object
    }

    pub fn object_mut(&mut self) -> &mut ModelObject {
        &mut self.object
    }

    pub fn triangle_count(&self) -> u32 {
        self.object
            .mesh()
            .map_or(0, |mesh| mesh.triangle_count())
    }

    pub fn release(&mut self) -> bool {
        self.object.release()
    }
}

impl Flatten for ModelMesh {
    fn flatten<'a>(
        &'a self,
        cx: &mut FlattenContext<'a>,
        out: &mut Vec<DisplayObject<'a>>,
        xform: &Transform,
    ) {
        if !cx.is_displayed(&self.object) {
            return;
        }

        let Some(mesh) = self.object.mesh() else {
            return;
        };

        out.push(DisplayObject {
            object_id: self.object.object_id(),
            layer_index: self.object.layer_index,
            mesh,
            material: self.object.material(),
            xform: *xform * self.object.xform(),
        });
    }
}
