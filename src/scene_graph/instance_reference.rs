use uuid::Uuid;

use crate::display::DisplayObject;
use crate::math::Transform;
use crate::scene_graph::flatten::{Flatten, FlattenContext};
use crate::scene_graph::model_object::ModelObject;

/// Placement of an instance definition. The object's xform positions the
/// definition's geometry.
#[derive(Debug)]
pub struct InstanceReference {
    pub name: String,
    definition_id: Uuid,
    object: ModelObject,
}

impl InstanceReference {
    pub fn new(definition_id: Uuid, xform: Transform) -> Self {
        Self::with_id(Uuid::nil(), definition_id, xform)
    }

    pub fn with_id(object_id: Uuid, definition_id: Uuid, xform: Transform) -> Self {
        let mut object = ModelObject::with_id(object_id);
        object.set_xform(xform);

        Self {
            name: String::new(),
            definition_id,
            object,
        }
    }

    pub fn definition_id(&self) -> Uuid {
        self.definition_id
    }

    pub fn object(&self) -> &ModelObject {
        &self.object
    }

    pub fn object_mut(&mut self) -> &mut ModelObject {
        &mut self.object
    }

    pub fn release(&mut self) -> bool {
        self.object.release()
    }
}

impl Flatten for InstanceReference {
    fn flatten<'a>(
        &'a self,
        cx: &mut FlattenContext<'a>,
        out: &mut Vec<DisplayObject<'a>>,
        xform: &Transform,
    ) {
        if !cx.is_displayed(&self.object) {
            return;
        }

        let Some(definition) = cx.model().instance_definition(self.definition_id) else {
            log::warn!(
                "Instance reference {} points at unknown definition {}",
                self.object.object_id(),
                self.definition_id
            );
            return;
        };

        let placement = *xform * self.object.xform();
        let entered = cx.nested(|cx| definition.flatten(cx, out, &placement));

        if !entered {
            log::warn!(
                "Skipping instance reference {} of {}: nesting deeper than {} levels",
                self.object.object_id(),
                definition.name,
                cx.model().config().max_instance_depth
            );
        }
    }
}
