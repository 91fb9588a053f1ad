use uuid::Uuid;

use crate::display::DisplayObject;
use crate::math::Transform;
use crate::scene_graph::entry::ModelEntry;
use crate::scene_graph::flatten::{Flatten, FlattenContext};
use crate::scene_graph::model_object::ModelObject;

/// Block of geometry that is only displayed through instance references.
/// The definition's object id is the id references point at.
#[derive(Debug)]
pub struct InstanceDefinition {
    pub name: String,
    object: ModelObject,
    members: Vec<ModelEntry>,
}

impl InstanceDefinition {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            object: ModelObject::with_id(id),
            members: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.object.object_id()
    }

    pub fn object(&self) -> &ModelObject {
        &self.object
    }

    pub fn add_member(&mut self, member: impl Into<ModelEntry>) {
        let member = member.into();

        if self.object.is_disposed() {
            log::warn!(
                "Dropping member {} added to disposed definition {}",
                member.object().object_id(),
                self.name
            );
            return;
        }

        self.members.push(member);
    }

    pub fn members(&self) -> &[ModelEntry] {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> &mut [ModelEntry] {
        &mut self.members
    }

    /// Triangles of one placement, saturating. Nested references count as 0.
    pub fn triangle_count(&self) -> u32 {
        self.members
            .iter()
            .map(ModelEntry::triangle_count)
            .fold(0, u32::saturating_add)
    }

    pub fn release(&mut self) -> bool {
        if !self.object.release() {
            return false;
        }

        for member in &mut self.members {
            member.release();
        }
        self.members.clear();

        true
    }
}

impl Flatten for InstanceDefinition {
    fn flatten<'a>(
        &'a self,
        cx: &mut FlattenContext<'a>,
        out: &mut Vec<DisplayObject<'a>>,
        xform: &Transform,
    ) {
        if self.object.is_disposed() {
            return;
        }

        for member in &self.members {
            member.flatten(cx, out, xform);
        }
    }
}
