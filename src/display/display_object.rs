use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use itertools::Itertools;
use uuid::Uuid;

use crate::display::{DisplayMesh, Material};
use crate::math::{Transform, AABB};

/// One renderable item of a flattened model, borrowing its mesh and material
/// from the model object that owns them.
#[derive(Debug, Clone, Copy)]
pub struct DisplayObject<'a> {
    /// Id of the model object the mesh belongs to. Every placement of an
    /// instance definition member shares the member's id.
    pub object_id: Uuid,
    pub layer_index: i32,
    pub mesh: &'a DisplayMesh,
    pub material: Option<&'a Material>,
    pub xform: Transform,
}

impl DisplayObject<'_> {
    pub fn instance(&self) -> Instance {
        Instance {
            model: self.xform.matrix(),
        }
    }

    pub fn bounding_box(&self) -> AABB {
        self.mesh.bounding_box().transform(&self.xform.matrix())
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Instance {
    pub model: Mat4,
}

/// All placements of one mesh, ready to be drawn instanced.
#[derive(Debug)]
pub struct DisplayBatch<'a> {
    pub object_id: Uuid,
    pub mesh: &'a DisplayMesh,
    pub material: Option<&'a Material>,
    pub instances: Vec<Instance>,
}

impl DisplayBatch<'_> {
    pub fn triangle_count(&self) -> u64 {
        u64::from(self.mesh.triangle_count()).saturating_mul(self.instances.len() as u64)
    }
}

/// Groups display objects by source object, keeping first-seen order.
pub fn batch_display_objects<'a>(objects: &[DisplayObject<'a>]) -> Vec<DisplayBatch<'a>> {
    let mut groups = objects
        .iter()
        .into_group_map_by(|object| object.object_id);

    objects
        .iter()
        .unique_by(|object| object.object_id)
        .filter_map(|first| {
            let group = groups.remove(&first.object_id)?;
            Some(DisplayBatch {
                object_id: first.object_id,
                mesh: first.mesh,
                material: first.material,
                instances: group.iter().map(|object| object.instance()).collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::display::mesh::tests::unit_quad;

    #[test]
    fn batches_keep_first_seen_order() {
        let mesh_a = DisplayMesh::from_geometry("a", &unit_quad()).unwrap();
        let mesh_b = DisplayMesh::from_geometry("b", &unit_quad()).unwrap();
        let id_a = Uuid::new_v4();
        let id_b = Uuid::new_v4();

        let object = |object_id, mesh, x: f32| DisplayObject {
            object_id,
            layer_index: -1,
            mesh,
            material: None,
            xform: Transform::from_translation(Vec3::X * x),
        };

        let objects = [
            object(id_b, &mesh_b, 0.0),
            object(id_a, &mesh_a, 1.0),
            object(id_b, &mesh_b, 2.0),
        ];

        let batches = batch_display_objects(&objects);

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].object_id, id_b);
        assert_eq!(batches[0].instances.len(), 2);
        assert_eq!(batches[0].instances[1].model.w_axis.x, 2.0);
        assert_eq!(batches[0].triangle_count(), 4);
        assert_eq!(batches[1].object_id, id_a);
    }

    #[test]
    fn bounding_box_follows_xform() {
        let mesh = DisplayMesh::from_geometry("quad", &unit_quad()).unwrap();
        let object = DisplayObject {
            object_id: Uuid::nil(),
            layer_index: 0,
            mesh: &mesh,
            material: None,
            xform: Transform::from_translation(Vec3::new(5.0, 0.0, 0.0)),
        };

        let bounds = object.bounding_box();
        assert_eq!(bounds.min, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(6.0, 1.0, 0.0));
    }
}
