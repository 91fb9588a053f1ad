//! In-memory description of a loaded CAD document.
//!
//! This is the plain data a file reader produces. [`crate::scene_graph::Model`]
//! wraps it into owned model objects.

use glam::{Mat4, Vec3, Vec4};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct Document {
    pub layers: Vec<LayerDesc>,
    pub materials: Vec<MaterialDesc>,
    pub objects: Vec<DocumentObject>,
    pub instance_definitions: Vec<InstanceDefinitionDesc>,
}

#[derive(Debug, Clone)]
pub struct LayerDesc {
    pub name: String,
    pub visible: bool,
    pub color: Vec4,
}

#[derive(Debug, Clone)]
pub struct MaterialDesc {
    pub name: String,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shine: f32,
    pub transparency: f32,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            name: String::new(),
            diffuse: Vec4::ONE,
            specular: Vec4::ONE,
            shine: 0.0,
            transparency: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ObjectAttributes {
    pub id: Uuid,
    pub name: String,
    /// -1 when the object is not on any layer.
    pub layer_index: i32,
    pub visible: bool,
    pub material_index: Option<usize>,
}

impl Default for ObjectAttributes {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            name: String::new(),
            layer_index: -1,
            visible: true,
            material_index: None,
        }
    }
}

/// Render mesh as stored in the document.
///
/// Faces are quads `[a, b, c, d]`; a face with `c == d` is a triangle.
#[derive(Debug, Clone, Default)]
pub struct MeshGeometry {
    pub vertices: Vec<Vec3>,
    pub normals: Option<Vec<Vec3>>,
    pub faces: Vec<[u32; 4]>,
}

#[derive(Debug, Clone)]
pub enum Geometry {
    Mesh(MeshGeometry),
    InstanceReference { definition_id: Uuid, xform: Mat4 },
}

#[derive(Debug, Clone)]
pub struct DocumentObject {
    pub attributes: ObjectAttributes,
    pub geometry: Geometry,
}

#[derive(Debug, Clone)]
pub struct InstanceDefinitionDesc {
    pub id: Uuid,
    pub name: String,
    pub objects: Vec<DocumentObject>,
}
