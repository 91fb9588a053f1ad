use crate::display::DisplayObject;
use crate::math::Transform;
use crate::scene_graph::model::Model;
use crate::scene_graph::model_object::ModelObject;

/// Converts a (possibly compound) model object into renderable display
/// objects placed under a parent transform.
///
/// Only concrete objects flatten:
///
/// ```
/// use cadscene::display::{DisplayMesh, DisplayObject};
/// use cadscene::document::MeshGeometry;
/// use cadscene::math::Transform;
/// use cadscene::scene_graph::{Flatten, FlattenContext, Model, ModelMesh};
/// use cadscene::ModelConfig;
/// use glam::Vec3;
///
/// let geometry = MeshGeometry {
///     vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
///     normals: None,
///     faces: vec![[0, 1, 2, 2]],
/// };
/// let mesh = ModelMesh::new(DisplayMesh::from_geometry("tri", &geometry)?);
/// let model = Model::new(ModelConfig::default());
/// let mut cx = FlattenContext::new(&model);
/// let mut out: Vec<DisplayObject> = Vec::new();
///
/// mesh.flatten(&mut cx, &mut out, &Transform::IDENTITY);
/// assert_eq!(out.len(), 1);
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// A bare [`ModelObject`] has nothing to flatten and does not implement the trait:
///
/// ```compile_fail
/// use cadscene::display::DisplayObject;
/// use cadscene::math::Transform;
/// use cadscene::scene_graph::{Flatten, FlattenContext, Model, ModelObject};
/// use cadscene::ModelConfig;
///
/// let object = ModelObject::new();
/// let model = Model::new(ModelConfig::default());
/// let mut cx = FlattenContext::new(&model);
/// let mut out: Vec<DisplayObject> = Vec::new();
///
/// object.flatten(&mut cx, &mut out, &Transform::IDENTITY);
/// ```
pub trait Flatten {
    fn flatten<'a>(
        &'a self,
        cx: &mut FlattenContext<'a>,
        out: &mut Vec<DisplayObject<'a>>,
        xform: &Transform,
    );
}

/// Model access and instance nesting depth for one flattening pass.
pub struct FlattenContext<'a> {
    model: &'a Model,
    depth: usize,
}

impl<'a> FlattenContext<'a> {
    pub fn new(model: &'a Model) -> Self {
        Self { model, depth: 0 }
    }

    pub fn model(&self) -> &'a Model {
        self.model
    }

    /// Whether `object` contributes to the display list in this pass.
    pub fn is_displayed(&self, object: &ModelObject) -> bool {
        if object.is_disposed() {
            return false;
        }

        if self.model.config().include_hidden {
            return true;
        }

        object.visible
            && object
                .layer()
                .map_or(true, |index| self.model.is_layer_visible(index))
    }

    /// Runs `f` one instance level deeper. Returns `false` without running it
    /// when the configured depth limit is reached.
    pub fn nested(&mut self, f: impl FnOnce(&mut Self)) -> bool {
        if self.depth >= self.model.config().max_instance_depth {
            return false;
        }

        self.depth += 1;
        f(self);
        self.depth -= 1;

        true
    }
}
