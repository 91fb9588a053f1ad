use std::collections::{HashMap, HashSet};

use anyhow::{anyhow, bail, Context};
use id_arena::{Arena, Id};
use uuid::Uuid;

use crate::config::ModelConfig;
use crate::display::{batch_display_objects, DisplayBatch, DisplayMesh, DisplayObject, Material};
use crate::document::{Document, DocumentObject, Geometry};
use crate::math::{Transform, AABB};
use crate::resources::ResourceTracker;
use crate::scene_graph::entry::ModelEntry;
use crate::scene_graph::flatten::{Flatten, FlattenContext};
use crate::scene_graph::instance_definition::InstanceDefinition;
use crate::scene_graph::instance_reference::InstanceReference;
use crate::scene_graph::layer::Layer;
use crate::scene_graph::model_mesh::ModelMesh;
use crate::scene_graph::model_object::{ObjectId, UNASSIGNED_LAYER};

pub type ModelEntryId = Id<ModelEntry>;

/// Owns every object wrapped from a document and produces the display list.
///
/// Removed objects are released in place. Their arena slot is never reused
/// and their id is dropped from the index but stays claimed, so it cannot be
/// handed to another object.
pub struct Model {
    config: ModelConfig,
    layers: Vec<Layer>,
    objects: Arena<ModelEntry>,
    object_index: HashMap<ObjectId, ModelEntryId>,
    definitions: HashMap<Uuid, InstanceDefinition>,
    /// Every object id ever taken by a top-level object or a definition member.
    claimed_ids: HashSet<ObjectId>,
}

impl Model {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            layers: Vec::new(),
            objects: Arena::new(),
            object_index: HashMap::new(),
            definitions: HashMap::new(),
            claimed_ids: HashSet::new(),
        }
    }

    /// Wraps every object and instance definition of `document`.
    pub fn from_document(
        document: &Document,
        tracker: &ResourceTracker,
        config: ModelConfig,
    ) -> anyhow::Result<Model> {
        let mut model = Model::new(config);
        model.layers = document.layers.iter().map(Layer::from).collect();

        for desc in &document.instance_definitions {
            let mut definition = InstanceDefinition::new(desc.id, desc.name.clone());

            for object in &desc.objects {
                let member = model
                    .wrap_object(document, tracker, object)
                    .with_context(|| {
                        format!(
                            "Failed to wrap object {} of instance definition {}",
                            object.attributes.id, desc.name
                        )
                    })?;
                definition.add_member(member);
            }

            model
                .add_instance_definition(definition)
                .with_context(|| format!("Failed to add instance definition {}", desc.name))?;
        }

        for object in &document.objects {
            let entry = model
                .wrap_object(document, tracker, object)
                .with_context(|| format!("Failed to wrap object {}", object.attributes.id))?;
            model.add_object(entry)?;
        }

        log::info!(
            "Wrapped document: {} objects, {} instance definitions, {} layers",
            model.object_index.len(),
            model.definitions.len(),
            model.layers.len()
        );

        Ok(model)
    }

    fn wrap_object(
        &self,
        document: &Document,
        tracker: &ResourceTracker,
        object: &DocumentObject,
    ) -> anyhow::Result<ModelEntry> {
        let attributes = &object.attributes;
        let object_id = if attributes.id.is_nil() {
            Uuid::new_v4()
        } else {
            attributes.id
        };

        let mut entry: ModelEntry = match &object.geometry {
            Geometry::Mesh(geometry) => {
                let mesh_name = if attributes.name.is_empty() {
                    format!("{} (Mesh)", object_id)
                } else {
                    attributes.name.clone()
                };

                let mut mesh = DisplayMesh::from_geometry(mesh_name, geometry)?;
                if self.config.upload_resources {
                    mesh.upload(tracker);
                }

                let mut model_mesh = ModelMesh::with_id(object_id, mesh);
                model_mesh.name = attributes.name.clone();
                model_mesh.into()
            }
            Geometry::InstanceReference {
                definition_id,
                xform,
            } => {
                let mut reference = InstanceReference::with_id(
                    object_id,
                    *definition_id,
                    Transform::from_matrix(*xform),
                );
                reference.name = attributes.name.clone();
                reference.into()
            }
        };

        let layer_index = self.checked_layer_index(attributes.layer_index, object_id);
        let model_object = entry.object_mut();
        model_object.layer_index = layer_index;
        model_object.visible = attributes.visible;

        if let Some(index) = attributes.material_index {
            let desc = document.materials.get(index).ok_or_else(|| {
                anyhow!(
                    "Material index {} out of range ({} materials)",
                    index,
                    document.materials.len()
                )
            })?;

            let mut material = Material::from_desc(desc);
            if self.config.upload_resources {
                material.upload(tracker);
            }
            model_object.set_material(Some(material));
        }

        Ok(entry)
    }

    fn checked_layer_index(&self, layer_index: i32, object_id: ObjectId) -> i32 {
        let in_range = usize::try_from(layer_index).is_ok_and(|index| index < self.layers.len());

        if layer_index == UNASSIGNED_LAYER || in_range {
            return layer_index;
        }

        log::warn!(
            "Object {} has layer index {} but the model has {} layers, leaving it unassigned",
            object_id,
            layer_index,
            self.layers.len()
        );
        UNASSIGNED_LAYER
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn add_layer(&mut self, layer: Layer) -> anyhow::Result<i32> {
        let index = i32::try_from(self.layers.len())
            .with_context(|| format!("Layer table is full, cannot add {}", layer.name))?;
        self.layers.push(layer);
        Ok(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    /// Indices outside the layer table count as visible.
    pub fn is_layer_visible(&self, index: usize) -> bool {
        self.layers.get(index).map_or(true, |layer| layer.visible)
    }

    /// Adds an object to the model, giving it a fresh id if it has none.
    pub fn add_object(&mut self, entry: impl Into<ModelEntry>) -> anyhow::Result<ModelEntryId> {
        let mut entry = entry.into();

        if entry.object().is_disposed() {
            bail!("Cannot add released object {}", entry.object().object_id());
        }

        if entry.object().object_id().is_nil() {
            entry.object_mut().assign_object_id(Uuid::new_v4());
        }

        let object_id = entry.object().object_id();
        if self.object_index.contains_key(&object_id) {
            bail!("Duplicate object id {}", object_id);
        }

        if self.claimed_ids.contains(&object_id) {
            bail!(
                "Object id {} belongs to a removed object or an instance definition member",
                object_id
            );
        }

        let entry_id = self.objects.alloc(entry);
        self.object_index.insert(object_id, entry_id);
        self.claimed_ids.insert(object_id);

        Ok(entry_id)
    }

    pub fn entry(&self, entry_id: ModelEntryId) -> Option<&ModelEntry> {
        self.objects.get(entry_id)
    }

    pub fn get_object(&self, object_id: ObjectId) -> Option<&ModelEntry> {
        self.object_index
            .get(&object_id)
            .and_then(|&entry_id| self.objects.get(entry_id))
    }

    pub fn get_object_mut(&mut self, object_id: ObjectId) -> Option<&mut ModelEntry> {
        self.object_index
            .get(&object_id)
            .and_then(|&entry_id| self.objects.get_mut(entry_id))
    }

    pub fn get_object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects()
            .find(|entry| entry.name() == name)
            .map(|entry| entry.object().object_id())
    }

    /// Live objects in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = &ModelEntry> {
        self.objects
            .iter()
            .map(|(_, entry)| entry)
            .filter(|entry| !entry.object().is_disposed())
    }

    /// Releases the object and drops it from the index. The id stays claimed.
    /// Returns `false` for unknown ids.
    pub fn remove_object(&mut self, object_id: ObjectId) -> bool {
        let Some(entry_id) = self.object_index.remove(&object_id) else {
            return false;
        };

        log::debug!("Removing object {}", object_id);

        if let Some(entry) = self.objects.get_mut(entry_id) {
            entry.release();
        }

        true
    }

    /// Adds a definition, giving members without an id a fresh one. Member ids
    /// must be unique across the whole model.
    pub fn add_instance_definition(
        &mut self,
        mut definition: InstanceDefinition,
    ) -> anyhow::Result<()> {
        let id = definition.id();

        if id.is_nil() {
            bail!("Instance definition {} has no id", definition.name);
        }

        if self.definitions.contains_key(&id) {
            bail!("Duplicate instance definition id {} ({})", id, definition.name);
        }

        let mut member_ids = HashSet::new();
        for member in definition.members_mut() {
            if member.object().object_id().is_nil() {
                member.object_mut().assign_object_id(Uuid::new_v4());
            }

            let member_id = member.object().object_id();
            if self.claimed_ids.contains(&member_id) || !member_ids.insert(member_id) {
                bail!(
                    "Member {} of instance definition {} reuses an object id",
                    member_id,
                    definition.name
                );
            }
        }

        self.claimed_ids.extend(member_ids);
        self.definitions.insert(id, definition);
        Ok(())
    }

    pub fn instance_definition(&self, id: Uuid) -> Option<&InstanceDefinition> {
        self.definitions.get(&id)
    }

    pub fn instance_definitions(&self) -> impl Iterator<Item = &InstanceDefinition> {
        self.definitions.values()
    }

    /// Flattens every live object under the identity transform.
    pub fn display_objects(&self) -> Vec<DisplayObject<'_>> {
        let mut cx = FlattenContext::new(self);
        let mut display_objects = Vec::new();

        for entry in self.objects() {
            entry.flatten(&mut cx, &mut display_objects, &Transform::IDENTITY);
        }

        display_objects
    }

    pub fn display_batches(&self) -> Vec<DisplayBatch<'_>> {
        batch_display_objects(&self.display_objects())
    }

    /// Triangles in the current display list, counting every placement.
    pub fn triangle_count(&self) -> u64 {
        self.display_objects()
            .iter()
            .map(|object| u64::from(object.mesh.triangle_count()))
            .sum()
    }

    /// Bounds of everything displayed, `None` when nothing is.
    pub fn bounding_box(&self) -> Option<AABB> {
        self.display_objects()
            .iter()
            .map(DisplayObject::bounding_box)
            .reduce(|a, b| a.union(&b))
    }

    /// Releases every object and instance definition. Their ids stay claimed.
    pub fn release(&mut self) {
        let mut released = 0;

        for (_, entry) in self.objects.iter_mut() {
            if entry.release() {
                released += 1;
            }
        }

        for definition in self.definitions.values_mut() {
            definition.release();
        }

        self.object_index.clear();

        log::debug!(
            "Released {} objects and {} instance definitions",
            released,
            self.definitions.len()
        );
    }
}
