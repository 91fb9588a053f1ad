use anyhow::{Context, Result};
use glam::{Mat4, Quat, Vec3, Vec4};
use uuid::Uuid;

use cadscene::document::{
    Document, DocumentObject, Geometry, InstanceDefinitionDesc, LayerDesc, MaterialDesc,
    MeshGeometry, ObjectAttributes,
};
use cadscene::scene_graph::Model;
use cadscene::{ModelConfig, ResourceTracker};

fn main() -> Result<()> {
    pretty_env_logger::init();

    let config = ModelConfig {
        include_hidden: std::env::var_os("CADSCENE_INCLUDE_HIDDEN").is_some(),
        ..Default::default()
    };

    let tracker = ResourceTracker::new();
    let document = demo_document();
    let mut model = Model::from_document(&document, &tracker, config)?;

    let display_objects = model.display_objects();
    let bounds = model.bounding_box().context("Nothing to display")?;
    log::info!(
        "{} display objects, {} triangles, bounds {} .. {}",
        display_objects.len(),
        model.triangle_count(),
        bounds.min,
        bounds.max
    );

    for batch in model.display_batches() {
        log::info!(
            "Batch {}: {} instances, {} triangles, material {}",
            batch.mesh.name(),
            batch.instances.len(),
            batch.triangle_count(),
            batch.material.map_or("<none>", |material| material.name.as_str())
        );
    }

    let slab = model
        .get_object_by_name("Slab")
        .context("Slab object not found")?;
    model.remove_object(slab);
    log::info!(
        "Removed slab: {} resources live, {} released",
        tracker.live(),
        tracker.released()
    );

    model.release();
    log::info!(
        "Released model: {} resources live, {} released",
        tracker.live(),
        tracker.released()
    );

    Ok(())
}

fn box_geometry(size: Vec3) -> MeshGeometry {
    let h = size * 0.5;
    let vertices = (0..8)
        .map(|i| {
            Vec3::new(
                if i & 1 == 0 { -h.x } else { h.x },
                if i & 2 == 0 { -h.y } else { h.y },
                if i & 4 == 0 { -h.z } else { h.z },
            )
        })
        .collect();

    MeshGeometry {
        vertices,
        normals: None,
        faces: vec![
            [0, 2, 3, 1],
            [4, 5, 7, 6],
            [0, 1, 5, 4],
            [2, 6, 7, 3],
            [0, 4, 6, 2],
            [1, 3, 7, 5],
        ],
    }
}

fn demo_document() -> Document {
    let bolt_id = Uuid::new_v4();

    let mesh = |name: &str, layer_index: i32, material_index, size| DocumentObject {
        attributes: ObjectAttributes {
            id: Uuid::new_v4(),
            name: name.to_string(),
            layer_index,
            material_index,
            ..Default::default()
        },
        geometry: Geometry::Mesh(box_geometry(size)),
    };

    let bolts = (0..4).flat_map(|x| (0..4).map(move |y| (x, y))).map(|(x, y)| {
        let rotation = Quat::from_rotation_z((x * 4 + y) as f32 * 0.3);
        DocumentObject {
            attributes: ObjectAttributes {
                id: Uuid::new_v4(),
                name: format!("Bolt {x}-{y}"),
                layer_index: 0,
                ..Default::default()
            },
            geometry: Geometry::InstanceReference {
                definition_id: bolt_id,
                xform: Mat4::from_rotation_translation(
                    rotation,
                    Vec3::new(x as f32 * 2.0 - 3.0, y as f32 * 2.0 - 3.0, 0.5),
                ),
            },
        }
    });

    let mut objects = vec![
        mesh("Slab", 0, Some(0), Vec3::new(8.0, 8.0, 0.5)),
        mesh("Construction box", 1, None, Vec3::splat(10.0)),
    ];
    objects.extend(bolts);

    Document {
        layers: vec![
            LayerDesc {
                name: "Default".into(),
                visible: true,
                color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            },
            LayerDesc {
                name: "Construction".into(),
                visible: false,
                color: Vec4::new(0.5, 0.5, 0.5, 1.0),
            },
        ],
        materials: vec![
            MaterialDesc {
                name: "Concrete".into(),
                diffuse: Vec4::new(0.6, 0.6, 0.58, 1.0),
                ..Default::default()
            },
            MaterialDesc {
                name: "Steel".into(),
                diffuse: Vec4::new(0.7, 0.72, 0.75, 1.0),
                shine: 0.8,
                ..Default::default()
            },
        ],
        objects,
        instance_definitions: vec![InstanceDefinitionDesc {
            id: bolt_id,
            name: "Bolt".into(),
            objects: vec![mesh("Bolt head", 0, Some(1), Vec3::new(0.3, 0.3, 0.2))],
        }],
    }
}
